//! # Pagination
//!
//! Turns `?page=&size=` query parameters into a row offset.
//!
//! ## Offset Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /products?page=3&size=10                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse "3" → 3, "10" → 10      (non-numeric / negative → error)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  offset = (3 - 1) * 10 = 20                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... LIMIT 20, 10                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty parameters (`?page=`) fall back to the defaults, the same as an
//! absent one.

use serde::Serialize;

use crate::error::{ValidationError, ValidationResult};
use crate::DEFAULT_PAGE;

// =============================================================================
// Offset Helpers
// =============================================================================

/// Computes the number of rows to skip for a 1-based page.
///
/// ## Example
/// ```rust
/// use catalog_core::pagination::compute_offset;
///
/// assert_eq!(compute_offset(1, 10).unwrap(), 0);
/// assert_eq!(compute_offset(4, 25).unwrap(), 75);
/// assert!(compute_offset(0, 10).is_err());
/// ```
pub fn compute_offset(page: u64, size: u64) -> ValidationResult<u64> {
    if page == 0 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }

    (page - 1).checked_mul(size).ok_or_else(|| ValidationError::OutOfRange {
        field: "page".to_string(),
        min: 1,
        max: (u64::MAX / size.max(1)).saturating_add(1),
    })
}

/// Returns the rows unchanged, or an empty vec when there are none.
///
/// Callers always get something iterable back, never `None`.
pub fn normalize_rows<T>(rows: Option<Vec<T>>) -> Vec<T> {
    rows.unwrap_or_default()
}

/// Parses a raw query parameter into a non-negative integer.
fn parse_count(field: &str, raw: &str) -> ValidationResult<u64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(value);
    }

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    match trimmed.strip_prefix('-') {
        Some(rest) if is_digits(rest) => Err(ValidationError::Negative {
            field: field.to_string(),
        }),
        _ if is_digits(trimmed.strip_prefix('+').unwrap_or(trimmed)) => {
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: u64::MAX,
            })
        }
        _ => Err(ValidationError::invalid_format(
            field,
            format!("expected an integer, got '{}'", raw),
        )),
    }
}

/// Treats `None` and blank strings alike.
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Pagination
// =============================================================================

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    size: u64,
    offset: u64,
}

/// The `meta` object echoed back with a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub size: u64,
}

impl Pagination {
    /// Creates a page request from already-numeric values.
    pub fn new(page: u64, size: u64) -> ValidationResult<Self> {
        let offset = compute_offset(page, size)?;
        Ok(Pagination { page, size, offset })
    }

    /// Builds a page request from raw query-string values.
    ///
    /// ## Arguments
    /// * `page` - raw `page` parameter, defaults to 1
    /// * `size` - raw `size` parameter, defaults to `default_size`
    /// * `default_size` - configured rows per page
    pub fn from_query(
        page: Option<&str>,
        size: Option<&str>,
        default_size: u64,
    ) -> ValidationResult<Self> {
        let page = match non_blank(page) {
            Some(raw) => parse_count("page", raw)?,
            None => DEFAULT_PAGE,
        };
        let size = match non_blank(size) {
            Some(raw) => parse_count("size", raw)?,
            None => default_size,
        };

        Pagination::new(page, size)
    }

    /// 1-based page number.
    #[inline]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Rows per page.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Rows to skip.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the `{page, size}` echo for the response.
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.page,
            size: self.size,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_offset() {
        assert_eq!(compute_offset(1, 10).unwrap(), 0);
        assert_eq!(compute_offset(2, 10).unwrap(), 10);
        assert_eq!(compute_offset(5, 7).unwrap(), 28);

        for size in [1, 3, 10, 250] {
            assert_eq!(compute_offset(1, size).unwrap(), 0);
            for page in 1..20 {
                assert_eq!(compute_offset(page, size).unwrap(), (page - 1) * size);
            }
        }
    }

    #[test]
    fn test_compute_offset_rejects_page_zero() {
        assert_eq!(
            compute_offset(0, 10),
            Err(ValidationError::MustBePositive {
                field: "page".to_string()
            })
        );
    }

    #[test]
    fn test_compute_offset_overflow() {
        assert!(matches!(
            compute_offset(u64::MAX, 2),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_compute_offset_overflow_names_last_valid_page() {
        let size = 10;
        let last = u64::MAX / size + 1;
        assert!(compute_offset(last, size).is_ok());

        match compute_offset(last + 1, size) {
            Err(ValidationError::OutOfRange { max, .. }) => assert_eq!(max, last),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_rows() {
        assert_eq!(normalize_rows::<u8>(None), Vec::<u8>::new());
        assert_eq!(normalize_rows(Some(vec![1, 2, 3])), vec![1, 2, 3]);
        assert_eq!(normalize_rows(Some(Vec::<u8>::new())), Vec::<u8>::new());
    }

    #[test]
    fn test_from_query_defaults() {
        let p = Pagination::from_query(None, None, 10).unwrap();
        assert_eq!((p.page(), p.size(), p.offset()), (1, 10, 0));

        let p = Pagination::from_query(Some(""), Some("  "), 25).unwrap();
        assert_eq!((p.page(), p.size(), p.offset()), (1, 25, 0));
    }

    #[test]
    fn test_from_query_coerces_strings() {
        let p = Pagination::from_query(Some("3"), Some("10"), 10).unwrap();
        assert_eq!(p.offset(), 20);
        assert_eq!(p.meta(), PageMeta { page: 3, size: 10 });
    }

    #[test]
    fn test_from_query_rejects_bad_input() {
        assert!(matches!(
            Pagination::from_query(Some("abc"), None, 10),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Pagination::from_query(Some("-1"), None, 10),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            Pagination::from_query(None, Some("-5"), 10),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            Pagination::from_query(Some("0"), None, 10),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            Pagination::from_query(Some("1.5"), None, 10),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_from_query_huge_values_are_out_of_range() {
        assert!(matches!(
            Pagination::from_query(Some("18446744073709551616"), None, 10),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            Pagination::from_query(None, Some("99999999999999999999999"), 10),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            Pagination::from_query(Some("-99999999999999999999999"), None, 10),
            Err(ValidationError::Negative { .. })
        ));
        assert_eq!(
            Pagination::from_query(Some("9223372036854775808"), Some("0"), 10)
                .unwrap()
                .page(),
            9_223_372_036_854_775_808
        );
    }

    #[test]
    fn test_zero_size_is_allowed() {
        let p = Pagination::from_query(Some("4"), Some("0"), 10).unwrap();
        assert_eq!(p.offset(), 0);
        assert_eq!(p.size(), 0);
    }
}
