//! # Database Pool Management
//!
//! Connection pool creation and configuration for MySQL.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Process Startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(host, database) ← host, port, credentials, timeouts     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect(config).await ← Create pool                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            MySqlPool                     │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Each SqlExecutor::execute call checks out one connection       │
//! │       ▼                                                                 │
//! │  Request 1 ──► Conn1 ──► released                                      │
//! │  Request 2 ──► Conn2 ──► released                                      │
//! │                                                                         │
//! │  Process Shutdown ──► Database::close().await                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, MySql, MySqlPool, Row, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::executor::{QueryOutcome, Record, SqlExecutor, SqlValue, StatementKind};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// Built once at startup and handed to [`Database::connect`]; nothing in
/// this crate reads global state.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("localhost", "catalog")
///     .port(6033)
///     .credentials("catalog_user", "secret")
///     .max_connections(10);
/// ```
#[derive(Clone)]
pub struct DbConfig {
    /// Server host name or address.
    pub host: String,

    /// Server port.
    /// Default: 3306
    pub port: u16,

    /// Login user.
    pub user: String,

    /// Login password.
    pub password: String,

    /// Schema to use.
    pub database: String,

    /// How long to wait for a connection before giving up.
    /// Default: 60 seconds
    pub connect_timeout: Duration,

    /// Maximum number of connections in the pool.
    /// Default: 10
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 0
    pub min_connections: u32,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl DbConfig {
    /// Creates a configuration with default port, credentials and pool sizes.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        DbConfig {
            host: host.into(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: database.into(),
            connect_timeout: Duration::from_secs(60),
            max_connections: 10,
            min_connections: 0,
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the login user and password.
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

// The password stays out of logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

// =============================================================================
// Database
// =============================================================================

/// Pooled MySQL handle implementing [`SqlExecutor`].
///
/// Cloning is cheap: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Creates the connection pool and verifies one connection.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Server unreachable or login refused
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Initializing database connection"
        );

        let pool = Self::pool_options(&config)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        Ok(Database { pool })
    }

    /// Creates the pool without opening any connection yet.
    ///
    /// The first `execute` call pays the connect cost. Useful when the
    /// service should start even if the database is briefly unavailable.
    pub fn connect_lazy(config: DbConfig) -> Self {
        let pool = Self::pool_options(&config).connect_lazy_with(config.connect_options());
        Database { pool }
    }

    fn pool_options(config: &DbConfig) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, every `execute` fails with
    /// `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl SqlExecutor for Database {
    async fn execute(&self, statement: &str, params: Vec<SqlValue>) -> DbResult<QueryOutcome> {
        debug!(sql = %statement, params = ?params, "Executing statement");

        let query = params
            .into_iter()
            .fold(sqlx::query(statement), bind_value);

        match StatementKind::classify(statement) {
            StatementKind::Rows => {
                let rows = query.fetch_all(&self.pool).await?;
                let records = rows
                    .iter()
                    .map(record_from_row)
                    .collect::<DbResult<Vec<_>>>()?;

                debug!(count = records.len(), "Statement returned rows");
                Ok(QueryOutcome::Rows(records))
            }
            StatementKind::Mutation => {
                let result = query.execute(&self.pool).await?;

                debug!(
                    affected_rows = result.rows_affected(),
                    "Statement applied"
                );
                Ok(QueryOutcome::Mutation {
                    affected_rows: result.rows_affected(),
                    last_insert_id: result.last_insert_id(),
                })
            }
        }
    }

    /// Checks that a pooled connection can still run a query.
    async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// Binding & Decoding
// =============================================================================

/// Binds one positional parameter.
fn bind_value(
    query: Query<'_, MySql, MySqlArguments>,
    value: SqlValue,
) -> Query<'_, MySql, MySqlArguments> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Int(v) => query.bind(v),
        SqlValue::UInt(v) => query.bind(v),
        SqlValue::Float(v) => query.bind(v),
        SqlValue::Bool(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
    }
}

/// How a column is read, keyed by the MySQL type name sqlx reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Signed,
    Unsigned,
    Float,
    Text,
}

impl ColumnKind {
    fn of(type_name: &str) -> Self {
        match type_name {
            "BOOLEAN" => ColumnKind::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnKind::Signed,
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => ColumnKind::Unsigned,
            "FLOAT" | "DOUBLE" => ColumnKind::Float,
            // DECIMAL and friends arrive as text on the wire
            _ => ColumnKind::Text,
        }
    }
}

/// Decodes every column of a row by its reported MySQL type.
fn record_from_row(row: &MySqlRow) -> DbResult<Record> {
    let mut record = Record::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let name = column.name();

        let value = if row.try_get_raw(idx)?.is_null() {
            SqlValue::Null
        } else {
            match ColumnKind::of(column.type_info().name()) {
                ColumnKind::Bool => SqlValue::Bool(row.try_get(idx)?),
                ColumnKind::Signed => SqlValue::Int(row.try_get(idx)?),
                ColumnKind::Unsigned => SqlValue::UInt(row.try_get(idx)?),
                ColumnKind::Float => SqlValue::Float(row.try_get(idx)?),
                ColumnKind::Text => SqlValue::Text(
                    row.try_get::<String, _>(idx)
                        .or_else(|_| row.try_get_unchecked::<String, _>(idx))
                        .map_err(|e| DbError::decode(name, e.to_string()))?,
                ),
            }
        };

        record.push(name, value);
    }

    Ok(record)
}

// =============================================================================
// Unit Tests
// =============================================================================
