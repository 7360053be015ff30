//! Service layer.
//!
//! Services own the SQL; handlers only translate HTTP to service calls.

pub mod product_service;

pub use product_service::{
    ItemEnvelope, ListEnvelope, Lookup, MessageEnvelope, ProductService, ServiceOptions,
};
