//! Core types for the standin mock data engine.
//!
//! This crate provides the foundational types shared across the engine:
//!
//! - [`FieldValue`] - Dynamic field value produced by generators
//! - [`Record`] - One generated entity (id plus open fields)
//! - [`Query`] - Declarative filter/sort/paginate request
//! - [`Page`] - Paginated result slice
//! - [`Envelope`] - Uniform `{code, message, data, timestamp}` wrapper
//! - [`ConfigError`] - Defect-class configuration errors
//!
//! # Architecture
//!
//! The standin-core crate sits at the foundation of the engine:
//!
//! ```text
//! standin-core (this crate)
//!    │
//!    ├─── standin-generator  (produces Records from entity specs)
//!    │
//!    └─── standin            (query pipeline, validator, store, facade)
//! ```
//!
//! # Example
//!
//! ```rust
//! use standin_core::{FieldValue, Query, Record, SortOrder};
//!
//! let record = Record::builder(0, FieldValue::from("dev-1"))
//!     .field("status", "online")
//!     .field("cpu_load", 0.35)
//!     .build();
//!
//! assert_eq!(
//!     record.get("status").and_then(FieldValue::as_str),
//!     Some("online")
//! );
//!
//! // Queries are plain descriptions; the pipeline executes them.
//! let query = Query::new()
//!     .filter("status", "online")
//!     .sort("created_at", SortOrder::Desc)
//!     .page(1)
//!     .page_size(10);
//! assert_eq!(query.normalize(20), (1, 10));
//! ```

pub mod envelope;
pub mod error;
pub mod page;
pub mod query;
pub mod record;
pub mod value;

// Re-exports for convenience
pub use envelope::{Envelope, CODE_OK};
pub use error::ConfigError;
pub use page::Page;
pub use query::{Query, RangeFilter, SortOrder};
pub use record::{Record, RecordBuilder};
pub use value::FieldValue;
