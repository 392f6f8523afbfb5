//! Standin Library
//!
//! An in-memory mock data and query engine for driving dashboards and
//! tests without a real backend. Collections of records are generated
//! deterministically from declarative specs, queried through a
//! filter/sort/paginate pipeline, wrapped in uniform response envelopes
//! and checked against field-schema contracts.
//!
//! # Features
//!
//! - Deterministic generation: the same spec and seed produce the same batch
//! - Query pipeline: keyword, exact and range filters, stable sort, pagination
//! - Async facade: latency-simulating CRUD over a shared in-memory store
//! - Shape validation: schema contracts with errors, warnings and text reports
//!
//! # Crates
//!
//! The engine is split across three crates:
//!
//! - `standin-core` - Records, queries, pages and envelopes
//! - `standin-generator` - Spec-driven deterministic record generation
//! - `standin` - Query pipeline, validator, store, catalogs and the facade
//!
//! # Example
//!
//! ```rust
//! use standin::catalog::devices;
//! use standin::{Generator, Query, SortOrder};
//!
//! let mut generator = Generator::new(devices::spec(), 42);
//! let records = generator.generate(50).unwrap();
//!
//! let page = devices::engine().run(
//!     &records,
//!     &Query::new()
//!         .filter("status", "online")
//!         .sort("created_at", SortOrder::Desc)
//!         .page(1)
//!         .page_size(10),
//! );
//! assert!(page.list.len() <= 10);
//! assert!(page.total >= page.list.len() as u64);
//! ```

pub mod api;
pub mod catalog;
pub mod pipeline;
pub mod store;
pub mod validate;

// Re-export the foundation crates' types for convenience
pub use standin_core::{
    ConfigError, Envelope, FieldValue, Page, Query, Record, RecordBuilder, SortOrder, CODE_OK,
};
pub use standin_generator::{
    EntitySpec, FieldDef, FieldKind, Generator, GeneratorError, Invariant,
};
