//! Spec-driven entity generator for the standin mock data engine.
//!
//! This crate provides the `Generator` which produces deterministic mock
//! records from an `EntitySpec` built in code. The generator uses a seeded
//! RNG to ensure reproducibility across runs with the same seed.
//!
//! # Architecture
//!
//! ```text
//! EntitySpec (builder)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │    Generator    │
//! │                 │
//! │  - rng (StdRng) │
//! │  - index        │
//! │  - seen uniques │
//! └────────┬────────┘
//!          │
//!          ▼
//!    Record { index, id, fields }
//! ```
//!
//! # Example
//!
//! ```rust
//! use standin_generator::{EntitySpec, FieldKind, Generator};
//!
//! let spec = EntitySpec::new("devices")
//!     .id(FieldKind::sequential(1))
//!     .unique_field("serial", FieldKind::pattern("SN-{rand:8}"))
//!     .field("status", FieldKind::weighted(&[("online", 0.7), ("offline", 0.3)]))
//!     .field("cpu_load", FieldKind::float_between(0.0, 100.0, 1));
//!
//! let mut generator = Generator::new(spec, 42);
//! let records = generator.generate(10).unwrap();
//! assert_eq!(records.len(), 10);
//! ```
//!
//! # Field kinds
//!
//! The following field kinds are supported:
//!
//! - `Uuid` - Random UUID v4
//! - `Sequential` - Sequential integers from a start value
//! - `Pattern` - Pattern strings with placeholders (`{index}`, `{uuid}`, `{rand:N}`)
//! - `IntBetween` - Random integers in a range
//! - `FloatBetween` - Random floats in a range, rounded
//! - `WeightedChoice` - Label drawn by weight
//! - `RecentDate` - Datetime from the last N days
//! - `Bool` - Boolean with configurable true probability
//! - `OneOf` - Random selection from a list
//! - `SampleArray` - Array of unique samples from a pool
//! - `Static` - The same value every time
//! - `Optional` - Inner kind or null
//! - `Derived` - Computed from earlier fields of the record

pub mod generate;
pub mod random;
pub mod spec;

// Re-exports for convenience
pub use generate::{Generator, GeneratorError};
pub use spec::{EntitySpec, FieldDef, FieldKind, Invariant};
