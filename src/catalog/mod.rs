//! Ready-made entity catalogs.
//!
//! Declarative specs for the collections the dashboards work with,
//! each paired with its query engine (keyword fields, default page
//! size) and the field-schema contract its responses must satisfy.

pub mod customers;
pub mod devices;
pub mod orders;
