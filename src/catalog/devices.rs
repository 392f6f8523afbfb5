//! Device fleet catalog.

use crate::pipeline::QueryEngine;
use crate::validate::{FieldSchema, FieldType};
use standin_core::FieldValue;
use standin_generator::{EntitySpec, FieldKind};

/// Status distribution of a realistic fleet.
pub const STATUS_WEIGHTS: [(&str, f64); 4] = [
    ("online", 0.60),
    ("offline", 0.25),
    ("error", 0.10),
    ("maintenance", 0.05),
];

const MODELS: [&str; 3] = ["YX-EDU-2024", "YX-HOME-2024", "YX-PRO-2024"];

const FIRMWARE_VERSIONS: [&str; 5] = ["1.4.2", "1.6.0", "2.0.3", "2.1.7", "3.0.12"];

const CUSTOMER_NAMES: [&str; 8] = [
    "Acme Robotics",
    "Borealis Labs",
    "Cedar Valley School",
    "Delta Training Center",
    "Evergreen Academy",
    "Foxglove Studio",
    "Granite Community College",
    "Harbor Learning Hub",
];

const LOCATIONS: [&str; 6] = [
    "Classroom A",
    "Classroom B",
    "Library",
    "Lab 1",
    "Lab 2",
    "Front Office",
];

/// Generation spec for one fleet of practice robots.
///
/// `avg_session_minutes` uses integer division, so
/// `avg * sessions <= total_runtime_minutes` always holds.
pub fn spec() -> EntitySpec {
    EntitySpec::new("devices")
        .id(FieldKind::pattern("dev-{index}"))
        .unique_field("serial_number", FieldKind::pattern("EDU-{rand:6}"))
        .field("model", FieldKind::one_of(MODELS))
        .field("status", FieldKind::weighted(&STATUS_WEIGHTS))
        .field("firmware", FieldKind::one_of(FIRMWARE_VERSIONS))
        .field("customer_name", FieldKind::one_of(CUSTOMER_NAMES))
        .field("sessions", FieldKind::int_between(0, 400))
        .field("total_runtime_minutes", FieldKind::int_between(0, 24_000))
        .derived("avg_session_minutes", |record| {
            let sessions = record.get("sessions").and_then(FieldValue::as_i64).unwrap_or(0);
            let runtime = record
                .get("total_runtime_minutes")
                .and_then(FieldValue::as_i64)
                .unwrap_or(0);
            if sessions > 0 {
                FieldValue::Int(runtime / sessions)
            } else {
                FieldValue::Int(0)
            }
        })
        .field("created_at", FieldKind::recent_date(365))
        .field("location", FieldKind::optional(0.7, FieldKind::one_of(LOCATIONS)))
        .invariant("average session fits total runtime", |record| {
            let sessions = record.get("sessions").and_then(FieldValue::as_i64).unwrap_or(0);
            let runtime = record
                .get("total_runtime_minutes")
                .and_then(FieldValue::as_i64)
                .unwrap_or(0);
            let avg = record
                .get("avg_session_minutes")
                .and_then(FieldValue::as_i64)
                .unwrap_or(0);
            avg * sessions <= runtime
        })
        .invariant("usage counters non-negative", |record| {
            ["sessions", "total_runtime_minutes", "avg_session_minutes"]
                .into_iter()
                .all(|field| {
                    record
                        .get(field)
                        .and_then(FieldValue::as_i64)
                        .is_some_and(|n| n >= 0)
                })
        })
}

/// Query engine for device lists (serial, customer and model search).
pub fn engine() -> QueryEngine {
    QueryEngine::new(&["serial_number", "customer_name", "model"])
}

/// Response contract for one device record.
pub fn schema() -> Vec<FieldSchema> {
    vec![
        FieldSchema::required("id", FieldType::String),
        FieldSchema::required("serial_number", FieldType::String),
        FieldSchema::required("model", FieldType::String).one_of(&MODELS),
        FieldSchema::required("status", FieldType::String).one_of(&[
            "online",
            "offline",
            "error",
            "maintenance",
        ]),
        FieldSchema::required("firmware", FieldType::String),
        FieldSchema::required("customer_name", FieldType::String),
        FieldSchema::required("sessions", FieldType::Number),
        FieldSchema::required("total_runtime_minutes", FieldType::Number),
        FieldSchema::required("avg_session_minutes", FieldType::Number),
        FieldSchema::required("created_at", FieldType::String),
        FieldSchema::optional("location", FieldType::String),
    ]
}
