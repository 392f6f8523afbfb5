//! Order catalog.

use crate::pipeline::QueryEngine;
use crate::validate::{FieldSchema, FieldType};
use standin_core::FieldValue;
use standin_generator::{EntitySpec, FieldKind};

const TYPE_WEIGHTS: [(&str, f64); 2] = [("sales", 0.70), ("rental", 0.30)];

const STATUSES: [&str; 7] = [
    "pending",
    "confirmed",
    "processing",
    "shipped",
    "delivered",
    "completed",
    "cancelled",
];

/// Catalog prices for the five products the shop sells.
const UNIT_PRICES: [i64; 5] = [2999, 4999, 7999, 599, 199];

/// Generation spec for orders.
///
/// `total_amount` is derived as `quantity * unit_price`.
pub fn spec() -> EntitySpec {
    EntitySpec::new("orders")
        .id(FieldKind::uuid())
        .unique_field("order_number", FieldKind::pattern("ORD-{rand:8}"))
        .field("order_type", FieldKind::weighted(&TYPE_WEIGHTS))
        .field("status", FieldKind::one_of(STATUSES))
        .field("quantity", FieldKind::int_between(1, 5))
        .field("unit_price", FieldKind::one_of(UNIT_PRICES))
        .derived("total_amount", |record| {
            let quantity = record.get("quantity").and_then(FieldValue::as_i64).unwrap_or(0);
            let unit_price = record
                .get("unit_price")
                .and_then(FieldValue::as_i64)
                .unwrap_or(0);
            FieldValue::Int(quantity * unit_price)
        })
        .field("currency", FieldKind::fixed("CNY"))
        .field("created_at", FieldKind::recent_date(90))
        .invariant("amount matches quantity and unit price", |record| {
            let quantity = record.get("quantity").and_then(FieldValue::as_i64).unwrap_or(0);
            let unit_price = record
                .get("unit_price")
                .and_then(FieldValue::as_i64)
                .unwrap_or(0);
            record.get("total_amount").and_then(FieldValue::as_i64)
                == Some(quantity * unit_price)
        })
}

/// Query engine for order lists (order-number search).
pub fn engine() -> QueryEngine {
    QueryEngine::new(&["order_number", "id"]).with_default_page_size(10)
}

/// Response contract for one order record.
pub fn schema() -> Vec<FieldSchema> {
    vec![
        FieldSchema::required("id", FieldType::String),
        FieldSchema::required("order_number", FieldType::String),
        FieldSchema::required("order_type", FieldType::String).one_of(&["sales", "rental"]),
        FieldSchema::required("status", FieldType::String).one_of(&STATUSES),
        FieldSchema::required("quantity", FieldType::Number),
        FieldSchema::required("unit_price", FieldType::Number),
        FieldSchema::required("total_amount", FieldType::Number),
        FieldSchema::required("currency", FieldType::String).one_of(&["CNY"]),
        FieldSchema::required("created_at", FieldType::String),
    ]
}
