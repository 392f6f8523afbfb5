//! Customer catalog.

use crate::pipeline::QueryEngine;
use crate::validate::{FieldSchema, FieldType, SanityRule};
use standin_core::FieldValue;
use standin_generator::{EntitySpec, FieldKind};

/// Level distribution observed in the seeded dashboards.
pub const LEVEL_WEIGHTS: [(&str, f64); 3] =
    [("regular", 0.63), ("vip", 0.27), ("premium", 0.10)];

const STATUS_WEIGHTS: [(&str, f64); 3] =
    [("active", 0.70), ("inactive", 0.20), ("suspended", 0.10)];

const NAMES: [&str; 8] = [
    "Acme Robotics",
    "Birchwood Elementary",
    "Cypress Tutoring",
    "Dunmore Family",
    "Ellington Prep",
    "Fern Hollow Co-op",
    "Gridline Makerspace",
    "Hawthorne Institute",
];

const TAGS: [&str; 8] = [
    "education",
    "long-term",
    "referral",
    "enterprise",
    "bulk-order",
    "school",
    "community",
    "new-customer",
];

/// Price of one purchased unit.
const PURCHASE_PRICE: i64 = 2999;
/// Monthly rental price, billed for a fixed three-month term.
const RENTAL_PRICE: i64 = 299;
const RENTAL_MONTHS: i64 = 3;

/// Generation spec for customer accounts.
///
/// `total_spent` is derived from the device counts, so spend and counts
/// can never drift apart.
pub fn spec() -> EntitySpec {
    EntitySpec::new("customers")
        .id(FieldKind::pattern("cus-{index}"))
        .field("name", FieldKind::one_of(NAMES))
        .unique_field("email", FieldKind::pattern("customer{index}@example.com"))
        .field("level", FieldKind::weighted(&LEVEL_WEIGHTS))
        .field("status", FieldKind::weighted(&STATUS_WEIGHTS))
        .field("devices_purchased", FieldKind::int_between(0, 4))
        .field("devices_rented", FieldKind::int_between(0, 2))
        .derived("devices_total", |record| {
            let purchased = count(record, "devices_purchased");
            let rented = count(record, "devices_rented");
            FieldValue::Int(purchased + rented)
        })
        .derived("total_spent", |record| {
            let purchased = count(record, "devices_purchased");
            let rented = count(record, "devices_rented");
            FieldValue::Int(purchased * PURCHASE_PRICE + rented * RENTAL_PRICE * RENTAL_MONTHS)
        })
        .field("customer_value", FieldKind::float_between(0.0, 10.0, 1))
        .field("tags", FieldKind::sample_array(&TAGS, 1, 3))
        .field("registered_at", FieldKind::recent_date(365))
        .invariant("device counts add up", |record| {
            count(record, "devices_total")
                == count(record, "devices_purchased") + count(record, "devices_rented")
        })
        .invariant("spend matches device counts", |record| {
            count(record, "total_spent")
                == count(record, "devices_purchased") * PURCHASE_PRICE
                    + count(record, "devices_rented") * RENTAL_PRICE * RENTAL_MONTHS
        })
}

fn count(record: &standin_core::Record, field: &str) -> i64 {
    record.get(field).and_then(FieldValue::as_i64).unwrap_or(0)
}

/// Query engine for customer lists (name, email and tag search).
pub fn engine() -> QueryEngine {
    QueryEngine::new(&["name", "email", "tags"]).with_default_page_size(10)
}

/// Response contract for one customer record.
pub fn schema() -> Vec<FieldSchema> {
    vec![
        FieldSchema::required("id", FieldType::String),
        FieldSchema::required("name", FieldType::String),
        FieldSchema::required("email", FieldType::String),
        FieldSchema::required("level", FieldType::String).one_of(&[
            "regular", "vip", "premium",
        ]),
        FieldSchema::required("status", FieldType::String).one_of(&[
            "active",
            "inactive",
            "suspended",
        ]),
        FieldSchema::required("devices_purchased", FieldType::Number),
        FieldSchema::required("devices_rented", FieldType::Number),
        FieldSchema::required("devices_total", FieldType::Number),
        FieldSchema::required("total_spent", FieldType::Number),
        FieldSchema::required("customer_value", FieldType::Number),
        FieldSchema::required("tags", FieldType::Array),
        FieldSchema::required("registered_at", FieldType::String),
    ]
}

/// Reasonability rules for customer responses.
pub fn sanity_rules() -> Vec<SanityRule> {
    vec![
        SanityRule::non_negative("total_spent"),
        SanityRule::sum_at_most(&["devices_purchased", "devices_rented"], "devices_total"),
        SanityRule::looks_like_email("email"),
    ]
}
