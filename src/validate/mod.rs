//! Response shape validation.
//!
//! Checks JSON responses against declarative [`FieldSchema`] contracts.
//! Validation never fails as an operation: every problem found lands in
//! a [`ValidationResult`] as an error or a warning, and only errors make
//! the result invalid. Optional-field mismatches, nested findings and
//! sanity-rule violations are warnings.

mod report;
mod schema;

pub use report::render_report;
pub use schema::{envelope_schema, FieldSchema, FieldType};

use schema::type_name;
use serde::Serialize;
use serde_json::{Map, Value};

/// One checked field: what was expected against what was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Field name, suffixed with ` (optional)` for optional fields
    pub field: String,
    /// Expected type name
    pub expected: String,
    /// Actual type name, `"missing"` or `"null"` when absent
    pub actual: String,
    /// Whether the field satisfied its contract
    pub is_match: bool,
}

/// Outcome of validating one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no errors were found (warnings do not count)
    pub is_valid: bool,
    /// Contract violations
    pub errors: Vec<String>,
    /// Suspicious but tolerated findings
    pub warnings: Vec<String>,
    /// Per-field expected/actual pairs for the top-level schema
    pub field_mappings: Vec<FieldMapping>,
}

/// Reasonability check over an already shape-valid response.
///
/// Violations are warnings, never errors: the data is well-formed, it
/// just looks wrong.
#[derive(Debug, Clone)]
pub enum SanityRule {
    /// Numeric field must not be negative
    NonNegative(String),
    /// The sum of `parts` must not exceed the `total` field
    SumAtMost { parts: Vec<String>, total: String },
    /// String field should have an email shape
    LooksLikeEmail(String),
}

impl SanityRule {
    pub fn non_negative(field: impl Into<String>) -> Self {
        Self::NonNegative(field.into())
    }

    pub fn sum_at_most(parts: &[&str], total: impl Into<String>) -> Self {
        Self::SumAtMost {
            parts: parts.iter().map(|p| p.to_string()).collect(),
            total: total.into(),
        }
    }

    pub fn looks_like_email(field: impl Into<String>) -> Self {
        Self::LooksLikeEmail(field.into())
    }
}

/// Validate `value` against `schema`.
pub fn validate(value: &Value, schema: &[FieldSchema]) -> ValidationResult {
    validate_with_rules(value, schema, &[])
}

/// Validate `value` against `schema` plus reasonability rules.
pub fn validate_with_rules(
    value: &Value,
    schema: &[FieldSchema],
    rules: &[SanityRule],
) -> ValidationResult {
    let mut result = ValidationResult {
        is_valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
        field_mappings: Vec::new(),
    };

    match value.as_object() {
        Some(object) => {
            check_object(object, schema, "", false, &mut result);
            for rule in rules {
                apply_rule(object, rule, &mut result);
            }
        }
        None => result
            .errors
            .push(format!("expected an object, got {}", type_name(value))),
    }

    result.is_valid = result.errors.is_empty();
    tracing::debug!(
        valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated response shape"
    );
    result
}

fn check_object(
    object: &Map<String, Value>,
    schema: &[FieldSchema],
    prefix: &str,
    demoted: bool,
    result: &mut ValidationResult,
) {
    for field in schema {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };
        check_field(field, object.get(&field.name), &path, demoted, result);
    }
}

fn check_field(
    field: &FieldSchema,
    value: Option<&Value>,
    path: &str,
    demoted: bool,
    result: &mut ValidationResult,
) {
    let expected = field.expected.to_string();
    // Findings become warnings inside nested objects and for optional
    // fields; only required top-level problems are errors.
    let as_error = field.required && !demoted;

    let missing = match value {
        None => true,
        Some(Value::Null) => !field.nullable,
        Some(_) => false,
    };
    if missing {
        if field.required {
            let actual = if value.is_none() { "missing" } else { "null" };
            record_finding(result, as_error, format!("missing required field: {path}"));
            record_mapping(result, demoted, path.to_string(), expected, actual, false);
        }
        return;
    }

    let Some(actual_value) = value else {
        return;
    };

    let label = if field.required {
        path.to_string()
    } else {
        format!("{path} (optional)")
    };

    if actual_value.is_null() {
        record_mapping(result, demoted, label, expected, "null", true);
        return;
    }

    let actual = type_name(actual_value);
    let matched = field.expected.matches(actual_value);
    record_mapping(result, demoted, label, expected, actual, matched);
    if !matched {
        record_finding(
            result,
            as_error,
            format!("type mismatch: {path} expected {} got {actual}", field.expected),
        );
        return;
    }

    if let Value::String(text) = actual_value {
        if !field.enum_values.is_empty() && !field.enum_values.iter().any(|v| v == text) {
            record_finding(result, as_error, format!("invalid enum value: {text}"));
        }
    }

    if let Value::Object(inner) = actual_value {
        if !field.nested.is_empty() {
            check_object(inner, &field.nested, path, true, result);
        }
    }
}

fn record_finding(result: &mut ValidationResult, as_error: bool, message: String) {
    if as_error {
        result.errors.push(message);
    } else {
        result.warnings.push(message);
    }
}

// Mappings describe the top-level contract only; nested checks
// contribute findings, not mappings.
fn record_mapping(
    result: &mut ValidationResult,
    demoted: bool,
    field: String,
    expected: String,
    actual: &str,
    is_match: bool,
) {
    if demoted {
        return;
    }
    result.field_mappings.push(FieldMapping {
        field,
        expected,
        actual: actual.to_string(),
        is_match,
    });
}

fn apply_rule(object: &Map<String, Value>, rule: &SanityRule, result: &mut ValidationResult) {
    match rule {
        SanityRule::NonNegative(field) => {
            if let Some(number) = object.get(field).and_then(Value::as_f64) {
                if number < 0.0 {
                    result
                        .warnings
                        .push(format!("{field} should not be negative, got {number}"));
                }
            }
        }
        SanityRule::SumAtMost { parts, total } => {
            let values: Vec<f64> = parts
                .iter()
                .filter_map(|part| object.get(part).and_then(Value::as_f64))
                .collect();
            let Some(limit) = object.get(total).and_then(Value::as_f64) else {
                return;
            };
            if values.len() == parts.len() {
                let sum: f64 = values.iter().sum();
                if sum > limit {
                    result.warnings.push(format!(
                        "sum of {} ({sum}) exceeds {total} ({limit})",
                        parts.join("+")
                    ));
                }
            }
        }
        SanityRule::LooksLikeEmail(field) => {
            if let Some(text) = object.get(field).and_then(Value::as_str) {
                if !looks_like_email(text) {
                    result
                        .warnings
                        .push(format!("{field} does not look like an email: {text}"));
                }
            }
        }
    }
}

/// Rough email shape: one `@`, no whitespace, a dot inside the domain.
fn looks_like_email(text: &str) -> bool {
    if text.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.find('.') {
        Some(i) => i > 0 && i + 1 < domain.len(),
        None => false,
    }
}
