//! Plain-text rendering of validation outcomes.

use super::ValidationResult;

/// Render a deterministic multi-section report over validation results.
///
/// One section per result (PASS/FAIL, errors, warnings, field-mapping
/// ratio) followed by an aggregate summary. The success rate carries one
/// decimal place, except for an empty input which renders as `0%`.
pub fn render_report(results: &[ValidationResult]) -> String {
    let mut report = String::from("API response validation report\n");
    report.push_str(&"=".repeat(50));
    report.push('\n');

    let mut total_errors = 0;
    let mut total_warnings = 0;
    let mut total_fields = 0;

    for (i, result) in results.iter().enumerate() {
        let status = if result.is_valid { "PASS" } else { "FAIL" };
        report.push_str(&format!("\ntest {}: {status}\n", i + 1));

        if !result.errors.is_empty() {
            report.push_str(&format!("errors ({}):\n", result.errors.len()));
            for error in &result.errors {
                report.push_str(&format!("  - {error}\n"));
            }
            total_errors += result.errors.len();
        }

        if !result.warnings.is_empty() {
            report.push_str(&format!("warnings ({}):\n", result.warnings.len()));
            for warning in &result.warnings {
                report.push_str(&format!("  - {warning}\n"));
            }
            total_warnings += result.warnings.len();
        }

        if !result.field_mappings.is_empty() {
            let matched = result.field_mappings.iter().filter(|m| m.is_match).count();
            report.push_str(&format!(
                "field mappings: {matched}/{} matched\n",
                result.field_mappings.len()
            ));
            for mapping in &result.field_mappings {
                let status = if mapping.is_match { "[ok]  " } else { "[FAIL]" };
                report.push_str(&format!(
                    "  {status} {}: {} -> {}\n",
                    mapping.field, mapping.expected, mapping.actual
                ));
            }
            total_fields += result.field_mappings.len();
        }
    }

    let passed = results.iter().filter(|r| r.is_valid).count();
    report.push_str("\nsummary\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    report.push_str(&format!("total tests: {}\n", results.len()));
    report.push_str(&format!("passed: {passed}\n"));
    report.push_str(&format!("failed: {}\n", results.len() - passed));
    report.push_str(&format!("errors: {total_errors}\n"));
    report.push_str(&format!("warnings: {total_warnings}\n"));
    report.push_str(&format!("fields checked: {total_fields}\n"));

    let success_rate = if results.is_empty() {
        "0".to_string()
    } else {
        format!("{:.1}", passed as f64 / results.len() as f64 * 100.0)
    };
    report.push_str(&format!("success rate: {success_rate}%\n"));

    report
}
