//! Report schema: generated from the output types with schemars and checked
//! with jsonschema before a report is written.

use std::sync::LazyLock;

use jsonschema::Validator;
use schemars::{schema_for, Schema};
use serde_json::Value;

use super::types::SimulationOutput;

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| schema_for!(SimulationOutput));

static VALIDATOR: LazyLock<Result<Validator, String>> = LazyLock::new(|| {
    jsonschema::validator_for(SCHEMA.as_value())
        .map_err(|e| format!("report schema does not compile: {}", e))
});

/// The report schema as pretty-printed JSON.
pub fn schema_json_pretty() -> String {
    format!("{:#}", SCHEMA.as_value())
}

/// Human-readable name for the part of `report` at JSON pointer `path`.
///
/// Commands are named by position, op and time; panels by category.
fn describe_location(report: &Value, path: &str) -> String {
    let mut parts = path.trim_start_matches('/').splitn(3, '/');
    let section = parts.next().unwrap_or("");
    let index = parts.next();
    let rest = parts.next().map(|r| format!(" field {}", r)).unwrap_or_default();

    match (section, index) {
        ("commands", Some(i)) => {
            let op = report
                .pointer(&format!("/commands/{}/command/op", i))
                .and_then(Value::as_str)
                .unwrap_or("?");
            let at = report
                .pointer(&format!("/commands/{}/at_ms", i))
                .map(Value::to_string)
                .unwrap_or_else(|| "?".to_string());
            format!("command #{} ({} at {} ms){}", i, op, at, rest)
        }
        ("panels", Some(i)) => {
            let category = report
                .pointer(&format!("/panels/{}/category", i))
                .and_then(Value::as_str)
                .unwrap_or("?");
            format!("panel '{}'{}", category, rest)
        }
        ("", _) => "report".to_string(),
        _ => format!("report field {}", path.trim_start_matches('/')),
    }
}

/// Check a serialized report against the schema. The error lists every
/// violation together with the command or panel it belongs to.
pub fn validate(report: &Value) -> Result<(), String> {
    let validator = VALIDATOR.as_ref().map_err(Clone::clone)?;
    let problems: Vec<String> = validator
        .iter_errors(report)
        .map(|e| format!("  {}: {}", describe_location(report, &e.instance_path.to_string()), e))
        .collect();

    if problems.is_empty() {
        return Ok(());
    }
    Err(format!(
        "simulation report has {} schema violation(s):\n{}",
        problems.len(),
        problems.join("\n")
    ))
}

/// Validation always runs in debug builds; release builds opt in with
/// `WAFFLE_VALIDATE_OUTPUT=1`.
pub fn should_validate() -> bool {
    cfg!(debug_assertions)
        || std::env::var("WAFFLE_VALIDATE_OUTPUT")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
