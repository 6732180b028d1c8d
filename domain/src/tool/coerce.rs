//! Inbound argument coercion
//!
//! Model-supplied call arguments arrive as JSON strings or primitives and
//! must match the tool's declared parameter types. Coercion is deliberately
//! permissive: on any conversion failure the raw value is returned unchanged
//! and the event is logged, so a slightly malformed call is still attempted.
//! The invocation boundary handles whatever failure follows.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use super::entities::ParamType;

/// Textual form accepted for [`ParamType::Date`] arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert a raw call argument to the declared parameter type.
///
/// Supported targets: integer, float, boolean, and calendar date
/// (`YYYY-MM-DD`). Any other declared type passes through untouched, as does
/// any value that fails to convert.
pub fn coerce_argument(raw: Value, declared: &ParamType) -> Value {
    match declared {
        ParamType::Integer => coerce_integer(raw),
        ParamType::Float => coerce_float(raw),
        ParamType::Boolean => coerce_boolean(raw),
        ParamType::Date => coerce_date(raw),
        _ => raw,
    }
}

fn coerce_integer(raw: Value) -> Value {
    match &raw {
        Value::Number(n) if n.is_i64() || n.is_u64() => raw,
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => passthrough(raw, "integer"),
        },
        _ => passthrough(raw, "integer"),
    }
}

fn coerce_float(raw: Value) -> Value {
    match &raw {
        Value::Number(_) => raw,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or_else(|| passthrough(raw, "float")),
            Err(_) => passthrough(raw, "float"),
        },
        _ => passthrough(raw, "float"),
    }
}

fn coerce_boolean(raw: Value) -> Value {
    match &raw {
        Value::Bool(_) => raw,
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Value::Bool(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Value::Bool(false),
        _ => passthrough(raw, "boolean"),
    }
}

fn coerce_date(raw: Value) -> Value {
    match &raw {
        Value::String(s) => match NaiveDate::parse_from_str(s.trim(), DATE_FORMAT) {
            Ok(date) => Value::String(date.format(DATE_FORMAT).to_string()),
            Err(_) => passthrough(raw, "date"),
        },
        _ => passthrough(raw, "date"),
    }
}

fn passthrough(raw: Value, target: &str) -> Value {
    debug!(%raw, target, "argument could not be coerced, passing raw value through");
    raw
}
