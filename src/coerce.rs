//! Primitive type coercion.
//!
//! Converts raw textual values (path captures, query parameters) and
//! pre-typed JSON values (body fields) into a declared primitive type,
//! reporting failure with a fixed, client-facing message.
//!
//! # Policy
//!
//! The coercion rules are fixed and intentionally strict:
//!
//! - No whitespace trimming. Leading, trailing, or embedded whitespace
//!   rejects the value.
//! - Integers are `i64`; out-of-range values reject rather than saturate.
//! - Floats must parse to a finite `f64` (`inf`/`NaN` spellings reject).
//! - Booleans accept exactly `true` and `false`, case-insensitive.
//! - A JSON value that already has the target type passes through untouched;
//!   a JSON string falls back to the textual rules above. Any other JSON
//!   type mismatch rejects.

use serde_json::Value;
use std::fmt;

/// The primitive types a scalar parameter or schema field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Float => "float",
            PrimitiveType::Boolean => "boolean",
        };
        write!(f, "{s}")
    }
}

/// A failed coercion. The message text is part of the wire contract and
/// must not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    pub message: String,
}

impl CoercionError {
    /// The fixed failure message for a target type.
    #[must_use]
    pub fn for_type(target: PrimitiveType) -> Self {
        let message = match target {
            PrimitiveType::String => "Not a valid string.",
            PrimitiveType::Integer => "Not a valid integer.",
            PrimitiveType::Float => "Not a valid number.",
            PrimitiveType::Boolean => "Not a valid boolean.",
        };
        CoercionError {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CoercionError {}

/// Coerce a raw string into the target primitive type.
///
/// `String` is the identity conversion; the numeric and boolean rules are
/// documented at module level.
pub fn coerce(raw: &str, target: PrimitiveType) -> Result<Value, CoercionError> {
    match target {
        PrimitiveType::String => Ok(Value::String(raw.to_string())),
        PrimitiveType::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| CoercionError::for_type(target)),
        PrimitiveType::Float => raw
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| CoercionError::for_type(target)),
        PrimitiveType::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(CoercionError::for_type(target))
            }
        }
    }
}

/// Coerce a JSON value into the target primitive type.
///
/// This is the entry point body fields go through: a value that already has
/// the target type is returned as-is (no coercion performed for pre-typed
/// values), a JSON string is coerced with [`coerce`], and anything else is
/// a type mismatch. Integers are accepted where a float is declared.
pub fn coerce_value(value: &Value, target: PrimitiveType) -> Result<Value, CoercionError> {
    match (target, value) {
        (PrimitiveType::String, Value::String(_)) => Ok(value.clone()),
        (PrimitiveType::Integer, Value::Number(n)) if n.is_i64() => Ok(value.clone()),
        (PrimitiveType::Float, Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| CoercionError::for_type(target)),
        (PrimitiveType::Boolean, Value::Bool(_)) => Ok(value.clone()),
        (_, Value::String(s)) => coerce(s, target),
        _ => Err(CoercionError::for_type(target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_round_trip() {
        for v in [0i64, 1, -1, 42, i64::MAX, i64::MIN] {
            assert_eq!(coerce(&v.to_string(), PrimitiveType::Integer), Ok(json!(v)));
        }
    }

    #[test]
    fn test_integer_rejects_whitespace_and_overflow() {
        for raw in [" 1", "1 ", "1 2", "", "abc", "1.0", "9223372036854775808"] {
            let err = coerce(raw, PrimitiveType::Integer).unwrap_err();
            assert_eq!(err.message, "Not a valid integer.");
        }
    }

    #[test]
    fn test_float_rejects_non_finite() {
        assert!(coerce("1.5", PrimitiveType::Float).is_ok());
        for raw in ["inf", "NaN", "-inf", "", "x"] {
            let err = coerce(raw, PrimitiveType::Float).unwrap_err();
            assert_eq!(err.message, "Not a valid number.");
        }
    }

    #[test]
    fn test_boolean_literals() {
        assert_eq!(coerce("true", PrimitiveType::Boolean), Ok(json!(true)));
        assert_eq!(coerce("FALSE", PrimitiveType::Boolean), Ok(json!(false)));
        assert!(coerce("1", PrimitiveType::Boolean).is_err());
        assert!(coerce("yes", PrimitiveType::Boolean).is_err());
    }

    #[test]
    fn test_pre_typed_values_pass_through() {
        assert_eq!(coerce_value(&json!(3), PrimitiveType::Integer), Ok(json!(3)));
        assert_eq!(
            coerce_value(&json!(true), PrimitiveType::Boolean),
            Ok(json!(true))
        );
        assert_eq!(
            coerce_value(&json!("x"), PrimitiveType::String),
            Ok(json!("x"))
        );
        // integers are acceptable where a float is declared
        assert_eq!(
            coerce_value(&json!(2), PrimitiveType::Float),
            Ok(json!(2.0))
        );
    }

    #[test]
    fn test_string_typed_json_coerces() {
        assert_eq!(
            coerce_value(&json!("3"), PrimitiveType::Integer),
            Ok(json!(3))
        );
        assert_eq!(
            coerce_value(&json!("true"), PrimitiveType::Boolean),
            Ok(json!(true))
        );
    }

    #[test]
    fn test_type_mismatch_rejects() {
        assert!(coerce_value(&json!(1.5), PrimitiveType::Integer).is_err());
        assert!(coerce_value(&json!([1]), PrimitiveType::Integer).is_err());
        assert!(coerce_value(&json!(3), PrimitiveType::String).is_err());
        assert!(coerce_value(&json!(0), PrimitiveType::Boolean).is_err());
    }
}
