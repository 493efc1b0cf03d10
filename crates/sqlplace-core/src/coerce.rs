//! Strict/Transform coercion of scalar values.
//!
//! | Target | Accepted natively | Transform also accepts |
//! |---|---|---|
//! | Int | integer, integer text | float (truncated), float text, null → `0`, bool → `0`/`1` |
//! | Float | float, float text | integer, integer text, null → `0`, bool → `0`/`1` |
//! | String | any text | bool → `"1"`/`"0"`, integer, float, null → `""` |
//! | Null | null | anything, always `NULL` |
//!
//! Arrays are never accepted by a scalar target. The returned text is not yet
//! escaped; string results still go through the escaper.

use crate::error::BindError;
use crate::mode::Mode;
use crate::scanner::PlaceholderKind;
use crate::value::{classify, Classified, Value, ValueKind};

/// Scalar target of a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Int,
    Float,
    String,
    Null,
}

/// Why a value was refused by [`coerce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Mismatch(ValueKind),
    NonFinite,
}

impl Rejection {
    pub(crate) fn into_error(self, expected: PlaceholderKind, template: &str) -> BindError {
        match self {
            Self::Mismatch(actual) => BindError::TypeMismatch {
                expected,
                actual,
                template: template.to_string(),
            },
            Self::NonFinite => BindError::NonFiniteFloat {
                template: template.to_string(),
            },
        }
    }
}

/// Convert `value` to the literal text for `target` under `mode`.
pub fn coerce(target: Target, value: &Value, mode: Mode) -> Result<String, Rejection> {
    use Classified as C;

    let classified = classify(value);
    match (target, classified, mode) {
        (Target::Int, C::Int(n), _) => Ok(n.to_string()),
        (Target::Int, C::IntText(text), _) => Ok(text.to_string()),
        (Target::Int, C::Float(f), Mode::Transform) => Ok(truncate(f).to_string()),
        (Target::Int, C::FloatText(text), Mode::Transform) => Ok(truncate(parse_float(text)).to_string()),
        (Target::Int, C::Null, Mode::Transform) => Ok("0".into()),
        (Target::Int, C::Bool(b), Mode::Transform) => Ok(i64::from(b).to_string()),
        (Target::Int, other, _) => Err(Rejection::Mismatch(other.kind())),

        (Target::Float, C::Float(f), _) => finite(f),
        (Target::Float, C::FloatText(text), _) => Ok(text.to_string()),
        (Target::Float, C::Int(n), Mode::Transform) => finite(n as f64),
        (Target::Float, C::IntText(text), Mode::Transform) => finite(parse_float(text)),
        (Target::Float, C::Null, Mode::Transform) => Ok("0".into()),
        (Target::Float, C::Bool(b), Mode::Transform) => Ok(i64::from(b).to_string()),
        (Target::Float, other, _) => Err(Rejection::Mismatch(other.kind())),

        (Target::String, C::Text(text) | C::IntText(text) | C::FloatText(text), _) => {
            Ok(text.to_string())
        }
        (Target::String, C::Bool(b), Mode::Transform) => Ok(i64::from(b).to_string()),
        (Target::String, C::Int(n), Mode::Transform) => Ok(n.to_string()),
        (Target::String, C::Float(f), Mode::Transform) => Ok(f.to_string()),
        (Target::String, C::Null, Mode::Transform) => Ok(String::new()),
        (Target::String, other, _) => Err(Rejection::Mismatch(other.kind())),

        (Target::Null, C::Null, _) | (Target::Null, _, Mode::Transform) => Ok("NULL".into()),
        (Target::Null, other, Mode::Strict) => Err(Rejection::Mismatch(other.kind())),
    }
}

/// Truncate toward zero; NaN becomes 0 and infinities saturate.
fn truncate(f: f64) -> i64 {
    f as i64
}

/// Parse text already matched by the numeric patterns.
fn parse_float(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}

fn finite(f: f64) -> Result<String, Rejection> {
    if f.is_finite() {
        Ok(f.to_string())
    } else {
        Err(Rejection::NonFinite)
    }
}
