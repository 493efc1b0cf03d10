//! Argument values and their classification.
//!
//! A [`Value`] is what the caller hands to the binder. Before coercion every
//! value is [`classify`]-ed: text that spells an integer or a decimal number is
//! treated as numeric rather than as an opaque string, so `"123"` satisfies an
//! integer placeholder even in strict mode.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Optionally-signed run of decimal digits.
static INTEGER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"));

/// Optionally-signed decimal with a mandatory point and at least one digit.
static FLOAT_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+)$").expect("float pattern is valid")
});

/// A single argument bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Ordered array, bound with `?a`.
    List(Vec<Value>),
    /// Associative array in insertion order, bound with `?A`.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Build an associative array, keeping the iteration order of `entries`.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Category of this value after numeric-text reclassification.
    pub fn kind(&self) -> ValueKind {
        classify(self).kind()
    }
}

/// Value category as reported in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::List => "array",
            Self::Map => "associative array",
        };
        f.write_str(name)
    }
}

/// A borrowed view of a [`Value`] with numeric text split out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Text matching the integer pattern, e.g. `"-42"`.
    IntText(&'a str),
    /// Text matching the float pattern, e.g. `"3.5"` or `".5"`.
    FloatText(&'a str),
    Text(&'a str),
    List(&'a [Value]),
    Map(&'a [(String, Value)]),
}

impl Classified<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Int(_) | Self::IntText(_) => ValueKind::Integer,
            Self::Float(_) | Self::FloatText(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::String,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }
}

/// Categorize a value, reclassifying numeric-looking text.
pub fn classify(value: &Value) -> Classified<'_> {
    match value {
        Value::Null => Classified::Null,
        Value::Bool(b) => Classified::Bool(*b),
        Value::Int(n) => Classified::Int(*n),
        Value::Float(f) => Classified::Float(*f),
        Value::Text(s) if INTEGER_TEXT.is_match(s) => Classified::IntText(s),
        Value::Text(s) if FLOAT_TEXT.is_match(s) => Classified::FloatText(s),
        Value::Text(s) => Classified::Text(s),
        Value::List(items) => Classified::List(items),
        Value::Map(entries) => Classified::Map(entries),
    }
}

// -------------------------------------------------------
// Conversions from Rust values
// -------------------------------------------------------

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        Self::Int(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Self::Int(n),
            // Beyond i64 the exact digits are kept as integer text.
            Err(_) => Self::Text(n.to_string()),
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::from(n as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Fixed-size key/value arrays become associative arrays.
impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Value {
    fn from(entries: [(K, V); N]) -> Self {
        Self::map(entries)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::from(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
