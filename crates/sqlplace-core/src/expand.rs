//! Array and tuple expansion for `?a` and `?A` placeholders.
//!
//! - `?ai`, `?as`, `?ad` bind every element with one scalar kind:
//!   `IN(?ai)` with `[1, 2]` gives `IN(1, 2)`, `?as` double-quotes each string.
//! - `?Ai`, `?As`, `?Ad` render `` `key` = "value" `` pairs for `SET` clauses.
//! - `?a[..]` and `?A[..]` bind element *n* through sub-template *n*, each in its
//!   own binding call.

use crate::binder::Binder;
use crate::coerce::{coerce, Target};
use crate::error::{BindError, Result};
use crate::escape::{quote_identifier, EscapeString};
use crate::scanner::{ArraySuffix, ElementType, PlaceholderKind};
use crate::value::{Value, ValueKind};

/// Elements of an array argument, keyed when it came from an associative array.
pub(crate) struct ArrayItems(Vec<(Option<String>, Value)>);

impl ArrayItems {
    /// Take the elements out of an array value; scalars are never wrapped.
    pub(crate) fn from_value(value: Value, template: &str) -> Result<Self> {
        match value {
            Value::List(items) => Ok(Self(items.into_iter().map(|v| (None, v)).collect())),
            Value::Map(entries) => Ok(Self(
                entries.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            )),
            scalar => Err(BindError::NotAnArray {
                actual: scalar.kind(),
                template: template.to_string(),
            }),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Render an array placeholder of `kind` with its parsed `suffix`.
pub(crate) fn expand<E: EscapeString>(
    binder: &Binder<E>,
    kind: PlaceholderKind,
    items: ArrayItems,
    suffix: ArraySuffix,
    template: &str,
) -> Result<String> {
    let keyed = kind == PlaceholderKind::ArrayMap;
    match suffix {
        ArraySuffix::Uniform(element) => expand_uniform(binder, keyed, items, element, template),
        ArraySuffix::Bracket(subs) => expand_bracket(binder, keyed, items, &subs, template),
    }
}

fn expand_uniform<E: EscapeString>(
    binder: &Binder<E>,
    keyed: bool,
    items: ArrayItems,
    element: ElementType,
    template: &str,
) -> Result<String> {
    if items.is_empty() {
        return Ok("NULL".into());
    }

    let mut parts = Vec::with_capacity(items.len());
    for (key, value) in items.0 {
        let literal = match element {
            ElementType::Int => coerce(Target::Int, &value, binder.mode()),
            ElementType::Float => coerce(Target::Float, &value, binder.mode()),
            ElementType::String => coerce(Target::String, &value, binder.mode())
                .map(|s| binder.escaper().escape_string(&s)),
        }
        .map_err(|r| r.into_error(element.kind(), template))?;

        if keyed {
            let column = quote_key(key, template)?;
            parts.push(format!("{column} = \"{literal}\""));
        } else if element == ElementType::String {
            parts.push(format!("\"{literal}\""));
        } else {
            parts.push(literal);
        }
    }
    Ok(parts.join(", "))
}

fn expand_bracket<E: EscapeString>(
    binder: &Binder<E>,
    keyed: bool,
    items: ArrayItems,
    subs: &[String],
    template: &str,
) -> Result<String> {
    if items.len() != subs.len() {
        return Err(BindError::ArrayArityMismatch {
            expected: subs.len(),
            actual: items.len(),
            template: template.to_string(),
        });
    }

    let mut parts = Vec::with_capacity(subs.len());
    for (sub, (key, value)) in subs.iter().zip(items.0) {
        let bound = binder.bind_nested(sub, value, template)?;
        if keyed {
            let column = quote_key(key, template)?;
            parts.push(format!("{column} = {bound}"));
        } else {
            parts.push(bound);
        }
    }
    Ok(parts.join(if keyed { "," } else { ", " }))
}

/// Positional elements have no column name to render.
fn quote_key(key: Option<String>, template: &str) -> Result<String> {
    match key {
        Some(name) => quote_identifier(&name),
        None => Err(BindError::TypeMismatch {
            expected: PlaceholderKind::Identifier,
            actual: ValueKind::Integer,
            template: template.to_string(),
        }),
    }
}
