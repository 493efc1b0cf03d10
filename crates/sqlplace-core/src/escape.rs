//! String escaping and identifier quoting.
//!
//! Raw escaping of string literals belongs to the database driver, which
//! knows the connection's character set. The binder reaches it through the
//! [`EscapeString`] trait; [`MysqlEscaper`] covers the common case of an
//! ASCII-compatible character set such as `utf8mb4`.

use std::sync::Arc;

use crate::error::{BindError, Result};

/// Driver-level escaping of text for use inside a quoted SQL string literal.
pub trait EscapeString {
    fn escape_string(&self, raw: &str) -> String;
}

impl<E: EscapeString + ?Sized> EscapeString for &E {
    fn escape_string(&self, raw: &str) -> String {
        (**self).escape_string(raw)
    }
}

impl<E: EscapeString + ?Sized> EscapeString for Box<E> {
    fn escape_string(&self, raw: &str) -> String {
        (**self).escape_string(raw)
    }
}

impl<E: EscapeString + ?Sized> EscapeString for Arc<E> {
    fn escape_string(&self, raw: &str) -> String {
        (**self).escape_string(raw)
    }
}

/// The escaping performed by `mysql_real_escape_string` for ASCII-compatible charsets.
///
/// | Input | Output |
/// |---|---|
/// | NUL | `\0` |
/// | LF | `\n` |
/// | CR | `\r` |
/// | `\` | `\\` |
/// | `'` | `\'` |
/// | `"` | `\"` |
/// | Ctrl-Z | `\Z` |
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlEscaper;

impl EscapeString for MysqlEscaper {
    fn escape_string(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + raw.len() / 8);
        for c in raw.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        out
    }
}

/// Escape `raw` for the right-hand side of `LIKE`, so that `%`, `_` and `\`
/// match literally.
///
/// Backslashes are doubled before the driver escape (which doubles them again,
/// leaving a `LIKE`-level escaped backslash), then `%` and `_` are prefixed.
pub fn escape_like<E: EscapeString + ?Sized>(escaper: &E, raw: &str) -> String {
    let escaped = escaper.escape_string(&raw.replace('\\', "\\\\"));
    let mut out = String::with_capacity(escaped.len() + 4);
    for c in escaped.chars() {
        if matches!(c, '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Quote a possibly dotted identifier with backticks, segment by segment.
///
/// One empty segment is kept as a bare `.` (the current database is elided);
/// a second one is an error. Trailing dots are dropped.
pub fn quote_identifier(name: &str) -> Result<String> {
    let mut out = String::with_capacity(name.len() + 4);
    let mut elided = false;
    for segment in name.split('.') {
        if segment.is_empty() {
            if elided {
                return Err(BindError::MalformedIdentifier {
                    identifier: name.to_string(),
                });
            }
            elided = true;
            out.push('.');
        } else {
            out.push('`');
            out.push_str(&segment.replace('`', "``"));
            out.push_str("`.");
        }
    }
    Ok(out.trim_end_matches('.').to_string())
}
