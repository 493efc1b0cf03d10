//! The binding loop.
//!
//! [`Binder::bind`] walks the template once, left to right. For each
//! placeholder it pops the next argument, coerces and escapes it (or expands
//! it, for arrays), and splices the literal text in place of the placeholder.
//! Scanning resumes right after the inserted text.
//!
//! ```
//! use sqlplace_core::{args, Binder, Mode};
//!
//! let binder = Binder::new().with_mode(Mode::Strict);
//! let sql = binder
//!     .bind(r#"SELECT ?f FROM ?f WHERE `id` IN(?ai) AND `name` = "?s""#, args![
//!         "name",
//!         "shop.users",
//!         vec![1, 2],
//!         "D'Artagnan",
//!     ])
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT `name` FROM `shop`.`users` WHERE `id` IN(1, 2) AND `name` = "D\'Artagnan""#
//! );
//! ```

use std::collections::VecDeque;

use crate::coerce::{coerce, Target};
use crate::config::BinderConfig;
use crate::error::{BindError, Result};
use crate::escape::{escape_like, quote_identifier, EscapeString, MysqlEscaper};
use crate::expand::{self, ArrayItems};
use crate::mode::Mode;
use crate::scanner::{self, PlaceholderKind, MARKER_LEN};
use crate::template::Template;
use crate::value::Value;

/// Turns `(template, arguments)` into a literal SQL string.
///
/// Holds the coercion [`Mode`] and the driver escape primitive. Binding only
/// borrows the binder, so one instance can serve many calls; switching the
/// mode needs `&mut self`.
#[derive(Debug, Clone)]
pub struct Binder<E = MysqlEscaper> {
    escaper: E,
    mode: Mode,
    reject_excess_arguments: bool,
}

impl Binder<MysqlEscaper> {
    /// A binder in [`Mode::Transform`] using [`MysqlEscaper`].
    pub fn new() -> Self {
        Self::with_escaper(MysqlEscaper)
    }

    pub fn from_config(config: &BinderConfig) -> Self {
        Self::new()
            .with_mode(config.mode)
            .reject_excess_arguments(config.reject_excess_arguments)
    }
}

impl Default for Binder<MysqlEscaper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EscapeString> Binder<E> {
    /// A binder that escapes string values through the given driver primitive.
    pub fn with_escaper(escaper: E) -> Self {
        Self {
            escaper,
            mode: Mode::default(),
            reject_excess_arguments: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Fail with [`BindError::ExcessArguments`] when arguments are left over.
    ///
    /// Off by default: unused trailing arguments are accepted.
    pub fn reject_excess_arguments(mut self, reject: bool) -> Self {
        self.reject_excess_arguments = reject;
        self
    }

    pub fn escaper(&self) -> &E {
        &self.escaper
    }

    /// Bind `args` into `template`, consuming them front to back.
    pub fn bind<I>(&self, template: &str, args: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let queue: VecDeque<Value> = args.into_iter().map(Into::into).collect();
        tracing::debug!(mode = %self.mode, args = queue.len(), "binding template");
        let sql = self.bind_queue(template, queue, template)?;
        tracing::debug!(len = sql.len(), "template bound");
        Ok(sql)
    }

    /// Bind one element of a bracket array through its sub-template.
    pub(crate) fn bind_nested(&self, sub: &str, value: Value, original: &str) -> Result<String> {
        self.bind_queue(sub, VecDeque::from([value]), original)
    }

    /// `original` is the top-level template, reported in errors.
    fn bind_queue(&self, template: &str, mut args: VecDeque<Value>, original: &str) -> Result<String> {
        let mut buf = Template::new(template);

        while let Some(marker) = buf.next_placeholder() {
            let value = args
                .pop_front()
                .ok_or_else(|| BindError::ArgumentsExhausted {
                    template: original.to_string(),
                })?;
            tracing::trace!(offset = marker.offset, kind = %marker.kind, "placeholder");

            let mut end = marker.offset + MARKER_LEN;
            let replacement = match marker.kind {
                PlaceholderKind::Int => self.scalar(Target::Int, marker.kind, &value, original)?,
                PlaceholderKind::Float => self.scalar(Target::Float, marker.kind, &value, original)?,
                PlaceholderKind::String => {
                    let text = self.scalar(Target::String, marker.kind, &value, original)?;
                    self.escaper.escape_string(&text)
                }
                PlaceholderKind::StringLike => {
                    let text = self.scalar(Target::String, marker.kind, &value, original)?;
                    escape_like(&self.escaper, &text)
                }
                PlaceholderKind::Null => self.scalar(Target::Null, marker.kind, &value, original)?,
                PlaceholderKind::Identifier => identifier(&value, original)?,
                PlaceholderKind::ArrayList | PlaceholderKind::ArrayMap => {
                    let items = ArrayItems::from_value(value, original)?;
                    let (suffix, suffix_end) = scanner::parse_array_suffix(buf.as_str(), marker.offset)
                        .ok_or_else(|| BindError::MissingArrayElementType {
                            template: original.to_string(),
                        })?;
                    end = suffix_end;
                    expand::expand(self, marker.kind, items, suffix, original)?
                }
            };

            buf.splice(marker.offset, end, &replacement);
        }

        if !args.is_empty() {
            if self.reject_excess_arguments {
                return Err(BindError::ExcessArguments {
                    remaining: args.len(),
                    template: original.to_string(),
                });
            }
            tracing::debug!(remaining = args.len(), "unused arguments ignored");
        }

        Ok(buf.into_string())
    }

    fn scalar(&self, target: Target, kind: PlaceholderKind, value: &Value, original: &str) -> Result<String> {
        coerce(target, value, self.mode).map_err(|r| r.into_error(kind, original))
    }
}

/// Identifiers must be text in every mode.
fn identifier(value: &Value, original: &str) -> Result<String> {
    match value {
        Value::Text(name) => quote_identifier(name),
        other => Err(BindError::TypeMismatch {
            expected: PlaceholderKind::Identifier,
            actual: other.kind(),
            template: original.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::value::ValueKind;

    fn strict() -> Binder {
        Binder::new().with_mode(Mode::Strict)
    }

    fn transform() -> Binder {
        Binder::new().with_mode(Mode::Transform)
    }

    #[test]
    fn test_no_placeholders_returns_template() {
        let sql = "SELECT * FROM `t` WHERE a = 'x?' AND b = ? ";
        assert_eq!(transform().bind(sql, args![1, "two", 3.0]).unwrap(), sql);
        assert_eq!(strict().bind(sql, Vec::<Value>::new()).unwrap(), sql);
    }

    #[test]
    fn test_strict_numeric() {
        let sql = strict().bind("SELECT ?d + ?i", args![3.5, 5]).unwrap();
        assert_eq!(sql, "SELECT 3.5 + 5");
    }

    #[test]
    fn test_strict_numeric_text() {
        let sql = strict().bind("SELECT ?d + ?i", args!["3.5", 5]).unwrap();
        assert_eq!(sql, "SELECT 3.5 + 5");
    }

    #[test]
    fn test_transform_int_truncates_float() {
        let sql = transform().bind("SELECT ?i + ?i", args![3.5, 5]).unwrap();
        assert_eq!(sql, "SELECT 3 + 5");
    }

    #[test]
    fn test_transform_null_and_bool_as_int() {
        let sql = transform().bind("SELECT ?i + ?i", args![Value::Null, true]).unwrap();
        assert_eq!(sql, "SELECT 0 + 1");
    }

    #[test]
    fn test_transform_string_coercion() {
        let sql = transform()
            .bind(r#"SELECT "?s", "?s", "?s""#, args![false, Value::Null, 0.001])
            .unwrap();
        assert_eq!(sql, r#"SELECT "0", "", "0.001""#);
    }

    #[test]
    fn test_strict_rejects_float_text_for_int() {
        let err = strict()
            .bind(r#"SELECT "?i", "?i", "?s""#, args!["33.5", 12.1, false])
            .unwrap_err();
        match err {
            BindError::TypeMismatch {
                expected,
                actual,
                template,
            } => {
                assert_eq!(expected, PlaceholderKind::Int);
                assert_eq!(actual, ValueKind::Float);
                assert_eq!(template, r#"SELECT "?i", "?i", "?s""#);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = strict().bind("SELECT ?s", args![5]).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"attempt to specify a value of type "integer" for placeholder of type "string" in query template "SELECT ?s""#
        );
    }

    #[test]
    fn test_identifier_quoting() {
        let b = strict();
        assert_eq!(b.bind("SELECT * FROM ?f", args!["db.table"]).unwrap(), "SELECT * FROM `db`.`table`");
        assert_eq!(b.bind("?f", args!["a`b"]).unwrap(), "`a``b`");
    }

    #[test]
    fn test_identifier_rejects_non_text_in_both_modes() {
        for b in [strict(), transform()] {
            let err = b.bind("SELECT ?f", args![12]).unwrap_err();
            assert!(matches!(
                err,
                BindError::TypeMismatch {
                    expected: PlaceholderKind::Identifier,
                    actual: ValueKind::Integer,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_identifier_numeric_text_is_a_name() {
        assert_eq!(strict().bind("?f", args!["2024"]).unwrap(), "`2024`");
    }

    #[test]
    fn test_malformed_identifier() {
        let err = transform().bind("SELECT ?f", args!["a..b..c"]).unwrap_err();
        assert!(matches!(err, BindError::MalformedIdentifier { identifier } if identifier == "a..b..c"));
    }

    #[test]
    fn test_like_escaping() {
        let sql = transform()
            .bind(r#"SELECT `name` FROM `test` WHERE `name` LIKE "%?S%""#, args!["%"])
            .unwrap();
        assert_eq!(sql, r#"SELECT `name` FROM `test` WHERE `name` LIKE "%\%%""#);
    }

    #[test]
    fn test_string_escaping() {
        let sql = strict().bind("WHERE `name` = '?s'", args!["x' OR '1'='1"]).unwrap();
        assert_eq!(sql, r"WHERE `name` = 'x\' OR \'1\'=\'1'");
    }

    #[test]
    fn test_null_placeholder() {
        assert_eq!(transform().bind("SELECT ?n", args![123]).unwrap(), "SELECT NULL");
        assert_eq!(strict().bind("SELECT ?n", args![Value::Null]).unwrap(), "SELECT NULL");
        assert!(matches!(
            strict().bind("SELECT ?n", args![123]),
            Err(BindError::TypeMismatch { expected: PlaceholderKind::Null, .. })
        ));
    }

    #[test]
    fn test_null_placeholder_consumes_argument() {
        let sql = transform().bind("?n, ?i", args!["ignored", 7]).unwrap();
        assert_eq!(sql, "NULL, 7");
    }

    #[test]
    fn test_arguments_exhausted() {
        let err = transform().bind("SELECT ?i, ?i", args![1]).unwrap_err();
        assert!(matches!(err, BindError::ArgumentsExhausted { template } if template == "SELECT ?i, ?i"));
    }

    #[test]
    fn test_literal_markers_pass_through() {
        let b = strict();
        assert_eq!(b.bind("SELECT 1 WHERE ?", args![5]).unwrap(), "SELECT 1 WHERE ?");
        assert_eq!(b.bind("a ?x b ?? c", Vec::<Value>::new()).unwrap(), "a ?x b ?? c");
        assert_eq!(b.bind("?x ?i ?", args![9]).unwrap(), "?x 9 ?");
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        let sql = strict().bind(r#""?s" ?i"#, args!["?i ?s ?ai", 4]).unwrap();
        assert_eq!(sql, r#""?i ?s ?ai" 4"#);
    }

    #[test]
    fn test_excess_arguments_accepted_by_default() {
        assert_eq!(strict().bind("SELECT ?i", args![1, 2, 3]).unwrap(), "SELECT 1");
    }

    #[test]
    fn test_excess_arguments_rejected_when_configured() {
        let b = strict().reject_excess_arguments(true);
        let err = b.bind("SELECT ?i", args![1, 2, 3]).unwrap_err();
        assert!(matches!(err, BindError::ExcessArguments { remaining: 2, .. }));
        assert_eq!(b.bind("SELECT ?i", args![1]).unwrap(), "SELECT 1");
    }

    #[test]
    fn test_non_finite_float() {
        let err = transform().bind("SELECT ?d", args![f64::NAN]).unwrap_err();
        assert!(matches!(err, BindError::NonFiniteFloat { .. }));
    }

    #[test]
    fn test_set_mode_is_per_instance() {
        let mut a = Binder::new();
        let b = Binder::new();
        a.set_mode(Mode::Strict);
        assert_eq!(a.mode(), Mode::Strict);
        assert_eq!(b.mode(), Mode::Transform);
        assert!(a.bind("?i", args![3.5]).is_err());
        assert_eq!(b.bind("?i", args![3.5]).unwrap(), "3");
    }

    #[test]
    fn test_from_config() {
        let config = BinderConfig {
            mode: Mode::Strict,
            reject_excess_arguments: true,
        };
        let b = Binder::from_config(&config);
        assert_eq!(b.mode(), Mode::Strict);
        assert!(b.bind("?i", args![1, 2]).is_err());
    }

    #[test]
    fn test_custom_escaper() {
        struct DoubleQuote;
        impl EscapeString for DoubleQuote {
            fn escape_string(&self, raw: &str) -> String {
                raw.replace('\'', "''")
            }
        }

        let b = Binder::with_escaper(DoubleQuote);
        assert_eq!(b.bind("'?s'", args!["it's"]).unwrap(), "'it''s'");
    }

    #[test]
    fn test_binder_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Binder>();
    }
}
