use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use sqlplace_core::{scanner, Binder, BinderConfig, Value};

use crate::output;
use crate::ModeChoice;

/// Where the JSON argument array comes from.
#[derive(Debug)]
pub enum ArgsSource {
    Inline(String),
    File(PathBuf),
    None,
}

/// Bind a template and print the resulting SQL on stdout.
///
/// The config file is optional; when it is missing the library defaults
/// apply. `--mode` and `--strict-arity` override whatever the file says.
pub fn run(
    config_path: &Path,
    template: &str,
    source: ArgsSource,
    mode: Option<ModeChoice>,
    strict_arity: bool,
) -> Result<()> {
    let mut config = if config_path.exists() {
        BinderConfig::load(config_path)?
    } else {
        BinderConfig::default()
    };
    if let Some(mode) = mode {
        config.mode = mode.mode();
    }
    if strict_arity {
        config.reject_excess_arguments = true;
    }
    tracing::info!(mode = %config.mode, strict_arity = config.reject_excess_arguments, "binding");

    let args = read_args(&source)?;
    if args.is_empty() && has_placeholders(template) {
        output::print_warning("No arguments given; every placeholder will fail to bind");
    }

    let sql = Binder::from_config(&config).bind(template, args)?;
    output::print_sql(&sql);
    Ok(())
}

/// Literal `?` characters that start no placeholder do not count.
fn has_placeholders(template: &str) -> bool {
    !scanner::scan(template).is_empty()
}

/// Load the argument list. The JSON document must be an array.
fn read_args(source: &ArgsSource) -> Result<Vec<Value>> {
    let text = match source {
        ArgsSource::Inline(json) => json.clone(),
        ArgsSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read arguments from {}", path.display()))?,
        ArgsSource::None => return Ok(Vec::new()),
    };
    parse_args(&text)
}

fn parse_args(text: &str) -> Result<Vec<Value>> {
    let json: serde_json::Value =
        serde_json::from_str(text).context("arguments are not valid JSON")?;
    match json {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(Value::from).collect()),
        other => bail!("arguments must be a JSON array, got: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_placeholders_ignores_literal_markers() {
        assert!(!has_placeholders("SELECT 1 WHERE ?"));
        assert!(!has_placeholders("a ?x b ?? c"));
        assert!(has_placeholders("SELECT ?i"));
        assert!(has_placeholders("IN(?ai)"));
    }

    #[test]
    fn test_parse_args_array() {
        let args = parse_args(r#"[1, "two", null, {"a": 1.5}]"#).unwrap();
        assert_eq!(
            args,
            vec![
                Value::Int(1),
                Value::from("two"),
                Value::Null,
                Value::map([("a", 1.5)]),
            ]
        );
    }

    #[test]
    fn test_parse_args_rejects_non_array() {
        assert!(parse_args(r#"{"a": 1}"#).is_err());
        assert!(parse_args("42").is_err());
        assert!(parse_args("not json").is_err());
    }

    #[test]
    fn test_read_args_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.json");
        std::fs::write(&path, r#"["x", 2]"#).unwrap();
        let args = read_args(&ArgsSource::File(path)).unwrap();
        assert_eq!(args, vec![Value::from("x"), Value::Int(2)]);
    }

    #[test]
    fn test_read_args_none_is_empty() {
        assert!(read_args(&ArgsSource::None).unwrap().is_empty());
    }

    #[test]
    fn test_run_with_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("missing.json");
        let result = run(
            &config,
            "SELECT ?i",
            ArgsSource::Inline("[true]".into()),
            None,
            false,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_strict_arity_rejects_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("missing.json");
        let result = run(
            &config,
            "SELECT ?i",
            ArgsSource::Inline("[1, 2]".into()),
            Some(ModeChoice::Strict),
            true,
        );
        assert!(result.is_err());
    }
}
