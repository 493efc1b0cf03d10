use std::path::Path;

use anyhow::{bail, Result};

use sqlplace_core::BinderConfig;

use crate::output;
use crate::ModeChoice;

/// Write a default `sqlplace.config.json`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn run(config_path: &Path, mode: ModeChoice, force: bool) -> Result<()> {
    output::print_header("sqlplace init");

    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = BinderConfig {
        mode: mode.mode(),
        ..BinderConfig::default()
    };
    config.save(config_path)?;

    output::print_key_value("Mode", mode.as_str());
    output::print_key_value(
        "Reject excess arguments",
        &config.reject_excess_arguments.to_string(),
    );
    output::print_success(&format!("Wrote {}", config_path.display()));
    Ok(())
}
