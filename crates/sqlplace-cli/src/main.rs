//! sqlplace CLI: bind typed SQL placeholder templates from the shell.
//!
//! Provides three commands: `bind`, `inspect`, and `init`.
//!
//! Every command delegates to [`sqlplace_core::Binder`] or the
//! [`sqlplace_core::scanner`] it is built on.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sqlplace_core::Mode;

#[derive(Parser)]
#[command(
    name = "sqlplace",
    about = "Typed placeholder binding for literal MySQL queries",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to sqlplace.config.json (default: ./sqlplace.config.json)
    #[arg(long, global = true, default_value = sqlplace_core::config::CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind arguments into a template and print the SQL
    Bind {
        /// Query template, e.g. 'SELECT * FROM ?f WHERE `id` = ?i'
        template: String,

        /// Arguments as a JSON array
        #[arg(long, conflicts_with = "args_file")]
        args: Option<String>,

        /// Path to a file holding the JSON argument array
        #[arg(long)]
        args_file: Option<PathBuf>,

        /// Override the configured coercion mode
        #[arg(long, value_enum)]
        mode: Option<ModeChoice>,

        /// Fail when arguments are left over after the last placeholder
        #[arg(long)]
        strict_arity: bool,
    },

    /// List the placeholders of a template without binding
    Inspect {
        /// Query template
        template: String,
    },

    /// Write a default config file
    Init {
        /// Coercion mode to store
        #[arg(long, value_enum, default_value = "transform")]
        mode: ModeChoice,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeChoice {
    Strict,
    Transform,
}

impl ModeChoice {
    pub fn as_str(&self) -> &'static str {
        self.mode().as_str()
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Strict => Mode::Strict,
            Self::Transform => Mode::Transform,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Bind {
            template,
            args,
            args_file,
            mode,
            strict_arity,
        } => {
            let source = match (args, args_file) {
                (Some(json), _) => commands::bind::ArgsSource::Inline(json),
                (None, Some(path)) => commands::bind::ArgsSource::File(path),
                (None, None) => commands::bind::ArgsSource::None,
            };
            commands::bind::run(&cli.config, &template, source, mode, strict_arity)?;
        }
        Commands::Inspect { template } => {
            commands::inspect::run(&template)?;
        }
        Commands::Init { mode, force } => {
            commands::init::run(&cli.config, mode, force)?;
        }
    }

    Ok(())
}
