//! uspa-records CLI - set up and inspect the USPA records table

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uspa_records::config;
use uspa_records::Dialect;

mod commands;

#[derive(Parser)]
#[command(name = "uspa-records")]
#[command(version)]
#[command(about = "Schema setup and inspection for the USPA powerlifting records table")]
#[command(long_about = r#"
Creates the uspa_records table and its six lookup indexes, idempotently.
Run it once before a bulk upload; running it again changes nothing.

Example usage:
  uspa-records schema --dialect postgres > uspa_records.sql
  uspa-records init --database uspa_records.db
  uspa-records inspect
  uspa-records lookup --column location --value texas
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the table and indexes in a SQLite database
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print the schema script
    Schema {
        /// SQL dialect (postgres, sqlite)
        #[arg(short = 'D', long)]
        dialect: Option<String>,
    },

    /// Report whether the table and all indexes exist
    Inspect {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// List records matching an indexed column
    Lookup {
        /// Indexed column (location, event, status, division, weight_class, has_record)
        #[arg(short, long)]
        column: String,

        /// Value to match
        #[arg(short = 'V', long)]
        value: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a default uspa.toml
    Config {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// A command failure that still has a payload worth reporting
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CommandFailure {
    pub command: &'static str,
    pub message: String,
    pub data: serde_json::Value,
}

pub fn success_envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

/// Envelope for a failed run; carries the command and payload when known
pub fn failure_envelope(error: &anyhow::Error) -> serde_json::Value {
    match error.downcast_ref::<CommandFailure>() {
        Some(failure) => serde_json::json!({
            "ok": false,
            "command": failure.command,
            "error": failure.message,
            "data": failure.data,
        }),
        None => serde_json::json!({ "ok": false, "error": format!("{:#}", error) }),
    }
}

/// Print the JSON envelope for a successful command
pub fn emit_success(
    output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&success_envelope(command, data))?);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    if let Err(e) = run(cli, output_mode) {
        if output_mode.is_human() {
            uspa_records::ui::error(&format!("{:#}", e));
        } else {
            println!("{}", failure_envelope(&e));
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let settings = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Init { database } => {
            commands::run_init(output_mode, &settings.resolve_database(database))
        }

        Commands::Schema { dialect } => {
            let dialect = dialect.as_deref().map(Dialect::from_str).transpose()?;
            commands::run_schema(output_mode, settings.resolve_dialect(dialect))
        }

        Commands::Inspect { database } => {
            commands::run_inspect(output_mode, &settings.resolve_database(database))
        }

        Commands::Lookup { column, value, limit, database } => commands::run_lookup(
            output_mode,
            &settings.resolve_database(database),
            &column,
            &value,
            limit,
        ),

        Commands::Config { force } => commands::run_config(output_mode, cli.config, force),

        Commands::Version => commands::run_version(output_mode),
    }
}
