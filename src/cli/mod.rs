//! Command-line interface.

pub mod commands;
pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

pub use commands::ingest::{IssueArgs, ManualArgs};
pub use commands::init::InitArgs;
pub use commands::schema::ShowArgs;
pub use commands::validate::ValidateArgs;
pub use display::{output, CommandOutput};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "stagegate",
    version,
    about = "Schema-driven contract validation gate for the feature pipeline"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = ".stagegate/config.yaml")]
    pub config: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .stagegate project directory with config and schemas
    Init(InitArgs),
    /// Validate a contract payload file at a stage boundary
    Validate(ValidateArgs),
    /// Build a contract from an external source and run it through the gate
    Ingest {
        /// Contract source.
        #[command(subcommand)]
        command: IngestCommands,
    },
    /// Inspect registered contract schemas
    Schema {
        /// Schema operation.
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

/// Contract ingestion sources.
#[derive(Subcommand, Debug)]
pub enum IngestCommands {
    /// Ingest a GitHub issue (from a JSON file or fetched by number)
    Issue(IssueArgs),
    /// Ingest a manually specified story
    Manual(ManualArgs),
}

/// Schema inspection operations.
#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List every registered schema
    List,
    /// Show one schema as YAML
    Show(ShowArgs),
}

/// Print an error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
