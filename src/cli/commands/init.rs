//! Implementation of the `stagegate init` command.
//!
//! Scaffolds a `.stagegate/` project directory: the default configuration
//! file plus one YAML schema document per built-in stage-input schema.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::fs;

use crate::cli::display::{output, CommandOutput};
use crate::domain::models::schema_templates::builtin_schemas;
use crate::domain::models::Config;

/// Arguments for `stagegate init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force reinitialization even if already initialized
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Result of the init command.
#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    /// Whether anything was written.
    pub success: bool,
    /// Human-oriented status line.
    pub message: String,
    /// Where the project was initialized.
    pub initialized_path: PathBuf,
    /// Number of schema documents written.
    pub schemas_written: usize,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.schemas_written > 0 {
            lines.push(format!(
                "Wrote {} schema document(s) to .stagegate/schemas/",
                self.schemas_written
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run the command.
pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let stagegate_dir = target_path.join(".stagegate");
    let schemas_dir = stagegate_dir.join("schemas");

    if stagegate_dir.exists() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to reinitialize.".to_string(),
            initialized_path: target_path,
            schemas_written: 0,
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    if args.force && stagegate_dir.exists() {
        fs::remove_dir_all(&stagegate_dir)
            .await
            .context("Failed to remove existing .stagegate directory")?;
    }

    fs::create_dir_all(&schemas_dir)
        .await
        .with_context(|| format!("Failed to create {}", schemas_dir.display()))?;

    // Default project configuration.
    let config_yaml =
        serde_yaml::to_string(&Config::default()).context("Failed to serialize default config")?;
    fs::write(stagegate_dir.join("config.yaml"), config_yaml)
        .await
        .context("Failed to write config.yaml")?;

    // One schema document per built-in stage-input schema.
    let mut schemas_written = 0;
    for schema in builtin_schemas() {
        let file_name = format!("{}.yaml", schema.contract_type);
        let yaml = serde_yaml::to_string(&schema)
            .with_context(|| format!("Failed to serialize schema {}", schema.contract_type))?;
        fs::write(schemas_dir.join(&file_name), yaml)
            .await
            .with_context(|| format!("Failed to write {file_name}"))?;
        schemas_written += 1;
    }

    let output_data = InitOutput {
        success: true,
        message: if args.force {
            "Project reinitialized successfully.".to_string()
        } else {
            "Project initialized successfully.".to_string()
        },
        initialized_path: target_path,
        schemas_written,
    };
    output(&output_data, json_mode);
    Ok(())
}
