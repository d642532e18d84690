//! Implementation of the `stagegate validate` command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::application::GateOutcome;
use crate::cli::display::{output, report::render_outcome, CommandOutput};
use crate::domain::models::Config;

/// Arguments for `stagegate validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the contract payload JSON file
    pub file: PathBuf,

    /// Contract type to validate as; defaults to the `<target_agent>_input`
    /// schema derived from the payload itself
    #[arg(long)]
    pub contract_type: Option<String>,
}

impl CommandOutput for GateOutcome {
    fn to_human(&self) -> String {
        render_outcome(self)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run the command.
pub async fn execute(args: ValidateArgs, config: &Config, json: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

    let gate = super::build_gate(config).await?;
    let outcome = match &args.contract_type {
        Some(contract_type) => gate.validate_as(contract_type, &payload)?,
        None => gate.validate(&payload)?,
    };

    output(&outcome, json);

    if !outcome.may_advance() {
        bail!(
            "contract blocked: {} error(s)",
            outcome.report.error_count()
        );
    }
    Ok(())
}
