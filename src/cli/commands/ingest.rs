//! Implementation of the `stagegate ingest` commands.
//!
//! Builds an entry contract via the factory (from a GitHub issue payload or
//! a manual request) and immediately runs it through the gate, mirroring
//! the rule that factory output must pass validation before handoff.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::adapters::{GitHubClient, GitHubIssue};
use crate::application::GateOutcome;
use crate::cli::display::{output, report::render_outcome, CommandOutput};
use crate::domain::models::{Config, Contract};
use crate::services::{ContractFactory, ManualRequest};

/// Arguments for `stagegate ingest issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Read the issue payload from a JSON file
    #[arg(long, conflicts_with = "number")]
    pub file: Option<PathBuf>,

    /// Fetch the issue from the configured repository by number
    #[arg(long)]
    pub number: Option<u64>,
}

/// Arguments for `stagegate ingest manual`.
#[derive(Args, Debug)]
pub struct ManualArgs {
    /// Story identifier, STORY-<SOURCE>-<NUMBER>
    #[arg(long)]
    pub story_id: String,

    /// Story description
    #[arg(long)]
    pub description: String,

    /// Priority level: low, medium, high, or critical
    #[arg(long, default_value = "medium")]
    pub priority: String,

    /// Time budget for the first stage, in minutes
    #[arg(long)]
    pub time_constraint: Option<u32>,

    /// Labels to attach (repeatable)
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Assignees to attach (repeatable)
    #[arg(long = "assignee")]
    pub assignees: Vec<String>,
}

/// Outcome of an ingest run: the constructed contract plus its gate verdict.
#[derive(Debug, serde::Serialize)]
pub struct IngestOutput {
    /// The constructed contract's story id.
    pub story_id: String,
    /// Whether the contract passed the gate.
    pub passed: bool,
    /// The gate outcome.
    pub outcome: GateOutcome,
}

impl CommandOutput for IngestOutput {
    fn to_human(&self) -> String {
        format!("Story: {}\n{}", self.story_id, render_outcome(&self.outcome))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run `stagegate ingest issue`.
pub async fn execute_issue(args: IssueArgs, config: &Config, json: bool) -> Result<()> {
    let issue: GitHubIssue = match (&args.file, args.number) {
        (Some(file), _) => {
            let content = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("{} is not a GitHub issue payload", file.display()))?
        }
        (None, Some(number)) => {
            if config.github.owner.is_empty() || config.github.repo.is_empty() {
                bail!("github.owner and github.repo must be configured to fetch by number");
            }
            let client = GitHubClient::from_config(&config.github);
            client
                .fetch_issue(&config.github.owner, &config.github.repo, number)
                .await
                .context("failed to fetch issue from GitHub")?
        }
        (None, None) => bail!("either --file or --number is required"),
    };

    let contract = ContractFactory::new().from_issue(&issue.into_external())?;
    run_gate(contract, config, json).await
}

/// Run `stagegate ingest manual`.
pub async fn execute_manual(args: ManualArgs, config: &Config, json: bool) -> Result<()> {
    let request = ManualRequest {
        story_id: args.story_id,
        description: args.description,
        priority: args.priority,
        time_constraint_minutes: args.time_constraint,
        labels: args.labels,
        assignees: args.assignees,
    };
    let contract = ContractFactory::new().from_manual(request)?;
    run_gate(contract, config, json).await
}

/// Validate a freshly constructed contract and report the verdict.
async fn run_gate(contract: Contract, config: &Config, json: bool) -> Result<()> {
    let gate = super::build_gate(config).await?;
    let payload = serde_json::to_value(&contract)?;
    let outcome = gate.validate(&payload)?;

    let result = IngestOutput {
        story_id: contract.story_id.clone(),
        passed: outcome.may_advance(),
        outcome,
    };
    output(&result, json);

    if !result.passed {
        bail!(
            "constructed contract blocked: {} error(s)",
            result.outcome.report.error_count()
        );
    }
    Ok(())
}
