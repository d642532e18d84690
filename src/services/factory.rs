//! Contract factory.
//!
//! Builds well-formed entry contracts from heterogeneous inputs: an
//! external issue payload, or a direct manual request. Factory output still
//! has to pass the structural and semantic validators before it may cross a
//! stage boundary; the factory's job is canonical shape, not final verdict.

use serde::Deserialize;

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::contract::{Contract, DnaCompliance, InputRequirements, OutputSpecifications};
use crate::domain::models::issue::ExternalIssue;
use crate::domain::models::schema_templates::DEFAULT_CONTRACT_VERSION;
use crate::domain::models::{AgentRole, Priority};

/// Source tag used in story identifiers derived from GitHub issues.
const GITHUB_SOURCE_TAG: &str = "GH";

/// Time budget assigned to a fresh entry contract, in minutes.
const DEFAULT_TIME_CONSTRAINT_MINUTES: u32 = 30;

/// A direct caller-supplied contract request.
///
/// The record is closed: unknown extra fields fail deserialization instead
/// of being silently dropped, so contract drift surfaces at the producer.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManualRequest {
    /// Story identifier, `STORY-<SOURCE>-<NUMBER>`.
    pub story_id: String,
    /// Story description.
    pub description: String,
    /// Priority level name; parsed case-insensitively.
    #[serde(default = "default_priority")]
    pub priority: String,
    /// Optional time budget override, in minutes.
    #[serde(default)]
    pub time_constraint_minutes: Option<u32>,
    /// Optional labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Optional assignees.
    #[serde(default)]
    pub assignees: Vec<String>,
}

fn default_priority() -> String {
    Priority::Medium.as_str().to_string()
}

impl ManualRequest {
    /// Convenience constructor for the common three-field case.
    pub fn new(story_id: &str, description: &str, priority: &str) -> Self {
        Self {
            story_id: story_id.to_string(),
            description: description.to_string(),
            priority: priority.to_string(),
            time_constraint_minutes: None,
            labels: Vec::new(),
            assignees: Vec::new(),
        }
    }
}

/// Builds canonical entry contracts addressed to the pipeline's first stage.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    contract_version: String,
}

impl Default for ContractFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractFactory {
    /// Factory producing contracts at the default shape version.
    pub fn new() -> Self {
        Self {
            contract_version: DEFAULT_CONTRACT_VERSION.to_string(),
        }
    }

    /// Factory producing contracts at a specific shape version.
    pub fn with_version(contract_version: &str) -> Self {
        Self {
            contract_version: contract_version.to_string(),
        }
    }

    /// Build an entry contract from an external issue.
    ///
    /// The story identifier is derived deterministically as
    /// `STORY-GH-<issue number>`; a payload without a stable identifier
    /// fails with [`GateError::Mapping`].
    pub fn from_issue(&self, issue: &ExternalIssue) -> GateResult<Contract> {
        let number = issue.number.ok_or_else(|| {
            GateError::Mapping("external issue payload has no stable identifier".to_string())
        })?;

        let story_id = format!("STORY-{GITHUB_SOURCE_TAG}-{number}");

        let mut description = issue.title.trim().to_string();
        if let Some(body) = issue.body.as_deref() {
            let body = body.trim();
            if !body.is_empty() {
                if !description.is_empty() {
                    description.push_str("\n\n");
                }
                description.push_str(body);
            }
        }

        let priority_level = extract_priority(&issue.labels).unwrap_or_default();

        Ok(self.build(
            story_id,
            description,
            priority_level,
            DEFAULT_TIME_CONSTRAINT_MINUTES,
            issue.labels.clone(),
            issue.assignees.clone(),
            issue.html_url.clone(),
        ))
    }

    /// Build an entry contract from a manual request.
    pub fn from_manual(&self, request: ManualRequest) -> GateResult<Contract> {
        let priority_level = Priority::from_str(&request.priority).ok_or_else(|| {
            GateError::Mapping(format!(
                "priority '{}' is not one of low, medium, high, critical",
                request.priority
            ))
        })?;

        Ok(self.build(
            request.story_id,
            request.description,
            priority_level,
            request
                .time_constraint_minutes
                .unwrap_or(DEFAULT_TIME_CONSTRAINT_MINUTES),
            request.labels,
            request.assignees,
            None,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        story_id: String,
        description: String,
        priority_level: Priority,
        time_constraint_minutes: u32,
        labels: Vec<String>,
        assignees: Vec<String>,
        external_url: Option<String>,
    ) -> Contract {
        Contract {
            contract_id: uuid::Uuid::new_v4(),
            contract_version: self.contract_version.clone(),
            story_id,
            source_agent: AgentRole::Github,
            target_agent: AgentRole::ProjectManager,
            description,
            priority_level,
            time_constraint_minutes,
            dna_compliance: DnaCompliance::default(),
            input_requirements: InputRequirements::default(),
            output_specifications: OutputSpecifications::default(),
            quality_gates: Vec::new(),
            handoff_criteria: Vec::new(),
            labels,
            assignees,
            external_url,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Map label names to a priority.
///
/// Recognises labels whose names contain priority keywords
/// (case-insensitive): `critical`, `high`, `medium`/`normal`, `low`.
/// Returns `None` when no priority label is found.
fn extract_priority(labels: &[String]) -> Option<Priority> {
    for label in labels {
        let name = label.to_lowercase();
        if name.contains("critical") {
            return Some(Priority::Critical);
        }
        if name.contains("high") {
            return Some(Priority::High);
        }
        if name.contains("medium") || name.contains("normal") {
            return Some(Priority::Medium);
        }
        if name.contains("low") {
            return Some(Priority::Low);
        }
    }
    None
}
