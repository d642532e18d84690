//! The canonical contract exchanged between pipeline stages.
//!
//! A contract is constructed once (by the factory, from a manual request or
//! an external issue), validated at each stage boundary, and consumed by its
//! target stage. `story_id` and `source_agent` are fixed at construction;
//! nothing mutates a contract after validation succeeds other than the
//! producing stage attaching its output data for the next handoff.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent::AgentRole;
use super::priority::Priority;

/// Story identifiers follow `STORY-<SOURCE>-<NUMBER>`, e.g. `STORY-GH-123`.
static STORY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^STORY-[A-Z0-9]+-\d+$").expect("story id pattern is valid"));

/// The `story_id` format as a pattern string, for use in structural schemas.
pub const STORY_ID_PATTERN: &str = r"^STORY-[A-Z0-9]+-\d+$";

/// Check a story identifier against the `STORY-<SOURCE>-<NUMBER>` format.
pub fn is_valid_story_id(id: &str) -> bool {
    STORY_ID_RE.is_match(id)
}

fn default_true() -> bool {
    true
}

/// A versioned, typed payload handed from one pipeline stage to the next.
///
/// Unknown fields are rejected at deserialization: the contract shape is a
/// closed record per version, so producer drift surfaces immediately instead
/// of being silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contract {
    /// Instance identifier used for log correlation, generated when absent.
    #[serde(default = "Uuid::new_v4")]
    pub contract_id: Uuid,
    /// Semantic version of the contract shape; must match a registered schema.
    pub contract_version: String,
    /// Unique story identifier, `STORY-<SOURCE>-<NUMBER>`. Immutable once set.
    pub story_id: String,
    /// The stage that authored this contract.
    pub source_agent: AgentRole,
    /// The stage this contract is addressed to.
    pub target_agent: AgentRole,
    /// Human-readable story description.
    pub description: String,
    /// Priority of the story.
    pub priority_level: Priority,
    /// Time budget for the receiving stage, in minutes (1..=60).
    pub time_constraint_minutes: u32,
    /// Quality and design principle flags.
    #[serde(default)]
    pub dna_compliance: DnaCompliance,
    /// What the receiving stage needs before it can start.
    #[serde(default)]
    pub input_requirements: InputRequirements,
    /// What the receiving stage is expected to produce.
    #[serde(default)]
    pub output_specifications: OutputSpecifications,
    /// Named checks that must all pass before the contract can advance.
    #[serde(default)]
    pub quality_gates: Vec<String>,
    /// Named criteria for the handoff to the following stage.
    #[serde(default)]
    pub handoff_criteria: Vec<String>,
    /// Label names copied from the external source, if any.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Assignee names copied from the external source, if any.
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Link back to the external source (e.g. the GitHub issue URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// When the contract was constructed.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// The platform's fixed quality principles, encoded as boolean flags.
///
/// All flags default to true; producers clear individual flags when a
/// principle check fails upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DnaCompliance {
    /// Product/design principle checks.
    #[serde(default)]
    pub design_principles: DesignPrinciples,
    /// Technical architecture principle checks.
    #[serde(default)]
    pub architecture_principles: ArchitecturePrinciples,
}

impl Default for DnaCompliance {
    fn default() -> Self {
        Self {
            design_principles: DesignPrinciples::default(),
            architecture_principles: ArchitecturePrinciples::default(),
        }
    }
}

/// Design-principle flags for the training platform's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignPrinciples {
    /// The feature teaches something.
    #[serde(default = "default_true")]
    pub pedagogical_value: bool,
    /// The feature connects policy to daily practice.
    #[serde(default = "default_true")]
    pub policy_to_practice: bool,
    /// The feature respects the user's limited time.
    #[serde(default = "default_true")]
    pub time_respect: bool,
    /// The feature fits the whole-organisation perspective.
    #[serde(default = "default_true")]
    pub holistic_thinking: bool,
    /// The feature keeps a professional tone.
    #[serde(default = "default_true")]
    pub professional_tone: bool,
}

impl Default for DesignPrinciples {
    fn default() -> Self {
        Self {
            pedagogical_value: true,
            policy_to_practice: true,
            time_respect: true,
            holistic_thinking: true,
            professional_tone: true,
        }
    }
}

/// Architecture-principle flags for the implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchitecturePrinciples {
    /// All communication goes through the API.
    #[serde(default = "default_true")]
    pub api_first: bool,
    /// Backend holds no client session state.
    #[serde(default = "default_true")]
    pub stateless_backend: bool,
    /// Frontend and backend stay separated.
    #[serde(default = "default_true")]
    pub separation_of_concerns: bool,
    /// The simplest solution that works wins.
    #[serde(default = "default_true")]
    pub simplicity_first: bool,
}

impl Default for ArchitecturePrinciples {
    fn default() -> Self {
        Self {
            api_first: true,
            stateless_backend: true,
            separation_of_concerns: true,
            simplicity_first: true,
        }
    }
}

/// What a stage requires before it may start processing a contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputRequirements {
    /// Files that must exist before processing.
    #[serde(default)]
    pub required_files: Vec<String>,
    /// Stage-specific typed payload.
    #[serde(default)]
    pub required_data: serde_json::Value,
    /// Names of validation rules that must hold before processing.
    #[serde(default)]
    pub required_validations: Vec<String>,
}

/// What a stage is expected to deliver on its output side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSpecifications {
    /// Files the stage must produce.
    #[serde(default)]
    pub deliverable_files: Vec<String>,
    /// Stage-specific typed output payload.
    #[serde(default)]
    pub deliverable_data: serde_json::Value,
    /// Acceptance criteria the output must satisfy.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}
