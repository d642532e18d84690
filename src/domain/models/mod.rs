//! Domain models: contracts, agent roles, schemas, configuration.

pub mod agent;
pub mod config;
pub mod contract;
pub mod issue;
pub mod priority;
pub mod schema;
pub mod schema_templates;

pub use agent::{AgentRole, SequenceGraph};
pub use config::{Config, GitHubConfig, LoggingConfig, PipelineConfig, Transition};
pub use contract::{
    is_valid_story_id, ArchitecturePrinciples, Contract, DesignPrinciples, DnaCompliance,
    InputRequirements, OutputSpecifications, STORY_ID_PATTERN,
};
pub use issue::ExternalIssue;
pub use priority::Priority;
pub use schema::{CompiledSchema, ContractSchema, FieldKind, FieldRule};
