//! Built-in stage-input schema definitions.
//!
//! One schema per receiving stage, all sharing the common contract field
//! table. `stagegate init` writes these to the project schema directory as
//! YAML; they are also the fixture set used by tests and benches.

use super::agent::AgentRole;
use super::contract::STORY_ID_PATTERN;
use super::schema::{ContractSchema, FieldKind, FieldRule};

/// Contract shape version the built-in schemas (and the factory) use.
pub const DEFAULT_CONTRACT_VERSION: &str = "1.0.0";

/// Semver pattern for `contract_version`.
const SEMVER_PATTERN: &str = r"^\d+\.\d+\.\d+$";

/// The shared field table every stage-input contract follows.
fn contract_field_table() -> Vec<FieldRule> {
    vec![
        FieldRule::required("contract_version", FieldKind::String).with_pattern(SEMVER_PATTERN),
        FieldRule::required("story_id", FieldKind::String).with_pattern(STORY_ID_PATTERN),
        FieldRule::required("source_agent", FieldKind::String),
        FieldRule::required("target_agent", FieldKind::String),
        FieldRule::required("description", FieldKind::String),
        FieldRule::required("priority_level", FieldKind::String),
        FieldRule::required("time_constraint_minutes", FieldKind::Integer),
        FieldRule::optional("dna_compliance", FieldKind::Object),
        FieldRule::optional("dna_compliance.design_principles", FieldKind::Object),
        FieldRule::optional("dna_compliance.architecture_principles", FieldKind::Object),
        FieldRule::optional("input_requirements", FieldKind::Object),
        FieldRule::optional("input_requirements.required_files", FieldKind::Array),
        FieldRule::optional("input_requirements.required_validations", FieldKind::Array),
        FieldRule::optional("output_specifications", FieldKind::Object),
        FieldRule::optional("output_specifications.deliverable_files", FieldKind::Array),
        FieldRule::optional("output_specifications.acceptance_criteria", FieldKind::Array),
        FieldRule::optional("quality_gates", FieldKind::Array),
        FieldRule::optional("handoff_criteria", FieldKind::Array),
        FieldRule::optional("labels", FieldKind::Array),
        FieldRule::optional("assignees", FieldKind::Array),
        FieldRule::optional("external_url", FieldKind::String),
        FieldRule::optional("contract_id", FieldKind::String),
        FieldRule::optional("created_at", FieldKind::String),
    ]
}

/// The input schema for one receiving stage.
pub fn stage_input_schema(receiving_role: AgentRole) -> ContractSchema {
    ContractSchema {
        contract_type: format!("{receiving_role}_input"),
        contract_version: DEFAULT_CONTRACT_VERSION.to_string(),
        receiving_role,
        closed: true,
        fields: contract_field_table(),
    }
}

/// All built-in schemas: one input schema per stage that receives contracts
/// (every role except the external `github` entry point).
pub fn builtin_schemas() -> Vec<ContractSchema> {
    AgentRole::ALL
        .into_iter()
        .filter(|role| *role != AgentRole::Github)
        .map(stage_input_schema)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_schema_per_receiving_stage() {
        let schemas = builtin_schemas();
        assert_eq!(schemas.len(), 6);
        assert!(schemas.iter().all(|s| s.receiving_role != AgentRole::Github));
        assert!(schemas
            .iter()
            .any(|s| s.contract_type == "project_manager_input"));
        assert!(schemas
            .iter()
            .any(|s| s.contract_type == "quality_reviewer_input"));
    }

    #[test]
    fn test_builtin_schemas_compile() {
        for schema in builtin_schemas() {
            let name = schema.contract_type.clone();
            schema
                .compile()
                .unwrap_or_else(|e| panic!("builtin schema {name} must compile: {e}"));
        }
    }

    #[test]
    fn test_builtin_schemas_serialize_to_yaml() {
        let schema = stage_input_schema(AgentRole::Developer);
        let yaml = serde_yaml::to_string(&schema).unwrap();
        let back: ContractSchema = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.contract_type, "developer_input");
        assert_eq!(back.fields.len(), schema.fields.len());
    }
}
