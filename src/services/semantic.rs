//! Semantic (policy) validation of contract payloads.
//!
//! Cross-field business rules that structural shape checking cannot
//! express: agent-role membership, handoff legality against the sequence
//! graph, schema addressing, priority levels, time budgets, and free-text
//! list hygiene. Semantic validation only runs on payloads that already
//! passed the structural pass, so every rule here can assume a field it
//! inspects is either absent or of the right kind; absence and wrong
//! types are the structural validator's to report.

use serde_json::Value;

use crate::domain::errors::SemanticError;
use crate::domain::models::{AgentRole, CompiledSchema, Priority, SequenceGraph};

/// Inclusive lower bound for `time_constraint_minutes`.
pub const TIME_CONSTRAINT_MIN: i64 = 1;
/// Inclusive upper bound for `time_constraint_minutes`.
pub const TIME_CONSTRAINT_MAX: i64 = 60;

/// List-valued free-text fields subject to the trim rule.
const LIST_TEXT_FIELDS: [&str; 4] = [
    "quality_gates",
    "handoff_criteria",
    "output_specifications.acceptance_criteria",
    "input_requirements.required_validations",
];

/// Policy validator parameterised by the pipeline's sequence graph.
#[derive(Debug, Clone)]
pub struct SemanticValidator {
    graph: SequenceGraph,
}

impl SemanticValidator {
    /// Create a validator for the given sequence graph.
    pub fn new(graph: SequenceGraph) -> Self {
        Self { graph }
    }

    /// Validate every policy rule, returning all violations.
    pub fn validate(&self, schema: &CompiledSchema, payload: &Value) -> Vec<SemanticError> {
        let mut errors = Vec::new();

        let source = self.check_role(payload, "source_agent", &mut errors);
        let target = self.check_role(payload, "target_agent", &mut errors);

        if let Some(target) = target {
            if target != schema.schema.receiving_role {
                errors.push(SemanticError::WrongReceivingRole {
                    target: target.to_string(),
                    expected: schema.schema.receiving_role.to_string(),
                });
            }
        }

        if let (Some(source), Some(target)) = (source, target) {
            if !self.graph.allows(source, target) {
                errors.push(SemanticError::IllegalTransition {
                    from: source.to_string(),
                    target: target.to_string(),
                });
            }
        }

        if let Some(raw) = payload.get("priority_level").and_then(Value::as_str) {
            if Priority::from_str(raw).is_none() {
                errors.push(SemanticError::InvalidPriority {
                    value: raw.to_string(),
                });
            }
        }

        if let Some(value) = payload.get("time_constraint_minutes") {
            check_time_constraint(value, &mut errors);
        }

        for path in LIST_TEXT_FIELDS {
            check_list_presence(schema, payload, path, &mut errors);
        }

        errors
    }

    /// Normalize a payload in place: lowercase the priority level and trim
    /// free-text lists, dropping entries that are empty after trimming.
    ///
    /// Applied by the gate after a clean validation pass, so downstream
    /// consumers always see the canonical form.
    pub fn normalize(payload: &mut Value) {
        let normalized = payload
            .get("priority_level")
            .and_then(Value::as_str)
            .map(|raw| raw.trim().to_lowercase());
        if let Some(normalized) = normalized {
            payload["priority_level"] = Value::String(normalized);
        }

        for path in LIST_TEXT_FIELDS {
            if let Some(Value::Array(entries)) = lookup_mut(payload, path) {
                let trimmed: Vec<Value> = entries
                    .iter()
                    .filter_map(|entry| match entry {
                        Value::String(s) => {
                            let t = s.trim();
                            (!t.is_empty()).then(|| Value::String(t.to_string()))
                        }
                        other => Some(other.clone()),
                    })
                    .collect();
                *entries = trimmed;
            }
        }
    }

    /// Parse a role field, recording a violation for unrecognised values.
    fn check_role(
        &self,
        payload: &Value,
        field: &str,
        errors: &mut Vec<SemanticError>,
    ) -> Option<AgentRole> {
        let raw = payload.get(field).and_then(Value::as_str)?;
        match AgentRole::from_str(raw) {
            Some(role) => Some(role),
            None => {
                errors.push(SemanticError::InvalidAgent {
                    field: field.to_string(),
                    value: raw.to_string(),
                });
                None
            }
        }
    }
}

fn check_time_constraint(value: &Value, errors: &mut Vec<SemanticError>) {
    let Some(minutes) = value.as_i64() else {
        // A u64 too large for i64 is far beyond the upper bound; anything
        // non-integer was already a structural violation.
        if value.is_u64() {
            errors.push(SemanticError::TimeConstraintOutOfRange {
                value: i64::MAX,
                min: TIME_CONSTRAINT_MIN,
                max: TIME_CONSTRAINT_MAX,
            });
        }
        return;
    };
    if !(TIME_CONSTRAINT_MIN..=TIME_CONSTRAINT_MAX).contains(&minutes) {
        errors.push(SemanticError::TimeConstraintOutOfRange {
            value: minutes,
            min: TIME_CONSTRAINT_MIN,
            max: TIME_CONSTRAINT_MAX,
        });
    }
}

/// A required free-text list with no usable entries after trimming is not
/// considered present.
fn check_list_presence(
    schema: &CompiledSchema,
    payload: &Value,
    path: &str,
    errors: &mut Vec<SemanticError>,
) {
    let required = schema.rule(path).is_some_and(|r| r.required);
    if !required {
        return;
    }
    let entries = match lookup(payload, path) {
        Some(Value::Array(entries)) => entries,
        // Absence is a structural concern.
        _ => return,
    };
    let usable = entries
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .count();
    if usable == 0 {
        errors.push(SemanticError::EmptyCriteria {
            field: path.to_string(),
        });
    }
}

fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = payload;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn lookup_mut<'a>(payload: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = payload;
    for segment in path.split('.') {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::schema_templates::stage_input_schema;
    use crate::domain::models::{ContractSchema, FieldKind, FieldRule};
    use serde_json::json;

    fn pm_schema() -> CompiledSchema {
        stage_input_schema(AgentRole::ProjectManager)
            .compile()
            .unwrap()
    }

    fn validator() -> SemanticValidator {
        SemanticValidator::new(SequenceGraph::canonical())
    }

    fn valid_payload() -> Value {
        json!({
            "contract_version": "1.0.0",
            "story_id": "STORY-GH-42",
            "source_agent": "github",
            "target_agent": "project_manager",
            "description": "Add a quiz module for fire safety training",
            "priority_level": "high",
            "time_constraint_minutes": 30
        })
    }

    #[test]
    fn test_valid_payload_passes() {
        let errors = validator().validate(&pm_schema(), &valid_payload());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_unknown_source_agent_cited() {
        let mut payload = valid_payload();
        payload["source_agent"] = json!("product_owner");
        let errors = validator().validate(&pm_schema(), &payload);
        assert!(errors.iter().any(|e| matches!(
            e,
            SemanticError::InvalidAgent { field, value }
                if field == "source_agent" && value == "product_owner"
        )));
    }

    #[test]
    fn test_illegal_transition() {
        let mut payload = valid_payload();
        payload["source_agent"] = json!("developer");
        // developer -> project_manager is not an edge of the canonical graph.
        let errors = validator().validate(&pm_schema(), &payload);
        assert!(errors
            .iter()
            .any(|e| matches!(e, SemanticError::IllegalTransition { .. })));
    }

    #[test]
    fn test_wrong_receiving_role() {
        let mut payload = valid_payload();
        payload["target_agent"] = json!("developer");
        let errors = validator().validate(&pm_schema(), &payload);
        assert!(errors.iter().any(|e| matches!(
            e,
            SemanticError::WrongReceivingRole { expected, .. } if expected == "project_manager"
        )));
    }

    #[test]
    fn test_priority_case_insensitive_accept() {
        for level in ["low", "MEDIUM", "High", "cRiTiCaL"] {
            let mut payload = valid_payload();
            payload["priority_level"] = json!(level);
            let errors = validator().validate(&pm_schema(), &payload);
            assert!(errors.is_empty(), "'{level}' should be accepted: {errors:?}");
        }
    }

    #[test]
    fn test_priority_rejects_unknown() {
        let mut payload = valid_payload();
        payload["priority_level"] = json!("urgent");
        let errors = validator().validate(&pm_schema(), &payload);
        assert!(errors.iter().any(|e| matches!(
            e,
            SemanticError::InvalidPriority { value } if value == "urgent"
        )));
    }

    #[test]
    fn test_time_constraint_bounds() {
        for minutes in [1, 30, 60] {
            let mut payload = valid_payload();
            payload["time_constraint_minutes"] = json!(minutes);
            assert!(
                validator().validate(&pm_schema(), &payload).is_empty(),
                "{minutes} minutes should be accepted"
            );
        }
        for minutes in [0, 61, -5] {
            let mut payload = valid_payload();
            payload["time_constraint_minutes"] = json!(minutes);
            let errors = validator().validate(&pm_schema(), &payload);
            assert!(
                errors
                    .iter()
                    .any(|e| matches!(e, SemanticError::TimeConstraintOutOfRange { .. })),
                "{minutes} minutes should be rejected"
            );
        }
    }

    #[test]
    fn test_required_criteria_all_blank_is_empty() {
        // A schema that requires acceptance criteria.
        let definition = ContractSchema {
            contract_type: "qa_tester_input".to_string(),
            contract_version: "1.0.0".to_string(),
            receiving_role: AgentRole::QaTester,
            closed: false,
            fields: vec![FieldRule::required(
                "output_specifications.acceptance_criteria",
                FieldKind::Array,
            )],
        };
        let schema = definition.compile().unwrap();
        let payload = json!({
            "source_agent": "test_engineer",
            "target_agent": "qa_tester",
            "output_specifications": { "acceptance_criteria": ["  ", "\t"] }
        });
        let errors = validator().validate(&schema, &payload);
        assert!(errors.iter().any(|e| matches!(
            e,
            SemanticError::EmptyCriteria { field } if field == "output_specifications.acceptance_criteria"
        )));
    }

    #[test]
    fn test_normalize_lowercases_priority_and_trims_lists() {
        let mut payload = valid_payload();
        payload["priority_level"] = json!("  HIGH ");
        payload["quality_gates"] = json!(["  lint ", "", "tests", "   "]);
        SemanticValidator::normalize(&mut payload);
        assert_eq!(payload["priority_level"], json!("high"));
        assert_eq!(payload["quality_gates"], json!(["lint", "tests"]));
    }

    #[test]
    fn test_same_payload_same_verdict() {
        // Validation is pure: repeated calls agree.
        let payload = valid_payload();
        let schema = pm_schema();
        let v = validator();
        let first = v.validate(&schema, &payload);
        let second = v.validate(&schema, &payload);
        assert_eq!(first, second);
    }
}
