//! Structural payload validation.
//!
//! Checks a raw payload's shape against a compiled schema: required fields,
//! field kinds, enum membership, pattern constraints, numeric bounds, and
//! unknown-field rejection for closed schemas. Every violation found in the
//! single pass is reported; nothing is coerced and nothing short-circuits,
//! so a caller sees all problems at once.

use serde_json::Value;

use crate::domain::errors::StructuralError;
use crate::domain::models::{CompiledSchema, FieldKind, FieldRule};

/// Result of resolving a dot-separated path inside a payload.
enum Lookup<'a> {
    /// The path resolves to a value.
    Found(&'a Value),
    /// The path (or an ancestor) is absent.
    Missing,
    /// An ancestor exists but is not an object, so the path cannot be
    /// resolved. The ancestor's own rule reports the type error; the
    /// descendant stays silent to avoid cascading noise.
    Blocked,
}

/// Stateless single-pass structural validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    /// Create a new validator instance.
    pub fn new() -> Self {
        Self
    }

    /// Validate a payload against the schema, returning every violation.
    ///
    /// An empty list is the only pass state.
    pub fn validate(&self, schema: &CompiledSchema, payload: &Value) -> Vec<StructuralError> {
        let Some(root) = payload.as_object() else {
            return vec![StructuralError::wrong_type("$", "object", payload)];
        };

        let mut errors = Vec::new();

        for rule in &schema.schema.fields {
            match lookup(payload, &rule.path) {
                Lookup::Missing => {
                    if rule.required {
                        errors.push(StructuralError::missing(&rule.path, rule.kind.name()));
                    }
                }
                Lookup::Blocked => {}
                Lookup::Found(value) => {
                    if !rule.kind.matches(value) {
                        errors.push(StructuralError::wrong_type(
                            &rule.path,
                            rule.kind.name(),
                            value,
                        ));
                        continue;
                    }
                    check_constraints(schema, rule, value, &mut errors);
                }
            }
        }

        if schema.schema.closed {
            let declared: Vec<&str> = schema
                .schema
                .fields
                .iter()
                .map(|r| top_segment(&r.path))
                .collect();
            for key in root.keys() {
                if !declared.contains(&key.as_str()) {
                    errors.push(StructuralError::unknown_field(key));
                }
            }
        }

        errors
    }
}

/// Check the value constraints of a rule whose kind already matched.
fn check_constraints(
    schema: &CompiledSchema,
    rule: &FieldRule,
    value: &Value,
    errors: &mut Vec<StructuralError>,
) {
    if let Some(allowed) = &rule.one_of {
        // Kind matched, so the value is a string here.
        if let Some(s) = value.as_str() {
            if !allowed.iter().any(|a| a == s) {
                errors.push(StructuralError::constraint(
                    &rule.path,
                    format!("one of [{}]", allowed.join(", ")),
                    format!("'{s}'"),
                ));
            }
        }
    }

    if let Some(regex) = schema.pattern(&rule.path) {
        if let Some(s) = value.as_str() {
            if !regex.is_match(s) {
                errors.push(StructuralError::constraint(
                    &rule.path,
                    format!("string matching {}", regex.as_str()),
                    format!("'{s}'"),
                ));
            }
        }
    }

    if rule.kind == FieldKind::Integer {
        if let Some(n) = value.as_i64() {
            if let Some(min) = rule.min {
                if n < min {
                    errors.push(StructuralError::constraint(
                        &rule.path,
                        format!("integer >= {min}"),
                        n.to_string(),
                    ));
                }
            }
            if let Some(max) = rule.max {
                if n > max {
                    errors.push(StructuralError::constraint(
                        &rule.path,
                        format!("integer <= {max}"),
                        n.to_string(),
                    ));
                }
            }
        }
    }
}

/// Resolve a dot-separated path against the payload.
fn lookup<'a>(payload: &'a Value, path: &str) -> Lookup<'a> {
    let mut current = payload;
    for segment in path.split('.') {
        let Some(object) = current.as_object() else {
            return Lookup::Blocked;
        };
        match object.get(segment) {
            Some(value) => current = value,
            None => return Lookup::Missing,
        }
    }
    Lookup::Found(current)
}

/// First segment of a dot-separated path.
fn top_segment(path: &str) -> &str {
    path.split('.').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::schema_templates::stage_input_schema;
    use crate::domain::models::{AgentRole, ContractSchema};
    use serde_json::json;

    fn pm_schema() -> CompiledSchema {
        stage_input_schema(AgentRole::ProjectManager)
            .compile()
            .unwrap()
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
        let errors = StructuralValidator::new().validate(&pm_schema(), &valid_payload());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let payload = json!({ "contract_version": "1.0.0" });
        let errors = StructuralValidator::new().validate(&pm_schema(), &payload);
        // story_id, source_agent, target_agent, description, priority_level,
        // time_constraint_minutes are all missing.
        assert!(errors.len() >= 6, "expected >= 6 errors, got {errors:?}");
        assert!(errors.iter().any(|e| e.field_path == "story_id"));
        assert!(errors
            .iter()
            .any(|e| e.field_path == "time_constraint_minutes"));
    }

    #[test]
    fn test_wrong_type_flags_exact_path() {
        let mut payload = valid_payload();
        payload["dna_compliance"] = json!("all good");
        let errors = StructuralValidator::new().validate(&pm_schema(), &payload);
        let dna_errors: Vec<_> = errors
            .iter()
            .filter(|e| e.field_path == "dna_compliance")
            .collect();
        assert_eq!(dna_errors.len(), 1);
        assert_eq!(dna_errors[0].expected, "object");
        assert_eq!(dna_errors[0].actual, "string");
    }

    #[test]
    fn test_blocked_descendants_not_double_reported() {
        let mut payload = valid_payload();
        payload["dna_compliance"] = json!("all good");
        let errors = StructuralValidator::new().validate(&pm_schema(), &payload);
        // The design_principles rule lives under dna_compliance; it must not
        // add a second error when the parent already failed its type check.
        assert!(errors
            .iter()
            .all(|e| e.field_path != "dna_compliance.design_principles"));
    }

    #[test]
    fn test_list_where_object_required_is_an_error() {
        let mut payload = valid_payload();
        payload["input_requirements"] = json!(["files"]);
        let errors = StructuralValidator::new().validate(&pm_schema(), &payload);
        assert!(errors
            .iter()
            .any(|e| e.field_path == "input_requirements" && e.actual == "array"));
    }

    #[test]
    fn test_garbage_payload_does_not_pass() {
        let payload = json!({ "invalid": "data", "missing": "required fields" });
        let errors = StructuralValidator::new().validate(&pm_schema(), &payload);
        assert!(!errors.is_empty());
        // Both unknown fields are also individually reported.
        assert!(errors.iter().any(|e| e.field_path == "invalid"));
        assert!(errors.iter().any(|e| e.field_path == "missing"));
    }

    #[test]
    fn test_non_object_payload() {
        let errors = StructuralValidator::new().validate(&pm_schema(), &json!([1, 2, 3]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_path, "$");
    }

    #[test]
    fn test_pattern_constraint() {
        let mut payload = valid_payload();
        payload["story_id"] = json!("not-a-story-id");
        let errors = StructuralValidator::new().validate(&pm_schema(), &payload);
        assert!(errors
            .iter()
            .any(|e| e.field_path == "story_id" && e.actual.contains("not-a-story-id")));
    }

    #[test]
    fn test_unknown_top_level_field_rejected_when_closed() {
        let mut payload = valid_payload();
        payload["surprise"] = json!(1);
        let errors = StructuralValidator::new().validate(&pm_schema(), &payload);
        assert!(errors.iter().any(|e| e.field_path == "surprise"));
    }

    #[test]
    fn test_open_schema_tolerates_extra_fields() {
        let mut definition = stage_input_schema(AgentRole::ProjectManager);
        definition.closed = false;
        let schema = definition.compile().unwrap();
        let mut payload = valid_payload();
        payload["surprise"] = json!(1);
        let errors = StructuralValidator::new().validate(&schema, &payload);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_one_of_constraint() {
        let definition = ContractSchema {
            contract_type: "t".to_string(),
            contract_version: "1.0.0".to_string(),
            receiving_role: AgentRole::Developer,
            closed: false,
            fields: vec![crate::domain::models::FieldRule::required(
                "state",
                FieldKind::String,
            )
            .with_one_of(["open", "closed"])],
        };
        let schema = definition.compile().unwrap();
        let errors = StructuralValidator::new().validate(&schema, &json!({ "state": "weird" }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].expected.contains("open"));
    }

    #[test]
    fn test_integer_bounds() {
        let mut rule = crate::domain::models::FieldRule::required("n", FieldKind::Integer);
        rule.min = Some(1);
        rule.max = Some(10);
        let definition = ContractSchema {
            contract_type: "t".to_string(),
            contract_version: "1.0.0".to_string(),
            receiving_role: AgentRole::Developer,
            closed: false,
            fields: vec![rule],
        };
        let schema = definition.compile().unwrap();
        let v = StructuralValidator::new();
        assert!(v.validate(&schema, &json!({ "n": 5 })).is_empty());
        assert_eq!(v.validate(&schema, &json!({ "n": 0 })).len(), 1);
        assert_eq!(v.validate(&schema, &json!({ "n": 11 })).len(), 1);
    }
}
