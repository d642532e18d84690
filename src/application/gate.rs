//! The contract gate: the stage-boundary validation entry point.
//!
//! Resolves the payload's schema, runs the structural pass, and only when
//! that pass is clean runs the semantic pass. Violations come back as two
//! separate collections so callers can tell "malformed" from "disallowed";
//! any non-empty collection means the contract must not advance to its
//! target stage.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::errors::{GateResult, SemanticError, StructuralError};
use crate::domain::models::SequenceGraph;
use crate::services::{SemanticValidator, SharedRegistry, StructuralValidator};

/// The outcome of one validation pass over one payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Shape violations, in schema rule order.
    pub structural: Vec<StructuralError>,
    /// Policy violations. Always empty when `structural` is non-empty,
    /// because the semantic pass only runs on structurally sound payloads.
    pub semantic: Vec<SemanticError>,
}

impl ValidationReport {
    /// Whether the payload passed both validation passes.
    pub fn passed(&self) -> bool {
        self.structural.is_empty() && self.semantic.is_empty()
    }

    /// Total number of violations across both collections.
    pub fn error_count(&self) -> usize {
        self.structural.len() + self.semantic.len()
    }
}

/// A gate decision: the report, plus the normalized payload when it passed.
#[derive(Debug, Clone, Serialize)]
pub struct GateOutcome {
    /// Contract type the payload was validated as.
    pub contract_type: String,
    /// All violations found.
    pub report: ValidationReport,
    /// The payload in canonical form (priority lowercased, free-text lists
    /// trimmed). Present only when the report is clean.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<Value>,
}

impl GateOutcome {
    /// Whether the contract may advance to its target stage.
    pub fn may_advance(&self) -> bool {
        self.report.passed()
    }
}

/// Stage-boundary validation gate.
///
/// Stateless per call: the same payload and schema snapshot always produce
/// the same verdict, so callers may validate concurrently without
/// coordination.
#[derive(Debug, Clone)]
pub struct ContractGate {
    registry: SharedRegistry,
    structural: StructuralValidator,
    semantic: SemanticValidator,
}

impl ContractGate {
    /// Create a gate over a registry snapshot handle and a sequence graph.
    pub fn new(registry: SharedRegistry, graph: SequenceGraph) -> Self {
        Self {
            registry,
            structural: StructuralValidator::new(),
            semantic: SemanticValidator::new(graph),
        }
    }

    /// Validate a payload as the given contract type.
    ///
    /// The schema version is read from the payload's `contract_version`
    /// field; a missing or non-string version is reported as a structural
    /// error (the schema cannot even be resolved). An unregistered
    /// type+version pair is a hard [`GateError::SchemaNotFound`].
    pub fn validate_as(&self, contract_type: &str, payload: &Value) -> GateResult<GateOutcome> {
        let Some(version) = payload.get("contract_version").and_then(Value::as_str) else {
            return Ok(self.blocked_without_schema(contract_type, payload));
        };

        let registry = self.registry.snapshot();
        let schema = registry.resolve(contract_type, version)?;

        let mut report = ValidationReport {
            structural: self.structural.validate(schema, payload),
            semantic: Vec::new(),
        };

        // Structural soundness is a strict precondition of the policy pass.
        if report.structural.is_empty() {
            report.semantic = self.semantic.validate(schema, payload);
        }

        let story_id = payload.get("story_id").and_then(Value::as_str).unwrap_or("-");
        let contract = if report.passed() {
            info!(
                contract_type,
                version, story_id, "contract passed the gate"
            );
            let mut normalized = payload.clone();
            SemanticValidator::normalize(&mut normalized);
            Some(normalized)
        } else {
            warn!(
                contract_type,
                version,
                story_id,
                structural = report.structural.len(),
                semantic = report.semantic.len(),
                "contract blocked at the gate"
            );
            None
        };

        Ok(GateOutcome {
            contract_type: contract_type.to_string(),
            report,
            contract,
        })
    }

    /// Validate a payload, deriving the contract type from its own
    /// `target_agent` field via the `<role>_input` convention.
    ///
    /// A contract addressed to stage X is only valid input for stage X, so
    /// the stage-input schema of the declared target is the one to check
    /// against. Stages validating their inbox should prefer
    /// [`validate_as`](Self::validate_as) with their own type so that
    /// misaddressed contracts are caught.
    pub fn validate(&self, payload: &Value) -> GateResult<GateOutcome> {
        let Some(target) = payload.get("target_agent").and_then(Value::as_str) else {
            return Ok(self.blocked_without_schema("unknown", payload));
        };

        // A target outside the closed role set has no stage-input schema to
        // resolve; report the role violation instead of a lookup failure.
        let Some(role) = crate::domain::models::AgentRole::from_str(target) else {
            warn!(target, "payload addressed to an unrecognised role");
            return Ok(GateOutcome {
                contract_type: "unknown".to_string(),
                report: ValidationReport {
                    structural: Vec::new(),
                    semantic: vec![SemanticError::InvalidAgent {
                        field: "target_agent".to_string(),
                        value: target.to_string(),
                    }],
                },
                contract: None,
            });
        };

        let contract_type = format!("{role}_input");
        self.validate_as(&contract_type, payload)
    }

    /// Report a payload that cannot even be routed to a schema.
    ///
    /// The missing routing field is reported structurally so the caller
    /// still gets a complete picture of what is absent.
    fn blocked_without_schema(&self, contract_type: &str, payload: &Value) -> GateOutcome {
        let mut structural = Vec::new();
        if payload
            .get("contract_version")
            .and_then(Value::as_str)
            .is_none()
        {
            structural.push(StructuralError::missing("contract_version", "string"));
        }
        if payload.get("target_agent").and_then(Value::as_str).is_none() {
            structural.push(StructuralError::missing("target_agent", "string"));
        }
        warn!(contract_type, "payload cannot be routed to a schema");
        GateOutcome {
            contract_type: contract_type.to_string(),
            report: ValidationReport {
                structural,
                semantic: Vec::new(),
            },
            contract: None,
        }
    }
}
