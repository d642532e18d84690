//! Structural contract schemas.
//!
//! A schema is the per-version shape definition for one contract type: an
//! ordered list of field rules evaluated in a single pass by the structural
//! validator. Schemas are authored as YAML documents (one per
//! `(contract_type, contract_version)` pair) and compiled once at registry
//! load time; a pattern that fails to compile is a startup error, never a
//! per-request one.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::agent::AgentRole;
use crate::domain::errors::GateError;

fn default_true() -> bool {
    true
}

/// Shape definition for one contract type at one version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSchema {
    /// Contract type this schema governs, e.g. `project_manager_input`.
    pub contract_type: String,
    /// Semantic version of the contract shape.
    pub contract_version: String,
    /// The one role allowed to receive contracts of this type.
    pub receiving_role: AgentRole,
    /// When true, top-level fields not named by any rule are rejected.
    #[serde(default = "default_true")]
    pub closed: bool,
    /// Ordered field rules, evaluated in a single pass.
    pub fields: Vec<FieldRule>,
}

/// One structural rule: a field path, its expected kind, and optional
/// constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldRule {
    /// Dot-separated path from the payload root, e.g.
    /// `dna_compliance.design_principles`.
    pub path: String,
    /// Expected JSON kind at the path.
    pub kind: FieldKind,
    /// Whether the field must be present.
    #[serde(default = "default_true")]
    pub required: bool,
    /// For string fields: the closed set of accepted values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,
    /// For string fields: a regex the value must match in full.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// For integer fields: inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// For integer fields: inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl FieldRule {
    /// A required field of the given kind with no further constraints.
    pub fn required(path: &str, kind: FieldKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
            required: true,
            one_of: None,
            pattern: None,
            min: None,
            max: None,
        }
    }

    /// An optional field of the given kind.
    pub fn optional(path: &str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(path, kind)
        }
    }

    /// Attach a regex constraint (string fields).
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    /// Attach a closed value set (string fields).
    pub fn with_one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// The JSON kinds a field rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON number without a fractional part.
    Integer,
    /// Any JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
}

impl FieldKind {
    /// Whether the value is of this kind.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Name of a JSON value's actual kind, for error messages.
    pub fn name_of(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

/// A schema with its regex constraints compiled, ready for validation.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    /// The schema definition.
    pub schema: ContractSchema,
    /// Compiled patterns, keyed by field path.
    patterns: HashMap<String, Regex>,
}

impl CompiledSchema {
    /// The compiled pattern for a field path, if the rule declares one.
    pub fn pattern(&self, path: &str) -> Option<&Regex> {
        self.patterns.get(path)
    }

    /// The rule for an exact field path, if any.
    pub fn rule(&self, path: &str) -> Option<&FieldRule> {
        self.schema.fields.iter().find(|r| r.path == path)
    }
}

impl ContractSchema {
    /// Registry key for this schema.
    pub fn key(&self) -> (String, String) {
        (self.contract_type.clone(), self.contract_version.clone())
    }

    /// Compile the schema's pattern constraints and check the definition
    /// for internal consistency.
    ///
    /// Returns [`GateError::InvalidSchema`] on an empty field path, a
    /// pattern that fails to compile, or inverted min/max bounds.
    pub fn compile(self) -> Result<CompiledSchema, GateError> {
        let mut patterns = HashMap::new();

        for rule in &self.fields {
            if rule.path.trim().is_empty() {
                return Err(GateError::InvalidSchema {
                    name: self.contract_type.clone(),
                    reason: "field rule with empty path".to_string(),
                });
            }

            if let (Some(min), Some(max)) = (rule.min, rule.max) {
                if min > max {
                    return Err(GateError::InvalidSchema {
                        name: self.contract_type.clone(),
                        reason: format!("field '{}' has min {min} > max {max}", rule.path),
                    });
                }
            }

            if let Some(pattern) = &rule.pattern {
                let regex = Regex::new(pattern).map_err(|e| GateError::InvalidSchema {
                    name: self.contract_type.clone(),
                    reason: format!("field '{}' has invalid pattern: {e}", rule.path),
                })?;
                patterns.insert(rule.path.clone(), regex);
            }
        }

        Ok(CompiledSchema {
            schema: self,
            patterns,
        })
    }
}
