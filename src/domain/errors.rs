//! Domain errors for the stagegate contract validation layer.
//!
//! Two distinct error surfaces exist here. [`GateError`] is the hard-failure
//! enum for operations that cannot proceed at all (no schema registered,
//! unmappable external payload, broken schema source). Structural and
//! semantic violations are NOT errors in that sense: they are collected into
//! lists so a caller sees every problem with a payload at once, and an empty
//! pair of lists is the only pass state.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Hard failures in the validation layer.
#[derive(Debug, Error)]
pub enum GateError {
    /// No schema is registered for the requested type and version.
    #[error("no schema registered for contract type '{contract_type}' version '{version}'")]
    SchemaNotFound {
        /// Requested contract type.
        contract_type: String,
        /// Requested contract version.
        version: String,
    },

    /// The factory could not derive a required field from an external payload.
    #[error("cannot map external payload: {0}")]
    Mapping(String),

    /// The schema source could not be loaded. Fatal at startup.
    #[error("schema registry error: {0}")]
    Registry(String),

    /// A schema definition is internally inconsistent. Fatal at startup.
    #[error("invalid schema definition '{name}': {reason}")]
    InvalidSchema {
        /// Contract type of the offending schema.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An external collaborator (e.g. the issue tracker) failed.
    #[error("external service error: {0}")]
    External(String),
}

/// Convenience alias used throughout the crate.
pub type GateResult<T> = Result<T, GateError>;

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for GateError {
    fn from(err: serde_yaml::Error) -> Self {
        GateError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        GateError::External(err.to_string())
    }
}

/// One structural violation: the payload's shape disagrees with the schema.
///
/// Collected, never thrown individually; the structural validator reports
/// every violation it finds in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralError {
    /// Dot-separated path of the offending field.
    pub field_path: String,
    /// The expected type or constraint.
    pub expected: String,
    /// The actual value's type, or `missing` / `unexpected`.
    pub actual: String,
}

impl StructuralError {
    /// A required field is absent.
    pub fn missing(path: &str, expected: &str) -> Self {
        Self {
            field_path: path.to_string(),
            expected: expected.to_string(),
            actual: "missing".to_string(),
        }
    }

    /// A field holds a value of the wrong type.
    pub fn wrong_type(path: &str, expected: &str, actual: &serde_json::Value) -> Self {
        Self {
            field_path: path.to_string(),
            expected: expected.to_string(),
            actual: crate::domain::models::schema::FieldKind::name_of(actual).to_string(),
        }
    }

    /// A field violates a value constraint (enum membership, pattern, bounds).
    pub fn constraint(path: &str, expected: String, actual: String) -> Self {
        Self {
            field_path: path.to_string(),
            expected,
            actual,
        }
    }

    /// The payload carries a field the closed schema does not declare.
    pub fn unknown_field(path: &str) -> Self {
        Self {
            field_path: path.to_string(),
            expected: "no such field in schema".to_string(),
            actual: "unexpected".to_string(),
        }
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.field_path, self.expected, self.actual
        )
    }
}

/// One semantic violation: the payload's shape is fine, but a cross-field
/// business rule is not satisfied.
///
/// Reported as a separate collection from structural errors so callers can
/// distinguish "malformed" from "disallowed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SemanticError {
    /// A role field names something outside the closed agent set.
    #[error("{field}: '{value}' is not a recognised agent role")]
    InvalidAgent {
        /// The offending field (`source_agent` or `target_agent`).
        field: String,
        /// The value found.
        value: String,
    },

    /// The `source -> target` pair is not an edge of the sequence graph.
    #[error("transition '{from}' -> '{target}' is not allowed by the pipeline sequence")]
    IllegalTransition {
        /// Sending role.
        #[serde(rename = "source")]
        from: String,
        /// Receiving role.
        target: String,
    },

    /// The contract is addressed to a role other than the schema's receiver.
    #[error("target_agent '{target}' does not match the schema's receiving role '{expected}'")]
    WrongReceivingRole {
        /// The payload's target.
        target: String,
        /// The receiving role the schema declares.
        expected: String,
    },

    /// `priority_level` is outside the closed priority set.
    #[error("priority_level '{value}' is not one of low, medium, high, critical")]
    InvalidPriority {
        /// The value found.
        value: String,
    },

    /// `time_constraint_minutes` is outside the allowed range.
    #[error("time_constraint_minutes {value} is outside the allowed range {min}..={max}")]
    TimeConstraintOutOfRange {
        /// The value found.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// A required list of free-text entries is empty once trimmed.
    #[error("{field} has no non-empty entries")]
    EmptyCriteria {
        /// The offending list field.
        field: String,
    },
}
