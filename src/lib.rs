//! Stagegate - Contract Validation Gate
//!
//! Stagegate is the schema-driven gate that sits between producer and
//! consumer agents in a multi-stage feature pipeline, ensuring structural
//! and semantic correctness of handoff payloads before they cross an agent
//! boundary.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models, errors, and ports
//! - **Service Layer** (`services`): Schema registry, validators, factory
//! - **Application Layer** (`application`): The stage-boundary gate
//! - **Adapters** (`adapters`): GitHub issue tracker, filesystem schema store
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use stagegate::application::ContractGate;
//! use stagegate::domain::models::SequenceGraph;
//! use stagegate::services::{SchemaRegistry, SharedRegistry};
//!
//! let gate = ContractGate::new(
//!     SharedRegistry::new(SchemaRegistry::with_builtins()),
//!     SequenceGraph::canonical(),
//! );
//!
//! let payload = serde_json::json!({
//!     "contract_version": "1.0.0",
//!     "story_id": "STORY-GH-42",
//!     "source_agent": "github",
//!     "target_agent": "project_manager",
//!     "description": "Add a quiz module for fire safety training",
//!     "priority_level": "high",
//!     "time_constraint_minutes": 30
//! });
//!
//! let outcome = gate.validate(&payload).unwrap();
//! assert!(outcome.may_advance());
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{ContractGate, GateOutcome, ValidationReport};
pub use domain::errors::{GateError, GateResult, SemanticError, StructuralError};
pub use domain::models::{
    AgentRole, Config, Contract, ContractSchema, DnaCompliance, ExternalIssue, Priority,
    SequenceGraph,
};
pub use domain::ports::SchemaSource;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ContractFactory, ManualRequest, SchemaRegistry, SharedRegistry};
