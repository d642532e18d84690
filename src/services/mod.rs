//! Service layer: schema registry, validators, and the contract factory.

pub mod factory;
pub mod registry;
pub mod semantic;
pub mod structural;

pub use factory::{ContractFactory, ManualRequest};
pub use registry::{SchemaRegistry, SharedRegistry};
pub use semantic::{SemanticValidator, TIME_CONSTRAINT_MAX, TIME_CONSTRAINT_MIN};
pub use structural::StructuralValidator;
