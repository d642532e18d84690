//! Application layer: the stage-boundary gate.

pub mod gate;

pub use gate::{ContractGate, GateOutcome, ValidationReport};
