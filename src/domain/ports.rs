//! Port traits for external collaborators.
//!
//! The validation layer talks to the outside world exclusively through
//! these traits, keeping the domain decoupled from any specific schema
//! store or issue tracker.

use async_trait::async_trait;

use crate::domain::errors::GateResult;
use crate::domain::models::ContractSchema;

/// Port for loading contract schema definitions.
///
/// Implementations read every schema document from their backing store in
/// one shot; the registry is built from the result at process start and
/// treated as immutable afterwards. A missing or malformed source is a
/// fatal load error, never a per-request one.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Load every schema definition from the source.
    async fn load_schemas(&self) -> GateResult<Vec<ContractSchema>>;
}
