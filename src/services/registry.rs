//! Contract schema registry.
//!
//! Maps `(contract_type, contract_version)` to a compiled structural schema.
//! The registry is built once from a [`SchemaSource`] at process start and
//! never mutated; hot reload swaps a whole new snapshot in atomically via
//! [`SharedRegistry`], so concurrent readers never observe a half-updated
//! registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::{CompiledSchema, ContractSchema};
use crate::domain::ports::SchemaSource;

/// Immutable snapshot of every registered schema.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<(String, String), CompiledSchema>,
}

impl SchemaRegistry {
    /// Compile and register the given schema definitions.
    ///
    /// Fails on the first schema that does not compile, and on duplicate
    /// `(contract_type, contract_version)` keys. Both are configuration
    /// mistakes that must surface at startup.
    pub fn from_schemas(definitions: Vec<ContractSchema>) -> GateResult<Self> {
        let mut schemas = HashMap::with_capacity(definitions.len());

        for definition in definitions {
            let key = definition.key();
            let compiled = definition.compile()?;
            if schemas.insert(key.clone(), compiled).is_some() {
                return Err(GateError::Registry(format!(
                    "duplicate schema for contract type '{}' version '{}'",
                    key.0, key.1
                )));
            }
        }

        Ok(Self { schemas })
    }

    /// Build a registry by loading every schema from the source.
    pub async fn from_source(source: &dyn SchemaSource) -> GateResult<Self> {
        let definitions = source.load_schemas().await?;
        let registry = Self::from_schemas(definitions)?;
        info!(schemas = registry.len(), "schema registry loaded");
        Ok(registry)
    }

    /// A registry preloaded with the built-in stage-input schemas.
    pub fn with_builtins() -> Self {
        Self::from_schemas(crate::domain::models::schema_templates::builtin_schemas())
            .expect("built-in schemas always compile")
    }

    /// Resolve a contract type and version to its compiled schema.
    pub fn resolve(&self, contract_type: &str, version: &str) -> GateResult<&CompiledSchema> {
        self.schemas
            .get(&(contract_type.to_string(), version.to_string()))
            .ok_or_else(|| GateError::SchemaNotFound {
                contract_type: contract_type.to_string(),
                version: version.to_string(),
            })
    }

    /// Iterate over every registered schema.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledSchema> {
        self.schemas.values()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Atomically swappable handle to the current registry snapshot.
///
/// Readers clone the inner `Arc` and keep validating against the snapshot
/// they took even while a reload swaps the handle; in-place mutation of a
/// published registry is impossible.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Arc<SchemaRegistry>>>,
}

impl SharedRegistry {
    /// Wrap an initial registry snapshot.
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<SchemaRegistry> {
        self.inner
            .read()
            .expect("registry lock poisoned")
            .clone()
    }

    /// Replace the current snapshot with a freshly built registry.
    pub fn swap(&self, registry: SchemaRegistry) {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        *guard = Arc::new(registry);
        info!(schemas = guard.len(), "schema registry snapshot swapped");
    }
}
