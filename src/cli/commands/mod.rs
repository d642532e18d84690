//! CLI command implementations.

pub mod ingest;
pub mod init;
pub mod schema;
pub mod validate;

use anyhow::{anyhow, Context, Result};

use crate::adapters::DirectorySchemaSource;
use crate::application::ContractGate;
use crate::domain::models::Config;
use crate::services::{SchemaRegistry, SharedRegistry};

/// Build the gate from configuration: load the schema registry from the
/// configured directory and wire in the pipeline sequence graph.
pub(crate) async fn build_gate(config: &Config) -> Result<ContractGate> {
    let registry = load_registry(config).await?;
    let graph = config
        .pipeline
        .to_graph()
        .map_err(|role| anyhow!("unknown agent role '{role}' in pipeline configuration"))?;
    Ok(ContractGate::new(SharedRegistry::new(registry), graph))
}

/// Load the schema registry from the configured directory.
pub(crate) async fn load_registry(config: &Config) -> Result<SchemaRegistry> {
    let source = DirectorySchemaSource::new(&config.schema_dir);
    SchemaRegistry::from_source(&source).await.with_context(|| {
        format!(
            "failed to load schemas from '{}' (run 'stagegate init' to scaffold a project)",
            config.schema_dir
        )
    })
}
