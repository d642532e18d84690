//! Filesystem schema source.
//!
//! Loads every `*.yaml` / `*.yml` document in a configured directory as a
//! contract schema. Any unreadable or unparseable file fails the whole
//! load: a broken schema source is a startup error, not something to skip
//! past at request time.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::ContractSchema;
use crate::domain::ports::SchemaSource;

/// Schema source backed by a directory of YAML documents.
#[derive(Debug, Clone)]
pub struct DirectorySchemaSource {
    dir: PathBuf,
}

impl DirectorySchemaSource {
    /// Create a source over the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this source reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SchemaSource for DirectorySchemaSource {
    async fn load_schemas(&self) -> GateResult<Vec<ContractSchema>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            GateError::Registry(format!(
                "cannot read schema directory {}: {e}",
                self.dir.display()
            ))
        })?;

        // Deterministic load order regardless of directory iteration order.
        let mut paths: Vec<PathBuf> = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            GateError::Registry(format!(
                "cannot read schema directory {}: {e}",
                self.dir.display()
            ))
        })? {
            let path = entry.path();
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
            if is_yaml {
                paths.push(path);
            }
        }
        paths.sort();

        let mut schemas = Vec::with_capacity(paths.len());
        for path in paths {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                GateError::Registry(format!("cannot read schema file {}: {e}", path.display()))
            })?;
            let schema: ContractSchema = serde_yaml::from_str(&content).map_err(|e| {
                GateError::Registry(format!("malformed schema file {}: {e}", path.display()))
            })?;
            debug!(
                path = %path.display(),
                contract_type = schema.contract_type,
                version = schema.contract_version,
                "loaded schema document"
            );
            schemas.push(schema);
        }

        Ok(schemas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::schema_templates::stage_input_schema;
    use crate::domain::models::AgentRole;
    use std::io::Write;

    fn write_schema(dir: &Path, name: &str, schema: &ContractSchema) {
        let yaml = serde_yaml::to_string(schema).unwrap();
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_loads_yaml_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(
            dir.path(),
            "project_manager_input.yaml",
            &stage_input_schema(AgentRole::ProjectManager),
        );
        write_schema(
            dir.path(),
            "developer_input.yml",
            &stage_input_schema(AgentRole::Developer),
        );
        // Non-YAML files are ignored.
        std::fs::write(dir.path().join("README.md"), "not a schema").unwrap();

        let source = DirectorySchemaSource::new(dir.path());
        let schemas = source.load_schemas().await.unwrap();
        assert_eq!(schemas.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_directory_is_fatal() {
        let source = DirectorySchemaSource::new("/nonexistent/stagegate/schemas");
        let err = source.load_schemas().await.unwrap_err();
        assert!(matches!(err, GateError::Registry(_)));
    }

    #[tokio::test]
    async fn test_malformed_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(
            dir.path(),
            "ok.yaml",
            &stage_input_schema(AgentRole::Developer),
        );
        std::fs::write(dir.path().join("broken.yaml"), "fields: [not: a: schema").unwrap();

        let source = DirectorySchemaSource::new(dir.path());
        let err = source.load_schemas().await.unwrap_err();
        match err {
            GateError::Registry(msg) => assert!(msg.contains("broken.yaml")),
            other => panic!("expected Registry error, got {other}"),
        }
    }
}
