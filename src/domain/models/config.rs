//! Configuration model for the stagegate CLI and validation layer.
//!
//! Loaded via figment with hierarchical merging; see
//! `infrastructure::config::ConfigLoader`.

use serde::{Deserialize, Serialize};

use super::agent::{AgentRole, SequenceGraph};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one YAML schema document per contract type+version.
    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,
    /// Pipeline sequence configuration.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// GitHub issue source configuration.
    #[serde(default)]
    pub github: GitHubConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            pipeline: PipelineConfig::default(),
            github: GitHubConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_schema_dir() -> String {
    ".stagegate/schemas".to_string()
}

/// The allowed stage transitions, as configuration.
///
/// The validator treats the sequence graph as explicit input rather than
/// hard-coding the stage order; the default is the canonical seven-stage
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Legal `from -> to` handoffs.
    #[serde(default = "default_transitions")]
    pub transitions: Vec<Transition>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            transitions: default_transitions(),
        }
    }
}

/// One legal handoff edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// Sending role name.
    pub from: String,
    /// Receiving role name.
    pub to: String,
}

fn default_transitions() -> Vec<Transition> {
    let chain = [
        ("github", "project_manager"),
        ("project_manager", "game_designer"),
        ("game_designer", "developer"),
        ("developer", "test_engineer"),
        ("test_engineer", "qa_tester"),
        ("qa_tester", "quality_reviewer"),
        ("quality_reviewer", "project_manager"),
    ];
    chain
        .into_iter()
        .map(|(from, to)| Transition {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect()
}

impl PipelineConfig {
    /// Build the typed sequence graph from the configured role names.
    ///
    /// Returns the first unrecognised role name as the error value.
    pub fn to_graph(&self) -> Result<SequenceGraph, String> {
        let mut edges = Vec::with_capacity(self.transitions.len());
        for t in &self.transitions {
            let from = AgentRole::from_str(&t.from).ok_or_else(|| t.from.clone())?;
            let to = AgentRole::from_str(&t.to).ok_or_else(|| t.to.clone())?;
            edges.push((from, to));
        }
        Ok(SequenceGraph::new(edges))
    }
}

/// GitHub issue source settings, used by `stagegate ingest issue --number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Repository owner (user or organisation).
    #[serde(default)]
    pub owner: String,
    /// Repository name.
    #[serde(default)]
    pub repo: String,
    /// Base URL of the GitHub REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Environment variable the access token is read from.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            api_url: default_api_url(),
            token_env: default_token_env(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, or error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transitions_form_canonical_graph() {
        let config = Config::default();
        let graph = config.pipeline.to_graph().unwrap();
        assert_eq!(graph, SequenceGraph::canonical());
    }

    #[test]
    fn test_to_graph_reports_bad_role() {
        let pipeline = PipelineConfig {
            transitions: vec![Transition {
                from: "github".to_string(),
                to: "intern".to_string(),
            }],
        };
        assert_eq!(pipeline.to_graph().unwrap_err(), "intern");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
schema_dir: /etc/stagegate/schemas
pipeline:
  transitions:
    - { from: github, to: project_manager }
github:
  owner: my-org
  repo: training-platform
logging:
  level: debug
  format: json
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.schema_dir, "/etc/stagegate/schemas");
        assert_eq!(config.pipeline.transitions.len(), 1);
        assert_eq!(config.github.owner, "my-org");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.logging.level, "debug");
    }
}
