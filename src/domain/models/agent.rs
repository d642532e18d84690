//! Pipeline agent roles and the handoff sequence graph.
//!
//! The pipeline is staffed by a fixed, closed set of agent roles. A contract
//! is only allowed to cross a stage boundary when its `source -> target`
//! pair is an edge of the configured [`SequenceGraph`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named pipeline stage that produces or consumes contracts.
///
/// The set is closed: payloads carrying any other role name fail semantic
/// validation rather than deserialization, so the validator can report the
/// offending value instead of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// External entry point: feature requests arriving as GitHub issues.
    Github,
    /// Breaks a feature request down into a story and acceptance criteria.
    ProjectManager,
    /// Designs the game/training mechanics for the story.
    GameDesigner,
    /// Implements the feature.
    Developer,
    /// Authors automated tests for the implementation.
    TestEngineer,
    /// Exercises the feature against acceptance criteria.
    QaTester,
    /// Final review against the platform's quality principles.
    QualityReviewer,
}

impl AgentRole {
    /// Every known role, in pipeline order.
    pub const ALL: [Self; 7] = [
        Self::Github,
        Self::ProjectManager,
        Self::GameDesigner,
        Self::Developer,
        Self::TestEngineer,
        Self::QaTester,
        Self::QualityReviewer,
    ];

    /// Canonical snake_case name, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::ProjectManager => "project_manager",
            Self::GameDesigner => "game_designer",
            Self::Developer => "developer",
            Self::TestEngineer => "test_engineer",
            Self::QaTester => "qa_tester",
            Self::QualityReviewer => "quality_reviewer",
        }
    }

    /// Parse a role name, case-insensitively. Returns `None` for anything
    /// outside the closed set.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "github" => Some(Self::Github),
            "project_manager" => Some(Self::ProjectManager),
            "game_designer" => Some(Self::GameDesigner),
            "developer" => Some(Self::Developer),
            "test_engineer" => Some(Self::TestEngineer),
            "qa_tester" => Some(Self::QaTester),
            "quality_reviewer" => Some(Self::QualityReviewer),
            _ => None,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of legal `source -> target` handoffs.
///
/// The graph is explicit configuration supplied by the caller (see
/// `pipeline.transitions` in the config file); the validator never
/// hard-codes the stage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceGraph {
    edges: HashSet<(AgentRole, AgentRole)>,
}

impl SequenceGraph {
    /// Build a graph from explicit edges.
    pub fn new<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (AgentRole, AgentRole)>,
    {
        Self {
            edges: edges.into_iter().collect(),
        }
    }

    /// The canonical seven-stage pipeline: each stage hands off to the next,
    /// and the quality reviewer hands the approved story back to the project
    /// manager for delivery.
    pub fn canonical() -> Self {
        use AgentRole::{
            Developer, GameDesigner, Github, ProjectManager, QaTester, QualityReviewer,
            TestEngineer,
        };
        Self::new([
            (Github, ProjectManager),
            (ProjectManager, GameDesigner),
            (GameDesigner, Developer),
            (Developer, TestEngineer),
            (TestEngineer, QaTester),
            (QaTester, QualityReviewer),
            (QualityReviewer, ProjectManager),
        ])
    }

    /// Whether `source -> target` is a legal handoff.
    pub fn allows(&self, source: AgentRole, target: AgentRole) -> bool {
        self.edges.contains(&(source, target))
    }

    /// Number of edges in the graph.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in AgentRole::ALL {
            assert_eq!(AgentRole::from_str(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_parse_case_insensitive() {
        assert_eq!(
            AgentRole::from_str("Project_Manager"),
            Some(AgentRole::ProjectManager)
        );
        assert_eq!(AgentRole::from_str("GITHUB"), Some(AgentRole::Github));
        assert_eq!(AgentRole::from_str("  developer  "), Some(AgentRole::Developer));
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(AgentRole::from_str("product_owner"), None);
        assert_eq!(AgentRole::from_str(""), None);
    }

    #[test]
    fn test_role_serde_uses_snake_case() {
        let json = serde_json::to_string(&AgentRole::QaTester).unwrap();
        assert_eq!(json, "\"qa_tester\"");
        let parsed: AgentRole = serde_json::from_str("\"quality_reviewer\"").unwrap();
        assert_eq!(parsed, AgentRole::QualityReviewer);
    }

    #[test]
    fn test_canonical_graph_forward_edges() {
        let graph = SequenceGraph::canonical();
        assert!(graph.allows(AgentRole::Github, AgentRole::ProjectManager));
        assert!(graph.allows(AgentRole::Developer, AgentRole::TestEngineer));
        assert!(graph.allows(AgentRole::QualityReviewer, AgentRole::ProjectManager));
    }

    #[test]
    fn test_canonical_graph_rejects_skips_and_reversals() {
        let graph = SequenceGraph::canonical();
        assert!(!graph.allows(AgentRole::Github, AgentRole::Developer));
        assert!(!graph.allows(AgentRole::ProjectManager, AgentRole::Github));
        assert!(!graph.allows(AgentRole::Developer, AgentRole::Developer));
    }

    #[test]
    fn test_custom_graph() {
        let graph = SequenceGraph::new([(AgentRole::Developer, AgentRole::QaTester)]);
        assert_eq!(graph.len(), 1);
        assert!(graph.allows(AgentRole::Developer, AgentRole::QaTester));
        assert!(!graph.allows(AgentRole::QaTester, AgentRole::Developer));
    }
}
