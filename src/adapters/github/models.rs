//! GitHub Issues API response models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They are used
//! internally by the GitHub adapter and are not part of the public domain
//! model; [`GitHubIssue::into_external`] produces the normalized shape the
//! factory consumes.
//!
//! Fields default rather than fail on absence: webhook deliveries and
//! partial fixtures omit fields the full REST payload carries, and the
//! factory is the layer that decides which absences are fatal.

use serde::{Deserialize, Serialize};

use crate::domain::models::ExternalIssue;

/// An issue returned by the GitHub API.
///
/// Note: issues and pull requests share the same endpoint. Pull requests
/// include a non-null `pull_request` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    /// Globally unique numeric identifier for the issue.
    #[serde(default)]
    pub id: Option<u64>,
    /// Sequential number within the repository (e.g., 42 -> "#42").
    #[serde(default)]
    pub number: Option<u64>,
    /// Issue title.
    #[serde(default)]
    pub title: String,
    /// Issue body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    /// Current state: "open" or "closed".
    #[serde(default)]
    pub state: String,
    /// Labels applied to the issue.
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
    /// Users assigned to the issue.
    #[serde(default)]
    pub assignees: Vec<GitHubUser>,
    /// The user who opened the issue.
    #[serde(default)]
    pub user: Option<GitHubUser>,
    /// Milestone the issue belongs to, if any.
    #[serde(default)]
    pub milestone: Option<GitHubMilestone>,
    /// Present when this item is actually a pull request, not an issue.
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
    /// ISO 8601 timestamp of creation.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO 8601 timestamp of the last update.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// URL to view the issue in the GitHub UI.
    #[serde(default)]
    pub html_url: Option<String>,
}

impl GitHubIssue {
    /// Reduce the API payload to the normalized issue the factory reads.
    ///
    /// `number` is preferred as the stable identifier; the globally unique
    /// `id` is the fallback when a partial payload omits it.
    pub fn into_external(self) -> ExternalIssue {
        ExternalIssue {
            number: self.number.or(self.id),
            title: self.title,
            body: self.body,
            state: self.state,
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            assignees: self.assignees.into_iter().map(|u| u.login).collect(),
            html_url: self.html_url,
        }
    }
}

/// A label applied to a GitHub issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLabel {
    /// The label name (e.g., "bug", "priority: high").
    pub name: String,
    /// Hex colour without the leading `#`.
    #[serde(default)]
    pub color: String,
}

/// A GitHub user reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    /// The user's login name.
    pub login: String,
}

/// A milestone reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubMilestone {
    /// Milestone title.
    pub title: String,
}

/// Reference object present on pull requests (absent on plain issues).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequestRef {
    /// API URL of the pull request resource.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_issue_deserialization() {
        let json = r#"{
            "id": 1,
            "number": 42,
            "title": "Add fire safety quiz",
            "body": "Staff need a short quiz after the video.",
            "state": "open",
            "labels": [
                { "name": "feature", "color": "a2eeef" },
                { "name": "priority: high", "color": "e4e669" }
            ],
            "assignees": [ { "login": "anna" } ],
            "user": { "login": "erik" },
            "milestone": { "title": "Q3" },
            "pull_request": null,
            "created_at": "2024-01-14T08:00:00Z",
            "updated_at": "2024-01-15T10:30:00Z",
            "html_url": "https://github.com/org/repo/issues/42"
        }"#;
        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, Some(42));
        assert_eq!(issue.title, "Add fire safety quiz");
        assert_eq!(issue.labels.len(), 2);
        assert_eq!(issue.assignees[0].login, "anna");
        assert_eq!(issue.user.as_ref().unwrap().login, "erik");
        assert!(issue.pull_request.is_none());
    }

    #[test]
    fn test_minimal_issue_deserialization() {
        let json = r#"{ "title": "Bare payload" }"#;
        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert!(issue.number.is_none());
        assert!(issue.id.is_none());
        assert!(issue.labels.is_empty());
        assert!(issue.html_url.is_none());
    }

    #[test]
    fn test_into_external_maps_names() {
        let json = r#"{
            "id": 7,
            "number": 9,
            "title": "T",
            "state": "open",
            "labels": [ { "name": "bug", "color": "d73a4a" } ],
            "assignees": [ { "login": "anna" }, { "login": "erik" } ],
            "html_url": "https://github.com/org/repo/issues/9"
        }"#;
        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        let external = issue.into_external();
        assert_eq!(external.number, Some(9));
        assert_eq!(external.labels, vec!["bug".to_string()]);
        assert_eq!(external.assignees.len(), 2);
    }

    #[test]
    fn test_into_external_falls_back_to_id() {
        let json = r#"{ "id": 31337, "title": "No number" }"#;
        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.into_external().number, Some(31337));
    }
}
