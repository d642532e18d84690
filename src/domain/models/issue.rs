//! Normalized external issue, as consumed by the contract factory.
//!
//! External trackers speak their own payload formats; adapters map those
//! into this shape so the factory reads exactly the fields the validation
//! layer cares about and nothing else.

/// A feature request from an external issue tracker, reduced to the fields
/// the factory reads.
#[derive(Debug, Clone, Default)]
pub struct ExternalIssue {
    /// Repository-scoped issue number. `None` when the upstream payload
    /// carried no stable identifier.
    pub number: Option<u64>,
    /// Issue title.
    pub title: String,
    /// Issue body text, when present.
    pub body: Option<String>,
    /// Upstream state, e.g. `open`.
    pub state: String,
    /// Label names.
    pub labels: Vec<String>,
    /// Assignee login names.
    pub assignees: Vec<String>,
    /// Link back to the issue in the tracker's UI.
    pub html_url: Option<String>,
}
