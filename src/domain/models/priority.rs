//! Story priority levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Priority attached to a story contract.
///
/// Wire format is lowercase; parsing is case-insensitive and the semantic
/// validator normalizes payload values to lowercase on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Nice-to-have work.
    Low,
    /// Default priority for incoming stories.
    Medium,
    /// Prioritized ahead of the default queue.
    High,
    /// Drop-everything work.
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    /// Lowercase name, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parse a priority level, case-insensitively, trimming surrounding
    /// whitespace. Returns `None` for any value outside the closed set.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
