//! GitHub Issues adapter: API models and the HTTP client.

pub mod client;
pub mod models;

pub use client::GitHubClient;
pub use models::GitHubIssue;
