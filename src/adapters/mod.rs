//! Adapters to external systems: the GitHub issue tracker and the
//! filesystem schema store.

pub mod github;
pub mod schema_dir;

pub use github::{GitHubClient, GitHubIssue};
pub use schema_dir::DirectorySchemaSource;
