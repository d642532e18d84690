//! GitHub HTTP client.
//!
//! Wraps the single GitHub REST API v3 operation the gate needs: fetching
//! one issue by number so it can be mapped into an entry contract. Server
//! errors and transport failures are retried with exponential backoff;
//! client errors (bad repo, missing issue, bad credentials) are not.

use backoff::ExponentialBackoff;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::domain::errors::{GateError, GateResult};
use crate::domain::models::GitHubConfig;

use super::models::GitHubIssue;

/// Default ceiling on total retry time.
const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(20);

/// HTTP client for the GitHub REST API v3.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL of the API; overridable for tests.
    base_url: String,
    /// Optional bearer token.
    token: Option<String>,
    /// Ceiling on total time spent retrying transient failures.
    max_elapsed: Duration,
}

impl GitHubClient {
    /// Create a client against the given API base URL.
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            max_elapsed: DEFAULT_MAX_ELAPSED,
        }
    }

    /// Create a client from configuration, reading the token from the
    /// configured environment variable when set.
    pub fn from_config(config: &GitHubConfig) -> Self {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.is_empty());
        Self::new(&config.api_url, token)
    }

    /// Override the retry ceiling.
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    /// Fetch a single issue by number.
    pub async fn fetch_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> GateResult<GitHubIssue> {
        let url = format!("{}/repos/{owner}/{repo}/issues/{number}", self.base_url);

        let backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(50),
            max_elapsed_time: Some(self.max_elapsed),
            ..ExponentialBackoff::default()
        };

        let issue = backoff::future::retry(backoff, || async {
            let mut request = self
                .http
                .get(&url)
                .header("Accept", "application/vnd.github+json")
                .header("X-GitHub-Api-Version", "2022-11-28")
                .header("User-Agent", "stagegate");
            if let Some(token) = &self.token {
                request = request.header("Authorization", format!("Bearer {token}"));
            }

            let response = request.send().await.map_err(|e| {
                backoff::Error::transient(GateError::External(format!(
                    "GitHub fetch_issue request failed: {e}"
                )))
            })?;

            let status = response.status();
            if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                return Err(backoff::Error::transient(GateError::External(format!(
                    "GitHub fetch_issue returned {status}"
                ))));
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(backoff::Error::permanent(GateError::External(format!(
                    "GitHub fetch_issue returned {status}: {body}"
                ))));
            }

            response.json::<GitHubIssue>().await.map_err(|e| {
                backoff::Error::permanent(GateError::External(format!(
                    "GitHub fetch_issue parse failed: {e}"
                )))
            })
        })
        .await?;

        Ok(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_issue_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/org/repo/issues/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "id": 1,
                    "number": 42,
                    "title": "Add fire safety quiz",
                    "state": "open",
                    "html_url": "https://github.com/org/repo/issues/42"
                }"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None);
        let issue = client.fetch_issue("org", "repo", 42).await.unwrap();
        assert_eq!(issue.number, Some(42));
        assert_eq!(issue.title, "Add fire safety quiz");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_issue_not_found_is_permanent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/org/repo/issues/999")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None);
        let err = client.fetch_issue("org", "repo", 999).await.unwrap_err();
        assert!(matches!(err, GateError::External(_)));
        assert!(err.to_string().contains("404"));
        // A 404 must not be retried.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_issue_retries_server_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/org/repo/issues/7")
            .with_status(502)
            .expect_at_least(2)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None)
            .with_max_elapsed(Duration::from_millis(400));
        let err = client.fetch_issue("org", "repo", 7).await.unwrap_err();
        assert!(err.to_string().contains("502"));
        // The transient failure was attempted more than once.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_token_sent_when_present() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/org/repo/issues/1")
            .match_header("authorization", "Bearer ghp_test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "id": 1, "number": 1, "title": "T", "state": "open" }"#)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), Some("ghp_test".to_string()));
        client.fetch_issue("org", "repo", 1).await.unwrap();
        mock.assert_async().await;
    }
}
