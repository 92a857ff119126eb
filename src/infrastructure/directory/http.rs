//! HTTP-backed member directory
//!
//! Talks to the Team Members Service over its public API. Lookups are
//! idempotent GETs, so transport failures and 5xx answers are retried a
//! bounded number of times with a fixed backoff before the caller sees an
//! upstream error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::warn;

use crate::config::UpstreamConfig;
use crate::domain::directory::{MemberDirectory, MemberSummary};
use crate::domain::member::MemberId;
use crate::domain::DomainError;

const UPSTREAM_NAME: &str = "team_members";

/// Member directory backed by the Team Members Service HTTP API
#[derive(Debug, Clone)]
pub struct HttpMemberDirectory {
    base_url: String,
    client: reqwest::Client,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl HttpMemberDirectory {
    /// Build a directory client from the upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: config.team_members_url.trim_end_matches('/').to_string(),
            client,
            retry_attempts: config.retry_attempts.max(1),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with bounded retry on transport failures and 5xx answers
    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response, DomainError> {
        let mut last_error = String::new();

        for attempt in 1..=self.retry_attempts {
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_server_error() => {
                    last_error = format!("HTTP {}", response.status());
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = e.to_string();
                }
            }

            if attempt < self.retry_attempts {
                warn!(
                    url = %url,
                    attempt,
                    error = %last_error,
                    "Upstream request failed, retrying"
                );
                tokio::time::sleep(self.retry_backoff).await;
            }
        }

        Err(DomainError::upstream(
            UPSTREAM_NAME,
            format!(
                "GET {} failed after {} attempts: {}",
                url, self.retry_attempts, last_error
            ),
        ))
    }
}

#[async_trait]
impl MemberDirectory for HttpMemberDirectory {
    async fn find_member(&self, id: &MemberId) -> Result<Option<MemberSummary>, DomainError> {
        let url = format!("{}/members/{}", self.base_url, id);
        let response = self.get_with_retry(&url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(DomainError::upstream(
                UPSTREAM_NAME,
                format!("GET {} answered HTTP {}", url, response.status()),
            ));
        }

        let summary = response.json::<MemberSummary>().await.map_err(|e| {
            DomainError::upstream(UPSTREAM_NAME, format!("Unparseable member response: {}", e))
        })?;

        Ok(Some(summary))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            DomainError::upstream(UPSTREAM_NAME, format!("GET {} failed: {}", url, e))
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DomainError::upstream(
                UPSTREAM_NAME,
                format!("GET {} answered HTTP {}", url, response.status()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> UpstreamConfig {
        UpstreamConfig {
            team_members_url: server.uri(),
            timeout_ms: 1_000,
            retry_attempts: 2,
            retry_backoff_ms: 10,
        }
    }

    #[tokio::test]
    async fn test_find_member_found() {
        let server = MockServer::start().await;
        let member_id = uuid::Uuid::new_v4().to_string();

        Mock::given(method("GET"))
            .and(path(format!("/members/{}", member_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": member_id,
                "name": "Alice Johnson",
                "email": "alice@example.com",
                "phone": "5550100"
            })))
            .mount(&server)
            .await;

        let directory = HttpMemberDirectory::new(&config_for(&server)).unwrap();
        let id = MemberId::new(&member_id).unwrap();

        let summary = directory.find_member(&id).await.unwrap().unwrap();
        assert_eq!(summary.name, "Alice Johnson");
        assert_eq!(summary.id, id);
    }

    #[tokio::test]
    async fn test_find_member_absent() {
        let server = MockServer::start().await;
        let member_id = uuid::Uuid::new_v4().to_string();

        Mock::given(method("GET"))
            .and(path(format!("/members/{}", member_id)))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let directory = HttpMemberDirectory::new(&config_for(&server)).unwrap();
        let id = MemberId::new(&member_id).unwrap();

        assert!(directory.find_member(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_member_retries_transient_5xx() {
        let server = MockServer::start().await;
        let member_id = uuid::Uuid::new_v4().to_string();

        // First answer is a 500; the retry gets a 200
        Mock::given(method("GET"))
            .and(path(format!("/members/{}", member_id)))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/members/{}", member_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": member_id,
                "name": "Alice Johnson",
                "email": "alice@example.com"
            })))
            .mount(&server)
            .await;

        let directory = HttpMemberDirectory::new(&config_for(&server)).unwrap();
        let id = MemberId::new(&member_id).unwrap();

        let summary = directory.find_member(&id).await.unwrap();
        assert!(summary.is_some());
    }

    #[tokio::test]
    async fn test_find_member_gives_up_after_budget() {
        let server = MockServer::start().await;
        let member_id = uuid::Uuid::new_v4().to_string();

        Mock::given(method("GET"))
            .and(path(format!("/members/{}", member_id)))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let directory = HttpMemberDirectory::new(&config_for(&server)).unwrap();
        let id = MemberId::new(&member_id).unwrap();

        let result = directory.find_member(&id).await;
        assert!(matches!(result, Err(DomainError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_find_member_unreachable_upstream() {
        // Point at a closed port; no server is listening
        let config = UpstreamConfig {
            team_members_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 500,
            retry_attempts: 1,
            retry_backoff_ms: 10,
        };

        let directory = HttpMemberDirectory::new(&config).unwrap();
        let id = MemberId::generate();

        let result = directory.find_member(&id).await;
        assert!(matches!(result, Err(DomainError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
            .mount(&server)
            .await;

        let directory = HttpMemberDirectory::new(&config_for(&server)).unwrap();
        assert!(directory.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_ping_unhealthy() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let directory = HttpMemberDirectory::new(&config_for(&server)).unwrap();
        assert!(directory.ping().await.is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = UpstreamConfig {
            team_members_url: "http://tm.internal:80/".to_string(),
            timeout_ms: 1_000,
            retry_attempts: 1,
            retry_backoff_ms: 10,
        };

        let directory = HttpMemberDirectory::new(&config).unwrap();
        assert_eq!(directory.base_url(), "http://tm.internal:80");
    }
}
