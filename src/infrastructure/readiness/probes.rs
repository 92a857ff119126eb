//! Health probes for the startup gates

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Database;

use crate::domain::readiness::HealthProbe;
use crate::domain::DomainError;

/// Probe that issues a MongoDB `ping` command
#[derive(Clone)]
pub struct MongoPingProbe {
    database: Database,
}

impl MongoPingProbe {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl std::fmt::Debug for MongoPingProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoPingProbe")
            .field("database", &self.database.name())
            .finish()
    }
}

#[async_trait]
impl HealthProbe for MongoPingProbe {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn check(&self) -> Result<(), DomainError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| DomainError::storage(format!("MongoDB ping failed: {}", e)))
    }
}

/// Probe that issues an HTTP GET against a service's readiness endpoint
#[derive(Debug, Clone)]
pub struct HttpServiceProbe {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl HttpServiceProbe {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HealthProbe for HttpServiceProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<(), DomainError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            DomainError::upstream(self.name.clone(), format!("GET {} failed: {}", self.url, e))
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DomainError::upstream(
                self.name.clone(),
                format!("GET {} answered HTTP {}", self.url, response.status()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_probe_healthy() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ready"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let probe = HttpServiceProbe::new("team_members", format!("{}/ready", server.uri()));
        assert!(probe.check().await.is_ok());
    }

    #[tokio::test]
    async fn test_http_probe_unhealthy_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ready"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let probe = HttpServiceProbe::new("team_members", format!("{}/ready", server.uri()));
        assert!(probe.check().await.is_err());
    }

    #[tokio::test]
    async fn test_http_probe_unreachable() {
        let probe = HttpServiceProbe::new("team_members", "http://127.0.0.1:9/ready");
        assert!(probe.check().await.is_err());
    }
}
