// src/checks/http.rs
use crate::config::HttpCheckConfig;
use crate::layer::Check;
use crate::level::NotificationLevel;
use crate::result::CheckResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::time::timeout;
use tracing::debug;

/// GETs a URL and expects a 2xx answer within the timeout.
pub struct HttpCheck {
    config: HttpCheckConfig,
    client: Client,
}

impl HttpCheck {
    pub fn new(config: HttpCheckConfig) -> Result<Self> {
        // The request deadline is enforced by `run` alone.
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Check for HttpCheck {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn run(&self) -> Result<CheckResult> {
        let start = std::time::Instant::now();

        let result = timeout(
            self.config.timeout(),
            self.client.get(self.config.url.as_str()).send(),
        )
        .await;

        let response_time_ms = start.elapsed().as_millis() as u64;

        let (level, message) = match result {
            Ok(Ok(response)) => {
                let status = response.status();
                if status.is_success() {
                    (
                        NotificationLevel::Okay,
                        format!("HTTP {} in {} ms", status, response_time_ms),
                    )
                } else {
                    (self.config.failure_level, format!("HTTP {}", status))
                }
            }
            Ok(Err(e)) => (self.config.failure_level, e.to_string()),
            Err(_) => (self.config.failure_level, "Request timeout".to_string()),
        };

        debug!("{} -> {} ({})", self.config.url, level, message);

        Ok(CheckResult::new(self.config.name.clone(), level).with_message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn config(url: &str) -> HttpCheckConfig {
        HttpCheckConfig {
            name: "api".to_string(),
            url: Url::parse(url).unwrap(),
            timeout_secs: 2,
            failure_level: NotificationLevel::Critical,
        }
    }

    #[tokio::test]
    async fn test_success_status_is_okay() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;

        let check = HttpCheck::new(config(&format!("{}/health", server.url()))).unwrap();
        let result = check.run().await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.level, NotificationLevel::Okay);
        assert!(result.message.unwrap().starts_with("HTTP 200"));
    }

    #[tokio::test]
    async fn test_error_status_uses_failure_level() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(503)
            .create_async()
            .await;

        let check = HttpCheck::new(config(&format!("{}/health", server.url()))).unwrap();
        let result = check.run().await.unwrap();

        assert_eq!(result.level, NotificationLevel::Critical);
        assert_eq!(result.message.as_deref(), Some("HTTP 503 Service Unavailable"));
    }

    #[tokio::test]
    async fn test_silent_endpoint_reports_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            // Accept and hold the connection without ever answering.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        });

        let mut config = config(&format!("http://{}/health", addr));
        config.timeout_secs = 1;
        let result = HttpCheck::new(config).unwrap().run().await.unwrap();
        server.abort();

        assert_eq!(result.level, NotificationLevel::Critical);
        assert_eq!(result.message.as_deref(), Some("Request timeout"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_reported_not_raised() {
        // Port 9 (discard) is closed on test machines.
        let check = HttpCheck::new(config("http://127.0.0.1:9/health")).unwrap();
        let result = check.run().await.unwrap();

        assert_eq!(result.level, NotificationLevel::Critical);
        assert!(result.message.is_some());
    }
}
