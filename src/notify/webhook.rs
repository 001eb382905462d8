// src/notify/webhook.rs
use super::Notifier;
use crate::config::WebhookNotifierConfig;
use crate::level::NotificationLevel;
use crate::result::MonitorResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

/// POSTs `{text, level, result}` as JSON when the run reaches the threshold.
pub struct WebhookNotifier {
    config: WebhookNotifierConfig,
    client: Client,
}

#[derive(Serialize)]
struct Payload<'a> {
    text: String,
    level: NotificationLevel,
    result: &'a MonitorResult,
}

impl WebhookNotifier {
    pub fn new(config: WebhookNotifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn notify(&self, result: &MonitorResult) -> Result<()> {
        let level = result.level();
        if level < self.config.threshold {
            debug!(
                "Skipping webhook, run level {} is below {}",
                level, self.config.threshold
            );
            return Ok(());
        }

        let payload = Payload {
            text: result.render_plain_text(self.config.threshold),
            level,
            result,
        };

        self.client
            .post(self.config.url.as_str())
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach webhook {}", self.config.url))?
            .error_for_status()
            .context("Webhook rejected the notification")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{CheckResult, LayerResult, RunReport};
    use chrono::Utc;
    use mockito::Matcher;
    use url::Url;

    fn notifier(url: &str, threshold: NotificationLevel) -> WebhookNotifier {
        WebhookNotifier::new(WebhookNotifierConfig {
            url: Url::parse(url).unwrap(),
            threshold,
            timeout_secs: 2,
        })
        .unwrap()
    }

    fn failing_run() -> MonitorResult {
        let mut report = RunReport::new(Utc::now());
        report.layer_results.push(LayerResult::new(
            "database",
            vec![CheckResult::new("ping", NotificationLevel::Error).with_message("refused")],
        ));
        MonitorResult::Normal(report)
    }

    #[tokio::test]
    async fn test_posts_rendered_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "level": "error",
                "result": { "kind": "normal" }
            })))
            .with_status(200)
            .create_async()
            .await;

        notifier(&format!("{}/hook", server.url()), NotificationLevel::Error)
            .notify(&failing_run())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_below_threshold_is_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .expect(0)
            .create_async()
            .await;

        notifier(&format!("{}/hook", server.url()), NotificationLevel::Critical)
            .notify(&failing_run())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_delivery_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(500)
            .create_async()
            .await;

        let err = notifier(&format!("{}/hook", server.url()), NotificationLevel::Okay)
            .notify(&failing_run())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("rejected"));
    }
}
