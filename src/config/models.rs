// src/config/models.rs
use crate::level::NotificationLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layers: Vec<LayerConfig>,

    #[serde(default = "default_notifiers")]
    pub notifiers: Vec<NotifierConfig>,

    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Run repeatedly at this interval instead of once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub name: String,
    #[serde(default)]
    pub checks: Vec<CheckConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckConfig {
    Noop(NoopCheckConfig),
    Http(HttpCheckConfig),
}

impl CheckConfig {
    pub fn name(&self) -> &str {
        match self {
            CheckConfig::Noop(c) => &c.name,
            CheckConfig::Http(c) => &c.name,
        }
    }
}

/// Always reports the configured level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoopCheckConfig {
    pub name: String,
    #[serde(default)]
    pub level: NotificationLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpCheckConfig {
    pub name: String,
    pub url: Url,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Level reported when the endpoint is down or not 2xx.
    #[serde(default = "default_failure_level")]
    pub failure_level: NotificationLevel,
}

impl HttpCheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierConfig {
    Console(ConsoleNotifierConfig),
    Webhook(WebhookNotifierConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleNotifierConfig {
    #[serde(default = "default_console_threshold")]
    pub threshold: NotificationLevel,
}

impl Default for ConsoleNotifierConfig {
    fn default() -> Self {
        Self {
            threshold: default_console_threshold(),
        }
    }
}

/// Chat or paging endpoint that accepts a JSON POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookNotifierConfig {
    pub url: Url,
    #[serde(default = "default_webhook_threshold")]
    pub threshold: NotificationLevel,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl WebhookNotifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textfile: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Layer names must not be empty")]
    EmptyLayerName,

    #[error("Duplicate layer name: {0}")]
    DuplicateLayerName(String),

    #[error("Check in layer {0} has an empty name")]
    EmptyCheckName(String),

    #[error("Timeout of {0} must be greater than zero")]
    ZeroTimeout(String),

    #[error("interval_secs must be greater than zero")]
    ZeroInterval,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for layer in &self.layers {
            if layer.name.trim().is_empty() {
                return Err(ConfigError::EmptyLayerName);
            }
            if !seen.insert(layer.name.as_str()) {
                return Err(ConfigError::DuplicateLayerName(layer.name.clone()));
            }

            for check in &layer.checks {
                if check.name().trim().is_empty() {
                    return Err(ConfigError::EmptyCheckName(layer.name.clone()));
                }
                if let CheckConfig::Http(http) = check {
                    if http.timeout_secs == 0 {
                        return Err(ConfigError::ZeroTimeout(http.name.clone()));
                    }
                }
            }
        }

        for notifier in &self.notifiers {
            if let NotifierConfig::Webhook(webhook) = notifier {
                if webhook.timeout_secs == 0 {
                    return Err(ConfigError::ZeroTimeout(webhook.url.to_string()));
                }
            }
        }

        if self.interval_secs == Some(0) {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(())
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval_secs.map(Duration::from_secs)
    }

    /// Sample document covering every layer, check and notifier kind.
    pub fn example() -> Self {
        let noop = |name: &str| {
            CheckConfig::Noop(NoopCheckConfig {
                name: name.to_string(),
                level: NotificationLevel::Okay,
                message: None,
            })
        };

        Self {
            layers: vec![
                LayerConfig {
                    name: "Layer 1".to_string(),
                    checks: vec![noop("noop 1"), noop("noop 2")],
                },
                LayerConfig {
                    name: "Layer 2".to_string(),
                    checks: vec![CheckConfig::Http(HttpCheckConfig {
                        name: "status page".to_string(),
                        url: Url::parse("http://localhost:8080/health")
                            .expect("static example url is valid"),
                        timeout_secs: default_timeout_secs(),
                        failure_level: default_failure_level(),
                    })],
                },
            ],
            notifiers: vec![
                NotifierConfig::Console(ConsoleNotifierConfig::default()),
                NotifierConfig::Webhook(WebhookNotifierConfig {
                    url: Url::parse("https://hooks.example.com/services/T000/B000/XXXX")
                        .expect("static example url is valid"),
                    threshold: default_webhook_threshold(),
                    timeout_secs: default_timeout_secs(),
                }),
            ],
            metrics: MetricsConfig {
                enabled: true,
                textfile: Some(PathBuf::from("/var/lib/node_exporter/tiered_health.prom")),
            },
            interval_secs: None,
        }
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn default_notifiers() -> Vec<NotifierConfig> {
    vec![NotifierConfig::Console(ConsoleNotifierConfig::default())]
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_failure_level() -> NotificationLevel {
    NotificationLevel::Error
}

fn default_console_threshold() -> NotificationLevel {
    NotificationLevel::Okay
}

fn default_webhook_threshold() -> NotificationLevel {
    NotificationLevel::Error
}
