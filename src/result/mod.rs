// src/result/mod.rs
mod render;

use crate::level::NotificationLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub check_name: String,
    pub level: NotificationLevel,
    pub message: Option<String>,
}

impl CheckResult {
    pub fn new(check_name: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            check_name: check_name.into(),
            level,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Outcome of one layer run. Its level is always the maximum of its checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerResult {
    layer_name: String,
    level: NotificationLevel,
    check_results: Vec<CheckResult>,
}

impl LayerResult {
    pub fn new(layer_name: impl Into<String>, check_results: Vec<CheckResult>) -> Self {
        let level = NotificationLevel::max_of(check_results.iter().map(|c| c.level));
        Self {
            layer_name: layer_name.into(),
            level,
            check_results,
        }
    }

    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    pub fn level(&self) -> NotificationLevel {
        self.level
    }

    pub fn check_results(&self) -> &[CheckResult] {
        &self.check_results
    }
}

/// Result of a run that completed, possibly stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub layer_results: Vec<LayerResult>,
}

impl RunReport {
    pub fn new(started: DateTime<Utc>) -> Self {
        Self {
            started,
            finished: started,
            layer_results: Vec::new(),
        }
    }

    pub fn level(&self) -> NotificationLevel {
        NotificationLevel::max_of(self.layer_results.iter().map(|l| l.level()))
    }

    pub fn message(&self) -> String {
        let level = self.level();
        if level == NotificationLevel::Okay {
            return format!("All {} layer(s) passed.", self.layer_results.len());
        }

        match self.layer_results.iter().find(|l| l.level() == level) {
            Some(layer) => format!("{}: layer '{}' reported problems.", level, layer.layer_name()),
            None => format!("{}: a layer reported problems.", level),
        }
    }
}

/// Result of a run that could not complete because the engine itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalFailure {
    pub message: String,
    pub details: String,
    /// Best-effort time of the failure; absent when the clock itself failed.
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MonitorResult {
    Normal(RunReport),
    Critical(CriticalFailure),
}

impl MonitorResult {
    pub fn level(&self) -> NotificationLevel {
        match self {
            MonitorResult::Normal(report) => report.level(),
            MonitorResult::Critical(_) => NotificationLevel::Critical,
        }
    }

    pub fn message(&self) -> String {
        match self {
            MonitorResult::Normal(report) => report.message(),
            MonitorResult::Critical(failure) => failure.message.clone(),
        }
    }

    pub fn layer_results(&self) -> &[LayerResult] {
        match self {
            MonitorResult::Normal(report) => report.layer_results.as_slice(),
            MonitorResult::Critical(_) => &[],
        }
    }

    pub fn is_critical_failure(&self) -> bool {
        matches!(self, MonitorResult::Critical(_))
    }
}
