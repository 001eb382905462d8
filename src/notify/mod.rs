// src/notify/mod.rs
mod console;
mod webhook;

pub use console::ConsoleNotifier;
pub use webhook::WebhookNotifier;

use crate::config::NotifierConfig;
use crate::result::MonitorResult;
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

/// Delivers a finished run somewhere a human will see it.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, result: &MonitorResult) -> Result<()>;
}

pub fn create_notifier(config: &NotifierConfig) -> Result<Box<dyn Notifier>> {
    let notifier: Box<dyn Notifier> = match config {
        NotifierConfig::Console(console) => Box::new(ConsoleNotifier::new(console.threshold)),
        NotifierConfig::Webhook(webhook) => Box::new(WebhookNotifier::new(webhook.clone())?),
    };
    Ok(notifier)
}

/// Hand the result to every notifier. One failing notifier does not keep
/// the others from running.
pub async fn notify_all(notifiers: &[Box<dyn Notifier>], result: &MonitorResult) -> usize {
    let mut failures = 0;
    for notifier in notifiers {
        if let Err(e) = notifier.notify(result).await {
            error!("Notifier {} failed: {:#}", notifier.name(), e);
            failures += 1;
        }
    }
    failures
}
