// src/notify/console.rs
use super::Notifier;
use crate::level::NotificationLevel;
use crate::result::MonitorResult;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Prints the rendered report to stdout.
pub struct ConsoleNotifier {
    threshold: NotificationLevel,
}

impl ConsoleNotifier {
    pub fn new(threshold: NotificationLevel) -> Self {
        Self { threshold }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn notify(&self, result: &MonitorResult) -> Result<()> {
        let text = result.render_plain_text(self.threshold);
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
