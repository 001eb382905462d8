// src/checks/noop.rs
use crate::config::NoopCheckConfig;
use crate::layer::Check;
use crate::result::CheckResult;
use anyhow::Result;
use async_trait::async_trait;

pub struct NoopCheck {
    config: NoopCheckConfig,
}

impl NoopCheck {
    pub fn new(config: NoopCheckConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Check for NoopCheck {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn run(&self) -> Result<CheckResult> {
        let result = CheckResult::new(self.config.name.clone(), self.config.level);
        Ok(match &self.config.message {
            Some(message) => result.with_message(message.clone()),
            None => result,
        })
    }
}
