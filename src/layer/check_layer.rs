// src/layer/check_layer.rs
use super::{Check, Layer};
use crate::failure::Failure;
use crate::level::NotificationLevel;
use crate::result::{CheckResult, LayerResult};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Runs its checks one after another and folds them into a `LayerResult`.
pub struct CheckLayer {
    name: String,
    checks: Vec<Box<dyn Check>>,
}

impl CheckLayer {
    pub fn new(name: impl Into<String>, checks: Vec<Box<dyn Check>>) -> Self {
        Self {
            name: name.into(),
            checks,
        }
    }
}

#[async_trait]
impl Layer for CheckLayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<Option<LayerResult>> {
        let mut results = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let result = match check.run().await {
                Ok(result) => result,
                Err(e) => {
                    // A check that cannot run is as bad as it gets.
                    let failure = Failure::from_anyhow(&e);
                    warn!("Check {} in layer {} failed: {}", check.name(), self.name, e);
                    CheckResult::new(check.name(), NotificationLevel::Critical)
                        .with_message(failure.flatten().trim_end().to_string())
                }
            };

            debug!(
                "Check {} in layer {} finished with {}",
                result.check_name, self.name, result.level
            );
            results.push(result);
        }

        Ok(Some(LayerResult::new(self.name.clone(), results)))
    }
}
