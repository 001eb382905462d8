// src/layer/mod.rs
mod check_layer;

pub use check_layer::CheckLayer;

use crate::result::{CheckResult, LayerResult};
use anyhow::Result;
use async_trait::async_trait;

/// Smallest unit of monitoring.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &str;

    /// Severities are data: an unhealthy target is reported through the
    /// returned level, `Err` is reserved for the check itself failing.
    async fn run(&self) -> Result<CheckResult>;
}

/// Named group of checks evaluated as one unit.
///
/// `run` must not mutate the layer and may be called repeatedly. Returning
/// `Ok(None)` breaks the contract and aborts the whole run.
#[async_trait]
pub trait Layer: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> Result<Option<LayerResult>>;
}
