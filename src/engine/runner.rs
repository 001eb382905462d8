// src/engine/runner.rs
use super::EngineBuilder;
use crate::clock::Clock;
use crate::error::EngineError;
use crate::failure::Failure;
use crate::layer::{Check, CheckLayer, Layer};
use crate::metrics::MetricsCollector;
use crate::result::{CriticalFailure, MonitorResult, RunReport};
use anyhow::{Context, Result};
use futures::FutureExt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

const CRITICAL_MESSAGE: &str = "The monitor (or one of its layers) itself failed.";

/// Runs its layers in insertion order, one at a time, and stops after the
/// first layer at or above the stop threshold.
///
/// Layers can only be added through `&mut self`, so the borrow checker keeps
/// the list frozen while a run is in flight.
pub struct Engine {
    layers: Vec<Box<dyn Layer>>,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl Engine {
    pub fn new(layers: Vec<Box<dyn Layer>>, clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(layers, clock, None)
    }

    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(Vec::new(), clock, None)
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(super) fn from_parts(
        layers: Vec<Box<dyn Layer>>,
        clock: Arc<dyn Clock>,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Self {
        Self {
            layers,
            clock,
            metrics,
        }
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    /// Takes effect on the next run.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) {
        debug!("Adding layer {}", layer.name());
        self.layers.push(layer);
    }

    pub fn add_check_layer(&mut self, name: impl Into<String>, checks: Vec<Box<dyn Check>>) {
        self.add_layer(Box::new(CheckLayer::new(name, checks)));
    }

    /// Run every layer and never fail: engine-level errors and panics are
    /// turned into a critical result.
    pub async fn run_safe(&self) -> MonitorResult {
        let run_id = Uuid::new_v4();
        self.run_contained()
            .instrument(info_span!("run", %run_id))
            .await
    }

    async fn run_contained(&self) -> MonitorResult {
        info!("Starting run over {} layer(s)", self.layers.len());

        let outcome = AssertUnwindSafe(self.run_unsafe()).catch_unwind().await;

        let result = match outcome {
            Ok(Ok(report)) => MonitorResult::Normal(report),
            Ok(Err(e)) => self.critical(Failure::from_anyhow(&e)),
            Err(payload) => self.critical(Failure::from_panic(payload)),
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_run(&result);
        }

        info!("Run finished with level {}", result.level());
        result
    }

    fn critical(&self, failure: Failure) -> MonitorResult {
        error!("Monitor itself failed: {}", failure.message);

        let at = panic::catch_unwind(AssertUnwindSafe(|| self.clock.now()))
            .ok()
            .and_then(|now| now.ok());

        MonitorResult::Critical(CriticalFailure {
            message: CRITICAL_MESSAGE.to_string(),
            details: format!("Monitor itself failed:\n{}", failure.flatten()),
            at,
        })
    }

    /// Run the layers, propagating engine-level failures. Prefer `run_safe`.
    pub async fn run_unsafe(&self) -> Result<RunReport> {
        let started = self.clock.now().context("Failed to read the clock")?;
        let mut report = RunReport::new(started);

        for layer in &self.layers {
            let layer_result = layer
                .run()
                .await?
                .ok_or_else(|| EngineError::MissingLayerResult(layer.name().to_string()))?;

            let level = layer_result.level();
            debug!("Layer {} finished with {}", layer.name(), level);

            if let Some(metrics) = &self.metrics {
                metrics.record_layer(layer.name(), level);
            }

            report.layer_results.push(layer_result);

            if level.stops_processing() {
                warn!(
                    "Layer {} reported {}, skipping the remaining layers",
                    layer.name(),
                    level
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_early_stop();
                }
                break;
            }
        }

        let finished = self.clock.now().context("Failed to read the clock")?;
        report.finished = finished.max(started);

        Ok(report)
    }
}
