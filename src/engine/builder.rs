// src/engine/builder.rs
use super::Engine;
use crate::clock::{Clock, SystemClock};
use crate::error::EngineError;
use crate::layer::Layer;
use crate::metrics::MetricsCollector;
use std::sync::Arc;

/// Builder so callers can inject layers, clock and metrics.
#[derive(Default)]
pub struct EngineBuilder {
    layers: Option<Vec<Box<dyn Layer>>>,
    clock: Option<Arc<dyn Clock>>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layers(mut self, layers: Vec<Box<dyn Layer>>) -> Self {
        self.layers = Some(layers);
        self
    }

    /// Defaults to the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fails when no layer collection was supplied. Use `Engine::empty` for
    /// an engine that starts without layers.
    pub fn build(self) -> Result<Engine, EngineError> {
        let layers = self.layers.ok_or(EngineError::MissingArgument("layers"))?;
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        Ok(Engine::from_parts(layers, clock, self.metrics))
    }
}
