// src/metrics/collector.rs
use crate::level::NotificationLevel;
use crate::result::MonitorResult;
use anyhow::{Context, Result};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use std::path::Path;
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("Failed to encode metrics")?;
        Ok(buffer)
    }

    /// Write the text exposition to `path` for a node exporter textfile
    /// collector. Written to a temp file first so readers never see half a file.
    pub async fn write_textfile<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let buffer = self.gather()?;
        let tmp = path.with_extension("prom.tmp");

        tokio::fs::write(&tmp, &buffer)
            .await
            .with_context(|| format!("Failed to write metrics to {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .with_context(|| format!("Failed to move metrics into {}", path.display()))?;
        Ok(())
    }
}

pub struct MetricsCollector {
    // Run metrics
    pub runs_total: IntCounterVec,
    pub run_duration_seconds: Histogram,
    pub last_run_level: IntGauge,
    pub early_stops_total: IntCounter,

    // Layer metrics
    pub layers_executed_total: IntCounterVec,
    pub layer_level: IntGaugeVec,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let runs_total = IntCounterVec::new(
            Opts::new("th_runs_total", "Total number of runs by final level"),
            &["level"],
        )?;
        registry.register(Box::new(runs_total.clone()))?;

        let run_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "th_run_duration_seconds",
            "Duration of completed runs in seconds",
        ))?;
        registry.register(Box::new(run_duration_seconds.clone()))?;

        let last_run_level = IntGauge::new(
            "th_last_run_level",
            "Level of the last run (0=okay, 1=warning, 2=error, 3=critical)",
        )?;
        registry.register(Box::new(last_run_level.clone()))?;

        let early_stops_total = IntCounter::new(
            "th_early_stops_total",
            "Runs halted because a layer reached the stop threshold",
        )?;
        registry.register(Box::new(early_stops_total.clone()))?;

        let layers_executed_total = IntCounterVec::new(
            Opts::new("th_layers_executed_total", "Total layer executions"),
            &["layer", "level"],
        )?;
        registry.register(Box::new(layers_executed_total.clone()))?;

        let layer_level = IntGaugeVec::new(
            Opts::new(
                "th_layer_level",
                "Level of the last result of each layer (0=okay .. 3=critical)",
            ),
            &["layer"],
        )?;
        registry.register(Box::new(layer_level.clone()))?;

        Ok(Self {
            runs_total,
            run_duration_seconds,
            last_run_level,
            early_stops_total,
            layers_executed_total,
            layer_level,
        })
    }

    pub fn record_layer(&self, layer: &str, level: NotificationLevel) {
        self.layers_executed_total
            .with_label_values(&[layer, level.as_str()])
            .inc();
        self.layer_level
            .with_label_values(&[layer])
            .set(level_value(level));
    }

    pub fn record_early_stop(&self) {
        self.early_stops_total.inc();
    }

    pub fn record_run(&self, result: &MonitorResult) {
        let level = result.level();
        self.runs_total.with_label_values(&[level.as_str()]).inc();
        self.last_run_level.set(level_value(level));

        if let MonitorResult::Normal(report) = result {
            if let Ok(duration) = (report.finished - report.started).to_std() {
                self.run_duration_seconds.observe(duration.as_secs_f64());
            }
        }
    }
}

fn level_value(level: NotificationLevel) -> i64 {
    // Discriminants follow the declared Okay..Critical order.
    level as i64
}
