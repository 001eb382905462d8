// src/config/mod.rs
mod models;

pub use models::*;

use crate::checks::create_check;
use crate::clock::Clock;
use crate::engine::Engine;
use crate::layer::{CheckLayer, Layer};
use crate::metrics::MetricsCollector;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    parse_config(&contents, is_yaml(path))
}

pub fn parse_config(contents: &str, yaml: bool) -> Result<Config> {
    let config: Config = if yaml {
        serde_yaml::from_str(contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(contents).context("Failed to parse JSON config")?
    };

    config.validate()?;
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Instantiate the configured layers, keeping their order.
pub fn build_layers(config: &Config) -> Result<Vec<Box<dyn Layer>>> {
    config
        .layers
        .iter()
        .map(|layer| {
            let checks = layer
                .checks
                .iter()
                .map(create_check)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Failed to build checks of layer {}", layer.name))?;
            Ok(Box::new(CheckLayer::new(layer.name.clone(), checks)) as Box<dyn Layer>)
        })
        .collect()
}

pub fn build_engine(
    config: &Config,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<MetricsCollector>>,
) -> Result<Engine> {
    let mut builder = Engine::builder()
        .with_layers(build_layers(config)?)
        .with_clock(clock);
    if let Some(metrics) = metrics {
        builder = builder.with_metrics(metrics);
    }
    Ok(builder.build()?)
}
