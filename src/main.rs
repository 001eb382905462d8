// src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tiered_health::{
    clock::SystemClock,
    config::{self, Config},
    engine::Engine,
    metrics::MetricsRegistry,
    notify::{create_notifier, notify_all, Notifier},
    MonitorResult, NotificationLevel,
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tiered_health=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    if arg == "--example" {
        print!("{}", Config::example().to_yaml()?);
        return Ok(());
    }

    info!("Loading configuration from: {}", arg);
    let config = config::load_config(&arg).await?;

    let metrics_registry = if config.metrics.enabled {
        Some(MetricsRegistry::new()?)
    } else {
        None
    };

    let engine = config::build_engine(
        &config,
        Arc::new(SystemClock),
        metrics_registry.as_ref().map(|r| r.collector()),
    )?;

    let notifiers = config
        .notifiers
        .iter()
        .map(create_notifier)
        .collect::<Result<Vec<_>>>()?;

    match config.interval() {
        None => {
            let result = run_once(&engine, &notifiers, &config, metrics_registry.as_ref()).await;
            std::process::exit(exit_code(&result));
        }
        Some(interval) => {
            info!("Running every {:?}", interval);
            let mut ticker = tokio::time::interval(interval);
            let shutdown = shutdown_signal();
            tokio::pin!(shutdown);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        run_once(&engine, &notifiers, &config, metrics_registry.as_ref()).await;
                    }
                    _ = &mut shutdown => break,
                }
            }
        }
    }

    Ok(())
}

async fn run_once(
    engine: &Engine,
    notifiers: &[Box<dyn Notifier>],
    config: &Config,
    metrics: Option<&MetricsRegistry>,
) -> MonitorResult {
    let result = engine.run_safe().await;
    notify_all(notifiers, &result).await;

    if let (Some(registry), Some(path)) = (metrics, config.metrics.textfile.as_ref()) {
        if let Err(e) = registry.write_textfile(path).await {
            error!("Metrics export failed: {:#}", e);
        }
    }

    result
}

fn exit_code(result: &MonitorResult) -> i32 {
    match result.level() {
        NotificationLevel::Okay | NotificationLevel::Warning => 0,
        NotificationLevel::Error => 1,
        NotificationLevel::Critical => 2,
    }
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
