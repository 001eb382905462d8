// src/lib.rs
pub mod checks;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod failure;
pub mod layer;
pub mod level;
pub mod metrics;
pub mod notify;
pub mod result;

pub use engine::{Engine, EngineBuilder};
pub use level::NotificationLevel;
pub use result::{CheckResult, LayerResult, MonitorResult};
