// src/checks/mod.rs
mod http;
mod noop;

pub use http::HttpCheck;
pub use noop::NoopCheck;

use crate::config::CheckConfig;
use crate::layer::Check;
use anyhow::Result;

pub fn create_check(config: &CheckConfig) -> Result<Box<dyn Check>> {
    let check: Box<dyn Check> = match config {
        CheckConfig::Noop(noop) => Box::new(NoopCheck::new(noop.clone())),
        CheckConfig::Http(http) => Box::new(HttpCheck::new(http.clone())?),
    };
    Ok(check)
}
