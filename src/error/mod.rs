// src/error/mod.rs
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error(
        "Layer {0} returned no result. Cannot continue because we now cannot determine error level of that layer."
    )]
    MissingLayerResult(String),
}

/// Several independent failures raised together, e.g. by a layer that
/// gathers the errors of all its failing checks.
#[derive(Debug)]
pub struct AggregateError {
    errors: Vec<anyhow::Error>,
}

impl AggregateError {
    pub fn new(errors: Vec<anyhow::Error>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[anyhow::Error] {
        &self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) occurred", self.errors.len())
    }
}

impl std::error::Error for AggregateError {}
