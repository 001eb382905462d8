// src/clock/mod.rs
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Time source injected into the engine.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<DateTime<Utc>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        Ok(Utc::now())
    }
}

/// Fake clock that moves forward by `step` on every read.
///
/// The first read returns `start + step`.
#[derive(Debug)]
pub struct SteppingClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| anyhow::anyhow!("stepping clock lock poisoned"))?;
        *current = *current + self.step;
        Ok(*current)
    }
}
