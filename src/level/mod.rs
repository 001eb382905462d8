// src/level/mod.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a check, layer or whole run.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Okay < Warning < Error < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Okay,
    Warning,
    Error,
    Critical,
}

/// Layers at or above this level halt the run.
pub const STOP_THRESHOLD: NotificationLevel = NotificationLevel::Error;

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Okay => "Okay",
            NotificationLevel::Warning => "Warning",
            NotificationLevel::Error => "Error",
            NotificationLevel::Critical => "Critical",
        }
    }

    pub fn stops_processing(&self) -> bool {
        *self >= STOP_THRESHOLD
    }

    /// Highest level in `levels`, or `Okay` when empty.
    pub fn max_of<I>(levels: I) -> NotificationLevel
    where
        I: IntoIterator<Item = NotificationLevel>,
    {
        levels.into_iter().max().unwrap_or_default()
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
