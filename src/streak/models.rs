//! Study streak data models

use serde::{Deserialize, Serialize};

/// Persisted subset of the streak store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSnapshot {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Day-strings (`YYYY-MM-DD`), oldest first
    #[serde(default)]
    pub study_dates: Vec<String>,
    /// Monday..Sunday of the current week
    #[serde(default)]
    pub week_progress: [bool; 7],
}
