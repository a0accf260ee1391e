//! Streak store: study dates, current/longest streak and the week vector
//!
//! Persisted under `medflash.streak` in the secure store; older versions kept
//! the same fields under `study-streak-storage` in the legacy store.

use serde::Serialize;

use super::calendar::{calculate_streak, calculate_week_progress, format_day, retain_recent};
use super::models::StreakSnapshot;
use crate::context::StoreContext;
use crate::storage::migration::{read_legacy, schedule_legacy_cleanup};
use crate::storage::snapshot::{read_snapshot, spawn_write, PendingTasks};

pub const STREAK_KEY: &str = "medflash.streak";
pub const LEGACY_STREAK_KEY: &str = "study-streak-storage";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    current_streak: u32,
    longest_streak: u32,
    study_dates: &'a [String],
    week_progress: &'a [bool; 7],
}

pub struct StreakStore {
    ctx: StoreContext,
    study_dates: Vec<String>,
    current_streak: u32,
    longest_streak: u32,
    week_progress: [bool; 7],
    hydrated: bool,
    is_loading: bool,
    error: Option<String>,
    pending: PendingTasks,
}

impl StreakStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            ctx,
            study_dates: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            week_progress: [false; 7],
            hydrated: false,
            is_loading: false,
            error: None,
            pending: PendingTasks::default(),
        }
    }

    pub fn study_dates(&self) -> &[String] {
        &self.study_dates
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn week_progress(&self) -> [bool; 7] {
        self.week_progress
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> StreakSnapshot {
        StreakSnapshot {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            study_dates: self.study_dates.clone(),
            week_progress: self.week_progress,
        }
    }

    fn apply(&mut self, snapshot: StreakSnapshot) {
        self.current_streak = snapshot.current_streak;
        self.longest_streak = snapshot.longest_streak.max(snapshot.current_streak);
        self.study_dates = snapshot.study_dates;
        self.week_progress = snapshot.week_progress;
    }

    // ==================== Lifecycle ====================

    pub async fn init(&mut self) {
        self.hydrate().await;
        self.load_streak().await;
    }

    pub async fn hydrate(&mut self) {
        match read_snapshot::<StreakSnapshot>(self.ctx.secure.as_ref(), STREAK_KEY).await {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Hydrated streak: {} current, {} longest, {} study dates",
                    snapshot.current_streak,
                    snapshot.longest_streak,
                    snapshot.study_dates.len()
                );
                self.apply(snapshot);
                self.hydrated = true;
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Ignoring unreadable streak snapshot: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Same fallback chain as the progress store: keep hydrated state, else
    /// adopt legacy data, else start from zero.
    pub async fn load_streak(&mut self) {
        if self.hydrated {
            self.is_loading = false;
            self.error = None;
            return;
        }

        self.is_loading = true;

        match read_legacy::<StreakSnapshot>(self.ctx.legacy.as_ref(), LEGACY_STREAK_KEY).await {
            Some(snapshot) => {
                log::info!(
                    "Migrating streak from legacy storage ({} study dates)",
                    snapshot.study_dates.len()
                );
                self.apply(snapshot);
                self.save();
                if let Some(handle) = schedule_legacy_cleanup(
                    self.ctx.legacy.clone(),
                    LEGACY_STREAK_KEY,
                    self.ctx.legacy_cleanup_delay,
                ) {
                    self.pending.push(handle);
                }
            }
            None => {
                log::debug!("No stored streak, starting empty");
                self.apply(StreakSnapshot::default());
            }
        }

        self.hydrated = true;
        self.is_loading = false;
    }

    pub async fn flush(&mut self) {
        self.pending.flush().await;
    }

    // ==================== Operations ====================

    pub fn has_studied_today(&self) -> bool {
        let today = format_day(self.ctx.clock.today());
        self.study_dates.contains(&today)
    }

    /// Mark today as studied. Returns `false` when today was already recorded.
    pub fn record_study_session(&mut self) -> bool {
        let today = self.ctx.clock.today();
        let today_str = format_day(today);
        if self.study_dates.contains(&today_str) {
            return false;
        }

        retain_recent(&mut self.study_dates);
        self.study_dates.push(today_str);

        self.current_streak = calculate_streak(&self.study_dates);
        self.week_progress = calculate_week_progress(&self.study_dates, today);
        self.longest_streak = self.longest_streak.max(self.current_streak);

        log::debug!(
            "Study session recorded: streak {} (longest {})",
            self.current_streak,
            self.longest_streak
        );

        self.save();
        true
    }

    fn save(&mut self) {
        let snapshot = SnapshotRef {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            study_dates: &self.study_dates,
            week_progress: &self.week_progress,
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize streak snapshot: {}", e);
                return;
            }
        };

        if let Some(handle) = spawn_write(self.ctx.secure.clone(), STREAK_KEY, json) {
            self.pending.push(handle);
        }
    }
}
