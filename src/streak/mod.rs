//! Daily study streak tracking

pub mod calendar;
pub mod models;
pub mod store;

pub use calendar::{calculate_streak, calculate_week_progress};
pub use models::StreakSnapshot;
pub use store::{StreakStore, LEGACY_STREAK_KEY, STREAK_KEY};
