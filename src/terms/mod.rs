//! Medical term catalog and study progress
//!
//! This module provides:
//! - Term and progress models
//! - The mastery rule deriving a level from study counts
//! - The built-in sample catalog
//! - `ProgressStore`, the persisted in-memory store the UI talks to

pub mod catalog;
pub mod mastery;
pub mod models;
pub mod store;

pub use mastery::mastery_level;
pub use models::*;
pub use store::{ProgressStore, LEGACY_PROGRESS_KEY, PROGRESS_KEY};
