//! Progress store: term catalog plus per-term study progress
//!
//! Persisted layout (secure store):
//! ```text
//! medflash.progress      { "terms": [...], "progress": { termId: Progress } }
//! ```
//! Legacy plaintext layout, read once during migration:
//! ```text
//! medical-terms-storage  { "state": { "terms": [...], "progress": {...} }, "version": 0 }
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::catalog::sample_terms;
use super::models::*;
use crate::context::StoreContext;
use crate::storage::migration::{read_legacy, schedule_legacy_cleanup};
use crate::storage::snapshot::{read_snapshot, spawn_write, PendingTasks};

pub const PROGRESS_KEY: &str = "medflash.progress";
pub const LEGACY_PROGRESS_KEY: &str = "medical-terms-storage";

/// Borrowed form of [`ProgressSnapshot`] for writing without cloning state
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    terms: &'a [Term],
    progress: &'a HashMap<String, Progress>,
}

pub struct ProgressStore {
    ctx: StoreContext,
    terms: Vec<Term>,
    progress: HashMap<String, Progress>,
    is_loading: bool,
    error: Option<String>,
    pending: PendingTasks,
}

impl ProgressStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            ctx,
            terms: Vec::new(),
            progress: HashMap::new(),
            is_loading: false,
            error: None,
            pending: PendingTasks::default(),
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn progress(&self) -> &HashMap<String, Progress> {
        &self.progress
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last load error, if any. The store stays usable regardless.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ==================== Lifecycle ====================

    /// Hydrate, then fall back to legacy data or the built-in catalog
    pub async fn init(&mut self) {
        self.hydrate().await;
        self.load_terms().await;
    }

    /// Restore state from the secure store's snapshot, if one exists
    pub async fn hydrate(&mut self) {
        match read_snapshot::<ProgressSnapshot>(self.ctx.secure.as_ref(), PROGRESS_KEY).await {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Hydrated {} terms and {} progress records",
                    snapshot.terms.len(),
                    snapshot.progress.len()
                );
                self.terms = snapshot.terms;
                self.progress = snapshot.progress;
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Ignoring unreadable progress snapshot: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Make sure the catalog is populated.
    ///
    /// A no-op when hydration already produced terms. Otherwise legacy data is
    /// adopted (and its key removed after the cleanup delay), or the built-in
    /// catalog is seeded.
    pub async fn load_terms(&mut self) {
        if !self.terms.is_empty() {
            self.is_loading = false;
            self.error = None;
            return;
        }

        self.is_loading = true;

        let legacy = read_legacy::<ProgressSnapshot>(self.ctx.legacy.as_ref(), LEGACY_PROGRESS_KEY).await;
        match legacy {
            Some(snapshot) => {
                log::info!(
                    "Migrating {} terms and {} progress records from legacy storage",
                    snapshot.terms.len(),
                    snapshot.progress.len()
                );
                self.terms = if snapshot.terms.is_empty() {
                    sample_terms()
                } else {
                    snapshot.terms
                };
                self.progress = snapshot.progress;
                // New write first, legacy delete after the delay
                self.save();
                if let Some(handle) = schedule_legacy_cleanup(
                    self.ctx.legacy.clone(),
                    LEGACY_PROGRESS_KEY,
                    self.ctx.legacy_cleanup_delay,
                ) {
                    self.pending.push(handle);
                }
            }
            None => {
                log::info!("No stored terms, seeding the built-in catalog");
                self.terms = sample_terms();
                self.save();
            }
        }

        self.is_loading = false;
    }

    /// Wait for outstanding writes and legacy cleanups
    pub async fn flush(&mut self) {
        self.pending.flush().await;
    }

    // ==================== Queries ====================

    pub fn get_term_by_id(&self, id: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.id == id)
    }

    /// Case-insensitive substring search over term and definition.
    /// An empty query returns every term.
    pub fn search_terms(&self, query: &str) -> Vec<&Term> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.terms.iter().collect();
        }

        self.terms
            .iter()
            .filter(|t| {
                t.term.to_lowercase().contains(&query) || t.definition.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn get_progress(&self, term_id: &str) -> Option<&Progress> {
        self.progress.get(term_id)
    }

    /// Terms in `category`, compared case-insensitively
    pub fn terms_by_category(&self, category: &str) -> Vec<&Term> {
        self.terms
            .iter()
            .filter(|t| t.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.terms
            .iter()
            .map(|t| t.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn favorite_terms(&self) -> Vec<&Term> {
        self.terms_where(|p| p.is_favorited)
    }

    pub fn bookmarked_terms(&self) -> Vec<&Term> {
        self.terms_where(|p| p.is_bookmarked)
    }

    fn terms_where(&self, pred: impl Fn(&Progress) -> bool) -> Vec<&Term> {
        self.terms
            .iter()
            .filter(|t| self.progress.get(&t.id).map_or(false, &pred))
            .collect()
    }

    /// Count catalog terms per mastery level; unstudied terms count as new
    pub fn mastery_summary(&self) -> MasterySummary {
        let mut summary = MasterySummary::default();
        for term in &self.terms {
            let level = self
                .progress
                .get(&term.id)
                .map(|p| p.mastery_level)
                .unwrap_or_default();
            summary.add(level);
        }
        summary
    }

    // ==================== Mutations ====================

    /// Record one study event for a term and persist
    pub fn update_progress(&mut self, term_id: &str, correct: bool) -> Progress {
        let now = self.ctx.clock.now();
        let progress = self.get_or_create(term_id);
        progress.record_study(correct, now);
        let updated = progress.clone();

        log::debug!(
            "Term {} studied ({}), now {}",
            term_id,
            if correct { "correct" } else { "incorrect" },
            updated.mastery_level
        );

        self.save();
        updated
    }

    /// Flip the favorite flag and persist. Returns the new value.
    pub fn toggle_favorite(&mut self, term_id: &str) -> bool {
        let progress = self.get_or_create(term_id);
        progress.is_favorited = !progress.is_favorited;
        let value = progress.is_favorited;
        self.save();
        value
    }

    /// Flip the bookmark flag and persist. Returns the new value.
    pub fn toggle_bookmark(&mut self, term_id: &str) -> bool {
        let progress = self.get_or_create(term_id);
        progress.is_bookmarked = !progress.is_bookmarked;
        let value = progress.is_bookmarked;
        self.save();
        value
    }

    fn get_or_create(&mut self, term_id: &str) -> &mut Progress {
        self.progress
            .entry(term_id.to_string())
            .or_insert_with(|| Progress::new(term_id))
    }

    /// Serialize the persisted subset and write it on a detached task
    fn save(&mut self) {
        let snapshot = SnapshotRef {
            terms: &self.terms,
            progress: &self.progress,
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize progress snapshot: {}", e);
                return;
            }
        };

        if let Some(handle) = spawn_write(self.ctx.secure.clone(), PROGRESS_KEY, json) {
            self.pending.push(handle);
        }
    }
}
