use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use medflash_lib::config::AppConfig;
use medflash_lib::terms::Term;
use medflash_lib::Stores;

/// Shared application state for CLI commands
pub struct App {
    pub stores: Stores,
}

impl App {
    /// Open and hydrate the stores, from `data_dir` or the default data directory
    pub async fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let config = match data_dir {
            Some(dir) => AppConfig::load(&dir),
            None => AppConfig::load_default(),
        }
        .context("Failed to load configuration")?;

        log::debug!("Using data directory {}", config.data_dir.display());
        let mut stores = Stores::open(&config).context("Failed to open stores")?;
        stores.init().await;

        if let Some(err) = stores.progress.error() {
            log::warn!("Progress store recovered from: {}", err);
        }
        if let Some(err) = stores.streak.error() {
            log::warn!("Streak store recovered from: {}", err);
        }

        Ok(Self { stores })
    }

    /// Wait for pending writes before the process exits
    pub async fn close(mut self) {
        self.stores.flush().await;
    }

    /// Find a term by id, or by name (case-insensitive prefix match)
    pub fn find_term(&self, query: &str) -> Result<Term> {
        let progress = &self.stores.progress;
        if let Some(term) = progress.get_term_by_id(query) {
            return Ok(term.clone());
        }

        let query_lower = query.to_lowercase();
        let terms = progress.terms();

        // Exact match first
        if let Some(term) = terms.iter().find(|t| t.term.to_lowercase() == query_lower) {
            return Ok(term.clone());
        }

        // Prefix match
        let matches: Vec<&Term> = terms
            .iter()
            .filter(|t| t.term.to_lowercase().starts_with(&query_lower))
            .collect();

        match matches.len() {
            0 => bail!("No term matching '{}'", query),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous term '{}'. Matches:\n{}",
                query,
                matches
                    .iter()
                    .map(|t| format!("  - {} ({})", t.term, t.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}
