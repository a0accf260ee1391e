//! Data models for terms and per-term study progress

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mastery::mastery_level;

/// A catalog entry: one medical term with its definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_terms: Vec<String>,
}

/// How well a term is known, derived from cumulative study counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MasteryLevel {
    /// Never studied
    #[default]
    New,
    Learning,
    Familiar,
    Mastered,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 4] = [
        MasteryLevel::New,
        MasteryLevel::Learning,
        MasteryLevel::Familiar,
        MasteryLevel::Mastered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryLevel::New => "new",
            MasteryLevel::Learning => "learning",
            MasteryLevel::Familiar => "familiar",
            MasteryLevel::Mastered => "mastered",
        }
    }
}

impl std::fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Study progress for a single term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub term_id: String,
    #[serde(default)]
    pub times_studied: u32,
    #[serde(default)]
    pub times_correct: u32,
    #[serde(default)]
    pub times_incorrect: u32,
    #[serde(default)]
    pub last_studied: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mastery_level: MasteryLevel,
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Progress {
    pub fn new(term_id: impl Into<String>) -> Self {
        Self {
            term_id: term_id.into(),
            times_studied: 0,
            times_correct: 0,
            times_incorrect: 0,
            last_studied: None,
            mastery_level: MasteryLevel::New,
            is_favorited: false,
            is_bookmarked: false,
        }
    }

    /// Apply one study event and re-derive the mastery level
    pub fn record_study(&mut self, correct: bool, at: DateTime<Utc>) {
        self.times_studied += 1;
        if correct {
            self.times_correct += 1;
        } else {
            self.times_incorrect += 1;
        }
        self.last_studied = Some(at);
        self.mastery_level = mastery_level(self.times_studied, self.times_correct);
    }

    /// Fraction of correct answers, 0.0 when never studied
    pub fn accuracy(&self) -> f64 {
        if self.times_studied == 0 {
            0.0
        } else {
            self.times_correct as f64 / self.times_studied as f64
        }
    }
}

/// Persisted subset of the progress store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub terms: Vec<Term>,
    #[serde(default)]
    pub progress: HashMap<String, Progress>,
}

/// Number of catalog terms at each mastery level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterySummary {
    pub total_terms: usize,
    pub new_terms: usize,
    pub learning_terms: usize,
    pub familiar_terms: usize,
    pub mastered_terms: usize,
}

impl MasterySummary {
    pub fn count(&self, level: MasteryLevel) -> usize {
        match level {
            MasteryLevel::New => self.new_terms,
            MasteryLevel::Learning => self.learning_terms,
            MasteryLevel::Familiar => self.familiar_terms,
            MasteryLevel::Mastered => self.mastered_terms,
        }
    }

    pub(crate) fn add(&mut self, level: MasteryLevel) {
        self.total_terms += 1;
        match level {
            MasteryLevel::New => self.new_terms += 1,
            MasteryLevel::Learning => self.learning_terms += 1,
            MasteryLevel::Familiar => self.familiar_terms += 1,
            MasteryLevel::Mastered => self.mastered_terms += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_json_shape() {
        let mut progress = Progress::new("t1");
        progress.record_study(true, "2026-03-01T08:00:00Z".parse().unwrap());

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["termId"], "t1");
        assert_eq!(json["timesStudied"], 1);
        assert_eq!(json["masteryLevel"], "learning");
        assert_eq!(json["lastStudied"], "2026-03-01T08:00:00Z");
        assert_eq!(json["isFavorited"], false);
    }

    #[test]
    fn test_progress_from_older_json_defaults_missing_fields() {
        let progress: Progress =
            serde_json::from_str(r#"{"termId":"t9","timesStudied":2,"timesCorrect":1,"timesIncorrect":1}"#)
                .unwrap();

        assert_eq!(progress.mastery_level, MasteryLevel::New);
        assert_eq!(progress.last_studied, None);
        assert!(!progress.is_bookmarked);
    }

    #[test]
    fn test_record_study_keeps_counts_consistent() {
        let mut progress = Progress::new("t1");
        let at = Utc::now();
        for correct in [true, false, true, true, false, true] {
            progress.record_study(correct, at);
            assert_eq!(
                progress.times_studied,
                progress.times_correct + progress.times_incorrect
            );
        }
        assert_eq!(progress.times_studied, 6);
        assert!((progress.accuracy() - 4.0 / 6.0).abs() < f64::EPSILON);
    }
}
