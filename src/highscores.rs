//! High score leaderboard system
//!
//! Persisted under a single storage key, tracks the top 10 scores.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name at the time of the run
    pub name: String,
    /// Final score
    pub score: u64,
    /// ISO-8601 timestamp when achieved
    #[serde(rename = "date")]
    pub timestamp: String,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Add a new score to the leaderboard.
    ///
    /// Ties keep earlier entries ahead. Returns the rank achieved (1-indexed),
    /// or None when the entry fell off the bottom of a full table.
    pub fn add_score(&mut self, name: &str, score: u64, timestamp: String) -> Option<usize> {
        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            timestamp,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Parse a stored table; anything malformed reads as empty
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<HighScoreEntry>>(json) {
            Ok(entries) => Self::from_entries(entries),
            Err(err) => {
                log::warn!("Discarding malformed high scores: {}", err);
                Self::new()
            }
        }
    }

    /// Build a table from arbitrary entries, restoring sort order and capacity
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Load high scores (best-effort)
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(err) => {
                log::warn!("High scores unreadable ({}), starting fresh", err);
                Self::new()
            }
        }
    }

    /// Save high scores (best-effort, failures are logged and dropped)
    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
                Err(err) => log::warn!("High scores not saved: {}", err),
            },
            Err(err) => log::warn!("High scores not serialized: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use proptest::prelude::*;

    fn ts(i: u64) -> String {
        format!("2026-01-01T00:00:{:02}.000Z", i % 60)
    }

    #[test]
    fn test_eleven_entries_keep_top_ten() {
        let mut scores = HighScores::new();
        for (i, score) in [5, 80, 12, 1, 44, 90, 3, 27, 61, 18, 9].iter().enumerate() {
            scores.add_score("p", *score, ts(i as u64));
        }
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        let values: Vec<u64> = scores.entries().iter().map(|e| e.score).collect();
        assert_eq!(values, vec![90, 80, 61, 44, 27, 18, 12, 9, 5, 3]);
    }

    #[test]
    fn test_rank_and_ties() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("a", 10, ts(0)), Some(1));
        assert_eq!(scores.add_score("b", 20, ts(1)), Some(1));
        assert_eq!(scores.add_score("c", 10, ts(2)), Some(3));
        let names: Vec<&str> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_zero_score_recorded_when_room() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("Guest", 0, ts(0)), Some(1));
        assert_eq!(scores.top_score(), Some(0));
    }

    #[test]
    fn test_full_table_drops_low_entry() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES as u64 {
            scores.add_score("p", 100 + i, ts(i));
        }
        assert_eq!(scores.add_score("late", 50, ts(30)), None);
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert!(scores.entries().iter().all(|e| e.name != "late"));
    }

    #[test]
    fn test_malformed_storage_reads_empty() {
        for raw in ["{\"not\":\"an array\"}", "42", "[{\"name\":1}]", "garbage"] {
            let storage = MemoryStorage::new().with_item(HighScores::STORAGE_KEY, raw);
            assert!(HighScores::load(&storage).is_empty(), "raw: {}", raw);
        }
    }

    #[test]
    fn test_load_restores_order_and_capacity() {
        let entries: Vec<_> = (0..15)
            .map(|i| format!(r#"{{"name":"p{i}","score":{i},"date":"{}"}}"#, ts(i)))
            .collect();
        let raw = format!("[{}]", entries.join(","));
        let storage = MemoryStorage::new().with_item(HighScores::STORAGE_KEY, &raw);
        let scores = HighScores::load(&storage);
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(14));
    }

    #[test]
    fn test_save_and_reload() {
        let mut storage = MemoryStorage::new();
        let mut scores = HighScores::new();
        scores.add_score("Ada", 42, ts(1));
        scores.save(&mut storage);

        let raw = storage.get(HighScores::STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"date\""));
        assert_eq!(HighScores::load(&storage), scores);
    }

    #[test]
    fn test_failed_write_is_ignored() {
        let mut storage = MemoryStorage::read_only();
        let mut scores = HighScores::new();
        scores.add_score("Ada", 42, ts(1));
        scores.save(&mut storage);
        assert!(HighScores::load(&storage).is_empty());
    }

    proptest! {
        #[test]
        fn prop_sorted_and_bounded(values in proptest::collection::vec(0u64..1000, 0..40)) {
            let mut scores = HighScores::new();
            for (i, v) in values.iter().enumerate() {
                scores.add_score("p", *v, ts(i as u64));
            }
            prop_assert!(scores.len() <= MAX_HIGH_SCORES);
            prop_assert_eq!(scores.len(), values.len().min(MAX_HIGH_SCORES));
            prop_assert!(scores.entries().windows(2).all(|w| w[0].score >= w[1].score));

            let mut expected = values.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(MAX_HIGH_SCORES);
            let kept: Vec<u64> = scores.entries().iter().map(|e| e.score).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
