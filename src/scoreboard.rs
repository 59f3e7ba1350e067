//! Scoreboard module - the core's contract with the storage layer
//!
//! The persistence format and file I/O belong to the host; this module
//! owns the semantics: a descending-by-score list capped at ten entries,
//! record construction, and the rank query used to decide whether a
//! finished game earns a place on the board.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Most records the board keeps
pub const MAX_RECORDS: usize = 10;

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: i64,
    pub lines: u32,
    pub level: u32,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl ScoreRecord {
    /// Build a record stamped with the current time; the name is filled
    /// in by the score-entry flow after game over
    pub fn new(score: i64, lines: u32, level: u32) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            name: String::new(),
            score,
            lines,
            level,
            timestamp,
        }
    }
}

/// Descending top-ten score list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    records: Vec<ScoreRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted records; re-sorts and re-caps defensively
    pub fn from_records(mut records: Vec<ScoreRecord>) -> Self {
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(MAX_RECORDS);
        Self { records }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rank (0-based) a score would take, `None` if it misses the board.
    /// Ties rank below existing equal scores.
    pub fn rank_for(&self, score: i64) -> Option<usize> {
        let rank = self
            .records
            .iter()
            .position(|r| r.score < score)
            .unwrap_or(self.records.len());
        (rank < MAX_RECORDS).then_some(rank)
    }

    /// Whether a score would enter the board at all
    pub fn is_eligible(&self, score: i64) -> bool {
        self.rank_for(score).is_some()
    }

    /// Insert a record at its rank; the overflowing tail entry drops off.
    /// Returns the rank taken, or `None` if the record was not eligible.
    pub fn submit(&mut self, record: ScoreRecord) -> Option<usize> {
        let rank = self.rank_for(record.score)?;
        self.records.insert(rank, record);
        self.records.truncate(MAX_RECORDS);
        Some(rank)
    }
}
