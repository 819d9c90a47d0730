//! Progress arithmetic over one point-in-time read of the catalog
//!
//! All derived figures are recomputed fresh from each snapshot; nothing is
//! persisted across polls except through the store itself.

use crate::db::LyricsCounts;
use serde::Serialize;

/// One point-in-time view of lyrics-fetch progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// Total rows in the catalog at query time
    pub total: i64,
    /// Rows with a non-null lyrics payload at query time
    pub completed: i64,
    /// Rows whose lyrics landed within the last hour
    pub recent: i64,
}

impl ProgressSnapshot {
    pub fn from_counts(counts: LyricsCounts) -> Self {
        Self {
            total: counts.total,
            completed: counts.with_lyrics,
            recent: counts.recent,
        }
    }

    /// Rows still missing lyrics
    pub fn remaining(&self) -> i64 {
        self.total - self.completed
    }

    /// Completion percentage, defined as 0.0 for an empty catalog
    ///
    /// # Examples
    /// ```
    /// use lyrdb_common::db::LyricsCounts;
    /// use lyrdb_common::ProgressSnapshot;
    ///
    /// let snap = ProgressSnapshot::from_counts(LyricsCounts {
    ///     total: 986,
    ///     with_lyrics: 500,
    ///     recent: 0,
    /// });
    /// assert!((snap.percentage() - 50.7099).abs() < 0.001);
    /// ```
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            // Empty store is a defined state, not a division error
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Estimated minutes to completion at `secs_per_song` per remaining row
    ///
    /// `None` when nothing remains (or the catalog is empty): there is no
    /// meaningful estimate to show.
    pub fn eta_minutes(&self, secs_per_song: f64) -> Option<f64> {
        if self.remaining() <= 0 {
            return None;
        }
        Some(self.remaining() as f64 * secs_per_song / 60.0)
    }

    /// True when every row has lyrics (empty catalog is not complete)
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// True when the catalog holds no rows at all
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
