//! Per-pass outcome counters.
//!
//! A [`RunCounters`] value is used both as the running total of a pass and
//! as the tally a single dispatch contributes to it. The retry controller is
//! the only place where tallies are folded together.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Outcome counts for one pass (or one item's contribution to a pass).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunCounters {
    /// Items (tracks, videos) attempted.
    pub total: u32,
    /// Items completed or skipped-as-success.
    pub success: u32,
    /// Hard failures. Any non-zero value triggers the retry prompt.
    pub error: u32,
    /// Tracks not available in the storefront.
    pub unavailable: u32,
    /// Entries that were not songs (e.g. videos inside an album).
    pub not_song: u32,
}

impl RunCounters {
    /// Tally for an item that succeeded, including skip-as-success.
    #[must_use]
    pub fn one_success() -> Self {
        Self {
            total: 1,
            success: 1,
            ..Self::default()
        }
    }

    /// Tally for an item that failed.
    #[must_use]
    pub fn one_error() -> Self {
        Self {
            total: 1,
            error: 1,
            ..Self::default()
        }
    }

    /// Soft-skip count shown as "Warnings" in the summary.
    #[must_use]
    pub fn warnings(&self) -> u32 {
        self.unavailable.saturating_add(self.not_song)
    }

    /// Returns true when the pass had no hard failures.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error == 0
    }

    /// Returns true when nothing was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for RunCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.total = self.total.saturating_add(rhs.total);
        self.success = self.success.saturating_add(rhs.success);
        self.error = self.error.saturating_add(rhs.error);
        self.unavailable = self.unavailable.saturating_add(rhs.unavailable);
        self.not_song = self.not_song.saturating_add(rhs.not_song);
    }
}
