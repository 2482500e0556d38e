//! Placement counters

use rustc_hash::FxHashMap;

use crate::content::ContentId;

/// Running totals for a placement controller
#[derive(Debug, Clone, Default)]
pub struct PlacementStats {
    placements: u64,
    failed_placements: u64,
    resets: u64,
    removed: u64,
    per_content: FxHashMap<ContentId, u64>,
}

impl PlacementStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_placement(&mut self, content: &ContentId) {
        self.placements += 1;
        *self.per_content.entry(content.clone()).or_default() += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed_placements += 1;
    }

    pub(crate) fn record_reset(&mut self, removed: usize) {
        self.resets += 1;
        self.removed += removed as u64;
    }

    /// Successful placements
    #[must_use]
    pub fn placements(&self) -> u64 {
        self.placements
    }

    /// Placements that were aborted by an error
    #[must_use]
    pub fn failed_placements(&self) -> u64 {
        self.failed_placements
    }

    #[must_use]
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Entities removed across all resets
    #[must_use]
    pub fn removed(&self) -> u64 {
        self.removed
    }

    /// How many times `content` has been placed
    #[must_use]
    pub fn placements_of(&self, content: &ContentId) -> u64 {
        self.per_content.get(content).copied().unwrap_or(0)
    }

    /// Get a formatted stats string
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "placed: {} | failed: {} | resets: {} (removed {})",
            self.placements, self.failed_placements, self.resets, self.removed
        )
    }
}
