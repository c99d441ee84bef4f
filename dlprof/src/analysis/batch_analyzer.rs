//! # Batch Analysis
//!
//! Turns each scanned [`ProfileBatch`] into ranked commands and feeds the
//! run-wide [`CostGrid`]:
//!
//! ```text
//! ProfileBatch.samples
//!     │
//!     ├──► combine_samples()      average per slot, derive elapsed time
//!     ├──► FrameStore::lookup()   optional snapshot per slot
//!     ├──► CostGrid::attribute()  diff slot i against slot i+1
//!     ├──► drop_trailing()        closing sync carries no cost
//!     └──► rank_by_elapsed()
//! ```
//!
//! Snapshots are released pair by pair while diffing, so at most one batch's
//! frames are alive at any time.

use super::aggregator::{combine_samples, drop_trailing, rank_by_elapsed, CombinedCommand};
use super::heatmap::CostGrid;
use crate::imaging::FrameStore;
use crate::symbolization::MemoryOverlay;
use crate::trace::ProfileBatch;
use log::{debug, warn};

/// A batch after aggregation, ready for reporting
#[derive(Debug, Clone)]
pub struct AnalyzedBatch {
    pub index: usize,
    pub overlay: MemoryOverlay,
    pub sample_count: usize,
    /// Commands ranked by descending elapsed time, trailing sync removed
    pub commands: Vec<CombinedCommand>,
}

/// Snapshot and heatmap counters for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeatmapStats {
    pub frames_loaded: usize,
    pub pairs_diffed: usize,
    pub unchanged_pairs: usize,
    pub mismatched_frames: usize,
}

/// Encapsulates per-batch analysis and the shared cost grid
pub struct BatchAnalyzer<'a, S: FrameStore> {
    frames: &'a S,
    grid: CostGrid,
    pub stats: HeatmapStats,
}

impl<'a, S: FrameStore> BatchAnalyzer<'a, S> {
    #[must_use]
    pub fn new(frames: &'a S) -> Self {
        Self { frames, grid: CostGrid::default(), stats: HeatmapStats::default() }
    }

    /// Use a grid of non-screen dimensions
    #[must_use]
    pub fn with_grid(frames: &'a S, grid: CostGrid) -> Self {
        Self { frames, grid, stats: HeatmapStats::default() }
    }

    /// Aggregate one batch and attribute its frame changes to the grid
    pub fn analyze(&mut self, batch: ProfileBatch) -> AnalyzedBatch {
        let mut commands = combine_samples(&batch.samples);

        for command in &mut commands {
            command.frame = self.frames.lookup(command.slot);
            if command.frame.is_some() {
                self.stats.frames_loaded += 1;
            }
        }

        self.attribute_frames(&mut commands);

        if let Some(trailing) = drop_trailing(&mut commands) {
            debug!("Batch {}: dropped trailing slot {}", batch.index, trailing.slot);
        }
        rank_by_elapsed(&mut commands);

        AnalyzedBatch {
            index: batch.index,
            overlay: batch.overlay,
            sample_count: batch.samples.len(),
            commands,
        }
    }

    fn attribute_frames(&mut self, commands: &mut [CombinedCommand]) {
        for i in 0..commands.len() {
            let before = commands[i].frame.take();
            let (Some(before), Some(elapsed)) = (before, commands[i].elapsed_ms) else {
                continue;
            };
            let Some(after) = commands.get(i + 1).and_then(|next| next.frame.as_ref()) else {
                continue;
            };

            match self.grid.attribute(&before, after, elapsed) {
                Ok(0) => self.stats.unchanged_pairs += 1,
                Ok(_) => self.stats.pairs_diffed += 1,
                Err(e) => {
                    self.stats.mismatched_frames += 1;
                    warn!("Skipping snapshot pair at slot {}: {e}", commands[i].slot);
                }
            }
        }
    }

    #[must_use]
    pub fn grid(&self) -> &CostGrid {
        &self.grid
    }

    #[must_use]
    pub fn into_grid(self) -> CostGrid {
        self.grid
    }
}
