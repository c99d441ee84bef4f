//! Analysis logic for scanned traces
//!
//! Pure aggregation and cost attribution, separated from parsing and output.
//!
//! - `aggregator`: merge repeated samples per slot and derive elapsed time
//! - `heatmap`: distribute elapsed time over changed screen pixels
//! - `batch_analyzer`: run both over every batch of a trace

pub mod aggregator;
pub mod batch_analyzer;
pub mod heatmap;

pub use aggregator::{combine_samples, drop_trailing, rank_by_elapsed, CombinedCommand};
pub use batch_analyzer::{AnalyzedBatch, BatchAnalyzer, HeatmapStats};
pub use heatmap::{changed_pixels, CostGrid};

use crate::imaging::FrameStore;
use crate::symbolization::SymbolTable;
use crate::trace::{ScanStats, TraceScan};

/// Everything a run produces after scanning
#[derive(Debug)]
pub struct TraceAnalysis {
    pub batches: Vec<AnalyzedBatch>,
    pub grid: CostGrid,
    pub scan: ScanStats,
    pub heatmap: HeatmapStats,
    /// Labels synthesized for anonymous list calls
    pub labels: usize,
}

/// Label anonymous calls, then aggregate every batch into one shared grid
#[must_use]
pub fn analyze_trace<S: FrameStore>(
    mut scan: TraceScan,
    symbols: &SymbolTable,
    frames: &S,
) -> TraceAnalysis {
    let labels = scan.label_anonymous_calls(symbols);

    let mut analyzer = BatchAnalyzer::new(frames);
    let batches: Vec<AnalyzedBatch> =
        scan.batches.into_iter().map(|batch| analyzer.analyze(batch)).collect();
    let heatmap = analyzer.stats;

    TraceAnalysis { batches, grid: analyzer.into_grid(), scan: scan.stats, heatmap, labels }
}
