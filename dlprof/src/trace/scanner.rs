//! # Trace Scanning and Batch Segmentation
//!
//! [`TraceScanner`] is the explicit scan context: it owns the memory overlay,
//! the list builder and the last slot index seen, and updates them as lines
//! arrive. Timing samples are routed into [`ProfileBatch`]es.
//!
//! ## Batch Boundaries
//!
//! The producer times every command slot several times in a row, so a frame
//! looks like `0 0 0 1 1 1 2 2 2 ...`. A new batch opens when a sample for
//! slot 0 follows a sample for any other slot. The very first sample always
//! opens batch 0.
//!
//! Opening a batch takes a deep copy of the overlay and records the depth-0
//! list most recently opened by the builder.

use super::classifier::{classify_line, LineKind, TimingSample};
use super::display_list::{ListArena, ListBuilder, ListId};
use crate::domain::{AnalyzerError, SlotIndex};
use crate::symbolization::{label_anonymous_calls, MemoryOverlay, SymbolTable};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Samples of one traced execution pass of the command list
#[derive(Debug, Clone)]
pub struct ProfileBatch {
    pub index: usize,
    /// Overlay as it stood when the batch opened (plus synthesized labels)
    pub overlay: MemoryOverlay,
    pub samples: Vec<TimingSample>,
    /// Depth-0 list active when the batch opened
    pub root: Option<ListId>,
}

/// Line counters for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines: usize,
    pub samples: usize,
    pub overlay_directives: usize,
    pub list_directives: usize,
    pub malformed_lists: usize,
    pub ignored: usize,
}

/// Scan context threaded through every trace line
#[derive(Debug, Default)]
pub struct TraceScanner {
    overlay: MemoryOverlay,
    lists: ListBuilder,
    last_slot: Option<SlotIndex>,
    batches: Vec<ProfileBatch>,
    stats: ScanStats,
}

impl TraceScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line and apply it to the scan state
    pub fn process_line(&mut self, line: &str) {
        self.stats.lines += 1;

        match classify_line(line) {
            LineKind::Sample(sample) => self.push_sample(sample),
            LineKind::OverlaySet { address, name } => {
                self.stats.overlay_directives += 1;
                self.overlay.set(address, name);
            }
            LineKind::OverlayClear => {
                self.stats.overlay_directives += 1;
                self.overlay.clear();
            }
            LineKind::ListDirective(directive) => {
                self.stats.list_directives += 1;
                if let Err(e) = self.lists.apply(&directive) {
                    self.stats.malformed_lists += 1;
                    warn!("{e} (line {})", self.stats.lines);
                }
            }
            LineKind::SymbolEntry { .. } | LineKind::Unmatched => self.stats.ignored += 1,
        }
    }

    fn push_sample(&mut self, sample: TimingSample) {
        self.stats.samples += 1;

        let wrapped = sample.slot.is_first() && self.last_slot.is_some_and(|s| !s.is_first());
        if self.batches.is_empty() || wrapped {
            if self.batches.is_empty() && !sample.slot.is_first() {
                warn!("Trace starts at slot {}, opening first batch anyway", sample.slot);
            }
            self.open_batch();
        }

        self.last_slot = Some(sample.slot);
        if let Some(batch) = self.batches.last_mut() {
            batch.samples.push(sample);
        }
    }

    fn open_batch(&mut self) {
        let index = self.batches.len();
        debug!("Opening batch {index} with {} overlay names", self.overlay.len());
        self.batches.push(ProfileBatch {
            index,
            overlay: self.overlay.clone(),
            samples: Vec::new(),
            root: self.lists.current_root(),
        });
    }

    /// Finish scanning and hand over the batches and list tree
    #[must_use]
    pub fn finish(self) -> TraceScan {
        TraceScan { batches: self.batches, lists: self.lists.into_arena(), stats: self.stats }
    }
}

/// Result of scanning a whole trace
#[derive(Debug)]
pub struct TraceScan {
    pub batches: Vec<ProfileBatch>,
    pub lists: ListArena,
    pub stats: ScanStats,
}

impl TraceScan {
    /// Scan trace text held in memory
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut scanner = TraceScanner::new();
        for line in text.lines() {
            scanner.process_line(line);
        }
        scanner.finish()
    }

    /// Read and scan a trace file
    ///
    /// Bytes that are not valid UTF-8 are replaced, so transport noise only
    /// spoils the line it appears on.
    ///
    /// # Errors
    /// Returns [`AnalyzerError::TraceRead`] if the file cannot be read
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|source| AnalyzerError::TraceRead { path: path.to_path_buf(), source })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Label anonymous top-level calls in every batch's overlay snapshot
    ///
    /// Returns the total number of labels synthesized.
    pub fn label_anonymous_calls(&mut self, symbols: &SymbolTable) -> usize {
        let lists = &self.lists;
        self.batches
            .iter_mut()
            .filter_map(|batch| {
                let root = batch.root?;
                Some(label_anonymous_calls(&mut batch.overlay, symbols, lists, root))
            })
            .sum()
    }
}
