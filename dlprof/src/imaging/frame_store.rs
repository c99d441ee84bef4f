//! Per-step frame snapshot lookup
//!
//! The producer can dump the framebuffer after every command step as
//! `step_<i>.bmp`. Snapshots are optional: a missing step is not an error, it
//! just contributes nothing to the heatmap. The paths actually read are kept
//! so the caller can list them alongside the report.

use super::bitmap::{decode, Frame};
use crate::domain::SlotIndex;
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Source of frame snapshots keyed by command slot
pub trait FrameStore {
    /// Snapshot taken after executing `step`, if one exists
    fn lookup(&self, step: SlotIndex) -> Option<Frame>;
}

/// Snapshots stored as `<dir>/step_<i>.bmp`
#[derive(Debug, Clone)]
pub struct DirectoryFrameStore {
    dir: PathBuf,
    /// Snapshot files read so far, in lookup order
    consulted: RefCell<Vec<PathBuf>>,
}

impl DirectoryFrameStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), consulted: RefCell::new(Vec::new()) }
    }

    /// Drain the paths of every snapshot file read so far
    pub fn take_consulted(&self) -> Vec<PathBuf> {
        self.consulted.take()
    }

    #[must_use]
    pub fn step_path(&self, step: SlotIndex) -> PathBuf {
        self.dir.join(format!("step_{step}.bmp"))
    }
}

impl FrameStore for DirectoryFrameStore {
    fn lookup(&self, step: SlotIndex) -> Option<Frame> {
        let path = self.step_path(step);
        let bytes = fs::read(&path).ok()?;
        self.consulted.borrow_mut().push(path.clone());

        match decode(&bytes) {
            Ok(frame) => Some(frame),
            Err(e) => {
                warn!("Ignoring snapshot {}: {e}", path.display());
                None
            }
        }
    }
}

/// Snapshots held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryFrameStore {
    frames: HashMap<SlotIndex, Frame>,
}

impl InMemoryFrameStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, step: SlotIndex, frame: Frame) {
        self.frames.insert(step, frame);
    }
}

impl FrameStore for InMemoryFrameStore {
    fn lookup(&self, step: SlotIndex) -> Option<Frame> {
        self.frames.get(&step).cloned()
    }
}

/// Store with no snapshots at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrames;

impl FrameStore for NoFrames {
    fn lookup(&self, _step: SlotIndex) -> Option<Frame> {
        None
    }
}
