//! Per-slot aggregation of repeated timing samples
//!
//! The producer re-runs each command slot several times; every run yields a
//! sample with the slot's start time. Samples for the same slot are averaged,
//! and the cost of a slot is the gap to the next slot's averaged start.

use crate::domain::SlotIndex;
use crate::imaging::Frame;
use crate::trace::{CommandWords, TimingSample};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One slot's timing after merging all of its samples
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedCommand {
    pub slot: SlotIndex,
    /// Command words of the first sample seen for this slot
    pub command: CommandWords,
    pub averaged_start_ms: f64,
    pub sample_count: usize,
    /// Time until the next slot started; `None` when that slot is absent
    pub elapsed_ms: Option<f64>,
    /// Snapshot taken after this slot ran, held only while diffing
    pub frame: Option<Frame>,
}

/// Merge samples by slot, average start times and derive elapsed times
///
/// The result is ordered by slot. Elapsed time is only set for a slot whose
/// immediate successor is also present.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn combine_samples(samples: &[TimingSample]) -> Vec<CombinedCommand> {
    let mut by_slot: BTreeMap<SlotIndex, CombinedCommand> = BTreeMap::new();

    for sample in samples {
        by_slot
            .entry(sample.slot)
            .and_modify(|existing| {
                existing.averaged_start_ms += sample.start_ms;
                existing.sample_count += 1;
            })
            .or_insert_with(|| CombinedCommand {
                slot: sample.slot,
                command: sample.command,
                averaged_start_ms: sample.start_ms,
                sample_count: 1,
                elapsed_ms: None,
                frame: None,
            });
    }

    let mut commands: Vec<CombinedCommand> = by_slot.into_values().collect();
    for command in &mut commands {
        command.averaged_start_ms /= command.sample_count as f64;
    }

    for i in 1..commands.len() {
        let next_start = commands[i].averaged_start_ms;
        let next_slot = commands[i].slot;
        let current = &mut commands[i - 1];
        if current.slot.next() == next_slot {
            current.elapsed_ms = Some(next_start - current.averaged_start_ms);
        }
    }

    commands
}

/// Remove the highest slot (the frame's closing sync)
pub fn drop_trailing(commands: &mut Vec<CombinedCommand>) -> Option<CombinedCommand> {
    commands.pop()
}

/// Sort by descending elapsed time; untimed commands go last
///
/// The sort is stable, so ties keep slot order.
pub fn rank_by_elapsed(commands: &mut [CombinedCommand]) {
    commands.sort_by(|a, b| match (a.elapsed_ms, b.elapsed_ms) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
