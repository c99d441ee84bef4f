//! JSON copy of the ranked report, with camelCase keys for external tooling

use crate::analysis::{AnalyzedBatch, CostGrid, HeatmapStats};
use crate::domain::ExportError;
use crate::symbolization::{AddressNamer, SymbolTable};
use serde::Serialize;
use std::io::Write;

use super::report::format_command;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCommand {
    slot: usize,
    opcode: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    averaged_start_ms: f64,
    sample_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonBatch {
    index: usize,
    sample_count: usize,
    commands: Vec<JsonCommand>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHeatmap {
    width: usize,
    height: usize,
    max_cost: f64,
    frames_diffed: usize,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    batches: Vec<JsonBatch>,
    heatmap: JsonHeatmap,
}

/// Machine-readable copy of the ranked report
pub struct JsonReportExporter<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> JsonReportExporter<'a> {
    #[must_use]
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// Write batches and heatmap summary as pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails
    pub fn export<W: Write>(
        &self,
        mut writer: W,
        batches: &[AnalyzedBatch],
        grid: &CostGrid,
        stats: &HeatmapStats,
    ) -> Result<(), ExportError> {
        let report = JsonReport {
            batches: batches.iter().map(|batch| self.batch(batch)).collect(),
            heatmap: JsonHeatmap {
                width: grid.width(),
                height: grid.height(),
                max_cost: grid.max_cost(),
                frames_diffed: stats.pairs_diffed,
            },
        };

        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
        Ok(())
    }

    fn batch(&self, batch: &AnalyzedBatch) -> JsonBatch {
        let namer = AddressNamer::new(&batch.overlay, self.symbols);
        JsonBatch {
            index: batch.index,
            sample_count: batch.sample_count,
            commands: batch
                .commands
                .iter()
                .map(|command| JsonCommand {
                    slot: command.slot.0,
                    opcode: command.command.opcode.to_string(),
                    label: format_command(&command.command, &namer),
                    elapsed_ms: command.elapsed_ms,
                    averaged_start_ms: command.averaged_start_ms,
                    sample_count: command.sample_count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CombinedCommand;
    use crate::domain::{Opcode, SlotIndex};
    use crate::symbolization::MemoryOverlay;
    use crate::trace::CommandWords;

    #[test]
    fn test_export_creates_valid_json() {
        let symbols = SymbolTable::parse("0xffffffff80100000 gWallDl\n");
        let batch = AnalyzedBatch {
            index: 0,
            overlay: MemoryOverlay::new(),
            sample_count: 2,
            commands: vec![CombinedCommand {
                slot: SlotIndex(0),
                command: CommandWords { opcode: Opcode(0xde), word0: 0, word1: 0x8010_0000 },
                averaged_start_ms: 1.0,
                sample_count: 2,
                elapsed_ms: Some(3.5),
                frame: None,
            }],
        };

        let mut buffer = Vec::new();
        JsonReportExporter::new(&symbols)
            .export(&mut buffer, &[batch], &CostGrid::new(4, 3), &HeatmapStats::default())
            .expect("Failed to export report");

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).expect("Invalid JSON");
        let command = &parsed["batches"][0]["commands"][0];
        assert_eq!(command["label"], "gsSPDisplayList(gWallDl)");
        assert_eq!(command["opcode"], "0xde");
        assert_eq!(command["elapsedMs"], 3.5);
        assert_eq!(parsed["batches"][0]["sampleCount"], 2);
        assert_eq!(parsed["heatmap"]["width"], 4);
        assert_eq!(parsed["heatmap"]["maxCost"], 0.0);
    }
}
