//! Ranked text report
//!
//! ```text
//! start of batch
//! 7 1 gsSPDisplayList(wall_dl+floor_dl)
//! 2 0 gsSPSegment(0x6, 0x80200000)
//! end of batch
//! ```
//!
//! Each line is `<elapsed> <slot> <command>`; operands that are addresses are
//! named through the batch's overlay snapshot and the symbol table.

use crate::analysis::{AnalyzedBatch, CombinedCommand};
use crate::symbolization::{AddressNamer, SymbolTable};
use crate::trace::CommandWords;
use dlprof_common::{
    G_DL, G_ENDDL, G_FILLRECT, G_MOVEWORD, G_MTX, G_POPMTX, G_RDPFULLSYNC, G_RDPLOADSYNC,
    G_RDPPIPESYNC, G_RDPTILESYNC, G_SETTIMG, G_TEXRECT, G_TRI1, G_TRI2, G_VTX,
};
use std::io::{self, Write};

/// Render a command as its display-list macro
#[must_use]
pub fn format_command(command: &CommandWords, namer: &AddressNamer<'_>) -> String {
    match command.opcode.0 {
        G_MOVEWORD => {
            let segment = (command.word0 & 0xff) / 4;
            format!("gsSPSegment(0x{segment:x}, 0x{:08x})", command.word1)
        }
        G_DL => format!("gsSPDisplayList({})", namer.format(command.target())),
        G_VTX => format!("gsSPVertex({})", namer.format(command.target())),
        G_SETTIMG => format!("gsDPSetTextureImage({})", namer.format(command.target())),
        G_FILLRECT => "gsDPFillRectangle".to_string(),
        G_TEXRECT => "gsSPTextureRectangle".to_string(),
        G_TRI1 => "gsSP1Triangle".to_string(),
        G_TRI2 => "gsSP2Triangles".to_string(),
        G_POPMTX => "gsSPPopMatrix".to_string(),
        G_MTX => "gsSPMatrix".to_string(),
        G_ENDDL => "gsSPEndDisplayList".to_string(),
        G_RDPPIPESYNC => "gsDPPipeSync".to_string(),
        G_RDPTILESYNC => "gsDPTileSync".to_string(),
        G_RDPLOADSYNC => "gsDPLoadSync".to_string(),
        G_RDPFULLSYNC => "gsDPFullSync".to_string(),
        _ => format!("unknown {} 0x{:06x}{:08x}", command.opcode, command.word0, command.word1),
    }
}

/// One report line: `<elapsed> <slot> <command>`
#[must_use]
pub fn format_report_line(command: &CombinedCommand, namer: &AddressNamer<'_>) -> String {
    let elapsed = command.elapsed_ms.map_or_else(|| "-".to_string(), |e| e.to_string());
    format!("{elapsed} {} {}", command.slot, format_command(&command.command, namer))
}

/// Write every batch between `start of batch` / `end of batch` markers
///
/// # Errors
/// Returns any error from the underlying writer
pub fn write_report<W: Write>(
    mut out: W,
    batches: &[AnalyzedBatch],
    symbols: &SymbolTable,
) -> io::Result<()> {
    for batch in batches {
        let namer = AddressNamer::new(&batch.overlay, symbols);
        writeln!(out, "start of batch")?;
        for command in &batch.commands {
            writeln!(out, "{}", format_report_line(command, &namer))?;
        }
        writeln!(out, "end of batch")?;
    }
    out.flush()
}
