//! # Shared Trace Format (Command Processor ↔ Analyzer)
//!
//! Defines the constants shared between the instrumented command processor that
//! emits the profiling trace and the offline analyzer that consumes it. The
//! producer writes command words and frame snapshots using exactly these values;
//! the analyzer decodes them.
//!
//! ## Key Groups
//!
//! - Screen geometry of the rendered frames ([`SCREEN_WIDTH`], [`SCREEN_HEIGHT`])
//! - Command opcodes the analyzer knows how to name (`G_*`)
//! - Layout of the uncompressed 24-bit bitmaps used for snapshots and the heatmap

#![no_std]

// ============================================================================
// Screen Geometry
// ============================================================================

/// Width of every rendered frame snapshot, in pixels
pub const SCREEN_WIDTH: usize = 320;

/// Height of every rendered frame snapshot, in pixels
pub const SCREEN_HEIGHT: usize = 240;

// ============================================================================
// Command Opcodes
// ============================================================================

/// Load a vertex buffer
pub const G_VTX: u8 = 0x01;

/// Draw one triangle
pub const G_TRI1: u8 = 0x05;

/// Draw two triangles
pub const G_TRI2: u8 = 0x06;

/// Pop the modelview matrix stack
pub const G_POPMTX: u8 = 0xd8;

/// Load a matrix
pub const G_MTX: u8 = 0xda;

/// Write a word into RSP state (segment table when the index is `G_MW_SEGMENT`)
pub const G_MOVEWORD: u8 = 0xdb;

/// **Nested-list call**: invoke another command list
///
/// The only opcode whose trace directive opens a child list. `word1` holds the
/// segmented address of the callee.
pub const G_DL: u8 = 0xde;

/// **Terminate marker**: return from the current command list
pub const G_ENDDL: u8 = 0xdf;

/// Draw a textured rectangle
pub const G_TEXRECT: u8 = 0xe4;

/// RDP load sync
pub const G_RDPLOADSYNC: u8 = 0xe6;

/// RDP pipe sync
pub const G_RDPPIPESYNC: u8 = 0xe7;

/// RDP tile sync
pub const G_RDPTILESYNC: u8 = 0xe8;

/// RDP full sync, the conventional last command of a frame
pub const G_RDPFULLSYNC: u8 = 0xe9;

/// Fill a screen rectangle
pub const G_FILLRECT: u8 = 0xf6;

/// Set the texture image address
pub const G_SETTIMG: u8 = 0xfd;

// ============================================================================
// Bitmap Layout
// ============================================================================

/// `'B','M'` signature at the start of every bitmap file
pub const BMP_MAGIC: [u8; 2] = [0x42, 0x4d];

/// Size of the bitmap file header
pub const BMP_FILE_HEADER_SIZE: usize = 14;

/// Size of the legacy core header that follows the file header
pub const BMP_CORE_HEADER_SIZE: usize = 12;

/// Offset of the pixel data in files written with a core header
pub const BMP_PIXEL_OFFSET: usize = BMP_FILE_HEADER_SIZE + BMP_CORE_HEADER_SIZE;

/// Only 24-bit BGR pixels are produced and understood
pub const BMP_BITS_PER_PIXEL: u16 = 24;

/// Bytes per pixel for [`BMP_BITS_PER_PIXEL`]
pub const BMP_BYTES_PER_PIXEL: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_offset_follows_headers() {
        assert_eq!(BMP_PIXEL_OFFSET, 26);
    }
}
