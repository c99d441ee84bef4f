//! Minimal uncompressed 24-bit bitmap codec
//!
//! Reads frame snapshots and writes the heatmap. Only the layout the producer
//! emits is supported:
//!
//! ```text
//! offset  size  field
//!      0     2  'B' 'M'
//!      2     4  total file size (LE)
//!      6     4  reserved (0)
//!     10     4  pixel data offset (LE)
//!     14     4  core header size = 12
//!     18     2  width (LE)
//!     20     2  height (LE)
//!     22     2  planes = 1
//!     24     2  bits per pixel = 24
//!     26     …  width*height*3 bytes BGR, rows top-down, no padding
//! ```
//!
//! Rows are stored in the order given, without the bottom-up flip or 4-byte
//! row padding of standard bitmaps, so snapshots and heatmaps round-trip.

use crate::domain::BitmapError;
use dlprof_common::{
    BMP_BITS_PER_PIXEL, BMP_BYTES_PER_PIXEL, BMP_CORE_HEADER_SIZE, BMP_FILE_HEADER_SIZE,
    BMP_MAGIC, BMP_PIXEL_OFFSET,
};

/// A decoded image: packed BGR pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap a packed BGR pixel buffer
    ///
    /// # Errors
    /// Returns [`BitmapError::DimensionMismatch`] if `pixels` is not exactly
    /// `width * height * 3` bytes
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = width * height * BMP_BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(BitmapError::DimensionMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// All-black frame
    #[must_use]
    pub fn blank(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height * BMP_BYTES_PER_PIXEL] }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// BGR triple of pixel `index` (row-major)
    #[must_use]
    pub fn pixel(&self, index: usize) -> &[u8] {
        let start = index * BMP_BYTES_PER_PIXEL;
        &self.pixels[start..start + BMP_BYTES_PER_PIXEL]
    }

    /// Overwrite pixel `index` with a BGR triple
    pub fn set_pixel(&mut self, index: usize, bgr: [u8; 3]) {
        let start = index * BMP_BYTES_PER_PIXEL;
        self.pixels[start..start + BMP_BYTES_PER_PIXEL].copy_from_slice(&bgr);
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Encode a frame with a 12-byte core header
///
/// # Errors
/// Returns [`BitmapError::DimensionMismatch`] if the frame is wider or taller
/// than the 16-bit core header fields can describe
pub fn encode(frame: &Frame) -> Result<Vec<u8>, BitmapError> {
    let too_big = || BitmapError::DimensionMismatch {
        width: frame.width,
        height: frame.height,
        expected: usize::from(u16::MAX),
        actual: frame.width.max(frame.height),
    };
    let width = u16::try_from(frame.width).map_err(|_| too_big())?;
    let height = u16::try_from(frame.height).map_err(|_| too_big())?;
    let total = u32::try_from(BMP_PIXEL_OFFSET + frame.pixels.len()).map_err(|_| too_big())?;

    let mut out = Vec::with_capacity(BMP_PIXEL_OFFSET + frame.pixels.len());
    out.extend_from_slice(&BMP_MAGIC);
    out.extend_from_slice(&total.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    #[allow(clippy::cast_possible_truncation)]
    out.extend_from_slice(&(BMP_PIXEL_OFFSET as u32).to_le_bytes());

    #[allow(clippy::cast_possible_truncation)]
    out.extend_from_slice(&(BMP_CORE_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&BMP_BITS_PER_PIXEL.to_le_bytes());

    out.extend_from_slice(&frame.pixels);
    Ok(out)
}

/// Decode a bitmap written with a core header
///
/// # Errors
/// Returns a [`BitmapError`] for a missing signature, a header other than the
/// 12-byte core header, a depth other than 24 bpp, or truncated pixel data
pub fn decode(bytes: &[u8]) -> Result<Frame, BitmapError> {
    let header_end = BMP_FILE_HEADER_SIZE + BMP_CORE_HEADER_SIZE;
    if bytes.len() < header_end {
        return Err(BitmapError::Truncated { needed: header_end, actual: bytes.len() });
    }
    if bytes[0..2] != BMP_MAGIC {
        return Err(BitmapError::BadMagic);
    }

    let pixel_offset = read_u32(bytes, 10) as usize;
    let header_size = read_u32(bytes, 14);
    if header_size as usize != BMP_CORE_HEADER_SIZE {
        return Err(BitmapError::UnsupportedHeader(header_size));
    }

    let width = usize::from(read_u16(bytes, 18));
    let height = usize::from(read_u16(bytes, 20));
    let depth = read_u16(bytes, 24);
    if depth != BMP_BITS_PER_PIXEL {
        return Err(BitmapError::UnsupportedDepth(depth));
    }

    let data_len = width * height * BMP_BYTES_PER_PIXEL;
    let needed = pixel_offset + data_len;
    if bytes.len() < needed {
        return Err(BitmapError::Truncated { needed, actual: bytes.len() });
    }

    Frame::new(width, height, bytes[pixel_offset..needed].to_vec())
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Frame {
        let pixels = vec![
            0x01, 0x02, 0x03, 0x11, 0x12, 0x13, //
            0x21, 0x22, 0x23, 0xff, 0x00, 0x7f,
        ];
        Frame::new(2, 2, pixels).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_pixels() {
        let frame = two_by_two();
        let bytes = encode(&frame).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_encoded_header_layout() {
        let bytes = encode(&two_by_two()).unwrap();
        assert_eq!(&bytes[0..2], &[0x42, 0x4d]);
        assert_eq!(bytes.len(), 26 + 12);
        assert_eq!(read_u32(&bytes, 2), 38);
        assert_eq!(read_u32(&bytes, 10), 26);
        assert_eq!(read_u32(&bytes, 14), 12);
        assert_eq!(read_u16(&bytes, 18), 2);
        assert_eq!(read_u16(&bytes, 20), 2);
        assert_eq!(read_u16(&bytes, 22), 1);
        assert_eq!(read_u16(&bytes, 24), 24);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut bytes = encode(&two_by_two()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(BitmapError::BadMagic)));
    }

    #[test]
    fn test_decode_rejects_truncated_pixels() {
        let bytes = encode(&two_by_two()).unwrap();
        let err = decode(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, BitmapError::Truncated { needed: 38, actual: 37 }));
    }

    #[test]
    fn test_decode_rejects_info_header() {
        let mut bytes = encode(&two_by_two()).unwrap();
        bytes[14] = 40;
        assert!(matches!(decode(&bytes), Err(BitmapError::UnsupportedHeader(40))));
    }

    #[test]
    fn test_decode_rejects_other_depths() {
        let mut bytes = encode(&two_by_two()).unwrap();
        bytes[24] = 32;
        assert!(matches!(decode(&bytes), Err(BitmapError::UnsupportedDepth(32))));
    }

    #[test]
    fn test_frame_new_checks_length() {
        assert!(Frame::new(2, 2, vec![0; 11]).is_err());
    }
}
