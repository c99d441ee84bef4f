//! Spatial cost attribution
//!
//! Consecutive frame snapshots show which pixels a command changed. The
//! command's elapsed time is split evenly over those pixels and accumulated in
//! a screen-sized [`CostGrid`] across every batch of the run. The grid is
//! rendered once at the end as a grayscale image normalised to its maximum.

// Pixel counts convert to f64 for per-pixel cost; normalised values fit in u8
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::domain::BitmapError;
use crate::imaging::Frame;
use dlprof_common::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Accumulated cost per screen pixel
#[derive(Debug, Clone, PartialEq)]
pub struct CostGrid {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl Default for CostGrid {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl CostGrid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![0.0; width * height] }
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
    pub fn cell(&self, x: usize, y: usize) -> f64 {
        self.cells[x + y * self.width]
    }

    #[must_use]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Largest accumulated cost (0 for an untouched grid)
    #[must_use]
    pub fn max_cost(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }

    /// Spread `elapsed_ms` over the pixels that differ between two frames
    ///
    /// Returns the number of differing pixels; identical frames add nothing.
    ///
    /// # Errors
    /// Returns [`BitmapError::DimensionMismatch`] if either frame does not
    /// match the grid's dimensions
    pub fn attribute(
        &mut self,
        before: &Frame,
        after: &Frame,
        elapsed_ms: f64,
    ) -> Result<usize, BitmapError> {
        self.check_dimensions(before)?;
        self.check_dimensions(after)?;

        let changed = changed_pixels(before, after);
        if changed.is_empty() {
            return Ok(0);
        }

        let cost_per_pixel = elapsed_ms / changed.len() as f64;
        for &index in &changed {
            self.cells[index] += cost_per_pixel;
        }

        Ok(changed.len())
    }

    fn check_dimensions(&self, frame: &Frame) -> Result<(), BitmapError> {
        if frame.width() == self.width && frame.height() == self.height {
            return Ok(());
        }
        Err(BitmapError::DimensionMismatch {
            width: self.width,
            height: self.height,
            expected: self.width * self.height * 3,
            actual: frame.pixels().len(),
        })
    }

    /// Render the grid as grayscale normalised to its maximum
    ///
    /// `value = floor(255 * cost / max + 0.5)`. A grid whose maximum is not
    /// positive renders all black.
    #[must_use]
    pub fn to_grayscale(&self) -> Frame {
        let mut frame = Frame::blank(self.width, self.height);
        let max = self.max_cost();
        if !(max > 0.0 && max.is_finite()) {
            return frame;
        }

        for (index, &cost) in self.cells.iter().enumerate() {
            let value = (255.0 * cost / max + 0.5).floor().clamp(0.0, 255.0) as u8;
            frame.set_pixel(index, [value, value, value]);
        }
        frame
    }
}

/// Row-major indices of pixels whose BGR triple differs
#[must_use]
pub fn changed_pixels(before: &Frame, after: &Frame) -> Vec<usize> {
    (0..before.pixel_count().min(after.pixel_count()))
        .filter(|&index| before.pixel(index) != after.pixel(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Frame {
        Frame::blank(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_identical_frames_add_nothing() {
        let mut grid = CostGrid::default();
        let frame = screen();
        assert_eq!(grid.attribute(&frame, &frame.clone(), 6.0).unwrap(), 0);
        assert!(grid.cells().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_single_changed_pixel_gets_full_cost() {
        let mut grid = CostGrid::default();
        let before = screen();
        let mut after = screen();
        after.set_pixel(17 + 5 * SCREEN_WIDTH, [0, 0, 1]);

        assert_eq!(grid.attribute(&before, &after, 6.0).unwrap(), 1);
        assert_eq!(grid.cell(17, 5), 6.0);
        let touched = grid.cells().iter().filter(|&&c| c != 0.0).count();
        assert_eq!(touched, 1);
    }

    #[test]
    fn test_cost_is_split_across_changed_pixels() {
        let mut grid = CostGrid::new(2, 2);
        let before = Frame::blank(2, 2);
        let mut after = Frame::blank(2, 2);
        after.set_pixel(0, [1, 1, 1]);
        after.set_pixel(3, [1, 1, 1]);

        grid.attribute(&before, &after, 3.0).unwrap();
        assert_eq!(grid.cells(), &[1.5, 0.0, 0.0, 1.5]);

        grid.attribute(&before, &after, 1.0).unwrap();
        assert_eq!(grid.cell(0, 0), 2.0);
    }

    #[test]
    fn test_mismatched_frame_is_rejected() {
        let mut grid = CostGrid::new(2, 2);
        let err = grid.attribute(&Frame::blank(2, 2), &Frame::blank(3, 2), 1.0).unwrap_err();
        assert!(matches!(err, BitmapError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_grayscale_normalises_to_max() {
        let mut grid = CostGrid::new(2, 1);
        let before = Frame::blank(2, 1);
        let mut after = Frame::blank(2, 1);
        after.set_pixel(0, [1, 1, 1]);
        grid.attribute(&before, &after, 4.0).unwrap();
        after.set_pixel(1, [1, 1, 1]);
        grid.attribute(&before, &after, 4.0).unwrap();

        // cells: [6.0, 2.0] -> 255, floor(85 + 0.5) = 85
        let image = grid.to_grayscale();
        assert_eq!(image.pixel(0), &[255, 255, 255]);
        assert_eq!(image.pixel(1), &[85, 85, 85]);
    }

    #[test]
    fn test_empty_grid_renders_black() {
        let image = CostGrid::default().to_grayscale();
        assert!(image.pixels().iter().all(|&b| b == 0));
        assert_eq!(image.width(), SCREEN_WIDTH);
    }

    #[test]
    fn test_default_grid_covers_the_screen() {
        let grid = CostGrid::default();
        assert_eq!((grid.width(), grid.height()), (SCREEN_WIDTH, SCREEN_HEIGHT));
        assert_eq!(grid.cells().len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    }
}
