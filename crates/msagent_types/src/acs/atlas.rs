//! Bin-packing layout for placing composited frames into a single atlas.

use super::error::AcsError;
use super::geometry::{IntPoint, IntSize};

/// Default bound on either atlas dimension.
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;

/// A fixed-cell grid layout for `total_frames` frames of `frame_size`
/// each, bounded by `max_dimension` on either axis.
#[derive(Debug, Clone, Copy)]
pub struct AtlasLayout {
	frame_size: IntSize,
	columns: u32,
	rows: u32,
}

impl AtlasLayout {
	/// Computes a layout for `total_frames` frames of `frame_size`,
	/// each bounded so neither atlas dimension exceeds `max_dimension`.
	///
	/// # Errors
	///
	/// Returns [`AcsError::InvalidInput`] if `total_frames` is zero or
	/// `frame_size` has a zero dimension, and
	/// [`AcsError::EncodeFailed`] (reported as `AtlasTooLarge`) if the
	/// resulting atlas would exceed `max_dimension` on either axis.
	pub fn new(total_frames: u32, frame_size: IntSize, max_dimension: u32) -> Result<Self, AcsError> {
		if total_frames == 0 {
			return Err(AcsError::InvalidInput("atlas requires at least one frame".into()));
		}
		if frame_size.width == 0 || frame_size.height == 0 {
			return Err(AcsError::InvalidInput("frame cell size must be non-zero".into()));
		}

		let max_columns = (max_dimension / frame_size.width).max(1);
		let preferred_columns = (f64::from(total_frames)).sqrt().ceil() as u32;
		let preferred_columns = preferred_columns.max(1);
		let columns = max_columns.min(preferred_columns);
		let rows = total_frames.div_ceil(columns);

		let atlas_width = columns * frame_size.width;
		let atlas_height = rows * frame_size.height;
		if atlas_width > max_dimension || atlas_height > max_dimension {
			return Err(AcsError::EncodeFailed(format!(
				"atlas size {atlas_width}x{atlas_height} exceeds max dimension {max_dimension}"
			)));
		}

		Ok(Self { frame_size, columns, rows })
	}

	/// Number of columns chosen for the grid.
	pub fn columns(&self) -> u32 {
		self.columns
	}

	/// Number of rows chosen for the grid.
	pub fn rows(&self) -> u32 {
		self.rows
	}

	/// Total atlas size in pixels.
	pub fn atlas_size(&self) -> IntSize {
		IntSize::new(self.columns * self.frame_size.width, self.rows * self.frame_size.height)
	}

	/// Top-left pixel position of frame `index` within the atlas.
	pub fn position_of(&self, index: u32) -> IntPoint {
		let column = index % self.columns;
		let row = index / self.columns;
		IntPoint::new((column * self.frame_size.width) as i32, (row * self.frame_size.height) as i32)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lays_out_square_grid() {
		let layout = AtlasLayout::new(9, IntSize::new(10, 10), 1000).unwrap();
		assert_eq!(layout.columns(), 3);
		assert_eq!(layout.rows(), 3);
		assert_eq!(layout.atlas_size(), IntSize::new(30, 30));
	}

	#[test]
	fn bounds_columns_by_max_dimension() {
		// Preferred columns for 4 frames is 2, but a 60px-wide cell only
		// leaves room for 1 column within a 100px atlas width.
		let layout = AtlasLayout::new(4, IntSize::new(60, 10), 100).unwrap();
		assert_eq!(layout.columns(), 1);
		assert_eq!(layout.rows(), 4);
	}

	#[test]
	fn position_of_wraps_by_columns() {
		let layout = AtlasLayout::new(5, IntSize::new(10, 20), 1000).unwrap();
		assert_eq!(layout.position_of(0), IntPoint::new(0, 0));
		assert_eq!(layout.position_of(2), IntPoint::new(20, 0));
		assert_eq!(layout.position_of(3), IntPoint::new(0, 20));
	}

	#[test]
	fn rejects_zero_frames() {
		assert!(AtlasLayout::new(0, IntSize::new(10, 10), 1000).is_err());
	}

	#[test]
	fn rejects_oversized_atlas() {
		assert!(AtlasLayout::new(1000, IntSize::new(100, 100), 200).is_err());
	}
}
