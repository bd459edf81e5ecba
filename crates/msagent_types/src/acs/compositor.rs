//! Composites a parsed frame's indexed-color layers onto an RGBA8 canvas.

use super::container::{FrameLayer, ParsedFrame};
use super::indexed_image::IndexedImage;
use super::palette::Palette;

/// An RGBA8 canvas, row-major, top-down.
#[derive(Debug, Clone)]
pub struct RgbaCanvas {
	width: u32,
	height: u32,
	pixels: Vec<u8>,
}

impl RgbaCanvas {
	fn blank(width: u32, height: u32) -> Self {
		Self { width, height, pixels: vec![0u8; width as usize * height as usize * 4] }
	}

	/// Canvas width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Canvas height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Raw RGBA8 pixel bytes, row-major, top-down.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
		let offset = ((y * self.width + x) * 4) as usize;
		self.pixels[offset..offset + 4].copy_from_slice(&rgba);
	}
}

/// Paints every layer of `frame` onto a fresh `canvas_width x
/// canvas_height` canvas, back-to-front, skipping out-of-range image
/// indices and pixels equal to `transparency_index`.
pub fn composite(
	frame: &ParsedFrame,
	images: &[IndexedImage],
	palette: &Palette,
	transparency_index: u8,
	canvas_width: u32,
	canvas_height: u32,
) -> RgbaCanvas {
	let mut canvas = RgbaCanvas::blank(canvas_width, canvas_height);

	for layer in &frame.layers {
		paint_layer(&mut canvas, layer, images, palette, transparency_index);
	}

	canvas
}

fn paint_layer(
	canvas: &mut RgbaCanvas,
	layer: &FrameLayer,
	images: &[IndexedImage],
	palette: &Palette,
	transparency_index: u8,
) {
	let Some(image) = images.get(layer.image_index as usize) else {
		return;
	};

	for sy in 0..image.height() {
		let dy = i64::from(layer.y_offset) + i64::from(sy);
		if dy < 0 || dy >= i64::from(canvas.height()) {
			continue;
		}
		let dy = dy as u32;

		for sx in 0..image.width() {
			let dx = i64::from(layer.x_offset) + i64::from(sx);
			if dx < 0 || dx >= i64::from(canvas.width()) {
				continue;
			}
			let dx = dx as u32;

			let index = image.pixel(sx, sy);
			if index == transparency_index {
				continue;
			}
			let (r, g, b) = palette.rgb(index);
			canvas.set_pixel(dx, dy, [r, g, b, 0xFF]);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transparent_pixels_leave_canvas_untouched() {
		let image = IndexedImage::new(1, 1, vec![5, 0, 0, 0]).unwrap();
		let palette = Palette::from_words(&[0x00FF_0000, 0, 0, 0, 0, 0]);
		let frame = ParsedFrame {
			layers: vec![FrameLayer { image_index: 0, x_offset: 0, y_offset: 0 }],
			duration_ticks: 0,
		};
		let canvas = composite(&frame, &[image], &palette, 5, 2, 2);
		assert_eq!(canvas.pixels()[0..4], [0, 0, 0, 0]);
	}

	#[test]
	fn opaque_pixels_use_palette_color() {
		let image = IndexedImage::new(1, 1, vec![0, 0, 0, 0]).unwrap();
		let palette = Palette::from_words(&[0x00AA_BBCC]);
		let frame = ParsedFrame {
			layers: vec![FrameLayer { image_index: 0, x_offset: 0, y_offset: 0 }],
			duration_ticks: 0,
		};
		let canvas = composite(&frame, &[image], &palette, 255, 1, 1);
		assert_eq!(canvas.pixels(), &[0xAA, 0xBB, 0xCC, 0xFF]);
	}

	#[test]
	fn out_of_range_layer_is_skipped() {
		let frame = ParsedFrame {
			layers: vec![FrameLayer { image_index: 7, x_offset: 0, y_offset: 0 }],
			duration_ticks: 0,
		};
		let canvas = composite(&frame, &[], &Palette::default(), 0, 1, 1);
		assert_eq!(canvas.pixels(), &[0, 0, 0, 0]);
	}
}
