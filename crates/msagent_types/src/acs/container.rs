//! Parser for the Microsoft Agent 2.0 ("ACS") binary container.
//!
//! An ACS file opens with a magic number and a four-entry block
//! descriptor table (Header, `GestureRefs`, `ImageRefs`, unused). The
//! header carries canvas geometry, a 256-entry palette, and optional
//! sub-sections gated by style-flag bits. `GestureRefs` names each
//! animation and points at its frame data; `ImageRefs` points at each
//! compressed or raw indexed-color image.

use log::{debug, warn};

use super::bitstream;
use super::error::AcsError;
use super::indexed_image::{stride_for_width, IndexedImage};
use super::palette::Palette;
use super::reader::ByteReader;

/// Magic number identifying a Microsoft Agent 2.0 character file.
pub const MAGIC: u32 = 0xABCD_ABC3;

const STYLE_HAS_TTS: u32 = 0x0000_0020;
const STYLE_HAS_BALLOON: u32 = 0x0000_0200;

/// One layer of a composited frame: a reference into the image table
/// plus a signed offset relative to the frame canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayer {
	/// Index into the container's image table.
	pub image_index: u32,
	/// Horizontal offset from the canvas origin.
	pub x_offset: i16,
	/// Vertical offset from the canvas origin.
	pub y_offset: i16,
}

/// A single animation frame: an ordered stack of layers plus a
/// duration in hundredths of a second (`0` means "unspecified").
#[derive(Debug, Clone, Default)]
pub struct ParsedFrame {
	/// Layers painted back-to-front, including trailing overlays.
	pub layers: Vec<FrameLayer>,
	/// Duration in ticks (1 tick = 1/100 second); `0` is "unknown".
	pub duration_ticks: u16,
}

/// A named, ordered sequence of frames.
#[derive(Debug, Clone, Default)]
pub struct ParsedAnimation {
	/// Human-readable animation name (may be empty).
	pub name: String,
	/// Frames in playback order.
	pub frames: Vec<ParsedFrame>,
}

/// The fully parsed contents of an ACS container.
#[derive(Debug, Clone)]
pub struct ParsedContainer {
	/// Canvas width shared by every frame.
	pub canvas_width: u16,
	/// Canvas height shared by every frame.
	pub canvas_height: u16,
	/// Palette index that renders as fully transparent.
	pub transparency_index: u8,
	/// Decoded color palette.
	pub palette: Palette,
	/// Decoded images, indexed the same way `FrameLayer::image_index` does.
	pub images: Vec<IndexedImage>,
	/// Parsed animations, in `GestureRefs` order.
	pub animations: Vec<ParsedAnimation>,
}

struct BlockDescriptor {
	offset: u32,
	size: u32,
}

/// Parses a complete ACS container from `data`.
///
/// # Errors
///
/// Returns [`AcsError::InvalidInput`] if the magic number does not
/// match, or [`AcsError::DecodeFailed`] if any structural field is
/// truncated, inconsistent, or fails to decode.
pub fn parse(data: &[u8]) -> Result<ParsedContainer, AcsError> {
	let mut reader = ByteReader::new(data);
	let magic = reader.read_u32_le()?;
	if magic != MAGIC {
		return Err(AcsError::InvalidInput(format!("unsupported signature: {magic:#010X}")));
	}

	let mut blocks = Vec::with_capacity(4);
	for _ in 0..4 {
		let offset = reader.read_u32_le()?;
		let size = reader.read_u32_le()?;
		blocks.push(BlockDescriptor { offset, size });
	}
	debug!("acs: parsed {} block descriptors", blocks.len());

	let header = parse_header(data, &blocks[0])?;
	let gesture_refs = parse_gesture_refs(data, &blocks[1])?;
	let image_refs = parse_image_refs(data, &blocks[2])?;

	let mut images = Vec::with_capacity(image_refs.len());
	for (offset, size) in &image_refs {
		images.push(parse_image(data, *offset, *size)?);
	}
	debug!("acs: decoded {} images", images.len());

	let mut animations = Vec::with_capacity(gesture_refs.len());
	for gesture in &gesture_refs {
		let parsed = parse_animation(data, gesture.offset, gesture.size)?;
		let name = if gesture.name.is_empty() { parsed.name } else { gesture.name.clone() };
		animations.push(ParsedAnimation { name, frames: parsed.frames });
	}
	debug!("acs: parsed {} animations", animations.len());

	Ok(ParsedContainer {
		canvas_width: header.canvas_width,
		canvas_height: header.canvas_height,
		transparency_index: header.transparency_index,
		palette: header.palette,
		images,
		animations,
	})
}

struct ParsedHeader {
	canvas_width: u16,
	canvas_height: u16,
	transparency_index: u8,
	palette: Palette,
}

fn parse_header(data: &[u8], block: &BlockDescriptor) -> Result<ParsedHeader, AcsError> {
	let mut reader = ByteReader::with_range(data, block.offset, block.size)?;

	reader.skip(2)?; // minor version
	reader.skip(2)?; // major version
	reader.skip(4)?; // names-table offset
	reader.skip(4)?; // names-table size
	reader.skip(16)?; // GUID

	let canvas_width = reader.read_u16_le()?;
	let canvas_height = reader.read_u16_le()?;
	let transparency_index = reader.read_u8()?;
	let style = reader.read_u32_le()?;
	reader.skip(4)?; // reserved

	if style & STYLE_HAS_TTS != 0 {
		reader.skip(16 + 16 + 4 + 2)?;
		let has_language = reader.read_u8()?;
		if has_language != 0 {
			reader.skip(2)?;
			let len = reader.read_u32_le()? as usize;
			reader.skip((len + 1) * 2)?;
			reader.skip(2 + 2)?;
			let len = reader.read_u32_le()? as usize;
			reader.skip((len + 1) * 2)?;
		}
	}

	if style & STYLE_HAS_BALLOON != 0 {
		reader.skip(1 + 1 + 4 + 4 + 4)?;
		let len = reader.read_u32_le()? as usize;
		reader.skip((len + 1) * 2)?;
		reader.skip(4 + 2 + 2 + 2)?;
	}

	let palette_count = reader.read_u32_le()? as usize;
	let clamped = palette_count.min(256);
	let mut words = Vec::with_capacity(clamped);
	for _ in 0..clamped {
		words.push(reader.read_u32_le()?);
	}
	if palette_count > 256 {
		reader.skip((palette_count - 256) * 4)?;
	}
	let palette = Palette::from_words(&words);

	let has_icon = reader.read_u8()?;
	if has_icon != 0 {
		let mask_size = reader.read_u32_le()? as usize;
		reader.skip(mask_size)?;
		let color_size = reader.read_u32_le()? as usize;
		reader.skip(color_size)?;
	}

	Ok(ParsedHeader { canvas_width, canvas_height, transparency_index, palette })
}

struct GestureRef {
	name: String,
	offset: u32,
	size: u32,
}

fn parse_gesture_refs(data: &[u8], block: &BlockDescriptor) -> Result<Vec<GestureRef>, AcsError> {
	let mut reader = ByteReader::with_range(data, block.offset, block.size)?;
	let count = reader.read_u32_le()? as usize;
	let mut refs = Vec::with_capacity(count);
	for _ in 0..count {
		let len = reader.read_u32_le()? as usize;
		let name = reader.read_utf16_le(len)?;
		reader.skip(2)?; // null terminator
		let offset = reader.read_u32_le()?;
		let size = reader.read_u32_le()?;
		refs.push(GestureRef { name, offset, size });
	}
	Ok(refs)
}

fn parse_image_refs(data: &[u8], block: &BlockDescriptor) -> Result<Vec<(u32, u32)>, AcsError> {
	let mut reader = ByteReader::with_range(data, block.offset, block.size)?;
	let count = reader.read_u32_le()? as usize;
	let mut refs = Vec::with_capacity(count);
	for _ in 0..count {
		let offset = reader.read_u32_le()?;
		let size = reader.read_u32_le()?;
		reader.skip(4)?; // checksum, ignored
		refs.push((offset, size));
	}
	Ok(refs)
}

fn parse_image(data: &[u8], offset: u32, size: u32) -> Result<IndexedImage, AcsError> {
	let mut reader = ByteReader::with_range(data, offset, size)?;
	reader.skip(1)?;
	let width = u32::from(reader.read_u16_le()?);
	let height = u32::from(reader.read_u16_le()?);
	let compressed = reader.read_u8()? != 0;
	let byte_count = reader.read_u32_le()? as usize;
	let payload = reader.read_bytes(byte_count)?;

	if width == 0 || height == 0 {
		return Err(AcsError::DecodeFailed("image has zero width or height".into()));
	}

	let stride = stride_for_width(width);
	let pixel_count = (stride * height) as usize;

	let pixels = if compressed {
		bitstream::decompress(payload, pixel_count)?
	} else {
		if payload.len() < pixel_count {
			return Err(AcsError::DecodeFailed(format!(
				"raw image payload has {} bytes, need {pixel_count}",
				payload.len()
			)));
		}
		payload[..pixel_count].to_vec()
	};

	IndexedImage::new(width, height, pixels)
}

fn parse_animation(data: &[u8], offset: u32, size: u32) -> Result<ParsedAnimation, AcsError> {
	let mut reader = ByteReader::with_range(data, offset, size)?;

	let name_len = reader.read_u32_le()? as usize;
	let name = reader.read_utf16_le(name_len)?;
	reader.skip(2)?; // null terminator

	reader.skip(1)?; // return type, ignored
	let return_name_len = reader.read_u32_le()? as usize;
	if return_name_len != 0 {
		reader.skip(return_name_len * 2)?;
		reader.skip(2)?;
	}

	let frame_count = reader.read_u16_le()?;
	let mut frames = Vec::with_capacity(frame_count as usize);

	for _ in 0..frame_count {
		let mut layers = Vec::new();

		let image_count = reader.read_u16_le()?;
		for _ in 0..image_count {
			let image_index = reader.read_u32_le()?;
			let x_offset = reader.read_i16_le()?;
			let y_offset = reader.read_i16_le()?;
			layers.push(FrameLayer { image_index, x_offset, y_offset });
		}

		reader.skip(2)?; // sound id
		let duration_ticks = reader.read_u16_le()?;
		reader.skip(2)?; // exit frame

		let branch_count = reader.read_u8()?;
		reader.skip(branch_count as usize * 4)?;

		let overlay_count = reader.read_u8()?;
		for _ in 0..overlay_count {
			reader.skip(1 + 1)?;
			let image_index = u32::from(reader.read_u16_le()?);
			reader.skip(1 + 1)?;
			let x_offset = reader.read_i16_le()?;
			let y_offset = reader.read_i16_le()?;
			reader.skip(2 + 2)?;
			layers.push(FrameLayer { image_index, x_offset, y_offset });
		}

		frames.push(ParsedFrame { layers, duration_ticks });
	}

	if frames.is_empty() {
		warn!("acs: animation '{name}' has no frames");
	}

	Ok(ParsedAnimation { name, frames })
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Builder {
		bytes: Vec<u8>,
	}

	impl Builder {
		fn new() -> Self {
			Self { bytes: Vec::new() }
		}

		fn u8(mut self, v: u8) -> Self {
			self.bytes.push(v);
			self
		}

		fn u16(mut self, v: u16) -> Self {
			self.bytes.extend_from_slice(&v.to_le_bytes());
			self
		}

		fn i16(mut self, v: i16) -> Self {
			self.bytes.extend_from_slice(&v.to_le_bytes());
			self
		}

		fn u32(mut self, v: u32) -> Self {
			self.bytes.extend_from_slice(&v.to_le_bytes());
			self
		}

		fn bytes(mut self, b: &[u8]) -> Self {
			self.bytes.extend_from_slice(b);
			self
		}

		fn utf16(mut self, s: &str) -> Self {
			for unit in s.encode_utf16() {
				self.bytes.extend_from_slice(&unit.to_le_bytes());
			}
			self
		}
	}

	fn build_minimal_container() -> Vec<u8> {
		// Header block: version(4) + names offset/size(8) + guid(16)
		// + width/height(4) + transparency(1) + style(4) + reserved(4)
		// + paletteCount(4) + 1 entry(4) + hasIcon(1) = 46 bytes
		let header = Builder::new()
			.u16(0)
			.u16(0)
			.u32(0)
			.u32(0)
			.bytes(&[0u8; 16])
			.u16(4) // canvas width
			.u16(4) // canvas height
			.u8(0) // transparency index
			.u32(0) // style flags
			.u32(0) // reserved
			.u32(1) // palette count
			.u32(0x00FF_0000) // palette[0] = red
			.u8(0) // has icon
			.bytes;

		// One uncompressed 2x2 image (stride 4): marker(1)+w(2)+h(2)+compressed(1)+len(4)+payload
		let image_payload = vec![0u8, 0, 0, 0, 0, 0, 0, 0];
		let image_block = Builder::new()
			.u8(0)
			.u16(2)
			.u16(2)
			.u8(0)
			.u32(image_payload.len() as u32)
			.bytes(&image_payload)
			.bytes;

		// One animation with a single frame referencing image 0.
		let animation_block = Builder::new()
			.u32(0) // name length 0
			.u16(0) // null terminator (0 code units of name)
			.u8(0) // return type
			.u32(0) // return name length
			.u16(1) // frame count
			.u16(1) // image count
			.u32(0) // image index
			.i16(0)
			.i16(0)
			.u16(0) // sound id
			.u16(10) // duration ticks
			.u16(0) // exit frame
			.u8(0) // branch count
			.u8(0) // overlay count
			.bytes;

		// Block offsets are resolved after every other block's true
		// length is known, then the blocks are laid out back to back
		// in the order: header, gestureRefs, imageRefs, animation,
		// image. The descriptor table only carries (offset, size), so
		// all four blocks must be the same length they claim.
		let header_offset = 4 + 4 * 8; // magic + 4 * (offset, size)
		let gesture_name = "Wave";
		let gesture_refs_offset = header_offset + header.len() as u32;

		// gestureRefs entry: count(4) + nameLen(4) + name + terminator(2) + offset(4) + size(4)
		let gesture_block_len = 4 + 4 + (gesture_name.encode_utf16().count() as u32 * 2) + 2 + 4 + 4;
		let image_refs_offset = gesture_refs_offset + gesture_block_len;

		// imageRefs entry: count(4) + offset(4) + size(4) + checksum(4)
		let image_block_len: u32 = 16;
		let animation_offset = image_refs_offset + image_block_len;
		let image_offset = animation_offset + animation_block.len() as u32;

		let out = Builder::new()
			.u32(MAGIC)
			.u32(header_offset)
			.u32(header.len() as u32)
			.u32(gesture_refs_offset)
			.u32(gesture_block_len)
			.u32(image_refs_offset)
			.u32(image_block_len)
			.u32(0)
			.u32(0)
			.bytes(&header)
			.u32(1)
			.u32(gesture_name.encode_utf16().count() as u32)
			.utf16(gesture_name)
			.u16(0)
			.u32(animation_offset)
			.u32(animation_block.len() as u32)
			.u32(1)
			.u32(image_offset)
			.u32(image_block.len() as u32)
			.u32(0)
			.bytes(&animation_block)
			.bytes(&image_block);

		out.bytes
	}

	#[test]
	fn parses_minimal_container() {
		let data = build_minimal_container();
		let parsed = parse(&data).unwrap();
		assert_eq!(parsed.canvas_width, 4);
		assert_eq!(parsed.canvas_height, 4);
		assert_eq!(parsed.images.len(), 1);
		assert_eq!(parsed.animations.len(), 1);
		assert_eq!(parsed.animations[0].name, "Wave");
		assert_eq!(parsed.animations[0].frames.len(), 1);
		assert_eq!(parsed.animations[0].frames[0].duration_ticks, 10);
	}

	#[test]
	fn rejects_bad_magic() {
		let data = [0u8; 16];
		assert!(parse(&data).is_err());
	}
}
