//! Drives the container parser, compositor, and atlas layouter to
//! produce a manifest and atlas PNG from a raw ACS byte blob.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba};
use log::{debug, warn};

use super::atlas::{AtlasLayout, DEFAULT_MAX_DIMENSION};
use super::compositor;
use super::container::{self, ParsedContainer};
use super::error::AcsError;
use super::geometry::{IntPoint, IntRect, IntSize};
use super::manifest::{unique_names, AssistantAnimationClip, AssistantFrame, AssistantManifest};

const ATLAS_FILE_NAME: &str = "atlas.png";
const MANIFEST_FILE_NAME: &str = "manifest.json";
const MIN_FRAME_DURATION_SECONDS: f64 = 1.0 / 120.0;
const DEFAULT_FALLBACK_DURATION_SECONDS: f64 = 1.0 / 12.0;

/// Options controlling a single ingest run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
	/// Directory the atlas and manifest are written into; created if
	/// it does not already exist.
	pub output_directory: PathBuf,
	/// Overrides the character name derived from the source filename.
	pub character_name: Option<String>,
	/// Duration, in seconds, assigned to frames with an unspecified
	/// (`0` tick) duration.
	pub fallback_frame_duration: f64,
	/// Upper bound on either atlas dimension.
	pub max_atlas_dimension: u32,
}

impl IngestOptions {
	/// Builds options with every default except the output directory.
	pub fn new(output_directory: impl Into<PathBuf>) -> Self {
		Self {
			output_directory: output_directory.into(),
			character_name: None,
			fallback_frame_duration: DEFAULT_FALLBACK_DURATION_SECONDS,
			max_atlas_dimension: DEFAULT_MAX_DIMENSION,
		}
	}
}

/// The artifacts produced by a successful ingest.
#[derive(Debug, Clone)]
pub struct IngestOutput {
	/// The written manifest.
	pub manifest: AssistantManifest,
	/// Path to the written atlas PNG.
	pub atlas_path: PathBuf,
	/// Path to the written manifest JSON.
	pub manifest_path: PathBuf,
}

/// Ingests the ACS container in `data`, writing `atlas.png` and
/// `manifest.json` into `options.output_directory`.
///
/// `source_name` is used to derive the character name when
/// `options.character_name` is unset (its extension, if any, is
/// stripped).
///
/// # Errors
///
/// Returns [`AcsError::EmptyFrames`] if the container has no frames,
/// and otherwise propagates parsing, compositing, atlas, or I/O
/// failures.
pub fn ingest(data: &[u8], source_name: &str, options: &IngestOptions) -> Result<IngestOutput, AcsError> {
	std::fs::create_dir_all(&options.output_directory)?;

	let character_name = options
		.character_name
		.clone()
		.unwrap_or_else(|| strip_extension(source_name).to_string());

	let parsed = container::parse(data)?;
	let total_frames: usize = parsed.animations.iter().map(|a| a.frames.len()).sum();
	if total_frames == 0 {
		return Err(AcsError::EmptyFrames);
	}
	debug!("ingest: {character_name}: {total_frames} frames across {} animations", parsed.animations.len());

	let cell_size = IntSize::new(u32::from(parsed.canvas_width), u32::from(parsed.canvas_height));
	let layout = AtlasLayout::new(total_frames as u32, cell_size, options.max_atlas_dimension)?;
	let atlas_size = layout.atlas_size();
	debug!("ingest: atlas dimensions {}x{}", atlas_size.width, atlas_size.height);

	let mut atlas_image: ImageBuffer<Rgba<u8>, Vec<u8>> =
		ImageBuffer::new(atlas_size.width, atlas_size.height);

	let mut frames = Vec::with_capacity(total_frames);
	let mut clip_ranges = Vec::with_capacity(parsed.animations.len());
	let mut raw_names = Vec::with_capacity(parsed.animations.len());
	let mut global_index: u32 = 0;

	for animation in &parsed.animations {
		let start_frame = global_index;
		for frame in &animation.frames {
			let canvas = compositor::composite(
				frame,
				&parsed.images,
				&parsed.palette,
				parsed.transparency_index,
				cell_size.width,
				cell_size.height,
			);
			let position = layout.position_of(global_index);
			blit(&mut atlas_image, &canvas, position);

			let duration = if frame.duration_ticks > 0 {
				(f64::from(frame.duration_ticks) / 100.0).max(MIN_FRAME_DURATION_SECONDS)
			} else {
				options.fallback_frame_duration.max(MIN_FRAME_DURATION_SECONDS)
			};

			frames.push(AssistantFrame {
				index: global_index,
				image_name: ATLAS_FILE_NAME.to_string(),
				source_rect: IntRect::new(position.x, position.y, cell_size.width, cell_size.height),
				trimmed_rect: IntRect::new(0, 0, cell_size.width, cell_size.height),
				offset: IntPoint::new(0, 0),
				size: cell_size,
				duration,
			});

			global_index += 1;
		}

		let frame_count = global_index - start_frame;
		if frame_count > 0 {
			clip_ranges.push((start_frame, frame_count));
			raw_names.push(animation.name.clone());
		} else {
			warn!("ingest: animation '{}' produced no frames, omitting clip", animation.name);
		}
	}

	if clip_ranges.is_empty() {
		clip_ranges.push((0, frames.len() as u32));
		raw_names.push("all".to_string());
	}

	let names = unique_names(&raw_names);
	let animations = names
		.into_iter()
		.zip(clip_ranges)
		.map(|(name, (start_frame, frame_count))| AssistantAnimationClip {
			name,
			start_frame,
			frame_count,
			loops: true,
		})
		.collect();

	let manifest = AssistantManifest {
		character_name,
		frame_cell_size: cell_size,
		frames,
		animations,
	};

	let atlas_path = options.output_directory.join(ATLAS_FILE_NAME);
	let manifest_path = options.output_directory.join(MANIFEST_FILE_NAME);

	atlas_image
		.save(&atlas_path)
		.map_err(|e| AcsError::EncodeFailed(format!("failed to write atlas: {e}")))?;
	manifest.save(&manifest_path)?;

	Ok(IngestOutput { manifest, atlas_path, manifest_path })
}

fn blit(
	atlas: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
	canvas: &compositor::RgbaCanvas,
	position: IntPoint,
) {
	for y in 0..canvas.height() {
		for x in 0..canvas.width() {
			let offset = ((y * canvas.width() + x) * 4) as usize;
			let pixel = &canvas.pixels()[offset..offset + 4];
			atlas.put_pixel(
				position.x as u32 + x,
				position.y as u32 + y,
				Rgba([pixel[0], pixel[1], pixel[2], pixel[3]]),
			);
		}
	}
}

fn strip_extension(name: &str) -> &str {
	Path::new(name).file_stem().and_then(|s| s.to_str()).unwrap_or(name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_known_extension() {
		assert_eq!(strip_extension("CLIPPY.ACS"), "CLIPPY");
		assert_eq!(strip_extension("clippy"), "clippy");
	}

	#[test]
	fn rejects_empty_container() {
		let data = [0u8; 4];
		let options = IngestOptions::new(std::env::temp_dir().join("msagent-ingest-test-empty"));
		let result = ingest(&data, "x.acs", &options);
		assert!(result.is_err());
	}
}
