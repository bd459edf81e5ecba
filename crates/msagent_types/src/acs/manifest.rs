//! The portable, engine-agnostic output of ingest: a manifest
//! describing atlas frames and named animation clips, serialized as
//! JSON.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::AcsError;
use super::geometry::{IntPoint, IntRect, IntSize};

/// One atlas-backed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantFrame {
	/// Position of this frame within `frames`; always equal to its index.
	pub index: u32,
	/// Name of the atlas image this frame is drawn from.
	#[serde(rename = "imageName")]
	pub image_name: String,
	/// Rectangle within the atlas holding this frame's pixels.
	#[serde(rename = "sourceRect")]
	pub source_rect: IntRect,
	/// Rectangle of the frame after trimming (identical to the full
	/// cell; ACS frames are not trimmed).
	#[serde(rename = "trimmedRect")]
	pub trimmed_rect: IntRect,
	/// Offset of the trimmed rectangle within the full cell.
	pub offset: IntPoint,
	/// Size of the full frame cell.
	pub size: IntSize,
	/// Playback duration in seconds.
	pub duration: f64,
}

/// A named, contiguous range of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantAnimationClip {
	/// Clip name, unique within a manifest.
	pub name: String,
	/// Index of the clip's first frame.
	#[serde(rename = "startFrame")]
	pub start_frame: u32,
	/// Number of frames in the clip.
	#[serde(rename = "frameCount")]
	pub frame_count: u32,
	/// Whether the clip repeats after its last frame.
	pub loops: bool,
}

/// The complete ingest output for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantManifest {
	/// Display name of the character.
	#[serde(rename = "characterName")]
	pub character_name: String,
	/// Uniform cell size every frame is composited into.
	#[serde(rename = "frameCellSize")]
	pub frame_cell_size: IntSize,
	/// Every frame, in atlas order.
	pub frames: Vec<AssistantFrame>,
	/// Named animation clips.
	pub animations: Vec<AssistantAnimationClip>,
}

impl AssistantManifest {
	/// Serializes the manifest as pretty-printed JSON and writes it to
	/// `path` atomically: the JSON is written to a sibling temp file
	/// which is then renamed over `path`, so a reader never observes a
	/// partially-written manifest.
	///
	/// # Errors
	///
	/// Returns [`AcsError::EncodeFailed`] if serialization fails, or
	/// [`AcsError::IoFailed`] if the write or rename fails.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AcsError> {
		let path = path.as_ref();
		let json = serde_json::to_vec_pretty(self)
			.map_err(|e| AcsError::EncodeFailed(format!("manifest serialization failed: {e}")))?;

		let tmp_path = path.with_extension("json.tmp");
		let mut file = std::fs::File::create(&tmp_path)?;
		file.write_all(&json)?;
		file.flush()?;
		drop(file);
		std::fs::rename(&tmp_path, path)?;
		Ok(())
	}

	/// Reads and parses a manifest previously written by [`Self::save`].
	///
	/// # Errors
	///
	/// Returns [`AcsError::IoFailed`] if the file cannot be read, or
	/// [`AcsError::DecodeFailed`] if it is not a valid manifest.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AcsError> {
		let data = std::fs::read(path)?;
		serde_json::from_slice(&data)
			.map_err(|e| AcsError::DecodeFailed(format!("manifest parse failed: {e}")))
	}
}

/// Assigns unique animation names by suffixing `_N` on second and
/// later occurrences of a name, and replacing empty/whitespace-only
/// names with `"animation"` before dedup.
pub fn unique_names(raw_names: &[String]) -> Vec<String> {
	let mut seen: HashSet<String> = HashSet::new();
	let mut counts: std::collections::HashMap<String, u32> = std::collections::HashMap::new();
	let mut result = Vec::with_capacity(raw_names.len());

	for raw in raw_names {
		let base = if raw.trim().is_empty() { "animation".to_string() } else { raw.clone() };
		let candidate = if seen.contains(&base) {
			let n = counts.entry(base.clone()).or_insert(0);
			loop {
				*n += 1;
				let candidate = format!("{base}_{n}");
				if !seen.contains(&candidate) {
					break candidate;
				}
			}
		} else {
			base.clone()
		};
		seen.insert(candidate.clone());
		result.push(candidate);
	}

	result
}
