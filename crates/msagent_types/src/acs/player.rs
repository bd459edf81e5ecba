//! Time-driven state machine that advances an [`AssistantManifest`]'s
//! clips from wall-clock deltas.

use super::error::AcsError;
use super::manifest::AssistantManifest;

const MIN_FRAME_DURATION: f64 = 1.0 / 120.0;

/// Drives playback of one [`AssistantManifest`] over time.
///
/// `update` is the only mutating entrypoint meant to be called every
/// tick; `play` and `configure_playback` take effect on the next
/// `update`.
#[derive(Debug, Clone)]
pub struct FramePlayer {
	manifest: AssistantManifest,
	clip_index: usize,
	local_frame_index: u32,
	elapsed_in_frame: f64,
	looping_override: Option<bool>,
	loop_delay: f64,
	pending_delay: f64,
}

impl FramePlayer {
	/// Creates a player over `manifest`, optionally starting on the
	/// clip named `initial_clip`.
	///
	/// If the manifest has no clips, a single synthetic looping clip
	/// named `"all"` covering every frame is synthesized.
	///
	/// # Errors
	///
	/// Returns [`AcsError::EmptyFrames`] if the manifest has no
	/// frames, or [`AcsError::InvalidInput`] if `initial_clip` names an
	/// unknown clip.
	pub fn new(manifest: AssistantManifest, initial_clip: Option<&str>) -> Result<Self, AcsError> {
		if manifest.frames.is_empty() {
			return Err(AcsError::EmptyFrames);
		}

		let manifest = if manifest.animations.is_empty() {
			let frame_count = manifest.frames.len() as u32;
			let mut manifest = manifest;
			manifest.animations.push(super::manifest::AssistantAnimationClip {
				name: "all".to_string(),
				start_frame: 0,
				frame_count,
				loops: true,
			});
			manifest
		} else {
			manifest
		};

		let clip_index = match initial_clip {
			Some(name) => manifest
				.animations
				.iter()
				.position(|c| c.name == name)
				.ok_or_else(|| AcsError::InvalidInput(format!("unknown animation: {name}")))?,
			None => 0,
		};

		Ok(Self {
			manifest,
			clip_index,
			local_frame_index: 0,
			elapsed_in_frame: 0.0,
			looping_override: None,
			loop_delay: 0.0,
			pending_delay: 0.0,
		})
	}

	/// Name of the currently selected clip.
	pub fn current_animation_name(&self) -> &str {
		&self.manifest.animations[self.clip_index].name
	}

	/// Global frame index (into `manifest.frames`) the player is
	/// currently displaying.
	pub fn current_global_frame_index(&self) -> u32 {
		self.manifest.animations[self.clip_index].start_frame + self.local_frame_index
	}

	/// Switches to the clip named `name`.
	///
	/// If `restart` is set, playback resets to the clip's first frame;
	/// otherwise the current local frame index is clamped into the new
	/// clip's range.
	///
	/// # Errors
	///
	/// Returns [`AcsError::InvalidInput`] if `name` is not a known clip.
	pub fn play(&mut self, name: &str, restart: bool) -> Result<(), AcsError> {
		let index = self
			.manifest
			.animations
			.iter()
			.position(|c| c.name == name)
			.ok_or_else(|| AcsError::InvalidInput(format!("unknown animation: {name}")))?;
		self.clip_index = index;

		if restart {
			self.local_frame_index = 0;
			self.elapsed_in_frame = 0.0;
			self.pending_delay = 0.0;
		} else {
			let max_index = self.manifest.animations[index].frame_count.saturating_sub(1);
			self.local_frame_index = self.local_frame_index.min(max_index);
		}
		Ok(())
	}

	/// Overrides the current clip's loop flag and sets the delay held
	/// on the last frame before wrapping back to the first, when
	/// looping is in effect.
	pub fn configure_playback(&mut self, looping: Option<bool>, loop_delay: f64) {
		self.looping_override = looping;
		self.loop_delay = loop_delay.max(0.0);
	}

	fn current_clip_loops(&self) -> bool {
		self.looping_override.unwrap_or(self.manifest.animations[self.clip_index].loops)
	}

	fn frame_duration(&self, local_index: u32) -> f64 {
		let clip = &self.manifest.animations[self.clip_index];
		let global = (clip.start_frame + local_index) as usize;
		self.manifest.frames[global].duration.max(MIN_FRAME_DURATION)
	}

	/// Advances playback by `dt` seconds. Never fails; a non-positive
	/// `dt` is a no-op.
	pub fn update(&mut self, dt: f64) {
		if dt <= 0.0 {
			return;
		}
		let mut remaining = dt;
		let should_loop = self.current_clip_loops();

		while remaining > 0.0 {
			if self.pending_delay > 0.0 {
				let consumed = remaining.min(self.pending_delay);
				self.pending_delay -= consumed;
				remaining -= consumed;
				if self.pending_delay > 0.0 {
					break;
				}
				self.local_frame_index = 0;
				self.elapsed_in_frame = 0.0;
				continue;
			}

			let frame_count = self.manifest.animations[self.clip_index].frame_count;
			let current_duration = self.frame_duration(self.local_frame_index);
			let step = current_duration - self.elapsed_in_frame;

			if remaining < step {
				self.elapsed_in_frame += remaining;
				break;
			}

			remaining -= step;
			self.elapsed_in_frame = 0.0;

			if self.local_frame_index + 1 < frame_count {
				self.local_frame_index += 1;
			} else if should_loop {
				if self.loop_delay > 0.0 {
					self.pending_delay = self.loop_delay;
				} else {
					self.local_frame_index = 0;
				}
			} else {
				self.local_frame_index = frame_count.saturating_sub(1);
				break;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::acs::geometry::{IntPoint, IntRect, IntSize};
	use crate::acs::manifest::{AssistantAnimationClip, AssistantFrame};

	fn frame(index: u32, duration: f64) -> AssistantFrame {
		AssistantFrame {
			index,
			image_name: "atlas.png".into(),
			source_rect: IntRect::new(0, 0, 10, 10),
			trimmed_rect: IntRect::new(0, 0, 10, 10),
			offset: IntPoint::new(0, 0),
			size: IntSize::new(10, 10),
			duration,
		}
	}

	fn manifest_with_clip(frame_count: u32, duration: f64, loops: bool) -> AssistantManifest {
		AssistantManifest {
			character_name: "Test".into(),
			frame_cell_size: IntSize::new(10, 10),
			frames: (0..frame_count).map(|i| frame(i, duration)).collect(),
			animations: vec![AssistantAnimationClip {
				name: "all".into(),
				start_frame: 0,
				frame_count,
				loops,
			}],
		}
	}

	#[test]
	fn s1_loops_within_current_animation() {
		let manifest = manifest_with_clip(3, 0.1, true);
		let mut player = FramePlayer::new(manifest, None).unwrap();
		player.update(0.1);
		assert_eq!(player.current_global_frame_index(), 1);
		player.update(0.1);
		assert_eq!(player.current_global_frame_index(), 2);
		player.update(0.1);
		assert_eq!(player.current_global_frame_index(), 0);
	}

	#[test]
	fn s2_typed_play_and_idle_frame() {
		let mut manifest = manifest_with_clip(1, 0.1, true);
		manifest.animations[0].name = "Greeting".into();
		let player = FramePlayer::new(manifest, Some("Greeting")).unwrap();
		assert_eq!(player.current_animation_name(), "Greeting");
		assert_eq!(player.current_global_frame_index(), 0);
	}

	#[test]
	fn s3_play_once_pins_last_frame() {
		let mut manifest = manifest_with_clip(2, 0.1, true);
		manifest.animations[0].name = "Greeting".into();
		let mut player = FramePlayer::new(manifest, Some("Greeting")).unwrap();
		player.configure_playback(Some(false), 0.0);
		player.update(1.0);
		assert_eq!(player.current_global_frame_index(), 1);
		player.update(1.0);
		assert_eq!(player.current_global_frame_index(), 1);
	}

	#[test]
	fn s4_loop_delay_holds_last_frame() {
		let manifest = manifest_with_clip(2, 0.1, true);
		let mut player = FramePlayer::new(manifest, None).unwrap();
		player.configure_playback(Some(true), 0.2);
		player.update(0.2);
		assert_eq!(player.current_global_frame_index(), 1);
		player.update(0.1);
		assert_eq!(player.current_global_frame_index(), 1);
		player.update(0.19);
		assert_eq!(player.current_global_frame_index(), 0);
		player.update(0.02);
		assert_eq!(player.current_global_frame_index(), 1);
	}

	#[test]
	fn rejects_empty_manifest() {
		let manifest = manifest_with_clip(0, 0.1, true);
		let manifest = AssistantManifest { frames: vec![], ..manifest };
		assert!(FramePlayer::new(manifest, None).is_err());
	}

	#[test]
	fn rejects_unknown_initial_clip() {
		let manifest = manifest_with_clip(1, 0.1, true);
		assert!(FramePlayer::new(manifest, Some("nope")).is_err());
	}
}
