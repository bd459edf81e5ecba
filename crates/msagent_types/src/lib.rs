//! This crate provides the core data types and ingest pipeline for
//! `msagent-rs`.
//!
//! # Modules
//!
//! - **acs**: parses legacy Microsoft Agent 2.0 character files into
//!   a portable [`acs::AssistantManifest`] plus a sprite atlas, and
//!   plays the result back through [`acs::FramePlayer`].
//!
//! # Examples
//!
//! ```no_run
//! use msagent_types::acs::{ingest, IngestOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("CLIPPY.ACS")?;
//! let options = IngestOptions::new("out/clippy");
//! let output = ingest(&data, "CLIPPY.ACS", &options)?;
//! println!("wrote {} frames", output.manifest.frames.len());
//! # Ok(())
//! # }
//! ```

pub mod acs;

// Re-export the ingest pipeline's public surface at the crate root.
pub use acs::{
	ingest, AcsError, AssistantAnimationClip, AssistantFrame, AssistantManifest, AtlasLayout,
	FramePlayer, IndexedImage, IngestOptions, IngestOutput, IntPoint, IntRect, IntSize, Palette,
};
