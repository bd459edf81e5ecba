//! Prelude module for `msagent_types`.
//!
//! This module provides a convenient way to import commonly used
//! types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use msagent_types::prelude::*;
//!
//! let options = IngestOptions::new("out/clippy");
//! ```

// ACS ingest/playback types
#[doc(inline)]
pub use crate::acs::{
	ingest, AcsError, AssistantAnimationClip, AssistantFrame, AssistantManifest, AtlasLayout,
	ByteReader, FramePlayer, IndexedImage, IngestOptions, IngestOutput, IntPoint, IntRect, IntSize,
	Palette, ParsedContainer, ReaderError,
};

// Re-export the acs module for advanced usage
#[doc(inline)]
pub use crate::acs;
