//! Ingest pipeline for legacy Microsoft Agent 2.0 ("ACS") character
//! files: a binary container parser, a bit-stream decompressor, a
//! frame compositor, a bin-packing atlas layouter, an ingest
//! coordinator that ties them together, a JSON manifest model, and a
//! time-driven frame player that consumes the result.

pub mod atlas;
pub mod bitstream;
pub mod compositor;
pub mod container;
pub mod error;
pub mod geometry;
pub mod indexed_image;
pub mod ingest;
pub mod manifest;
pub mod palette;
pub mod player;
pub mod reader;

pub use atlas::AtlasLayout;
pub use compositor::RgbaCanvas;
pub use container::{FrameLayer, ParsedAnimation, ParsedContainer, ParsedFrame};
pub use error::{AcsError, ReaderError};
pub use geometry::{IntPoint, IntRect, IntSize};
pub use indexed_image::IndexedImage;
pub use ingest::{ingest, IngestOptions, IngestOutput};
pub use manifest::{AssistantAnimationClip, AssistantFrame, AssistantManifest};
pub use palette::Palette;
pub use player::FramePlayer;
pub use reader::ByteReader;
