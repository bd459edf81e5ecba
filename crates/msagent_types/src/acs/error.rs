//! Error types for ACS container parsing, ingest, and playback.

use thiserror::Error;

/// Errors raised while reading primitive values out of a byte range.
#[derive(Debug, Error)]
pub enum ReaderError {
	/// A read would cross the end of the current range.
	#[error("unexpected end of data: requested {bytes_requested} bytes at offset {offset_from_range_start}")]
	UnexpectedEndOfData {
		/// Number of bytes the caller asked for.
		bytes_requested: usize,
		/// Offset of the read, relative to the start of the current range.
		offset_from_range_start: usize,
	},

	/// A sub-range was requested that does not fit inside its parent.
	#[error("invalid range: offset {offset} length {length} exceeds blob of {blob_len} bytes")]
	InvalidRange {
		/// Requested range offset.
		offset: i64,
		/// Requested range length.
		length: i64,
		/// Length of the blob the range was carved from.
		blob_len: usize,
	},
}

/// Errors that can occur while ingesting an ACS character file or
/// driving its resulting manifest through the frame player.
#[derive(Debug, Error)]
pub enum AcsError {
	/// The manifest would contain (or does contain) zero frames.
	#[error("no frames produced")]
	EmptyFrames,

	/// A requested capability is unavailable in the host environment.
	#[error("unsupported platform: {0}")]
	UnsupportedPlatform(String),

	/// The container, or a section of it, is structurally invalid.
	#[error("failed to decode input: {0}")]
	DecodeFailed(String),

	/// Encoding the atlas or manifest failed.
	#[error("failed to encode output: {0}")]
	EncodeFailed(String),

	/// A filesystem read or write failed.
	#[error(transparent)]
	IoFailed(#[from] std::io::Error),

	/// The caller supplied an unsupported or structurally invalid input.
	#[error("invalid input: {0}")]
	InvalidInput(String),
}

impl From<ReaderError> for AcsError {
	fn from(value: ReaderError) -> Self {
		AcsError::DecodeFailed(value.to_string())
	}
}
