//! Bounds-checked little-endian cursor over a byte range.

use super::error::ReaderError;

/// A cursor over a sub-range `[start, end)` of a shared byte slice.
///
/// Every read advances `offset` and fails with
/// [`ReaderError::UnexpectedEndOfData`] rather than panicking when it
/// would cross `end`.
///
/// # Examples
///
/// ```
/// use msagent_types::acs::reader::ByteReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = ByteReader::new(&data);
/// assert_eq!(reader.read_u16_le().unwrap(), 0x0201);
/// assert_eq!(reader.read_u8().unwrap(), 0x03);
/// ```
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
	blob: &'a [u8],
	start: usize,
	end: usize,
	offset: usize,
}

impl<'a> ByteReader<'a> {
	/// Creates a reader over the entire slice.
	pub fn new(blob: &'a [u8]) -> Self {
		Self { blob, start: 0, end: blob.len(), offset: 0 }
	}

	/// Creates a reader over the sub-range `[offset, offset + length)`.
	///
	/// # Errors
	///
	/// Returns [`ReaderError::InvalidRange`] if the range does not fit
	/// inside `blob`.
	pub fn with_range(blob: &'a [u8], offset: u32, length: u32) -> Result<Self, ReaderError> {
		let offset = offset as i64;
		let length = length as i64;
		if offset < 0 || length < 0 || offset + length > blob.len() as i64 {
			return Err(ReaderError::InvalidRange { offset, length, blob_len: blob.len() });
		}
		Ok(Self { blob, start: offset as usize, end: (offset + length) as usize, offset: offset as usize })
	}

	/// Current read position, relative to the start of this range.
	pub fn position(&self) -> usize {
		self.offset - self.start
	}

	/// Number of unread bytes remaining in this range.
	pub fn remaining(&self) -> usize {
		self.end - self.offset
	}

	fn take(&mut self, count: usize) -> Result<&'a [u8], ReaderError> {
		if self.offset + count > self.end {
			return Err(ReaderError::UnexpectedEndOfData {
				bytes_requested: count,
				offset_from_range_start: self.offset - self.start,
			});
		}
		let slice = &self.blob[self.offset..self.offset + count];
		self.offset += count;
		Ok(slice)
	}

	/// Reads an unsigned 8-bit integer.
	pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
		Ok(self.take(1)?[0])
	}

	/// Reads an unsigned 16-bit little-endian integer.
	pub fn read_u16_le(&mut self) -> Result<u16, ReaderError> {
		let bytes = self.take(2)?;
		Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
	}

	/// Reads a signed 16-bit little-endian integer.
	pub fn read_i16_le(&mut self) -> Result<i16, ReaderError> {
		Ok(self.read_u16_le()? as i16)
	}

	/// Reads an unsigned 32-bit little-endian integer.
	pub fn read_u32_le(&mut self) -> Result<u32, ReaderError> {
		let bytes = self.take(4)?;
		Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
	}

	/// Reads `count` raw bytes.
	pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ReaderError> {
		self.take(count)
	}

	/// Reads `units` UTF-16LE code units without consuming a terminator.
	pub fn read_utf16_le(&mut self, units: usize) -> Result<String, ReaderError> {
		let bytes = self.take(units * 2)?;
		let mut codepoints = Vec::with_capacity(units);
		for chunk in bytes.chunks_exact(2) {
			codepoints.push(u16::from_le_bytes([chunk[0], chunk[1]]));
		}
		Ok(String::from_utf16_lossy(&codepoints))
	}

	/// Skips `count` bytes without returning them.
	pub fn skip(&mut self, count: usize) -> Result<(), ReaderError> {
		self.take(count)?;
		Ok(())
	}

	/// Builds a reader over `[offset, offset + length)` of the same
	/// underlying blob this reader was built from.
	pub fn sub_range(&self, offset: u32, length: u32) -> Result<ByteReader<'a>, ReaderError> {
		ByteReader::with_range(self.blob, offset, length)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_primitives_in_order() {
		let data = [0xAB, 0xCD, 0xAB, 0xC3, 0x05];
		let mut r = ByteReader::new(&data);
		assert_eq!(r.read_u32_le().unwrap(), 0xC3AB_CDAB);
		assert_eq!(r.read_u8().unwrap(), 0x05);
	}

	#[test]
	fn fails_past_end() {
		let data = [0x01];
		let mut r = ByteReader::new(&data);
		assert!(r.read_u32_le().is_err());
	}

	#[test]
	fn sub_range_rejects_out_of_bounds() {
		let data = [0u8; 4];
		assert!(ByteReader::with_range(&data, 2, 4).is_err());
		assert!(ByteReader::with_range(&data, 1, 2).is_ok());
	}

	#[test]
	fn decodes_utf16_string() {
		let data: Vec<u8> = "Hi".encode_utf16().flat_map(u16::to_le_bytes).collect();
		let mut r = ByteReader::new(&data);
		assert_eq!(r.read_utf16_le(2).unwrap(), "Hi");
	}
}
