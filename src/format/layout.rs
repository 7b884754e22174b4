//! Fixed-field view of an encoded record
//!
//! Parsing walks the length fields in wire order and stops at the first one
//! that does not fit, so no read ever lands outside the buffer.

use std::ops::Range;

use super::{CHECKSUM_SIZE, Error, FIXED_OVERHEAD, LENGTH_FIELD_SIZE, Result};

/// Validated positions of every field in a wire buffer
///
/// # Wire Format
///
/// ```text
/// offset     size       field
/// 0          4          total_len = 12 + key_len + value_len
/// 4          4          key_len
/// 8          key_len    key
/// 8+kl       4          value_len
/// 12+kl      value_len  value
/// 12+kl+vl   4          checksum (CRC-32 over [4 .. total_len))
/// ```
///
/// All integers are big-endian `u32`. The encoder never leaves bytes after
/// the checksum. The decoder tolerates them when `value_len` is short of the
/// room `total_len` leaves, as long as the CRC over `[4 .. total_len)`
/// matches the checksum stored right after the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    total_len: u32,
    key_len: u32,
    value_len: u32,
    checksum: u32,
}

impl RecordLayout {
    /// Check the length fields of `buf` and locate the key, value and checksum.
    ///
    /// The stored checksum is read but not verified.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let len = buf.len();
        if len < LENGTH_FIELD_SIZE {
            return Err(Error::TooShort { got: len });
        }

        let total_len = read_field(buf, 0, "total_len")?;
        let actual = len - LENGTH_FIELD_SIZE;
        if actual != total_len as usize {
            return Err(Error::LengthMismatch {
                declared: total_len,
                actual,
            });
        }

        if (total_len as usize) < FIXED_OVERHEAD {
            return Err(Error::MalformedLayout {
                field: "total_len",
                claimed: FIXED_OVERHEAD,
                available: total_len as usize,
            });
        }

        let room = total_len as usize - FIXED_OVERHEAD;
        let key_len = read_field(buf, LENGTH_FIELD_SIZE, "key_len")?;
        if key_len as usize > room {
            return Err(Error::MalformedLayout {
                field: "key_len",
                claimed: key_len as usize,
                available: room,
            });
        }

        let room = room - key_len as usize;
        let value_len = read_field(buf, 2 * LENGTH_FIELD_SIZE + key_len as usize, "value_len")?;
        if value_len as usize > room {
            return Err(Error::MalformedLayout {
                field: "value_len",
                claimed: value_len as usize,
                available: room,
            });
        }

        let layout = Self {
            total_len,
            key_len,
            value_len,
            checksum: 0,
        };
        let checksum = read_field(buf, layout.checksum_offset(), "checksum")?;

        Ok(Self { checksum, ..layout })
    }

    /// Declared byte count after the `total_len` field
    #[must_use]
    pub const fn total_len(&self) -> u32 {
        self.total_len
    }

    /// Key length in bytes
    #[must_use]
    pub const fn key_len(&self) -> u32 {
        self.key_len
    }

    /// Value length in bytes
    #[must_use]
    pub const fn value_len(&self) -> u32 {
        self.value_len
    }

    /// Checksum as stored in the buffer
    #[must_use]
    pub const fn stored_checksum(&self) -> u32 {
        self.checksum
    }

    /// Full on-wire size, `total_len + 4`
    #[must_use]
    pub const fn wire_len(&self) -> usize {
        self.total_len as usize + LENGTH_FIELD_SIZE
    }

    /// Byte range of the key
    #[must_use]
    pub const fn key_range(&self) -> Range<usize> {
        let start = 2 * LENGTH_FIELD_SIZE;
        start..start + self.key_len as usize
    }

    /// Byte range of the value
    #[must_use]
    pub const fn value_range(&self) -> Range<usize> {
        let start = 3 * LENGTH_FIELD_SIZE + self.key_len as usize;
        start..start + self.value_len as usize
    }

    /// Offset of the stored checksum, right after the value
    #[must_use]
    pub const fn checksum_offset(&self) -> usize {
        self.value_range().end
    }

    /// Bytes between the stored checksum and the end of the buffer
    #[must_use]
    pub const fn slack_len(&self) -> usize {
        self.wire_len() - CHECKSUM_SIZE - self.checksum_offset()
    }

    /// Byte range covered by the checksum: everything after `total_len` but
    /// the last four bytes, `key_len ++ key ++ value_len ++ value` for any
    /// encoder output
    #[must_use]
    pub const fn checksummed_range(&self) -> Range<usize> {
        LENGTH_FIELD_SIZE..self.wire_len() - CHECKSUM_SIZE
    }
}

/// Big-endian `u32` at `at`, or a layout error if it would run off the end.
fn read_field(buf: &[u8], at: usize, field: &'static str) -> Result<u32> {
    at.checked_add(LENGTH_FIELD_SIZE)
        .and_then(|end| buf.get(at..end))
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .map(u32::from_be_bytes)
        .ok_or(Error::MalformedLayout {
            field,
            claimed: LENGTH_FIELD_SIZE,
            available: buf.len().saturating_sub(at),
        })
}
