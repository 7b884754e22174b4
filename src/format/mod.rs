//! Record wire format
//!
//! This module provides the checksum engine, the encoder/decoder and the
//! `Record` value type.

mod checksum;
mod codec;
mod error;
mod frames;
mod layout;
pub(crate) mod metrics;
mod record;

pub use checksum::{CRC32_TABLE, Crc32, POLYNOMIAL, checksum, verify_checksum};
pub use codec::{
    DecodeConfig, decode, decode_with, encode, encode_into, encoded_len, is_valid, try_encode,
};
pub use error::{Error, ErrorKind, Result};
pub use frames::{Frames, frame_len};
pub use layout::RecordLayout;
pub use metrics::MetricsSnapshot;
pub use record::Record;

/// Width of every length field and of the checksum
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Checksum size in bytes
pub const CHECKSUM_SIZE: usize = 4;

/// Bytes after `total_len` that every record carries regardless of content
/// (`key_len`, `value_len`, checksum)
pub const FIXED_OVERHEAD: usize = 2 * LENGTH_FIELD_SIZE + CHECKSUM_SIZE;

/// Wire size of a record with an empty key and value
pub const MIN_RECORD_SIZE: usize = LENGTH_FIELD_SIZE + FIXED_OVERHEAD;

/// Largest on-wire record the 32-bit `total_len` field can describe
pub const MAX_RECORD_SIZE: usize = (u32::MAX as usize).saturating_add(LENGTH_FIELD_SIZE);
