//! Record codec (encode/decode)

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use super::metrics::Metrics;
use super::{
    Crc32, Error, FIXED_OVERHEAD, LENGTH_FIELD_SIZE, MAX_RECORD_SIZE, MIN_RECORD_SIZE, Record,
    RecordLayout, Result, checksum, verify_checksum,
};

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeConfig {
    /// Largest on-wire record accepted, length prefix included.
    pub max_record_len: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_record_len: MAX_RECORD_SIZE,
        }
    }
}

impl DecodeConfig {
    /// Cap accepted records at `max_record_len` wire bytes.
    #[must_use]
    pub const fn with_max_record_len(max_record_len: usize) -> Self {
        Self { max_record_len }
    }
}

/// Wire size of a record with the given key and value lengths.
#[must_use]
pub const fn encoded_len(key_len: usize, value_len: usize) -> usize {
    MIN_RECORD_SIZE
        .saturating_add(key_len)
        .saturating_add(value_len)
}

/// `total_len` for the given lengths, if it fits in 32 bits.
fn total_len(key_len: usize, value_len: usize) -> Option<u32> {
    FIXED_OVERHEAD
        .checked_add(key_len)?
        .checked_add(value_len)
        .and_then(|len| u32::try_from(len).ok())
}

/// Encode a key/value pair to bytes
///
/// # Format
///
/// ```text
/// [TOTAL_LEN (4)] [KEY_LEN (4)] [KEY] [VALUE_LEN (4)] [VALUE] [CRC-32 (4)]
/// ```
///
/// The caller must keep `12 + key.len() + value.len()` within `u32::MAX`;
/// this is only checked in debug builds. Use [`try_encode`] for a checked
/// variant.
#[must_use]
pub fn encode(key: &[u8], value: &[u8]) -> Vec<u8> {
    debug_assert!(
        total_len(key.len(), value.len()).is_some(),
        "record exceeds the 32-bit length field"
    );

    let mut bytes = Vec::with_capacity(encoded_len(key.len(), value.len()));
    write_record(key, value, &mut bytes);
    bytes
}

/// Encode a key/value pair, rejecting records too large for the length field.
pub fn try_encode(key: &[u8], value: &[u8]) -> Result<Vec<u8>> {
    if total_len(key.len(), value.len()).is_none() {
        let err = Error::RecordTooLarge {
            size: encoded_len(key.len(), value.len()),
            max: MAX_RECORD_SIZE,
        };
        Metrics::record_failure(err.kind());
        debug!(key_len = key.len(), value_len = value.len(), "record too large to encode");
        return Err(err);
    }

    Ok(encode(key, value))
}

/// Append an encoded record to `dst`.
///
/// Several records appended back to back form a stream that
/// [`Frames`](super::Frames) can split again.
pub fn encode_into(key: &[u8], value: &[u8], dst: &mut BytesMut) {
    debug_assert!(
        total_len(key.len(), value.len()).is_some(),
        "record exceeds the 32-bit length field"
    );

    dst.reserve(encoded_len(key.len(), value.len()));
    write_record(key, value, dst);
}

fn write_record<B: BufMut>(key: &[u8], value: &[u8], dst: &mut B) {
    let key_len = key.len() as u32;
    let value_len = value.len() as u32;
    let total = (FIXED_OVERHEAD + key.len() + value.len()) as u32;

    // Checksum covers key_len ++ key ++ value_len ++ value
    let mut crc = Crc32::new();
    crc.update(&key_len.to_be_bytes());
    crc.update(key);
    crc.update(&value_len.to_be_bytes());
    crc.update(value);

    dst.put_u32(total);
    dst.put_u32(key_len);
    dst.put_slice(key);
    dst.put_u32(value_len);
    dst.put_slice(value);
    dst.put_u32(crc.finalize());

    let wire_len = total as usize + LENGTH_FIELD_SIZE;
    Metrics::record_encode(wire_len);
    trace!(key_len, value_len, wire_len, "encoded record");
}

/// Decode a record from bytes
///
/// `buf` must hold exactly one record: no more, no less.
///
/// # Errors
///
/// Returns an error if:
/// - Buffer is shorter than the length prefix
/// - Declared length doesn't match the buffer
/// - A length field claims more room than the record has
/// - Checksum doesn't match
pub fn decode(buf: &[u8]) -> Result<Record> {
    decode_with(buf, &DecodeConfig::default())
}

/// Decode a record, additionally enforcing the limits in `config`.
pub fn decode_with(buf: &[u8], config: &DecodeConfig) -> Result<Record> {
    match decode_record(buf, config) {
        Ok(record) => {
            Metrics::record_decode(buf.len());
            trace!(
                key_len = record.key().len(),
                value_len = record.value().len(),
                "decoded record"
            );
            Ok(record)
        }
        Err(err) => {
            Metrics::record_failure(err.kind());
            debug!(kind = %err.kind(), len = buf.len(), error = %err, "record decode failed");
            Err(err)
        }
    }
}

fn decode_record(buf: &[u8], config: &DecodeConfig) -> Result<Record> {
    let layout = RecordLayout::parse(buf)?;

    if layout.wire_len() > config.max_record_len {
        return Err(Error::RecordTooLarge {
            size: layout.wire_len(),
            max: config.max_record_len,
        });
    }

    let calculated = checksum(&buf[layout.checksummed_range()]);
    let stored = layout.stored_checksum();
    if calculated != stored {
        return Err(Error::ChecksumMismatch {
            expected: calculated,
            found: stored,
        });
    }

    Ok(Record::new(
        Bytes::copy_from_slice(&buf[layout.key_range()]),
        Bytes::copy_from_slice(&buf[layout.value_range()]),
    ))
}

/// Whether `buf` is exactly one intact record.
///
/// Performs the same checks as [`decode`] without copying the key and value
/// out and without touching the codec counters.
#[must_use]
pub fn is_valid(buf: &[u8]) -> bool {
    RecordLayout::parse(buf).is_ok_and(|layout| {
        verify_checksum(&buf[layout.checksummed_range()], layout.stored_checksum())
    })
}
