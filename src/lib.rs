//! walrec - Durable, self-describing binary record format for key/value pairs
//!
//! Each record is the atomic unit appended to a write-ahead log or any other
//! append-only store. Encoding is a pure function; decoding validates the
//! structure and a CRC-32 before handing anything back.
//!
//! # Quick Start
//!
//! ```rust
//! use walrec::Record;
//!
//! // Create a record
//! let record = Record::new("hello", "world");
//!
//! // Encode to bytes
//! let bytes = record.encode();
//! assert_eq!(bytes.len(), 16 + 5 + 5);
//!
//! // Decode from bytes
//! let decoded = Record::decode(&bytes)?;
//! assert_eq!(decoded, record);
//! # Ok::<(), walrec::Error>(())
//! ```
//!
//! # Wire Format
//!
//! ```text
//! [TOTAL_LEN (4)] [KEY_LEN (4)] [KEY] [VALUE_LEN (4)] [VALUE] [CRC-32 (4)]
//! ```
//!
//! All integers are big-endian `u32`. `TOTAL_LEN` counts every byte after
//! itself, so back-to-back records can be split with [`Frames`]. The
//! checksum covers `KEY_LEN` through `VALUE`. A record is `16` bytes plus
//! its key and value.
//!
//! # Features
//!
//! - **All-or-nothing decoding** - truncated, padded or corrupted input is an `Err`, never a panic
//! - **Compile-time CRC table** - no lazy initialization, safe to call from any thread
//! - **Built-in counters** - see [`metrics`]
//! - **`serde`** (optional) - derive support for [`Record`] and [`DecodeConfig`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]

pub mod format;

pub use format::{
    CHECKSUM_SIZE, Crc32, DecodeConfig, Error, ErrorKind, Frames, MAX_RECORD_SIZE,
    MIN_RECORD_SIZE, MetricsSnapshot, Record, RecordLayout, Result, checksum, decode, decode_with,
    encode, encode_into, frame_len, is_valid, try_encode,
};

/// Snapshot of the process-wide codec counters.
#[must_use]
pub fn metrics() -> MetricsSnapshot {
    format::metrics::Metrics::totals()
}
