//! Splitting a stream of back-to-back records
//!
//! Each record starts with its own `total_len`, so a byte stream of
//! concatenated records can be walked without any outer index.

use std::iter::FusedIterator;

use tracing::debug;

use super::metrics::Metrics;
use super::{DecodeConfig, Error, LENGTH_FIELD_SIZE, Record, Result, decode_with};

/// Wire size of the record at the front of `buf`, read from its length prefix.
///
/// Returns `None` when fewer than four bytes are available. Nothing past the
/// prefix is validated.
#[must_use]
pub fn frame_len(buf: &[u8]) -> Option<usize> {
    let prefix = <[u8; 4]>::try_from(buf.get(..LENGTH_FIELD_SIZE)?).ok()?;
    (u32::from_be_bytes(prefix) as usize).checked_add(LENGTH_FIELD_SIZE)
}

/// Iterator over the records in a buffer of back-to-back wire buffers.
///
/// Yields each record in order. A torn tail or a corrupt record is yielded
/// once as an error, after which the iterator is exhausted;
/// [`offset`](Self::offset) then points at the start of the bad frame.
///
/// ```rust
/// use bytes::BytesMut;
/// use walrec::format::{Frames, encode_into};
///
/// let mut log = BytesMut::new();
/// encode_into(b"a", b"1", &mut log);
/// encode_into(b"b", b"2", &mut log);
///
/// let keys: Vec<_> = Frames::new(&log)
///     .map(|record| record.map(|r| r.key().clone()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(keys, [&b"a"[..], &b"b"[..]]);
/// # Ok::<(), walrec::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    buf: &'a [u8],
    offset: usize,
    config: DecodeConfig,
    done: bool,
}

impl<'a> Frames<'a> {
    /// Walk `buf` with default limits.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_config(buf, DecodeConfig::default())
    }

    /// Walk `buf`, decoding every record with `config`.
    #[must_use]
    pub fn with_config(buf: &'a [u8], config: DecodeConfig) -> Self {
        Self {
            buf,
            offset: 0,
            config,
            done: false,
        }
    }

    /// Byte offset of the next frame to be read.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    fn fail(&mut self, err: Error) -> Option<Result<Record>> {
        self.done = true;
        debug!(offset = self.offset, kind = %err.kind(), error = %err, "stopping at bad frame");
        Some(Err(err))
    }

    fn next_frame(&self, rest: &[u8]) -> Result<usize> {
        let Some(len) = frame_len(rest) else {
            return Err(Error::TooShort { got: rest.len() });
        };

        if len > self.config.max_record_len {
            return Err(Error::RecordTooLarge {
                size: len,
                max: self.config.max_record_len,
            });
        }

        if len > rest.len() {
            return Err(Error::LengthMismatch {
                declared: (len - LENGTH_FIELD_SIZE) as u32,
                actual: rest.len() - LENGTH_FIELD_SIZE,
            });
        }

        Ok(len)
    }
}

impl Iterator for Frames<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.buf.len() {
            return None;
        }

        let rest = self.remaining();
        let len = match self.next_frame(rest) {
            Ok(len) => len,
            Err(err) => {
                Metrics::record_failure(err.kind());
                return self.fail(err);
            }
        };

        match decode_with(&rest[..len], &self.config) {
            Ok(record) => {
                self.offset += len;
                Some(Ok(record))
            }
            Err(err) => self.fail(err),
        }
    }
}

impl FusedIterator for Frames<'_> {}
