//! Process-wide codec counters.

use std::sync::atomic::{AtomicU64, Ordering};

use super::ErrorKind;

/// Track record codec metrics without external dependencies.
pub(crate) struct Metrics;

static ENCODED_RECORDS: AtomicU64 = AtomicU64::new(0);
static ENCODED_BYTES: AtomicU64 = AtomicU64::new(0);
static DECODED_RECORDS: AtomicU64 = AtomicU64::new(0);
static DECODED_BYTES: AtomicU64 = AtomicU64::new(0);

struct FailureCounters {
    too_short: AtomicU64,
    length_mismatch: AtomicU64,
    malformed_layout: AtomicU64,
    checksum_mismatch: AtomicU64,
    record_too_large: AtomicU64,
}

static FAILURES: FailureCounters = FailureCounters::new();

impl FailureCounters {
    const fn new() -> Self {
        Self {
            too_short: AtomicU64::new(0),
            length_mismatch: AtomicU64::new(0),
            malformed_layout: AtomicU64::new(0),
            checksum_mismatch: AtomicU64::new(0),
            record_too_large: AtomicU64::new(0),
        }
    }

    fn counter(&self, kind: ErrorKind) -> &AtomicU64 {
        match kind {
            ErrorKind::TooShort => &self.too_short,
            ErrorKind::LengthMismatch => &self.length_mismatch,
            ErrorKind::MalformedLayout => &self.malformed_layout,
            ErrorKind::ChecksumMismatch => &self.checksum_mismatch,
            ErrorKind::RecordTooLarge => &self.record_too_large,
        }
    }
}

impl Metrics {
    #[inline]
    pub(crate) fn record_encode(wire_len: usize) {
        ENCODED_RECORDS.fetch_add(1, Ordering::Relaxed);
        ENCODED_BYTES.fetch_add(wire_len as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_decode(wire_len: usize) {
        DECODED_RECORDS.fetch_add(1, Ordering::Relaxed);
        DECODED_BYTES.fetch_add(wire_len as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_failure(kind: ErrorKind) {
        FAILURES.counter(kind).fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn totals() -> MetricsSnapshot {
        MetricsSnapshot {
            encoded_records: ENCODED_RECORDS.load(Ordering::Relaxed),
            encoded_bytes: ENCODED_BYTES.load(Ordering::Relaxed),
            decoded_records: DECODED_RECORDS.load(Ordering::Relaxed),
            decoded_bytes: DECODED_BYTES.load(Ordering::Relaxed),
            too_short: FAILURES.too_short.load(Ordering::Relaxed),
            length_mismatch: FAILURES.length_mismatch.load(Ordering::Relaxed),
            malformed_layout: FAILURES.malformed_layout.load(Ordering::Relaxed),
            checksum_mismatch: FAILURES.checksum_mismatch.load(Ordering::Relaxed),
            record_too_large: FAILURES.record_too_large.load(Ordering::Relaxed),
        }
    }
}

/// Lightweight snapshot of codec counters.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Records produced by the encoder
    pub encoded_records: u64,
    /// Wire bytes produced by the encoder
    pub encoded_bytes: u64,
    /// Records successfully decoded
    pub decoded_records: u64,
    /// Wire bytes successfully decoded
    pub decoded_bytes: u64,
    /// Decode failures: buffer shorter than four bytes
    pub too_short: u64,
    /// Decode failures: declared length disagreed with the buffer
    pub length_mismatch: u64,
    /// Decode failures: length fields did not fit
    pub malformed_layout: u64,
    /// Decode failures: checksum did not match
    pub checksum_mismatch: u64,
    /// Rejections for exceeding a size limit
    pub record_too_large: u64,
}

impl MetricsSnapshot {
    /// Sum of all failure counters.
    #[must_use]
    pub const fn total_failures(&self) -> u64 {
        self.too_short
            + self.length_mismatch
            + self.malformed_layout
            + self.checksum_mismatch
            + self.record_too_large
    }

    /// Failure count for one class.
    #[must_use]
    pub const fn failures(&self, kind: ErrorKind) -> u64 {
        match kind {
            ErrorKind::TooShort => self.too_short,
            ErrorKind::LengthMismatch => self.length_mismatch,
            ErrorKind::MalformedLayout => self.malformed_layout,
            ErrorKind::ChecksumMismatch => self.checksum_mismatch,
            ErrorKind::RecordTooLarge => self.record_too_large,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_monotonic() {
        let before = Metrics::totals();
        Metrics::record_encode(24);
        Metrics::record_decode(24);
        Metrics::record_failure(ErrorKind::ChecksumMismatch);
        let after = Metrics::totals();

        // Other tests run concurrently, so only lower bounds hold.
        assert!(after.encoded_records > before.encoded_records);
        assert!(after.encoded_bytes >= before.encoded_bytes + 24);
        assert!(after.decoded_records > before.decoded_records);
        assert!(after.checksum_mismatch > before.checksum_mismatch);
        assert!(after.total_failures() > before.total_failures());
    }

    #[test]
    fn test_snapshot_failures_by_kind() {
        let snapshot = MetricsSnapshot {
            too_short: 1,
            length_mismatch: 2,
            malformed_layout: 3,
            checksum_mismatch: 4,
            record_too_large: 5,
            ..MetricsSnapshot::default()
        };
        assert_eq!(snapshot.total_failures(), 15);
        assert_eq!(snapshot.failures(ErrorKind::MalformedLayout), 3);
        assert_eq!(snapshot.failures(ErrorKind::RecordTooLarge), 5);
    }
}
