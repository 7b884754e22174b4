//! Record format error types

use std::fmt;

use thiserror::Error;

/// Record encode/decode errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes than the leading length field
    #[error("buffer too short: need at least 4 bytes, got {got}")]
    TooShort {
        /// Bytes supplied
        got: usize,
    },

    /// Declared `total_len` disagrees with the bytes actually supplied
    #[error("length mismatch: header declares {declared} bytes, buffer holds {actual}")]
    LengthMismatch {
        /// Value of the `total_len` field
        declared: u32,
        /// Bytes following the `total_len` field
        actual: usize,
    },

    /// A length field claims more room than the record has
    #[error("malformed layout: {field} claims {claimed} bytes, {available} available")]
    MalformedLayout {
        /// Offending field
        field: &'static str,
        /// Bytes the field asks for
        claimed: usize,
        /// Bytes the record can actually spare
        available: usize,
    },

    /// Structure is intact but the content was altered
    #[error("checksum mismatch: expected {expected:#010x}, got {found:#010x}")]
    ChecksumMismatch {
        /// Checksum recomputed over the record
        expected: u32,
        /// Checksum stored in the record
        found: u32,
    },

    /// Record exceeds the 32-bit length field or a configured cap
    #[error("record too large: {size} bytes (max {max})")]
    RecordTooLarge {
        /// On-wire size of the record
        size: usize,
        /// Maximum allowed
        max: usize,
    },
}

impl Error {
    /// Failure class without the diagnostic payload
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TooShort { .. } => ErrorKind::TooShort,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::MalformedLayout { .. } => ErrorKind::MalformedLayout,
            Self::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            Self::RecordTooLarge { .. } => ErrorKind::RecordTooLarge,
        }
    }

    /// True when the bytes were structurally sound but their content changed.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }
}

/// Fieldless failure class, handy for counters and `match` arms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::TooShort`]
    TooShort,
    /// See [`Error::LengthMismatch`]
    LengthMismatch,
    /// See [`Error::MalformedLayout`]
    MalformedLayout,
    /// See [`Error::ChecksumMismatch`]
    ChecksumMismatch,
    /// See [`Error::RecordTooLarge`]
    RecordTooLarge,
}

impl ErrorKind {
    /// Stable lowercase name, used as a log field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::LengthMismatch => "length_mismatch",
            Self::MalformedLayout => "malformed_layout",
            Self::ChecksumMismatch => "checksum_mismatch",
            Self::RecordTooLarge => "record_too_large",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::TooShort { got: 3 }.kind(), ErrorKind::TooShort);
        assert_eq!(
            Error::LengthMismatch {
                declared: 99,
                actual: 14
            }
            .kind(),
            ErrorKind::LengthMismatch
        );
        assert_eq!(
            Error::ChecksumMismatch {
                expected: 1,
                found: 2
            }
            .kind(),
            ErrorKind::ChecksumMismatch
        );
    }

    #[test]
    fn test_only_checksum_is_corruption() {
        assert!(
            Error::ChecksumMismatch {
                expected: 1,
                found: 2
            }
            .is_corruption()
        );
        assert!(!Error::TooShort { got: 0 }.is_corruption());
        assert!(
            !Error::MalformedLayout {
                field: "key_len",
                claimed: 10,
                available: 2
            }
            .is_corruption()
        );
    }

    #[test]
    fn test_display_carries_context() {
        let err = Error::ChecksumMismatch {
            expected: 0xCBF4_3926,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch: expected 0xcbf43926, got 0x00000000"
        );

        let err = Error::LengthMismatch {
            declared: 99,
            actual: 14,
        };
        assert!(err.to_string().contains("99"));
        assert!(err.to_string().contains("14"));
        assert_eq!(ErrorKind::LengthMismatch.to_string(), "length_mismatch");
    }
}
