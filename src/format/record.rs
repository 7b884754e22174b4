//! Key/value record

use bytes::Bytes;

use super::Result;

/// A single key/value pair, the unit of encoding.
///
/// Owns its key and value; a decoded record never borrows from the wire
/// buffer it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    key: Bytes,
    value: Bytes,
}

impl Record {
    /// Create a new record
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get key
    #[must_use]
    pub fn key(&self) -> &Bytes {
        &self.key
    }

    /// Get value
    #[must_use]
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Split into key and value
    #[must_use]
    pub fn into_parts(self) -> (Bytes, Bytes) {
        (self.key, self.value)
    }

    /// Size of this record on the wire
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        super::encoded_len(self.key.len(), self.value.len())
    }

    /// Encode record to bytes
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        super::encode(&self.key, &self.value)
    }

    /// Decode record from bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        super::decode(bytes)
    }
}

impl<K, V> From<(K, V)> for Record
where
    K: Into<Bytes>,
    V: Into<Bytes>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
