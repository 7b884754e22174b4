//! CRC-32 checksum engine
//!
//! Reflected IEEE polynomial (`0xEDB88320`), initial value `0xFFFFFFFF`,
//! final XOR `0xFFFFFFFF`. The lookup table is computed at compile time, so
//! there is no first-use initialization to race on.

/// Reflected IEEE 802.3 polynomial
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

const INITIAL: u32 = 0xFFFF_FFFF;
const FINAL_XOR: u32 = 0xFFFF_FFFF;

/// Byte-indexed reduction table, one entry per possible byte value.
pub static CRC32_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 == 1 {
                POLYNOMIAL ^ (crc >> 1)
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[inline]
fn fold(mut crc: u32, data: &[u8]) -> u32 {
    for &byte in data {
        let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = CRC32_TABLE[index] ^ (crc >> 8);
    }
    crc
}

/// Compute the CRC-32 of `data` in one shot.
///
/// Total over all inputs; the empty slice checksums to `0`.
#[must_use]
pub fn checksum(data: &[u8]) -> u32 {
    fold(INITIAL, data) ^ FINAL_XOR
}

/// Check `data` against a previously stored checksum.
#[must_use]
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    checksum(data) == expected
}

/// Incremental CRC-32 over data supplied in pieces.
///
/// ```rust
/// use walrec::format::{Crc32, checksum};
///
/// let mut hasher = Crc32::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finalize(), checksum(b"hello world"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Start a fresh computation
    #[must_use]
    pub const fn new() -> Self {
        Self { state: INITIAL }
    }

    /// Feed more bytes
    pub fn update(&mut self, data: &[u8]) {
        self.state = fold(self.state, data);
    }

    /// Finish and return the checksum
    #[must_use]
    pub const fn finalize(self) -> u32 {
        self.state ^ FINAL_XOR
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_answer() {
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
        assert_eq!(checksum(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(Crc32::new().finalize(), 0);
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(CRC32_TABLE[0], 0);
        assert_eq!(CRC32_TABLE[1], 0x7707_3096);
        assert_eq!(CRC32_TABLE[128], POLYNOMIAL);
        assert_eq!(CRC32_TABLE[255], 0x2D02_EF8D);
    }

    #[test]
    fn test_checksum_deterministic() {
        let data = b"test data";
        assert_eq!(checksum(data), checksum(data));
    }

    #[test]
    fn test_checksum_differs_on_change() {
        let mut data = *b"test data";
        let before = checksum(&data);
        data[0] = b'T';
        assert_ne!(before, checksum(&data));
    }

    #[test]
    fn test_verify_checksum() {
        let data = b"payload to verify";
        let crc = checksum(data);
        assert!(verify_checksum(data, crc));
        assert!(!verify_checksum(data, crc ^ 1));
        assert!(!verify_checksum(b"other payload", crc));
    }

    #[test]
    fn test_matches_crc32fast() {
        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        assert_eq!(checksum(&data), crc32fast::hash(&data));
    }

    proptest! {
        #[test]
        fn prop_matches_reference(data in prop::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(checksum(&data), crc32fast::hash(&data));
        }

        #[test]
        fn prop_chunking_is_irrelevant(
            data in prop::collection::vec(any::<u8>(), 0..2048),
            split in any::<prop::sample::Index>(),
        ) {
            let at = split.index(data.len() + 1);
            let mut hasher = Crc32::default();
            hasher.update(&data[..at]);
            hasher.update(&data[at..]);
            prop_assert_eq!(hasher.finalize(), checksum(&data));
        }

        #[test]
        fn prop_single_bit_flip_detected(
            data in prop::collection::vec(any::<u8>(), 1..512),
            pos in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut flipped = data.clone();
            flipped[pos.index(data.len())] ^= 1 << bit;
            prop_assert_ne!(checksum(&data), checksum(&flipped));
        }
    }
}
