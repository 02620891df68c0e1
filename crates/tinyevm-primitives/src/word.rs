//! The 256-bit machine word and its byte/hex encodings.
//!
//! Arithmetic on [`Word`] is `primitive_types::U256`; this module only adds the
//! conversions the interpreter needs at its edges (push immediates, memory
//! stores, rendering of return data).

/// 256-bit unsigned machine word
pub type Word = primitive_types::U256;

/// 512-bit intermediate used by ADDMOD/MULMOD
pub type DoubleWord = primitive_types::U512;

/// Size of a word in bytes
pub const WORD_BYTES: usize = 32;

/// Big-endian 32-byte encoding of a word
pub fn word_to_be_bytes(word: Word) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    word.to_big_endian(&mut bytes);
    bytes
}

/// Build a word from at most 32 big-endian bytes; shorter input is left-padded
pub fn word_from_be_slice(bytes: &[u8]) -> Word {
    debug_assert!(bytes.len() <= WORD_BYTES);
    Word::from_big_endian(bytes)
}

/// Render a word as `0x` followed by its minimal big-endian bytes in upper-case hex.
///
/// At least one byte is always emitted, so zero renders as `0x00`.
pub fn word_to_hex(word: Word) -> String {
    let bytes = word_to_be_bytes(word);
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(WORD_BYTES - 1);
    format!("0x{}", hex::encode_upper(&bytes[first..]))
}

/// Render an arbitrary byte string as `0x`-prefixed lower-case hex
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Low 512-bit limbs truncated back to a word
pub fn low_word(value: DoubleWord) -> Word {
    let primitive_types::U512(limbs) = value;
    primitive_types::U256([limbs[0], limbs[1], limbs[2], limbs[3]])
}

/// Convert a word to `usize` if it fits
pub fn word_to_usize(word: Word) -> Option<usize> {
    if word.bits() > usize::BITS as usize {
        return None;
    }
    usize::try_from(word.low_u64()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_to_hex_minimal_bytes() {
        assert_eq!(word_to_hex(Word::zero()), "0x00");
        assert_eq!(word_to_hex(Word::from(2u64)), "0x02");
        assert_eq!(word_to_hex(Word::from(0xAAu64)), "0xAA");
        assert_eq!(word_to_hex(Word::from(0x100u64)), "0x0100");
    }

    #[test]
    fn test_word_to_hex_full_width() {
        assert_eq!(word_to_hex(Word::MAX), format!("0x{}", "F".repeat(64)));
        let low_cleared = !Word::from(0xFFu64);
        assert_eq!(word_to_hex(low_cleared), format!("0x{}00", "F".repeat(62)));
    }

    #[test]
    fn test_word_from_be_slice_left_pads() {
        assert_eq!(word_from_be_slice(&[0x12, 0x34]), Word::from(0x1234u64));
        assert_eq!(word_from_be_slice(&[]), Word::zero());
        assert_eq!(word_from_be_slice(&[0xff; 32]), Word::MAX);
    }

    #[test]
    fn test_word_be_bytes_layout() {
        let bytes = word_to_be_bytes(Word::from(1u64));
        assert_eq!(bytes[31], 1);
        assert!(bytes[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_low_word_truncates() {
        let wide = DoubleWord::from(Word::MAX) + DoubleWord::from(2u64);
        assert_eq!(low_word(wide), Word::one());

        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let square = DoubleWord::from(Word::MAX) * DoubleWord::from(Word::MAX);
        assert_eq!(low_word(square), Word::one());
    }

    #[test]
    fn test_word_to_usize() {
        assert_eq!(word_to_usize(Word::from(42u64)), Some(42));
        assert_eq!(word_to_usize(Word::MAX), None);
        assert_eq!(word_to_usize(Word::one() << 64), None);
    }

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[]), "0x");
        assert_eq!(bytes_to_hex(&[0xde, 0xad]), "0xdead");
    }
}
