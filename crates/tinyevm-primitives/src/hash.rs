//! 32-byte digest type

use crate::error::HashError;
use crate::word::{word_to_be_bytes, Word};

fixed_bytes!(
    /// Keccak-256 digest; KECCAK256 pushes it as a big-endian word
    H256,
    32,
    HashError
);

impl H256 {
    /// Big-endian bytes of `word`
    pub fn from_word(word: Word) -> Self {
        H256(word_to_be_bytes(word))
    }

    /// Digest read as a big-endian word
    pub fn to_word(&self) -> Word {
        Word::from_big_endian(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_is_lower_case() {
        let hash = H256::from_hex("0xC5D2460186F7233C927E7DB2DCC703C0E500B653CA82273B7BFAD8045D85A470")
            .unwrap();
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert!(format!("{:?}", hash).starts_with("H256(0xc5d2"));
    }

    #[test]
    fn test_length_is_checked() {
        assert_eq!(H256::from_hex("0xc5d2"), Err(HashError::InvalidLength(2)));
        assert_eq!(H256::from_slice(&[0u8; 33]), Err(HashError::InvalidLength(33)));
        assert!(matches!(H256::from_hex("0xgg"), Err(HashError::InvalidHex(_))));
    }

    #[test]
    fn test_word_views_agree() {
        let word = Word::from(0x1234_5678u64);
        let hash = H256::from_word(word);
        assert_eq!(&hash.as_bytes()[28..], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(hash.to_word(), word);
        assert_eq!(H256::ZERO.to_word(), Word::zero());
        assert_eq!(H256::from_bytes([0xff; 32]).to_word(), Word::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let hash = H256::from_bytes([0x22; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(serde_json::from_str::<H256>(&json).unwrap(), hash);
    }
}
