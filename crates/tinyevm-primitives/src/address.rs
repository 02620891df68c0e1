//! 20-byte account address as seen by the environment opcodes

use crate::error::AddressError;
use crate::word::{word_to_be_bytes, Word};

fixed_bytes!(
    /// Account address; ADDRESS, ORIGIN, CALLER and COINBASE push it left-padded
    Address,
    20,
    AddressError
);

impl Address {
    /// Keep the low 20 bytes of a word
    pub fn from_word(word: Word) -> Self {
        let bytes = word_to_be_bytes(word);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&bytes[12..]);
        Address(addr)
    }

    /// Left-pad to a 32-byte word
    pub fn to_word(&self) -> Word {
        Word::from_big_endian(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALLER: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    #[test]
    fn test_parse_forms() {
        let lower = Address::from_hex(CALLER).unwrap();
        assert_eq!(Address::from_hex(&CALLER[2..]).unwrap(), lower);
        assert_eq!(Address::from_hex(&CALLER.to_uppercase().replace("0X", "0x")).unwrap(), lower);
        assert_eq!(format!(" {} ", CALLER).parse::<Address>().unwrap(), lower);
        assert_eq!(lower.to_string(), CALLER);
        assert_eq!(format!("{:?}", lower), format!("Address({})", CALLER));
    }

    #[test]
    fn test_zero_is_default() {
        assert!(Address::default().is_zero());
        assert_eq!(Address::ZERO.to_word(), Word::zero());
        assert!(!Address::from_bytes([0x01; 20]).is_zero());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Address::from_hex("0xzz"), Err(AddressError::InvalidHex(_))));
        assert_eq!(Address::from_hex("0x"), Err(AddressError::InvalidLength(0)));
        assert_eq!(Address::from_slice(&[0u8; 32]), Err(AddressError::InvalidLength(32)));
    }

    #[test]
    fn test_to_word_left_pads() {
        let bytes = word_to_be_bytes(Address::from_bytes([0xab; 20]).to_word());
        assert_eq!(&bytes[..12], &[0u8; 12]);
        assert_eq!(&bytes[12..], &[0xab; 20]);
    }

    #[test]
    fn test_from_word_drops_high_bytes() {
        let addr = Address::from_hex("0x000000000000000000000000000000000000dEaD").unwrap();
        assert_eq!(addr.to_word(), Word::from(0xdeadu64));
        assert_eq!(Address::from_word(addr.to_word()), addr);
        assert_eq!(Address::from_word(Word::MAX), Address::from_bytes([0xff; 20]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_hex_string() {
        let addr = Address::from_hex(CALLER).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", CALLER));
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), addr);
        assert!(serde_json::from_str::<Address>("\"0x11\"").is_err());
    }
}
