//! Parse errors for primitive types

use thiserror::Error;

/// Address parse failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Not a hex string
    #[error("address is not valid hex: {0}")]
    InvalidHex(String),
    /// Decoded to the wrong number of bytes
    #[error("address must be 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Digest parse failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// Not a hex string
    #[error("digest is not valid hex: {0}")]
    InvalidHex(String),
    /// Decoded to the wrong number of bytes
    #[error("digest must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Any primitive parse failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Address error
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Digest error
    #[error(transparent)]
    Hash(#[from] HashError),

    /// Hex byte string has an odd number of digits
    #[error("odd number of hex digits ({0})")]
    OddLength(usize),

    /// Hex byte string contains a non-hex character
    #[error("invalid hex character {character:?} at position {index}")]
    InvalidHexCharacter {
        /// Offending character
        character: char,
        /// Position in the digit string (after any prefix)
        index: usize,
    },
}

impl From<hex::FromHexError> for PrimitiveError {
    fn from(e: hex::FromHexError) -> Self {
        match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                PrimitiveError::InvalidHexCharacter { character: c, index }
            }
            // length is checked before decoding, so only OddLength can land here
            _ => PrimitiveError::OddLength(0),
        }
    }
}
