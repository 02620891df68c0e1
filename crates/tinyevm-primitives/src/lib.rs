//! # tinyevm-primitives
//!
//! Primitive types for the tinyevm interpreter.
//!
//! This crate provides the machine word, the address and digest types, and
//! the hex encodings used at the interpreter's edges.

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod fixed;

mod address;
mod error;
mod hash;
pub mod word;

pub use address::Address;
pub use error::{AddressError, HashError, PrimitiveError};
pub use hash::H256;
pub use word::{word_from_be_slice, word_to_be_bytes, word_to_hex, Word};

/// Gas type
pub type Gas = u64;

/// Decode a `0x`-optional, case-insensitive hex byte string
pub fn decode_hex_bytes(s: &str) -> Result<Vec<u8>, PrimitiveError> {
    let digits = strip_hex_prefix(s.trim());
    if digits.len() % 2 != 0 {
        return Err(PrimitiveError::OddLength(digits.len()));
    }
    Ok(hex::decode(digits)?)
}

/// Strip an optional `0x`/`0X` prefix
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
