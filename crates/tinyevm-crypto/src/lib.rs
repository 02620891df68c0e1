//! # tinyevm-crypto
//!
//! Cryptographic primitives for tinyevm.
//!
//! - Keccak-256 hashing (the legacy Ethereum padding, not FIPS SHA3-256)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::{keccak256, EMPTY_KECCAK};
