//! Shared shape of the fixed-width byte-string types

/// Declares a `[u8; N]` newtype with hex parsing, rendering and, behind the
/// `serde` feature, string (de)serialization.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $err:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Width in bytes
            pub const LEN: usize = $len;

            /// All-zero value
            pub const ZERO: $name = $name([0u8; $len]);

            /// Wrap an owned array
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }

            /// Copy from a slice of exactly `LEN` bytes
            pub fn from_slice(slice: &[u8]) -> Result<Self, $err> {
                <[u8; $len]>::try_from(slice)
                    .map($name)
                    .map_err(|_| $err::InvalidLength(slice.len()))
            }

            /// Parse `0x`-optional hex of exactly `LEN` bytes
            pub fn from_hex(s: &str) -> Result<Self, $err> {
                let digits = $crate::strip_hex_prefix(s.trim());
                let bytes = hex::decode(digits).map_err(|e| $err::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes)
            }

            /// Borrow the underlying array
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Whether every byte is zero
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// `0x` + lower-case hex
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_hex())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                $name::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
