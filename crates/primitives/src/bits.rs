//! Fixed hash types
use fixed_hash::construct_fixed_hash;

/// Error returned when bytes of the wrong length are turned into a fixed-length value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} bytes, got {got}")]
pub struct FixedLengthError {
    /// Declared length of the value.
    pub expected: usize,
    /// Length of the supplied bytes.
    pub got: usize,
}

/// Error returned when parsing a fixed-length value from a hex string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseFixedHexError {
    /// The string is not valid hex.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    /// The decoded bytes have the wrong length.
    #[error(transparent)]
    Length(#[from] FixedLengthError),
}

/// Implements a fixed-length hex value with fallible slice and hex string constructors.
macro_rules! impl_fixed_hash_type {
    ($(($name:tt, $size:expr)),+) => {
        $(
            construct_fixed_hash! {
                #[doc = concat!(stringify!($name), " fixed hash type.")]
                pub struct $name($size);
            }

            impl $name {
                /// Length of the value in bytes.
                pub const LEN: usize = $size;

                /// Copies `bytes` into a new value, failing unless exactly `LEN` bytes are given.
                pub fn try_from_slice(bytes: &[u8]) -> Result<Self, FixedLengthError> {
                    if bytes.len() != $size {
                        return Err(FixedLengthError { expected: $size, got: bytes.len() })
                    }
                    Ok(Self::from_slice(bytes))
                }
            }

            impl std::str::FromStr for $name {
                type Err = ParseFixedHexError;

                /// Parses a hex string with an optional `0x` prefix.
                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
                    Ok(Self::try_from_slice(&bytes)?)
                }
            }

            impl TryFrom<&[u8]> for $name {
                type Error = FixedLengthError;

                fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                    Self::try_from_slice(bytes)
                }
            }
        )+
    };
}

impl_fixed_hash_type!((H64, 8), (H160, 20), (H256, 32));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_literal::hex;

    #[test]
    fn parse_with_and_without_prefix() {
        let expected = H160::from(hex!("7567d83b7b8d80addcb281a71d54fc7b3364ffed"));
        assert_eq!("0x7567d83b7b8d80addcb281a71d54fc7b3364ffed".parse::<H160>(), Ok(expected));
        assert_eq!("7567d83b7b8d80addcb281a71d54fc7b3364ffed".parse::<H160>(), Ok(expected));
        assert_eq!(format!("{expected:?}"), "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed");
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            "0xaabbccdd".parse::<H64>(),
            Err(ParseFixedHexError::Length(FixedLengthError { expected: 8, got: 4 }))
        );
        assert_eq!(
            H256::try_from_slice(&[0u8; 33]),
            Err(FixedLengthError { expected: 32, got: 33 })
        );
        assert!(matches!("0xzz".parse::<H64>(), Err(ParseFixedHexError::Hex(_))));
    }
}
