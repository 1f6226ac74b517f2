//! Scalar kinds: conversion between typed values and RLP byte strings.
use crate::{error::CodecError, U256};
use bytes::Bytes;
use thor_rlp::RlpItem;

/// A value flowing through a [`Profile`](crate::profile::Profile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unsigned integer of a [`ScalarKind::Numeric`] field.
    Numeric(U256),
    /// Bytes of a blob or buffer field.
    Bytes(Bytes),
    /// Missing value of a [`ScalarKind::OptionalFixedHexBlob`] field.
    Absent,
    /// Members of a struct or items of a list.
    List(Vec<Value>),
    /// Uninterpreted RLP item of a [`Kind::Raw`](crate::profile::Kind::Raw) field.
    Raw(RlpItem),
}

impl Value {
    /// Returns the integer, or [`CodecError::UnexpectedValue`].
    pub fn into_numeric(self, context: &str) -> Result<U256, CodecError> {
        match self {
            Self::Numeric(value) => Ok(value),
            _ => Err(CodecError::unexpected_value(context)),
        }
    }

    /// Returns the bytes, or [`CodecError::UnexpectedValue`].
    pub fn into_bytes(self, context: &str) -> Result<Bytes, CodecError> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            _ => Err(CodecError::unexpected_value(context)),
        }
    }

    /// Returns the bytes of an optional field, or [`CodecError::UnexpectedValue`].
    pub fn into_optional_bytes(self, context: &str) -> Result<Option<Bytes>, CodecError> {
        match self {
            Self::Bytes(bytes) => Ok(Some(bytes)),
            Self::Absent => Ok(None),
            _ => Err(CodecError::unexpected_value(context)),
        }
    }

    /// Returns the list items, or [`CodecError::UnexpectedValue`].
    pub fn into_list(self, context: &str) -> Result<Vec<Self>, CodecError> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(CodecError::unexpected_value(context)),
        }
    }

    /// Returns the raw item, or [`CodecError::UnexpectedValue`].
    pub fn into_raw(self, context: &str) -> Result<RlpItem, CodecError> {
        match self {
            Self::Raw(item) => Ok(item),
            _ => Err(CodecError::unexpected_value(context)),
        }
    }
}

/// Narrows a decoded integer to a primitive type.
pub(crate) fn narrow<T: TryFrom<u64>>(value: U256, context: &str) -> Result<T, CodecError> {
    let overflow = || CodecError::NumericOverflow {
        context: context.to_string(),
        max_bytes: std::mem::size_of::<T>(),
        got: value.byte_len(),
    };
    if value.bit_len() > 64 {
        return Err(overflow())
    }
    T::try_from(value.as_limbs()[0]).map_err(|_| overflow())
}

/// Conversion rule between one typed value and one RLP byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Unsigned integer in minimal big-endian form of at most `max_bytes` bytes. Zero is the
    /// empty string.
    Numeric {
        /// Maximum width in bytes.
        max_bytes: usize,
    },
    /// Raw bytes of any length.
    Buffer,
    /// Variable-length bytes.
    HexBlob,
    /// Exactly `n` bytes.
    FixedHexBlob(usize),
    /// Exactly `n` bytes, or the empty string for [`Value::Absent`].
    OptionalFixedHexBlob(usize),
    /// `n` bytes stored without their leading zeros.
    CompactFixedHexBlob(usize),
}

impl ScalarKind {
    /// Converts `value` into the byte string stored on the wire.
    pub fn encode(&self, value: &Value, context: &str) -> Result<Bytes, CodecError> {
        match (self, value) {
            (Self::Numeric { max_bytes }, Value::Numeric(n)) => {
                if n.byte_len() > *max_bytes {
                    return Err(CodecError::NumericOverflow {
                        context: context.to_string(),
                        max_bytes: *max_bytes,
                        got: n.byte_len(),
                    })
                }
                Ok(n.to_be_bytes_trimmed_vec().into())
            }
            (Self::Buffer | Self::HexBlob, Value::Bytes(bytes)) => Ok(bytes.clone()),
            (Self::FixedHexBlob(len), Value::Bytes(bytes)) => {
                check_fixed_length(*len, bytes, context)?;
                Ok(bytes.clone())
            }
            (Self::OptionalFixedHexBlob(_), Value::Absent) => Ok(Bytes::new()),
            (Self::OptionalFixedHexBlob(len), Value::Bytes(bytes)) => {
                check_fixed_length(*len, bytes, context)?;
                Ok(bytes.clone())
            }
            (Self::CompactFixedHexBlob(len), Value::Bytes(bytes)) => {
                check_fixed_length(*len, bytes, context)?;
                let zeros = bytes.iter().take_while(|&&b| b == 0).count();
                Ok(bytes.slice(zeros..))
            }
            _ => Err(CodecError::unexpected_value(context)),
        }
    }

    /// Converts a byte string read from the wire into a value, enforcing canonical form.
    pub fn decode(&self, data: &Bytes, context: &str) -> Result<Value, CodecError> {
        match self {
            Self::Numeric { max_bytes } => {
                if data.len() > *max_bytes || data.first() == Some(&0) {
                    return Err(CodecError::NumericOverflow {
                        context: context.to_string(),
                        max_bytes: *max_bytes,
                        got: data.len(),
                    })
                }
                U256::try_from_be_slice(data).map(Value::Numeric).ok_or_else(|| {
                    CodecError::NumericOverflow {
                        context: context.to_string(),
                        max_bytes: *max_bytes,
                        got: data.len(),
                    }
                })
            }
            Self::Buffer | Self::HexBlob => Ok(Value::Bytes(data.clone())),
            Self::FixedHexBlob(len) => {
                check_fixed_length(*len, data, context)?;
                Ok(Value::Bytes(data.clone()))
            }
            Self::OptionalFixedHexBlob(_) if data.is_empty() => Ok(Value::Absent),
            Self::OptionalFixedHexBlob(len) => {
                check_fixed_length(*len, data, context)?;
                Ok(Value::Bytes(data.clone()))
            }
            Self::CompactFixedHexBlob(len) => {
                if data.len() > *len {
                    return Err(CodecError::InvalidFixedLength {
                        context: context.to_string(),
                        expected: *len,
                        got: data.len(),
                    })
                }
                if data.first() == Some(&0) {
                    return Err(CodecError::malformed(
                        context,
                        thor_rlp::DecodeError::LeadingZero,
                    ))
                }
                let mut padded = vec![0u8; *len];
                padded[*len - data.len()..].copy_from_slice(data);
                Ok(Value::Bytes(padded.into()))
            }
        }
    }
}

fn check_fixed_length(expected: usize, bytes: &[u8], context: &str) -> Result<(), CodecError> {
    if bytes.len() != expected {
        return Err(CodecError::InvalidFixedLength {
            context: context.to_string(),
            expected,
            got: bytes.len(),
        })
    }
    Ok(())
}
