use crate::types::*;
use bytes::{Buf, Bytes};

/// A type that can be read from RLP.
pub trait Decodable: Sized {
    /// Decodes one item from the front of `buf`, advancing it past the item.
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError>;
}

/// Errors produced while decoding RLP.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// Length prefix with a leading zero byte.
    LeadingZero,
    /// Declared length exceeds the remaining input.
    InputTooShort,
    /// A single byte below `0x80` wrapped in a string header.
    NonCanonicalSingleByte,
    /// Long-form header used for a payload shorter than 56 bytes.
    NonCanonicalSize,
    /// Found a string where a list was expected.
    UnexpectedString,
    /// Found a list where a string was expected.
    UnexpectedList,
    /// Input continues after the top-level item.
    TrailingBytes {
        /// Number of bytes left over.
        remaining: usize,
    },
    /// Lists are nested deeper than the decoder accepts.
    TooDeep {
        /// Maximum number of nested lists.
        limit: usize,
    },
    /// Any other failure.
    Custom(&'static str),
}

impl std::error::Error for DecodeError {}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LeadingZero => write!(f, "leading zero"),
            Self::InputTooShort => write!(f, "input too short"),
            Self::NonCanonicalSingleByte => write!(f, "non-canonical single byte"),
            Self::NonCanonicalSize => write!(f, "non-canonical size"),
            Self::UnexpectedString => write!(f, "unexpected string"),
            Self::UnexpectedList => write!(f, "unexpected list"),
            Self::TrailingBytes { remaining } => write!(f, "{remaining} trailing bytes"),
            Self::TooDeep { limit } => write!(f, "lists nested deeper than {limit} levels"),
            Self::Custom(err) => write!(f, "{err}"),
        }
    }
}

impl Header {
    /// Returns the decoded header.
    ///
    /// Returns an error if the given `buf`'s len is less than the expected payload.
    pub fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        if !buf.has_remaining() {
            return Err(DecodeError::InputTooShort)
        }

        let b = buf[0];
        let h: Self = {
            if b < 0x80 {
                Self { list: false, payload_length: 1 }
            } else if b < 0xB8 {
                buf.advance(1);
                let h = Self { list: false, payload_length: b as usize - 0x80 };

                if h.payload_length == 1 {
                    if !buf.has_remaining() {
                        return Err(DecodeError::InputTooShort)
                    }
                    if buf[0] < 0x80 {
                        return Err(DecodeError::NonCanonicalSingleByte)
                    }
                }

                h
            } else if b < 0xC0 {
                buf.advance(1);
                let payload_length = decode_long_length(buf, b as usize - 0xB7)?;
                Self { list: false, payload_length }
            } else if b < 0xF8 {
                buf.advance(1);
                Self { list: true, payload_length: b as usize - 0xC0 }
            } else {
                buf.advance(1);
                let payload_length = decode_long_length(buf, b as usize - 0xF7)?;
                Self { list: true, payload_length }
            }
        };

        if buf.remaining() < h.payload_length {
            return Err(DecodeError::InputTooShort)
        }

        Ok(h)
    }
}

/// Reads a big-endian payload length of `len_of_len` bytes.
fn decode_long_length(buf: &mut &[u8], len_of_len: usize) -> Result<usize, DecodeError> {
    if buf.len() < len_of_len {
        return Err(DecodeError::InputTooShort)
    }
    let payload_length = usize::try_from(u64::from_be_bytes(
        static_left_pad(&buf[..len_of_len]).ok_or(DecodeError::LeadingZero)?,
    ))
    .map_err(|_| DecodeError::Custom("Input too big"))?;
    buf.advance(len_of_len);
    if payload_length < SHORT_PAYLOAD_LIMIT {
        return Err(DecodeError::NonCanonicalSize)
    }
    Ok(payload_length)
}

fn static_left_pad<const LEN: usize>(data: &[u8]) -> Option<[u8; LEN]> {
    if data.len() > LEN {
        return None
    }

    let mut v = [0; LEN];

    if data.is_empty() {
        return Some(v)
    }

    if data[0] == 0 {
        return None
    }

    v[LEN - data.len()..].copy_from_slice(data);
    Some(v)
}

impl Decodable for Bytes {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let h = Header::decode(buf)?;
        if h.list {
            return Err(DecodeError::UnexpectedList)
        }
        let bytes = Self::copy_from_slice(&buf[..h.payload_length]);
        buf.advance(h.payload_length);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn check_decode<'a, IT>(fixtures: IT)
    where
        IT: IntoIterator<Item = (Result<Bytes, DecodeError>, &'a [u8])>,
    {
        for (expected, mut input) in fixtures {
            assert_eq!(Bytes::decode(&mut input), expected);
            if expected.is_ok() {
                assert_eq!(input, &[]);
            }
        }
    }

    #[test]
    fn rlp_strings() {
        check_decode(vec![
            (Ok(Bytes::from_static(&[0x00])), &hex!("00")[..]),
            (Ok(Bytes::new()), &hex!("80")[..]),
            (Ok(Bytes::from_static(&[0x80])), &hex!("8180")[..]),
            (Ok(Bytes::from_static(b"obcdefghijklm")), &hex!("8D6F62636465666768696A6B6C6D")[..]),
            (Err(DecodeError::UnexpectedList), &hex!("C0")[..]),
            (Err(DecodeError::InputTooShort), &hex!("8BFFFFFFFFFFFFFFFFFF7C")[..]),
        ])
    }

    #[test]
    fn rlp_non_canonical_strings() {
        check_decode(vec![
            (Err(DecodeError::NonCanonicalSingleByte), &hex!("8105")[..]),
            (Err(DecodeError::NonCanonicalSize), &hex!("B8020004")[..]),
            (Err(DecodeError::InputTooShort), &hex!("81")[..]),
        ])
    }

    #[test]
    fn rlp_long_header_leading_zero() {
        check_decode(vec![
            (Err(DecodeError::LeadingZero), &hex!("B90038")[..]),
            (Err(DecodeError::InputTooShort), &hex!("B838")[..]),
            (Err(DecodeError::NonCanonicalSize), &hex!("F80100")[..]),
        ])
    }

    #[test]
    fn rlp_list_header() {
        let mut input = &hex!("C3820505")[..];
        assert_eq!(Header::decode(&mut input), Ok(Header { list: true, payload_length: 3 }));
        assert_eq!(input, &hex!("820505")[..]);

        assert_eq!(Header::decode(&mut &hex!("C4820505")[..]), Err(DecodeError::InputTooShort));
        assert_eq!(Header::decode(&mut &[][..]), Err(DecodeError::InputTooShort));
    }
}
