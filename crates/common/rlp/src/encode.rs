use crate::types::*;
use bytes::{BufMut, Bytes, BytesMut};

/// Strips leading zero bytes.
fn zeroless_view(v: &[u8]) -> &[u8] {
    &v[v.iter().take_while(|&&b| b == 0).count()..]
}

impl Header {
    /// Encodes the header into the `out` buffer.
    pub fn encode(&self, out: &mut dyn BufMut) {
        if self.payload_length < SHORT_PAYLOAD_LIMIT {
            let code = if self.list { EMPTY_LIST_CODE } else { EMPTY_STRING_CODE };
            out.put_u8(code + self.payload_length as u8);
        } else {
            let len_be = self.payload_length.to_be_bytes();
            let len_be = zeroless_view(&len_be);
            let code = if self.list { 0xF7 } else { 0xB7 };
            out.put_u8(code + len_be.len() as u8);
            out.put_slice(len_be);
        }
    }

    /// Returns the length of the encoded header
    pub const fn length(&self) -> usize {
        length_of_length(self.payload_length)
    }
}

/// Length of the header for a payload of `payload_length` bytes.
pub const fn length_of_length(payload_length: usize) -> usize {
    if payload_length < SHORT_PAYLOAD_LIMIT {
        1
    } else {
        1 + 8 - payload_length.leading_zeros() as usize / 8
    }
}

/// A type that can be written as RLP.
pub trait Encodable {
    /// Appends the encoding of `self` to `out`.
    fn encode(&self, out: &mut dyn BufMut);

    /// Length of the encoding in bytes.
    fn length(&self) -> usize {
        let mut out = BytesMut::new();
        self.encode(&mut out);
        out.len()
    }
}

impl Encodable for [u8] {
    fn length(&self) -> usize {
        let mut len = self.len();
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            len += length_of_length(self.len());
        }
        len
    }

    fn encode(&self, out: &mut dyn BufMut) {
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            Header { list: false, payload_length: self.len() }.encode(out);
        }
        out.put_slice(self);
    }
}

impl Encodable for Bytes {
    fn length(&self) -> usize {
        self[..].length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }
}

fn payload_length<E: Encodable>(v: &[E]) -> usize {
    v.iter().map(Encodable::length).sum()
}

/// Encoded length of a list holding `v`.
pub fn list_length<E: Encodable>(v: &[E]) -> usize {
    let payload_length = payload_length(v);
    length_of_length(payload_length) + payload_length
}

/// Encodes `v` as a list.
pub fn encode_list<E: Encodable>(v: &[E], out: &mut dyn BufMut) {
    Header { list: true, payload_length: payload_length(v) }.encode(out);
    for x in v {
        x.encode(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn encoded<T: Encodable + ?Sized>(t: &T) -> BytesMut {
        let mut out = BytesMut::new();
        t.encode(&mut out);
        assert_eq!(out.len(), t.length());
        out
    }

    #[test]
    fn rlp_strings() {
        assert_eq!(encoded(&hex!("")[..])[..], hex!("80")[..]);
        assert_eq!(encoded(&hex!("7B")[..])[..], hex!("7b")[..]);
        assert_eq!(encoded(&hex!("80")[..])[..], hex!("8180")[..]);
        assert_eq!(encoded(&hex!("ABBA")[..])[..], hex!("82abba")[..]);
        assert_eq!(encoded(&Bytes::from_static(b"test str"))[..], hex!("887465737420737472")[..]);
    }

    #[test]
    fn rlp_long_string_uses_length_of_length() {
        let payload = [0u8; 56];
        let out = encoded(&payload[..]);
        assert_eq!(&out[..2], &hex!("b838")[..]);
        assert_eq!(out.len(), 58);

        let payload = vec![0u8; 1024];
        assert_eq!(&encoded(&payload[..])[..3], &hex!("b90400")[..]);
    }

    #[test]
    fn rlp_lists() {
        let items = [Bytes::from_static(b"cat"), Bytes::from_static(b"dog")];
        let mut out = BytesMut::new();
        encode_list(&items, &mut out);
        assert_eq!(out[..], hex!("c88363617483646f67")[..]);
        assert_eq!(list_length(&items), out.len());

        let mut out = BytesMut::new();
        encode_list::<Bytes>(&[], &mut out);
        assert_eq!(out[..], hex!("c0")[..]);
    }

    #[test]
    fn header_lengths() {
        assert_eq!(length_of_length(0), 1);
        assert_eq!(length_of_length(55), 1);
        assert_eq!(length_of_length(56), 2);
        assert_eq!(length_of_length(256), 3);
        assert_eq!(Header { list: true, payload_length: 1 << 16 }.length(), 4);
    }
}
