use crate::{
    decode::{Decodable, DecodeError},
    encode::{encode_list, list_length, Encodable},
    types::Header,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// An owned RLP tree: either a byte string or a list of items.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RlpItem {
    /// A byte string leaf.
    Bytes(Bytes),
    /// A list of nested items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string, encoded as `0x80`.
    pub const EMPTY_BYTES: Self = Self::Bytes(Bytes::new());

    /// Maximum number of nested lists accepted by [`Decodable::decode`].
    pub const MAX_DEPTH: usize = 64;

    /// Decodes exactly one item from `buf`, rejecting any trailing bytes.
    pub fn decode_exact(mut buf: &[u8]) -> Result<Self, DecodeError> {
        let item = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(DecodeError::TrailingBytes { remaining: buf.len() })
        }
        Ok(item)
    }

    /// Returns the encoding of this item.
    pub fn encoded(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.length());
        self.encode(&mut out);
        out.freeze()
    }

    /// Returns the byte string payload, or `None` for lists.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    /// Returns the list items, or `None` for byte strings.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Consumes the item and returns the list items, or
    /// [`DecodeError::UnexpectedString`] for byte strings.
    pub fn into_list(self) -> Result<Vec<Self>, DecodeError> {
        match self {
            Self::Bytes(_) => Err(DecodeError::UnexpectedString),
            Self::List(items) => Ok(items),
        }
    }

    /// Whether this is the empty byte string.
    pub fn is_empty_bytes(&self) -> bool {
        matches!(self, Self::Bytes(bytes) if bytes.is_empty())
    }
}

impl From<Bytes> for RlpItem {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl Encodable for RlpItem {
    fn length(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.length(),
            Self::List(items) => list_length(items),
        }
    }

    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Bytes(bytes) => bytes.encode(out),
            Self::List(items) => encode_list(items, out),
        }
    }
}

impl Decodable for RlpItem {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        decode_nested(buf, 0)
    }
}

/// Decodes one item whose enclosing lists are `depth` levels deep.
fn decode_nested(buf: &mut &[u8], depth: usize) -> Result<RlpItem, DecodeError> {
    let h = Header::decode(&mut &buf[..])?;
    if !h.list {
        return Bytes::decode(buf).map(RlpItem::Bytes)
    }
    if depth == RlpItem::MAX_DEPTH {
        return Err(DecodeError::TooDeep { limit: RlpItem::MAX_DEPTH })
    }

    Header::decode(buf)?;
    let payload_view = &mut &buf[..h.payload_length];
    let mut items = Vec::new();
    while !payload_view.is_empty() {
        items.push(decode_nested(payload_view, depth + 1)?);
    }
    buf.advance(h.payload_length);

    Ok(RlpItem::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    fn bytes(b: &[u8]) -> RlpItem {
        RlpItem::Bytes(Bytes::copy_from_slice(b))
    }

    #[test]
    fn encodes_nested_lists() {
        let item = RlpItem::List(vec![
            bytes(b"cat"),
            RlpItem::List(vec![]),
            RlpItem::List(vec![bytes(&[0x00]), RlpItem::EMPTY_BYTES]),
        ]);
        assert_eq!(item.encoded()[..], hex!("c883636174c0c20080")[..]);
        assert_eq!(item.length(), 9);
        assert_eq!(RlpItem::decode_exact(&item.encoded()), Ok(item));
    }

    #[test]
    fn single_byte_below_0x80_is_its_own_encoding() {
        assert_eq!(bytes(&[0x00]).encoded()[..], hex!("00")[..]);
        assert_eq!(bytes(&[0x7f]).encoded()[..], hex!("7f")[..]);
        assert_eq!(bytes(&[0x80]).encoded()[..], hex!("8180")[..]);
        assert_eq!(RlpItem::List(vec![bytes(&[0x00])]).encoded()[..], hex!("c100")[..]);
    }

    #[test]
    fn long_list_header() {
        let item = RlpItem::List(vec![bytes(&[0xAA; 60])]);
        let encoded = item.encoded();
        assert_eq!(&encoded[..4], &hex!("f83eb83c")[..]);
        assert_eq!(RlpItem::decode_exact(&encoded), Ok(item));
    }

    #[test]
    fn rejects_non_canonical_input() {
        let fixtures: [(&[u8], DecodeError); 5] = [
            (&hex!("8105"), DecodeError::NonCanonicalSingleByte),
            (&hex!("B8020004"), DecodeError::NonCanonicalSize),
            (&hex!("C4820004"), DecodeError::InputTooShort),
            (&hex!("C28105"), DecodeError::NonCanonicalSingleByte),
            (&[], DecodeError::InputTooShort),
        ];
        for (input, expected) in fixtures {
            assert_eq!(RlpItem::decode_exact(input), Err(expected));
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_matches!(
            RlpItem::decode_exact(&hex!("c0c0")),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        );
        assert_matches!(
            RlpItem::decode_exact(&hex!("820505ff")),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        );
    }

    /// `depth` lists, each holding the next, around an empty list.
    fn nested(depth: usize) -> Vec<u8> {
        let mut headers = Vec::new();
        let mut payload_length = 1;
        for _ in 1..depth {
            let mut header = Vec::new();
            Header { list: true, payload_length }.encode(&mut header);
            payload_length += header.len();
            headers.push(header);
        }
        let mut out: Vec<u8> = headers.into_iter().rev().flatten().collect();
        out.push(crate::EMPTY_LIST_CODE);
        out
    }

    #[test]
    fn nesting_is_limited() {
        let mut item = RlpItem::List(vec![]);
        for _ in 1..RlpItem::MAX_DEPTH {
            item = RlpItem::List(vec![item]);
        }
        assert_eq!(item.encoded()[..], nested(RlpItem::MAX_DEPTH)[..]);
        assert_eq!(RlpItem::decode_exact(&nested(RlpItem::MAX_DEPTH)), Ok(item));

        assert_eq!(
            RlpItem::decode_exact(&nested(RlpItem::MAX_DEPTH + 1)),
            Err(DecodeError::TooDeep { limit: RlpItem::MAX_DEPTH })
        );
        assert_eq!(
            RlpItem::decode_exact(&nested(200_000)),
            Err(DecodeError::TooDeep { limit: RlpItem::MAX_DEPTH })
        );
    }

    #[test]
    fn list_payload_must_hold_whole_children() {
        // outer list claims two bytes but the child string needs three
        assert_matches!(
            RlpItem::decode_exact(&hex!("c2820505")),
            Err(DecodeError::InputTooShort)
        );
    }
}
