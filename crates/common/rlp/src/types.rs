/// RLP header: a list flag and the length of the payload following the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Whether the payload is a list of items.
    pub list: bool,
    /// Length of the payload in bytes.
    pub payload_length: usize,
}

/// Prefix of the empty byte string, and base offset of short string headers.
pub const EMPTY_STRING_CODE: u8 = 0x80;
/// Prefix of the empty list, and base offset of short list headers.
pub const EMPTY_LIST_CODE: u8 = 0xC0;
/// Payloads shorter than this use the single byte header form.
pub const SHORT_PAYLOAD_LIMIT: usize = 56;
