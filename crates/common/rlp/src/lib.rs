//! Canonical recursive length prefix (RLP) codec.
//!
//! The encoder always produces the shortest encoding and the decoder rejects anything else:
//! single bytes below `0x80` wrapped in a header, long-form headers for short payloads,
//! length prefixes with leading zeros, truncated input and trailing bytes.
//!
//! Byte strings implement [`Encodable`] and [`Decodable`]. [`RlpItem`] is an owned tree of byte
//! strings and lists for callers that need to inspect structure before interpreting it. List
//! nesting is capped at [`RlpItem::MAX_DEPTH`] so hostile input fails with an error.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod decode;
mod encode;
mod item;
mod types;

pub use bytes::{Buf, BufMut};

pub use decode::{Decodable, DecodeError};
pub use encode::{encode_list, length_of_length, list_length, Encodable};
pub use item::RlpItem;
pub use types::*;
