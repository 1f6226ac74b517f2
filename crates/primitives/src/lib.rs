#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Thor transaction primitives.
//!
//! This crate contains the transaction model, the profile-driven codec that maps it onto RLP,
//! and the secp256k1 signer for plain and fee-delegated transactions.
//!
//! ```
//! use thor_primitives::{Transaction, TransactionBody, TransactionCodec};
//!
//! let codec = TransactionCodec::thor();
//! let tx = Transaction::new(TransactionBody::default());
//! let raw = codec.encode(&tx, false).unwrap();
//! assert_eq!(codec.decode(&raw).unwrap(), tx);
//! ```

mod bits;
pub mod config;
mod error;
mod hash;
pub mod kind;
pub mod profile;
pub mod transaction;

pub use bits::{FixedLengthError, ParseFixedHexError, H160, H256, H64};
pub use config::{CodecConfig, InvalidTxTypeByte, TxIdScheme, DYNAMIC_FEE_TX_TYPE_ID};
pub use error::CodecError;
pub use hash::{blake2b256, keccak256, TxHashAlgorithm};
pub use transaction::{
    gas::intrinsic_gas, recover_signer, sign_message, Clause, InvalidTransactionError,
    PrivateKey, ReservedFeatures, Signature, Transaction, TransactionBody, TransactionCodec,
    TxFee, TxSignature, TxType,
};

/// An account address.
pub type Address = H160;
/// Reference to a block: its number in the first four bytes, followed by id bytes.
pub type BlockRef = H64;
/// A transaction id.
pub type TxId = H256;

pub use bytes::Bytes;
pub use ruint::aliases::U256;

#[doc(hidden)]
mod __reexport {
    pub use bytes;
    pub use hex;
    pub use hex_literal;
}

// Useful reexports
pub use __reexport::*;
