//! Codec errors
use thor_rlp::DecodeError;
use thiserror::Error;

/// Errors raised while encoding, decoding or signing transactions.
///
/// Every failure is local and deterministic; none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input violates the canonical RLP rules.
    #[error("malformed encoding at {context}: {source}")]
    MalformedEncoding {
        /// Field path, e.g. `tx.clauses.#0.to`.
        context: String,
        /// Underlying RLP failure.
        source: DecodeError,
    },
    /// A list has a different number of items than its profile declares.
    #[error("{context}: expected {expected} items, but got {got}")]
    ProfileFieldCountMismatch {
        /// Field path of the list.
        context: String,
        /// Number of declared fields.
        expected: usize,
        /// Number of decoded items.
        got: usize,
    },
    /// A fixed-length field has the wrong number of bytes.
    #[error("{context}: expected {expected} bytes, got {got}")]
    InvalidFixedLength {
        /// Field path.
        context: String,
        /// Declared length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// The trailing signature has the wrong length for the transaction variant.
    #[error("invalid signature length: expected {expected} bytes, got {got}")]
    InvalidSignatureLength {
        /// Length required by the delegation flag.
        expected: usize,
        /// Length found.
        got: usize,
    },
    /// A numeric field is wider than its declared maximum or has a leading zero byte.
    #[error("{context}: numeric value of {got} bytes is not a canonical value of at most {max_bytes} bytes")]
    NumericOverflow {
        /// Field path.
        context: String,
        /// Declared maximum width in bytes.
        max_bytes: usize,
        /// Width of the offending value.
        got: usize,
    },
    /// No public key could be recovered from a signature.
    #[error("signature recovery failed: {0}")]
    InvalidSignatureRecovery(String),
    /// The first byte is neither the start of an RLP list nor a known type byte.
    #[error("unsupported transaction type {0:#04x}")]
    UnsupportedTxType(u8),
    /// A value does not match the kind declared for its field.
    #[error("{context}: value does not match the declared kind")]
    UnexpectedValue {
        /// Field path.
        context: String,
    },
    /// The private key is not a valid secp256k1 scalar.
    #[error("invalid private key")]
    InvalidPrivateKey,
    /// A delegation step was requested for a transaction without the delegated feature.
    #[error("transaction is not delegated")]
    NotDelegated,
    /// A single signature was requested for a delegated transaction.
    #[error("delegated transaction requires origin and gas payer signatures")]
    DelegationRequired,
    /// The gas payer tried to sign before the origin.
    #[error("origin signature is missing")]
    MissingOriginSignature,
    /// The operation needs a fully signed transaction.
    #[error("transaction is not signed")]
    NotSigned,
}

impl CodecError {
    /// Wraps an RLP failure with the field path where it happened.
    pub fn malformed(context: impl Into<String>, source: DecodeError) -> Self {
        Self::MalformedEncoding { context: context.into(), source }
    }

    /// Shorthand for [`CodecError::UnexpectedValue`].
    pub fn unexpected_value(context: impl Into<String>) -> Self {
        Self::UnexpectedValue { context: context.into() }
    }
}
