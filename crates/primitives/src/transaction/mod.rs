//! Transaction types.

use crate::{
    error::CodecError,
    kind::{narrow, Value},
    Address, BlockRef, Bytes, TxId, H256, U256,
};
use std::vec;

pub use clause::Clause;
pub use codec::TransactionCodec;
pub use error::InvalidTransactionError;
pub use gas::intrinsic_gas;
pub use key::PrivateKey;
pub use reserved::ReservedFeatures;
pub use signature::{Signature, TxSignature};
pub use tx_type::TxType;

/// Handling transaction signature operations, including signature recovery and the delegated
/// signature layout.
pub mod signature;
mod util;

mod clause;
mod codec;
mod error;
pub mod gas;
mod key;
mod reserved;
mod tx_type;

/// Signs `hash` with `key`. Nonces are deterministic, so equal inputs give equal signatures.
pub fn sign_message(key: &PrivateKey, hash: H256) -> Result<Signature, CodecError> {
    key.sign_hash(hash)
}

/// Recovers the address that signed `hash`.
pub fn recover_signer(signature: &Signature, hash: H256) -> Result<Address, CodecError> {
    signature.recover_signer(hash)
}

/// Fee fields of a transaction. The variant determines the [`TxType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxFee {
    /// Fee of a legacy transaction, a coefficient applied to the base gas price.
    Legacy {
        /// Gas price coefficient.
        gas_price_coef: u8,
    },
    /// Fee of a dynamic-fee transaction.
    DynamicFee {
        /// Max Priority fee that transaction is paying.
        max_priority_fee_per_gas: U256,
        /// Max fee per gas the sender is willing to pay.
        max_fee_per_gas: U256,
    },
}

impl TxFee {
    /// Transaction type carrying this fee.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy { .. } => TxType::Legacy,
            Self::DynamicFee { .. } => TxType::DynamicFee,
        }
    }
}

impl Default for TxFee {
    fn default() -> Self {
        Self::Legacy { gas_price_coef: 0 }
    }
}

/// The fields of a transaction that are covered by the signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TransactionBody {
    /// Last byte of the genesis block id, identifying the network.
    pub chain_tag: u8,
    /// Reference to the block the transaction was built against.
    pub block_ref: BlockRef,
    /// Number of blocks after `block_ref` during which the transaction may be included.
    pub expiration: u32,
    /// Clauses executed in order.
    pub clauses: Vec<Clause>,
    /// Fee fields.
    pub fee: TxFee,
    /// Gas limit.
    pub gas: u64,
    /// Id of a transaction that must be included first.
    pub depends_on: Option<TxId>,
    /// Nonce chosen by the sender.
    pub nonce: u64,
    /// Feature bits and uninterpreted trailing items.
    pub reserved: ReservedFeatures,
}

impl TransactionBody {
    /// Transaction type, derived from the fee variant.
    pub const fn tx_type(&self) -> TxType {
        self.fee.tx_type()
    }

    /// Whether gas is paid by a second signer.
    pub const fn is_delegated(&self) -> bool {
        self.reserved.is_delegated()
    }

    /// Gas consumed before any clause executes.
    pub fn intrinsic_gas(&self) -> u64 {
        intrinsic_gas(&self.clauses)
    }

    /// Checks the body for values that can never be included in a block.
    pub fn validate(&self) -> Result<(), InvalidTransactionError> {
        if self.clauses.is_empty() {
            return Err(InvalidTransactionError::NoClauses)
        }
        if let TxFee::DynamicFee { max_priority_fee_per_gas, max_fee_per_gas } = self.fee {
            if max_priority_fee_per_gas > max_fee_per_gas {
                return Err(InvalidTransactionError::TipAboveFeeCap)
            }
        }
        let intrinsic_gas = self.intrinsic_gas();
        if self.gas < intrinsic_gas {
            return Err(InvalidTransactionError::GasTooLow { gas: self.gas, intrinsic_gas })
        }
        Ok(())
    }

    /// Values in the field order of [`TxType::profile`].
    pub(crate) fn to_values(&self) -> Result<Vec<Value>, CodecError> {
        let mut values = Vec::with_capacity(self.tx_type().profile().len());
        values.push(Value::Numeric(U256::from(self.chain_tag)));
        values.push(Value::Bytes(Bytes::copy_from_slice(self.block_ref.as_bytes())));
        values.push(Value::Numeric(U256::from(self.expiration)));
        values.push(Value::List(self.clauses.iter().map(Clause::to_value).collect()));
        match self.fee {
            TxFee::Legacy { gas_price_coef } => {
                values.push(Value::Numeric(U256::from(gas_price_coef)));
            }
            TxFee::DynamicFee { max_priority_fee_per_gas, max_fee_per_gas } => {
                values.push(Value::Numeric(max_priority_fee_per_gas));
                values.push(Value::Numeric(max_fee_per_gas));
            }
        }
        values.push(Value::Numeric(U256::from(self.gas)));
        values.push(
            self.depends_on
                .map_or(Value::Absent, |id| Value::Bytes(Bytes::copy_from_slice(id.as_bytes()))),
        );
        values.push(Value::Numeric(U256::from(self.nonce)));
        values.push(Value::Raw(self.reserved.encode()?));
        Ok(values)
    }

    /// Inverse of [`TransactionBody::to_values`].
    pub(crate) fn from_values(tx_type: TxType, values: Vec<Value>) -> Result<Self, CodecError> {
        let profile = tx_type.profile();
        if values.len() != profile.len() {
            return Err(CodecError::ProfileFieldCountMismatch {
                context: profile.name.to_string(),
                expected: profile.len(),
                got: values.len(),
            })
        }

        let mut fields = FieldValues { root: profile.name, values: values.into_iter() };
        let chain_tag = fields.narrow("chainTag")?;
        let block_ref = fields.fixed("blockRef", BlockRef::try_from_slice)?;
        let expiration = fields.narrow("expiration")?;
        let clauses = {
            let context = fields.context("clauses");
            fields
                .next()?
                .into_list(&context)?
                .into_iter()
                .enumerate()
                .map(|(i, clause)| Clause::from_value(clause, &format!("{context}.#{i}")))
                .collect::<Result<Vec<_>, _>>()?
        };
        let fee = match tx_type {
            TxType::Legacy => TxFee::Legacy { gas_price_coef: fields.narrow("gasPriceCoef")? },
            TxType::DynamicFee => TxFee::DynamicFee {
                max_priority_fee_per_gas: fields.numeric("maxPriorityFeePerGas")?,
                max_fee_per_gas: fields.numeric("maxFeePerGas")?,
            },
        };
        let gas = fields.narrow("gas")?;
        let depends_on = {
            let context = fields.context("dependsOn");
            fields
                .next()?
                .into_optional_bytes(&context)?
                .map(|id| fixed_from_slice(&id, &context, TxId::try_from_slice))
                .transpose()?
        };
        let nonce = fields.narrow("nonce")?;
        let reserved = {
            let context = fields.context("reserved");
            ReservedFeatures::decode(&fields.next()?.into_raw(&context)?)?
        };

        Ok(Self { chain_tag, block_ref, expiration, clauses, fee, gas, depends_on, nonce, reserved })
    }
}

/// Consumes decoded profile values in field order.
struct FieldValues {
    root: &'static str,
    values: vec::IntoIter<Value>,
}

impl FieldValues {
    fn context(&self, name: &str) -> String {
        format!("{}.{name}", self.root)
    }

    fn next(&mut self) -> Result<Value, CodecError> {
        self.values.next().ok_or_else(|| CodecError::unexpected_value(self.root))
    }

    fn numeric(&mut self, name: &str) -> Result<U256, CodecError> {
        let context = self.context(name);
        self.next()?.into_numeric(&context)
    }

    fn narrow<T: TryFrom<u64>>(&mut self, name: &str) -> Result<T, CodecError> {
        let context = self.context(name);
        narrow(self.next()?.into_numeric(&context)?, &context)
    }

    fn fixed<T>(
        &mut self,
        name: &str,
        from_slice: impl FnOnce(&[u8]) -> Result<T, crate::FixedLengthError>,
    ) -> Result<T, CodecError> {
        let context = self.context(name);
        let bytes = self.next()?.into_bytes(&context)?;
        fixed_from_slice(&bytes, &context, from_slice)
    }
}

fn fixed_from_slice<T>(
    bytes: &[u8],
    context: &str,
    from_slice: impl FnOnce(&[u8]) -> Result<T, crate::FixedLengthError>,
) -> Result<T, CodecError> {
    from_slice(bytes).map_err(|err| CodecError::InvalidFixedLength {
        context: context.to_string(),
        expected: err.expected,
        got: err.got,
    })
}

/// A transaction body together with whatever signatures have been attached to it.
///
/// Transactions are values: signing returns a new transaction and leaves the original
/// untouched. The methods here use the default [`TransactionCodec`]; use a codec built from a
/// different [`CodecConfig`](crate::CodecConfig) for other deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    body: TransactionBody,
    signature: Option<TxSignature>,
}

impl Transaction {
    /// Creates an unsigned transaction.
    pub const fn new(body: TransactionBody) -> Self {
        Self { body, signature: None }
    }

    pub(crate) const fn with_signature(body: TransactionBody, signature: TxSignature) -> Self {
        Self { body, signature: Some(signature) }
    }

    /// The signed fields.
    pub const fn body(&self) -> &TransactionBody {
        &self.body
    }

    /// Consumes the transaction and returns its body, dropping any signature.
    pub fn into_body(self) -> TransactionBody {
        self.body
    }

    /// Attached signatures, if any.
    pub const fn signature(&self) -> Option<&TxSignature> {
        self.signature.as_ref()
    }

    /// Transaction type.
    pub const fn tx_type(&self) -> TxType {
        self.body.tx_type()
    }

    /// Whether gas is paid by a second signer.
    pub const fn is_delegated(&self) -> bool {
        self.body.is_delegated()
    }

    /// Whether every signature the body requires is present. A delegated transaction signed
    /// by its origin only is not signed yet.
    pub const fn is_signed(&self) -> bool {
        matches!(
            (&self.signature, self.is_delegated()),
            (Some(TxSignature::Origin { .. }), false) | (Some(TxSignature::Delegated { .. }), true)
        )
    }

    /// The origin, once the origin has signed.
    pub fn origin(&self) -> Option<Address> {
        self.signature.as_ref().map(TxSignature::origin)
    }

    /// The gas payer of a fully signed delegated transaction.
    pub fn gas_payer(&self) -> Option<Address> {
        self.signature.as_ref().and_then(TxSignature::gas_payer)
    }

    /// Gas consumed before any clause executes.
    pub fn intrinsic_gas(&self) -> u64 {
        self.body.intrinsic_gas()
    }

    /// See [`TransactionCodec::encode`].
    pub fn encode(&self, include_signature: bool) -> Result<Bytes, CodecError> {
        TransactionCodec::default().encode(self, include_signature)
    }

    /// See [`TransactionCodec::decode`].
    pub fn decode(raw: &[u8]) -> Result<Self, CodecError> {
        TransactionCodec::default().decode(raw)
    }

    /// See [`TransactionCodec::signing_hash`].
    pub fn signing_hash(&self) -> Result<H256, CodecError> {
        TransactionCodec::default().signing_hash(&self.body)
    }

    /// See [`TransactionCodec::gas_payer_signing_hash`].
    pub fn gas_payer_signing_hash(&self, origin: Address) -> Result<H256, CodecError> {
        TransactionCodec::default().gas_payer_signing_hash(&self.body, origin)
    }

    /// See [`TransactionCodec::id`].
    pub fn id(&self) -> Result<TxId, CodecError> {
        TransactionCodec::default().id(self)
    }

    /// See [`TransactionCodec::sign`].
    pub fn sign(&self, key: &PrivateKey) -> Result<Self, CodecError> {
        TransactionCodec::default().sign(self, key)
    }

    /// See [`TransactionCodec::sign_as_origin`].
    pub fn sign_as_origin(&self, key: &PrivateKey) -> Result<Self, CodecError> {
        TransactionCodec::default().sign_as_origin(self, key)
    }

    /// See [`TransactionCodec::sign_as_gas_payer`].
    pub fn sign_as_gas_payer(&self, key: &PrivateKey) -> Result<Self, CodecError> {
        TransactionCodec::default().sign_as_gas_payer(self, key)
    }

    /// See [`TransactionCodec::sign_delegated`].
    pub fn sign_delegated(
        &self,
        origin_key: &PrivateKey,
        gas_payer_key: &PrivateKey,
    ) -> Result<Self, CodecError> {
        TransactionCodec::default().sign_delegated(self, origin_key, gas_payer_key)
    }
}

impl From<TransactionBody> for Transaction {
    fn from(body: TransactionBody) -> Self {
        Self::new(body)
    }
}
