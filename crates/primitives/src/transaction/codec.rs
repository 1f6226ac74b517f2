use super::{PrivateKey, Signature, Transaction, TransactionBody, TxSignature, TxType};
use crate::{
    config::{CodecConfig, InvalidTxTypeByte, TxIdScheme},
    error::CodecError,
    kind::Value,
    profile::SIGNATURE_KIND,
    Address, TxId, H256,
};
use bytes::{BufMut, Bytes, BytesMut};
use thor_rlp::{DecodeError, Encodable, RlpItem, EMPTY_LIST_CODE};
use tracing::{debug, trace};

/// Field path of the trailing signature item.
const SIGNATURE: &str = "tx.signature";

/// Encodes, decodes, hashes and signs transactions under one [`CodecConfig`].
///
/// The codec holds no state besides its configuration and can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionCodec {
    config: CodecConfig,
}

impl TransactionCodec {
    /// Creates a codec, rejecting a dynamic-fee type byte that collides with RLP list prefixes.
    pub const fn new(config: CodecConfig) -> Result<Self, InvalidTxTypeByte> {
        if let Err(err) = config.validate() {
            return Err(err)
        }
        Ok(Self { config })
    }

    /// Codec for the Thor network, see [`CodecConfig::thor`].
    pub const fn thor() -> Self {
        Self { config: CodecConfig::thor() }
    }

    /// The active configuration.
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes `tx`, prefixed by the type byte for dynamic-fee transactions.
    ///
    /// With `include_signature` any attached signature bytes are appended as the last list
    /// item; without it the result is the unsigned body that signatures commit to.
    pub fn encode(&self, tx: &Transaction, include_signature: bool) -> Result<Bytes, CodecError> {
        let signature = if include_signature { tx.signature() } else { None };
        self.encode_parts(tx.body(), signature)
    }

    /// Encodes the unsigned body.
    pub fn encode_body(&self, body: &TransactionBody) -> Result<Bytes, CodecError> {
        self.encode_parts(body, None)
    }

    fn encode_parts(
        &self,
        body: &TransactionBody,
        signature: Option<&TxSignature>,
    ) -> Result<Bytes, CodecError> {
        let tx_type = body.tx_type();
        let mut item = tx_type.profile().encode(&body.to_values()?)?;
        if let (Some(signature), RlpItem::List(items)) = (signature, &mut item) {
            let signature = SIGNATURE_KIND.encode(&Value::Bytes(signature.to_bytes()), SIGNATURE)?;
            items.push(RlpItem::Bytes(signature));
        }

        let mut out = BytesMut::with_capacity(item.length() + 1);
        if tx_type == TxType::DynamicFee {
            out.put_u8(self.config.dynamic_fee_tx_type);
        }
        item.encode(&mut out);
        Ok(out.freeze())
    }

    /// Hash of the unsigned body. The origin signs this hash.
    pub fn signing_hash(&self, body: &TransactionBody) -> Result<H256, CodecError> {
        Ok(self.config.hash_algorithm.hash(self.encode_body(body)?))
    }

    /// Hash the gas payer of a delegated transaction signs: `hash(signing_hash ‖ origin)`.
    pub fn gas_payer_signing_hash(
        &self,
        body: &TransactionBody,
        origin: Address,
    ) -> Result<H256, CodecError> {
        Ok(self.hash_with_origin(self.signing_hash(body)?, origin))
    }

    fn hash_with_origin(&self, signing_hash: H256, origin: Address) -> H256 {
        self.config.hash_algorithm.hash_concat(&[signing_hash.as_bytes(), origin.as_bytes()])
    }

    /// Transaction id. Fails with [`CodecError::NotSigned`] unless every required signature is
    /// attached.
    pub fn id(&self, tx: &Transaction) -> Result<TxId, CodecError> {
        let origin = match tx.signature() {
            Some(signature) if tx.is_signed() => signature.origin(),
            _ => return Err(CodecError::NotSigned),
        };
        match self.config.id_scheme {
            TxIdScheme::EncodedTransaction => {
                Ok(self.config.hash_algorithm.hash(self.encode(tx, true)?))
            }
            TxIdScheme::SigningHashAndOrigin => {
                Ok(self.hash_with_origin(self.signing_hash(tx.body())?, origin))
            }
        }
    }

    /// Decodes a transaction and recovers its signers.
    ///
    /// The variant is chosen by the first byte (type byte or list prefix) and by the number of
    /// list items: one more item than the unsigned profile declares is the signature. Its
    /// length must be 65 bytes, or 130 bytes when the body is delegated.
    ///
    /// The trailing item is told apart from body fields by count and length alone, so a future
    /// trailing field of 65 or 130 bytes would be indistinguishable from a signature.
    pub fn decode(&self, raw: &[u8]) -> Result<Transaction, CodecError> {
        let (tx_type, payload) = match raw.first() {
            None => return Err(CodecError::malformed("tx", DecodeError::InputTooShort)),
            Some(&ty) if ty == self.config.dynamic_fee_tx_type => (TxType::DynamicFee, &raw[1..]),
            Some(&prefix) if prefix >= EMPTY_LIST_CODE => (TxType::Legacy, raw),
            Some(&ty) => return Err(CodecError::UnsupportedTxType(ty)),
        };

        let mut items = RlpItem::decode_exact(payload)
            .and_then(RlpItem::into_list)
            .map_err(|err| CodecError::malformed("tx", err))?;

        let profile = tx_type.profile();
        let signature = match items.len() {
            len if len == profile.len() => None,
            len if len == profile.len() + 1 => match items.pop() {
                Some(RlpItem::Bytes(signature)) => {
                    Some(SIGNATURE_KIND.decode(&signature, SIGNATURE)?.into_bytes(SIGNATURE)?)
                }
                _ => return Err(CodecError::malformed(SIGNATURE, DecodeError::UnexpectedList)),
            },
            got => {
                return Err(CodecError::ProfileFieldCountMismatch {
                    context: profile.name.to_string(),
                    expected: profile.len(),
                    got,
                })
            }
        };

        let body = TransactionBody::from_values(tx_type, profile.decode(&RlpItem::List(items))?)?;
        debug!(
            target: "primitives::tx",
            %tx_type,
            delegated = body.is_delegated(),
            signature_len = signature.as_ref().map(Bytes::len),
            "Decoded transaction"
        );

        match signature {
            None => Ok(Transaction::new(body)),
            Some(signature) => {
                let signature = self.recover(&body, &signature)?;
                Ok(Transaction::with_signature(body, signature))
            }
        }
    }

    fn recover(&self, body: &TransactionBody, raw: &[u8]) -> Result<TxSignature, CodecError> {
        let expected = if body.is_delegated() { 2 * Signature::LEN } else { Signature::LEN };
        if raw.len() != expected {
            return Err(CodecError::InvalidSignatureLength { expected, got: raw.len() })
        }

        let signing_hash = self.signing_hash(body)?;
        let (origin_raw, gas_payer_raw) = raw.split_at(Signature::LEN);
        let origin_signature = Signature::try_from_slice(origin_raw)?;
        let origin = origin_signature.recover_signer(signing_hash)?;
        trace!(target: "primitives::tx", ?origin, "Recovered origin");

        if gas_payer_raw.is_empty() {
            return Ok(TxSignature::Origin { signature: origin_signature, origin })
        }

        let gas_payer_signature = Signature::try_from_slice(gas_payer_raw)?;
        let gas_payer =
            gas_payer_signature.recover_signer(self.hash_with_origin(signing_hash, origin))?;
        trace!(target: "primitives::tx", ?gas_payer, "Recovered gas payer");

        Ok(TxSignature::Delegated { origin_signature, origin, gas_payer_signature, gas_payer })
    }

    /// Signs a non-delegated transaction, replacing any previous signature.
    pub fn sign(&self, tx: &Transaction, key: &PrivateKey) -> Result<Transaction, CodecError> {
        if tx.is_delegated() {
            return Err(CodecError::DelegationRequired)
        }
        let (signature, origin) = self.sign_origin(tx.body(), key)?;
        Ok(Transaction::with_signature(tx.body().clone(), TxSignature::Origin { signature, origin }))
    }

    /// Adds the origin signature to a delegated transaction. The result awaits the gas payer.
    pub fn sign_as_origin(
        &self,
        tx: &Transaction,
        key: &PrivateKey,
    ) -> Result<Transaction, CodecError> {
        if !tx.is_delegated() {
            return Err(CodecError::NotDelegated)
        }
        let (signature, origin) = self.sign_origin(tx.body(), key)?;
        Ok(Transaction::with_signature(tx.body().clone(), TxSignature::Origin { signature, origin }))
    }

    /// Adds the gas payer signature to a delegated transaction already signed by its origin.
    /// A previous gas payer signature is replaced.
    pub fn sign_as_gas_payer(
        &self,
        tx: &Transaction,
        key: &PrivateKey,
    ) -> Result<Transaction, CodecError> {
        if !tx.is_delegated() {
            return Err(CodecError::NotDelegated)
        }
        let signature = tx.signature().ok_or(CodecError::MissingOriginSignature)?;
        let (origin_signature, origin) = (*signature.origin_signature(), signature.origin());

        let hash = self.gas_payer_signing_hash(tx.body(), origin)?;
        let gas_payer_signature = key.sign_hash(hash)?;
        let gas_payer = key.address()?;
        debug!(target: "primitives::tx", ?origin, ?gas_payer, "Signed as gas payer");

        Ok(Transaction::with_signature(
            tx.body().clone(),
            TxSignature::Delegated { origin_signature, origin, gas_payer_signature, gas_payer },
        ))
    }

    /// Signs a delegated transaction as both origin and gas payer.
    pub fn sign_delegated(
        &self,
        tx: &Transaction,
        origin_key: &PrivateKey,
        gas_payer_key: &PrivateKey,
    ) -> Result<Transaction, CodecError> {
        let tx = self.sign_as_origin(tx, origin_key)?;
        self.sign_as_gas_payer(&tx, gas_payer_key)
    }

    fn sign_origin(
        &self,
        body: &TransactionBody,
        key: &PrivateKey,
    ) -> Result<(Signature, Address), CodecError> {
        let signature = key.sign_hash(self.signing_hash(body)?)?;
        let origin = key.address()?;
        debug!(target: "primitives::tx", ?origin, delegated = body.is_delegated(), "Signed as origin");
        Ok((signature, origin))
    }
}
