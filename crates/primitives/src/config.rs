//! Codec configuration.
use crate::hash::TxHashAlgorithm;
use serde::{Deserialize, Serialize};

/// Default type byte prefixed to dynamic-fee transactions.
pub const DYNAMIC_FEE_TX_TYPE_ID: u8 = 0x51;

/// Error returned when a configured type byte could be read as the start of an RLP list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("transaction type byte {0:#04x} collides with an RLP list prefix")]
pub struct InvalidTxTypeByte(pub u8);

/// How the transaction id is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxIdScheme {
    /// `hash(encode(include_signature = true))`.
    #[default]
    EncodedTransaction,
    /// `hash(signing_hash ‖ origin)`, the Thor network transaction id.
    SigningHashAndOrigin,
}

/// Parameters of the transaction wire format that differ between deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Type byte prefixed to dynamic-fee transactions. Must be below `0xc0` so it can never be
    /// mistaken for the start of an RLP list.
    pub dynamic_fee_tx_type: u8,
    /// Hash used for signing hashes and ids.
    pub hash_algorithm: TxHashAlgorithm,
    /// Derivation of the transaction id.
    pub id_scheme: TxIdScheme,
}

impl CodecConfig {
    /// Configuration matching the Thor network: blake2b-256 hashes and ids derived from the
    /// signing hash and the origin.
    pub const fn thor() -> Self {
        Self {
            dynamic_fee_tx_type: DYNAMIC_FEE_TX_TYPE_ID,
            hash_algorithm: TxHashAlgorithm::Blake2b256,
            id_scheme: TxIdScheme::SigningHashAndOrigin,
        }
    }

    /// Checks that the dynamic-fee type byte is below the RLP list prefix range.
    pub const fn validate(&self) -> Result<(), InvalidTxTypeByte> {
        if self.dynamic_fee_tx_type >= thor_rlp::EMPTY_LIST_CODE {
            return Err(InvalidTxTypeByte(self.dynamic_fee_tx_type))
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            dynamic_fee_tx_type: DYNAMIC_FEE_TX_TYPE_ID,
            hash_algorithm: TxHashAlgorithm::Keccak256,
            id_scheme: TxIdScheme::EncodedTransaction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names() {
        let json = serde_json::to_value(CodecConfig::thor()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "dynamic_fee_tx_type": 81,
                "hash_algorithm": "blake2b256",
                "id_scheme": "signing_hash_and_origin",
            })
        );

        let partial: CodecConfig =
            serde_json::from_str(r#"{ "hash_algorithm": "blake2b256" }"#).unwrap();
        assert_eq!(partial.hash_algorithm, TxHashAlgorithm::Blake2b256);
        assert_eq!(partial.id_scheme, TxIdScheme::EncodedTransaction);
        assert_eq!(partial.dynamic_fee_tx_type, DYNAMIC_FEE_TX_TYPE_ID);
    }

    #[test]
    fn type_byte_must_not_look_like_a_list() {
        assert_eq!(CodecConfig::default().validate(), Ok(()));
        let config = CodecConfig { dynamic_fee_tx_type: 0xc0, ..Default::default() };
        assert_eq!(config.validate(), Err(InvalidTxTypeByte(0xc0)));
    }
}
