use super::util::secp256k1;
use crate::{error::CodecError, Address, H256};
use bytes::{BufMut, Bytes, BytesMut};

/// secp256k1 signature in the `r ‖ s ‖ v` wire layout, `v` being the recovery id (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    /// The R field of the signature; the point on the curve.
    pub r: H256,
    /// The S field of the signature; the point on the curve.
    pub s: H256,
    /// Parity of the Y coordinate of the R point, i.e. the recovery id.
    pub odd_y_parity: bool,
}

impl Signature {
    /// Length of an encoded signature.
    pub const LEN: usize = 65;

    /// Parses the 65-byte wire layout. The last byte must be `0` or `1`.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != Self::LEN {
            return Err(CodecError::InvalidSignatureLength { expected: Self::LEN, got: bytes.len() })
        }
        let odd_y_parity = match bytes[64] {
            0 => false,
            1 => true,
            v => {
                return Err(CodecError::InvalidSignatureRecovery(format!(
                    "invalid recovery id {v}"
                )))
            }
        };
        Ok(Self {
            r: H256::from_slice(&bytes[..32]),
            s: H256::from_slice(&bytes[32..64]),
            odd_y_parity,
        })
    }

    /// Returns the 65-byte wire layout.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(self.r.as_bytes());
        out[32..64].copy_from_slice(self.s.as_bytes());
        out[64] = self.odd_y_parity as u8;
        out
    }

    /// Recovers the address that produced this signature over `hash`.
    pub fn recover_signer(&self, hash: H256) -> Result<Address, CodecError> {
        secp256k1::recover_signer(self, hash)
            .map_err(|err| CodecError::InvalidSignatureRecovery(err.to_string()))
    }
}

/// Signature material attached to a transaction together with the recovered signers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxSignature {
    /// Signature of the origin alone. On a delegated body this is the intermediate state
    /// awaiting the gas payer.
    Origin {
        /// Origin signature over the signing hash.
        signature: Signature,
        /// Address recovered from `signature`.
        origin: Address,
    },
    /// Origin and gas payer signatures of a delegated transaction.
    Delegated {
        /// Origin signature over the signing hash.
        origin_signature: Signature,
        /// Address recovered from `origin_signature`.
        origin: Address,
        /// Gas payer signature over `hash(signing_hash ‖ origin)`.
        gas_payer_signature: Signature,
        /// Address recovered from `gas_payer_signature`.
        gas_payer: Address,
    },
}

impl TxSignature {
    /// The transaction origin.
    pub const fn origin(&self) -> Address {
        match self {
            Self::Origin { origin, .. } | Self::Delegated { origin, .. } => *origin,
        }
    }

    /// The gas payer, if the gas payer has signed.
    pub const fn gas_payer(&self) -> Option<Address> {
        match self {
            Self::Origin { .. } => None,
            Self::Delegated { gas_payer, .. } => Some(*gas_payer),
        }
    }

    /// The origin signature.
    pub const fn origin_signature(&self) -> &Signature {
        match self {
            Self::Origin { signature, .. } => signature,
            Self::Delegated { origin_signature, .. } => origin_signature,
        }
    }

    /// Length of the encoded signature bytes: 65 or 130.
    pub const fn len(&self) -> usize {
        match self {
            Self::Origin { .. } => Signature::LEN,
            Self::Delegated { .. } => 2 * Signature::LEN,
        }
    }

    /// Always `false`; kept for symmetry with [`TxSignature::len`].
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the bytes appended to a signed transaction.
    pub fn to_bytes(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.len());
        match self {
            Self::Origin { signature, .. } => out.put_slice(&signature.to_bytes()),
            Self::Delegated { origin_signature, gas_payer_signature, .. } => {
                out.put_slice(&origin_signature.to_bytes());
                out.put_slice(&gas_payer_signature.to_bytes());
            }
        }
        out.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_literal::hex;
    use assert_matches::assert_matches;

    #[test]
    fn wire_layout() {
        let bytes = hex!("27633d137c0c0fe30558f826bc8260414d01cf3c17d32e7fe4ec6bae43733d0f15ea7a2bc59b47e3695d88e12a02c9470ff7837d1e562e6a61ac5b9f649f3d7100");
        let signature = Signature::try_from_slice(&bytes).unwrap();
        assert!(!signature.odd_y_parity);
        assert_eq!(signature.r, H256::from(hex!("27633d137c0c0fe30558f826bc8260414d01cf3c17d32e7fe4ec6bae43733d0f")));
        assert_eq!(signature.to_bytes(), bytes);
    }

    #[test]
    fn recovery_id_must_be_zero_or_one() {
        let mut bytes = [0x11u8; 65];
        bytes[64] = 27;
        assert_matches!(
            Signature::try_from_slice(&bytes),
            Err(CodecError::InvalidSignatureRecovery(_))
        );
        assert_matches!(
            Signature::try_from_slice(&bytes[..64]),
            Err(CodecError::InvalidSignatureLength { expected: 65, got: 64 })
        );
    }

    #[test]
    fn unrecoverable_signature() {
        let signature = Signature { r: H256::zero(), s: H256::zero(), odd_y_parity: false };
        assert_matches!(
            signature.recover_signer(H256::repeat_byte(1)),
            Err(CodecError::InvalidSignatureRecovery(_))
        );
    }
}
