use super::util::secp256k1::{public_key_to_address, sign_message};
use crate::{error::CodecError, Address, Signature, H256};
use secp256k1::{PublicKey, SecretKey, SECP256K1};
use std::{fmt, str::FromStr};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A secp256k1 private key.
///
/// The key bytes are wiped when the value is dropped. Every operation that needs the curve
/// representation builds it for the duration of the call only and erases it afterwards.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

/// Curve secret key that is erased on every exit path of the scope holding it.
struct SecretKeyGuard(SecretKey);

impl Drop for SecretKeyGuard {
    fn drop(&mut self) {
        self.0.non_secure_erase();
    }
}

impl PrivateKey {
    /// Length of a private key in bytes.
    pub const LEN: usize = 32;

    /// Creates a key from its 32 bytes, rejecting zero and values at or above the curve order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CodecError> {
        Self::from_slice(bytes)
    }

    /// Creates a key from a slice, which must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != Self::LEN {
            return Err(CodecError::InvalidPrivateKey)
        }
        // wiped on drop, also when validation fails
        let mut key = Self([0u8; 32]);
        key.0.copy_from_slice(bytes);
        key.with_secret_key(|_| ())?;
        Ok(key)
    }

    /// Returns the address controlled by this key.
    pub fn address(&self) -> Result<Address, CodecError> {
        self.with_secret_key(|secret| {
            public_key_to_address(PublicKey::from_secret_key(SECP256K1, secret))
        })
    }

    /// Signs a 32-byte hash with a deterministic (RFC 6979) nonce.
    pub fn sign_hash(&self, hash: H256) -> Result<Signature, CodecError> {
        self.with_secret_key(|secret| sign_message(secret, hash))
    }

    fn with_secret_key<T>(&self, f: impl FnOnce(&SecretKey) -> T) -> Result<T, CodecError> {
        let guard = SecretKey::from_slice(&self.0)
            .map(SecretKeyGuard)
            .map_err(|_| CodecError::InvalidPrivateKey)?;
        Ok(f(&guard.0))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl FromStr for PrivateKey {
    type Err = CodecError;

    /// Parses a hex encoded key with an optional `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = Zeroizing::new(
            hex::decode(s.strip_prefix("0x").unwrap_or(s))
                .map_err(|_| CodecError::InvalidPrivateKey)?,
        );
        Self::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_literal::hex;
    use assert_matches::assert_matches;

    #[test]
    fn derives_address() {
        let key: PrivateKey =
            "0x7582be841ca040aa940fff6c05773129e135623e41acce3e0b8ba520dc1ae26a".parse().unwrap();
        assert_eq!(
            key.address().unwrap(),
            Address::from(hex!("d989829d88b0ed1b06edf5c50174ecfa64f14a64"))
        );
    }

    #[test]
    fn rejects_invalid_keys() {
        assert_matches!(PrivateKey::from_bytes(&[0; 32]), Err(CodecError::InvalidPrivateKey));
        assert_matches!(PrivateKey::from_bytes(&[0xff; 32]), Err(CodecError::InvalidPrivateKey));
        assert_matches!(PrivateKey::from_slice(&[1; 31]), Err(CodecError::InvalidPrivateKey));
        assert_matches!("0xnothex".parse::<PrivateKey>(), Err(CodecError::InvalidPrivateKey));
    }

    #[test]
    fn slice_and_array_constructors_agree() {
        let bytes = hex!("7582be841ca040aa940fff6c05773129e135623e41acce3e0b8ba520dc1ae26a");
        let key = PrivateKey::from_bytes(&bytes).unwrap();
        assert_eq!(key.0, bytes);
        assert_eq!(PrivateKey::from_slice(&bytes).unwrap().0, bytes);
    }

    #[test]
    fn wipes_bytes() {
        let mut key = PrivateKey::from_bytes(&[7; 32]).unwrap();
        key.zeroize();
        assert_eq!(key.0, [0; 32]);
    }

    #[test]
    fn debug_is_redacted() {
        let key = PrivateKey::from_bytes(&[7; 32]).unwrap();
        assert_eq!(format!("{key:?}"), "PrivateKey(<redacted>)");
    }

    #[test]
    fn signatures_are_deterministic() {
        let key = PrivateKey::from_bytes(&[7; 32]).unwrap();
        let hash = H256::repeat_byte(0x11);
        assert_eq!(key.sign_hash(hash).unwrap(), key.sign_hash(hash).unwrap());
    }
}
