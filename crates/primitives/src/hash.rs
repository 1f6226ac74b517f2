//! Hash functions used by the transaction codec.
use crate::H256;
use blake2::{digest::consts::U32, Blake2b, Digest};
use serde::{Deserialize, Serialize};

/// Returns the keccak256 hash for the given data.
#[inline]
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    use tiny_keccak::{Hasher, Keccak};

    let mut buf = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(data.as_ref());
    hasher.finalize(&mut buf);
    buf.into()
}

/// Returns the 256-bit blake2b hash for the given data.
#[inline]
pub fn blake2b256(data: impl AsRef<[u8]>) -> H256 {
    let digest = Blake2b::<U32>::digest(data.as_ref());
    H256::from_slice(&digest)
}

/// Hash function applied to encoded transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxHashAlgorithm {
    /// Keccak-256.
    #[default]
    Keccak256,
    /// Blake2b with a 256-bit digest, as used on the Thor network.
    Blake2b256,
}

impl TxHashAlgorithm {
    /// Hashes the concatenation of `parts`.
    pub fn hash_concat(&self, parts: &[&[u8]]) -> H256 {
        match self {
            Self::Keccak256 => {
                use tiny_keccak::{Hasher, Keccak};

                let mut buf = [0u8; 32];
                let mut hasher = Keccak::v256();
                parts.iter().for_each(|part| hasher.update(part));
                hasher.finalize(&mut buf);
                buf.into()
            }
            Self::Blake2b256 => {
                let mut hasher = Blake2b::<U32>::new();
                parts.iter().for_each(|part| hasher.update(part));
                H256::from_slice(&hasher.finalize())
            }
        }
    }

    /// Hashes `data`.
    pub fn hash(&self, data: impl AsRef<[u8]>) -> H256 {
        match self {
            Self::Keccak256 => keccak256(data),
            Self::Blake2b256 => blake2b256(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_literal::hex;

    #[test]
    fn empty_input_digests() {
        assert_eq!(
            keccak256(b""),
            H256::from(hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"))
        );
        assert_eq!(
            blake2b256(b""),
            H256::from(hex!("0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"))
        );
    }

    #[test]
    fn concat_matches_single_shot() {
        for algorithm in [TxHashAlgorithm::Keccak256, TxHashAlgorithm::Blake2b256] {
            assert_eq!(
                algorithm.hash_concat(&[&b"thor"[..], &[], &b"tx"[..]]),
                algorithm.hash(b"thortx"),
            );
        }
    }
}
