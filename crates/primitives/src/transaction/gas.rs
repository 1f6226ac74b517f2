//! Intrinsic gas.
use super::Clause;

/// Base cost of every transaction.
pub const TX_GAS: u64 = 5_000;
/// Cost of a clause that calls an address.
pub const CLAUSE_GAS: u64 = 16_000;
/// Cost of a clause that deploys a contract.
pub const CLAUSE_GAS_CONTRACT_CREATION: u64 = 48_000;
/// Cost of a zero data byte.
pub const ZERO_GAS_DATA: u64 = 4;
/// Cost of a non-zero data byte.
pub const NON_ZERO_GAS_DATA: u64 = 68;

/// Gas consumed before any clause executes.
///
/// A transaction without clauses is charged as if it had a single call clause.
pub fn intrinsic_gas(clauses: &[Clause]) -> u64 {
    if clauses.is_empty() {
        return TX_GAS + CLAUSE_GAS
    }
    clauses.iter().fold(TX_GAS, |gas, clause| {
        let clause_gas = if clause.is_contract_creation() {
            CLAUSE_GAS_CONTRACT_CREATION
        } else {
            CLAUSE_GAS
        };
        gas.saturating_add(clause_gas).saturating_add(data_gas(&clause.data))
    })
}

fn data_gas(data: &[u8]) -> u64 {
    data.iter().fold(0u64, |gas, &byte| {
        gas.saturating_add(if byte == 0 { ZERO_GAS_DATA } else { NON_ZERO_GAS_DATA })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hex_literal::hex, Address, U256};
    use bytes::Bytes;

    #[test]
    fn empty_clauses() {
        assert_eq!(intrinsic_gas(&[]), 21_000);
    }

    #[test]
    fn calls_and_creations() {
        let to = Address::repeat_byte(1);
        assert_eq!(intrinsic_gas(&[Clause::call(to, U256::ZERO, Bytes::new())]), 21_000);
        assert_eq!(intrinsic_gas(&[Clause::create(U256::ZERO, Bytes::new())]), 53_000);
    }

    #[test]
    fn data_bytes() {
        let data = Bytes::copy_from_slice(&hex!("000000606060"));
        let clause = Clause::call(Address::repeat_byte(1), U256::from(10_000u64), data);
        // 3 zero bytes and 3 non-zero bytes per clause
        assert_eq!(intrinsic_gas(&[clause.clone(), clause]), 5_000 + 2 * (16_000 + 12 + 204));
    }
}
