//! Unsigned bodies survive an encode/decode cycle under every configuration.

use proptest::prelude::*;
use thor_primitives::{
    Address, Bytes, Clause, CodecConfig, ReservedFeatures, Transaction, TransactionBody,
    TransactionCodec, TxFee, H256, H64, U256,
};
use thor_rlp::RlpItem;

fn u256() -> impl Strategy<Value = U256> {
    any::<[u8; 32]>().prop_map(U256::from_be_bytes)
}

fn clause() -> impl Strategy<Value = Clause> {
    (
        proptest::option::of(any::<[u8; 20]>().prop_map(Address::from)),
        u256(),
        proptest::collection::vec(any::<u8>(), 0..80),
    )
        .prop_map(|(to, value, data)| Clause { to, value, data: Bytes::from(data) })
}

fn fee() -> impl Strategy<Value = TxFee> {
    prop_oneof![
        any::<u8>().prop_map(|gas_price_coef| TxFee::Legacy { gas_price_coef }),
        (u256(), u256()).prop_map(|(max_priority_fee_per_gas, max_fee_per_gas)| {
            TxFee::DynamicFee { max_priority_fee_per_gas, max_fee_per_gas }
        }),
    ]
}

fn reserved() -> impl Strategy<Value = ReservedFeatures> {
    // a trailing empty string would be trimmed away on encode, so unused items are non-empty
    (any::<u32>(), proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..8), 0..3))
        .prop_map(|(features, unused)| ReservedFeatures {
            features,
            unused: unused.into_iter().map(|item| RlpItem::Bytes(item.into())).collect(),
        })
}

fn body() -> impl Strategy<Value = TransactionBody> {
    (
        any::<u8>(),
        any::<[u8; 8]>(),
        any::<u32>(),
        proptest::collection::vec(clause(), 0..4),
        fee(),
        any::<u64>(),
        proptest::option::of(any::<[u8; 32]>()),
        any::<u64>(),
        reserved(),
    )
        .prop_map(
            |(chain_tag, block_ref, expiration, clauses, fee, gas, depends_on, nonce, reserved)| {
                TransactionBody {
                    chain_tag,
                    block_ref: H64::from(block_ref),
                    expiration,
                    clauses,
                    fee,
                    gas,
                    depends_on: depends_on.map(H256::from),
                    nonce,
                    reserved,
                }
            },
        )
}

proptest! {
    #[test]
    fn unsigned_round_trip(body in body()) {
        for codec in [TransactionCodec::default(), TransactionCodec::thor()] {
            let tx = Transaction::new(body.clone());
            let raw = codec.encode(&tx, false).unwrap();
            prop_assert_eq!(codec.decode(&raw).unwrap(), tx);
        }
    }

    #[test]
    fn custom_type_byte_round_trip(body in body(), ty in 0u8..0xc0) {
        let codec = TransactionCodec::new(CodecConfig { dynamic_fee_tx_type: ty, ..Default::default() }).unwrap();
        let tx = Transaction::new(body);
        let raw = codec.encode(&tx, false).unwrap();
        prop_assert_eq!(codec.decode(&raw).unwrap(), tx);
    }
}
