//! Command that decodes a raw transaction.
use super::parse_raw;
use clap::Parser;
use std::fmt::Write;
use thor_primitives::{Transaction, TransactionCodec, TxFee};

/// `thor-tx decode` command
#[derive(Debug, Parser)]
pub struct Command {
    /// The transaction to decode, hex encoded.
    raw: String,
}

impl Command {
    /// Execute `decode` command
    pub fn execute(self, codec: &TransactionCodec) -> eyre::Result<()> {
        let tx = codec.decode(&parse_raw(&self.raw)?)?;
        print!("{}", describe(codec, &tx)?);
        Ok(())
    }
}

/// Renders the fields, signers and hashes of `tx`, one per line.
fn describe(codec: &TransactionCodec, tx: &Transaction) -> eyre::Result<String> {
    let body = tx.body();
    let mut out = String::new();
    writeln!(out, "type:          {}", tx.tx_type())?;
    writeln!(out, "chain tag:     {:#04x}", body.chain_tag)?;
    writeln!(out, "block ref:     {:?}", body.block_ref)?;
    writeln!(out, "expiration:    {}", body.expiration)?;
    writeln!(out, "clauses:       {}", body.clauses.len())?;
    for (i, clause) in body.clauses.iter().enumerate() {
        let to = clause.to.map_or_else(|| "contract creation".to_string(), |to| format!("{to:?}"));
        writeln!(out, "  #{i}: to {to}, value {}, data 0x{}", clause.value, hex::encode(&clause.data))?;
    }
    match body.fee {
        TxFee::Legacy { gas_price_coef } => writeln!(out, "gas price coef: {gas_price_coef}")?,
        TxFee::DynamicFee { max_priority_fee_per_gas, max_fee_per_gas } => {
            writeln!(out, "max priority fee per gas: {max_priority_fee_per_gas}")?;
            writeln!(out, "max fee per gas: {max_fee_per_gas}")?;
        }
    }
    writeln!(out, "gas:           {}", body.gas)?;
    match body.depends_on {
        Some(id) => writeln!(out, "depends on:    {id:?}")?,
        None => writeln!(out, "depends on:    none")?,
    }
    writeln!(out, "nonce:         {}", body.nonce)?;
    writeln!(out, "features:      {:#x}", body.reserved.features)?;
    writeln!(out, "intrinsic gas: {}", tx.intrinsic_gas())?;
    writeln!(out, "signing hash:  {:?}", codec.signing_hash(body)?)?;
    if let Some(origin) = tx.origin() {
        writeln!(out, "origin:        {origin:?}")?;
    }
    if let Some(gas_payer) = tx.gas_payer() {
        writeln!(out, "gas payer:     {gas_payer:?}")?;
    }
    if tx.is_signed() {
        writeln!(out, "id:            {:?}", codec.id(tx)?)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_delegated_transaction() {
        let codec = TransactionCodec::default();
        let raw = parse_raw("f8b44a84aabbccdd20e0df94d3ae78222beadb038203be21ed5ce7c9b1bff602880de0b6b3a764000080808252088001c101b882a65016ac1dde5325d4aac6499989c815f7583570f520e4873390eabb6055157d1933353f10e3065d50b16c9ded764d4082d45234a473652261291bed2a45c535001a53f62fea7cd10447f4c2698cb04cac2da066ec2810dcfd9fcdf66e828f18ab58dd8819d83b9e352df81b32249f7529d8048f913cfd7acbe3f915403281232300").unwrap();
        let out = describe(&codec, &codec.decode(&raw).unwrap()).unwrap();

        assert!(out.contains("type:          legacy"));
        assert!(out.contains("chain tag:     0x4a"));
        assert!(out.contains("block ref:     0x00000000aabbccdd"));
        assert!(out.contains("value 1000000000000000000, data 0x\n"));
        assert!(out.contains("features:      0x1"));
        assert!(out.contains("origin:        0xd989829d88b0ed1b06edf5c50174ecfa64f14a64"));
        assert!(out.contains("gas payer:     0xa0dfd306598a627e8a5512647ce2b7282d1a2df5"));
        assert!(out.contains("id:            0x69607ab5b16c0af538269e379f66575be2ad0c79502ba0389b22f53290b71393"));
    }

    #[test]
    fn describes_unsigned_transaction() {
        let codec = TransactionCodec::default();
        let raw = parse_raw("0x51f83c4a84aabbccdd20e0df94d3ae78222beadb038203be21ed5ce7c9b1bff602880de0b6b3a7640000808609184e72a0008612309ce540008252088001c0").unwrap();
        let out = describe(&codec, &codec.decode(&raw).unwrap()).unwrap();

        assert!(out.contains("type:          dynamic-fee"));
        assert!(out.contains("max fee per gas: 20000000000000"));
        assert!(out.contains("signing hash:  0x9ade2659592583af09f95aafce08ffca0be71329274e798c03e0963b2b2894a5"));
        assert!(!out.contains("origin:"));
        assert!(!out.contains("id:"));
    }
}
