//! Command that signs a raw transaction.
use super::parse_raw;
use clap::Parser;
use thor_primitives::{PrivateKey, Transaction, TransactionCodec};
use tracing::info;

/// `thor-tx sign` command
#[derive(Debug, Parser)]
pub struct Command {
    /// The transaction to sign, hex encoded. Any signature it carries is replaced.
    raw: String,

    /// Private key of the origin, hex encoded.
    #[arg(long, value_name = "HEX", env = "THOR_ORIGIN_KEY", hide_env_values = true)]
    key: PrivateKey,

    /// Private key of the gas payer, required for delegated transactions.
    #[arg(long, value_name = "HEX", env = "THOR_GAS_PAYER_KEY", hide_env_values = true)]
    gas_payer_key: Option<PrivateKey>,
}

impl Command {
    /// Execute `sign` command
    pub fn execute(self, codec: &TransactionCodec) -> eyre::Result<()> {
        let signed = self.sign(codec)?;
        println!("raw: 0x{}", hex::encode(codec.encode(&signed, true)?));
        println!("id:  {:?}", codec.id(&signed)?);
        Ok(())
    }

    fn sign(&self, codec: &TransactionCodec) -> eyre::Result<Transaction> {
        let tx = Transaction::new(codec.decode(&parse_raw(&self.raw)?)?.into_body());
        let signed = match (&self.gas_payer_key, tx.is_delegated()) {
            (None, false) => codec.sign(&tx, &self.key)?,
            (Some(gas_payer_key), true) => codec.sign_delegated(&tx, &self.key, gas_payer_key)?,
            (None, true) => eyre::bail!("delegated transaction requires --gas-payer-key"),
            (Some(_), false) => {
                eyre::bail!("--gas-payer-key given for a transaction that is not delegated")
            }
        };
        info!(
            target: "thor_tx",
            origin = ?signed.origin(),
            gas_payer = ?signed.gas_payer(),
            "Signed transaction"
        );
        Ok(signed)
    }
}
