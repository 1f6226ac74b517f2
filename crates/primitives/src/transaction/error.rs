/// Represents error variants that can happen when trying to validate a
/// [TransactionBody](crate::TransactionBody)
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidTransactionError {
    /// The transaction has no clauses.
    #[error("Transaction has no clauses.")]
    NoClauses,
    /// Thrown to ensure no one is able to specify a transaction with a tip higher than the total
    /// fee cap.
    #[error("Max priority fee per gas higher than max fee per gas")]
    TipAboveFeeCap,
    /// The transaction is specified to use less gas than required to start the
    /// invocation.
    #[error("Intrinsic gas too low: gas {gas}, intrinsic gas {intrinsic_gas}")]
    GasTooLow {
        /// Gas limit of the transaction.
        gas: u64,
        /// Gas required before any clause executes.
        intrinsic_gas: u64,
    },
}
