use crate::profile::{Profile, DYNAMIC_FEE_TX_PROFILE, LEGACY_TX_PROFILE};
use std::fmt;

/// Transaction Type
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TxType {
    /// Untyped transaction paying a gas price coefficient.
    #[default]
    Legacy,
    /// Typed transaction carrying a priority fee and a fee cap.
    DynamicFee,
}

impl TxType {
    /// Profile describing the unsigned body of this type.
    pub const fn profile(&self) -> &'static Profile {
        match self {
            Self::Legacy => &LEGACY_TX_PROFILE,
            Self::DynamicFee => &DYNAMIC_FEE_TX_PROFILE,
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::DynamicFee => f.write_str("dynamic-fee"),
        }
    }
}
