//! Subcommands of the `thor-tx` binary.

pub mod config;
pub mod decode;
pub mod sign;

/// Parses a hex string with an optional `0x` prefix.
pub(crate) fn parse_raw(raw: &str) -> eyre::Result<Vec<u8>> {
    let raw = raw.trim();
    Ok(hex::decode(raw.strip_prefix("0x").unwrap_or(raw))?)
}
