//! Configuration files.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thor_primitives::{CodecConfig, InvalidTxTypeByte, TransactionCodec};
use thor_tracing::{LayerInfo, LogFormat};

/// Errors raised while loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read, created or parsed.
    #[error(transparent)]
    File(#[from] confy::ConfyError),
    /// The codec section is inconsistent.
    #[error(transparent)]
    Codec(#[from] InvalidTxTypeByte),
}

/// Configuration for the thor tooling.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Transaction wire format.
    pub codec: CodecConfig,
    /// Logging.
    pub log: LogConfig,
}

impl Config {
    /// Loads the configuration at `path`, writing the defaults there first if the file does not
    /// exist yet. Missing keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = confy::load_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to `path`.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        Ok(confy::store_path(path, self)?)
    }

    /// Checks values that deserialize fine but can not be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(self.codec.validate()?)
    }

    /// Builds the transaction codec described by the `codec` section.
    pub fn codec(&self) -> Result<TransactionCodec, ConfigError> {
        Ok(TransactionCodec::new(self.codec)?)
    }
}

/// Logging section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Directive applied when `RUST_LOG` is unset.
    pub level: String,
    /// Comma separated extra directives, e.g. `primitives::tx=trace`.
    pub filters: String,
    /// `always`, `auto` or `never`.
    pub color: Option<String>,
}

impl LogConfig {
    /// Layer configuration for [`thor_tracing::ThorTracer`].
    pub fn layer_info(&self) -> LayerInfo {
        LayerInfo::new(self.format, self.level.clone(), self.filters.clone(), self.color.clone())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            level: "info".to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}
