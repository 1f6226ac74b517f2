//!  Logging setup for the thor tooling.
//!
//!  The entry point is [`ThorTracer`], which installs a stdout layer configured by a
//!  [`LayerInfo`]. Tests use [`TestTracer`] (or [`init_test_tracing`]) which writes to stderr
//!  and reads its filter from `RUST_LOG`.
//!
//!  # Examples
//!
//!  ```
//!  use thor_tracing::{
//!      LayerInfo, ThorTracer, Tracer,
//!      tracing::level_filters::LevelFilter,
//!      LogFormat,
//!  };
//!
//!  fn main() -> eyre::Result<()> {
//!      let tracer = ThorTracer::new().with_stdout(LayerInfo::new(
//!          LogFormat::Json,
//!          LevelFilter::INFO.to_string(),
//!          "primitives::tx=debug".to_string(),
//!          None,
//!      ));
//!
//!      tracer.init()?;
//!
//!      Ok(())
//!  }
//!  ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-export tracing crates
pub use tracing;
pub use tracing_subscriber;

// Re-export our types
pub use formatter::LogFormat;
pub use test_tracer::TestTracer;

mod formatter;
mod test_tracer;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// A boxed tracing [Layer].
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

///  Tracer for application logging.
///
///  Only a stdout layer is supported; it defaults to terminal output at `INFO`.
#[derive(Debug, Clone, Default)]
pub struct ThorTracer {
    stdout: LayerInfo,
}

impl ThorTracer {
    ///  Constructs a new `ThorTracer` with the default stdout layer.
    pub fn new() -> Self {
        Self::default()
    }

    ///  Sets a custom configuration for the stdout layer.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }
}

///  Configuration for a logging layer.
///
///  Holds the format, the default directive, extra comma separated filter directives and an
///  optional color mode (`always`, `never`, `auto`).
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    ///  Constructs a new `LayerInfo`.
    ///
    ///  # Arguments
    ///  * `format` - [`LogFormat::Json`] or [`LogFormat::Terminal`].
    ///  * `default_directive` - Directive applied when `RUST_LOG` is unset.
    ///  * `filters` - Additional directives, e.g. `primitives::tx=trace`.
    ///  * `color` - Optional color configuration for the log messages.
    pub const fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    ///  Terminal format, INFO level filter, no additional filters, colored output.
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Trait defining a general interface for logging configuration.
///
/// Implementations install a global subscriber. Installing twice is not an error; the second
/// subscriber is dropped.
pub trait Tracer {
    /// Initialize the logging configuration.
    fn init(self) -> eyre::Result<()>;
}

impl Tracer for ThorTracer {
    fn init(self) -> eyre::Result<()> {
        let filter =
            build_env_filter(self.stdout.default_directive.parse()?, &self.stdout.filters)?;
        let layer = self.stdout.format.apply(filter, self.stdout.color);

        // The error is returned if the global default subscriber is already set,
        // so it's safe to ignore it
        let _ = tracing_subscriber::registry().with(layer).try_init().inspect_err(|e| {
            tracing::warn!(%e, "Tracing subscriber could not be initialized");
        });
        Ok(())
    }
}

/// Builds an [`EnvFilter`] from `RUST_LOG`, falling back to `default_directive`, and adds the
/// comma separated `directives` on top.
fn build_env_filter(default_directive: Directive, directives: &str) -> eyre::Result<EnvFilter> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();

    directives
        .split(',')
        .filter(|directive| !directive.is_empty())
        .try_fold(env_filter, |env_filter, directive| {
            Ok(env_filter.add_directive(directive.parse()?))
        })
}

///  Initializes a tracing subscriber for tests.
///
///  The filter is configurable via `RUST_LOG`.
///
///  # Note
///
///  The subscriber will silently fail if it could not be installed.
pub fn init_test_tracing() {
    let _ = TestTracer::default().init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_accepts_extra_directives() {
        let filter =
            build_env_filter(LevelFilter::WARN.into(), "primitives::tx=trace,,thor_tx=debug")
                .unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
