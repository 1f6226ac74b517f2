//! CLI definition and entrypoint to executable
use crate::commands::{config, decode, sign};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use thor_config::Config;
use thor_tracing::{tracing::Level, LogFormat, ThorTracer, Tracer};

/// Parse CLI options, set up logging and run the chosen command.
pub fn run() -> eyre::Result<()> {
    Cli::parse().run()
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a raw transaction and print its fields, signers and id
    #[command(name = "decode")]
    Decode(decode::Command),
    /// Sign a raw transaction and print the signed encoding
    #[command(name = "sign")]
    Sign(sign::Command),
    /// Print the active configuration as TOML
    #[command(name = "config")]
    Config(config::Command),
}

/// The main thor-tx cli interface.
#[derive(Debug, Parser)]
#[command(author, version, about = "Thor transaction tool", long_about = None)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    command: Commands,

    /// The path to the configuration file. It is created with default values if it does not
    /// exist.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    logs: Logs,

    #[command(flatten)]
    verbosity: Verbosity,
}

impl Cli {
    /// Loads the configuration, installs the logger and executes the command.
    pub fn run(self) -> eyre::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.tracer(&config).init()?;

        let codec = config.codec()?;
        match self.command {
            Commands::Decode(command) => command.execute(&codec),
            Commands::Sign(command) => command.execute(&codec),
            Commands::Config(command) => command.execute(&config),
        }
    }

    /// Logging from the configuration file, with the command line flags taking precedence.
    fn tracer(&self, config: &Config) -> ThorTracer {
        let mut log = config.log.clone();
        if let Some(format) = self.logs.format {
            log.format = format;
        }
        if let Some(level) = self.verbosity.directive() {
            log.level = level;
        }
        ThorTracer::new().with_stdout(log.layer_info())
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Logging")]
struct Logs {
    /// The format to use for logs written to stdout. Overrides the configuration file.
    #[arg(long = "log.format", value_name = "FORMAT", global = true)]
    format: Option<LogFormat>,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Display")]
struct Verbosity {
    /// Set the minimum log level. Without it the level from the configuration file applies.
    ///
    /// -v      Errors
    /// -vv     Warnings
    /// -vvv    Info
    /// -vvvv   Debug
    /// -vvvvv  Traces (warning: very verbose!)
    #[arg(short, long, action = ArgAction::Count, global = true, verbatim_doc_comment)]
    verbosity: u8,

    /// Silence all log output.
    #[arg(long, alias = "silent", short = 'q', global = true)]
    quiet: bool,
}

impl Verbosity {
    /// Directive for the requested verbosity, or `None` if no level was requested.
    fn directive(&self) -> Option<String> {
        if self.quiet {
            return Some("off".to_string())
        }
        let level = match self.verbosity {
            0 => return None,
            1 => Level::ERROR,
            2 => Level::WARN,
            3 => Level::INFO,
            4 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Some(level.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_verbosity() {
        let cli = Cli::try_parse_from(["thor-tx", "-vvvv", "config"]).unwrap();
        assert_eq!(cli.verbosity.directive().as_deref(), Some("DEBUG"));

        let cli = Cli::try_parse_from(["thor-tx", "config", "-q"]).unwrap();
        assert_eq!(cli.verbosity.directive().as_deref(), Some("off"));

        let cli = Cli::try_parse_from(["thor-tx", "config"]).unwrap();
        assert_eq!(cli.verbosity.directive(), None);
    }

    #[test]
    fn parse_log_format() {
        let cli = Cli::try_parse_from(["thor-tx", "config", "--log.format", "json"]).unwrap();
        assert_eq!(cli.logs.format, Some(LogFormat::Json));
    }

    #[test]
    fn flags_override_log_config() {
        let cli =
            Cli::try_parse_from(["thor-tx", "-vvvv", "--log.format", "json", "config"]).unwrap();
        let tracer = format!("{:?}", cli.tracer(&Config::default()));
        assert!(tracer.contains("format: Json"));
        assert!(tracer.contains("default_directive: \"DEBUG\""));

        let cli = Cli::try_parse_from(["thor-tx", "config"]).unwrap();
        let tracer = format!("{:?}", cli.tracer(&Config::default()));
        assert!(tracer.contains("format: Terminal"));
        assert!(tracer.contains("default_directive: \"info\""));
    }

    #[test]
    fn missing_config_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thor.toml");
        let cli = Cli::try_parse_from([
            "thor-tx",
            "-q",
            "--config",
            path.to_str().unwrap(),
            "config",
        ])
        .unwrap();
        cli.run().unwrap();
        assert!(path.exists());
    }
}
