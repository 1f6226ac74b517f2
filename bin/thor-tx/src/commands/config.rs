//! Command that prints the active configuration.
use clap::Parser;
use thor_config::Config;

/// `thor-tx config` command
#[derive(Debug, Parser)]
pub struct Command {
    /// Print the built-in defaults instead of the loaded configuration.
    #[arg(long)]
    default: bool,
}

impl Command {
    /// Execute `config` command
    pub fn execute(self, config: &Config) -> eyre::Result<()> {
        let config = if self.default { Config::default() } else { config.clone() };
        print!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }
}
