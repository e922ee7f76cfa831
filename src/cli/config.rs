//! Configuration-related CLI commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::ProviderConfig;
use crate::utils::Settings;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the resolved provider configuration with the API key redacted.
    Show(ShowCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let config =
            ProviderConfig::from_env().context("Failed to resolve provider configuration")?;
        let settings_path = Settings::get_settings_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "(unavailable)".to_string());

        print!("{}", describe(&config, &settings_path));
        Ok(())
    }
}

/// Formats a configuration summary for display.
fn describe(config: &ProviderConfig, settings_path: &str) -> String {
    let timeout = config
        .request_timeout()
        .map(|t| format!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());

    format!(
        "provider:        {}\n\
         model:           {}\n\
         api key:         {}\n\
         base url:        {}\n\
         failure policy:  {}\n\
         request timeout: {}\n\
         settings file:   {}\n",
        config.provider(),
        config.model(),
        config.redacted_api_key(),
        config.base_url().unwrap_or("(provider default)"),
        config.failure_policy(),
        timeout,
        settings_path,
    )
}
