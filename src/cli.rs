//! CLI interface for wayfarer.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod config;
pub mod generate;
pub mod render;
pub mod sample;

pub use render::OutputFormat;

/// wayfarer: AI-assisted travel itinerary generation.
#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(about = "Generates travel itineraries with a configurable AI provider", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generates an itinerary for a destination.
    Generate(generate::GenerateCommand),
    /// Prints the built-in sample itinerary.
    Sample(sample::SampleCommand),
    /// Configuration inspection.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute().await,
            Commands::Sample(cmd) => cmd.execute(),
            Commands::Config(cmd) => cmd.execute(),
        }
    }
}
