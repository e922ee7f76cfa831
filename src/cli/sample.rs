//! Sample itinerary command.

use anyhow::Result;
use clap::Parser;

use super::render::{render, OutputFormat};
use crate::itinerary::sample_itinerary;

/// Prints the built-in sample itinerary without contacting a provider.
#[derive(Parser)]
pub struct SampleCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SampleCommand {
    /// Executes the sample command.
    pub fn execute(self) -> Result<()> {
        println!("{}", render(&sample_itinerary(), self.format)?);
        Ok(())
    }
}
