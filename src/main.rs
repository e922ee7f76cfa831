use std::process;

use clap::Parser;
use wayfarer::{Cli, ItineraryError};

#[tokio::main]
async fn main() {
    // Logs go to stderr so itinerary output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e}");

        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }

        if let Some(err) = e.downcast_ref::<ItineraryError>() {
            eprintln!("Hint: {}", err.hint());
        }

        process::exit(1);
    }
}
