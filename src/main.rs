mod config;
mod csv_log;
mod error;
mod listener;
mod payload;
mod types;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    info!("Starting pzem-logger");

    // Parse command-line arguments
    let cli = config::Cli::parse();

    // Load configuration
    let config = config::load_config(&cli)?;
    info!("Configuration loaded successfully");

    // Run the listener until the session ends or the user interrupts.
    // Dropping the listener future flushes and closes the log file.
    tokio::select! {
        result = listener::run(&config) => {
            match result {
                Ok(()) => info!("Session ended"),
                Err(e) => {
                    error!("Fatal error: {:#}", e);
                    return Err(e);
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
