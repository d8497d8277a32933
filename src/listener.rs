use crate::config::Config;
use crate::csv_log::CsvLog;
use crate::payload;
use crate::types::Reading;
use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::net::TcpStream;

/// Session lifecycle. There is no reconnect transition: once `Listening`,
/// the session only ends, by remote close (Ok) or fatal error (Err).
enum Session {
    Connecting,
    Listening(Lines<BufReader<TcpStream>>),
}

/// Drive the connect -> receive -> parse -> persist loop until the remote
/// endpoint closes the connection or a fatal error occurs.
///
/// The log file is opened (and the header written, if needed) before the
/// connection is attempted. Decode errors are scoped to their message and
/// never end the session; connection and file I/O errors are fatal and
/// propagate to the caller.
pub async fn run(config: &Config) -> Result<()> {
    let mut log_file = CsvLog::open(&config.log_path)?;

    let mut session = Session::Connecting;
    loop {
        session = match session {
            Session::Connecting => {
                info!("Connecting to {}", config.endpoint);
                let stream = TcpStream::connect(&config.endpoint)
                    .await
                    .with_context(|| format!("Failed to connect to {}", config.endpoint))?;
                info!("Connected to {}", config.endpoint);
                Session::Listening(BufReader::new(stream).lines())
            }
            Session::Listening(mut lines) => {
                match lines
                    .next_line()
                    .await
                    .context("Connection to remote endpoint lost")?
                {
                    Some(line) => {
                        handle_message(&line, &mut log_file)?;
                        Session::Listening(lines)
                    }
                    None => {
                        info!("Connection closed by remote endpoint");
                        return Ok(());
                    }
                }
            }
        };
    }
}

/// Process one inbound message: decode it and append one row. A decode
/// failure is logged and the pairs decoded before the failure still make it
/// into the row; only the write itself can fail fatally.
fn handle_message(line: &str, log_file: &mut CsvLog) -> Result<()> {
    info!("Received message: {}", line);

    let fields = match payload::parse(line) {
        Ok(fields) => fields,
        Err(e) => {
            warn!("Error processing message: {}", e);
            e.into_partial()
        }
    };

    let reading = Reading::from_fields(Local::now(), &fields);
    log_file.append(&reading)
}
