//! CardioPredict: heart-disease risk assessment client
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiopredict::adapters::sanitize::SanitizingMakeWriter;
use cardiopredict::config::ClientConfig;
use cardiopredict::tui::App;

fn main() -> Result<()> {
    // Logging must not reach the terminal while the TUI owns it.
    // - file: always log to CARDIOPREDICT_LOG_FILE
    // - stdout: always log to stdout
    // - auto (default): file when stdout is a terminal, stdout otherwise
    let log_mode = std::env::var("CARDIOPREDICT_LOG_MODE").unwrap_or_else(|_| "auto".to_string());
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        _ => std::io::stdout().is_terminal(),
    };

    let (writer, _guard) = if use_file {
        let log_file = std::env::var("CARDIOPREDICT_LOG_FILE")
            .unwrap_or_else(|_| "cardiopredict.log".to_string());
        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(service = %config.base_url, "Starting CardioPredict");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("CardioPredict shutdown complete.");
    Ok(())
}
