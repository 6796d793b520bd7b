use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// paperdeck — terminal browser for research-paper metadata CSVs.
///
/// Loads a CSV of papers (title, abstract, PDF links, optional arXiv
/// link), filters by substring match on title and abstract, shows an
/// overview table with a per-paper detail view, and exports the selected
/// paper as a Markdown snippet.
#[derive(Parser, Debug)]
#[command(name = "paperdeck", version, about)]
struct Cli {
    /// Path to the CSV source (defaults to the configured data path).
    csv: Option<PathBuf>,

    /// Base URL for resolving relative PDF links (overrides the config).
    #[arg(long)]
    base_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, silently discard logs rather than polluting the
    // alternate screen buffer.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("paperdeck");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("paperdeck.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            // Fallback: discard all logs to avoid TUI corruption.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config.
    let config = paperdeck_core::PaperdeckConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        paperdeck_core::PaperdeckConfig::default()
    });

    tracing::info!("Starting paperdeck v{}", env!("CARGO_PKG_VERSION"));

    // CLI arguments override the configured defaults.
    let source_path = cli
        .csv
        .unwrap_or_else(|| PathBuf::from(&config.data_path));
    let base_url = cli.base_url.unwrap_or(config.base_url);

    let mut app = paperdeck_tui::App::new(source_path, base_url);
    app.run().await?;

    tracing::info!("paperdeck exited cleanly");
    Ok(())
}
