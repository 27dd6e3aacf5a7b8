//! SymbolBridge CLI
//!
//! Loads, saves, or serves the symbol list from a file-backed store.

use std::io;

use clap::{Parser, Subcommand};
use symbolbridge::config::{DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY};
use symbolbridge::host::PortHost;
use symbolbridge::store::FileStore;
use symbolbridge::{BridgeError, Config, Result, StorageBridge, SymbolList};
use tracing_subscriber::{fmt, EnvFilter};

/// SymbolBridge
#[derive(Parser, Debug)]
#[command(name = "symbolbridge")]
#[command(about = "Persist a front-end symbol list in a local key-value store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Storage key for the symbol list
    #[arg(short, long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// fsync every write
    #[arg(long)]
    sync: bool,

    /// Reject saves that take the data directory past this many bytes
    #[arg(long)]
    quota_bytes: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the saved list as one JSON line (nothing if absent)
    Load,

    /// Replace the saved list
    Save {
        /// Symbols to save, in order
        symbols: Vec<String>,
    },

    /// Answer port messages from stdin on stdout
    Serve,
}

fn main() {
    // Logs go to stderr; stdout carries port responses
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,symbolbridge=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("SymbolBridge v{}", symbolbridge::VERSION);
    tracing::debug!("Data directory: {}", args.data_dir);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut builder = Config::builder()
        .data_dir(&args.data_dir)
        .storage_key(&args.key)
        .sync_on_write(args.sync);
    if let Some(quota) = args.quota_bytes {
        builder = builder.quota_bytes(quota);
    }
    let config = builder.build();
    config.validate()?;

    let store = FileStore::from_config(&config)?;
    let bridge = StorageBridge::from_config(store, &config)?;

    match args.command {
        Commands::Load => {
            if let Some(symbols) = bridge.handle_load_request() {
                let json = serde_json::to_string(&symbols)
                    .map_err(|e| BridgeError::Serialization(e.to_string()))?;
                println!("{}", json);
            }
        }
        Commands::Save { symbols } => {
            let list = SymbolList::from_symbols(symbols);
            bridge.handle_save_request(&list)?;
            tracing::info!("Saved {} symbols", list.len());
        }
        Commands::Serve => {
            tracing::info!("Serving port messages on stdin/stdout");
            let host = PortHost::new(bridge);
            host.serve(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
