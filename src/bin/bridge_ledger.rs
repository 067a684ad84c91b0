//! Bridge Ledger CLI
//!
//! Queries the bridge indexing service and prints validated deposits or
//! merkle proofs as JSON on stdout. Logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin bridge-ledger -- --api-url http://127.0.0.1:8080 deposits 0xabc... --limit 10
//! cargo run --bin bridge-ledger -- --config config/ledger.toml deposit 0 42
//! cargo run --bin bridge-ledger -- proof 0 42
//! ```
//!
//! Ctrl+C cancels the in-flight query.

use anyhow::{Context, Result};
use bridge_ledger_client::{cancellation, Config, LedgerClient, PageRequest, PageSize, MAX_PAGE_SIZE};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bridge-ledger")]
#[command(about = "Query validated bridge deposits and merkle proofs")]
struct Args {
    /// Path to configuration file (default: config/ledger.toml or BRIDGE_LEDGER_CONFIG_PATH env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Indexing service base URL (overrides api.base_url)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List deposits of an account
    Deposits {
        /// Account address
        address: String,
        /// Page size (defaults to api.page_size)
        #[arg(long)]
        limit: Option<u32>,
        /// Page offset
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Fetch a single deposit
    Deposit {
        /// Network identifier
        net_id: u32,
        /// Deposit count
        deposit_cnt: u64,
    },
    /// Fetch the merkle proof of a deposit
    Proof {
        /// Network identifier
        net_id: u32,
        /// Deposit count
        deposit_cnt: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;
    info!("Indexing service: {}", config.api.base_url);

    let client = LedgerClient::new(&config)?;
    let api_url = config.api.base_url.as_str();

    let (trigger, handle) = cancellation();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, cancelling request");
            trigger.cancel();
        }
    });

    match args.command {
        Command::Deposits {
            address,
            limit,
            offset,
        } => {
            let limit = limit
                .map(|size| {
                    PageSize::new(size).with_context(|| {
                        format!("--limit must be between 1 and {}, got {}", MAX_PAGE_SIZE, size)
                    })
                })
                .transpose()?;
            let page = client
                .list_deposits(api_url, &address, PageRequest::new(limit, offset), Some(handle))
                .await
                .context("Failed to list deposits")?;
            if let Some(next) = page.next_offset(offset) {
                info!("More deposits available from offset {}", next);
            }
            print_json(&page)
        }
        Command::Deposit { net_id, deposit_cnt } => {
            let deposit = client
                .get_deposit(api_url, net_id, deposit_cnt, Some(handle))
                .await
                .context("Failed to fetch deposit")?;
            print_json(&deposit)
        }
        Command::Proof { net_id, deposit_cnt } => {
            let proof = client
                .get_merkle_proof(api_url, net_id, deposit_cnt, Some(handle))
                .await
                .context("Failed to fetch merkle proof")?;
            print_json(&proof)
        }
    }
}

/// Loads configuration, letting `--api-url` stand in for a missing config file.
fn load_config(args: &Args) -> Result<Config> {
    let path = Config::resolve_path(args.config.as_deref());
    let file_missing = !std::path::Path::new(&path).exists();

    let mut config = if args.config.is_none() && args.api_url.is_some() && file_missing {
        Config::default()
    } else {
        info!("Loading configuration from: {}", path);
        Config::load_from_path(Some(&path))?
    };

    if let Some(api_url) = &args.api_url {
        config.api.base_url = api_url.clone();
        config.validate()?;
    }

    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}
