//! Multi-Chain Liquidity Pool Monitor
//!
//! Main entry point. Loads pair metadata (ram.data), spawns one WS log
//! subscriber per configured chain, and runs the fan-in dispatcher that
//! owns all pair state and prints the live event feed.
//!
//! Architecture:
//! - One subscriber task per chain: eth_subscribe("logs") filtered to the
//!   chain's pool addresses + Swap/Mint/Burn topics, reconnect with backoff
//! - One dispatcher task: merges per-chain streams (order preserved within
//!   a chain), folds events into the registry, emits colored feed lines
//! - Chains fail independently; the process exits only when every chain
//!   has exhausted its reconnect budget (or on Ctrl-C)
//!
//! Author: AI-Generated
//! Created: 2026-02-05
//! Modified: 2026-02-08 - single-owner registry in the dispatcher (was a shared map)
//! Modified: 2026-02-09 - per-chain reconnect budget, exit only when all chains die
//! Modified: 2026-02-10 - symbol watchlist via repeatable --filter
//!
//! Usage:
//!     lp-monitor --bootstrap        # resolve bootstrap.data -> ram.data, then exit
//!     lp-monitor                    # monitor everything in ram.data
//!     lp-monitor --filter ftm/usdc  # monitor matching pairs only

use anyhow::{bail, Context, Result};
use clap::Parser;
use lp_monitor::display::ConsoleSink;
use lp_monitor::filters::Watchlist;
use lp_monitor::monitor::{ChainSubscriber, Dispatcher};
use lp_monitor::{bootstrap, store, MonitorConfig, PairRegistry};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Multi-chain DEX liquidity pool monitor (Fantom, Avalanche)
#[derive(Parser)]
#[command(name = "lp-monitor")]
struct Args {
    /// Fetch metadata for every pool in the bootstrap file, write the ram file, and exit
    #[arg(long)]
    bootstrap: bool,

    /// Regenerate the bootstrap file from the ram file, then keep monitoring
    #[arg(long)]
    gen_bootstrap: bool,

    /// Pool metadata file (JSON map: pool address -> pair metadata)
    #[arg(long, env = "LP_MONITOR_RAM_FILE", default_value = "ram.data")]
    ram_file: PathBuf,

    /// Bootstrap pool list (JSON map: chain id -> pool addresses)
    #[arg(long, env = "LP_MONITOR_BOOTSTRAP_FILE", default_value = "bootstrap.data")]
    bootstrap_file: PathBuf,

    /// Chain endpoint configuration (TOML)
    #[arg(long, env = "LP_MONITOR_CONFIG", default_value = "chains.toml")]
    config: PathBuf,

    /// Only monitor pairs whose symbols match (prefix, e.g. "ftm" or "ftm/usdc"; repeatable)
    #[arg(long = "filter", value_name = "PATTERN")]
    filters: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = MonitorConfig::load(&args.config)?;

    if args.bootstrap {
        bootstrap::run_bootstrap(&config, &args.bootstrap_file, &args.ram_file).await?;
        info!("bootstrap finished, start again without --bootstrap to go live");
        return Ok(());
    }

    let mut pairs = store::load_pairs(&args.ram_file).with_context(|| {
        format!(
            "no usable pair metadata in {}; run with --bootstrap first",
            args.ram_file.display()
        )
    })?;
    info!("loaded {} pairs from {}", pairs.len(), args.ram_file.display());

    if args.gen_bootstrap {
        store::save_bootstrap(&args.bootstrap_file, &pairs)?;
        info!("regenerated {}", args.bootstrap_file.display());
    }

    let watchlist = Watchlist::new(&args.filters);
    if !watchlist.is_empty() {
        let before = pairs.len();
        pairs.retain(|_, pair| watchlist.matches(&pair.symbol0, &pair.symbol1));
        info!("watchlist kept {} of {} pairs", pairs.len(), before);
    }
    if pairs.is_empty() {
        bail!("no pairs to monitor after filtering");
    }

    let registry = PairRegistry::new(pairs);
    for chain_id in registry.chain_ids() {
        if config.chain(chain_id).is_none() {
            warn!(
                "{} pair(s) reference chain id {} which has no configured endpoint",
                registry.addresses_for_chain(chain_id).len(),
                chain_id
            );
        }
    }

    let (status_tx, status_rx) = mpsc::unbounded_channel();
    let mut log_streams = StreamMap::new();
    let mut live_chains = 0usize;

    for chain in &config.chains {
        let addresses = registry.addresses_for_chain(chain.chain_id);
        if addresses.is_empty() {
            info!("chain {}: no pairs to watch, skipping", chain.name);
            continue;
        }

        let (log_tx, log_rx) = mpsc::unbounded_channel();
        log_streams.insert(chain.chain_id, UnboundedReceiverStream::new(log_rx));

        info!(
            "chain {}: watching {} pools via {}",
            chain.name,
            addresses.len(),
            chain.ws_url
        );
        let subscriber = ChainSubscriber::new(chain, addresses, config.reconnect.clone());
        tokio::spawn(subscriber.run(log_tx, status_tx.clone()));
        live_chains += 1;
    }
    drop(status_tx);

    if live_chains == 0 {
        bail!("no configured chain has any pairs to monitor");
    }

    info!(
        "listening for Swap/Mint/Burn events on {} chain(s)...",
        live_chains
    );

    let mut dispatcher = Dispatcher::new(registry, ConsoleSink);
    tokio::select! {
        result = dispatcher.run(log_streams, status_rx, live_chains) => {
            result.context("monitor stopped")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
        }
    }

    Ok(())
}
