//! Bootstrap Metadata Fetcher
//!
//! Turns a bare list of pool addresses (`bootstrap.data`) into the pair
//! metadata file the monitor runs on (`ram.data`). For every pool it asks
//! the chain for token0/token1, then each token for symbol() and
//! decimals(), over plain HTTP RPC.
//!
//! Tokens are shared between many pools, so symbol/decimals responses are
//! cached per token across the concurrent pool fetches. Unreadable tokens
//! do not kill the run: symbol falls back to "ERROR" and decimals to 18,
//! mirroring what the feed can tolerate.
//!
//! Author: AI-Generated
//! Created: 2026-02-09

use crate::config::MonitorConfig;
use crate::contracts::{IERC20, IUniswapV2Pair};
use crate::error::{MonitorError, Result};
use crate::pool::Pair;
use crate::store;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use dashmap::DashMap;
use futures::future::join_all;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct TokenMeta {
    symbol: String,
    decimals: u8,
}

/// Fetches pair metadata for one chain, with a per-token response cache.
pub struct PairFetcher<P> {
    provider: Arc<P>,
    token_cache: DashMap<Address, TokenMeta>,
}

impl<P: Provider + 'static> PairFetcher<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            token_cache: DashMap::new(),
        }
    }

    /// Discover the metadata for a single pool.
    pub async fn fetch_pair(&self, pool: Address, chain_id: u64) -> Result<Pair> {
        let pair_contract = IUniswapV2Pair::new(pool, Arc::clone(&self.provider));

        let token0 = pair_contract
            .token0()
            .call()
            .await
            .map_err(|e| MonitorError::Rpc(format!("token0() of {}: {}", pool, e)))?;
        let token1 = pair_contract
            .token1()
            .call()
            .await
            .map_err(|e| MonitorError::Rpc(format!("token1() of {}: {}", pool, e)))?;

        let meta0 = self.token_meta(token0).await;
        let meta1 = self.token_meta(token1).await;

        debug!(
            "pool {}: {} ({} dec) / {} ({} dec)",
            pool, meta0.symbol, meta0.decimals, meta1.symbol, meta1.decimals
        );

        // Fresh entries start with the plain quote orientation; flip
        // `normal` by hand in ram.data for pairs quoted the other way.
        Ok(Pair::new(
            meta0.symbol,
            meta1.symbol,
            meta0.decimals,
            meta1.decimals,
            chain_id,
            true,
        ))
    }

    async fn token_meta(&self, token: Address) -> TokenMeta {
        if let Some(meta) = self.token_cache.get(&token) {
            return meta.clone();
        }

        let erc20 = IERC20::new(token, Arc::clone(&self.provider));

        let symbol = match erc20.symbol().call().await {
            Ok(symbol) => symbol,
            Err(e) => {
                warn!("symbol() failed for token {}: {}", token, e);
                "ERROR".to_string()
            }
        };
        let decimals = match erc20.decimals().call().await {
            Ok(decimals) => decimals,
            Err(e) => {
                warn!("decimals() failed for token {}: {}, assuming 18", token, e);
                18
            }
        };

        let meta = TokenMeta { symbol, decimals };
        self.token_cache.insert(token, meta.clone());
        meta
    }
}

/// Work through `bootstrap.data` chain by chain and write `ram.data`.
///
/// Pools that fail to resolve are skipped with a warning; the run only
/// fails when a listed chain has no configured endpoint or nothing at
/// all could be fetched.
pub async fn run_bootstrap(
    config: &MonitorConfig,
    bootstrap_path: &Path,
    ram_path: &Path,
) -> Result<()> {
    let chains = store::load_bootstrap(bootstrap_path)?;
    let total: usize = chains.values().map(Vec::len).sum();
    info!(
        "bootstrap: {} pools across {} chain(s) listed in {}",
        total,
        chains.len(),
        bootstrap_path.display()
    );

    let mut pairs: HashMap<Address, Pair> = HashMap::new();
    for (chain_id, addresses) in &chains {
        let chain_id = *chain_id;
        let chain = config.chain(chain_id).ok_or_else(|| {
            MonitorError::Config(format!("no endpoint configured for chain id {}", chain_id))
        })?;

        let provider = ProviderBuilder::new().connect_http(chain.rpc_url.parse().map_err(
            |e| MonitorError::Config(format!("invalid rpc url '{}': {}", chain.rpc_url, e)),
        )?);
        let fetcher = PairFetcher::new(Arc::new(provider));

        info!(
            "bootstrap: fetching {} pools on {} via {}",
            addresses.len(),
            chain.name,
            chain.rpc_url
        );

        let tasks = addresses.iter().map(|addr_str| {
            let fetcher = &fetcher;
            async move {
                let pool: Address = match addr_str.parse() {
                    Ok(addr) => addr,
                    Err(e) => {
                        warn!("bootstrap: skipping invalid address '{}': {}", addr_str, e);
                        return None;
                    }
                };
                match fetcher.fetch_pair(pool, chain_id).await {
                    Ok(pair) => {
                        info!("  {} / {} ({})", pair.symbol0, pair.symbol1, pool);
                        Some((pool, pair))
                    }
                    Err(e) => {
                        warn!("bootstrap: failed to fetch pool {}: {}", pool, e);
                        None
                    }
                }
            }
        });

        for (pool, pair) in join_all(tasks).await.into_iter().flatten() {
            pairs.insert(pool, pair);
        }
    }

    if pairs.is_empty() {
        return Err(MonitorError::Store(
            "bootstrap produced no usable pairs".to_string(),
        ));
    }

    store::save_pairs(ram_path, &pairs)?;
    info!(
        "bootstrap: wrote {} of {} pools to {}",
        pairs.len(),
        total,
        ram_path.display()
    );
    Ok(())
}
