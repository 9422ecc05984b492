//! Pair Metadata Store
//!
//! Disk persistence for the two JSON files the monitor runs on:
//!
//! - `ram.data`: pool address -> pair metadata (symbols, decimals, chain id,
//!   quote orientation). Produced by `--bootstrap`, read at every start.
//! - `bootstrap.data`: chain id -> pool address list. The shopping list the
//!   bootstrap fetcher works through.
//!
//! Writes go to a temp file first and are renamed into place so a crash
//! mid-write never corrupts an existing file.
//!
//! Author: AI-Generated
//! Created: 2026-02-07

use crate::error::{MonitorError, Result};
use crate::pool::Pair;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// On-disk shape of one `ram.data` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairMeta {
    pub symbol0: String,
    pub symbol1: String,
    pub decimals0: u8,
    pub decimals1: u8,
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    pub normal: bool,
}

impl From<&Pair> for PairMeta {
    fn from(pair: &Pair) -> Self {
        Self {
            symbol0: pair.symbol0.clone(),
            symbol1: pair.symbol1.clone(),
            decimals0: pair.decimals0,
            decimals1: pair.decimals1,
            chain_id: pair.chain_id,
            normal: pair.normal,
        }
    }
}

impl From<PairMeta> for Pair {
    fn from(meta: PairMeta) -> Self {
        Pair::new(
            meta.symbol0,
            meta.symbol1,
            meta.decimals0,
            meta.decimals1,
            meta.chain_id,
            meta.normal,
        )
    }
}

/// Load `ram.data` and build the in-memory pair table.
pub fn load_pairs<P: AsRef<Path>>(path: P) -> Result<HashMap<Address, Pair>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| MonitorError::Store(format!("failed to read {}: {}", path.display(), e)))?;
    let raw: HashMap<String, PairMeta> = serde_json::from_str(&json)
        .map_err(|e| MonitorError::Store(format!("failed to parse {}: {}", path.display(), e)))?;

    let mut pairs = HashMap::with_capacity(raw.len());
    for (addr_str, meta) in raw {
        let addr: Address = addr_str.parse().map_err(|e| {
            MonitorError::Store(format!(
                "invalid pool address '{}' in {}: {}",
                addr_str,
                path.display(),
                e
            ))
        })?;
        pairs.insert(addr, Pair::from(meta));
    }
    Ok(pairs)
}

/// Write the pair table back out as `ram.data` (checksummed addresses).
pub fn save_pairs<P: AsRef<Path>>(path: P, pairs: &HashMap<Address, Pair>) -> Result<()> {
    let raw: BTreeMap<String, PairMeta> = pairs
        .iter()
        .map(|(addr, pair)| (addr.to_string(), PairMeta::from(pair)))
        .collect();
    write_json(path.as_ref(), &raw)
}

/// Load `bootstrap.data`: chain id -> pool addresses to fetch.
pub fn load_bootstrap<P: AsRef<Path>>(path: P) -> Result<BTreeMap<u64, Vec<String>>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| MonitorError::Store(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json)
        .map_err(|e| MonitorError::Store(format!("failed to parse {}: {}", path.display(), e)))
}

/// Regenerate `bootstrap.data` from the loaded pair table, grouped by chain.
pub fn save_bootstrap<P: AsRef<Path>>(path: P, pairs: &HashMap<Address, Pair>) -> Result<()> {
    let mut grouped: BTreeMap<u64, Vec<String>> = BTreeMap::new();
    for (addr, pair) in pairs {
        grouped.entry(pair.chain_id).or_default().push(addr.to_string());
    }
    for addresses in grouped.values_mut() {
        addresses.sort();
    }
    write_json(path.as_ref(), &grouped)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| MonitorError::Store(format!("failed to serialize {}: {}", path.display(), e)))?;

    // Write to temp file first, then rename (atomic)
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, &json).map_err(|e| {
        MonitorError::Store(format!("failed to write {}: {}", temp_path.display(), e))
    })?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| MonitorError::Store(format!("failed to rename into {}: {}", path.display(), e)))?;
    Ok(())
}
