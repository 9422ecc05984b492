//! Chain Endpoint Configuration
//!
//! Reads the list of monitored chains (name, chain id, WS + HTTP endpoints)
//! and reconnect tuning from a TOML file. When the file is absent the
//! monitor falls back to built-in Fantom and Avalanche C-Chain endpoints,
//! so a checkout runs with zero setup.
//!
//! Author: AI-Generated
//! Created: 2026-02-06

use crate::error::{MonitorError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Top-level TOML configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(rename = "chain")]
    pub chains: Vec<ChainConfig>,
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

/// One `[[chain]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    /// WebSocket endpoint used for the log subscription.
    pub ws_url: String,
    /// HTTP endpoint used by the bootstrap metadata fetcher.
    pub rpc_url: String,
}

/// Reconnect tuning shared by every chain subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay")]
    pub base_delay_secs: u64,
    #[serde(default = "default_max_delay")]
    pub max_delay_secs: u64,
}

fn default_max_attempts() -> u32 { 10 }
fn default_base_delay() -> u64 { 1 }
fn default_max_delay() -> u64 { 60 }

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay(),
            max_delay_secs: default_max_delay(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            chains: vec![
                ChainConfig {
                    name: "fantom".to_string(),
                    chain_id: 250,
                    ws_url: "wss://wsapi.fantom.network/".to_string(),
                    rpc_url: "https://rpc.ftm.tools/".to_string(),
                },
                ChainConfig {
                    name: "avalanche".to_string(),
                    chain_id: 43114,
                    ws_url: "wss://api.avax.network/ext/bc/C/ws".to_string(),
                    rpc_url: "https://api.avax.network/ext/bc/C/rpc".to_string(),
                },
            ],
            reconnect: ReconnectConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a TOML file, falling back to the built-in
    /// endpoints when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(
                "config file {} not found, using built-in Fantom + Avalanche endpoints",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| MonitorError::Config(format!("failed to parse {}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.chains.is_empty() {
            return Err(MonitorError::Config(
                "config has no [[chain]] entries".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.chain_id) {
                return Err(MonitorError::Config(format!(
                    "duplicate chain id {} ({})",
                    chain.chain_id, chain.name
                )));
            }
        }
        Ok(())
    }

    pub fn chain(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml_str = r#"
            [[chain]]
            name = "fantom"
            chain_id = 250
            ws_url = "wss://wsapi.fantom.network/"
            rpc_url = "https://rpc.ftm.tools/"

            [[chain]]
            name = "avalanche"
            chain_id = 43114
            ws_url = "wss://api.avax.network/ext/bc/C/ws"
            rpc_url = "https://api.avax.network/ext/bc/C/rpc"

            [reconnect]
            max_attempts = 5
            base_delay_secs = 2
            max_delay_secs = 30
        "#;

        let config: MonitorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chains.len(), 2);
        assert_eq!(config.chains[1].chain_id, 43114);
        assert_eq!(config.reconnect.max_attempts, 5);
        assert_eq!(config.reconnect.base_delay_secs, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reconnect_section_is_optional() {
        let toml_str = r#"
            [[chain]]
            name = "fantom"
            chain_id = 250
            ws_url = "wss://example/"
            rpc_url = "https://example/"
        "#;

        let config: MonitorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reconnect.max_attempts, 10);
        assert_eq!(config.reconnect.base_delay_secs, 1);
        assert_eq!(config.reconnect.max_delay_secs, 60);
    }

    #[test]
    fn duplicate_chain_ids_are_rejected() {
        let toml_str = r#"
            [[chain]]
            name = "a"
            chain_id = 250
            ws_url = "wss://a/"
            rpc_url = "https://a/"

            [[chain]]
            name = "b"
            chain_id = 250
            ws_url = "wss://b/"
            rpc_url = "https://b/"
        "#;

        let config: MonitorConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn built_in_defaults_cover_fantom_and_avalanche() {
        let config = MonitorConfig::default();
        assert!(config.chain(250).is_some());
        assert!(config.chain(43114).is_some());
        assert!(config.chain(1).is_none());
        assert!(config.validate().is_ok());
    }
}
