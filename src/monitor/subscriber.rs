//! Per-Chain Log Subscriber
//!
//! Owns one WebSocket connection and one eth_subscribe("logs") session,
//! filtered to the chain's pool addresses and the three monitored event
//! signatures. Every received log is forwarded to the dispatcher untouched.
//!
//! Connection loss is handled locally: reconnect with exponential backoff,
//! resetting the budget after each successful subscription. Only when the
//! budget is exhausted does the task report `ChainStatus::Dead` and exit,
//! so one flaky chain never disturbs the others.
//!
//! Author: AI-Generated
//! Created: 2026-02-08

use crate::config::{ChainConfig, ReconnectConfig};
use crate::error::{MonitorError, Result};
use crate::events::MONITORED_TOPICS;
use crate::monitor::ChainStatus;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder, WsConnect};
use alloy::rpc::types::{Filter, Log};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

/// Why a WS session ended without an error.
enum SessionEnd {
    /// The dispatcher dropped its receiver; time to exit.
    Shutdown,
    /// The remote closed the stream; reconnect.
    StreamClosed,
}

pub struct ChainSubscriber {
    name: String,
    chain_id: u64,
    ws_url: String,
    addresses: Vec<Address>,
    reconnect: ReconnectConfig,
}

impl ChainSubscriber {
    pub fn new(chain: &ChainConfig, addresses: Vec<Address>, reconnect: ReconnectConfig) -> Self {
        Self {
            name: chain.name.clone(),
            chain_id: chain.chain_id,
            ws_url: chain.ws_url.clone(),
            addresses,
            reconnect,
        }
    }

    /// Subscription loop for one chain. Runs until the dispatcher goes away
    /// or the reconnect budget is spent.
    pub async fn run(self, logs: UnboundedSender<Log>, status: UnboundedSender<ChainStatus>) {
        let filter = Filter::new()
            .address(self.addresses.clone())
            .event_signature(MONITORED_TOPICS.to_vec());

        let mut attempts: u32 = 0;
        loop {
            match self.run_session(&filter, &logs, &status, &mut attempts).await {
                Ok(SessionEnd::Shutdown) => {
                    debug!("chain {}: dispatcher gone, subscriber exiting", self.name);
                    return;
                }
                Ok(SessionEnd::StreamClosed) => {
                    warn!("chain {}: log stream closed by remote", self.name);
                }
                Err(e) => {
                    warn!("chain {}: session failed: {}", self.name, e);
                }
            }

            attempts += 1;
            if attempts > self.reconnect.max_attempts {
                error!(
                    "chain {}: {} reconnect attempts exhausted, marking chain dead",
                    self.name, self.reconnect.max_attempts
                );
                let _ = status.send(ChainStatus::Dead {
                    chain_id: self.chain_id,
                    name: self.name.clone(),
                });
                return;
            }

            let delay = self.backoff_delay(attempts);
            let _ = status.send(ChainStatus::Reconnecting {
                chain_id: self.chain_id,
                attempt: attempts,
            });
            warn!(
                "chain {}: reconnecting in {}s (attempt {}/{})",
                self.name,
                delay.as_secs(),
                attempts,
                self.reconnect.max_attempts
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// One WS session: connect, subscribe, pump logs until something ends it.
    async fn run_session(
        &self,
        filter: &Filter,
        logs: &UnboundedSender<Log>,
        status: &UnboundedSender<ChainStatus>,
        attempts: &mut u32,
    ) -> Result<SessionEnd> {
        let provider = ProviderBuilder::new()
            .connect_ws(WsConnect::new(self.ws_url.clone()))
            .await
            .map_err(|e| MonitorError::Rpc(format!("ws connect to {}: {}", self.ws_url, e)))?;

        let subscription = provider
            .subscribe_logs(filter)
            .await
            .map_err(|e| MonitorError::Rpc(format!("subscribe_logs on {}: {}", self.name, e)))?;

        // Subscription is live again: earn the full reconnect budget back.
        *attempts = 0;
        let _ = status.send(ChainStatus::Connected {
            chain_id: self.chain_id,
        });
        info!(
            "chain {}: subscribed to {} pools for Swap/Mint/Burn logs",
            self.name,
            self.addresses.len()
        );

        let mut stream = subscription.into_stream();
        while let Some(log) = stream.next().await {
            if logs.send(log).is_err() {
                return Ok(SessionEnd::Shutdown);
            }
        }
        Ok(SessionEnd::StreamClosed)
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let secs = self
            .reconnect
            .base_delay_secs
            .saturating_mul(1u64 << exponent)
            .min(self.reconnect.max_delay_secs);
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscriber(reconnect: ReconnectConfig) -> ChainSubscriber {
        let chain = ChainConfig {
            name: "fantom".to_string(),
            chain_id: 250,
            ws_url: "wss://example/".to_string(),
            rpc_url: "https://example/".to_string(),
        };
        ChainSubscriber::new(&chain, vec![Address::repeat_byte(0x01)], reconnect)
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let sub = subscriber(ReconnectConfig {
            max_attempts: 10,
            base_delay_secs: 1,
            max_delay_secs: 60,
        });

        assert_eq!(sub.backoff_delay(1).as_secs(), 1);
        assert_eq!(sub.backoff_delay(2).as_secs(), 2);
        assert_eq!(sub.backoff_delay(3).as_secs(), 4);
        assert_eq!(sub.backoff_delay(5).as_secs(), 16);
        assert_eq!(sub.backoff_delay(7).as_secs(), 60);
        assert_eq!(sub.backoff_delay(30).as_secs(), 60);
    }

    #[test]
    fn backoff_respects_a_larger_base() {
        let sub = subscriber(ReconnectConfig {
            max_attempts: 10,
            base_delay_secs: 5,
            max_delay_secs: 45,
        });

        assert_eq!(sub.backoff_delay(1).as_secs(), 5);
        assert_eq!(sub.backoff_delay(2).as_secs(), 10);
        assert_eq!(sub.backoff_delay(4).as_secs(), 40);
        assert_eq!(sub.backoff_delay(5).as_secs(), 45);
    }
}
