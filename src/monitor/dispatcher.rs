//! Fan-In Dispatcher
//!
//! The control loop of the monitor. Merges every chain's log stream
//! (keyed by chain id, so per-chain ordering is preserved) with the
//! subscriber status channel, folds events into the pair registry, and
//! emits one feed line per applied event.
//!
//! This task is the sole owner of all pair state. Nothing here locks,
//! because nothing else can touch the registry.
//!
//! Author: AI-Generated
//! Created: 2026-02-08

use crate::display::{feed_line, EventSink};
use crate::error::{MonitorError, Result};
use crate::events::decode_pool_event;
use crate::monitor::ChainStatus;
use crate::pool::PairRegistry;
use alloy::rpc::types::Log;
use chrono::Local;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::{StreamExt, StreamMap};
use tracing::{debug, error, info};

pub struct Dispatcher<S> {
    pairs: PairRegistry,
    sink: S,
}

impl<S: EventSink> Dispatcher<S> {
    pub fn new(pairs: PairRegistry, sink: S) -> Self {
        Self { pairs, sink }
    }

    /// Run until every chain is dead. Returns `AllChainsDown` in that case;
    /// graceful shutdown (Ctrl-C) is raced against this future by the caller.
    pub async fn run(
        &mut self,
        mut logs: StreamMap<u64, UnboundedReceiverStream<Log>>,
        mut status_rx: UnboundedReceiver<ChainStatus>,
        mut live_chains: usize,
    ) -> Result<()> {
        info!(
            "dispatcher: tracking {} pairs on {} chain(s)",
            self.pairs.len(),
            live_chains
        );

        loop {
            tokio::select! {
                Some((chain_id, log)) = logs.next() => {
                    self.handle_log(chain_id, &log);
                }
                Some(chain_status) = status_rx.recv() => {
                    match chain_status {
                        ChainStatus::Connected { chain_id } => {
                            debug!("chain {}: subscription up", chain_id);
                        }
                        ChainStatus::Reconnecting { chain_id, attempt } => {
                            debug!("chain {}: reconnecting (attempt {})", chain_id, attempt);
                        }
                        ChainStatus::Dead { chain_id, name } => {
                            live_chains = live_chains.saturating_sub(1);
                            error!(
                                "chain {} ({}) is down for good, {} chain(s) still live",
                                name, chain_id, live_chains
                            );
                            if live_chains == 0 {
                                return Err(MonitorError::AllChainsDown);
                            }
                        }
                    }
                }
                else => {
                    // Every subscriber hung up without sending a Dead notice.
                    return Err(MonitorError::AllChainsDown);
                }
            }
        }
    }

    fn handle_log(&mut self, chain_id: u64, log: &Log) {
        let event = match decode_pool_event(log) {
            Some(event) => event,
            None => return,
        };

        let address = log.address();
        let pair = match self.pairs.apply_event(&address, &event) {
            Some(pair) => pair,
            None => {
                debug!("event from untracked pool {} on chain {}", address, chain_id);
                return;
            }
        };

        let tx_hash = log.transaction_hash.unwrap_or_default();
        let line = feed_line(pair, address, tx_hash, Local::now());
        self.sink.emit(&line);
    }
}
