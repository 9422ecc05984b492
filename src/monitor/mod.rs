//! Chain Monitoring Module
//!
//! One subscriber task per chain feeds a merged log stream; a single
//! dispatcher task owns all pair state and renders the feed.
//!
//! Architecture:
//!     subscriber.rs: per-chain WS log subscription with reconnect/backoff
//!     dispatcher.rs: fan-in control loop, sole owner of the pair registry
//!
//! Subscribers communicate with the dispatcher over two unbounded
//! channels: decodable logs (keyed per chain through a StreamMap, so
//! per-chain ordering survives the merge) and lifecycle status changes.
//!
//! Author: AI-Generated
//! Created: 2026-02-08

pub mod dispatcher;
pub mod subscriber;

pub use dispatcher::Dispatcher;
pub use subscriber::ChainSubscriber;

/// Lifecycle notices a subscriber sends the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStatus {
    Connected { chain_id: u64 },
    Reconnecting { chain_id: u64, attempt: u32 },
    /// Reconnect budget exhausted; the subscriber task has exited.
    Dead { chain_id: u64, name: String },
}
