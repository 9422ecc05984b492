//! Liquidity Pool Monitor Library
//!
//! Components for watching Uniswap-V2-style liquidity pools across
//! multiple chains: event decoding, pair state, per-chain subscribers,
//! the fan-in dispatcher, and the live feed presentation.
//!
//! Author: AI-Generated
//! Created: 2026-02-05

pub mod bootstrap;
pub mod config;
pub mod contracts;
pub mod display;
pub mod error;
pub mod events;
pub mod filters;
pub mod monitor;
pub mod pool;
pub mod store;

// Re-export commonly used types
pub use config::{ChainConfig, MonitorConfig, ReconnectConfig};
pub use error::{MonitorError, Result};
pub use events::{decode_pool_event, PoolEvent};
pub use monitor::{ChainStatus, ChainSubscriber, Dispatcher};
pub use pool::{Pair, PairMode, PairRegistry};
