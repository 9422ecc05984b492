//! Monitor Error Types
//!
//! Shared error enum for the library modules. Binary glue (main, bootstrap
//! command) wraps these in anyhow for human-readable context chains.
//!
//! Author: AI-Generated
//! Created: 2026-02-05

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("config: {0}")]
    Config(String),

    #[error("metadata store: {0}")]
    Store(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    /// Every configured chain has exhausted its reconnect budget.
    #[error("all chain subscriptions terminated")]
    AllChainsDown,
}

pub type Result<T> = std::result::Result<T, MonitorError>;
