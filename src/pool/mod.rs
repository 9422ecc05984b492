//! Pool state module for the liquidity monitor
//!
//! Holds per-pair state derived from on-chain events and the registry
//! that maps pool addresses to pairs.
//!
//! Author: AI-Generated
//! Created: 2026-02-06

pub mod pair;
pub mod registry;

pub use pair::{Pair, PairMode};
pub use registry::PairRegistry;
