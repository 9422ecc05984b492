//! Pair filtering
//!
//! Symbol-based watchlist applied to the loaded pair table at startup.
//!
//! Author: AI-Generated
//! Created: 2026-02-07

pub mod watchlist;

pub use watchlist::Watchlist;
