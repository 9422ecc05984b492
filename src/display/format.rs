//! Feed Line Formatting
//!
//! Renders a pair's last event as one fixed-width feed row plus a
//! semantic tone. Column layout (amount width 12, symbol width 7,
//! price width 9) keeps rows aligned across pairs so the live feed
//! scans like a table. Arrows show flow direction relative to the pool:
//! swaps point through it, mints point into it, burns point out of it.
//!
//! Author: AI-Generated
//! Created: 2026-02-07

use crate::pool::{Pair, PairMode};
use alloy::primitives::{Address, B256};
use chrono::{DateTime, Local};

/// What a row means, decoupled from how a sink colors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Flow in the pair's favored direction (buy on a normal pair).
    Positive,
    /// Flow against the favored direction.
    Negative,
    /// Liquidity added.
    Info,
    /// Liquidity removed.
    Warning,
}

/// One fully formatted feed line, ready for a sink.
///
/// The raw identifiers ride along so a sink that is not a dumb terminal
/// (structured log, UI) can render them its own way instead of re-parsing
/// the text.
#[derive(Debug, Clone)]
pub struct FeedLine {
    pub text: String,
    pub tone: Tone,
    pub address: Address,
    pub tx_hash: B256,
    pub at: DateTime<Local>,
}

/// Format the event row for a pair: two flow legs and the implied price.
pub fn pair_row(pair: &Pair) -> (String, Tone) {
    let (amount0, amount1) = pair.scaled_amounts();

    let (left, right, tone) = match pair.mode {
        PairMode::Buy => (
            format!("{:12.4} {:<7}  ->", amount0, pair.symbol0),
            format!("->{:12.4} {:<7}", amount1, pair.symbol1),
            if pair.normal { Tone::Positive } else { Tone::Negative },
        ),
        PairMode::Sell => (
            format!("{:12.4} {:<7}  ->", amount1, pair.symbol1),
            format!("->{:12.4} {:<7}", amount0, pair.symbol0),
            if pair.normal { Tone::Negative } else { Tone::Positive },
        ),
        PairMode::Mint => (
            format!("{:12.4} {:<7}  ->", amount0, pair.symbol0),
            format!("<-{:12.4} {:<7}", amount1, pair.symbol1),
            Tone::Info,
        ),
        PairMode::Burn => (
            format!("{:12.4} {:<7}  <-", amount0, pair.symbol0),
            format!("->{:12.4} {:<7}", amount1, pair.symbol1),
            Tone::Warning,
        ),
    };

    (format!("{} {} | {:9.4}", left, right, pair.price()), tone)
}

/// Build the complete feed line: row, local wall-clock time, and the
/// truncated pool address and transaction hash for eyeball correlation.
pub fn feed_line(pair: &Pair, address: Address, tx_hash: B256, at: DateTime<Local>) -> FeedLine {
    let (row, tone) = pair_row(pair);
    let addr = address.to_string();
    let tx = tx_hash.to_string();
    let text = format!(
        "{} | {} @ {} | {}",
        row,
        at.format("%H:%M:%S"),
        &addr[..6],
        &tx[..6]
    );
    FeedLine {
        text,
        tone,
        address,
        tx_hash,
        at,
    }
}
