//! Pair State
//!
//! Per-pool state: static token metadata loaded at startup plus the
//! amounts and direction of the last observed event. Events mutate the
//! pair in place; price and display scaling are derived on read.
//!
//! Author: AI-Generated
//! Created: 2026-02-06

use crate::events::PoolEvent;
use alloy::primitives::U256;

/// Direction/kind of the last event applied to a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairMode {
    /// Swap that put token0 into the pool (trader bought token1).
    #[default]
    Buy,
    /// Swap that took token0 out of the pool (trader sold token1).
    Sell,
    /// Liquidity added.
    Mint,
    /// Liquidity removed.
    Burn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub symbol0: String,
    pub symbol1: String,
    pub decimals0: u8,
    pub decimals1: u8,
    pub chain_id: u64,
    /// Quote orientation: true prices token0 in units of token1.
    pub normal: bool,
    /// Raw token0 amount of the last event.
    pub amount0: U256,
    /// Raw token1 amount of the last event.
    pub amount1: U256,
    pub mode: PairMode,
}

impl Pair {
    pub fn new(
        symbol0: impl Into<String>,
        symbol1: impl Into<String>,
        decimals0: u8,
        decimals1: u8,
        chain_id: u64,
        normal: bool,
    ) -> Self {
        Self {
            symbol0: symbol0.into(),
            symbol1: symbol1.into(),
            decimals0,
            decimals1,
            chain_id,
            normal,
            amount0: U256::ZERO,
            amount1: U256::ZERO,
            mode: PairMode::default(),
        }
    }

    /// Fold one decoded event into the pair.
    ///
    /// Swap direction is inferred from the input legs: a zero token0 input
    /// means token0 left the pool (Sell), anything else is a Buy. Applying
    /// the same event again yields the same state, so replayed logs after
    /// a reconnect are harmless.
    pub fn apply(&mut self, event: &PoolEvent) {
        match event {
            PoolEvent::Swap(f) => {
                if f.amount0_in.is_zero() {
                    self.amount0 = f.amount0_out;
                    self.amount1 = f.amount1_in;
                    self.mode = PairMode::Sell;
                } else {
                    self.amount0 = f.amount0_in;
                    self.amount1 = f.amount1_out;
                    self.mode = PairMode::Buy;
                }
            }
            PoolEvent::Mint(f) => {
                self.amount0 = f.amount0;
                self.amount1 = f.amount1;
                self.mode = PairMode::Mint;
            }
            PoolEvent::Burn(f) => {
                self.amount0 = f.amount0;
                self.amount1 = f.amount1;
                self.mode = PairMode::Burn;
            }
        }
    }

    /// Last-event amounts scaled to human units by each token's decimals.
    pub fn scaled_amounts(&self) -> (f64, f64) {
        let a0 = u256_to_f64(self.amount0) / 10f64.powi(self.decimals0 as i32);
        let a1 = u256_to_f64(self.amount1) / 10f64.powi(self.decimals1 as i32);
        (a0, a1)
    }

    /// Price implied by the last event, honoring the quote orientation.
    /// Zero while no event has been seen (or the token0 leg was zero).
    pub fn price(&self) -> f64 {
        let (a0, a1) = self.scaled_amounts();

        if a0 == 0.0 {
            return 0.0;
        }

        if self.normal {
            a0 / a1
        } else {
            a1 / a0
        }
    }
}

// Lossy on purpose: display precision is 4 decimal places, and parsing the
// decimal string sidesteps the u128 overflow panic of as_limbs conversions.
fn u256_to_f64(value: U256) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}
