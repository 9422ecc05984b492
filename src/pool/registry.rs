//! Pair Registry
//!
//! Plain-HashMap table of every monitored pair, keyed by pool address.
//! Owned exclusively by the dispatcher's control loop; subscriber tasks
//! never touch it, so no locking is involved anywhere on the event path.
//!
//! Author: AI-Generated
//! Created: 2026-02-06

use crate::events::PoolEvent;
use crate::pool::Pair;
use alloy::primitives::Address;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct PairRegistry {
    pairs: HashMap<Address, Pair>,
}

impl PairRegistry {
    pub fn new(pairs: HashMap<Address, Pair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, address: &Address) -> Option<&Pair> {
        self.pairs.get(address)
    }

    /// Pool addresses that live on the given chain, for subscription filters.
    pub fn addresses_for_chain(&self, chain_id: u64) -> Vec<Address> {
        self.pairs
            .iter()
            .filter(|(_, pair)| pair.chain_id == chain_id)
            .map(|(addr, _)| *addr)
            .collect()
    }

    /// Distinct chain ids referenced by the loaded pairs, ascending.
    pub fn chain_ids(&self) -> Vec<u64> {
        self.pairs
            .values()
            .map(|p| p.chain_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Fold an event into the pair it belongs to.
    /// Returns the updated pair, or `None` when the address is not tracked.
    pub fn apply_event(&mut self, address: &Address, event: &PoolEvent) -> Option<&Pair> {
        let pair = self.pairs.get_mut(address)?;
        pair.apply(event);
        Some(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MintFields;
    use crate::pool::PairMode;
    use alloy::primitives::U256;

    fn registry() -> PairRegistry {
        let mut pairs = HashMap::new();
        pairs.insert(
            Address::repeat_byte(0x01),
            Pair::new("WFTM", "USDC", 18, 6, 250, true),
        );
        pairs.insert(
            Address::repeat_byte(0x02),
            Pair::new("WAVAX", "USDT", 18, 6, 43114, true),
        );
        pairs.insert(
            Address::repeat_byte(0x03),
            Pair::new("WETH", "WAVAX", 18, 18, 43114, false),
        );
        PairRegistry::new(pairs)
    }

    #[test]
    fn addresses_are_grouped_by_chain() {
        let reg = registry();
        assert_eq!(reg.addresses_for_chain(250), vec![Address::repeat_byte(0x01)]);

        let mut avax = reg.addresses_for_chain(43114);
        avax.sort();
        assert_eq!(
            avax,
            vec![Address::repeat_byte(0x02), Address::repeat_byte(0x03)]
        );
        assert!(reg.addresses_for_chain(1).is_empty());
    }

    #[test]
    fn chain_ids_are_sorted_and_deduped() {
        assert_eq!(registry().chain_ids(), vec![250, 43114]);
    }

    #[test]
    fn apply_event_updates_known_pair() {
        let mut reg = registry();
        let event = PoolEvent::Mint(MintFields {
            amount0: U256::from(1u64),
            amount1: U256::from(2u64),
        });

        let pair = reg.apply_event(&Address::repeat_byte(0x01), &event).unwrap();
        assert_eq!(pair.mode, PairMode::Mint);
        assert_eq!(pair.amount0, U256::from(1u64));
    }

    #[test]
    fn apply_event_ignores_unknown_address() {
        let mut reg = registry();
        let event = PoolEvent::Mint(MintFields {
            amount0: U256::from(1u64),
            amount1: U256::from(2u64),
        });

        assert!(reg.apply_event(&Address::repeat_byte(0xEE), &event).is_none());
    }
}
