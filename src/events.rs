//! Pool Event Decoder
//!
//! Classifies raw logs by topic0 against the canonical Uniswap-V2 pair
//! events (Swap, Mint, Burn) and decodes the payload into typed variants.
//! Logs with an unknown topic or an undecodable payload are dropped; a
//! misbehaving pool must never take the feed down.
//!
//! Author: AI-Generated
//! Created: 2026-02-05

use alloy::primitives::{B256, U256};
use alloy::rpc::types::Log;
use alloy::sol;
use alloy::sol_types::SolEvent;
use tracing::{debug, trace};

sol! {
    #[derive(Debug, PartialEq)]
    event Swap(
        address indexed sender,
        uint256 amount0In,
        uint256 amount1In,
        uint256 amount0Out,
        uint256 amount1Out,
        address indexed to
    );

    #[derive(Debug, PartialEq)]
    event Mint(address indexed sender, uint256 amount0, uint256 amount1);

    #[derive(Debug, PartialEq)]
    event Burn(address indexed sender, uint256 amount0, uint256 amount1, address indexed to);
}

/// The three event signatures every chain subscription filters on.
pub const MONITORED_TOPICS: [B256; 3] = [
    Swap::SIGNATURE_HASH,
    Mint::SIGNATURE_HASH,
    Burn::SIGNATURE_HASH,
];

// ---------------------------------------------------------------------------
// Decoded event variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapFields {
    pub amount0_in: U256,
    pub amount1_in: U256,
    pub amount0_out: U256,
    pub amount1_out: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintFields {
    pub amount0: U256,
    pub amount1: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnFields {
    pub amount0: U256,
    pub amount1: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    Swap(SwapFields),
    Mint(MintFields),
    Burn(BurnFields),
}

/// Decode a raw log into a pool event.
///
/// Returns `None` for logs that are not Swap/Mint/Burn or whose payload
/// fails ABI decoding (wrong word count, corrupt data). Both cases are
/// logged at trace/debug level only so the live feed stays clean.
pub fn decode_pool_event(log: &Log) -> Option<PoolEvent> {
    let topic0 = *log.topics().first()?;

    match topic0 {
        t if t == Swap::SIGNATURE_HASH => match Swap::decode_log(&log.inner) {
            Ok(ev) => Some(PoolEvent::Swap(SwapFields {
                amount0_in: ev.amount0In,
                amount1_in: ev.amount1In,
                amount0_out: ev.amount0Out,
                amount1_out: ev.amount1Out,
            })),
            Err(e) => {
                debug!("dropping undecodable Swap log from {}: {}", log.address(), e);
                None
            }
        },
        t if t == Mint::SIGNATURE_HASH => match Mint::decode_log(&log.inner) {
            Ok(ev) => Some(PoolEvent::Mint(MintFields {
                amount0: ev.amount0,
                amount1: ev.amount1,
            })),
            Err(e) => {
                debug!("dropping undecodable Mint log from {}: {}", log.address(), e);
                None
            }
        },
        t if t == Burn::SIGNATURE_HASH => match Burn::decode_log(&log.inner) {
            Ok(ev) => Some(PoolEvent::Burn(BurnFields {
                amount0: ev.amount0,
                amount1: ev.amount1,
            })),
            Err(e) => {
                debug!("dropping undecodable Burn log from {}: {}", log.address(), e);
                None
            }
        },
        other => {
            trace!("ignoring log with unmonitored topic {}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, Bytes, LogData};

    fn rpc_log(address: Address, data: LogData) -> Log {
        Log {
            inner: alloy::primitives::Log { address, data },
            ..Default::default()
        }
    }

    fn swap_log(a0_in: u64, a1_in: u64, a0_out: u64, a1_out: u64) -> Log {
        let ev = Swap {
            sender: Address::repeat_byte(0x11),
            amount0In: U256::from(a0_in),
            amount1In: U256::from(a1_in),
            amount0Out: U256::from(a0_out),
            amount1Out: U256::from(a1_out),
            to: Address::repeat_byte(0x22),
        };
        rpc_log(Address::repeat_byte(0xaa), ev.encode_log_data())
    }

    #[test]
    fn swap_decodes_with_field_mapping() {
        let decoded = decode_pool_event(&swap_log(100, 0, 0, 42)).unwrap();
        assert_eq!(
            decoded,
            PoolEvent::Swap(SwapFields {
                amount0_in: U256::from(100),
                amount1_in: U256::ZERO,
                amount0_out: U256::ZERO,
                amount1_out: U256::from(42),
            })
        );
    }

    #[test]
    fn mint_decodes() {
        let ev = Mint {
            sender: Address::repeat_byte(0x11),
            amount0: U256::from(7u64),
            amount1: U256::from(9u64),
        };
        let log = rpc_log(Address::repeat_byte(0xab), ev.encode_log_data());
        let decoded = decode_pool_event(&log).unwrap();
        assert_eq!(
            decoded,
            PoolEvent::Mint(MintFields {
                amount0: U256::from(7u64),
                amount1: U256::from(9u64),
            })
        );
    }

    #[test]
    fn burn_decodes() {
        let ev = Burn {
            sender: Address::repeat_byte(0x11),
            amount0: U256::from(3u64),
            amount1: U256::from(5u64),
            to: Address::repeat_byte(0x22),
        };
        let log = rpc_log(Address::repeat_byte(0xac), ev.encode_log_data());
        let decoded = decode_pool_event(&log).unwrap();
        assert_eq!(
            decoded,
            PoolEvent::Burn(BurnFields {
                amount0: U256::from(3u64),
                amount1: U256::from(5u64),
            })
        );
    }

    #[test]
    fn unknown_topic_is_ignored() {
        let data = LogData::new_unchecked(vec![B256::repeat_byte(0xdd)], Bytes::new());
        let log = rpc_log(Address::repeat_byte(0xaa), data);
        assert_eq!(decode_pool_event(&log), None);
    }

    #[test]
    fn log_with_no_topics_is_ignored() {
        let data = LogData::new_unchecked(vec![], Bytes::new());
        let log = rpc_log(Address::repeat_byte(0xaa), data);
        assert_eq!(decode_pool_event(&log), None);
    }

    #[test]
    fn malformed_swap_payload_is_dropped() {
        // Swap topic but a truncated body: decode must fail without panicking.
        let data = LogData::new_unchecked(
            vec![
                Swap::SIGNATURE_HASH,
                B256::repeat_byte(0x11),
                B256::repeat_byte(0x22),
            ],
            Bytes::from(vec![0u8; 8]),
        );
        let log = rpc_log(Address::repeat_byte(0xaa), data);
        assert_eq!(decode_pool_event(&log), None);
    }

    #[test]
    fn monitored_topics_are_distinct() {
        assert_ne!(MONITORED_TOPICS[0], MONITORED_TOPICS[1]);
        assert_ne!(MONITORED_TOPICS[1], MONITORED_TOPICS[2]);
        assert_ne!(MONITORED_TOPICS[0], MONITORED_TOPICS[2]);
    }
}
