//! Symbol Watchlist
//!
//! Optional narrowing of the monitored set from `--filter` arguments.
//! Patterns are case-insensitive symbol prefixes: "ftm" selects any pair
//! with a symbol starting FTM on either side, "ftm/usdc" requires both
//! symbols to match in either order. No patterns means everything passes.
//!
//! Author: AI-Generated
//! Created: 2026-02-07

use tracing::debug;

#[derive(Debug, Clone)]
enum Pattern {
    /// Either symbol of the pair must start with this.
    Symbol(String),
    /// Both symbols must match, order-independent.
    Pair(String, String),
}

#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    patterns: Vec<Pattern>,
}

impl Watchlist {
    pub fn new(filters: &[String]) -> Self {
        let mut patterns = Vec::new();
        for raw in filters {
            let parts: Vec<&str> = raw
                .split('/')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            match parts.as_slice() {
                [] => debug!("ignoring empty watch filter '{}'", raw),
                [one] => patterns.push(Pattern::Symbol(one.to_uppercase())),
                [first, second, ..] => {
                    patterns.push(Pattern::Pair(first.to_uppercase(), second.to_uppercase()))
                }
            }
        }
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when the pair's symbols satisfy at least one pattern
    /// (or no patterns were given).
    pub fn matches(&self, symbol0: &str, symbol1: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        self.patterns.iter().any(|pattern| match pattern {
            Pattern::Symbol(p) => prefix_match(symbol0, p) || prefix_match(symbol1, p),
            Pattern::Pair(a, b) => {
                (prefix_match(symbol0, a) && prefix_match(symbol1, b))
                    || (prefix_match(symbol0, b) && prefix_match(symbol1, a))
            }
        })
    }
}

fn prefix_match(symbol: &str, pattern: &str) -> bool {
    symbol.to_uppercase().starts_with(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watchlist(filters: &[&str]) -> Watchlist {
        let owned: Vec<String> = filters.iter().map(|s| s.to_string()).collect();
        Watchlist::new(&owned)
    }

    #[test]
    fn empty_watchlist_passes_everything() {
        let wl = watchlist(&[]);
        assert!(wl.is_empty());
        assert!(wl.matches("WFTM", "USDC"));
        assert!(wl.matches("ANY", "THING"));
    }

    #[test]
    fn single_pattern_matches_either_side() {
        let wl = watchlist(&["ftm"]);
        // prefix match, so WFTM does not count as FTM
        assert!(!wl.matches("WFTM", "USDC"));
        assert!(wl.matches("FTM", "USDC"));
        assert!(wl.matches("USDC", "FTM"));
        assert!(!wl.matches("WAVAX", "USDT"));
    }

    #[test]
    fn pattern_is_a_prefix_not_an_exact_match() {
        let wl = watchlist(&["USD"]);
        assert!(wl.matches("WFTM", "USDC"));
        assert!(wl.matches("USDT", "WAVAX"));
        assert!(!wl.matches("WFTM", "DAI"));
    }

    #[test]
    fn pair_pattern_matches_both_orders() {
        let wl = watchlist(&["ftm/usdc"]);
        assert!(wl.matches("FTM", "USDC"));
        assert!(wl.matches("USDC", "FTM"));
        assert!(!wl.matches("FTM", "DAI"));
        assert!(!wl.matches("DAI", "USDC"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let wl = watchlist(&["wEth"]);
        assert!(wl.matches("WETH", "USDC"));
        assert!(wl.matches("weth", "usdc"));
    }

    #[test]
    fn any_of_several_patterns_is_enough() {
        let wl = watchlist(&["FTM", "AVAX/USDT"]);
        assert_eq!(wl.len(), 2);
        assert!(wl.matches("FTM", "DAI"));
        assert!(wl.matches("USDT", "AVAX"));
        assert!(!wl.matches("WETH", "DAI"));
    }

    #[test]
    fn blank_filters_are_ignored() {
        let wl = watchlist(&["", "  ", "/"]);
        assert!(wl.is_empty());
        assert!(wl.matches("WFTM", "USDC"));
    }
}
