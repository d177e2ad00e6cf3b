//! Token kinds and raw-amount conventions.
//!
//! Amounts are unsigned fixed-width integers (`u128` raw units) to avoid
//! floating-point errors. The smallest unit is 1 raw; one whole token is
//! [`UNIT`] raw.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw units per whole token (both kinds use the same denomination).
pub const UNIT: u128 = 1_000_000_000_000;

/// Fixed-point scale for the exchange rate: a stored rate of `RATE_SCALE`
/// converts 1 ACN raw into exactly 1 OAK raw.
pub const RATE_SCALE: u128 = 1_000_000;

/// The two ledger tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// ACN — the primary savings token. Minted by authority, burned to
    /// obtain OAK, staked for yield, escrowed by vesting grants.
    Acorn,
    /// OAK — the derived utility token. Exists only through conversion.
    Oak,
}

impl TokenKind {
    /// Both kinds, for iterating supply counters and balances.
    pub const ALL: [TokenKind; 2] = [TokenKind::Acorn, TokenKind::Oak];

    pub fn ticker(&self) -> &'static str {
        match self {
            TokenKind::Acorn => "ACN",
            TokenKind::Oak => "OAK",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ticker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickers() {
        assert_eq!(TokenKind::Acorn.to_string(), "ACN");
        assert_eq!(TokenKind::Oak.to_string(), "OAK");
    }

    #[test]
    fn all_covers_both_kinds() {
        assert_eq!(TokenKind::ALL.len(), 2);
        assert_ne!(TokenKind::ALL[0], TokenKind::ALL[1]);
    }
}
