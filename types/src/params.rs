//! Protocol parameters — every governance-tunable value in one place.

use crate::amount::{RATE_SCALE, UNIT};
use serde::{Deserialize, Serialize};

/// All protocol parameters for an acorn deployment.
///
/// Loaded from the node's TOML config (missing fields fall back to
/// [`ProtocolParams::acorn_defaults`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    // ── Exchange ─────────────────────────────────────────────────────────
    /// Initial ACN→OAK exchange rate, fixed-point scaled by `RATE_SCALE`.
    /// Default: 10 OAK per ACN.
    pub exchange_rate: u128,

    /// Minimum ACN raw amount accepted by a single conversion.
    pub min_convert: u128,

    // ── Staking ──────────────────────────────────────────────────────────
    /// Minimum ACN raw amount accepted by a single stake.
    pub min_stake: u128,

    /// Initial pool emission: ACN raw units distributed per second across
    /// all stakers. Default: ~1 ACN/hour.
    pub reward_rate_per_second: u128,

    /// Horizon over which an added reward budget is spread (seconds).
    pub reward_horizon_secs: u64,

    /// Ceiling on the pool's implied APY, in basis points (5000 = 50%).
    pub max_apy_bps: u32,

    // ── Vesting ──────────────────────────────────────────────────────────
    /// Cliff duration from grant start (seconds). Default: 1 year.
    pub cliff_duration_secs: u64,

    /// Full vesting duration from grant start (seconds). Default: 5 years.
    pub vest_duration_secs: u64,
}

impl ProtocolParams {
    /// Acorn defaults — the intended configuration for a live deployment.
    pub fn acorn_defaults() -> Self {
        Self {
            exchange_rate: 10 * RATE_SCALE,
            min_convert: UNIT,

            min_stake: 10 * UNIT,
            reward_rate_per_second: UNIT / 3600,
            reward_horizon_secs: 30 * 24 * 3600, // 30 days
            max_apy_bps: 5000,                   // 50%

            cliff_duration_secs: 365 * 24 * 3600,    // 1 year
            vest_duration_secs: 5 * 365 * 24 * 3600, // 5 years
        }
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self::acorn_defaults()
    }
}
