//! Pool state and per-staker checkpoints.

use crate::error::StakingError;
use acorn_types::Timestamp;
use serde::{Deserialize, Serialize};

/// Fixed-point precision for the per-share accumulator. Keeps fractional
/// reward-per-unit from being lost to integer truncation.
pub const REWARD_PRECISION: u128 = 1_000_000_000_000;

/// Seconds in a (non-leap) year, for implied-APY math.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 3600;

/// Shared pool state.
///
/// `acc_reward_per_share` is scaled by [`REWARD_PRECISION`] and only ever
/// grows; `last_update` marks the time up to which emission has been folded
/// into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub total_staked: u128,
    pub acc_reward_per_share: u128,
    pub reward_rate_per_second: u128,
    pub last_update: Timestamp,
    pub total_distributed: u128,
    pub staker_count: u64,
    pub active: bool,
}

impl PoolState {
    pub fn new(reward_rate_per_second: u128, genesis: Timestamp) -> Self {
        Self {
            total_staked: 0,
            acc_reward_per_share: 0,
            reward_rate_per_second,
            last_update: genesis,
            total_distributed: 0,
            staker_count: 0,
            active: true,
        }
    }

    /// The accumulator as it would stand after an update at `now`, without
    /// mutating anything.
    ///
    /// Emission over the elapsed interval is divided by `total_staked` so
    /// each staker's share of the pool — not the staker count — determines
    /// its cut. The elapsed time is widened to `u128` before multiplying;
    /// amount × rate × multi-year durations stay exact.
    pub fn projected_acc(&self, now: Timestamp) -> Result<u128, StakingError> {
        // saturating elapsed: a stale clock can never shrink the accumulator
        let dt = self.last_update.elapsed_since(now);
        if dt == 0 || self.total_staked == 0 {
            return Ok(self.acc_reward_per_share);
        }
        let emitted = (dt as u128)
            .checked_mul(self.reward_rate_per_second)
            .ok_or(StakingError::Overflow)?;
        let increment = emitted
            .checked_mul(REWARD_PRECISION)
            .ok_or(StakingError::Overflow)?
            / self.total_staked;
        self.acc_reward_per_share
            .checked_add(increment)
            .ok_or(StakingError::Overflow)
    }

    /// Commit a previously projected accumulator value.
    pub(crate) fn commit_acc(&mut self, acc: u128, now: Timestamp) {
        self.acc_reward_per_share = acc;
        if now > self.last_update {
            self.last_update = now;
        }
    }

    /// Run the update step: fold emission since `last_update` into the
    /// accumulator and advance `last_update`.
    pub fn accumulate(&mut self, now: Timestamp) -> Result<(), StakingError> {
        let acc = self.projected_acc(now)?;
        self.commit_acc(acc, now);
        Ok(())
    }

    /// Highest reward rate whose implied APY stays within `max_apy_bps`.
    pub fn rate_ceiling(&self, max_apy_bps: u32) -> u128 {
        self.total_staked
            .checked_mul(max_apy_bps as u128)
            .map(|n| n / (10_000 * SECONDS_PER_YEAR as u128))
            .unwrap_or(u128::MAX)
    }
}

/// Per-staker bookkeeping. Created lazily on first stake and kept
/// addressable at zero stake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerCheckpoint {
    pub staked_amount: u128,
    pub reward_per_share_paid: u128,
    pub claimed_total: u128,
}

impl StakerCheckpoint {
    /// Reward owed at a given accumulator value.
    pub fn pending_at(&self, acc_reward_per_share: u128) -> Result<u128, StakingError> {
        let delta = acc_reward_per_share
            .checked_sub(self.reward_per_share_paid)
            .ok_or(StakingError::Overflow)?;
        Ok(delta
            .checked_mul(self.staked_amount)
            .ok_or(StakingError::Overflow)?
            / REWARD_PRECISION)
    }
}
