//! A single cliff/linear vesting schedule.

use acorn_types::{HolderAddress, Timestamp};
use serde::{Deserialize, Serialize};

/// A time-locked grant. The linear curve runs from `start` to `end`; the
/// cliff only gates availability, it does not shift the curve's origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    pub beneficiary: HolderAddress,
    pub total_amount: u128,
    pub released_amount: u128,
    pub start: Timestamp,
    pub cliff: Timestamp,
    pub end: Timestamp,
    pub revoked: bool,
}

impl VestingSchedule {
    /// Amount vested at `t`: zero before the cliff, everything at/after
    /// `end`, linear in between (integer truncation toward zero).
    pub fn vested_amount(&self, t: Timestamp) -> u128 {
        if t < self.cliff {
            return 0;
        }
        if t >= self.end {
            return self.total_amount;
        }
        let elapsed = self.start.elapsed_since(t) as u128;
        let span = self.start.elapsed_since(self.end) as u128;
        // span > 0 here: t < end implies start < end
        self.total_amount * elapsed / span
    }

    /// Vested but not yet released.
    pub fn releasable(&self, t: Timestamp) -> u128 {
        self.vested_amount(t).saturating_sub(self.released_amount)
    }

    /// Fully released or revoked — no further mutation possible.
    pub fn is_terminal(&self) -> bool {
        self.revoked || self.released_amount == self.total_amount
    }
}
