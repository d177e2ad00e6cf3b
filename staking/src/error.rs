//! Staking-specific errors.

use acorn_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakingError {
    #[error("staking pool is not active")]
    PoolInactive,

    #[error("stake amount {amount} is below the minimum {minimum}")]
    BelowMinimumStake { amount: u128, minimum: u128 },

    #[error("insufficient staked amount: need {needed}, staked {available}")]
    InsufficientStaked { needed: u128, available: u128 },

    #[error("no rewards available to claim")]
    NoRewardsAvailable,

    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("reward rate change is invalid")]
    RateInvalid,

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
