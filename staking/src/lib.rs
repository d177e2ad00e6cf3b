//! Staking accrual engine.
//!
//! Yield is distributed with a single monotonically increasing
//! accumulated-reward-per-share counter, giving O(1) fair reward computation
//! per staker without iterating the pool.

pub mod engine;
pub mod error;
pub mod pool;

pub use engine::{StakeReceipt, StakingEngine, UnstakeReceipt};
pub use error::StakingError;
pub use pool::{PoolState, StakerCheckpoint, REWARD_PRECISION, SECONDS_PER_YEAR};
