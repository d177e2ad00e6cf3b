//! Stake/unstake/claim operations over the pool and checkpoint state.
//!
//! Every operation validates all preconditions and computes every new value
//! with checked arithmetic before the first write, so a returned error means
//! zero state change — in this engine and in the ledger.

use crate::error::StakingError;
use crate::pool::{PoolState, StakerCheckpoint};
use acorn_ledger::Ledger;
use acorn_types::{AccountId, HolderAddress, ProtocolParams, Timestamp, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of a stake operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeReceipt {
    pub staked: u128,
    /// Pending reward settled (minted to the holder) before the stake basis
    /// changed. Attribution is never discarded by a restake.
    pub reward_settled: u128,
}

/// Outcome of an unstake operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnstakeReceipt {
    pub unstaked: u128,
    pub reward_settled: u128,
}

/// The staking engine — one pool, one checkpoint per holder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingEngine {
    pool: PoolState,
    stakers: HashMap<HolderAddress, StakerCheckpoint>,
    min_stake: u128,
    reward_horizon_secs: u64,
    max_apy_bps: u32,
}

impl StakingEngine {
    pub fn new(params: &ProtocolParams, genesis: Timestamp) -> Self {
        Self {
            pool: PoolState::new(params.reward_rate_per_second, genesis),
            stakers: HashMap::new(),
            min_stake: params.min_stake,
            reward_horizon_secs: params.reward_horizon_secs,
            max_apy_bps: params.max_apy_bps,
        }
    }

    pub fn pool(&self) -> &PoolState {
        &self.pool
    }

    pub fn staker(&self, holder: &HolderAddress) -> Option<&StakerCheckpoint> {
        self.stakers.get(holder)
    }

    /// All checkpoints, for auditing `total_staked == Σ staked_amount`.
    pub fn checkpoints(&self) -> impl Iterator<Item = (&HolderAddress, &StakerCheckpoint)> {
        self.stakers.iter()
    }

    /// Pause or resume stake entry. Unstake and claim stay available while
    /// paused so no funds are ever trapped.
    pub fn set_active(&mut self, active: bool) {
        self.pool.active = active;
    }

    /// Add `amount` to the holder's stake, settling any pending reward
    /// first.
    pub fn stake(
        &mut self,
        ledger: &mut Ledger,
        holder: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<StakeReceipt, StakingError> {
        if !self.pool.active {
            return Err(StakingError::PoolInactive);
        }
        if amount < self.min_stake {
            return Err(StakingError::BelowMinimumStake {
                amount,
                minimum: self.min_stake,
            });
        }
        let account = AccountId::Holder(holder.clone());
        ledger.ensure_can_transfer(TokenKind::Acorn, &account, &AccountId::StakingEscrow, amount)?;

        let acc = self.pool.projected_acc(now)?;
        let existing = self.stakers.get(holder).copied();
        let pending = match &existing {
            Some(ckpt) => ckpt.pending_at(acc)?,
            None => 0,
        };
        if pending > 0 {
            ledger.ensure_can_mint(TokenKind::Acorn, &account, pending)?;
        }
        let new_staked = existing
            .map(|c| c.staked_amount)
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let new_total = self
            .pool
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let new_claimed = existing
            .map(|c| c.claimed_total)
            .unwrap_or(0)
            .checked_add(pending)
            .ok_or(StakingError::Overflow)?;
        let new_distributed = self
            .pool
            .total_distributed
            .checked_add(pending)
            .ok_or(StakingError::Overflow)?;
        let entering = existing.map(|c| c.staked_amount).unwrap_or(0) == 0;

        // commit — everything below was validated above
        self.pool.commit_acc(acc, now);
        if pending > 0 {
            ledger.mint(TokenKind::Acorn, &account, pending)?;
        }
        ledger.transfer(TokenKind::Acorn, &account, &AccountId::StakingEscrow, amount)?;
        self.stakers.insert(
            holder.clone(),
            StakerCheckpoint {
                staked_amount: new_staked,
                reward_per_share_paid: acc,
                claimed_total: new_claimed,
            },
        );
        self.pool.total_staked = new_total;
        self.pool.total_distributed = new_distributed;
        if entering {
            self.pool.staker_count += 1;
        }

        Ok(StakeReceipt {
            staked: amount,
            reward_settled: pending,
        })
    }

    /// Return `amount` of principal to the holder, settling pending reward
    /// first. The checkpoint survives at zero stake.
    pub fn unstake(
        &mut self,
        ledger: &mut Ledger,
        holder: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<UnstakeReceipt, StakingError> {
        if amount == 0 {
            return Err(StakingError::InvalidAmount);
        }
        let existing = self.stakers.get(holder).copied();
        let staked = existing.map(|c| c.staked_amount).unwrap_or(0);
        if staked < amount {
            return Err(StakingError::InsufficientStaked {
                needed: amount,
                available: staked,
            });
        }
        let ckpt = existing.unwrap_or_default();
        let account = AccountId::Holder(holder.clone());
        ledger.ensure_can_transfer(TokenKind::Acorn, &AccountId::StakingEscrow, &account, amount)?;

        let acc = self.pool.projected_acc(now)?;
        let pending = ckpt.pending_at(acc)?;
        if pending > 0 {
            ledger.ensure_can_mint(TokenKind::Acorn, &account, pending)?;
        }
        let new_staked = staked - amount;
        let new_total = self
            .pool
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::Overflow)?;
        let new_claimed = ckpt
            .claimed_total
            .checked_add(pending)
            .ok_or(StakingError::Overflow)?;
        let new_distributed = self
            .pool
            .total_distributed
            .checked_add(pending)
            .ok_or(StakingError::Overflow)?;

        // commit
        self.pool.commit_acc(acc, now);
        if pending > 0 {
            ledger.mint(TokenKind::Acorn, &account, pending)?;
        }
        ledger.transfer(TokenKind::Acorn, &AccountId::StakingEscrow, &account, amount)?;
        self.stakers.insert(
            holder.clone(),
            StakerCheckpoint {
                staked_amount: new_staked,
                reward_per_share_paid: acc,
                claimed_total: new_claimed,
            },
        );
        self.pool.total_staked = new_total;
        self.pool.total_distributed = new_distributed;
        if new_staked == 0 {
            self.pool.staker_count -= 1;
        }

        Ok(UnstakeReceipt {
            unstaked: amount,
            reward_settled: pending,
        })
    }

    /// Reward the holder could claim at `now`. Pure: repeated calls return
    /// the same value, and it equals what `claim_rewards` would pay.
    pub fn calculate_rewards(
        &self,
        holder: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, StakingError> {
        match self.stakers.get(holder) {
            Some(ckpt) => ckpt.pending_at(self.pool.projected_acc(now)?),
            None => Ok(0),
        }
    }

    /// Mint the holder's accrued reward and advance its checkpoint.
    pub fn claim_rewards(
        &mut self,
        ledger: &mut Ledger,
        holder: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, StakingError> {
        let ckpt = self.stakers.get(holder).copied().unwrap_or_default();
        let acc = self.pool.projected_acc(now)?;
        let pending = ckpt.pending_at(acc)?;
        if pending == 0 {
            return Err(StakingError::NoRewardsAvailable);
        }
        let account = AccountId::Holder(holder.clone());
        ledger.ensure_can_mint(TokenKind::Acorn, &account, pending)?;
        let new_claimed = ckpt
            .claimed_total
            .checked_add(pending)
            .ok_or(StakingError::Overflow)?;
        let new_distributed = self
            .pool
            .total_distributed
            .checked_add(pending)
            .ok_or(StakingError::Overflow)?;

        // commit
        self.pool.commit_acc(acc, now);
        ledger.mint(TokenKind::Acorn, &account, pending)?;
        self.stakers.insert(
            holder.clone(),
            StakerCheckpoint {
                staked_amount: ckpt.staked_amount,
                reward_per_share_paid: acc,
                claimed_total: new_claimed,
            },
        );
        self.pool.total_distributed = new_distributed;

        Ok(pending)
    }

    /// Fold a reward budget into the emission rate.
    ///
    /// Accrual up to `now` uses the old rate; the increased rate applies
    /// from `now` on. The resulting rate is clamped so the pool's implied
    /// APY never exceeds the configured ceiling. An empty pool rejects the
    /// budget — there is no stake to attribute it to.
    pub fn add_reward_budget(
        &mut self,
        extra: u128,
        now: Timestamp,
    ) -> Result<u128, StakingError> {
        if extra == 0 {
            return Err(StakingError::InvalidAmount);
        }
        if self.pool.total_staked == 0 {
            return Err(StakingError::RateInvalid);
        }
        let acc = self.pool.projected_acc(now)?;
        let denom = self
            .pool
            .total_staked
            .checked_mul(self.reward_horizon_secs as u128)
            .ok_or(StakingError::Overflow)?;
        let delta = extra
            .checked_mul(crate::pool::REWARD_PRECISION)
            .ok_or(StakingError::Overflow)?
            / denom;
        let uncapped = self
            .pool
            .reward_rate_per_second
            .checked_add(delta)
            .ok_or(StakingError::Overflow)?;
        let new_rate = uncapped.min(self.pool.rate_ceiling(self.max_apy_bps));

        // commit
        self.pool.commit_acc(acc, now);
        self.pool.reward_rate_per_second = new_rate;
        Ok(new_rate)
    }
}
