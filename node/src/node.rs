//! The serializing operation surface.
//!
//! One `Node` owns the ledger, the authority registry, the three engines,
//! and the event log. The environment guarantees one mutating call at a
//! time; each call reads the clock once, validates authority and
//! preconditions before any mutation, and appends exactly one domain event
//! on success.

use std::sync::Arc;

use acorn_events::{DomainEvent, EventLog, EventRecord};
use acorn_exchange::{Conversion, ExchangeEngine, ExchangeStats};
use acorn_ledger::{AuthorityRegistry, Balances, Capability, Ledger};
use acorn_staking::{PoolState, StakerCheckpoint, StakingEngine};
use acorn_types::{AccountId, Clock, HolderAddress, TokenKind};
use acorn_vesting::{VestingEngine, VestingSchedule};

use crate::config::NodeConfig;
use crate::error::NodeError;

pub struct Node {
    clock: Arc<dyn Clock>,
    event_batch_size: usize,
    ledger: Ledger,
    authority: AuthorityRegistry,
    exchange: ExchangeEngine,
    staking: StakingEngine,
    vesting: VestingEngine,
    events: EventLog,
}

impl Node {
    /// Build a node from configuration. Staking accrual starts at the
    /// clock's current time.
    pub fn new(config: NodeConfig, clock: Arc<dyn Clock>) -> Result<Self, NodeError> {
        let genesis = clock.now();
        let exchange =
            ExchangeEngine::new(config.params.exchange_rate, config.params.min_convert)?;
        let staking = StakingEngine::new(&config.params, genesis);
        let vesting = VestingEngine::new(
            config.params.cliff_duration_secs,
            config.params.vest_duration_secs,
        );
        Ok(Self {
            clock,
            event_batch_size: config.event_batch_size,
            ledger: Ledger::new(),
            authority: AuthorityRegistry::new(),
            exchange,
            staking,
            vesting,
            events: EventLog::new(),
        })
    }

    /// Issue the authority record. Exactly once per deployment.
    pub fn init(&mut self, admin: HolderAddress) -> Result<(), NodeError> {
        let now = self.clock.now();
        self.authority.init(admin.clone())?;
        tracing::info!(admin = %admin, "authority registry initialized");
        self.events.append(DomainEvent::Initialized { admin }, now);
        Ok(())
    }

    // ── Ledger operations ────────────────────────────────────────────────

    /// Mint ACN to a holder. Requires the minting capability; OAK is never
    /// minted directly (it exists only through conversion).
    pub fn mint(
        &mut self,
        caller: &HolderAddress,
        to: &HolderAddress,
        amount: u128,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        self.authority.require(caller, Capability::Mint)?;
        self.ledger
            .mint(TokenKind::Acorn, &AccountId::Holder(to.clone()), amount)?;
        tracing::debug!(to = %to, amount, "minted ACN");
        self.events.append(
            DomainEvent::Minted {
                to: to.clone(),
                token: TokenKind::Acorn,
                amount,
            },
            now,
        );
        Ok(())
    }

    /// Burn a holder's own tokens.
    pub fn burn(
        &mut self,
        holder: &HolderAddress,
        token: TokenKind,
        amount: u128,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        self.ledger
            .burn(token, &AccountId::Holder(holder.clone()), amount)?;
        tracing::debug!(holder = %holder, %token, amount, "burned");
        self.events.append(
            DomainEvent::Burned {
                holder: holder.clone(),
                token,
                amount,
            },
            now,
        );
        Ok(())
    }

    /// Transfer between two holders.
    pub fn transfer(
        &mut self,
        from: &HolderAddress,
        to: &HolderAddress,
        token: TokenKind,
        amount: u128,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        self.ledger.transfer(
            token,
            &AccountId::Holder(from.clone()),
            &AccountId::Holder(to.clone()),
            amount,
        )?;
        tracing::debug!(from = %from, to = %to, %token, amount, "transferred");
        self.events.append(
            DomainEvent::Transferred {
                from: from.clone(),
                to: to.clone(),
                token,
                amount,
            },
            now,
        );
        Ok(())
    }

    // ── Exchange operations ──────────────────────────────────────────────

    /// Burn ACN, mint OAK at the current rate. One atomic step.
    pub fn convert(
        &mut self,
        holder: &HolderAddress,
        primary_amount: u128,
    ) -> Result<Conversion, NodeError> {
        let now = self.clock.now();
        let conversion = self
            .exchange
            .convert(&mut self.ledger, holder, primary_amount)?;
        tracing::debug!(
            holder = %holder,
            burned = conversion.burned,
            minted = conversion.minted,
            rate = conversion.rate,
            "converted ACN to OAK"
        );
        self.events.append(
            DomainEvent::Converted {
                holder: holder.clone(),
                primary_burned: conversion.burned,
                derived_minted: conversion.minted,
                rate: conversion.rate,
            },
            now,
        );
        Ok(conversion)
    }

    /// Change the exchange rate for future conversions. Admin-only.
    pub fn set_exchange_rate(
        &mut self,
        caller: &HolderAddress,
        new_rate: u128,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        self.authority.require(caller, Capability::SetRate)?;
        let old_rate = self.exchange.set_rate(new_rate)?;
        tracing::info!(old_rate, new_rate, "exchange rate changed");
        self.events
            .append(DomainEvent::ExchangeRateChanged { old_rate, new_rate }, now);
        Ok(())
    }

    // ── Staking operations ───────────────────────────────────────────────

    pub fn stake(&mut self, holder: &HolderAddress, amount: u128) -> Result<(), NodeError> {
        let now = self.clock.now();
        let receipt = self.staking.stake(&mut self.ledger, holder, amount, now)?;
        tracing::debug!(
            holder = %holder,
            amount,
            reward_settled = receipt.reward_settled,
            "staked"
        );
        self.events.append(
            DomainEvent::Staked {
                holder: holder.clone(),
                amount,
                reward_settled: receipt.reward_settled,
            },
            now,
        );
        Ok(())
    }

    pub fn unstake(&mut self, holder: &HolderAddress, amount: u128) -> Result<(), NodeError> {
        let now = self.clock.now();
        let receipt = self.staking.unstake(&mut self.ledger, holder, amount, now)?;
        tracing::debug!(
            holder = %holder,
            amount,
            reward_settled = receipt.reward_settled,
            "unstaked"
        );
        self.events.append(
            DomainEvent::Unstaked {
                holder: holder.clone(),
                amount,
                reward_settled: receipt.reward_settled,
            },
            now,
        );
        Ok(())
    }

    pub fn claim_rewards(&mut self, holder: &HolderAddress) -> Result<u128, NodeError> {
        let now = self.clock.now();
        let amount = self.staking.claim_rewards(&mut self.ledger, holder, now)?;
        tracing::debug!(holder = %holder, amount, "claimed rewards");
        self.events.append(
            DomainEvent::RewardsClaimed {
                holder: holder.clone(),
                amount,
            },
            now,
        );
        Ok(amount)
    }

    /// Fold a reward budget into the pool's emission rate. Admin-only.
    pub fn add_reward_budget(
        &mut self,
        caller: &HolderAddress,
        amount: u128,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        self.authority.require(caller, Capability::FundRewards)?;
        let new_rate = self.staking.add_reward_budget(amount, now)?;
        tracing::info!(amount, new_rate, "reward budget added");
        self.events
            .append(DomainEvent::RewardBudgetAdded { amount, new_rate }, now);
        Ok(())
    }

    /// Pause or resume stake entry. Admin-only.
    pub fn set_pool_active(
        &mut self,
        caller: &HolderAddress,
        active: bool,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        self.authority.require(caller, Capability::ManagePool)?;
        self.staking.set_active(active);
        tracing::info!(active, "pool status changed");
        self.events
            .append(DomainEvent::PoolStatusChanged { active }, now);
        Ok(())
    }

    // ── Vesting operations ───────────────────────────────────────────────

    /// Escrow a grant for `beneficiary`, vesting from now.
    pub fn create_vesting(
        &mut self,
        creator: &HolderAddress,
        beneficiary: &HolderAddress,
        amount: u128,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        let schedule = self
            .vesting
            .create(&mut self.ledger, creator, beneficiary, amount, now)?;
        let (start, cliff, end) = (schedule.start, schedule.cliff, schedule.end);
        tracing::debug!(
            creator = %creator,
            beneficiary = %beneficiary,
            amount,
            "vesting schedule created"
        );
        self.events.append(
            DomainEvent::VestingCreated {
                creator: creator.clone(),
                beneficiary: beneficiary.clone(),
                amount,
                start,
                cliff,
                end,
            },
            now,
        );
        Ok(())
    }

    /// Release everything vested-but-unreleased to the beneficiary.
    pub fn release_vested(&mut self, beneficiary: &HolderAddress) -> Result<u128, NodeError> {
        let now = self.clock.now();
        let amount = self.vesting.release(&mut self.ledger, beneficiary, now)?;
        tracing::debug!(beneficiary = %beneficiary, amount, "vested amount released");
        self.events.append(
            DomainEvent::VestingReleased {
                beneficiary: beneficiary.clone(),
                amount,
            },
            now,
        );
        Ok(amount)
    }

    /// Revoke a schedule, reclaiming the unreleased remainder to the
    /// admin's account. Admin-only.
    pub fn revoke_vesting(
        &mut self,
        caller: &HolderAddress,
        beneficiary: &HolderAddress,
    ) -> Result<u128, NodeError> {
        let now = self.clock.now();
        self.authority.require(caller, Capability::RevokeVesting)?;
        let treasury = self.authority.admin()?.clone();
        let reclaimed = self
            .vesting
            .revoke(&mut self.ledger, beneficiary, &treasury, now)?;
        tracing::info!(beneficiary = %beneficiary, reclaimed, "vesting schedule revoked");
        self.events.append(
            DomainEvent::VestingRevoked {
                beneficiary: beneficiary.clone(),
                reclaimed,
            },
            now,
        );
        Ok(reclaimed)
    }

    // ── Read-only queries ────────────────────────────────────────────────

    /// Both token balances of a holder.
    pub fn balance_of(&self, holder: &HolderAddress) -> Balances {
        self.ledger.balances(&AccountId::Holder(holder.clone()))
    }

    /// Cumulative minted amount for a token.
    pub fn total_supply(&self, token: TokenKind) -> u128 {
        self.ledger.total_minted(token)
    }

    /// `minted − burned` for a token.
    pub fn circulating_supply(&self, token: TokenKind) -> u128 {
        self.ledger.circulating_supply(token)
    }

    pub fn pool_stats(&self) -> PoolState {
        *self.staking.pool()
    }

    pub fn staker_info(&self, holder: &HolderAddress) -> Option<StakerCheckpoint> {
        self.staking.staker(holder).copied()
    }

    pub fn vesting_info(&self, beneficiary: &HolderAddress) -> Option<VestingSchedule> {
        self.vesting.schedule(beneficiary).cloned()
    }

    /// Reward claimable right now. Pure — does not advance the pool.
    pub fn calculate_rewards(&self, holder: &HolderAddress) -> Result<u128, NodeError> {
        let now = self.clock.now();
        Ok(self.staking.calculate_rewards(holder, now)?)
    }

    pub fn exchange_rate(&self) -> u128 {
        self.exchange.rate()
    }

    pub fn exchange_stats(&self) -> ExchangeStats {
        *self.exchange.stats()
    }

    // ── Event drain (indexing collaborator) ──────────────────────────────

    /// Undelivered events, oldest first, left in place until acked.
    pub fn pending_events(&self, limit: usize) -> Vec<EventRecord> {
        self.events.peek(limit)
    }

    /// One indexer batch, sized by the configured `event_batch_size`.
    pub fn next_event_batch(&self) -> Vec<EventRecord> {
        self.events.peek(self.event_batch_size)
    }

    /// Acknowledge delivery of every event with `seq <= up_to`.
    pub fn ack_events(&mut self, up_to: u64) -> usize {
        self.events.ack(up_to)
    }

    // snapshot/restore internals live in the snapshot module
    pub(crate) fn components(
        &self,
    ) -> (
        &Ledger,
        &AuthorityRegistry,
        &ExchangeEngine,
        &StakingEngine,
        &VestingEngine,
        &EventLog,
    ) {
        (
            &self.ledger,
            &self.authority,
            &self.exchange,
            &self.staking,
            &self.vesting,
            &self.events,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_components(
        clock: Arc<dyn Clock>,
        event_batch_size: usize,
        ledger: Ledger,
        authority: AuthorityRegistry,
        exchange: ExchangeEngine,
        staking: StakingEngine,
        vesting: VestingEngine,
        events: EventLog,
    ) -> Self {
        Self {
            clock,
            event_batch_size,
            ledger,
            authority,
            exchange,
            staking,
            vesting,
            events,
        }
    }
}
