//! Grant creation, release, and revocation through the ledger.

use crate::error::VestingError;
use crate::schedule::VestingSchedule;
use acorn_ledger::Ledger;
use acorn_types::{AccountId, HolderAddress, Timestamp, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The vesting engine — one active schedule per beneficiary.
///
/// A new grant replaces a terminal (fully released or revoked) schedule; a
/// live one makes creation fail.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VestingEngine {
    schedules: HashMap<HolderAddress, VestingSchedule>,
    cliff_duration_secs: u64,
    vest_duration_secs: u64,
}

impl VestingEngine {
    pub fn new(cliff_duration_secs: u64, vest_duration_secs: u64) -> Self {
        Self {
            schedules: HashMap::new(),
            cliff_duration_secs,
            vest_duration_secs,
        }
    }

    pub fn schedule(&self, beneficiary: &HolderAddress) -> Option<&VestingSchedule> {
        self.schedules.get(beneficiary)
    }

    /// All schedules, for auditing the escrow balance.
    pub fn schedules(&self) -> impl Iterator<Item = &VestingSchedule> {
        self.schedules.values()
    }

    /// Sum still owed to beneficiaries (or reclaimable) across live
    /// schedules; equals the vesting escrow balance.
    pub fn escrowed_total(&self) -> u128 {
        self.schedules
            .values()
            .filter(|s| !s.revoked)
            .map(|s| s.total_amount - s.released_amount)
            .sum()
    }

    /// Escrow `amount` from the creator and open a schedule for the
    /// beneficiary starting at `now`. Returns the stored schedule.
    pub fn create(
        &mut self,
        ledger: &mut Ledger,
        creator: &HolderAddress,
        beneficiary: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<VestingSchedule, VestingError> {
        if amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        if let Some(existing) = self.schedules.get(beneficiary) {
            if !existing.is_terminal() {
                return Err(VestingError::ScheduleExists);
            }
        }
        // guarantees vested_amount's interpolation can never overflow
        amount
            .checked_mul(self.vest_duration_secs as u128)
            .ok_or(VestingError::Overflow)?;

        ledger.transfer(
            TokenKind::Acorn,
            &AccountId::Holder(creator.clone()),
            &AccountId::VestingEscrow,
            amount,
        )?;
        let schedule = VestingSchedule {
            beneficiary: beneficiary.clone(),
            total_amount: amount,
            released_amount: 0,
            start: now,
            cliff: now.add_secs(self.cliff_duration_secs),
            end: now.add_secs(self.vest_duration_secs),
            revoked: false,
        };
        self.schedules
            .insert(beneficiary.clone(), schedule.clone());
        Ok(schedule)
    }

    /// Pay out everything vested-but-unreleased at `now`.
    pub fn release(
        &mut self,
        ledger: &mut Ledger,
        beneficiary: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, VestingError> {
        let schedule = self
            .schedules
            .get(beneficiary)
            .ok_or(VestingError::ScheduleNotFound)?;
        if schedule.revoked {
            return Err(VestingError::AlreadyRevoked);
        }
        let releasable = schedule.releasable(now);
        if releasable == 0 {
            return Err(VestingError::NothingToRelease);
        }
        ledger.transfer(
            TokenKind::Acorn,
            &AccountId::VestingEscrow,
            &AccountId::Holder(beneficiary.clone()),
            releasable,
        )?;
        if let Some(schedule) = self.schedules.get_mut(beneficiary) {
            schedule.released_amount += releasable;
        }
        Ok(releasable)
    }

    /// Reclaim `total − released` to the treasury and terminate the
    /// schedule. Only possible before `end` — afterwards everything belongs
    /// to the beneficiary.
    pub fn revoke(
        &mut self,
        ledger: &mut Ledger,
        beneficiary: &HolderAddress,
        treasury: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, VestingError> {
        let schedule = self
            .schedules
            .get(beneficiary)
            .ok_or(VestingError::ScheduleNotFound)?;
        if schedule.revoked {
            return Err(VestingError::AlreadyRevoked);
        }
        if now >= schedule.end {
            return Err(VestingError::NothingToRevoke);
        }
        let remainder = schedule.total_amount - schedule.released_amount;
        if remainder > 0 {
            ledger.transfer(
                TokenKind::Acorn,
                &AccountId::VestingEscrow,
                &AccountId::Holder(treasury.clone()),
                remainder,
            )?;
        }
        if let Some(schedule) = self.schedules.get_mut(beneficiary) {
            schedule.revoked = true;
        }
        Ok(remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: u64 = 365 * 24 * 3600;

    fn test_address(n: u8) -> HolderAddress {
        HolderAddress::new(format!("acrn_{:0>40}", n))
    }

    fn funded(holder: &HolderAddress, amount: u128) -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .mint(TokenKind::Acorn, &AccountId::Holder(holder.clone()), amount)
            .unwrap();
        ledger
    }

    fn year_engine() -> VestingEngine {
        VestingEngine::new(YEAR, 5 * YEAR)
    }

    #[test]
    fn create_escrows_the_grant() {
        let creator = test_address(1);
        let beneficiary = test_address(2);
        let mut ledger = funded(&creator, 5000);
        let mut engine = year_engine();

        let schedule = engine
            .create(&mut ledger, &creator, &beneficiary, 5000, Timestamp::new(0))
            .unwrap();
        assert_eq!(schedule.cliff, Timestamp::new(YEAR));
        assert_eq!(schedule.end, Timestamp::new(5 * YEAR));

        assert_eq!(
            ledger.balance(&AccountId::Holder(creator), TokenKind::Acorn),
            0
        );
        assert_eq!(
            ledger.balance(&AccountId::VestingEscrow, TokenKind::Acorn),
            5000
        );
        assert_eq!(engine.escrowed_total(), 5000);
        assert!(ledger.supply_invariant_holds(TokenKind::Acorn));
    }

    #[test]
    fn cliff_then_linear_then_full_release() {
        // total 5000, cliff 1y, end 5y — the release staircase from the
        // whitepaper example
        let creator = test_address(1);
        let beneficiary = test_address(2);
        let mut ledger = funded(&creator, 5000);
        let mut engine = year_engine();
        engine
            .create(&mut ledger, &creator, &beneficiary, 5000, Timestamp::new(0))
            .unwrap();

        assert_eq!(
            engine.release(&mut ledger, &beneficiary, Timestamp::new(YEAR - 1)),
            Err(VestingError::NothingToRelease)
        );

        let at_cliff = engine
            .release(&mut ledger, &beneficiary, Timestamp::new(YEAR))
            .unwrap();
        assert_eq!(at_cliff, 1000); // 1/5 of the curve already elapsed

        let at_end = engine
            .release(&mut ledger, &beneficiary, Timestamp::new(5 * YEAR))
            .unwrap();
        assert_eq!(at_end, 4000);

        assert_eq!(
            engine.release(&mut ledger, &beneficiary, Timestamp::new(6 * YEAR)),
            Err(VestingError::NothingToRelease)
        );
        assert_eq!(
            ledger.balance(&AccountId::Holder(beneficiary), TokenKind::Acorn),
            5000
        );
        assert_eq!(engine.escrowed_total(), 0);
    }

    #[test]
    fn release_is_never_double_paid() {
        let creator = test_address(1);
        let beneficiary = test_address(2);
        let mut ledger = funded(&creator, 5000);
        let mut engine = year_engine();
        engine
            .create(&mut ledger, &creator, &beneficiary, 5000, Timestamp::new(0))
            .unwrap();

        engine
            .release(&mut ledger, &beneficiary, Timestamp::new(2 * YEAR))
            .unwrap();
        assert_eq!(
            engine.release(&mut ledger, &beneficiary, Timestamp::new(2 * YEAR)),
            Err(VestingError::NothingToRelease)
        );
    }

    #[test]
    fn create_requires_funds_and_nonzero_amount() {
        let creator = test_address(1);
        let beneficiary = test_address(2);
        let mut ledger = funded(&creator, 100);
        let mut engine = year_engine();

        assert_eq!(
            engine.create(&mut ledger, &creator, &beneficiary, 0, Timestamp::new(0)),
            Err(VestingError::InvalidAmount)
        );
        assert!(matches!(
            engine.create(&mut ledger, &creator, &beneficiary, 500, Timestamp::new(0)),
            Err(VestingError::Ledger(_))
        ));
        assert_eq!(engine.schedule(&beneficiary), None);
    }

    #[test]
    fn one_live_schedule_per_beneficiary() {
        let creator = test_address(1);
        let beneficiary = test_address(2);
        let mut ledger = funded(&creator, 10_000);
        let mut engine = year_engine();

        engine
            .create(&mut ledger, &creator, &beneficiary, 1000, Timestamp::new(0))
            .unwrap();
        assert_eq!(
            engine.create(&mut ledger, &creator, &beneficiary, 1000, Timestamp::new(10)),
            Err(VestingError::ScheduleExists)
        );

        // a fully released schedule can be replaced
        engine
            .release(&mut ledger, &beneficiary, Timestamp::new(5 * YEAR))
            .unwrap();
        let replacement = engine
            .create(
                &mut ledger,
                &creator,
                &beneficiary,
                2000,
                Timestamp::new(5 * YEAR),
            )
            .unwrap();
        assert_eq!(replacement.total_amount, 2000);
        assert_eq!(replacement.released_amount, 0);
    }

    #[test]
    fn revoke_reclaims_the_remainder() {
        let creator = test_address(1);
        let beneficiary = test_address(2);
        let treasury = test_address(3);
        let mut ledger = funded(&creator, 5000);
        let mut engine = year_engine();
        engine
            .create(&mut ledger, &creator, &beneficiary, 5000, Timestamp::new(0))
            .unwrap();

        engine
            .release(&mut ledger, &beneficiary, Timestamp::new(YEAR))
            .unwrap(); // 1000 out
        let reclaimed = engine
            .revoke(&mut ledger, &beneficiary, &treasury, Timestamp::new(2 * YEAR))
            .unwrap();
        assert_eq!(reclaimed, 4000);
        assert_eq!(
            ledger.balance(&AccountId::Holder(treasury.clone()), TokenKind::Acorn),
            4000
        );
        assert!(engine.schedule(&beneficiary).unwrap().revoked);
        assert_eq!(engine.escrowed_total(), 0);

        // terminal: no further release or revoke
        assert_eq!(
            engine.release(&mut ledger, &beneficiary, Timestamp::new(3 * YEAR)),
            Err(VestingError::AlreadyRevoked)
        );
        assert_eq!(
            engine.revoke(&mut ledger, &beneficiary, &treasury, Timestamp::new(3 * YEAR)),
            Err(VestingError::AlreadyRevoked)
        );
    }

    #[test]
    fn revoke_after_end_is_rejected() {
        let creator = test_address(1);
        let beneficiary = test_address(2);
        let treasury = test_address(3);
        let mut ledger = funded(&creator, 5000);
        let mut engine = year_engine();
        engine
            .create(&mut ledger, &creator, &beneficiary, 5000, Timestamp::new(0))
            .unwrap();

        assert_eq!(
            engine.revoke(&mut ledger, &beneficiary, &treasury, Timestamp::new(5 * YEAR)),
            Err(VestingError::NothingToRevoke)
        );
    }

    #[test]
    fn revoke_of_unknown_beneficiary_fails() {
        let mut ledger = Ledger::new();
        let mut engine = year_engine();
        assert_eq!(
            engine.revoke(
                &mut ledger,
                &test_address(2),
                &test_address(3),
                Timestamp::new(0)
            ),
            Err(VestingError::ScheduleNotFound)
        );
        assert_eq!(
            engine.release(&mut ledger, &test_address(2), Timestamp::new(0)),
            Err(VestingError::ScheduleNotFound)
        );
    }
}
