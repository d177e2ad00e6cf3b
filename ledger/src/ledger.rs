//! Account balances and supply accounting.
//!
//! Every mutation updates balances and supply counters together or not at
//! all: preconditions and overflow are checked before the first write, so a
//! returned error means zero state change.

use crate::error::LedgerError;
use acorn_types::{AccountId, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-account balance pair. Created lazily on first credit and never
/// destroyed — a zero balance stays addressable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    pub acorn: u128,
    pub oak: u128,
}

impl Balances {
    pub fn get(&self, token: TokenKind) -> u128 {
        match token {
            TokenKind::Acorn => self.acorn,
            TokenKind::Oak => self.oak,
        }
    }

    fn get_mut(&mut self, token: TokenKind) -> &mut u128 {
        match token {
            TokenKind::Acorn => &mut self.acorn,
            TokenKind::Oak => &mut self.oak,
        }
    }
}

/// Cumulative mint/burn totals for one token kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyCounter {
    pub minted: u128,
    pub burned: u128,
}

impl SupplyCounter {
    /// `minted − burned`; the amount currently held across all accounts.
    pub fn circulating(&self) -> u128 {
        self.minted - self.burned
    }
}

/// The ledger core — holder balances and per-token supply counters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    accounts: HashMap<AccountId, Balances>,
    acorn_supply: SupplyCounter,
    oak_supply: SupplyCounter,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of one account in one token (zero if never credited).
    pub fn balance(&self, account: &AccountId, token: TokenKind) -> u128 {
        self.accounts
            .get(account)
            .map(|b| b.get(token))
            .unwrap_or(0)
    }

    /// Both balances of one account.
    pub fn balances(&self, account: &AccountId) -> Balances {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    pub fn supply(&self, token: TokenKind) -> &SupplyCounter {
        match token {
            TokenKind::Acorn => &self.acorn_supply,
            TokenKind::Oak => &self.oak_supply,
        }
    }

    fn supply_mut(&mut self, token: TokenKind) -> &mut SupplyCounter {
        match token {
            TokenKind::Acorn => &mut self.acorn_supply,
            TokenKind::Oak => &mut self.oak_supply,
        }
    }

    /// Cumulative amount ever minted for a token.
    pub fn total_minted(&self, token: TokenKind) -> u128 {
        self.supply(token).minted
    }

    /// Cumulative amount ever burned for a token.
    pub fn total_burned(&self, token: TokenKind) -> u128 {
        self.supply(token).burned
    }

    /// `minted − burned` for a token.
    pub fn circulating_supply(&self, token: TokenKind) -> u128 {
        self.supply(token).circulating()
    }

    // ── Precondition probes ──────────────────────────────────────────────
    // Compound operations (convert's burn+mint, staking's settle+transfer)
    // validate every step up front so the mutation sequence cannot fail
    // halfway through.

    /// Would `mint(token, to, amount)` succeed right now?
    pub fn ensure_can_mint(
        &self,
        token: TokenKind,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        self.supply(token)
            .minted
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balance(to, token)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Would `transfer(token, from, to, amount)` succeed right now?
    pub fn ensure_can_transfer(
        &self,
        token: TokenKind,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        let available = self.balance(from, token);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.balance(to, token)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Create `amount` of `token` in `to`'s account.
    ///
    /// Authorization of the *caller* is the facade's job (against the
    /// authority registry); engine-internal mints (exchange output, staking
    /// rewards) are component-authorized.
    pub fn mint(
        &mut self,
        token: TokenKind,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.ensure_can_mint(token, to, amount)?;
        self.supply_mut(token).minted += amount;
        *self
            .accounts
            .entry(to.clone())
            .or_default()
            .get_mut(token) += amount;
        Ok(())
    }

    /// Destroy `amount` of `token` from `from`'s account.
    pub fn burn(
        &mut self,
        token: TokenKind,
        from: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let available = self.balance(from, token);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.supply(token)
            .burned
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.supply_mut(token).burned += amount;
        *self
            .accounts
            .entry(from.clone())
            .or_default()
            .get_mut(token) -= amount;
        Ok(())
    }

    /// Move `amount` of `token` between two accounts.
    pub fn transfer(
        &mut self,
        token: TokenKind,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.ensure_can_transfer(token, from, to, amount)?;
        *self
            .accounts
            .entry(from.clone())
            .or_default()
            .get_mut(token) -= amount;
        *self
            .accounts
            .entry(to.clone())
            .or_default()
            .get_mut(token) += amount;
        Ok(())
    }

    // ── Audit ────────────────────────────────────────────────────────────

    /// Sum of one token's balance over every account (holders + escrows).
    pub fn balance_sum(&self, token: TokenKind) -> u128 {
        self.accounts.values().map(|b| b.get(token)).sum()
    }

    /// Verifies `Σ balances == minted − burned` for a token. Cheap enough
    /// to run after every operation in tests.
    pub fn supply_invariant_holds(&self, token: TokenKind) -> bool {
        self.balance_sum(token) == self.circulating_supply(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acorn_types::HolderAddress;

    fn holder(n: u8) -> AccountId {
        AccountId::Holder(HolderAddress::new(format!("acrn_{:0>40}", n)))
    }

    #[test]
    fn mint_credits_balance_and_supply() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &holder(1), 1000).unwrap();

        assert_eq!(ledger.balance(&holder(1), TokenKind::Acorn), 1000);
        assert_eq!(ledger.total_minted(TokenKind::Acorn), 1000);
        assert_eq!(ledger.circulating_supply(TokenKind::Acorn), 1000);
        assert_eq!(ledger.balance(&holder(1), TokenKind::Oak), 0);
        assert!(ledger.supply_invariant_holds(TokenKind::Acorn));
    }

    #[test]
    fn mint_zero_is_invalid() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.mint(TokenKind::Acorn, &holder(1), 0),
            Err(LedgerError::InvalidAmount)
        );
    }

    #[test]
    fn burn_debits_balance_and_counts() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &holder(1), 1000).unwrap();
        ledger.burn(TokenKind::Acorn, &holder(1), 400).unwrap();

        assert_eq!(ledger.balance(&holder(1), TokenKind::Acorn), 600);
        assert_eq!(ledger.total_burned(TokenKind::Acorn), 400);
        assert_eq!(ledger.circulating_supply(TokenKind::Acorn), 600);
        assert!(ledger.supply_invariant_holds(TokenKind::Acorn));
    }

    #[test]
    fn burn_more_than_balance_fails_cleanly() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &holder(1), 100).unwrap();

        let err = ledger.burn(TokenKind::Acorn, &holder(1), 150).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                needed: 150,
                available: 100
            }
        );
        // no partial mutation
        assert_eq!(ledger.balance(&holder(1), TokenKind::Acorn), 100);
        assert_eq!(ledger.total_burned(TokenKind::Acorn), 0);
    }

    #[test]
    fn transfer_moves_between_accounts() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Oak, &holder(1), 1000).unwrap();
        ledger
            .transfer(TokenKind::Oak, &holder(1), &holder(2), 250)
            .unwrap();

        assert_eq!(ledger.balance(&holder(1), TokenKind::Oak), 750);
        assert_eq!(ledger.balance(&holder(2), TokenKind::Oak), 250);
        assert!(ledger.supply_invariant_holds(TokenKind::Oak));
    }

    #[test]
    fn transfer_to_self_rejected() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &holder(1), 100).unwrap();
        assert_eq!(
            ledger.transfer(TokenKind::Acorn, &holder(1), &holder(1), 10),
            Err(LedgerError::SelfTransfer)
        );
    }

    #[test]
    fn transfer_into_escrow_keeps_invariant() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &holder(1), 500).unwrap();
        ledger
            .transfer(TokenKind::Acorn, &holder(1), &AccountId::StakingEscrow, 500)
            .unwrap();

        assert_eq!(ledger.balance(&AccountId::StakingEscrow, TokenKind::Acorn), 500);
        assert_eq!(ledger.circulating_supply(TokenKind::Acorn), 500);
        assert!(ledger.supply_invariant_holds(TokenKind::Acorn));
    }

    #[test]
    fn supplies_are_tracked_per_token() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &holder(1), 100).unwrap();
        ledger.mint(TokenKind::Oak, &holder(1), 777).unwrap();
        ledger.burn(TokenKind::Acorn, &holder(1), 30).unwrap();

        assert_eq!(ledger.circulating_supply(TokenKind::Acorn), 70);
        assert_eq!(ledger.circulating_supply(TokenKind::Oak), 777);
        for token in TokenKind::ALL {
            assert!(ledger.supply_invariant_holds(token));
        }
    }

    #[test]
    fn zero_balance_account_stays_addressable() {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &holder(1), 100).unwrap();
        ledger.burn(TokenKind::Acorn, &holder(1), 100).unwrap();
        assert_eq!(ledger.balance(&holder(1), TokenKind::Acorn), 0);
        assert_eq!(ledger.balances(&holder(1)), Balances::default());
    }
}
