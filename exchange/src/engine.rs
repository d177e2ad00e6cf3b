//! The exchange engine — ACN burns in, OAK mints out.

use crate::error::ExchangeError;
use acorn_ledger::Ledger;
use acorn_types::{AccountId, HolderAddress, TokenKind, RATE_SCALE};
use serde::{Deserialize, Serialize};

/// Receipt for one completed conversion.
///
/// Carries the rate in effect at conversion time so the emitted event stays
/// auditable regardless of later rate changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub burned: u128,
    pub minted: u128,
    pub rate: u128,
}

/// Aggregate conversion counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeStats {
    pub total_primary_converted: u128,
    pub total_derived_minted: u128,
}

/// Converts primary-token burns into derived-token mints at a stored
/// fixed-point rate (`RATE_SCALE`-scaled).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExchangeEngine {
    rate: u128,
    min_convert: u128,
    stats: ExchangeStats,
}

impl ExchangeEngine {
    /// Create an engine with an initial rate. The rate must be positive.
    pub fn new(rate: u128, min_convert: u128) -> Result<Self, ExchangeError> {
        if rate == 0 {
            return Err(ExchangeError::RateInvalid);
        }
        Ok(Self {
            rate,
            min_convert,
            stats: ExchangeStats::default(),
        })
    }

    /// The rate applied to the next conversion.
    pub fn rate(&self) -> u128 {
        self.rate
    }

    pub fn min_convert(&self) -> u128 {
        self.min_convert
    }

    pub fn stats(&self) -> &ExchangeStats {
        &self.stats
    }

    /// Change the rate for future conversions. Past conversions keep the
    /// rate recorded in their receipts/events.
    pub fn set_rate(&mut self, new_rate: u128) -> Result<u128, ExchangeError> {
        if new_rate == 0 {
            return Err(ExchangeError::RateInvalid);
        }
        let old = self.rate;
        self.rate = new_rate;
        Ok(old)
    }

    /// OAK raw output for a given ACN raw input at the current rate (floor).
    pub fn quote(&self, primary_amount: u128) -> Result<u128, ExchangeError> {
        primary_amount
            .checked_mul(self.rate)
            .map(|raw| raw / RATE_SCALE)
            .ok_or(ExchangeError::Overflow)
    }

    /// Burn `primary_amount` ACN from `holder` and mint the converted OAK
    /// back to the same holder, in one atomic step.
    ///
    /// Every precondition (minimum, balance, floor output, counter overflow)
    /// is validated before the first write, so the burn+mint pair cannot
    /// fail halfway.
    pub fn convert(
        &mut self,
        ledger: &mut Ledger,
        holder: &HolderAddress,
        primary_amount: u128,
    ) -> Result<Conversion, ExchangeError> {
        if primary_amount < self.min_convert {
            return Err(ExchangeError::InvalidAmount {
                amount: primary_amount,
                minimum: self.min_convert,
            });
        }
        let derived = self.quote(primary_amount)?;
        if derived == 0 {
            // a conversion that burns without minting is never accepted
            return Err(ExchangeError::InvalidAmount {
                amount: primary_amount,
                minimum: self.min_convert,
            });
        }

        let account = AccountId::Holder(holder.clone());
        let available = ledger.balance(&account, TokenKind::Acorn);
        if available < primary_amount {
            return Err(acorn_ledger::LedgerError::InsufficientBalance {
                needed: primary_amount,
                available,
            }
            .into());
        }
        ledger.ensure_can_mint(TokenKind::Oak, &account, derived)?;
        let converted = self
            .stats
            .total_primary_converted
            .checked_add(primary_amount)
            .ok_or(ExchangeError::Overflow)?;
        let minted = self
            .stats
            .total_derived_minted
            .checked_add(derived)
            .ok_or(ExchangeError::Overflow)?;

        ledger.burn(TokenKind::Acorn, &account, primary_amount)?;
        ledger.mint(TokenKind::Oak, &account, derived)?;
        self.stats.total_primary_converted = converted;
        self.stats.total_derived_minted = minted;

        Ok(Conversion {
            burned: primary_amount,
            minted: derived,
            rate: self.rate,
        })
    }
}
