//! Exchange-specific errors.

use acorn_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("conversion amount {amount} is below the minimum {minimum}")]
    InvalidAmount { amount: u128, minimum: u128 },

    #[error("exchange rate must be positive")]
    RateInvalid,

    #[error("arithmetic overflow in conversion")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
