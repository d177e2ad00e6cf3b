//! Ledger and authority errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("transfer source and destination are the same account")]
    SelfTransfer,

    #[error("arithmetic overflow in ledger computation")]
    Overflow,

    #[error("caller {caller} lacks the required authority")]
    Unauthorized { caller: String },

    #[error("authority registry has not been initialized")]
    NotInitialized,

    #[error("authority registry is already initialized")]
    AlreadyInitialized,
}
