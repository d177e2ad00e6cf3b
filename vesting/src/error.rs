//! Vesting-specific errors.

use acorn_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VestingError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("no vesting schedule exists for this beneficiary")]
    ScheduleNotFound,

    #[error("beneficiary already has an active vesting schedule")]
    ScheduleExists,

    #[error("vesting schedule has been revoked")]
    AlreadyRevoked,

    #[error("nothing is releasable at this time")]
    NothingToRelease,

    #[error("schedule is fully vested; nothing left to revoke")]
    NothingToRevoke,

    #[error("arithmetic overflow in vesting computation")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
