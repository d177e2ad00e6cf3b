use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] acorn_ledger::LedgerError),

    #[error("exchange error: {0}")]
    Exchange(#[from] acorn_exchange::ExchangeError),

    #[error("staking error: {0}")]
    Staking(#[from] acorn_staking::StakingError),

    #[error("vesting error: {0}")]
    Vesting(#[from] acorn_vesting::VestingError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("logging error: {0}")]
    Logging(String),
}
