//! Ledger core: account balances, per-token supply counters, and the
//! authority registry that gates privileged mutation.

pub mod authority;
pub mod error;
pub mod ledger;

pub use authority::{AuthorityRecord, AuthorityRegistry, Capabilities, Capability};
pub use error::LedgerError;
pub use ledger::{Balances, Ledger, SupplyCounter};
