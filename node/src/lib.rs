//! The acorn node — the single serializing execution environment around the
//! ledger core, exchange, staking, and vesting engines.
//!
//! Every external operation enters through [`Node`]: authority and
//! preconditions are validated, state is mutated atomically, one domain
//! event is appended, and a typed result is returned. The surrounding
//! infrastructure (API layer, auth, indexing) lives outside this crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod snapshot;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::Node;
