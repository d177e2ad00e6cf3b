//! Fundamental types for the acorn protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: holder addresses, ledger account ids, token kinds, timestamps,
//! the clock seam, and protocol parameters.

pub mod address;
pub mod amount;
pub mod params;
pub mod time;

pub use address::{AccountId, HolderAddress};
pub use amount::{TokenKind, RATE_SCALE, UNIT};
pub use params::ProtocolParams;
pub use time::{Clock, SystemClock, Timestamp};
