//! Burn-to-mint exchange between the primary and derived tokens.

pub mod engine;
pub mod error;

pub use engine::{Conversion, ExchangeEngine, ExchangeStats};
pub use error::ExchangeError;
