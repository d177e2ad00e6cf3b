//! Time-locked vesting grants with a cliff and linear release.

pub mod engine;
pub mod error;
pub mod schedule;

pub use engine::VestingEngine;
pub use error::VestingError;
pub use schedule::VestingSchedule;
