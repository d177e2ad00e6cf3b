//! Domain events and the append-only log drained by the external indexer.

pub mod event;
pub mod log;

pub use event::{DomainEvent, EventRecord};
pub use log::EventLog;
