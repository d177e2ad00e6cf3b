//! The append-only event log.
//!
//! Delivery contract: at-least-once. `peek` returns undelivered records
//! without removing them; the indexer calls `ack` only after it has durably
//! consumed a batch, so a crash between the two redelivers. Records carry a
//! global monotonically increasing `seq`, which implies per-holder order.

use crate::event::{DomainEvent, EventRecord};
use acorn_types::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    next_seq: u64,
    buffer: VecDeque<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Undelivered record count.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Append one event stamped with the operation's timestamp. Returns the
    /// assigned sequence number.
    pub fn append(&mut self, event: DomainEvent, timestamp: Timestamp) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.buffer.push_back(EventRecord {
            seq,
            timestamp,
            event,
        });
        seq
    }

    /// Up to `limit` undelivered records, oldest first, left in place.
    pub fn peek(&self, limit: usize) -> Vec<EventRecord> {
        self.buffer.iter().take(limit).cloned().collect()
    }

    /// Discard records with `seq <= up_to`. Returns how many were dropped.
    pub fn ack(&mut self, up_to: u64) -> usize {
        let before = self.buffer.len();
        while self
            .buffer
            .front()
            .map(|record| record.seq <= up_to)
            .unwrap_or(false)
        {
            self.buffer.pop_front();
        }
        before - self.buffer.len()
    }
}
