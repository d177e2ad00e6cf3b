//! Whole-node state snapshots.
//!
//! The engine keeps no on-disk store; the surrounding infrastructure
//! persists an opaque bincode snapshot and hands it back at restart.

use std::sync::Arc;

use acorn_events::EventLog;
use acorn_exchange::ExchangeEngine;
use acorn_ledger::{AuthorityRegistry, Ledger};
use acorn_staking::StakingEngine;
use acorn_types::Clock;
use acorn_vesting::VestingEngine;
use serde::{Deserialize, Serialize};

use crate::error::NodeError;
use crate::node::Node;

/// Serialized form of every stateful component, including undelivered
/// events (so a restart cannot lose at-least-once delivery).
#[derive(Serialize, Deserialize)]
struct NodeSnapshot {
    ledger: Ledger,
    authority: AuthorityRegistry,
    exchange: ExchangeEngine,
    staking: StakingEngine,
    vesting: VestingEngine,
    events: EventLog,
}

impl Node {
    /// Serialize the full node state.
    pub fn snapshot(&self) -> Result<Vec<u8>, NodeError> {
        let (ledger, authority, exchange, staking, vesting, events) = self.components();
        let snapshot = NodeSnapshot {
            ledger: ledger.clone(),
            authority: authority.clone(),
            exchange: exchange.clone(),
            staking: staking.clone(),
            vesting: vesting.clone(),
            events: events.clone(),
        };
        bincode::serialize(&snapshot).map_err(|e| NodeError::Snapshot(e.to_string()))
    }

    /// Rebuild a node from a snapshot taken by [`Node::snapshot`]. The
    /// config supplies the non-state settings (batch size, logging).
    pub fn restore(
        config: &crate::config::NodeConfig,
        bytes: &[u8],
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NodeError> {
        let snapshot: NodeSnapshot =
            bincode::deserialize(bytes).map_err(|e| NodeError::Snapshot(e.to_string()))?;
        Ok(Node::from_components(
            clock,
            config.event_batch_size,
            snapshot.ledger,
            snapshot.authority,
            snapshot.exchange,
            snapshot.staking,
            snapshot.vesting,
            snapshot.events,
        ))
    }
}
