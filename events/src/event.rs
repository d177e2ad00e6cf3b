//! Domain event kinds and records.

use acorn_types::{HolderAddress, Timestamp, TokenKind};
use serde::{Deserialize, Serialize};

/// One domain event per successful mutating operation.
///
/// Serialized with the variant name as the outer key, so the JSON export
/// carries the event kind and the bincode snapshot stays round-trippable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    Initialized {
        admin: HolderAddress,
    },
    Minted {
        to: HolderAddress,
        token: TokenKind,
        amount: u128,
    },
    Burned {
        holder: HolderAddress,
        token: TokenKind,
        amount: u128,
    },
    Transferred {
        from: HolderAddress,
        to: HolderAddress,
        token: TokenKind,
        amount: u128,
    },
    /// Records the rate in effect at conversion time; later rate changes
    /// never rewrite conversion history.
    Converted {
        holder: HolderAddress,
        primary_burned: u128,
        derived_minted: u128,
        rate: u128,
    },
    ExchangeRateChanged {
        old_rate: u128,
        new_rate: u128,
    },
    Staked {
        holder: HolderAddress,
        amount: u128,
        reward_settled: u128,
    },
    Unstaked {
        holder: HolderAddress,
        amount: u128,
        reward_settled: u128,
    },
    RewardsClaimed {
        holder: HolderAddress,
        amount: u128,
    },
    RewardBudgetAdded {
        amount: u128,
        new_rate: u128,
    },
    PoolStatusChanged {
        active: bool,
    },
    VestingCreated {
        creator: HolderAddress,
        beneficiary: HolderAddress,
        amount: u128,
        start: Timestamp,
        cliff: Timestamp,
        end: Timestamp,
    },
    VestingReleased {
        beneficiary: HolderAddress,
        amount: u128,
    },
    VestingRevoked {
        beneficiary: HolderAddress,
        reclaimed: u128,
    },
}

impl DomainEvent {
    /// The holder this event is primarily about, for per-holder delivery
    /// ordering checks. Admin-scoped events have no subject holder.
    pub fn subject(&self) -> Option<&HolderAddress> {
        match self {
            DomainEvent::Minted { to, .. } => Some(to),
            DomainEvent::Burned { holder, .. } => Some(holder),
            DomainEvent::Transferred { from, .. } => Some(from),
            DomainEvent::Converted { holder, .. } => Some(holder),
            DomainEvent::Staked { holder, .. } => Some(holder),
            DomainEvent::Unstaked { holder, .. } => Some(holder),
            DomainEvent::RewardsClaimed { holder, .. } => Some(holder),
            DomainEvent::VestingCreated { beneficiary, .. } => Some(beneficiary),
            DomainEvent::VestingReleased { beneficiary, .. } => Some(beneficiary),
            DomainEvent::VestingRevoked { beneficiary, .. } => Some(beneficiary),
            DomainEvent::Initialized { .. }
            | DomainEvent::ExchangeRateChanged { .. }
            | DomainEvent::RewardBudgetAdded { .. }
            | DomainEvent::PoolStatusChanged { .. } => None,
        }
    }
}

/// An event with its log position and operation timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u64,
    pub timestamp: Timestamp,
    pub event: DomainEvent,
}

impl EventRecord {
    /// NDJSON-friendly export for the indexing collaborator.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_export_carries_kind_and_fields() {
        let record = EventRecord {
            seq: 7,
            timestamp: Timestamp::new(1000),
            event: DomainEvent::Converted {
                holder: HolderAddress::new("acrn_h1"),
                primary_burned: 100,
                derived_minted: 1000,
                rate: 10_000_000,
            },
        };
        let json = record.to_json().unwrap();
        assert!(json.contains("\"Converted\""));
        assert!(json.contains("\"seq\":7"));
        assert!(json.contains("acrn_h1"));
    }

    #[test]
    fn subject_is_the_affected_holder() {
        let h = HolderAddress::new("acrn_h1");
        let event = DomainEvent::RewardsClaimed {
            holder: h.clone(),
            amount: 5,
        };
        assert_eq!(event.subject(), Some(&h));
        assert_eq!(
            DomainEvent::PoolStatusChanged { active: false }.subject(),
            None
        );
    }
}
