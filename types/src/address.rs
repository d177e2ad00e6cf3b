//! Holder addresses and ledger account ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An acorn holder address, always prefixed with `acrn_`.
///
/// Resolved by the external auth collaborator; the engine treats it as an
/// opaque identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderAddress(String);

impl HolderAddress {
    /// The standard prefix for all acorn holder addresses.
    pub const PREFIX: &'static str = "acrn_";

    /// Create a new holder address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `acrn_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with acrn_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for HolderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HolderAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A ledger account: either an external holder or a module-owned escrow.
///
/// Escrow accounts hold staked principal and unreleased grants. Keeping them
/// inside the ledger's account map means the supply invariant
/// (`Σ balances == minted − burned`) holds without special cases.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountId {
    /// An externally owned account.
    Holder(HolderAddress),
    /// Principal held in custody by the staking pool.
    StakingEscrow,
    /// Unreleased grant amounts held by the vesting engine.
    VestingEscrow,
}

impl AccountId {
    /// The holder address, if this is an externally owned account.
    pub fn holder(&self) -> Option<&HolderAddress> {
        match self {
            AccountId::Holder(h) => Some(h),
            _ => None,
        }
    }
}

impl From<HolderAddress> for AccountId {
    fn from(h: HolderAddress) -> Self {
        AccountId::Holder(h)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Holder(h) => write!(f, "{}", h),
            AccountId::StakingEscrow => write!(f, "<staking-escrow>"),
            AccountId::VestingEscrow => write!(f, "<vesting-escrow>"),
        }
    }
}
