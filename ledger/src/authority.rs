//! Authority registry — who may perform privileged mutation.
//!
//! The admin identity is stored once at `init` and always resolved from the
//! record itself, never from a well-known constant address, so multiple
//! deployments can coexist. Each privileged operation is gated by both the
//! admin identity and a per-capability flag.

use crate::error::LedgerError;
use acorn_types::HolderAddress;
use serde::{Deserialize, Serialize};

/// The privileged operations an authority record can gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// External ACN minting.
    Mint,
    /// Changing the ACN→OAK exchange rate.
    SetRate,
    /// Adding to the staking reward budget.
    FundRewards,
    /// Revoking a vesting schedule.
    RevokeVesting,
    /// Pausing/resuming the staking pool.
    ManagePool,
}

/// Active capability flags for the admin. All flags start enabled; a flag
/// can be switched off to retire a privilege without rotating the admin.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Capabilities {
    pub mint: bool,
    pub set_rate: bool,
    pub fund_rewards: bool,
    pub revoke_vesting: bool,
    pub manage_pool: bool,
}

impl Capabilities {
    pub fn all() -> Self {
        Self {
            mint: true,
            set_rate: true,
            fund_rewards: true,
            revoke_vesting: true,
            manage_pool: true,
        }
    }

    fn get(&self, cap: Capability) -> bool {
        match cap {
            Capability::Mint => self.mint,
            Capability::SetRate => self.set_rate,
            Capability::FundRewards => self.fund_rewards,
            Capability::RevokeVesting => self.revoke_vesting,
            Capability::ManagePool => self.manage_pool,
        }
    }

    fn set(&mut self, cap: Capability, enabled: bool) {
        match cap {
            Capability::Mint => self.mint = enabled,
            Capability::SetRate => self.set_rate = enabled,
            Capability::FundRewards => self.fund_rewards = enabled,
            Capability::RevokeVesting => self.revoke_vesting = enabled,
            Capability::ManagePool => self.manage_pool = enabled,
        }
    }
}

/// The stored authority: admin identity plus its active capabilities.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorityRecord {
    pub admin: HolderAddress,
    pub caps: Capabilities,
}

/// Registry holding the one authority record, issued exactly once.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthorityRegistry {
    record: Option<AuthorityRecord>,
}

impl AuthorityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.record.is_some()
    }

    /// Create the authority record. Fails on repeat; the admin identity is
    /// immutable afterwards.
    pub fn init(&mut self, admin: HolderAddress) -> Result<(), LedgerError> {
        if self.record.is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }
        self.record = Some(AuthorityRecord {
            admin,
            caps: Capabilities::all(),
        });
        Ok(())
    }

    pub fn record(&self) -> Result<&AuthorityRecord, LedgerError> {
        self.record.as_ref().ok_or(LedgerError::NotInitialized)
    }

    /// The stored admin identity.
    pub fn admin(&self) -> Result<&HolderAddress, LedgerError> {
        Ok(&self.record()?.admin)
    }

    /// Check that `caller` is the admin and that `cap` is active.
    pub fn require(&self, caller: &HolderAddress, cap: Capability) -> Result<(), LedgerError> {
        let record = self.record()?;
        if &record.admin != caller || !record.caps.get(cap) {
            return Err(LedgerError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        Ok(())
    }

    /// Toggle one capability flag. Admin-only.
    pub fn set_capability(
        &mut self,
        caller: &HolderAddress,
        cap: Capability,
        enabled: bool,
    ) -> Result<(), LedgerError> {
        {
            let record = self.record()?;
            if &record.admin != caller {
                return Err(LedgerError::Unauthorized {
                    caller: caller.to_string(),
                });
            }
        }
        if let Some(record) = self.record.as_mut() {
            record.caps.set(cap, enabled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> HolderAddress {
        HolderAddress::new(format!("acrn_{:0>40}", n))
    }

    #[test]
    fn init_exactly_once() {
        let mut registry = AuthorityRegistry::new();
        assert!(!registry.is_initialized());
        registry.init(addr(1)).unwrap();
        assert!(registry.is_initialized());
        assert_eq!(registry.init(addr(2)), Err(LedgerError::AlreadyInitialized));
        assert_eq!(registry.admin().unwrap(), &addr(1));
    }

    #[test]
    fn queries_before_init_fail() {
        let registry = AuthorityRegistry::new();
        assert_eq!(registry.admin().unwrap_err(), LedgerError::NotInitialized);
        assert_eq!(
            registry.require(&addr(1), Capability::Mint).unwrap_err(),
            LedgerError::NotInitialized
        );
    }

    #[test]
    fn require_rejects_non_admin() {
        let mut registry = AuthorityRegistry::new();
        registry.init(addr(1)).unwrap();
        assert!(registry.require(&addr(1), Capability::Mint).is_ok());
        assert!(matches!(
            registry.require(&addr(2), Capability::Mint),
            Err(LedgerError::Unauthorized { .. })
        ));
    }

    #[test]
    fn disabled_capability_rejects_admin() {
        let mut registry = AuthorityRegistry::new();
        registry.init(addr(1)).unwrap();
        registry
            .set_capability(&addr(1), Capability::Mint, false)
            .unwrap();
        assert!(matches!(
            registry.require(&addr(1), Capability::Mint),
            Err(LedgerError::Unauthorized { .. })
        ));
        // other capabilities unaffected
        assert!(registry.require(&addr(1), Capability::SetRate).is_ok());
    }

    #[test]
    fn only_admin_toggles_capabilities() {
        let mut registry = AuthorityRegistry::new();
        registry.init(addr(1)).unwrap();
        assert!(matches!(
            registry.set_capability(&addr(2), Capability::Mint, false),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert!(registry.require(&addr(1), Capability::Mint).is_ok());
    }
}
