//! Shared security primitives for the custody vault
//!
//! Provides the reentrancy guard held across value-moving operations and the
//! role registry enforcing the owner/attester distinctness invariant. These
//! primitives are error-free; the vault maps their rejections onto the error
//! taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::PartyId;

/// Reentrancy guard preventing nested calls into protected functions.
///
/// A value-moving operation acquires the guard before touching the
/// allocation ledger and releases it on every exit path. The outbound
/// transfer inside a withdrawal is a call to an untrusted collaborator;
/// any nested call attempt while the guard is held must fail.
#[derive(Debug, Clone)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Default for ReentrancyGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Custody roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May allocate funds and reassign the attester
    Owner,
    /// May fire the one-way trigger unlocking withdrawals
    Attester,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Attester => write!(f, "attester"),
        }
    }
}

/// The two role-holding identities of a custody vault.
///
/// Invariant: owner and attester are never the same party. The constructor
/// and the setter are the only mutation paths, and both enforce it.
#[derive(Debug, Clone)]
pub struct CustodyRoles {
    owner: PartyId,
    attester: PartyId,
}

impl CustodyRoles {
    /// Create the role pair. Returns `None` when the identities collide.
    pub fn try_new(owner: PartyId, attester: PartyId) -> Option<Self> {
        if owner == attester {
            return None;
        }
        Some(Self { owner, attester })
    }

    /// Check if a caller holds the owner role.
    pub fn is_owner(&self, caller: &PartyId) -> bool {
        self.owner == *caller
    }

    /// Check if a caller holds the attester role.
    pub fn is_attester(&self, caller: &PartyId) -> bool {
        self.attester == *caller
    }

    /// Replace the attester. Returns `false` (nothing changed) when the new
    /// attester is the owner.
    pub fn set_attester(&mut self, new_attester: PartyId) -> bool {
        if new_attester == self.owner {
            return false;
        }
        self.attester = new_attester;
        true
    }

    /// Get the owner identity.
    pub fn owner(&self) -> PartyId {
        self.owner
    }

    /// Get the current attester identity.
    pub fn attester(&self) -> PartyId {
        self.attester
    }
}
