//! Custody vault
//!
//! The conditional-custody state machine. An owner pre-funds allocations to
//! named beneficiaries, the designated attester certifies the release
//! condition by firing the one-way trigger, and each beneficiary then
//! withdraws exactly their pending allocation.
//!
//! The lifecycle flag moves `active -> triggered` exactly once. Allocation
//! and attester reassignment remain legal in both states; withdrawal is
//! legal only after the transition.
//!
//! The platform authenticates callers; the vault authorizes the explicit
//! `caller` identity it is handed. Value-moving operations hold the
//! reentrancy guard for the full call and zero ledger entries before any
//! outbound transfer.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::CustodyError;
use crate::events::{AttesterAssigned, CustodyEvent, FundsAllocated, FundsWithdrawn, TriggerFired};
use crate::ids::PartyId;
use crate::security::{CustodyRoles, ReentrancyGuard, Role};
use crate::settlement::SettlementLedger;

/// Core custody contract managing pre-funded beneficiary allocations.
///
/// The vault escrows allocated value in its own settlement account. The
/// allocation ledger maps each beneficiary to their undisbursed amount;
/// the sum of all entries equals the escrow account balance at every
/// observable point. Absent entries read as zero.
#[derive(Debug)]
pub struct CustodyVault {
    /// Owner and attester identities, always distinct
    roles: CustodyRoles,
    /// Lifecycle flag; one-way `false -> true` via `fire_trigger`
    triggered: bool,
    /// Pending allocation per beneficiary
    allocations: HashMap<PartyId, Decimal>,
    /// The vault's own account on the settlement ledger
    escrow_account: PartyId,
    /// Security: reentrancy guard
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<CustodyEvent>,
}

impl CustodyVault {
    /// Create a vault with distinct owner and attester identities.
    ///
    /// `creator` is the platform-authenticated caller of the creation call;
    /// it is recorded as the assigner in the initial attester-assignment
    /// event and holds no role afterwards.
    pub fn new(
        creator: &PartyId,
        owner: PartyId,
        attester: PartyId,
    ) -> Result<Self, CustodyError> {
        let roles = CustodyRoles::try_new(owner, attester)
            .ok_or(CustodyError::InvalidRoleAssignment)?;

        let mut vault = Self {
            roles,
            triggered: false,
            allocations: HashMap::new(),
            escrow_account: PartyId::new(),
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        };

        vault
            .events
            .push(CustodyEvent::AttesterAssigned(AttesterAssigned {
                assigned_by: *creator,
                attester,
            }));
        Ok(vault)
    }

    // ───────────────────────── Roles ─────────────────────────

    /// Get the owner identity.
    pub fn owner(&self) -> PartyId {
        self.roles.owner()
    }

    /// Get the current attester identity.
    pub fn attester(&self) -> PartyId {
        self.roles.attester()
    }

    /// Reassign the attester. Owner-only; the owner may not appoint itself.
    ///
    /// Remains permitted after the trigger fires, so the owner can hand the
    /// attester role off for administrative cleanup.
    pub fn set_attester(
        &mut self,
        caller: &PartyId,
        new_attester: PartyId,
    ) -> Result<CustodyEvent, CustodyError> {
        if !self.roles.is_owner(caller) {
            return Err(CustodyError::Unauthorized {
                required: Role::Owner,
            });
        }
        if !self.roles.set_attester(new_attester) {
            return Err(CustodyError::SelfAssignmentForbidden);
        }

        let event = CustodyEvent::AttesterAssigned(AttesterAssigned {
            assigned_by: *caller,
            attester: new_attester,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Trigger ─────────────────────────

    /// Certify the release condition. Attester-only, succeeds at most once.
    pub fn fire_trigger(&mut self, caller: &PartyId) -> Result<CustodyEvent, CustodyError> {
        if !self.roles.is_attester(caller) {
            return Err(CustodyError::Unauthorized {
                required: Role::Attester,
            });
        }
        if self.triggered {
            return Err(CustodyError::AlreadyTriggered);
        }

        self.triggered = true;

        let event = CustodyEvent::TriggerFired(TriggerFired { attester: *caller });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Check if the trigger has fired.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    // ───────────────────────── Allocation ─────────────────────────

    /// Allocate funds to a beneficiary, moving `amount` from the caller's
    /// settlement account into escrow. Owner-only.
    ///
    /// Accumulates onto any pending allocation. A zero amount is a permitted
    /// no-op that still emits the allocation event. Permitted both before
    /// and after the trigger fires.
    pub fn allocate(
        &mut self,
        ledger: &mut SettlementLedger,
        caller: &PartyId,
        beneficiary: PartyId,
        amount: Decimal,
    ) -> Result<CustodyEvent, CustodyError> {
        self.check_reentrancy()?;

        if !self.roles.is_owner(caller) {
            self.reentrancy_guard.release();
            return Err(CustodyError::Unauthorized {
                required: Role::Owner,
            });
        }
        if amount < Decimal::ZERO {
            self.reentrancy_guard.release();
            return Err(CustodyError::InvalidAmount);
        }

        // Compute the prospective entry before any value moves, so an
        // arithmetic failure cannot leave a half-committed allocation.
        let new_total = match self.pending_of(&beneficiary).checked_add(amount) {
            Some(total) => total,
            None => {
                self.reentrancy_guard.release();
                return Err(CustodyError::Overflow);
            }
        };

        // Move the value into escrow before recording it as pending.
        if let Err(e) = ledger.transfer(caller, &self.escrow_account, amount) {
            self.reentrancy_guard.release();
            return Err(CustodyError::Settlement(e));
        }

        self.allocations.insert(beneficiary, new_total);

        let event = CustodyEvent::FundsAllocated(FundsAllocated {
            owner: *caller,
            beneficiary,
            amount,
        });
        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    /// Get a beneficiary's pending allocation. Absent entries read as zero.
    pub fn pending_of(&self, beneficiary: &PartyId) -> Decimal {
        self.allocations
            .get(beneficiary)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of all pending allocations.
    ///
    /// Equals the escrow account's settlement balance whenever no call is in
    /// flight; the conservation tests pin this.
    pub fn total_pending(&self) -> Decimal {
        self.allocations.values().copied().sum()
    }

    // ───────────────────────── Withdrawal ─────────────────────────

    /// Withdraw the caller's full pending allocation. Only legal after the
    /// trigger has fired, and only for a positive pending amount. The
    /// vault's own escrow account is never a legal caller.
    ///
    /// The ledger entry is zeroed before the outbound transfer is issued, so
    /// a re-entrant call observes nothing left to withdraw.
    pub fn withdraw(
        &mut self,
        ledger: &mut SettlementLedger,
        caller: &PartyId,
    ) -> Result<CustodyEvent, CustodyError> {
        self.check_reentrancy()?;

        // The escrow account never originates an authenticated call; its
        // entry, if the owner allocated one, stays on the books.
        if *caller == self.escrow_account {
            self.reentrancy_guard.release();
            return Err(CustodyError::EscrowCallerForbidden);
        }
        if !self.triggered {
            self.reentrancy_guard.release();
            return Err(CustodyError::StillActive);
        }

        let amount = self.pending_of(caller);
        if amount <= Decimal::ZERO {
            self.reentrancy_guard.release();
            return Err(CustodyError::NothingToWithdraw);
        }

        // Zero the entry before the outbound transfer
        self.allocations.remove(caller);

        if let Err(e) = ledger.transfer(&self.escrow_account, caller, amount) {
            // A failing call leaves all state exactly as it was.
            self.allocations.insert(*caller, amount);
            self.reentrancy_guard.release();
            return Err(CustodyError::Settlement(e));
        }

        let event = CustodyEvent::FundsWithdrawn(FundsWithdrawn {
            beneficiary: *caller,
            amount,
        });
        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Accounts & Events ─────────────────────────

    /// The vault's own settlement account holding all escrowed value.
    ///
    /// May appear as an allocation beneficiary; never as a withdrawal
    /// caller.
    pub fn escrow_account(&self) -> PartyId {
        self.escrow_account
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[CustodyEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<CustodyEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    fn check_reentrancy(&mut self) -> Result<(), CustodyError> {
        if !self.reentrancy_guard.acquire() {
            return Err(CustodyError::Reentrancy);
        }
        Ok(())
    }
}
