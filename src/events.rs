//! Custody contract events
//!
//! Events are immutable records appended to the vault's event log by
//! successful operations. Failed calls append nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::PartyId;

/// Attester assigned, at creation or by owner reassignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttesterAssigned {
    pub assigned_by: PartyId,
    pub attester: PartyId,
}

/// Trigger certified by the attester, unlocking withdrawals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFired {
    pub attester: PartyId,
}

/// Funds allocated by the owner to a beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsAllocated {
    pub owner: PartyId,
    pub beneficiary: PartyId,
    pub amount: Decimal,
}

/// Pending allocation withdrawn in full by its beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub beneficiary: PartyId,
    pub amount: Decimal,
}

/// Enum wrapper for all custody events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustodyEvent {
    AttesterAssigned(AttesterAssigned),
    TriggerFired(TriggerFired),
    FundsAllocated(FundsAllocated),
    FundsWithdrawn(FundsWithdrawn),
}
