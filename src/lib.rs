//! Smart Contract Logic for Conditional Custody
//!
//! This crate implements the contract layer for a conditional-custody vault:
//! an owner pre-funds allocations to named beneficiaries, a designated
//! attester certifies the release condition, and each beneficiary withdraws
//! exactly their pending allocation once the trigger has fired.
//!
//! # Modules
//! - `errors`: Custody and settlement error types
//! - `events`: Custody events (assignment, trigger, allocation, withdrawal)
//! - `ids`: Party identifier type shared by every role
//! - `security`: Shared security primitives (reentrancy guard, role registry)
//! - `settlement`: Settlement ledger modeling platform value movement
//! - `vault`: Conditional custody, allocation ledger, beneficiary payout
//!
//! # Version
//! v0.1.0, initial implementation

pub mod errors;
pub mod events;
pub mod ids;
pub mod security;
pub mod settlement;
pub mod vault;

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
