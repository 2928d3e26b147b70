//! Contract-specific error types
//!
//! Error taxonomy for custody and settlement operations. Every failing call
//! surfaces one of these and leaves all state exactly as it was.

use thiserror::Error;

use crate::security::Role;

/// Settlement-ledger errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: String, available: String },

    #[error("Transfer amount must be non-negative")]
    InvalidAmount,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Custody-vault errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CustodyError {
    #[error("Invalid role assignment: owner and attester must be distinct")]
    InvalidRoleAssignment,

    #[error("Unauthorized: caller is not the {required}")]
    Unauthorized { required: Role },

    #[error("Self-assignment forbidden: the owner cannot serve as attester")]
    SelfAssignmentForbidden,

    #[error("Trigger has already fired")]
    AlreadyTriggered,

    #[error("Custody is still active: the trigger has not fired")]
    StillActive,

    #[error("Nothing to withdraw for this caller")]
    NothingToWithdraw,

    #[error("The escrow account cannot originate a withdrawal")]
    EscrowCallerForbidden,

    #[error("Allocation amount must be non-negative")]
    InvalidAmount,

    #[error("Arithmetic overflow in allocation balance")]
    Overflow,

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Settlement error: {0}")]
    Settlement(#[from] SettlementError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display_names_role() {
        let err = CustodyError::Unauthorized {
            required: Role::Owner,
        };
        assert_eq!(err.to_string(), "Unauthorized: caller is not the owner");

        let err = CustodyError::Unauthorized {
            required: Role::Attester,
        };
        assert_eq!(err.to_string(), "Unauthorized: caller is not the attester");
    }

    #[test]
    fn test_settlement_error_display() {
        let err = SettlementError::InsufficientFunds {
            required: "10".to_string(),
            available: "3".to_string(),
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_custody_error_from_settlement() {
        let settlement_err = SettlementError::Overflow;
        let custody_err: CustodyError = settlement_err.into();
        assert!(matches!(custody_err, CustodyError::Settlement(_)));
    }

    #[test]
    fn test_escrow_caller_error_display() {
        assert_eq!(
            CustodyError::EscrowCallerForbidden.to_string(),
            "The escrow account cannot originate a withdrawal"
        );
    }

    #[test]
    fn test_lifecycle_error_display() {
        assert_eq!(
            CustodyError::AlreadyTriggered.to_string(),
            "Trigger has already fired"
        );
        assert!(CustodyError::StillActive.to_string().contains("still active"));
    }
}
