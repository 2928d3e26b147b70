//! Settlement ledger
//!
//! A thin model of the value-transfer platform the custody contract runs on:
//! per-party balances with atomic, checked transfers. The custody vault holds
//! its escrowed funds in an ordinary account on this ledger and never moves
//! value except through `transfer`.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::SettlementError;
use crate::ids::PartyId;

/// Per-party balance ledger.
///
/// Absent accounts hold a zero balance; accounts spring into existence on
/// first credit. Every mutation uses checked arithmetic, and `transfer`
/// validates both halves before committing either.
#[derive(Debug, Default)]
pub struct SettlementLedger {
    balances: HashMap<PartyId, Decimal>,
}

impl SettlementLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Credit a party's account. Genesis/test funding path.
    pub fn fund(&mut self, party: PartyId, amount: Decimal) -> Result<(), SettlementError> {
        if amount < Decimal::ZERO {
            return Err(SettlementError::InvalidAmount);
        }
        let balance = self.balances.entry(party).or_insert(Decimal::ZERO);
        *balance = balance
            .checked_add(amount)
            .ok_or(SettlementError::Overflow)?;
        Ok(())
    }

    /// Get a party's balance. Absent accounts read as zero.
    pub fn balance_of(&self, party: &PartyId) -> Decimal {
        self.balances.get(party).copied().unwrap_or(Decimal::ZERO)
    }

    /// Atomically move `amount` from one account to another.
    ///
    /// Validates the amount, the sender's funds, and the receive-side
    /// arithmetic before committing either half, so a failure never leaves a
    /// one-sided ledger. A self-transfer is a funds-checked no-op.
    pub fn transfer(
        &mut self,
        from: &PartyId,
        to: &PartyId,
        amount: Decimal,
    ) -> Result<(), SettlementError> {
        if amount < Decimal::ZERO {
            return Err(SettlementError::InvalidAmount);
        }

        let available = self.balance_of(from);
        if available < amount {
            return Err(SettlementError::InsufficientFunds {
                required: amount.to_string(),
                available: available.to_string(),
            });
        }

        if from == to {
            return Ok(());
        }

        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(SettlementError::Overflow)?;
        let new_from = available
            .checked_sub(amount)
            .ok_or(SettlementError::Overflow)?;

        self.balances.insert(*from, new_from);
        self.balances.insert(*to, new_to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_and_balance() {
        let mut ledger = SettlementLedger::new();
        let party = PartyId::new();
        ledger.fund(party, Decimal::from(500)).unwrap();
        assert_eq!(ledger.balance_of(&party), Decimal::from(500));
    }

    #[test]
    fn test_fund_accumulates() {
        let mut ledger = SettlementLedger::new();
        let party = PartyId::new();
        ledger.fund(party, Decimal::from(100)).unwrap();
        ledger.fund(party, Decimal::from(50)).unwrap();
        assert_eq!(ledger.balance_of(&party), Decimal::from(150));
    }

    #[test]
    fn test_fund_negative_rejected() {
        let mut ledger = SettlementLedger::new();
        let party = PartyId::new();
        let result = ledger.fund(party, Decimal::from(-1));
        assert_eq!(result, Err(SettlementError::InvalidAmount));
    }

    #[test]
    fn test_absent_account_reads_zero() {
        let ledger = SettlementLedger::new();
        assert_eq!(ledger.balance_of(&PartyId::new()), Decimal::ZERO);
    }

    #[test]
    fn test_transfer_moves_funds() {
        let mut ledger = SettlementLedger::new();
        let from = PartyId::new();
        let to = PartyId::new();
        ledger.fund(from, Decimal::from(100)).unwrap();

        ledger.transfer(&from, &to, Decimal::from(30)).unwrap();
        assert_eq!(ledger.balance_of(&from), Decimal::from(70));
        assert_eq!(ledger.balance_of(&to), Decimal::from(30));
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let mut ledger = SettlementLedger::new();
        let from = PartyId::new();
        let to = PartyId::new();
        ledger.fund(from, Decimal::from(10)).unwrap();

        let result = ledger.transfer(&from, &to, Decimal::from(11));
        assert!(matches!(
            result,
            Err(SettlementError::InsufficientFunds { .. })
        ));
        // Nothing committed
        assert_eq!(ledger.balance_of(&from), Decimal::from(10));
        assert_eq!(ledger.balance_of(&to), Decimal::ZERO);
    }

    #[test]
    fn test_transfer_of_zero_is_permitted() {
        let mut ledger = SettlementLedger::new();
        let from = PartyId::new();
        let to = PartyId::new();
        ledger.transfer(&from, &to, Decimal::ZERO).unwrap();
        assert_eq!(ledger.balance_of(&from), Decimal::ZERO);
        assert_eq!(ledger.balance_of(&to), Decimal::ZERO);
    }

    #[test]
    fn test_transfer_negative_rejected() {
        let mut ledger = SettlementLedger::new();
        let from = PartyId::new();
        let to = PartyId::new();
        ledger.fund(from, Decimal::from(10)).unwrap();

        let result = ledger.transfer(&from, &to, Decimal::from(-5));
        assert_eq!(result, Err(SettlementError::InvalidAmount));
    }

    #[test]
    fn test_self_transfer_leaves_balance_untouched() {
        let mut ledger = SettlementLedger::new();
        let party = PartyId::new();
        ledger.fund(party, Decimal::from(100)).unwrap();

        ledger.transfer(&party, &party, Decimal::from(40)).unwrap();
        assert_eq!(ledger.balance_of(&party), Decimal::from(100));
    }

    #[test]
    fn test_self_transfer_still_requires_funds() {
        let mut ledger = SettlementLedger::new();
        let party = PartyId::new();
        let result = ledger.transfer(&party, &party, Decimal::from(1));
        assert!(matches!(
            result,
            Err(SettlementError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_transfer_receive_overflow() {
        let mut ledger = SettlementLedger::new();
        let from = PartyId::new();
        let to = PartyId::new();
        ledger.fund(from, Decimal::from(1)).unwrap();
        ledger.fund(to, Decimal::MAX).unwrap();

        let result = ledger.transfer(&from, &to, Decimal::from(1));
        assert_eq!(result, Err(SettlementError::Overflow));
        // Sender untouched by the failed transfer
        assert_eq!(ledger.balance_of(&from), Decimal::from(1));
    }

    #[test]
    fn test_fund_overflow() {
        let mut ledger = SettlementLedger::new();
        let party = PartyId::new();
        ledger.fund(party, Decimal::MAX).unwrap();
        let result = ledger.fund(party, Decimal::from(1));
        assert_eq!(result, Err(SettlementError::Overflow));
        assert_eq!(ledger.balance_of(&party), Decimal::MAX);
    }
}
