use std::sync::{Mutex, MutexGuard};

use rust_decimal::{Decimal, prelude::Zero};

use crate::error::TransferError;

pub type AccountNumber = String;

/// A bank account: a balance behind its own lock, plus a blocked flag that is
/// fixed at construction.
///
/// The lock covers exactly one balance mutation at a time. The blocked flag
/// never changes, so [`Account::check_blocked`] reads it without locking.
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    balance: Mutex<Decimal>,
    blocked: bool,
}

impl Account {
    pub fn new(number: impl Into<AccountNumber>, balance: Decimal, blocked: bool) -> Self {
        debug_assert!(
            balance >= Decimal::zero(),
            "an account must not start below zero"
        );
        Self {
            number: number.into(),
            balance: Mutex::new(balance),
            blocked,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Read-only gate: reports the account as blocked without touching the
    /// balance.
    pub fn check_blocked(&self) -> Result<(), TransferError> {
        if self.blocked {
            Err(TransferError::AccountBlocked(self.number.clone()))
        } else {
            Ok(())
        }
    }

    /// Removes `amount` from the balance. A non-positive amount is rejected
    /// before the balance is even inspected; an amount above the balance
    /// leaves it untouched.
    pub fn withdraw(&self, amount: Decimal) -> Result<(), TransferError> {
        let mut balance = self.lock_balance();
        if amount <= Decimal::zero() {
            return Err(TransferError::InvalidTransactionAmount(amount));
        }
        if *balance < amount {
            return Err(TransferError::InsufficientFunds(self.number.clone()));
        }
        *balance -= amount;
        Ok(())
    }

    /// Adds `amount` to the balance. A non-positive amount is rejected.
    pub fn deposit(&self, amount: Decimal) -> Result<(), TransferError> {
        let mut balance = self.lock_balance();
        if amount <= Decimal::zero() {
            return Err(TransferError::InvalidTransactionAmount(amount));
        }
        *balance += amount;
        Ok(())
    }

    /// A snapshot of the balance at the moment of the call.
    pub fn balance(&self) -> Decimal {
        *self.lock_balance()
    }

    fn lock_balance(&self) -> MutexGuard<'_, Decimal> {
        // Poisoned only if another thread panicked inside a balance mutation.
        self.balance.lock().expect("account balance lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    fn account(balance: u32) -> Account {
        Account::new("123456", Decimal::from_u32(balance).unwrap(), false)
    }

    #[test]
    fn withdraw_decreases_balance() {
        let account = account(100);
        account.withdraw(Decimal::from_u32(30).unwrap()).unwrap();
        assert_eq!(account.balance(), Decimal::from_u32(70).unwrap());
    }

    #[test]
    fn withdraw_rejects_non_positive_amounts() {
        let account = account(100);

        let err = account.withdraw(Decimal::zero()).unwrap_err();
        assert!(matches!(err, TransferError::InvalidTransactionAmount(_)));

        let err = account
            .withdraw(Decimal::from_i32(-50).unwrap())
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidTransactionAmount(_)));

        assert_eq!(account.balance(), Decimal::from_u32(100).unwrap());
    }

    #[test]
    fn withdraw_reports_invalid_amount_before_insufficient_funds() {
        // -100 is both non-positive and above the balance of 50
        let account = account(50);
        let err = account
            .withdraw(Decimal::from_i32(-100).unwrap())
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidTransactionAmount(_)));
    }

    #[test]
    fn withdraw_rejects_amount_above_balance() {
        let account = account(100);
        let err = account
            .withdraw(Decimal::from_u32(150).unwrap())
            .unwrap_err();
        assert!(matches!(err, TransferError::InsufficientFunds(number) if number == "123456"));
        assert_eq!(account.balance(), Decimal::from_u32(100).unwrap());
    }

    #[test]
    fn withdraw_allows_draining_the_full_balance() {
        let account = account(100);
        account.withdraw(Decimal::from_u32(100).unwrap()).unwrap();
        assert_eq!(account.balance(), Decimal::zero());
    }

    #[test]
    fn deposit_increases_balance() {
        let account = account(100);
        account.deposit(Decimal::from_u32(50).unwrap()).unwrap();
        assert_eq!(account.balance(), Decimal::from_u32(150).unwrap());
    }

    #[test]
    fn deposit_rejects_non_positive_amounts() {
        let account = account(100);

        let err = account.deposit(Decimal::zero()).unwrap_err();
        assert!(matches!(err, TransferError::InvalidTransactionAmount(_)));

        let err = account
            .deposit(Decimal::from_i32(-50).unwrap())
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidTransactionAmount(_)));

        assert_eq!(account.balance(), Decimal::from_u32(100).unwrap());
    }

    #[test]
    fn check_blocked_reports_blocked_account() {
        let account = Account::new("112233", Decimal::from_u32(100).unwrap(), true);
        let err = account.check_blocked().unwrap_err();
        assert_eq!(err.to_string(), "Account 112233 is blocked");
        // the check is read-only
        assert_eq!(account.balance(), Decimal::from_u32(100).unwrap());
    }

    #[test]
    fn check_blocked_passes_unblocked_account() {
        let account = account(100);
        assert!(account.check_blocked().is_ok());
        assert!(!account.is_blocked());
    }

    #[test]
    fn balance_is_stable_without_mutation() {
        let account = account(100);
        assert_eq!(account.balance(), account.balance());
    }
}
