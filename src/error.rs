use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountNumber;

/// A single domain failure from a funds transfer.
///
/// Every way a transfer can be refused is one of these four kinds. The
/// message of each names the account or amount it complains about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Account {0} was not found")]
    AccountNotFound(AccountNumber),
    #[error("Account {0} is blocked")]
    AccountBlocked(AccountNumber),
    #[error("Transaction amount must be greater than zero, got {0}")]
    InvalidTransactionAmount(Decimal),
    #[error("Insufficient funds in account {0}")]
    InsufficientFunds(AccountNumber),
}

/// The failures collected by a single call to
/// [`TransferService::transfer_funds_collecting`](crate::transfer::TransferService::transfer_funds_collecting).
///
/// Holds at least one [`TransferError`]. Lookup failures for the two accounts
/// may appear together, source first; every other failure arrives alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFailures(Vec<TransferError>);

impl TransferFailures {
    pub(crate) fn new(failures: Vec<TransferError>) -> Self {
        debug_assert!(
            !failures.is_empty(),
            "a rejected transfer carries at least one failure"
        );
        Self(failures)
    }

    /// The collected failures, in the order they were determined.
    pub fn failures(&self) -> &[TransferError] {
        &self.0
    }
}

impl From<TransferError> for TransferFailures {
    fn from(failure: TransferError) -> Self {
        Self::new(vec![failure])
    }
}

impl fmt::Display for TransferFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, failure) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TransferFailures {}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn failure_messages_name_the_participant() {
        let failure = TransferError::AccountNotFound("999999".to_owned());
        assert_eq!(failure.to_string(), "Account 999999 was not found");

        let failure = TransferError::InvalidTransactionAmount(Decimal::from_i32(-100).unwrap());
        assert_eq!(
            failure.to_string(),
            "Transaction amount must be greater than zero, got -100"
        );
    }

    #[test]
    fn collected_failures_join_their_messages() {
        let failures = TransferFailures::new(vec![
            TransferError::AccountNotFound("999999".to_owned()),
            TransferError::AccountNotFound("888888".to_owned()),
        ]);
        assert_eq!(
            failures.to_string(),
            "Account 999999 was not found; Account 888888 was not found"
        );
        assert_eq!(failures.failures().len(), 2);
    }
}
