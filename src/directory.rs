use std::collections::HashMap;

use crate::{
    account::{Account, AccountNumber},
    error::TransferError,
};

/// The fixed set of accounts the bank knows about, keyed by account number.
///
/// Built once at startup; after that the map itself is never mutated, only
/// the balances inside the accounts are.
#[derive(Debug)]
pub struct AccountDirectory {
    accounts: HashMap<AccountNumber, Account>,
}

impl AccountDirectory {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.number().to_owned(), account))
                .collect(),
        }
    }

    /// Finds the account whose number matches `number` exactly.
    pub fn lookup(&self, number: &str) -> Result<&Account, TransferError> {
        self.accounts
            .get(number)
            .ok_or_else(|| TransferError::AccountNotFound(number.to_owned()))
    }

    /// All accounts, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}
