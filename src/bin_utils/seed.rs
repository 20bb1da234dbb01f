use std::io::Read;

use anyhow::{Context, Result};
use csv::Trim;
use rust_decimal::{Decimal, prelude::Zero};
use serde::Deserialize;

use crate::account::{Account, AccountNumber};

/// One `number,balance,blocked` row of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedRecord {
    pub number: AccountNumber,
    pub balance: Decimal,
    pub blocked: bool,
}

/// Reads the accounts the directory starts with. Whitespace around fields is
/// tolerated; a malformed row or a negative starting balance aborts the load.
pub fn load_accounts<R: Read>(source: R) -> Result<Vec<Account>> {
    let mut reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let mut accounts = Vec::new();
    for (index, row) in reader.deserialize::<SeedRecord>().enumerate() {
        let record = row.with_context(|| format!("Failed to parse seed record {}", index + 1))?;
        if record.balance < Decimal::zero() {
            anyhow::bail!(
                "Seed record {} gives account {} a negative balance",
                index + 1,
                record.number
            );
        }
        accounts.push(Account::new(record.number, record.balance, record.blocked));
    }
    Ok(accounts)
}
