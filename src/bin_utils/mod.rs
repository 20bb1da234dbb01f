//! This module could be a separate crate on its own, to bootstrap the bank
//! within the binary, but integration tests drive the same path, so I include
//! it directly in the library.

use std::io::{Read, Write};
use std::str::FromStr;

use anyhow::Result;
use thiserror::Error;

use crate::{
    directory::AccountDirectory,
    error::TransferError,
    transfer::{TransferRequest, TransferService},
};

pub mod printer;
pub mod seed;

/// Which of the two transfer contracts the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Stop at the first failure and report it alone.
    FailFast,
    /// Collect lookup failures together; a blocked account panics.
    Collect,
}

#[derive(Debug, Error)]
#[error("Unknown failure mode `{0}`, expected `fail-fast` or `collect`")]
pub struct ParseFailureModeError(String);

impl FromStr for FailureMode {
    type Err = ParseFailureModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "fail-fast" => Ok(Self::FailFast),
            "collect" => Ok(Self::Collect),
            other => Err(ParseFailureModeError(other.to_owned())),
        }
    }
}

/// Seeds a directory from CSV, runs one transfer under the chosen mode, and
/// writes the resulting balances as CSV.
pub struct Service<'w, R, W: 'w> {
    pub seed: R,
    pub request: TransferRequest,
    pub mode: FailureMode,
    pub output: &'w mut W,
    pub failure_printer: Box<dyn FnMut(&TransferError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let accounts = seed::load_accounts(self.seed)?;
        let service = TransferService::new(AccountDirectory::new(accounts));

        match self.mode {
            FailureMode::FailFast => {
                if let Err(failure) = service.transfer_funds(&self.request) {
                    (self.failure_printer)(&failure);
                }
            }
            FailureMode::Collect => {
                if let Err(failures) = service.transfer_funds_collecting(&self.request) {
                    for failure in failures.failures() {
                        (self.failure_printer)(failure);
                    }
                }
            }
        }

        printer::print_balances(
            self.output,
            service.directory().accounts().map(|account| printer::BalanceRow {
                number: account.number().to_owned(),
                balance: account.balance(),
                blocked: account.is_blocked(),
            }),
        )
    }
}
