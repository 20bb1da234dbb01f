//! Funds transfers between two accounts, offered under two failure-reporting
//! contracts over a single protocol.
//!
//! Both entry points walk the same steps: look up the two accounts, refuse
//! blocked participants, withdraw from the source, deposit into the
//! destination. [`TransferService::transfer_funds`] stops at the first
//! failure and returns it alone.
//! [`TransferService::transfer_funds_collecting`] reports both missing
//! accounts together and escalates a blocked account to a panic.
//!
//! A transfer never holds two account locks at once: the withdrawal releases
//! the source's lock before the deposit takes the destination's. Lookups and
//! blocked checks run outside any lock, so they can interleave with
//! concurrent transfers; the sufficiency check inside [`Account::withdraw`]
//! is the only authoritative guard against overdrawing.

use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use crate::{
    account::{Account, AccountNumber},
    directory::AccountDirectory,
    error::{TransferError, TransferFailures},
};

/// A request to move `amount` from the `source` account to the `destination`
/// account. Nothing is validated at construction; every check happens during
/// the transfer itself.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub source: AccountNumber,
    pub destination: AccountNumber,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        source: impl Into<AccountNumber>,
        destination: impl Into<AccountNumber>,
        amount: Decimal,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            amount,
        }
    }
}

/// How failures of the transfer protocol reach the caller.
///
/// Implemented by the two outcome types: [`TransferError`] surfaces the first
/// failure and nothing else, [`TransferFailures`] gathers both lookup misses
/// before giving up.
trait Report: Sized {
    /// Turns the two lookup outcomes into a pair of accounts, or into the
    /// reported failure(s).
    fn resolve_lookups<'a>(
        source: Result<&'a Account, TransferError>,
        destination: Result<&'a Account, TransferError>,
    ) -> Result<(&'a Account, &'a Account), Self>;

    /// Surfaces a blocked participant.
    fn blocked(failure: TransferError) -> Self;

    /// Surfaces a failed withdrawal or deposit.
    fn operation(failure: TransferError) -> Self;
}

impl Report for TransferError {
    fn resolve_lookups<'a>(
        source: Result<&'a Account, TransferError>,
        destination: Result<&'a Account, TransferError>,
    ) -> Result<(&'a Account, &'a Account), Self> {
        // When both lookups miss, the source is the one reported.
        Ok((source?, destination?))
    }

    fn blocked(failure: TransferError) -> Self {
        failure
    }

    fn operation(failure: TransferError) -> Self {
        failure
    }
}

impl Report for TransferFailures {
    fn resolve_lookups<'a>(
        source: Result<&'a Account, TransferError>,
        destination: Result<&'a Account, TransferError>,
    ) -> Result<(&'a Account, &'a Account), Self> {
        match (source, destination) {
            (Ok(source), Ok(destination)) => Ok((source, destination)),
            (source, destination) => Err(Self::new(
                source.err().into_iter().chain(destination.err()).collect(),
            )),
        }
    }

    fn blocked(failure: TransferError) -> Self {
        // A blocked account is not data under this contract; it tears the
        // whole operation down.
        error!(%failure, "blocked account encountered, aborting");
        panic!("{failure}");
    }

    fn operation(failure: TransferError) -> Self {
        Self::from(failure)
    }
}

/// Orchestrates transfers against the accounts in its directory.
#[derive(Debug)]
pub struct TransferService {
    directory: AccountDirectory,
}

impl TransferService {
    pub fn new(directory: AccountDirectory) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    /// Moves `request.amount` from the source to the destination account,
    /// stopping at the first failure.
    ///
    /// The precedence is fixed: a missing account (source before destination)
    /// beats a blocked one, a blocked account (source before destination)
    /// beats any balance concern, and a non-positive amount beats
    /// insufficient funds. Exactly one failure is reported even when several
    /// conditions hold at once.
    ///
    /// A deposit failure after the withdrawal has been applied leaves the
    /// source debited; no compensating credit is issued.
    pub fn transfer_funds(&self, request: &TransferRequest) -> Result<(), TransferError> {
        let result = self.execute(request);
        match &result {
            Ok(()) => log_completed(request),
            Err(failure) => log_rejected(request, failure),
        }
        result
    }

    /// Moves `request.amount` from the source to the destination account,
    /// collecting lookup failures instead of stopping at the first one.
    ///
    /// When both accounts are missing, the returned [`TransferFailures`]
    /// carries an entry for each, source first. Withdrawal and deposit
    /// failures are still reported alone, and a deposit failure after the
    /// withdrawal has been applied leaves the source debited, exactly as in
    /// [`TransferService::transfer_funds`].
    ///
    /// # Panics
    ///
    /// When either looked-up account is blocked. Unlike the other three
    /// failure kinds, a blocked account is never returned as data from this
    /// contract; a caller that may run into one has to screen for it first or
    /// isolate the call.
    pub fn transfer_funds_collecting(
        &self,
        request: &TransferRequest,
    ) -> Result<(), TransferFailures> {
        let result = self.execute(request);
        match &result {
            Ok(()) => log_completed(request),
            Err(failures) => log_rejected(request, failures),
        }
        result
    }

    /// The shared protocol. `F` decides how failures reach the caller.
    fn execute<F: Report>(&self, request: &TransferRequest) -> Result<(), F> {
        let (source, destination) = F::resolve_lookups(
            self.directory.lookup(&request.source),
            self.directory.lookup(&request.destination),
        )?;

        source.check_blocked().map_err(F::blocked)?;
        destination.check_blocked().map_err(F::blocked)?;

        source.withdraw(request.amount).map_err(F::operation)?;
        if let Err(failure) = destination.deposit(request.amount) {
            // The withdrawal is not rolled back; the source stays debited.
            warn!(
                source = %request.source,
                destination = %request.destination,
                amount = %request.amount,
                %failure,
                "deposit failed after the withdrawal was applied"
            );
            return Err(F::operation(failure));
        }
        Ok(())
    }
}

fn log_completed(request: &TransferRequest) {
    debug!(
        source = %request.source,
        destination = %request.destination,
        amount = %request.amount,
        "transfer completed"
    );
}

fn log_rejected(request: &TransferRequest, failure: &impl std::fmt::Display) {
    warn!(
        source = %request.source,
        destination = %request.destination,
        amount = %request.amount,
        %failure,
        "transfer rejected"
    );
}
