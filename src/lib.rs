/// Account state: a balance behind a per-account lock, plus a blocked flag
/// fixed at construction.
pub mod account;

/// Maps account numbers to accounts. Built once at startup, read-only after.
pub mod directory;

/// The failure taxonomy shared by every transfer operation, and the
/// collected form returned by the failure-collecting contract.
pub mod error;

/// Funds transfers over a single protocol, under two failure-reporting
/// contracts: fail at the first failure, or collect lookup failures.
pub mod transfer;

/// Ideally this would be its own crate, as a way to bootstrap the core
/// logic. However, integration tests want it too, so I put it here.
pub mod bin_utils;
