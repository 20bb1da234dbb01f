use std::fs::File;

use anyhow::{Context, Result};
use fake_bank::bin_utils::{FailureMode, Service};
use fake_bank::transfer::TransferRequest;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let seed_path = args
        .next()
        .context("Expected a seed file as the first argument")?;
    let source = args.next().context("Expected a source account number")?;
    let destination = args.next().context("Expected a destination account number")?;
    let amount: Decimal = args
        .next()
        .context("Expected a transfer amount")?
        .parse()
        .context("The transfer amount must be a decimal number")?;
    let mode = match args.next() {
        Some(raw) => raw.parse()?,
        None => FailureMode::FailFast,
    };

    let seed =
        File::open(&seed_path).with_context(|| format!("Failed to open `{seed_path}`"))?;

    let service = Service {
        seed,
        request: TransferRequest::new(source, destination, amount),
        mode,
        output: &mut std::io::stdout(),
        failure_printer: Box::new(|failure| eprintln!("Transfer failed: {failure}")),
    };
    service.run()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
