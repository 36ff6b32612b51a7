#![forbid(unsafe_code)]

//! Transaction runner behind the `srp-bus` binary.

use std::process::ExitCode;

use anyhow::Context;
use srp_bus_bridge::{BusBridgeClient, Connector};

/// Status the process exits with after any bridge failure. Failures are never retried.
pub const EXIT_FATAL: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Read { address: u32 },
    Write { address: u32, data: u32 },
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Performs one transaction; a read returns the data word.
pub fn run_transaction<C: Connector>(
    connector: C,
    transaction: Transaction,
) -> anyhow::Result<Option<u32>> {
    let mut client = BusBridgeClient::new(connector);
    match transaction {
        Transaction::Read { address } => {
            let data = client
                .read(address)
                .with_context(|| format!("bus read at {address:#010x}"))?;
            Ok(Some(data))
        }
        Transaction::Write { address, data } => {
            client
                .write(address, data)
                .with_context(|| format!("bus write at {address:#010x}"))?;
            Ok(None)
        }
    }
}

/// Logs `err` and returns the fatal exit status.
pub fn report_fatal(err: &anyhow::Error) -> ExitCode {
    tracing::error!("{err:#}");
    ExitCode::from(EXIT_FATAL)
}
