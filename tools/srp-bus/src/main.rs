#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use srp_bus::{init_tracing, report_fatal, run_transaction, Transaction};
use srp_bus_bridge::peer::MemoryBusPeer;
use srp_bus_bridge::BridgeConfig;

#[derive(Parser, Debug)]
#[command(
    name = "srp-bus",
    about = "Issue single bus transactions against a bus simulator, or run an in-memory one."
)]
struct Args {
    /// Bus peer address (overrides SRP_BUS_ADDR)
    #[arg(long, value_name = "ADDR", global = true)]
    addr: Option<SocketAddr>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read one word and print it as hex
    Read {
        /// Bus address (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_u32)]
        address: u32,
    },
    /// Write one word (no acknowledgement is expected)
    Write {
        /// Bus address (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_u32)]
        address: u32,
        /// Data word (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_u32)]
        data: u32,
    },
    /// Serve the wire protocol from an in-memory register file
    Serve,
}

fn parse_u32(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => raw.replace('_', "").parse::<u32>(),
    };
    parsed.map_err(|err| format!("invalid 32-bit value {raw:?}: {err}"))
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_fatal(&err),
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = BridgeConfig::from_env().context("load bridge config")?;
    if let Some(addr) = args.addr {
        config.bus_addr = addr;
    }

    match args.command {
        Command::Read { address } => {
            let read = Transaction::Read { address };
            if let Some(data) = run_transaction(config.connector(), read)? {
                println!("{data:#010x}");
            }
        }
        Command::Write { address, data } => {
            run_transaction(config.connector(), Transaction::Write { address, data })?;
        }
        Command::Serve => {
            let peer = MemoryBusPeer::bind(config.bus_addr)
                .with_context(|| format!("bind {}", config.bus_addr))?;
            tracing::info!("srp-bus peer listening on {}", peer.local_addr()?);
            peer.serve().context("accept bus connection")?;
        }
    }
    Ok(())
}
