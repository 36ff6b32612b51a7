#![forbid(unsafe_code)]

//! Synchronous bridge from the emulated CPU's memory-mapped I/O accesses to an external bus
//! simulator.
//!
//! Each call to [`BusBridgeClient::read`] or [`BusBridgeClient::write`] is one transaction on a
//! freshly opened stream: one request record out, and for reads exactly one reply record back.
//! There is no timeout and no retry; a peer that never answers a read blocks the caller forever.

mod client;
mod config;
mod connector;
mod error;
pub mod peer;

pub use client::BusBridgeClient;
pub use config::{BridgeConfig, ConfigError, DEFAULT_BUS_ADDR};
pub use connector::{Connector, TcpConnector};
pub use error::BridgeError;
pub use srp_bus_protocol::{BusAccessMessage, BusCommand, BUS_ACCESS_MESSAGE_LEN};
