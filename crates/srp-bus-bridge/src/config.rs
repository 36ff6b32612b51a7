use std::net::SocketAddr;

use thiserror::Error;

use crate::TcpConnector;

pub const DEFAULT_BUS_ADDR: &str = "127.0.0.1:7000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub bus_addr: SocketAddr,
    pub nodelay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {0}")]
    InvalidEnv(&'static str),
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bus_addr: SocketAddr::from(([127, 0, 0, 1], 7000)),
            nodelay: true,
        }
    }
}

impl BridgeConfig {
    /// Reads `SRP_BUS_ADDR` and `SRP_BUS_NODELAY`, falling back to the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bus_addr = lookup("SRP_BUS_ADDR")
            .unwrap_or_else(|| DEFAULT_BUS_ADDR.into())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidEnv("SRP_BUS_ADDR"))?;

        let nodelay = match lookup("SRP_BUS_NODELAY") {
            None => true,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::InvalidEnv("SRP_BUS_NODELAY")),
            },
        };

        Ok(Self { bus_addr, nodelay })
    }

    pub fn connector(&self) -> TcpConnector {
        TcpConnector::new(self.bus_addr).with_nodelay(self.nodelay)
    }
}
