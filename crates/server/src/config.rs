//! Listen address configuration (environment variables + defaults).

use std::net::SocketAddr;

use crate::error::ServerError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9002;

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `STOCKFLOW_HOST` / `STOCKFLOW_PORT`, falling back to the defaults.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_vars(
            std::env::var("STOCKFLOW_HOST").ok(),
            std::env::var("STOCKFLOW_PORT").ok(),
        )
    }

    /// Same as `from_env`, with the raw values passed in.
    pub fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, ServerError> {
        let host = host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match port.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ServerError::Config(format!("STOCKFLOW_PORT must be a port number, got '{raw}'"))
            })?,
        };

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServerError::Config(format!("Invalid listen address: {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
