use crate::{
    AppError, AppResult,
    config::{default_port, default_remote_endpoint},
};

use std::{net::IpAddr, panic::Location};

use error_location::ErrorLocation;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Embedded server and remote processor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the websocket and settings server.
    #[serde(default = "default_port")]
    pub port: u16,
    /// URL the inline query is posted to.
    #[serde(default = "default_remote_endpoint")]
    pub remote_endpoint: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            remote_endpoint: default_remote_endpoint(),
        }
    }
}

impl ServerConfig {
    /// Reject a remote endpoint that is unparseable or that points back at
    /// this server's own loopback port.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.remote_endpoint).map_err(|e| AppError::ConfigError {
            reason: format!("Invalid remote endpoint '{}': {}", self.remote_endpoint, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let loopback = match url.host_str() {
            Some("localhost") => true,
            Some(host) => host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .is_ok_and(|ip| ip.is_loopback() || ip.is_unspecified()),
            None => false,
        };

        if loopback && url.port_or_known_default() == Some(self.port) {
            return Err(AppError::ConfigError {
                reason: format!(
                    "Remote endpoint '{}' points at this server's own port {}",
                    self.remote_endpoint, self.port
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
