//! Server settings from the environment.

use std::env;

/// Bind address for the web server.
///
/// `HOST` (default `0.0.0.0`, reachable from outside on a VPS) and `PORT` (default `8080`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("HOST").ok(), env::var("PORT").ok())
    }

    /// Unset or unparsable values fall back to the defaults.
    pub fn from_vars(host: Option<String>, port: Option<String>) -> Self {
        let defaults = Self::default();
        let port = match port.as_deref().map(str::parse::<u16>) {
            Some(Ok(p)) => p,
            Some(Err(_)) => {
                log::warn!("Ignoring invalid PORT, using {}", defaults.port);
                defaults.port
            }
            None => defaults.port,
        };
        Self {
            host: host
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .unwrap_or(defaults.host),
            port,
        }
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
