//! Configuration module
//!
//! Builds the runtime configuration from environment variables with sensible
//! defaults. The tunnel credential is the only required setting.

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub tunnel: TunnelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Root directory containing one folder per subdomain
    pub root: String,
    /// Subdomain folder used when the hostname carries no label
    pub default_subdomain: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TunnelConfig {
    /// Bearer token for the cloudflared tunnel
    pub token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `CLOUDFLARED_TOKEN` is required and must be non-empty. `PORT` is
    /// optional; an unparseable value is a load error rather than a silent
    /// fallback to the default.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_env_values(
            std::env::var("CLOUDFLARED_TOKEN").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_env_values(
        token: Option<String>,
        port: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4545)?
            .set_default("content.root", "./content")?
            .set_default("content.default_subdomain", "www")?
            .set_default("tunnel.token", "")?
            .set_default("logging.access_log", true)?
            .set_override_option("tunnel.token", token)?
            .set_override_option("server.port", port)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;

        if cfg.tunnel.token.is_empty() {
            return Err(config::ConfigError::Message(
                "CLOUDFLARED_TOKEN is not set".to_string(),
            ));
        }

        Ok(cfg)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_env_values(Some("token-abc".to_string()), None).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 4545);
        assert_eq!(cfg.content.root, "./content");
        assert_eq!(cfg.content.default_subdomain, "www");
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_port_override() {
        let cfg =
            Config::from_env_values(Some("token-abc".to_string()), Some("8080".to_string()))
                .unwrap();
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn test_unparseable_port_is_rejected() {
        let result =
            Config::from_env_values(Some("token-abc".to_string()), Some("not-a-port".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_token_is_rejected() {
        assert!(Config::from_env_values(None, None).is_err());
    }

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(Config::from_env_values(Some(String::new()), None).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::from_env_values(Some("token-abc".to_string()), None).unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 4545);
    }
}
