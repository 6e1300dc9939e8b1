use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub icons_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    /// PORT defaults to 3000, LUME_ICONS_DIR to "public/icons", LUME_PUBLIC_DIR to "public".
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("PORT").ok();
        let icons_dir = std::env::var("LUME_ICONS_DIR").ok();
        let public_dir = std::env::var("LUME_PUBLIC_DIR").ok();

        Self::from_values(port.as_deref(), icons_dir, public_dir)
    }

    fn from_values(
        port: Option<&str>,
        icons_dir: Option<String>,
        public_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match port {
            Some(p) if !p.is_empty() => p
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT", "must be a valid port number"))?,
            _ => 3000,
        };

        Ok(Config {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            icons_dir: icons_dir.unwrap_or_else(|| "public/icons".to_string()).into(),
            public_dir: public_dir.unwrap_or_else(|| "public".to_string()).into(),
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
