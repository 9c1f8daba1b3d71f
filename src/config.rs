use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Telehealth Analytics";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

const ENV_BIND_ADDR: &str = "PORTAL_BIND_ADDR";
const ENV_DB_PATH: &str = "PORTAL_DB_PATH";
const ENV_ADMIN_TOKEN: &str = "PORTAL_ADMIN_TOKEN";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,telehealth_analytics=debug,tower_http=info"
}

/// Get the application data directory
/// ~/TelehealthPortal/ (falls back to the working directory without a home)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("TelehealthPortal")
}

/// Default location of the record store
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("portal.db")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{ENV_BIND_ADDR} is not a socket address: {value}")]
    InvalidBindAddr { value: String },
    #[error("{ENV_ADMIN_TOKEN} must not be empty")]
    EmptyAdminToken,
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    /// `None` means a token is generated at startup.
    pub admin_token: Option<String>,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: raw_addr.clone() })?;

        let db_path = lookup(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let admin_token = match lookup(ENV_ADMIN_TOKEN) {
            Some(token) if token.trim().is_empty() => return Err(ConfigError::EmptyAdminToken),
            Some(token) => Some(token.trim().to_string()),
            None => None,
        };

        Ok(Self {
            bind_addr,
            db_path,
            admin_token,
        })
    }
}
