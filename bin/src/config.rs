//! Process configuration, loaded from the environment once at startup.
//!
//! The resulting value is immutable and passed by reference into each
//! component; nothing below this layer reads environment variables.

use std::time::Duration;

use anyhow::{Context, Result};
use galvani_lib::prelude::*;
use galvani_lib::{DEFAULT_DIR, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};

/// Immutable process configuration.
#[derive(Clone)]
pub(crate) struct AppConfig {
    /// Remote FTP host.
    pub host: String,
    /// FTP control port.
    pub port: u16,
    /// Login user name, when configured.
    pub user: Option<String>,
    /// Login password, when configured.
    pub password: Option<String>,
    /// Remote working directory.
    pub dir: String,
    /// Negotiate explicit FTPS.
    pub tls: bool,
    /// Connection timeout.
    pub timeout: Duration,
    /// Encoder settings (delimiter and spreadsheet day limit).
    pub encode: EncodeConfig,
}

impl AppConfig {
    /// Reads the configuration from `GALVANI_*` environment variables,
    /// applying the documented defaults.
    pub fn from_env() -> Result<Self> {
        let timeout_secs = parsed_var("GALVANI_FTP_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let mut encode = EncodeConfig::default();
        if let Some(limit) = parsed_var("GALVANI_XLSX_DAY_LIMIT")? {
            encode.xlsx_day_limit = limit;
        }
        if let Some(delimiter) = parsed_var::<char>("GALVANI_CSV_DELIMITER")? {
            encode.delimiter = delimiter;
        }

        Ok(Self {
            host: env_var("GALVANI_FTP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parsed_var("GALVANI_FTP_PORT")?.unwrap_or(DEFAULT_PORT),
            user: env_var("GALVANI_FTP_USER"),
            password: env_var("GALVANI_FTP_PASSWORD"),
            dir: env_var("GALVANI_FTP_DIR").unwrap_or_else(|| DEFAULT_DIR.to_string()),
            tls: parsed_var("GALVANI_FTP_TLS")?.unwrap_or(false),
            timeout: Duration::from_secs(timeout_secs),
            encode,
        })
    }

    /// Builds the transport configuration for one request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the credentials are not configured.
    /// Checked before any connection attempt.
    pub fn transport(&self) -> galvani_lib::Result<TransportConfig> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => Ok(TransportConfig::new(user.as_str(), password.as_str())
                .with_host(self.host.as_str())
                .with_port(self.port)
                .with_dir(self.dir.as_str())
                .with_tls(self.tls)
                .with_timeout(self.timeout)),
            _ => Err(Error::Config(
                "FTP credentials not configured (set GALVANI_FTP_USER and GALVANI_FTP_PASSWORD)"
                    .to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("dir", &self.dir)
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .field("encode", &self.encode)
            .finish()
    }
}

/// Reads an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Reads and parses an environment variable, failing loudly on malformed
/// values rather than silently falling back.
fn parsed_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_var(name)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {name}: {v}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_without_credentials() -> AppConfig {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: None,
            password: None,
            dir: DEFAULT_DIR.to_string(),
            tls: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            encode: EncodeConfig::default(),
        }
    }

    #[test]
    fn test_transport_requires_credentials() {
        let err = config_without_credentials().transport().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_transport_applies_settings() {
        let mut config = config_without_credentials();
        config.user = Some("user".to_string());
        config.password = Some("secret".to_string());
        config.tls = true;
        config.port = 2121;

        let transport = config.transport().unwrap();
        assert_eq!(transport.host, DEFAULT_HOST);
        assert_eq!(transport.port, 2121);
        assert!(transport.tls);
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut config = config_without_credentials();
        config.password = Some("secret".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
    }
}
