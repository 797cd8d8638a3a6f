//! Transport configuration for the remote file server.

use std::time::Duration;

/// Default FTP host publishing the daily market results.
pub const DEFAULT_HOST: &str = "download.mercatoelettrico.org";

/// Default FTP control port.
pub const DEFAULT_PORT: u16 = 21;

/// Default remote directory holding the per-day price files.
pub const DEFAULT_DIR: &str = "/MercatiElettrici/MGP_Prezzi";

/// Default connection timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote file server.
///
/// Constructed once at startup from validated caller input and passed by
/// reference into the pipeline; nothing reads ambient global state.
#[derive(Clone)]
pub struct TransportConfig {
    /// Remote host name.
    pub host: String,
    /// Control connection port.
    pub port: u16,
    /// Login user name.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Working directory to change into after login.
    pub dir: String,
    /// Negotiate an encrypted control and data channel (explicit FTPS).
    pub tls: bool,
    /// Connection timeout.
    pub timeout: Duration,
}

impl TransportConfig {
    /// Creates a configuration with the given credentials and default
    /// host, port, directory, and timeout.
    #[must_use]
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            dir: DEFAULT_DIR.to_string(),
            tls: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the remote host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the control connection port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the remote working directory.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Enables or disables explicit FTPS.
    #[must_use]
    pub const fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("dir", &self.dir)
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .finish()
    }
}
