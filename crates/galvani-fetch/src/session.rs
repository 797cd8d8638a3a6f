//! FTP session owned by a single request.

use std::net::{SocketAddr, ToSocketAddrs};

use suppaftp::native_tls::TlsConnector;
use suppaftp::types::FileType;
use suppaftp::{FtpError, Mode, NativeTlsConnector, NativeTlsFtpStream};
use thiserror::Error;

use crate::TransportConfig;

/// Errors that can occur while opening or using the transport session.
///
/// Any of these is fatal for the whole request when raised by
/// [`FtpSession::open`]; retrieval errors for individual files are handled
/// per candidate by the day fetcher instead.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Host name did not resolve to a socket address.
    #[error("Cannot resolve host {host}: {reason}")]
    Resolve {
        /// The configured host.
        host: String,
        /// The resolver failure.
        reason: String,
    },

    /// TLS connector setup failed.
    #[error("TLS setup failed: {0}")]
    Tls(String),

    /// FTP protocol or connection error.
    #[error("FTP error: {0}")]
    Ftp(#[from] FtpError),
}

/// One authenticated FTP session, exclusively owned by a single request.
///
/// The session is opened once per request, reused for every day in the
/// range, and closed exactly once on every exit path.
pub struct FtpSession {
    stream: NativeTlsFtpStream,
}

impl FtpSession {
    /// Connects, optionally negotiates FTPS, authenticates, switches to
    /// binary transfers in passive mode, and changes into the configured
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is unreachable, the TLS or FTP
    /// handshake fails, the credentials are rejected, or the working
    /// directory cannot be entered.
    pub fn open(config: &TransportConfig) -> Result<Self, TransportError> {
        let addr = resolve(&config.host, config.port)?;
        let mut stream = NativeTlsFtpStream::connect_timeout(addr, config.timeout)?;

        if config.tls {
            let connector = TlsConnector::new().map_err(|e| TransportError::Tls(e.to_string()))?;
            stream = stream.into_secure(NativeTlsConnector::from(connector), &config.host)?;
        }

        stream.login(&config.user, &config.password)?;
        stream.transfer_type(FileType::Binary)?;
        stream.set_mode(Mode::Passive);
        if !config.dir.is_empty() {
            stream.cwd(&config.dir)?;
        }

        tracing::info!(host = %config.host, dir = %config.dir, tls = config.tls, "FTP session established");
        Ok(Self { stream })
    }

    /// Retrieves one remote file into memory as a binary transfer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or the transfer fails.
    pub fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, TransportError> {
        Ok(self.stream.retr_as_buffer(name)?.into_inner())
    }

    /// Lists the file names in the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the listing.
    pub fn list_names(&mut self) -> Result<Vec<String>, TransportError> {
        Ok(self.stream.nlst(None)?)
    }

    /// Closes the session with a best-effort `QUIT`.
    ///
    /// Failures while closing are swallowed; the underlying connection is
    /// dropped either way.
    pub fn close(mut self) {
        if let Err(e) = self.stream.quit() {
            tracing::debug!(error = %e, "Ignoring error while closing FTP session");
        }
    }
}

impl std::fmt::Debug for FtpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtpSession").finish_non_exhaustive()
    }
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr, TransportError> {
    let mut addrs = (host, port).to_socket_addrs().map_err(|e| TransportError::Resolve {
        host: host.to_string(),
        reason: e.to_string(),
    })?;
    addrs.next().ok_or_else(|| TransportError::Resolve {
        host: host.to_string(),
        reason: "no addresses returned".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_address() {
        let addr = resolve("127.0.0.1", 21).unwrap();
        assert_eq!(addr.port(), 21);
    }

    #[test]
    fn test_resolve_invalid_host() {
        let err = resolve("host.invalid.", 21).unwrap_err();
        assert!(matches!(err, TransportError::Resolve { .. }));
    }
}
