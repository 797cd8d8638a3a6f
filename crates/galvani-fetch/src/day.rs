//! Per-day retrieval over an open session.

use chrono::NaiveDate;
use suppaftp::{FtpError, Status};

use crate::{FtpSession, TransportError, names};

/// The raw payload fetched for one market day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayPayload {
    /// A candidate file was retrieved.
    Present(Vec<u8>),
    /// No candidate succeeded. Treated as "no data published for this
    /// date", a normal outcome rather than a fault.
    Absent {
        /// Retrievals that errored rather than reporting the file missing.
        failed_attempts: usize,
    },
}

impl DayPayload {
    /// Returns true if a payload was retrieved.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Fetches the raw bytes for one date, trying every filename candidate.
///
/// Static candidates are tried first, in priority order; if all of them
/// fail, a directory listing supplies discovery candidates. A retrieval
/// failure for one candidate means "try the next", never an error for the
/// request. Listing failure is equally non-fatal.
pub fn fetch_day(session: &mut FtpSession, date: NaiveDate) -> DayPayload {
    let mut failed_attempts = 0;

    for name in names::static_candidates(date) {
        match try_candidate(session, date, &name) {
            Ok(bytes) => return DayPayload::Present(bytes),
            Err(errored) => failed_attempts += usize::from(errored),
        }
    }

    match session.list_names() {
        Ok(entries) => {
            for name in names::filter_listing(&entries, date) {
                match try_candidate(session, date, &name) {
                    Ok(bytes) => return DayPayload::Present(bytes),
                    Err(errored) => failed_attempts += usize::from(errored),
                }
            }
        }
        Err(e) => {
            tracing::debug!(%date, error = %e, "Directory listing unavailable, skipping discovery");
        }
    }

    tracing::debug!(%date, failed_attempts, "No candidate yielded a payload");
    DayPayload::Absent { failed_attempts }
}

/// Tries one candidate. `Err(true)` marks a transfer that errored rather
/// than reporting the file missing.
fn try_candidate(
    session: &mut FtpSession,
    date: NaiveDate,
    name: &str,
) -> Result<Vec<u8>, bool> {
    match session.retrieve(name) {
        Ok(bytes) => {
            tracing::debug!(%date, name, size = bytes.len(), "Retrieved day file");
            Ok(bytes)
        }
        Err(e) => {
            let missing = file_unavailable(&e);
            tracing::debug!(%date, name, error = %e, missing, "Candidate failed, trying next");
            Err(!missing)
        }
    }
}

/// True when the error is the server plainly reporting the file missing,
/// as opposed to a failed transfer.
fn file_unavailable(err: &TransportError) -> bool {
    matches!(
        err,
        TransportError::Ftp(FtpError::UnexpectedResponse(response))
            if response.status == Status::FileUnavailable
    )
}
