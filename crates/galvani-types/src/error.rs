//! Error types for galvani.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for galvani operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or encoding a price dataset.
///
/// Per-day fetch and parse failures are deliberately not represented here:
/// they are recovered locally and reported as skipped days, never as a
/// request-level error.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid date range supplied by the caller.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// Transport credentials or settings are not configured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connecting or logging in to the remote server failed.
    ///
    /// Fatal for the whole request; no partial dataset is returned.
    #[error("Transport error: {0}")]
    Transport(String),

    /// No date in the requested range yielded any record.
    #[error("No price data available between {start} and {end}")]
    NoData {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// Output encoding failed.
    #[error("Format error: {0}")]
    Format(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message_names_bounds() {
        let err = Error::NoData {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "No price data available between 2024-01-01 and 2024-01-02"
        );
    }

    #[test]
    fn test_date_range_error_converts() {
        let err: Error = DateRangeError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
        .into();
        assert!(matches!(err, Error::DateRange(_)));
    }
}
