//! Rust library for downloading Italian day-ahead market (MGP) hourly
//! prices.
//!
//! This is a facade crate that re-exports functionality from the galvani
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use galvani_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = TransportConfig::new("user", "password");
//!     let range = DateRange::new(
//!         chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         chrono::NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
//!     )?;
//!
//!     let aggregation = build(range, &transport)?;
//!     let output = encode(
//!         &aggregation.records,
//!         OutputFormat::Csv,
//!         range,
//!         &EncodeConfig::default(),
//!     )?;
//!     std::fs::write(&output.file_name, output.bytes)?;
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galvani-data/galvani/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use galvani_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use galvani_fetch::{
    DEFAULT_DIR, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DayPayload, ExtractError,
    FtpSession, TransportConfig, TransportError, extract, fetch_day, names,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use galvani_aggregate::{Aggregation, DayOutcome, DayReader, DaySummary, SkipReason, build};

// Re-export encoders
#[cfg(feature = "format")]
pub use galvani_format::{
    DelimitedLines, EncodeConfig, EncodedOutput, FormatError, OutputFormat, encode,
    encode_delimited, encode_workbook, file_name,
};

/// Prelude module for convenient imports.
///
/// ```
/// use galvani_lib::prelude::*;
/// ```
pub mod prelude {
    pub use galvani_types::{DateRange, DateRangeError, Error, PriceRecord, Result, ZONES};

    #[cfg(feature = "fetch")]
    pub use galvani_fetch::{DayPayload, FtpSession, TransportConfig, fetch_day};

    #[cfg(feature = "aggregate")]
    pub use galvani_aggregate::{Aggregation, DayOutcome, DaySummary, SkipReason, build};

    #[cfg(feature = "format")]
    pub use galvani_format::{
        DelimitedLines, EncodeConfig, EncodedOutput, OutputFormat, encode, file_name,
    };
}
