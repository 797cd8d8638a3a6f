//! FTP retrieval and XML extraction for the galvani day-ahead price
//! downloader.
//!
//! This crate provides the per-day retrieval pipeline:
//!
//! - [`TransportConfig`] - Connection settings for the remote file server
//! - [`FtpSession`] - One authenticated FTP session per request
//! - [`names`] - Remote filename candidates for a market day
//! - [`fetch_day`] - Candidate iteration tolerant of per-candidate failure
//! - [`extract`] - XML price-entry extraction into [`PriceRecord`]s
//!
//! [`PriceRecord`]: galvani_types::PriceRecord

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galvani-data/galvani/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod day;
mod extract;
pub mod names;
mod session;

pub use config::{
    DEFAULT_DIR, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, TransportConfig,
};
pub use day::{DayPayload, fetch_day};
pub use extract::{ENTRY_TAG, ExtractError, extract, parse_decimal};
pub use session::{FtpSession, TransportError};
