//! Core types for the galvani day-ahead price downloader.
//!
//! This crate provides the fundamental data structures used throughout
//! galvani:
//!
//! - [`PriceRecord`] - One hourly price entry with the national price and
//!   optional zonal prices
//! - [`DateRange`] - Inclusive date range for data retrieval
//! - [`Error`] - Error taxonomy shared across the workspace

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galvani-data/galvani/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod error;
mod record;

pub use date_range::{DateRange, DayIterator};
pub use error::{DateRangeError, Error, Result};
pub use record::{PriceRecord, ZONES, date_token};
