//! Output encoders for the galvani day-ahead price downloader.
//!
//! This crate serializes the ordered dataset:
//!
//! - [`DelimitedLines`] - Lazy, single-consumption CSV line stream
//! - [`encode_delimited`] - Eager CSV assembly
//! - [`encode_workbook`] - Real XLSX container output
//! - [`encode`] - Format dispatch with the size-threshold policy

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galvani-data/galvani/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod xlsx;

pub use crate::csv::{DelimitedLines, columns, encode_delimited};
pub use crate::xlsx::{SHEET_NAME, encode_workbook};
pub use formatter::{
    DEFAULT_XLSX_DAY_LIMIT, EncodeConfig, EncodedOutput, FormatError, OutputFormat, encode,
    file_name,
};
