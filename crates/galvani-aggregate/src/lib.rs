//! Date-range aggregation for the galvani day-ahead price downloader.
//!
//! This crate drives the retrieval pipeline over a full date range:
//!
//! - [`build`] - One session, sequential days, ordered dataset
//! - [`DayReader`] - Seam between the driver and the transport
//! - [`Aggregation`] - The dataset plus a per-day outcome report

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galvani-data/galvani/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod report;

pub use aggregator::{DayReader, build, build_with};
pub use report::{Aggregation, DayOutcome, DaySummary, SkipReason};
