//! Per-day outcome reporting.

use chrono::NaiveDate;
use galvani_types::PriceRecord;
use serde::{Deserialize, Serialize};

/// The assembled dataset together with what happened on each day.
///
/// The records are sorted ascending by `(date, hour)`; the day report
/// covers every date in the requested range, in order, so skipped days
/// are inspectable instead of silently discarded.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// All extracted records, ordered by `(date, hour)`.
    pub records: Vec<PriceRecord>,
    /// One summary per day in the requested range, ascending.
    pub days: Vec<DaySummary>,
}

impl Aggregation {
    /// Returns the summaries of days that contributed no records.
    pub fn skipped_days(&self) -> impl Iterator<Item = &DaySummary> {
        self.days
            .iter()
            .filter(|d| matches!(d.outcome, DayOutcome::Skipped(_)))
    }
}

/// What happened for a single day of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// The market day.
    pub date: NaiveDate,
    /// Outcome of fetching and extracting that day.
    pub outcome: DayOutcome,
}

/// Explicit per-day result value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOutcome {
    /// The day contributed this many records.
    Records(usize),
    /// The payload parsed but contained no entries.
    Empty,
    /// The day was skipped and contributed nothing.
    Skipped(SkipReason),
}

/// Why a day was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No candidate file exists on the server.
    NotPublished,
    /// At least one candidate transfer errored and none succeeded.
    Retrieval,
    /// A payload was retrieved but did not parse as a document.
    UnparseableDocument,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPublished => write!(f, "not published"),
            Self::Retrieval => write!(f, "retrieval failed"),
            Self::UnparseableDocument => write!(f, "unparseable document"),
        }
    }
}
