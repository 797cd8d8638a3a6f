//! Range driver: one session, sequential days, ordered dataset.

use chrono::NaiveDate;
use galvani_fetch::{DayPayload, FtpSession, TransportConfig, extract, fetch_day};
use galvani_types::{DateRange, Error, PriceRecord, Result};

use crate::{Aggregation, DayOutcome, DaySummary, SkipReason};

/// Seam between the range driver and the transport.
///
/// The production implementation reads through an open FTP session; tests
/// substitute an in-memory reader.
pub trait DayReader {
    /// Retrieves the raw payload for one date, or its absence.
    fn read_day(&mut self, date: NaiveDate) -> DayPayload;
}

/// Reader backed by an open FTP session.
struct SessionReader<'a> {
    session: &'a mut FtpSession,
}

impl DayReader for SessionReader<'_> {
    fn read_day(&mut self, date: NaiveDate) -> DayPayload {
        fetch_day(self.session, date)
    }
}

/// Builds the ordered dataset for a date range.
///
/// Opens exactly one transport session for the whole range, fetches and
/// extracts each day in ascending order, and closes the session on every
/// exit path before returning.
///
/// # Errors
///
/// Returns [`Error::Transport`] if the session cannot be established, or
/// [`Error::NoData`] if no day in the range yielded any record. Per-day
/// failures are reported in the [`Aggregation`] day summaries instead.
pub fn build(range: DateRange, config: &TransportConfig) -> Result<Aggregation> {
    let mut session = FtpSession::open(config).map_err(|e| Error::Transport(e.to_string()))?;
    let result = build_with(&mut SessionReader { session: &mut session }, range);
    session.close();
    result
}

/// Builds the dataset through an arbitrary [`DayReader`].
///
/// Days are visited strictly in ascending order, one at a time; per-day
/// extraction order is preserved, then one stable sort by `(date, hour)`
/// orders the full accumulator.
///
/// # Errors
///
/// Returns [`Error::NoData`] if the accumulator is empty after the whole
/// range has been attempted.
pub fn build_with<R: DayReader>(reader: &mut R, range: DateRange) -> Result<Aggregation> {
    let mut records: Vec<PriceRecord> = Vec::new();
    let mut days = Vec::with_capacity(range.total_days());

    for date in range.days() {
        let outcome = match reader.read_day(date) {
            DayPayload::Present(payload) => match extract(&payload, date) {
                Ok(day_records) if day_records.is_empty() => DayOutcome::Empty,
                Ok(day_records) => {
                    let count = day_records.len();
                    records.extend(day_records);
                    DayOutcome::Records(count)
                }
                Err(e) => {
                    tracing::warn!(%date, error = %e, "Skipping day with unparseable payload");
                    DayOutcome::Skipped(SkipReason::UnparseableDocument)
                }
            },
            DayPayload::Absent { failed_attempts: 0 } => {
                tracing::debug!(%date, "No file published for day");
                DayOutcome::Skipped(SkipReason::NotPublished)
            }
            DayPayload::Absent { failed_attempts } => {
                tracing::warn!(%date, failed_attempts, "Skipping day after failed retrievals");
                DayOutcome::Skipped(SkipReason::Retrieval)
            }
        };
        days.push(DaySummary { date, outcome });
    }

    // Stable sort: ties keep per-day extraction order, duplicates propagate.
    records.sort_by_key(PriceRecord::sort_key);

    if records.is_empty() {
        return Err(Error::NoData {
            start: range.start,
            end: range.end,
        });
    }

    Ok(Aggregation { records, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    struct FakeReader {
        payloads: HashMap<NaiveDate, DayPayload>,
    }

    impl FakeReader {
        fn new(payloads: impl IntoIterator<Item = (NaiveDate, DayPayload)>) -> Self {
            Self {
                payloads: payloads.into_iter().collect(),
            }
        }
    }

    impl DayReader for FakeReader {
        fn read_day(&mut self, date: NaiveDate) -> DayPayload {
            self.payloads
                .remove(&date)
                .unwrap_or(DayPayload::Absent { failed_attempts: 0 })
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn payload(entries: &[(&str, &str)]) -> DayPayload {
        let mut doc = String::from("<NewDataSet>");
        for (hour, pun) in entries {
            doc.push_str(&format!("<Prezzi><Ora>{hour}</Ora><PUN>{pun}</PUN></Prezzi>"));
        }
        doc.push_str("</NewDataSet>");
        DayPayload::Present(doc.into_bytes())
    }

    #[test]
    fn test_build_with_orders_across_days() {
        let mut reader = FakeReader::new([
            (day(2), payload(&[("2", "90,0"), ("1", "91,0")])),
            (day(1), payload(&[("1", "95,0"), ("2", "96,0")])),
        ]);
        let range = DateRange::new(day(1), day(2)).unwrap();

        let aggregation = build_with(&mut reader, range).unwrap();
        let keys: Vec<_> = aggregation.records.iter().map(|r| (r.date, r.hour)).collect();

        assert_eq!(
            keys,
            vec![(day(1), 1), (day(1), 2), (day(2), 1), (day(2), 2)]
        );
    }

    #[test]
    fn test_build_with_stable_on_duplicates() {
        // Two entries for the same hour: extraction order must survive the sort.
        let mut reader =
            FakeReader::new([(day(1), payload(&[("1", "95,0"), ("1", "96,0")]))]);
        let range = DateRange::single_day(day(1));

        let aggregation = build_with(&mut reader, range).unwrap();

        assert_eq!(aggregation.records.len(), 2);
        assert_relative_eq!(aggregation.records[0].pun.unwrap(), 95.0);
        assert_relative_eq!(aggregation.records[1].pun.unwrap(), 96.0);
    }

    #[test]
    fn test_build_with_absent_day_is_skipped_not_fatal() {
        let mut reader = FakeReader::new([(day(3), payload(&[("1", "88,5")]))]);
        let range = DateRange::new(day(1), day(3)).unwrap();

        let aggregation = build_with(&mut reader, range).unwrap();

        assert_eq!(aggregation.records.len(), 1);
        assert_eq!(aggregation.days.len(), 3);
        assert_eq!(
            aggregation.days[0].outcome,
            DayOutcome::Skipped(SkipReason::NotPublished)
        );
        assert_eq!(aggregation.days[2].outcome, DayOutcome::Records(1));
        assert_eq!(aggregation.skipped_days().count(), 2);
    }

    #[test]
    fn test_build_with_every_day_absent_is_no_data() {
        let mut reader = FakeReader {
            payloads: HashMap::new(),
        };
        let range = DateRange::new(day(1), day(2)).unwrap();

        let err = build_with(&mut reader, range).unwrap_err();
        assert!(matches!(err, Error::NoData { .. }));
    }

    #[test]
    fn test_build_with_unparseable_day_is_skipped() {
        let mut reader = FakeReader::new([
            (day(1), DayPayload::Present(b"not xml".to_vec())),
            (day(2), payload(&[("1", "80,0")])),
        ]);
        let range = DateRange::new(day(1), day(2)).unwrap();

        let aggregation = build_with(&mut reader, range).unwrap();

        assert_eq!(aggregation.records.len(), 1);
        assert_eq!(
            aggregation.days[0].outcome,
            DayOutcome::Skipped(SkipReason::UnparseableDocument)
        );
    }

    #[test]
    fn test_build_with_failed_retrievals_reported() {
        let mut reader = FakeReader::new([
            (day(1), DayPayload::Absent { failed_attempts: 2 }),
            (day(2), payload(&[("1", "80,0")])),
        ]);
        let range = DateRange::new(day(1), day(2)).unwrap();

        let aggregation = build_with(&mut reader, range).unwrap();
        assert_eq!(
            aggregation.days[0].outcome,
            DayOutcome::Skipped(SkipReason::Retrieval)
        );
    }

    #[test]
    fn test_build_with_empty_payload_is_empty_not_skipped() {
        let mut reader = FakeReader::new([
            (day(1), payload(&[])),
            (day(2), payload(&[("1", "80,0")])),
        ]);
        let range = DateRange::new(day(1), day(2)).unwrap();

        let aggregation = build_with(&mut reader, range).unwrap();
        assert_eq!(aggregation.days[0].outcome, DayOutcome::Empty);
        assert_eq!(aggregation.skipped_days().count(), 0);
    }

    #[test]
    fn test_build_with_no_date_outside_range() {
        let mut reader = FakeReader::new([
            (day(1), payload(&[("1", "95,0")])),
            (day(5), payload(&[("1", "99,0")])),
        ]);
        let range = DateRange::new(day(1), day(2)).unwrap();

        let aggregation = build_with(&mut reader, range).unwrap();
        assert!(aggregation.records.iter().all(|r| range.contains(r.date)));
        assert_eq!(aggregation.records.len(), 1);
    }
}
