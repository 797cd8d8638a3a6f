//! Hourly price record representation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Zonal market areas published alongside the national price, in the
/// canonical column order used for output.
pub const ZONES: &[&str] = &["NORD", "CNOR", "CSUD", "SUD", "SICI", "SARD", "CALA"];

/// One hourly price entry from a daily market results file.
///
/// The upstream publisher numbers hours 1 through 24. The hour is carried
/// verbatim; it is only compared, never interpreted as a clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// The market day this entry belongs to.
    pub date: NaiveDate,
    /// Hour of the market day as published (1-24).
    pub hour: u32,
    /// National reference price (PUN), if the field was parseable.
    pub pun: Option<f64>,
    /// Zonal prices keyed by zone name, only for zones present in the
    /// source payload.
    pub zones: BTreeMap<String, f64>,
}

impl PriceRecord {
    /// Creates a record with no zonal prices.
    #[must_use]
    pub const fn new(date: NaiveDate, hour: u32, pun: Option<f64>) -> Self {
        Self {
            date,
            hour,
            pun,
            zones: BTreeMap::new(),
        }
    }

    /// Returns the price for the given zone, if present.
    #[must_use]
    pub fn zone(&self, name: &str) -> Option<f64> {
        self.zones.get(name).copied()
    }

    /// Returns the sort key used for dataset ordering.
    #[must_use]
    pub const fn sort_key(&self) -> (NaiveDate, u32) {
        (self.date, self.hour)
    }
}

/// Formats a date as the `YYYYMMDD` token used in remote file names.
#[must_use]
pub fn date_token(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_zone_lookup() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut record = PriceRecord::new(date, 1, Some(95.0));
        record.zones.insert("NORD".to_string(), 98.5);

        assert_eq!(record.zone("NORD"), Some(98.5));
        assert_eq!(record.zone("SICI"), None);
    }

    #[test]
    fn test_sort_key_orders_by_date_then_hour() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let late = PriceRecord::new(jan1, 24, None);
        let early_next = PriceRecord::new(jan2, 1, None);
        assert!(late.sort_key() < early_next.sort_key());
    }

    #[test]
    fn test_date_token() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_token(date), "20240307");
    }
}
