//! Delimited text output.

use galvani_types::{PriceRecord, ZONES};

/// Fixed leading columns of every dataset.
const BASE_COLUMNS: [&str; 3] = ["Data", "Ora", "PUN"];

/// Returns the column names for a dataset: the fixed columns plus each
/// zone column carried by at least one record, in canonical zone order.
#[must_use]
pub fn columns(records: &[PriceRecord]) -> Vec<&'static str> {
    let mut cols = BASE_COLUMNS.to_vec();
    for zone in ZONES {
        if records.iter().any(|r| r.zones.contains_key(*zone)) {
            cols.push(*zone);
        }
    }
    cols
}

/// Lazy, single-consumption stream of delimited output lines.
///
/// Yields the header first, then one line per record, producing each line
/// only when pulled, so memory stays constant regardless of range length.
/// Like any iterator it cannot be restarted once consumed.
#[derive(Debug)]
pub struct DelimitedLines<'a> {
    records: std::slice::Iter<'a, PriceRecord>,
    columns: Vec<&'static str>,
    delimiter: char,
    header_pending: bool,
}

impl<'a> DelimitedLines<'a> {
    /// Creates a line stream over an ordered dataset.
    #[must_use]
    pub fn new(records: &'a [PriceRecord], delimiter: char) -> Self {
        Self {
            records: records.iter(),
            columns: columns(records),
            delimiter,
            header_pending: true,
        }
    }

    fn header(&self) -> String {
        self.columns.join(&self.delimiter.to_string())
    }

    fn record_line(&self, record: &PriceRecord) -> String {
        let d = self.delimiter;
        let mut line = format!("{}{d}{}{d}", record.date.format("%Y-%m-%d"), record.hour);
        push_price(&mut line, record.pun);
        for zone in &self.columns[BASE_COLUMNS.len()..] {
            line.push(d);
            push_price(&mut line, record.zone(zone));
        }
        line
    }
}

impl Iterator for DelimitedLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.header_pending {
            self.header_pending = false;
            return Some(self.header());
        }
        self.records.next().map(|r| self.record_line(r))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len() + usize::from(self.header_pending);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DelimitedLines<'_> {}

/// A missing price serializes as an empty field.
fn push_price(line: &mut String, price: Option<f64>) {
    if let Some(value) = price {
        line.push_str(&value.to_string());
    }
}

/// Assembles the full delimited text eagerly, one trailing newline per
/// line.
#[must_use]
pub fn encode_delimited(records: &[PriceRecord], delimiter: char) -> String {
    let mut out = String::new();
    for line in DelimitedLines::new(records, delimiter) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
