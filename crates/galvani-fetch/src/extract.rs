//! Price-entry extraction from daily XML payloads.
//!
//! The daily files are XML documents with one element per hourly entry.
//! Element names are matched by local name only; the publisher has shipped
//! the same payloads with and without namespace prefixes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use galvani_types::{PriceRecord, ZONES};
use roxmltree::{Document, Node};
use thiserror::Error;

/// Local name of the element representing one hourly price entry.
pub const ENTRY_TAG: &str = "Prezzi";

/// Local name of the hour field.
const HOUR_TAG: &str = "Ora";

/// Local name of the national reference price field.
const PUN_TAG: &str = "PUN";

/// Errors that can occur during extraction.
///
/// Raised only when the whole payload fails to parse as a document; the
/// caller records the day as skipped. Field-level problems never abort
/// extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The payload is not a well-formed XML document.
    #[error("Invalid price document: {0}")]
    Document(#[from] roxmltree::Error),
}

/// Parses one day's payload into hourly price records.
///
/// Every entry element contributes one record with its hour and national
/// price. Zonal prices are attached when present under their known names;
/// absent zones are omitted, not defaulted. A price field that is present
/// but not parseable yields `None` for that field. Entries whose hour
/// field does not parse are dropped, since a record without an hour cannot
/// be ordered.
///
/// # Errors
///
/// Returns an error if the payload does not parse as XML at all.
pub fn extract(payload: &[u8], date: NaiveDate) -> Result<Vec<PriceRecord>, ExtractError> {
    let text = String::from_utf8_lossy(payload);
    let doc = Document::parse(&text)?;

    let mut records = Vec::new();
    for entry in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == ENTRY_TAG)
    {
        let Some(hour) = field_text(entry, HOUR_TAG).and_then(|s| s.trim().parse::<u32>().ok())
        else {
            tracing::debug!(%date, "Dropping entry with unparseable hour field");
            continue;
        };

        let pun = field_text(entry, PUN_TAG).and_then(parse_decimal);
        let mut zones = BTreeMap::new();
        for zone in ZONES {
            if let Some(value) = field_text(entry, zone).and_then(parse_decimal) {
                zones.insert((*zone).to_string(), value);
            }
        }

        records.push(PriceRecord {
            date,
            hour,
            pun,
            zones,
        });
    }

    Ok(records)
}

/// Returns the text of the first child element with the given local name.
fn field_text<'a, 'input>(entry: Node<'a, 'input>, name: &str) -> Option<&'a str> {
    entry
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == name)?
        .text()
}

/// Parses a decimal accepting either `.` or `,` as the fractional
/// separator.
#[must_use]
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<NewDataSet>
  <Prezzi>
    <Data>20240115</Data>
    <Mercato>MGP</Mercato>
    <Ora>1</Ora>
    <PUN>95,123456</PUN>
    <NORD>98,50</NORD>
    <SUD>92,00</SUD>
  </Prezzi>
  <Prezzi>
    <Data>20240115</Data>
    <Mercato>MGP</Mercato>
    <Ora>2</Ora>
    <PUN>90.75</PUN>
  </Prezzi>
</NewDataSet>"#;

    #[test]
    fn test_extract_reads_entries_in_document_order() {
        let records = extract(SAMPLE.as_bytes(), date()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hour, 1);
        assert_eq!(records[1].hour, 2);
        assert_relative_eq!(records[0].pun.unwrap(), 95.123456);
        assert_relative_eq!(records[1].pun.unwrap(), 90.75);
    }

    #[test]
    fn test_extract_attaches_only_present_zones() {
        let records = extract(SAMPLE.as_bytes(), date()).unwrap();

        assert_relative_eq!(records[0].zone("NORD").unwrap(), 98.5);
        assert_relative_eq!(records[0].zone("SUD").unwrap(), 92.0);
        assert_eq!(records[0].zone("SICI"), None);
        assert!(records[1].zones.is_empty());
    }

    #[test]
    fn test_extract_ignores_namespace_prefixes() {
        let payload = r#"<?xml version="1.0"?>
<g:NewDataSet xmlns:g="http://example.com/mgp">
  <g:Prezzi>
    <g:Ora>5</g:Ora>
    <g:PUN>101,25</g:PUN>
  </g:Prezzi>
</g:NewDataSet>"#;
        let records = extract(payload.as_bytes(), date()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hour, 5);
        assert_relative_eq!(records[0].pun.unwrap(), 101.25);
    }

    #[test]
    fn test_extract_unparseable_price_becomes_null() {
        let payload = r"<NewDataSet>
  <Prezzi>
    <Ora>3</Ora>
    <PUN>n.d.</PUN>
    <NORD>abc</NORD>
  </Prezzi>
</NewDataSet>";
        let records = extract(payload.as_bytes(), date()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pun, None);
        assert!(records[0].zones.is_empty());
    }

    #[test]
    fn test_extract_drops_entry_without_hour() {
        let payload = r"<NewDataSet>
  <Prezzi>
    <Ora>uno</Ora>
    <PUN>95,0</PUN>
  </Prezzi>
  <Prezzi>
    <Ora>2</Ora>
    <PUN>96,0</PUN>
  </Prezzi>
</NewDataSet>";
        let records = extract(payload.as_bytes(), date()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hour, 2);
    }

    #[test]
    fn test_extract_duplicate_entries_propagate() {
        let payload = r"<NewDataSet>
  <Prezzi><Ora>1</Ora><PUN>95,0</PUN></Prezzi>
  <Prezzi><Ora>1</Ora><PUN>95,0</PUN></Prezzi>
</NewDataSet>";
        let records = extract(payload.as_bytes(), date()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_extract_rejects_garbage_payload() {
        assert!(extract(b"not xml at all", date()).is_err());
    }

    #[test]
    fn test_extract_empty_document_yields_no_records() {
        let records = extract(b"<NewDataSet></NewDataSet>", date()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_decimal_separators() {
        assert_relative_eq!(parse_decimal("95,5").unwrap(), 95.5);
        assert_relative_eq!(parse_decimal("95.5").unwrap(), 95.5);
        assert_relative_eq!(parse_decimal(" 120 ").unwrap(), 120.0);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("n.d."), None);
    }
}
