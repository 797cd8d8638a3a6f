//! Remote filename candidates for a market day.
//!
//! The publisher has used a handful of date-keyed naming conventions over
//! time. The fixed patterns are always tried first, in priority order; a
//! directory listing can contribute extra candidates afterwards.

use chrono::NaiveDate;
use galvani_types::date_token;

/// Keyword a listing entry must contain (case-insensitive) to count as a
/// price file during discovery.
pub const LISTING_KEYWORD: &str = "prezzi";

/// Returns the fixed filename candidates for a date, highest priority
/// first.
///
/// # Example
///
/// ```
/// use galvani_fetch::names::static_candidates;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let names = static_candidates(date);
/// assert_eq!(names[0], "20240115MGPPrezzi.xml");
/// ```
#[must_use]
pub fn static_candidates(date: NaiveDate) -> Vec<String> {
    let token = date_token(date);
    vec![
        format!("{token}MGPPrezzi.xml"),
        format!("MGPPrezzi{token}.xml"),
        format!("PrezziMGP{token}.xml"),
    ]
}

/// Selects discovery candidates from a directory listing.
///
/// Keeps entries containing both the date token and [`LISTING_KEYWORD`],
/// drops names already covered by the static candidates, and orders the
/// rest by name length ascending; shorter names are heuristically closer
/// to the canonical pattern. An empty result is not an error.
#[must_use]
pub fn filter_listing(entries: &[String], date: NaiveDate) -> Vec<String> {
    let token = date_token(date);
    let statics = static_candidates(date);

    let mut names: Vec<String> = entries
        .iter()
        .filter(|e| e.contains(&token) && e.to_lowercase().contains(LISTING_KEYWORD))
        .filter(|e| !statics.contains(e))
        .cloned()
        .collect();
    names.sort_by_key(|n| n.len());
    names
}
