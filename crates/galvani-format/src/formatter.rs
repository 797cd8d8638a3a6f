//! Output format dispatch and the size-threshold policy.

use galvani_types::{DateRange, PriceRecord};
use thiserror::Error;

use crate::{encode_delimited, encode_workbook};

/// Default maximum range size, in days, for genuine spreadsheet output.
pub const DEFAULT_XLSX_DAY_LIMIT: usize = 28;

/// MIME type for delimited text output.
const CSV_MIME: &str = "text/csv";

/// MIME type for spreadsheet output.
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Delimited text.
    #[default]
    Csv,
    /// Spreadsheet workbook.
    Xlsx,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Returns the MIME type advertised for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => CSV_MIME,
            Self::Xlsx => XLSX_MIME,
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Xlsx]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during encoding.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook construction failed.
    #[error("Spreadsheet error: {0}")]
    Xlsx(String),
}

impl From<rust_xlsxwriter::XlsxError> for FormatError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(e.to_string())
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Copy)]
pub struct EncodeConfig {
    /// Field delimiter for delimited text output.
    pub delimiter: char,
    /// Maximum range size, in days, for genuine spreadsheet output.
    pub xlsx_day_limit: usize,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            xlsx_day_limit: DEFAULT_XLSX_DAY_LIMIT,
        }
    }
}

/// An encoded dataset ready to hand to the caller.
#[derive(Debug, Clone)]
pub struct EncodedOutput {
    /// The serialized payload.
    pub bytes: Vec<u8>,
    /// MIME type to advertise.
    pub mime_type: &'static str,
    /// Attachment file name.
    pub file_name: String,
    /// True when the threshold policy substituted delimited content for a
    /// spreadsheet request.
    pub degraded: bool,
}

/// Returns the attachment file name for a format and range.
#[must_use]
pub fn file_name(format: OutputFormat, range: DateRange) -> String {
    format!(
        "pun_{}_{}.{}",
        range.start,
        range.end,
        format.extension()
    )
}

/// Encodes an ordered dataset in the requested format.
///
/// Spreadsheet output is produced as a genuine workbook only when the
/// range spans at most `xlsx_day_limit` days. Above the limit the content
/// falls back to delimited text while keeping the spreadsheet name and
/// MIME type, bounding memory on large requests; the substitution is
/// flagged on the returned output and logged.
///
/// # Errors
///
/// Returns an error if workbook construction fails.
pub fn encode(
    records: &[PriceRecord],
    format: OutputFormat,
    range: DateRange,
    config: &EncodeConfig,
) -> Result<EncodedOutput, FormatError> {
    let file_name = file_name(format, range);
    match format {
        OutputFormat::Csv => Ok(EncodedOutput {
            bytes: encode_delimited(records, config.delimiter).into_bytes(),
            mime_type: format.mime_type(),
            file_name,
            degraded: false,
        }),
        OutputFormat::Xlsx if range.total_days() <= config.xlsx_day_limit => {
            Ok(EncodedOutput {
                bytes: encode_workbook(records)?,
                mime_type: format.mime_type(),
                file_name,
                degraded: false,
            })
        }
        OutputFormat::Xlsx => {
            tracing::warn!(
                days = range.total_days(),
                limit = config.xlsx_day_limit,
                "Range exceeds spreadsheet limit, emitting delimited content"
            );
            Ok(EncodedOutput {
                bytes: encode_delimited(records, config.delimiter).into_bytes(),
                mime_type: format.mime_type(),
                file_name,
                degraded: true,
            })
        }
    }
}
