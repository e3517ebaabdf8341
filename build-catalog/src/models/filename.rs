//! Codename and build date recovery from release filenames.
//!
//! Release zips are named `<rom>-<version>-<flavour>-<codename>-<YYYYMMDD>[...].zip`.
//! Fields are located by position, so anything with fewer than five
//! `-`-separated fields is rejected rather than guessed at.

use chrono::NaiveDate;
use indexmap::IndexMap;

const CODENAME_FIELD: usize = 3;
const DATE_FIELD: usize = 4;

/// Long display form, e.g. `Wednesday, 01 January - 2020`.
pub const DISPLAY_DATE_FORMAT: &str = "%A, %d %B - %Y";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FilenameError {
    #[error("{filename}: expected at least {expected} '-' separated fields, found {found}")]
    MissingField {
        filename: String,
        expected: usize,
        found: usize,
    },

    #[error("{filename}: '{value}' is not a YYYYMMDD build date")]
    InvalidDate { filename: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFilename {
    pub codename: String,
    /// Raw `YYYYMMDD` field, comparable as a string.
    pub date: String,
}

impl BuildFilename {
    pub fn parse(filename: &str) -> Result<Self, FilenameError> {
        let stem = strip_extension(filename);
        let fields: Vec<&str> = stem.split('-').collect();
        if fields.len() <= DATE_FIELD {
            return Err(FilenameError::MissingField {
                filename: filename.to_string(),
                expected: DATE_FIELD + 1,
                found: fields.len(),
            });
        }

        let date = fields[DATE_FIELD];
        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FilenameError::InvalidDate {
                filename: filename.to_string(),
                value: date.to_string(),
            });
        }
        // Reject impossible calendar dates up front
        parse_date(filename, date)?;

        Ok(Self {
            codename: fields[CODENAME_FIELD].to_string(),
            date: date.to_string(),
        })
    }

    pub fn display_date(&self) -> Result<String, FilenameError> {
        format_build_date(&self.date)
    }
}

/// Reformat a `YYYYMMDD` string for display.
pub fn format_build_date(date: &str) -> Result<String, FilenameError> {
    Ok(parse_date(date, date)?.format(DISPLAY_DATE_FORMAT).to_string())
}

/// Newest build date per codename, in first-seen order.
///
/// Dates are compared as raw `YYYYMMDD` strings, which orders them
/// chronologically because they are zero padded.
pub fn latest_build_dates<'a>(
    filenames: impl IntoIterator<Item = &'a str>,
) -> Result<IndexMap<String, String>, FilenameError> {
    let mut latest: IndexMap<String, String> = IndexMap::new();
    for filename in filenames {
        let parsed = BuildFilename::parse(filename)?;
        match latest.get_mut(&parsed.codename) {
            Some(current) if *current >= parsed.date => {}
            Some(current) => *current = parsed.date,
            None => {
                latest.insert(parsed.codename, parsed.date);
            }
        }
    }
    Ok(latest)
}

fn parse_date(filename: &str, value: &str) -> Result<NaiveDate, FilenameError> {
    NaiveDate::parse_from_str(value, "%Y%m%d").map_err(|_| FilenameError::InvalidDate {
        filename: filename.to_string(),
        value: value.to_string(),
    })
}

// Only the final extension goes, like a splitext would do.
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 && !filename[idx..].contains('/') => &filename[..idx],
        _ => filename,
    }
}
