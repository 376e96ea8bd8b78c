//! Cleaning of the roster: whitespace, dates and duplicates.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;

use crate::config::Field;
use crate::table::{Record, Roster};

/// The textual form of every date after normalization.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Day first: the canonical form must read back as itself.
const DATE_FORMATS: [&str; 6] = [
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d", "%Y%m%d",
];

const SHORT_YEAR_FORMATS: [&str; 2] = ["%d/%m/%y", "%d-%m-%y"];

/// Best-effort reading of a date. Returns `None` for anything it cannot read.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    // Years below 1000 would not read back from the canonical form.
    let readable = |d: &NaiveDate| d.year() >= 1000;
    for fmt in DATETIME_FORMATS {
        if let Some(d) = NaiveDateTime::parse_from_str(text, fmt)
            .ok()
            .map(|dt| dt.date())
            .filter(readable)
        {
            return Some(d);
        }
    }
    for fmt in DATE_FORMATS {
        if let Some(d) = NaiveDate::parse_from_str(text, fmt).ok().filter(readable) {
            return Some(d);
        }
    }
    SHORT_YEAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn clean_value(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn clean_record(record: &Record) -> Record {
    let mut res = Record {
        extra: record.extra.iter().map(|v| clean_value(v.as_deref())).collect(),
        ..Record::default()
    };
    for field in Field::ALL {
        let value = clean_value(record.get(field));
        *res.get_mut(field) = match field {
            Field::Date => value
                .as_deref()
                .and_then(parse_date)
                .map(|d| d.format(DATE_FORMAT).to_string()),
            _ => value,
        };
    }
    res
}

/// Trims every value, rewrites the dates as `DD/MM/YYYY` and drops the rows
/// that repeat an earlier row.
///
/// Blank values and unreadable dates become empty. Calling it again on its
/// own output changes nothing.
pub fn normalize(roster: &Roster) -> Roster {
    let mut seen: HashSet<Record> = HashSet::new();
    let mut records: Vec<Record> = Vec::new();
    for record in roster.records.iter() {
        let cleaned = clean_record(record);
        if record.date.is_some() && cleaned.date.is_none() {
            debug!("normalize: could not read date {:?}", record.date);
        }
        if seen.insert(cleaned.clone()) {
            records.push(cleaned);
        }
    }
    debug!(
        "normalize: {} rows -> {} rows",
        roster.records.len(),
        records.len()
    );
    Roster {
        extra_columns: roster.extra_columns.clone(),
        records,
    }
}
