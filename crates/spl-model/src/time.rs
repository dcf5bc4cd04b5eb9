//! HL7 `TS` timestamp parsing.
//!
//! Labeling documents carry dates as `YYYY[MM[DD[HH[MM[SS]]]]][+/-ZZZZ]`.
//! Only the calendar date is kept; the time part is checked for shape.

use chrono::{NaiveDate, NaiveTime};

/// Parse an HL7 timestamp into its calendar date.
///
/// Month and day default to the first when the value is truncated
/// (`"2024"` is 2024-01-01). Returns `None` for anything malformed.
pub fn parse_hl7_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let (stamp, offset) = split_offset(trimmed);
    if let Some(offset) = offset
        && !is_valid_offset(offset)
    {
        return None;
    }
    if !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (date_part, time_part) = stamp.split_at(stamp.len().min(8));
    let date = match date_part.len() {
        4 => NaiveDate::from_ymd_opt(date_part.parse().ok()?, 1, 1)?,
        6 => NaiveDate::from_ymd_opt(
            date_part[..4].parse().ok()?,
            date_part[4..6].parse().ok()?,
            1,
        )?,
        8 => NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?,
        _ => return None,
    };
    let time_ok = match time_part.len() {
        0 => true,
        2 => NaiveTime::parse_from_str(&format!("{time_part}00"), "%H%M").is_ok(),
        4 => NaiveTime::parse_from_str(time_part, "%H%M").is_ok(),
        6 => NaiveTime::parse_from_str(time_part, "%H%M%S").is_ok(),
        _ => false,
    };
    time_ok.then_some(date)
}

pub fn is_valid_hl7_date(value: &str) -> bool {
    parse_hl7_date(value).is_some()
}

fn split_offset(value: &str) -> (&str, Option<&str>) {
    match value.find(['+', '-']) {
        Some(idx) => (&value[..idx], Some(&value[idx + 1..])),
        None => (value, None),
    }
}

fn is_valid_offset(offset: &str) -> bool {
    offset.len() == 4 && NaiveTime::parse_from_str(offset, "%H%M").is_ok()
}
