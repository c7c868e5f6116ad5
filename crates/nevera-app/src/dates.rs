// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! The single place expiry dates and registration stamps are parsed and
//! formatted. Stored dates are local-civil `YYYY-MM-DD` text; `time::Date`
//! carries no zone, so the one-day shift a UTC-midnight reading would cause
//! for hosts east of UTC cannot be expressed here at all.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";

/// Days added to today when a candidate is committed without an expiry.
pub const DEFAULT_EXPIRY_OFFSET_DAYS: i64 = 7;
/// Quick-set offsets offered next to the expiry field: tomorrow, 3 days,
/// a week, a month.
pub const EXPIRY_PRESET_DAYS: [i64; 4] = [1, 3, 7, 30];

/// Parses stored expiry text as a civil date. A full timestamp leaking into a
/// date column normalizes to its date part; anything else is `None`.
pub fn parse_civil_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = Date::parse(trimmed, &format_description!("[year]-[month]-[day]")) {
        return Some(value);
    }

    parse_timestamp(trimmed).map(|stamp| stamp.date())
}

/// Parses a registration stamp. The backend emits RFC 3339; older exports
/// used space-separated datetimes or bare dates.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        trimmed,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    ) {
        return Some(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        trimmed,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        trimmed,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(value.assume_utc());
    }

    if let Ok(value) = Date::parse(trimmed, &format_description!("[year]-[month]-[day]")) {
        return Some(value.midnight().assume_utc());
    }

    None
}

/// Formats stored `YYYY-MM-DD` text as `YYYY/MM/DD` for display. Well-formed
/// input is rewritten textually, bypassing date math entirely; anything else
/// goes through the parser, and unparseable input renders empty.
pub fn format_for_display(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if is_civil_date_text(trimmed) {
        return trimmed.replace('-', "/");
    }

    match parse_civil_date(trimmed) {
        Some(date) => format!(
            "{:04}/{:02}/{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        ),
        None => String::new(),
    }
}

pub fn to_civil_text(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| {
            format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            )
        })
}

pub fn default_expiry(today: Date) -> Date {
    offset_expiry(today, DEFAULT_EXPIRY_OFFSET_DAYS)
}

pub fn offset_expiry(today: Date, days: i64) -> Date {
    today.saturating_add(Duration::days(days))
}

fn is_civil_date_text(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| match index {
                4 | 7 => *byte == b'-',
                _ => byte.is_ascii_digit(),
            })
}
