//! Conversion helpers between SQLite TEXT columns and domain types.
//!
//! Timestamps, dates, and decimals are stored as TEXT. Reads are lenient:
//! a malformed value is logged and replaced with a safe fallback instead of
//! failing the whole query, matching the tolerance the domain requires for
//! hosted-store data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn datetime_to_text(dt: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).to_rfc3339()
}

pub fn text_to_datetime(s: &str) -> NaiveDateTime {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .unwrap_or_else(|e| {
            error!("Failed to parse datetime '{}': {}", s, e);
            Utc::now().naive_utc()
        })
}

pub fn date_to_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn text_to_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| {
        error!("Failed to parse date '{}': {}", s, e);
        Utc::now().date_naive()
    })
}

pub fn decimal_to_text(value: Decimal) -> String {
    value.to_string()
}

pub fn text_to_decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|e| {
        error!("Failed to parse decimal '{}': {}", s, e);
        Decimal::ZERO
    })
}
