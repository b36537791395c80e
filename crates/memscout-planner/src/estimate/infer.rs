//! Value-level type inference for sampled text columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use memscout_core::schema::LogicalType;

const NULL_TOKENS: [&str; 6] = ["", "null", "NULL", "NA", "N/A", "None"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

pub fn is_null(value: &str) -> bool {
    NULL_TOKENS.contains(&value.trim())
}

/// Type of a single value, or `None` for a null token.
pub fn infer_value(value: &str) -> Option<LogicalType> {
    if is_null(value) {
        return None;
    }
    let v = value.trim();
    if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false") {
        return Some(LogicalType::Boolean);
    }
    if v.parse::<i64>().is_ok() {
        return Some(LogicalType::Integer);
    }
    if let Ok(f) = v.parse::<f64>() {
        // Non-finite spellings other than `nan`/`NaN` stay text.
        if f.is_finite() || v == "nan" || v == "NaN" {
            return Some(LogicalType::Float);
        }
    }
    if looks_like_datetime(v) {
        return Some(LogicalType::Datetime);
    }
    Some(LogicalType::String)
}

/// First non-null value decides; an all-null column is a string column.
pub fn infer_column<'a, I>(values: I) -> LogicalType
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .find_map(infer_value)
        .unwrap_or(LogicalType::String)
}

fn looks_like_datetime(v: &str) -> bool {
    // Cheap shape check before handing the value to chrono.
    let bytes = v.as_bytes();
    if bytes.len() < 10 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return false;
    }
    if NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok() {
        return true;
    }
    if DateTime::parse_from_rfc3339(v).is_ok() {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(v, fmt).is_ok())
}
