//! Coercion of the provider's stringly-typed values.
//!
//! Every number, boolean and timestamp the provider sends arrives as text.
//! Raw response structs keep them as [`String`]s and the conversions into
//! our own types go through the functions in here, so no raw value makes it
//! past the normalizer.
use chrono::{DateTime, Utc};

use std::str::FromStr;

use crate::error::UpstreamError;

/// `"true"` (in any case) is true, everything else is false.
pub fn boolean(raw: Option<&str>) -> bool {
    raw.map_or(false, |raw| raw.trim().eq_ignore_ascii_case("true"))
}

/// Parse a mandatory number.
pub fn number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, UpstreamError> {
    raw.trim()
        .parse()
        .map_err(|_| UpstreamError::Parsing(field, format!("{:?} is not a number", raw)))
}

/// Parse an optional number, treating empty text like a missing value.
pub fn optional_number<T: FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, UpstreamError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => number(field, raw).map(Some),
    }
}

/// Parse an ISO 8601 timestamp as sent by all provider APIs.
pub fn timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, UpstreamError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|time| time.with_timezone(&Utc))
        .map_err(|why| UpstreamError::Parsing(field, format!("{:?}: {}", raw, why)))
}

pub fn optional_timestamp(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, UpstreamError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => timestamp(field, raw).map(Some),
    }
}

/// Drop empty strings, the provider sends `<GalleryURL/>` and friends.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|raw| !raw.trim().is_empty())
}
