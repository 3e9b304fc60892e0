//! Everything needed to locate our clients.
//!
//! Only used to guess a postal code for shipping and search, and a time
//! zone. Any failure falls back to fixed values.
use serde::{Deserialize, Serialize};

use std::net::IpAddr;

use crate::{error::ResultExt, upstream::Upstream};

pub const FALLBACK_ZIP_CODE: &str = "98177";
pub const FALLBACK_COUNTRY_CODE: &str = "US";
pub const FALLBACK_TIME_ZONE: &str = "America/Los_Angeles";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub ip: String,
    pub zip_code: String,
    pub country_code: String,
    pub time_zone: String,
}

/// Answer of the `ipgeo` endpoint of ipgeolocation.io.
///
/// This is only used to easily parse the json returned by the api, every
/// field we do not need is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGeoIp {
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    zipcode: Option<String>,
    #[serde(default)]
    country_code2: Option<String>,
    #[serde(default)]
    time_zone: Option<RawTimeZone>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawTimeZone {
    #[serde(default)]
    name: Option<String>,
}

impl Location {
    pub fn fallback(ip: Option<IpAddr>) -> Self {
        Self {
            ip: ip.map(|ip| ip.to_string()).unwrap_or_default(),
            zip_code: FALLBACK_ZIP_CODE.to_owned(),
            country_code: FALLBACK_COUNTRY_CODE.to_owned(),
            time_zone: FALLBACK_TIME_ZONE.to_owned(),
        }
    }
}

impl From<RawGeoIp> for Location {
    /// Missing or empty fields are replaced one by one.
    fn from(raw: RawGeoIp) -> Self {
        fn or(value: Option<String>, fallback: &str) -> String {
            value
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| fallback.to_owned())
        }
        Self {
            ip: raw.ip.unwrap_or_default(),
            zip_code: or(raw.zipcode, FALLBACK_ZIP_CODE),
            country_code: or(raw.country_code2, FALLBACK_COUNTRY_CODE),
            time_zone: or(raw.time_zone.and_then(|zone| zone.name), FALLBACK_TIME_ZONE),
        }
    }
}

/// Locate `ip`, falling back to fixed values on any failure.
///
/// Without an api key nothing is looked up and nothing is logged.
pub async fn locate(upstream: &Upstream, ip: Option<IpAddr>) -> Location {
    if !upstream.can_geolocate() {
        return Location::fallback(ip);
    }
    match upstream.geolocate(ip).await.log_warn() {
        Some(mut location) => {
            if location.ip.is_empty() {
                if let Some(ip) = ip {
                    location.ip = ip.to_string();
                }
            }
            location
        }
        None => Location::fallback(ip),
    }
}
