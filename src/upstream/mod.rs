//! Outbound calls against the provider.
//!
//! The provider exposes three APIs that all speak XML:
//!
//! - the *Trading API*, an RPC-style endpoint taking POSTed XML bodies
//!   and selecting the call with a header,
//! - the *Shopping API*, selected by the `callname` query parameter,
//! - the *Finding API* used for searching.
//!
//! Every call here returns the provider's raw shape (see the `de` modules)
//! after checking the acknowledgement, or an [`UpstreamError`].
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use std::{net::IpAddr, sync::Arc};

use crate::{
    category::de::{RawCategoryList, RawConditionList},
    config::Provider,
    error::UpstreamError,
    geoip::{Location, RawGeoIp},
    item::de::{RawItem, RawItemResponse, RawShippingCosts, RawShippingSummary},
    request::{Api, Request},
    search::{de::RawSearchResponse, SearchRequest},
};

mod xml;

pub use self::xml::DetailLevel;

type Result<T> = std::result::Result<T, UpstreamError>;

/// Which parts of an item to ask the Shopping API for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSelector {
    Basic,
    Details,
    Description,
}

/// Implemented by every raw response carrying an acknowledgement.
pub trait Acknowledged {
    fn ack(&self) -> Option<&str>;
    fn error_messages(&self) -> Vec<String>;
}

/// An `<Errors>` entry of the Trading and Shopping APIs.
#[derive(Debug, Default, Deserialize)]
pub struct RawError {
    #[serde(rename = "ShortMessage", default)]
    pub short_message: Option<String>,
    #[serde(rename = "LongMessage", default)]
    pub long_message: Option<String>,
}

/// Response of `GeteBayOfficialTime`.
#[derive(Debug, Deserialize)]
pub struct RawOfficialTime {
    #[serde(rename = "Ack", default)]
    pub ack: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<RawError>,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
}

/// Client for all provider APIs.
///
/// Cheap to clone, everything is behind [`Arc`]s.
#[derive(Clone)]
pub struct Upstream {
    api: Arc<dyn Api>,
    provider: Arc<Provider>,
}

impl Upstream {
    pub fn new(api: Arc<dyn Api>, provider: Provider) -> Self {
        Self {
            api,
            provider: Arc::new(provider),
        }
    }

    /// `GetCategories`, either the cheap version check or the full taxonomy.
    pub async fn fetch_categories(&self, detail: DetailLevel) -> Result<RawCategoryList> {
        let body = xml::get_categories(&self.provider.auth_token, self.provider.site_id, detail);
        self.trading("GetCategories", body).await
    }

    /// `GetCategoryFeatures` restricted to the condition values.
    pub async fn fetch_category_features(&self, category_id: &str) -> Result<RawConditionList> {
        let body = xml::get_category_features(&self.provider.auth_token, category_id);
        self.trading("GetCategoryFeatures", body).await
    }

    /// `GeteBayOfficialTime`.
    pub async fn official_time(&self) -> Result<RawOfficialTime> {
        let body = xml::get_official_time(&self.provider.auth_token);
        self.trading("GeteBayOfficialTime", body).await
    }

    /// `GetSingleItem` from the Shopping API.
    pub async fn fetch_item(&self, id: &str, selector: ItemSelector) -> Result<RawItem> {
        let mut params = vec![("ItemID", id)];
        match selector {
            ItemSelector::Basic => {}
            ItemSelector::Details => params.push(("IncludeSelector", "Details")),
            ItemSelector::Description => params.push(("IncludeSelector", "Description")),
        }
        let response: RawItemResponse = self.shopping("GetSingleItem", &params).await?;
        response
            .item
            .ok_or_else(|| UpstreamError::Parsing("GetSingleItem", "no item in response".into()))
    }

    /// `GetShippingCosts` from the Shopping API.
    ///
    /// This call is known to fail spuriously, so it is retried exactly once.
    pub async fn fetch_item_shipping(
        &self,
        id: &str,
        postal_code: &str,
        country_code: &str,
    ) -> Result<RawShippingSummary> {
        match self.shipping_costs(id, postal_code, country_code).await {
            Ok(summary) => Ok(summary),
            Err(why) => {
                warn!("Shipping costs for item {} failed, retrying: {}", id, why);
                self.shipping_costs(id, postal_code, country_code).await
            }
        }
    }

    async fn shipping_costs(
        &self,
        id: &str,
        postal_code: &str,
        country_code: &str,
    ) -> Result<RawShippingSummary> {
        let params = [
            ("ItemID", id),
            ("DestinationCountryCode", country_code),
            ("DestinationPostalCode", postal_code),
            ("IncludeDetails", "false"),
        ];
        let response: RawShippingCosts = self.shopping("GetShippingCosts", &params).await?;
        response.summary.ok_or_else(|| {
            UpstreamError::Parsing("GetShippingCosts", "no shipping cost summary".into())
        })
    }

    /// `findItemsAdvanced` from the Finding API.
    pub async fn search(
        &self,
        request: &SearchRequest,
        buyer_postal_code: &str,
    ) -> Result<RawSearchResponse> {
        let mut params = vec![
            ("OPERATION-NAME".to_owned(), "findItemsAdvanced".to_owned()),
            ("SERVICE-VERSION".to_owned(), "1.13.0".to_owned()),
            ("RESPONSE-DATA-FORMAT".to_owned(), "XML".to_owned()),
            ("REST-PAYLOAD".to_owned(), "true".to_owned()),
            ("SECURITY-APPNAME".to_owned(), self.provider.app_id.clone()),
            ("buyerPostalCode".to_owned(), buyer_postal_code.to_owned()),
        ];
        params.extend(request.query_pairs(self.provider.entries_per_page));
        let url = parse_url(&self.provider.endpoints.finding, params)?;
        let text = self.fetch_text(Request::get(url)).await?;
        parse_acknowledged("findItemsAdvanced", &text)
    }

    /// Whether an IP geolocation api key is configured.
    pub fn can_geolocate(&self) -> bool {
        self.provider.ip_api_key.is_some()
    }

    /// Locate `ip`, or the caller itself if `ip` is `None`.
    pub async fn geolocate(&self, ip: Option<IpAddr>) -> Result<Location> {
        let key = self.provider.ip_api_key.as_deref().ok_or_else(|| {
            UpstreamError::NotAcknowledged("ipgeo", "no IP geolocation api key configured".into())
        })?;
        let mut params = vec![("apiKey".to_owned(), key.to_owned())];
        if let Some(ip) = ip {
            params.push(("ip".to_owned(), ip.to_string()));
        }
        let base = format!("{}/ipgeo", self.provider.endpoints.geoip.trim_end_matches('/'));
        let url = parse_url(&base, params)?;
        let text = self.fetch_text(Request::get(url)).await?;
        let raw: RawGeoIp = serde_json::from_str(&text)
            .map_err(|why| UpstreamError::Parsing("ipgeo", why.to_string()))?;
        Ok(raw.into())
    }

    async fn trading<T>(&self, call_name: &'static str, body: String) -> Result<T>
    where
        T: DeserializeOwned + Acknowledged,
    {
        let base = &self.provider.endpoints.trading;
        let url = Url::parse(base)
            .map_err(|why| UpstreamError::Transport(base.clone(), why.to_string()))?;
        let request = Request::post(url, body)
            .header("Content-Type", "text/xml")
            .header("X-EBAY-API-SITEID", self.provider.site_id.to_string())
            .header(
                "X-EBAY-API-COMPATIBILITY-LEVEL",
                self.provider.compatibility_level.to_string(),
            )
            .header("X-EBAY-API-CALL-NAME", call_name);
        let text = self.fetch_text(request).await?;
        parse_acknowledged(call_name, &text)
    }

    async fn shopping<T>(&self, call_name: &'static str, extra: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned + Acknowledged,
    {
        let mut params = vec![
            ("callname".to_owned(), call_name.to_owned()),
            ("responseencoding".to_owned(), "XML".to_owned()),
            ("siteid".to_owned(), self.provider.site_id.to_string()),
            (
                "version".to_owned(),
                self.provider.compatibility_level.to_string(),
            ),
            ("appid".to_owned(), self.provider.app_id.clone()),
        ];
        params.extend(
            extra
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned())),
        );
        let url = parse_url(&self.provider.endpoints.shopping, params)?;
        let text = self.fetch_text(Request::get(url)).await?;
        parse_acknowledged(call_name, &text)
    }

    /// Send the request and return the body of successful responses.
    async fn fetch_text(&self, request: Request) -> Result<String> {
        debug!("{} {}", request.method, request.url.path());
        let resp = self.api.send(request).await?;
        if resp.status.is_success() {
            Ok(resp.body)
        } else {
            Err(UpstreamError::NonSuccessStatusCode(resp.url, resp.status))
        }
    }
}

fn parse_url<I>(base: &str, params: I) -> Result<Url>
where
    I: IntoIterator<Item = (String, String)>,
{
    Url::parse_with_params(base, params)
        .map_err(|why| UpstreamError::Transport(base.to_owned(), why.to_string()))
}

/// Deserialize an XML response and reject soft failures.
///
/// `Success` and `Warning` are the only acknowledgements of a successful
/// call, everything else (including a missing one) is an error.
pub fn parse_acknowledged<T>(call_name: &'static str, text: &str) -> Result<T>
where
    T: DeserializeOwned + Acknowledged,
{
    let parsed: T = quick_xml::de::from_str(text)
        .map_err(|why| UpstreamError::Parsing(call_name, why.to_string()))?;
    match parsed.ack() {
        Some("Success") | Some("Warning") => Ok(parsed),
        ack => {
            let mut messages = parsed.error_messages();
            if messages.is_empty() {
                messages.push(format!("acknowledgement was {:?}", ack.unwrap_or("missing")));
            }
            Err(UpstreamError::NotAcknowledged(call_name, messages.join("; ")))
        }
    }
}

impl RawError {
    pub fn message(&self) -> Option<String> {
        self.long_message
            .clone()
            .or_else(|| self.short_message.clone())
    }
}

impl Acknowledged for RawOfficialTime {
    fn ack(&self) -> Option<&str> {
        self.ack.as_deref()
    }

    fn error_messages(&self) -> Vec<String> {
        self.errors.iter().filter_map(RawError::message).collect()
    }
}
