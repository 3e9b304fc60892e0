//! Raw item shapes of the Shopping and Finding APIs.
//!
//! The Shopping API uses `PascalCase` element names, the Finding API
//! `camelCase` ones. Values are kept as text, see [`crate::coerce`].
use serde::Deserialize;

use crate::upstream::{Acknowledged, RawError};

/// An amount with its currency as an attribute.
///
/// The Shopping API calls the attribute `currencyID`, the Finding API
/// `currencyId`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAmount {
    #[serde(rename = "@currencyID", alias = "@currencyId", default)]
    pub currency_id: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Response of `GetSingleItem`.
#[derive(Debug, Deserialize)]
pub struct RawItemResponse {
    #[serde(rename = "Ack", default)]
    pub ack: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<RawError>,
    #[serde(rename = "Item", default)]
    pub item: Option<RawItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(rename = "ItemID")]
    pub item_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "GalleryURL", default)]
    pub gallery_url: Option<String>,
    #[serde(rename = "PictureURL", default)]
    pub picture_urls: Vec<String>,
    #[serde(rename = "PrimaryCategoryID", default)]
    pub category_id: Option<String>,
    #[serde(rename = "PrimaryCategoryName", default)]
    pub category_name: Option<String>,
    #[serde(rename = "ConditionID", default)]
    pub condition_id: Option<String>,
    #[serde(rename = "ConditionDisplayName", default)]
    pub condition_name: Option<String>,
    #[serde(rename = "StartTime", default)]
    pub start_time: Option<String>,
    #[serde(rename = "EndTime", default)]
    pub end_time: Option<String>,
    #[serde(rename = "TimeLeft", default)]
    pub time_left: Option<String>,
    #[serde(rename = "ListingType", default)]
    pub listing_type: Option<String>,
    #[serde(rename = "BestOfferEnabled", default)]
    pub best_offer_enabled: Option<String>,
    #[serde(rename = "BuyItNowAvailable", default)]
    pub buy_it_now_available: Option<String>,
    #[serde(rename = "CurrentPrice", default)]
    pub current_price: Option<RawAmount>,
    #[serde(rename = "ConvertedCurrentPrice", default)]
    pub converted_current_price: Option<RawAmount>,
    #[serde(rename = "ListingStatus", default)]
    pub listing_status: Option<String>,
    #[serde(rename = "WatchCount", default)]
    pub watch_count: Option<String>,
    #[serde(rename = "BidCount", default)]
    pub bid_count: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "ViewItemURLForNaturalSearch", default)]
    pub view_item_url: Option<String>,
}

/// Response of `GetShippingCosts`.
#[derive(Debug, Deserialize)]
pub struct RawShippingCosts {
    #[serde(rename = "Ack", default)]
    pub ack: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<RawError>,
    #[serde(rename = "ShippingCostSummary", default)]
    pub summary: Option<RawShippingSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawShippingSummary {
    #[serde(rename = "ShippingType", default)]
    pub shipping_type: Option<String>,
    #[serde(rename = "ShippingServiceCost", default)]
    pub cost: Option<RawAmount>,
}

/// An `<item>` of a `findItemsAdvanced` search result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchItem {
    pub item_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "galleryURL", default)]
    pub gallery_url: Option<String>,
    #[serde(rename = "pictureURLLarge", default)]
    pub picture_url_large: Option<String>,
    #[serde(rename = "viewItemURL", default)]
    pub view_item_url: Option<String>,
    #[serde(default)]
    pub primary_category: Option<RawPrimaryCategory>,
    #[serde(default)]
    pub condition: Option<RawSearchCondition>,
    #[serde(default)]
    pub shipping_info: Option<RawSearchShipping>,
    #[serde(default)]
    pub selling_status: Option<RawSellingStatus>,
    #[serde(default)]
    pub listing_info: Option<RawListingInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrimaryCategory {
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchCondition {
    pub condition_id: String,
    #[serde(default)]
    pub condition_display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchShipping {
    #[serde(default)]
    pub shipping_service_cost: Option<RawAmount>,
    #[serde(default)]
    pub shipping_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSellingStatus {
    #[serde(default)]
    pub current_price: Option<RawAmount>,
    #[serde(default)]
    pub converted_current_price: Option<RawAmount>,
    #[serde(default)]
    pub bid_count: Option<String>,
    #[serde(default)]
    pub selling_state: Option<String>,
    #[serde(default)]
    pub time_left: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListingInfo {
    #[serde(default)]
    pub best_offer_enabled: Option<String>,
    #[serde(default)]
    pub buy_it_now_available: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub watch_count: Option<String>,
}

impl Acknowledged for RawItemResponse {
    fn ack(&self) -> Option<&str> {
        self.ack.as_deref()
    }

    fn error_messages(&self) -> Vec<String> {
        self.errors.iter().filter_map(RawError::message).collect()
    }
}

impl Acknowledged for RawShippingCosts {
    fn ack(&self) -> Option<&str> {
        self.ack.as_deref()
    }

    fn error_messages(&self) -> Vec<String> {
        self.errors.iter().filter_map(RawError::message).collect()
    }
}
