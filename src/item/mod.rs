//! Normalized listings.
//!
//! Both the Finding API (search results) and the Shopping API (single
//! items) describe listings, with different names, casing and level of
//! detail. Everything ends up as an [`Item`].
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{coerce, error::UpstreamError};

use self::de::{RawAmount, RawItem, RawSearchItem, RawShippingSummary};

pub mod de;

/// Shown if a listing comes without any picture.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://thumbs1.ebaystatic.com/pict/04040_0.jpg";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: String,
    pub title: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_urls: Option<Vec<String>>,
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ItemCondition>,
    pub category: Option<ItemCategory>,
    pub listing_info: ListingInfo,
    pub listing_type: ListingType,
    pub best_offer_enabled: bool,
    pub buy_it_now_enabled: bool,
    pub current_price: Option<Price>,
    pub current_price_converted: Option<Price>,
    pub selling_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_count: Option<u32>,
    pub shipping_info: Option<ShippingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub item_ebay_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCondition {
    pub condition_id: String,
    pub condition_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCategory {
    pub category_id: String,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingInfo {
    pub start_time_utc: Option<DateTime<Utc>>,
    pub end_time_utc: Option<DateTime<Utc>>,
    /// ISO 8601 duration, as sent by the provider.
    pub time_remaining: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub price: f64,
    pub currency_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    #[serde(rename = "type")]
    pub shipping_type: String,
    pub cost: Option<f64>,
    pub currency_id: Option<String>,
}

/// The listing types we tell our clients about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[remain::sorted]
pub enum ListingType {
    Advertisement,
    Auction,
    AuctionWithBIN,
    FixedPrice,
    OtherType,
}

/// Every listing type the provider is known to send.
#[derive(Debug, Deserialize)]
enum RawListingType {
    AdType,
    Auction,
    AuctionWithBIN,
    Chinese,
    Classified,
    FixedPrice,
    FixedPriceItem,
    LeadGeneration,
    StoreInventory,
    #[serde(other)]
    Unknown,
}

impl ListingType {
    /// Map the provider's listing type onto ours.
    ///
    /// Auctions offering Buy It Now are reported as plain auctions with a
    /// flag, those become [`ListingType::AuctionWithBIN`].
    pub fn normalize(raw: Option<&str>, buy_it_now_available: bool) -> Self {
        let raw = raw
            .and_then(|raw| serde_plain::from_str(raw.trim()).ok())
            .unwrap_or(RawListingType::Unknown);
        match raw {
            RawListingType::Chinese | RawListingType::Auction if buy_it_now_available => {
                Self::AuctionWithBIN
            }
            RawListingType::Chinese | RawListingType::Auction => Self::Auction,
            RawListingType::AuctionWithBIN => Self::AuctionWithBIN,
            RawListingType::FixedPrice
            | RawListingType::FixedPriceItem
            | RawListingType::StoreInventory => Self::FixedPrice,
            RawListingType::AdType | RawListingType::LeadGeneration | RawListingType::Classified => {
                Self::Advertisement
            }
            RawListingType::Unknown => Self::OtherType,
        }
    }

    pub fn is_auction(self) -> bool {
        matches!(self, Self::Auction | Self::AuctionWithBIN)
    }
}

impl ShippingInfo {
    fn new(
        shipping_type: Option<String>,
        cost: Option<&RawAmount>,
    ) -> Result<Self, UpstreamError> {
        let amount = cost
            .map(|cost| coerce::number::<f64>("shippingServiceCost", &cost.value))
            .transpose()?;
        let mut shipping_type = shipping_type.unwrap_or_else(|| String::from("NotSpecified"));
        if shipping_type == "Flat" && amount == Some(0.0) {
            shipping_type = String::from("Free");
        }
        Ok(Self {
            shipping_type,
            cost: amount,
            currency_id: cost.and_then(|cost| cost.currency_id.clone()),
        })
    }
}

impl TryFrom<RawShippingSummary> for ShippingInfo {
    type Error = UpstreamError;

    fn try_from(raw: RawShippingSummary) -> Result<Self, Self::Error> {
        Self::new(raw.shipping_type, raw.cost.as_ref())
    }
}

impl TryFrom<&RawAmount> for Price {
    type Error = UpstreamError;

    fn try_from(raw: &RawAmount) -> Result<Self, Self::Error> {
        Ok(Self {
            price: coerce::number("price", &raw.value)?,
            currency_id: raw.currency_id.clone(),
        })
    }
}

fn price(raw: Option<&RawAmount>) -> Result<Option<Price>, UpstreamError> {
    raw.map(Price::try_from).transpose()
}

fn thumbnail<'a>(candidates: impl IntoIterator<Item = Option<&'a String>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_owned())
}

fn condition(id: Option<String>, name: Option<String>) -> Option<ItemCondition> {
    coerce::non_empty(id).map(|condition_id| ItemCondition {
        condition_id,
        condition_name: name.unwrap_or_default(),
    })
}

impl TryFrom<RawSearchItem> for Item {
    type Error = UpstreamError;

    fn try_from(raw: RawSearchItem) -> Result<Self, Self::Error> {
        let listing = raw.listing_info.as_ref();
        let selling = raw.selling_status.as_ref();
        let buy_it_now =
            coerce::boolean(listing.and_then(|info| info.buy_it_now_available.as_deref()));
        let listing_type = ListingType::normalize(
            listing.and_then(|info| info.listing_type.as_deref()),
            buy_it_now,
        );
        let bid_count = if listing_type.is_auction() {
            coerce::optional_number("bidCount", selling.and_then(|s| s.bid_count.as_deref()))?
        } else {
            None
        };
        let shipping_info = raw
            .shipping_info
            .as_ref()
            .map(|info| {
                ShippingInfo::new(
                    info.shipping_type.clone(),
                    info.shipping_service_cost.as_ref(),
                )
            })
            .transpose()?;
        Ok(Self {
            thumbnail_url: thumbnail([raw.picture_url_large.as_ref(), raw.gallery_url.as_ref()]),
            gallery_urls: None,
            country: coerce::non_empty(raw.country),
            condition: raw.condition.map(|condition| ItemCondition {
                condition_id: condition.condition_id,
                condition_name: condition.condition_display_name,
            }),
            category: raw.primary_category.map(|category| ItemCategory {
                category_id: category.category_id,
                category_name: category.category_name,
            }),
            listing_info: ListingInfo {
                start_time_utc: coerce::optional_timestamp(
                    "startTime",
                    listing.and_then(|info| info.start_time.as_deref()),
                )?,
                end_time_utc: coerce::optional_timestamp(
                    "endTime",
                    listing.and_then(|info| info.end_time.as_deref()),
                )?,
                time_remaining: selling.and_then(|s| s.time_left.clone()),
            },
            listing_type,
            best_offer_enabled: coerce::boolean(
                listing.and_then(|info| info.best_offer_enabled.as_deref()),
            ),
            buy_it_now_enabled: buy_it_now,
            current_price: price(selling.and_then(|s| s.current_price.as_ref()))?,
            current_price_converted: price(
                selling.and_then(|s| s.converted_current_price.as_ref()),
            )?,
            selling_state: selling.and_then(|s| s.selling_state.clone()),
            watch_count: coerce::optional_number(
                "watchCount",
                listing.and_then(|info| info.watch_count.as_deref()),
            )?,
            bid_count,
            shipping_info,
            description: None,
            item_ebay_url: coerce::non_empty(raw.view_item_url),
            item_id: raw.item_id,
            title: raw.title,
        })
    }
}

impl TryFrom<RawItem> for Item {
    type Error = UpstreamError;

    /// Shipping is not part of `GetSingleItem`, see
    /// [`Item::with_shipping`].
    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let buy_it_now = coerce::boolean(raw.buy_it_now_available.as_deref());
        let listing_type = ListingType::normalize(raw.listing_type.as_deref(), buy_it_now);
        let bid_count = if listing_type.is_auction() {
            coerce::optional_number("BidCount", raw.bid_count.as_deref())?
        } else {
            None
        };
        let category = coerce::non_empty(raw.category_id).map(|category_id| ItemCategory {
            category_id,
            category_name: raw.category_name.unwrap_or_default(),
        });
        let gallery_urls: Vec<String> = raw
            .picture_urls
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();
        Ok(Self {
            thumbnail_url: thumbnail([gallery_urls.first(), raw.gallery_url.as_ref()]),
            gallery_urls: Some(gallery_urls),
            country: coerce::non_empty(raw.country),
            condition: condition(raw.condition_id, raw.condition_name),
            category,
            listing_info: ListingInfo {
                start_time_utc: coerce::optional_timestamp("StartTime", raw.start_time.as_deref())?,
                end_time_utc: coerce::optional_timestamp("EndTime", raw.end_time.as_deref())?,
                time_remaining: raw.time_left,
            },
            listing_type,
            best_offer_enabled: coerce::boolean(raw.best_offer_enabled.as_deref()),
            buy_it_now_enabled: buy_it_now,
            current_price: price(raw.current_price.as_ref())?,
            current_price_converted: price(raw.converted_current_price.as_ref())?,
            selling_state: raw.listing_status,
            watch_count: coerce::optional_number("WatchCount", raw.watch_count.as_deref())?,
            bid_count,
            shipping_info: None,
            description: coerce::non_empty(raw.description),
            item_ebay_url: coerce::non_empty(raw.view_item_url),
            item_id: raw.item_id,
            title: raw.title,
        })
    }
}

impl Item {
    pub fn with_shipping(mut self, shipping: ShippingInfo) -> Self {
        self.shipping_info = Some(shipping);
        self
    }
}
