//! Searching for listings.
//!
//! A [`SearchQuery`] is what our clients send, it is validated into a
//! [`SearchRequest`] which knows how to phrase itself for the Finding API.
//! The answer is reshaped into a [`SearchResult`].
use lazy_static::lazy_static;
use num_enum::TryFromPrimitive;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::{
    coerce,
    error::{Error, Result, UpstreamError},
    item::Item,
};

use self::de::{RawAspect, RawCategoryHistogram, RawSearchResponse};

pub mod de;

lazy_static! {
    static ref NUMERIC_ID: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Output selectors sent with every search.
const OUTPUT_SELECTORS: [&str; 3] = ["PictureURLLarge", "CategoryHistogram", "AspectHistogram"];

/// Query parameters of `GET /search`, as received.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<String>,
    pub sort_by: Option<String>,
    pub category: Option<String>,
    pub list_type: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, AsRefStr)]
#[repr(u8)]
pub enum SortOrder {
    EndTimeSoonest = 1,
    StartTimeNewest = 2,
    PricePlusShippingLowest = 3,
    PricePlusShippingHighest = 4,
}

/// The `listType` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum ListTypeFilter {
    BuyItNow = 1,
    BestOffer = 2,
    Auction = 3,
}

/// A validated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keywords: String,
    pub page: u32,
    pub sort_order: Option<SortOrder>,
    pub category_id: Option<String>,
    pub list_type: Option<ListTypeFilter>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub search_result: ItemList,
    pub pagination: Pagination,
    pub search_ebay_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_histogram: Option<Vec<Aspect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_histogram: Option<Vec<CategoryBucket>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemList {
    pub count: u32,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub total_entries: u32,
    pub entries_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub category_id: String,
    pub category_name: String,
    pub count: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aspect {
    pub name: String,
    pub values: Vec<AspectValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AspectValue {
    pub value: String,
    pub count: u32,
}

impl ListTypeFilter {
    /// The item filter name and its values.
    fn item_filter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::BuyItNow => (
                "ListingType",
                &["AuctionWithBIN", "FixedPrice", "StoreInventory"],
            ),
            Self::BestOffer => ("BestOfferOnly", &["true"]),
            Self::Auction => ("ListingType", &["AuctionWithBIN", "Auction"]),
        }
    }
}

fn parse_enum<T>(name: &'static str, raw: &str) -> Result<T>
where
    T: TryFromPrimitive<Primitive = u8>,
{
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|value| T::try_from_primitive(value).ok())
        .ok_or_else(|| Error::InvalidParameter(name, raw.to_owned()))
}

fn numeric_id(name: &'static str, raw: Option<String>) -> Result<Option<String>> {
    match coerce::non_empty(raw) {
        Some(id) if NUMERIC_ID.is_match(id.trim()) => Ok(Some(id.trim().to_owned())),
        Some(id) => Err(Error::InvalidParameter(name, id)),
        None => Ok(None),
    }
}

impl TryFrom<SearchQuery> for SearchRequest {
    type Error = Error;

    fn try_from(query: SearchQuery) -> Result<Self> {
        let keywords = coerce::non_empty(query.query).ok_or(Error::MissingParameter("query"))?;
        let page = match coerce::non_empty(query.page) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::InvalidParameter("page", raw.clone()))?
                .clamp(1, u32::MAX as i64) as u32,
            None => 1,
        };
        let sort_order = coerce::non_empty(query.sort_by)
            .map(|raw| parse_enum("sortBy", &raw))
            .transpose()?;
        let list_type = coerce::non_empty(query.list_type)
            .map(|raw| parse_enum("listType", &raw))
            .transpose()?;
        Ok(Self {
            keywords: keywords.trim().to_owned(),
            page,
            sort_order,
            category_id: numeric_id("category", query.category)?,
            list_type,
            condition: numeric_id("condition", query.condition)?,
        })
    }
}

impl SearchRequest {
    /// Finding API parameters describing this search.
    ///
    /// Item filters are numbered in the order they are added.
    pub fn query_pairs(&self, entries_per_page: u32) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("keywords".to_owned(), self.keywords.clone()),
            (
                "paginationInput.entriesPerPage".to_owned(),
                entries_per_page.to_string(),
            ),
        ];
        pairs.extend(
            OUTPUT_SELECTORS
                .iter()
                .enumerate()
                .map(|(idx, selector)| (format!("outputSelector({})", idx), (*selector).to_owned())),
        );
        if self.page > 1 {
            pairs.push(("paginationInput.pageNumber".to_owned(), self.page.to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sortOrder".to_owned(), order.as_ref().to_owned()));
        }
        if let Some(category) = &self.category_id {
            pairs.push(("categoryId".to_owned(), category.clone()));
        }
        let mut filters: Vec<(&str, Vec<&str>)> = vec![];
        if let Some(list_type) = self.list_type {
            let (name, values) = list_type.item_filter();
            filters.push((name, values.to_vec()));
        }
        if let Some(condition) = &self.condition {
            filters.push(("Condition", vec![condition.as_str()]));
        }
        for (idx, (name, values)) in filters.into_iter().enumerate() {
            pairs.push((format!("itemFilter({}).name", idx), name.to_owned()));
            for (value_idx, value) in values.into_iter().enumerate() {
                pairs.push((
                    format!("itemFilter({}).value({})", idx, value_idx),
                    value.to_owned(),
                ));
            }
        }
        pairs
    }
}

impl TryFrom<RawSearchResponse> for SearchResult {
    type Error = UpstreamError;

    fn try_from(raw: RawSearchResponse) -> std::result::Result<Self, Self::Error> {
        let (count, items) = match raw.search_result {
            Some(result) => {
                let items = result
                    .item
                    .into_iter()
                    .map(Item::try_from)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                let count = coerce::optional_number("searchResult.count", result.count.as_deref())?
                    .unwrap_or(items.len() as u32);
                (count, items)
            }
            None => (0, vec![]),
        };
        let pagination = match raw.pagination_output {
            Some(raw) => Pagination {
                page: coerce::optional_number("pageNumber", raw.page_number.as_deref())?
                    .unwrap_or(1),
                total_pages: coerce::optional_number("totalPages", raw.total_pages.as_deref())?
                    .unwrap_or(0),
                total_entries: coerce::optional_number(
                    "totalEntries",
                    raw.total_entries.as_deref(),
                )?
                .unwrap_or(0),
                entries_per_page: coerce::optional_number(
                    "entriesPerPage",
                    raw.entries_per_page.as_deref(),
                )?
                .unwrap_or(0),
            },
            None => Pagination {
                page: 1,
                total_pages: 0,
                total_entries: 0,
                entries_per_page: 0,
            },
        };
        let category_histogram = raw
            .category_histogram_container
            .map(|container| {
                container
                    .category_histogram
                    .into_iter()
                    .map(CategoryBucket::try_from)
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .transpose()?;
        let aspect_histogram = raw
            .aspect_histogram_container
            .map(|container| {
                container
                    .aspect
                    .into_iter()
                    .map(Aspect::try_from)
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .transpose()?;
        Ok(Self {
            search_result: ItemList { count, items },
            pagination,
            search_ebay_url: coerce::non_empty(raw.item_search_url),
            aspect_histogram,
            category_histogram,
        })
    }
}

impl TryFrom<RawCategoryHistogram> for CategoryBucket {
    type Error = UpstreamError;

    fn try_from(raw: RawCategoryHistogram) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            count: coerce::optional_number("categoryHistogram.count", raw.count.as_deref())?
                .unwrap_or(0),
            children: raw
                .child_category_histogram
                .into_iter()
                .map(Self::try_from)
                .collect::<std::result::Result<_, _>>()?,
            category_id: raw.category_id,
            category_name: raw.category_name,
        })
    }
}

impl TryFrom<RawAspect> for Aspect {
    type Error = UpstreamError;

    fn try_from(raw: RawAspect) -> std::result::Result<Self, Self::Error> {
        let values = raw
            .value_histogram
            .into_iter()
            .map(|value| {
                Ok(AspectValue {
                    count: coerce::optional_number("valueHistogram.count", value.count.as_deref())?
                        .unwrap_or(0),
                    value: value.value_name,
                })
            })
            .collect::<std::result::Result<_, UpstreamError>>()?;
        Ok(Self {
            name: raw.name,
            values,
        })
    }
}
