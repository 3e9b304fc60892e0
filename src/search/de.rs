//! Raw shape of a `findItemsAdvanced` response.
use serde::Deserialize;

use crate::{item::de::RawSearchItem, upstream::Acknowledged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchResponse {
    #[serde(default)]
    pub ack: Option<String>,
    #[serde(default)]
    pub error_message: Option<RawErrorMessage>,
    #[serde(default)]
    pub search_result: Option<RawSearchResult>,
    #[serde(default)]
    pub pagination_output: Option<RawPagination>,
    #[serde(rename = "itemSearchURL", default)]
    pub item_search_url: Option<String>,
    #[serde(default)]
    pub category_histogram_container: Option<RawCategoryHistogramContainer>,
    #[serde(default)]
    pub aspect_histogram_container: Option<RawAspectHistogramContainer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawErrorMessage {
    #[serde(default)]
    pub error: Vec<RawFindingError>,
}

#[derive(Debug, Deserialize)]
pub struct RawFindingError {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSearchResult {
    #[serde(rename = "@count", default)]
    pub count: Option<String>,
    #[serde(default)]
    pub item: Vec<RawSearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPagination {
    #[serde(default)]
    pub page_number: Option<String>,
    #[serde(default)]
    pub entries_per_page: Option<String>,
    #[serde(default)]
    pub total_pages: Option<String>,
    #[serde(default)]
    pub total_entries: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategoryHistogramContainer {
    #[serde(default)]
    pub category_histogram: Vec<RawCategoryHistogram>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategoryHistogram {
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub child_category_histogram: Vec<RawCategoryHistogram>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAspectHistogramContainer {
    #[serde(default)]
    pub aspect: Vec<RawAspect>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAspect {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(default)]
    pub value_histogram: Vec<RawAspectValue>,
}

#[derive(Debug, Deserialize)]
pub struct RawAspectValue {
    #[serde(rename = "@valueName")]
    pub value_name: String,
    #[serde(default)]
    pub count: Option<String>,
}

impl Acknowledged for RawSearchResponse {
    fn ack(&self) -> Option<&str> {
        self.ack.as_deref()
    }

    fn error_messages(&self) -> Vec<String> {
        self.error_message
            .iter()
            .flat_map(|messages| messages.error.iter())
            .filter_map(|error| error.message.clone())
            .collect()
    }
}
