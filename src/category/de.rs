use serde::Deserialize;

use crate::upstream::{Acknowledged, RawError};

/// Response of `GetCategories`.
///
/// Without a detail level the category array is simply missing.
#[derive(Debug, Deserialize)]
pub struct RawCategoryList {
    #[serde(rename = "Ack", default)]
    pub ack: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<RawError>,
    #[serde(rename = "CategoryVersion", default)]
    pub version: Option<String>,
    #[serde(rename = "CategoryArray", default)]
    pub array: RawCategoryArray,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCategoryArray {
    #[serde(rename = "Category", default)]
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    #[serde(rename = "CategoryID")]
    pub id: String,
    #[serde(rename = "CategoryName")]
    pub name: String,
    #[serde(rename = "CategoryParentID", default)]
    pub parent_id: Option<String>,
}

/// Response of `GetCategoryFeatures` for `ConditionValues`.
#[derive(Debug, Deserialize)]
pub struct RawConditionList {
    #[serde(rename = "Ack", default)]
    pub ack: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<RawError>,
    #[serde(rename = "Category", default)]
    pub categories: Vec<RawFeatureCategory>,
}

#[derive(Debug, Deserialize)]
pub struct RawFeatureCategory {
    #[serde(rename = "CategoryID")]
    pub id: String,
    #[serde(rename = "ConditionValues", default)]
    pub condition_values: Option<RawConditionValues>,
}

#[derive(Debug, Deserialize)]
pub struct RawConditionValues {
    #[serde(rename = "Condition", default)]
    pub conditions: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
pub struct RawCondition {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "DisplayName")]
    pub name: String,
}

impl Acknowledged for RawCategoryList {
    fn ack(&self) -> Option<&str> {
        self.ack.as_deref()
    }

    fn error_messages(&self) -> Vec<String> {
        self.errors.iter().filter_map(RawError::message).collect()
    }
}

impl Acknowledged for RawConditionList {
    fn ack(&self) -> Option<&str> {
        self.ack.as_deref()
    }

    fn error_messages(&self) -> Vec<String> {
        self.errors.iter().filter_map(RawError::message).collect()
    }
}
