//! Request bodies for the Trading API.
use quick_xml::escape::escape;

const NAMESPACE: &str = "urn:ebay:apis:eBLBaseComponents";

/// How much a `GetCategories` call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLevel {
    /// Only the category version and count, this is cheap.
    Summary,
    /// The whole taxonomy, this is not.
    ReturnAll,
}

pub fn get_categories(token: &str, site_id: u32, detail: DetailLevel) -> String {
    let detail = match detail {
        DetailLevel::Summary => "",
        DetailLevel::ReturnAll => "\n  <DetailLevel>ReturnAll</DetailLevel>",
    };
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<GetCategoriesRequest xmlns="{ns}">
  {credentials}
  <ErrorLanguage>en_US</ErrorLanguage>
  <WarningLevel>High</WarningLevel>
  <CategorySiteID>{site_id}</CategorySiteID>{detail}
</GetCategoriesRequest>"#,
        ns = NAMESPACE,
        credentials = credentials(token),
        site_id = site_id,
        detail = detail,
    )
}

pub fn get_category_features(token: &str, category_id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<GetCategoryFeaturesRequest xmlns="{ns}">
  {credentials}
  <DetailLevel>ReturnAll</DetailLevel>
  <LevelLimit>1</LevelLimit>
  <ViewAllNodes>true</ViewAllNodes>
  <CategoryID>{category_id}</CategoryID>
  <FeatureID>ConditionValues</FeatureID>
</GetCategoryFeaturesRequest>"#,
        ns = NAMESPACE,
        credentials = credentials(token),
        category_id = escape(category_id),
    )
}

pub fn get_official_time(token: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<GeteBayOfficialTimeRequest xmlns="{ns}">
  {credentials}
</GeteBayOfficialTimeRequest>"#,
        ns = NAMESPACE,
        credentials = credentials(token),
    )
}

fn credentials(token: &str) -> String {
    format!(
        "<RequesterCredentials><eBayAuthToken>{}</eBayAuthToken></RequesterCredentials>",
        escape(token)
    )
}
