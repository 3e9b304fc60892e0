//! The provider's category taxonomy.
//!
//! [`Categories`] keeps an in-memory snapshot ([`CategoryIndex`]) of the
//! whole tree and refreshes it whenever the provider reports a newer
//! category version.
use serde::Serialize;

pub mod de;
mod index;
mod store;

pub use self::index::CategoryIndex;
pub use self::store::Categories;

pub type CategoryId = String;

/// Parent id of every root category.
pub const ROOT_ID: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: CategoryId,
}

/// An item condition allowed in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_ID
    }
}

impl From<de::RawCategory> for Category {
    /// The provider marks roots by making them their own parent.
    fn from(raw: de::RawCategory) -> Self {
        let parent_id = match raw.parent_id {
            Some(parent) if parent != raw.id && !parent.is_empty() => parent,
            _ => ROOT_ID.to_owned(),
        };
        Self {
            id: raw.id,
            name: raw.name,
            parent_id,
        }
    }
}

impl From<de::RawCondition> for Condition {
    fn from(raw: de::RawCondition) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

/// Extract the conditions of `category_id` from a features response.
///
/// Falls back to the first category in the response, since the provider
/// answers for the closest node defining conditions.
pub fn conditions(raw: de::RawConditionList, category_id: &str) -> Vec<Condition> {
    let mut categories = raw.categories;
    let position = categories
        .iter()
        .position(|category| category.id == category_id)
        .unwrap_or(0);
    if categories.is_empty() {
        return vec![];
    }
    categories
        .swap_remove(position)
        .condition_values
        .map(|values| values.conditions.into_iter().map(Condition::from).collect())
        .unwrap_or_default()
}
