use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

use super::{Category, CategoryId, ROOT_ID};

/// Version of an index that was never filled.
pub const UNVERSIONED: i64 = -1;

/// An immutable snapshot of the category tree.
///
/// A new snapshot is built from scratch for every refresh, nothing in here
/// is ever patched in place.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    version: i64,
    order: Vec<CategoryId>,
    by_id: HashMap<CategoryId, Category>,
    children_by_parent: HashMap<CategoryId, Vec<Category>>,
}

impl Default for CategoryIndex {
    fn default() -> Self {
        Self {
            version: UNVERSIONED,
            order: vec![],
            by_id: HashMap::new(),
            children_by_parent: HashMap::new(),
        }
    }
}

impl CategoryIndex {
    /// Build the index from the provider's enumeration.
    ///
    /// A category listed twice keeps its last occurrence, children keep the
    /// order in which they first appeared.
    pub fn build<I>(version: i64, categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        let mut order = vec![];
        let mut by_id = HashMap::new();
        for category in categories {
            if !by_id.contains_key(&category.id) {
                order.push(category.id.clone());
            }
            by_id.insert(category.id.clone(), category);
        }
        let mut children_by_parent: HashMap<CategoryId, Vec<Category>> = HashMap::new();
        for id in &order {
            let category = &by_id[id];
            children_by_parent
                .entry(category.parent_id.clone())
                .or_default()
                .push(category.clone());
        }
        Self {
            version,
            order,
            by_id,
            children_by_parent,
        }
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// All categories in provider order.
    pub fn all(&self) -> Vec<Category> {
        self.order
            .iter()
            .map(|id| self.by_id[id].clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Category> {
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| Error::CategoryNotFound(id.to_owned()))
    }

    /// Direct children of `id`, the virtual root `"0"` yields the roots.
    pub fn children(&self, id: &str) -> Result<Vec<Category>> {
        if id != ROOT_ID && !self.by_id.contains_key(id) {
            return Err(Error::CategoryNotFound(id.to_owned()));
        }
        Ok(self.children_of(id))
    }

    /// Ancestors of `id`, nearest first, without `id` itself.
    pub fn parents(&self, id: &str) -> Result<Vec<Category>> {
        let start = self.get(id)?;
        let mut visited = HashSet::new();
        visited.insert(start.id.as_str());
        let mut parents = vec![];
        let mut current = &start;
        while !current.is_root() {
            let parent = self.by_id.get(&current.parent_id).ok_or_else(|| {
                Error::CategoryDanglingParent(current.id.clone(), current.parent_id.clone())
            })?;
            if !visited.insert(parent.id.as_str()) {
                return Err(Error::CategoryCycle(id.to_owned()));
            }
            parents.push(parent.clone());
            current = parent;
        }
        Ok(parents)
    }

    /// All children of `id`'s parent, `id` included.
    pub fn siblings(&self, id: &str) -> Result<Vec<Category>> {
        let category = self.get(id)?;
        Ok(self.children_of(&category.parent_id))
    }

    fn children_of(&self, id: &str) -> Vec<Category> {
        self.children_by_parent
            .get(id)
            .cloned()
            .unwrap_or_default()
    }
}
