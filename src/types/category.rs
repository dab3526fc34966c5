use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::icons::IconId;

/// Opaque identifier of a POI category (e.g. `restaurants`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Wrap a raw category identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named grouping of POIs the screen can list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: IconId,
}

impl Category {
    /// Build a category from its identifier, display name and icon id.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            icon: IconId::new(icon),
        }
    }
}

/// Category metadata provider: resolves ids to display names and icon ids.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
    index: HashMap<CategoryId, usize>,
}

impl CategoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category, replacing any earlier entry with the same id.
    pub fn register(&mut self, category: Category) {
        if let Some(position) = self.index.get(&category.id).copied() {
            self.categories[position] = category;
        } else {
            let position = self.categories.len();
            self.index.insert(category.id.clone(), position);
            self.categories.push(category);
        }
    }

    /// Look up a category by id.
    #[must_use]
    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.index
            .get(id)
            .and_then(|position| self.categories.get(*position))
    }

    /// Return all categories in registration order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of registered categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
