use crate::types::category::{Category, CategoryId};
use crate::types::geo::LatLon;

/// Opaque reference to the matched object inside the host's data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoiHandle(u64);

impl PoiHandle {
    /// Wrap a raw host-side object reference.
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw reference value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a search result points at.
///
/// The category marker exists only to seed a search round with the category
/// as query context; it carries no location. A concrete POI always carries
/// one, so downstream consumers can match exhaustively instead of probing an
/// untyped object field.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultTarget {
    Category(CategoryId),
    Poi { location: LatLon, poi: PoiHandle },
}

/// One candidate match delivered by the search subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub name: String,
    pub description: Option<String>,
    pub target: ResultTarget,
}

impl ResultItem {
    /// Build a concrete POI result.
    #[must_use]
    pub fn poi(
        name: impl Into<String>,
        description: Option<String>,
        location: LatLon,
        poi: PoiHandle,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            target: ResultTarget::Poi { location, poi },
        }
    }

    /// Build the synthetic category-level item used to seed a search.
    #[must_use]
    pub fn category_seed(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: None,
            target: ResultTarget::Category(category.id.clone()),
        }
    }

    /// The item's location, if it points at a concrete place.
    #[must_use]
    pub fn location(&self) -> Option<LatLon> {
        match self.target {
            ResultTarget::Poi { location, .. } => Some(location),
            ResultTarget::Category(_) => None,
        }
    }
}
