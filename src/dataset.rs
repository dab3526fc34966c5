//! POI records backing the bundled search worker.
//!
//! The on-disk format is a single JSON document with a category table and a
//! flat POI list. Loading validates cross-references up front so the worker
//! can serve queries without re-checking every record.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Category, CategoryCatalog, CategoryId, LatLon, PoiHandle, ResultItem};

/// Errors raised while loading or validating a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset file")]
    Io(#[from] std::io::Error),

    /// The dataset file is not valid JSON for the expected shape.
    #[error("failed to parse dataset file")]
    Parse(#[from] serde_json::Error),

    /// A POI carries coordinates outside the valid degree ranges.
    #[error("poi '{name}' has out-of-range coordinates ({lat}, {lon})")]
    CoordinateRange { name: String, lat: f64, lon: f64 },

    /// A POI references a category the category table does not define.
    #[error("poi '{name}' references unknown category '{category}'")]
    UnknownCategory { name: String, category: CategoryId },

    /// Two POIs share the same id.
    #[error("duplicate poi id {id}")]
    DuplicateId { id: u64 },
}

/// One POI as stored in the dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiRecord {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: CategoryId,
    pub lat: f64,
    pub lon: f64,
}

impl PoiRecord {
    #[must_use]
    pub fn location(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }

    /// Convert the record into the result shape the screen consumes.
    #[must_use]
    pub fn to_result(&self) -> ResultItem {
        ResultItem::poi(
            &self.name,
            self.description.clone(),
            self.location(),
            PoiHandle::new(self.id),
        )
    }
}

/// Raw on-disk shape of a dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DatasetFile {
    categories: Vec<Category>,
    pois: Vec<PoiRecord>,
}

/// Validated category table plus POI records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    catalog: CategoryCatalog,
    pois: Vec<PoiRecord>,
}

impl Dataset {
    /// Validate records and assemble a dataset from them.
    pub fn from_records(
        categories: Vec<Category>,
        pois: Vec<PoiRecord>,
    ) -> Result<Self, DatasetError> {
        let mut catalog = CategoryCatalog::new();
        for category in categories {
            catalog.register(category);
        }

        let mut seen_ids = HashSet::new();
        for poi in &pois {
            if !seen_ids.insert(poi.id) {
                return Err(DatasetError::DuplicateId { id: poi.id });
            }
            if !(-90.0..=90.0).contains(&poi.lat) || !(-180.0..=180.0).contains(&poi.lon) {
                return Err(DatasetError::CoordinateRange {
                    name: poi.name.clone(),
                    lat: poi.lat,
                    lon: poi.lon,
                });
            }
            if catalog.get(&poi.category).is_none() {
                return Err(DatasetError::UnknownCategory {
                    name: poi.name.clone(),
                    category: poi.category.clone(),
                });
            }
        }

        Ok(Self { catalog, pois })
    }

    /// Load and validate a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = fs::read_to_string(path)?;
        let file: DatasetFile = serde_json::from_str(&text)?;
        Self::from_records(file.categories, file.pois)
    }

    /// The category table.
    #[must_use]
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Look up a category definition by id.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.catalog.get(id)
    }

    /// All POIs belonging to one category, in record order.
    pub fn pois_in<'a>(&'a self, id: &'a CategoryId) -> impl Iterator<Item = &'a PoiRecord> {
        self.pois.iter().filter(move |poi| poi.category == *id)
    }

    /// Total number of POI records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Built-in demo dataset centered on Berlin.
    #[must_use]
    pub fn sample() -> Self {
        let mut catalog = CategoryCatalog::new();
        for category in [
            Category::new("restaurants", "Restaurants", "restaurants"),
            Category::new("cafes", "Cafes", "cafes"),
            Category::new("fuel", "Fuel", "fuel"),
            Category::new("hotels", "Hotels", "hotels"),
        ] {
            catalog.register(category);
        }

        let pois = vec![
            record(1, "Trattoria Bella", Some("Pasta & wine"), "restaurants", 52.5211, 13.4015),
            record(2, "Zur Letzten Instanz", Some("Old Berlin"), "restaurants", 52.5152, 13.4148),
            record(3, "Monsieur Vuong", None, "restaurants", 52.5266, 13.4103),
            record(4, "Curry Corner", Some("Currywurst stand"), "restaurants", 52.5319, 13.3846),
            record(5, "Ostseefisch", Some("Smoked fish"), "restaurants", 52.5072, 13.4312),
            record(6, "Ramen Takumi", None, "restaurants", 52.5226, 13.3937),
            record(7, "Barn Roastery", Some("Specialty coffee"), "cafes", 52.5277, 13.4046),
            record(8, "Cafe Einstein", Some("Viennese classic"), "cafes", 52.5029, 13.3644),
            record(9, "Kranzler Eck", None, "cafes", 52.5046, 13.3317),
            record(10, "Aral Mitte", Some("24h"), "fuel", 52.5295, 13.4228),
            record(11, "Shell Tiergarten", None, "fuel", 52.5128, 13.3391),
            record(12, "Hotel Adlon", Some("By the gate"), "hotels", 52.5161, 13.3802),
            record(13, "Motel Ost", None, "hotels", 52.5060, 13.4485),
        ];

        Self { catalog, pois }
    }
}

fn record(
    id: u64,
    name: &str,
    description: Option<&str>,
    category: &str,
    lat: f64,
    lon: f64,
) -> PoiRecord {
    PoiRecord {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        category: CategoryId::new(category),
        lat,
        lon,
    }
}
