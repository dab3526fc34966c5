//! Types shared across the screen state machine and search pipeline.

mod category;
mod geo;
mod result;
mod row;

pub use category::{Category, CategoryCatalog, CategoryId};
pub use geo::{
    DistanceFormatter, ImperialFormatter, LatLon, MetricFormatter, Units, distance_between,
};
pub use result::{PoiHandle, ResultItem, ResultTarget};
pub use row::{DescriptionLine, DisplayRow, EMPTY_MARKER, RowList};
