//! Core crate exports for the POI category list screen.
//!
//! The root module re-exports the screen, search and map types so that
//! embedders can drive a screen without digging through the module
//! hierarchy.

pub mod app_dirs;
pub mod dataset;
pub mod host;
pub mod icons;
pub mod map;
pub mod screen;
pub mod search;
pub mod types;

pub use dataset::{Dataset, DatasetError};
pub use host::{BrowseHost, BrowseOutcome};
pub use icons::{IconId, IconRegistry, RowIcon};
pub use map::{MapOverlay, OverlayToken};
pub use screen::{
    DEFAULT_CONTENT_LIMIT, HostAction, HostContext, PlaceListTemplate, PoiScreen,
    RoutePreviewRequest, ScreenState, ScreenUi, SurfaceHandle, TemplateAction, TemplateBody,
};
pub use search::{SearchCompletion, SearchSession};
pub use types::{
    Category, CategoryCatalog, CategoryId, DistanceFormatter, LatLon, ResultItem, Units,
};
