use super::template::{HostAction, SurfaceHandle};
use crate::types::{LatLon, PoiHandle, ResultItem, ResultTarget};

/// One-way hand-off to the external route-preview flow.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePreviewRequest {
    pub destination: LatLon,
    pub poi: PoiHandle,
    pub settings_action: HostAction,
    pub surface: SurfaceHandle,
}

/// Convert a selected result into a route-preview request.
///
/// Only a concrete POI can be routed to; the category stub used to seed the
/// search yields `None`.
#[must_use]
pub fn preview_request(
    item: &ResultItem,
    settings_action: HostAction,
    surface: SurfaceHandle,
) -> Option<RoutePreviewRequest> {
    match item.target {
        ResultTarget::Poi { location, poi } => Some(RoutePreviewRequest {
            destination: location,
            poi,
            settings_action,
            surface,
        }),
        ResultTarget::Category(_) => None,
    }
}
