use anyhow::Result;
use poilist::BrowseOutcome;
use serde_json::json;

/// Print a plain-text representation of the browse outcome.
pub(crate) fn print_plain(outcome: &BrowseOutcome) {
    if !outcome.accepted {
        println!("Browse cancelled (category: '{}')", outcome.category);
        return;
    }

    match outcome.route_request() {
        Some(route) => println!(
            "Route preview requested: place #{} at {}",
            route.poi.raw(),
            route.destination
        ),
        None => println!("No selection"),
    }
}

/// Format the browse outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &BrowseOutcome) -> Result<String> {
    let route = match outcome.route_request() {
        Some(route) => json!({
            "type": "route-preview",
            "poi": route.poi.raw(),
            "destination": {
                "lat": route.destination.lat,
                "lon": route.destination.lon,
            },
            "settings_action": route.settings_action.label(),
            "surface": route.surface.raw(),
        }),
        None => serde_json::Value::Null,
    };

    let payload = json!({
        "accepted": outcome.accepted,
        "category": outcome.category.as_str(),
        "route": route,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the browse outcome.
pub(crate) fn print_json(outcome: &BrowseOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
