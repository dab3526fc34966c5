use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, the spherical model used for display distances.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

const METERS_PER_MILE: f64 = 1_609.344;
const FEET_PER_METER: f64 = 3.280_84;

/// A geographic position in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Build a position from latitude and longitude in degrees.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Great-circle distance between two positions, in meters.
///
/// Haversine on a spherical Earth; accurate to well within the precision a
/// human-readable distance badge needs. Pure and symmetric, and exactly zero
/// for coincident inputs.
#[must_use]
pub fn distance_between(a: LatLon, b: LatLon) -> f64 {
    const EPSILON: f64 = 1e-10;

    if (a.lat - b.lat).abs() < EPSILON && (a.lon - b.lon).abs() < EPSILON {
        return 0.0;
    }

    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    // Floating-point drift can push the haversine term a hair outside [0, 1].
    let h = h.clamp(0.0, 1.0);

    2.0 * h.sqrt().asin() * EARTH_RADIUS_M
}

/// Renders a raw meter distance as the short badge text shown on a row.
///
/// Locale and unit handling live behind this seam; the screen core never
/// formats distances itself.
pub trait DistanceFormatter {
    fn format(&self, meters: f64) -> String;
}

/// Meters below one kilometer, kilometers with one decimal above.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricFormatter;

impl DistanceFormatter for MetricFormatter {
    fn format(&self, meters: f64) -> String {
        if meters < 1_000.0 {
            format!("{:.0} m", meters)
        } else {
            format!("{:.1} km", meters / 1_000.0)
        }
    }
}

/// Feet for short distances, miles with one decimal beyond a fifth of a mile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImperialFormatter;

impl DistanceFormatter for ImperialFormatter {
    fn format(&self, meters: f64) -> String {
        let miles = meters / METERS_PER_MILE;
        if miles < 0.2 {
            format!("{:.0} ft", meters * FEET_PER_METER)
        } else {
            format!("{:.1} mi", miles)
        }
    }
}

/// Unit system selectable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Resolve a unit system from its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    /// Return the formatter implementing this unit system.
    #[must_use]
    pub fn formatter(self) -> Box<dyn DistanceFormatter> {
        match self {
            Self::Metric => Box::new(MetricFormatter),
            Self::Imperial => Box::new(ImperialFormatter),
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::Metric
    }
}
