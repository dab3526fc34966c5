use std::path::PathBuf;
use std::time::Duration;

use poilist::{LatLon, Units};

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
    pub(crate) category: Option<String>,
    pub(crate) dataset: Option<PathBuf>,
    pub(crate) position: Option<LatLon>,
    pub(crate) units: Units,
    pub(crate) content_limit: usize,
    pub(crate) search_delay: Duration,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub(crate) fn print_summary(&self) {
        println!("Effective configuration:");
        if let Some(category) = &self.category {
            println!("  Category: {category}");
        }
        match &self.dataset {
            Some(path) => println!("  Dataset: {}", path.display()),
            None => println!("  Dataset: (built-in sample)"),
        }
        match self.position {
            Some(position) => println!("  Position: {position}"),
            None => println!("  Position: unknown"),
        }
        println!("  Units: {}", units_name(self.units));
        println!("  Content limit: {}", self.content_limit);
        println!("  Search delay: {} ms", self.search_delay.as_millis());
    }
}

fn units_name(units: Units) -> &'static str {
    match units {
        Units::Metric => "metric",
        Units::Imperial => "imperial",
    }
}
