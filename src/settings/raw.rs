use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;

use poilist::{DEFAULT_CONTENT_LIMIT, LatLon, Units, app_dirs};

use crate::cli::CliArgs;

use super::resolved::ResolvedConfig;

/// Search latency applied when the configuration does not override it.
const DEFAULT_SEARCH_DELAY_MS: u64 = 120;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    dataset: DatasetSection,
    position: PositionSection,
    display: DisplaySection,
    search: SearchSection,
}

/// Dataset location options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DatasetSection {
    path: Option<PathBuf>,
}

/// Position fix used to rank results and annotate rows with distances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PositionSection {
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Presentation options prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DisplaySection {
    units: Option<String>,
    content_limit: Option<usize>,
}

/// Search tuning options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
    delay_ms: Option<u64>,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.dataset.clone() {
            self.dataset.path = Some(path);
        }
        if let Some(position) = cli.at {
            self.position.lat = Some(position.lat);
            self.position.lon = Some(position.lon);
        }
        if let Some(units) = cli.units {
            self.display.units = Some(units.as_str().to_string());
        }
        if let Some(limit) = cli.limit {
            self.display.content_limit = Some(limit);
        }
        if let Some(delay) = cli.search_delay {
            self.search.delay_ms = Some(delay);
        }
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        ensure!(
            cli.category.is_some() || cli.list_categories,
            "a category is required (run with --list-categories to see the choices)"
        );

        let dataset = match self.dataset.path {
            Some(path) => {
                let path = if path.is_relative() {
                    env::current_dir()
                        .context("failed to resolve current directory for dataset path")?
                        .join(path)
                } else {
                    path
                };
                ensure!(
                    path.is_file(),
                    "dataset file {} does not exist",
                    path.display()
                );
                Some(path)
            }
            None => default_dataset_file(),
        };

        let position = match (self.position.lat, self.position.lon) {
            (Some(lat), Some(lon)) => {
                ensure!(
                    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon),
                    "position {lat},{lon} is out of range"
                );
                Some(LatLon::new(lat, lon))
            }
            (None, None) => None,
            _ => bail!("position needs both lat and lon"),
        };

        let units = match self.display.units.as_deref() {
            Some(name) => {
                Units::from_name(name).with_context(|| format!("unknown units '{name}'"))?
            }
            None => Units::default(),
        };

        let content_limit = self.display.content_limit.unwrap_or(DEFAULT_CONTENT_LIMIT);
        ensure!(
            content_limit >= 2,
            "content limit must leave room for at least one row"
        );

        let search_delay =
            Duration::from_millis(self.search.delay_ms.unwrap_or(DEFAULT_SEARCH_DELAY_MS));

        Ok(ResolvedConfig {
            category: cli.category.clone(),
            dataset,
            position,
            units,
            content_limit,
            search_delay,
        })
    }
}

/// Look for a dataset the user installed into the application data directory.
fn default_dataset_file() -> Option<PathBuf> {
    let dir = app_dirs::get_data_dir().ok()?;
    let path = dir.join("pois.json");
    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use config::{Config, File, FileFormat};

    use super::*;

    #[test]
    fn toml_sections_deserialize() {
        let source = r#"
            [dataset]
            path = "places.json"

            [position]
            lat = 52.52
            lon = 13.405

            [display]
            units = "imperial"
            content_limit = 8

            [search]
            delay_ms = 40
        "#;

        let raw: RawConfig = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");

        assert_eq!(raw.dataset.path.as_deref(), Some(Path::new("places.json")));
        assert_eq!(raw.position.lat, Some(52.52));
        assert_eq!(raw.position.lon, Some(13.405));
        assert_eq!(raw.display.units.as_deref(), Some("imperial"));
        assert_eq!(raw.display.content_limit, Some(8));
        assert_eq!(raw.search.delay_ms, Some(40));
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let cli = CliArgs::parse_from([
            "poilist",
            "cafes",
            "--at",
            "52.52,13.405",
            "--units",
            "imperial",
            "--limit",
            "9",
            "--search-delay",
            "5",
        ]);

        let mut config = RawConfig::default();
        config.display.units = Some("metric".into());
        config.apply_cli_overrides(&cli);

        assert_eq!(config.position.lat, Some(52.52));
        assert_eq!(config.position.lon, Some(13.405));
        assert_eq!(config.display.units.as_deref(), Some("imperial"));
        assert_eq!(config.display.content_limit, Some(9));
        assert_eq!(config.search.delay_ms, Some(5));
    }

    #[test]
    fn resolve_fills_defaults() {
        let cli = CliArgs::parse_from(["poilist", "cafes"]);
        let config = RawConfig::default().resolve(&cli).expect("resolves");

        assert_eq!(config.category.as_deref(), Some("cafes"));
        assert_eq!(config.content_limit, DEFAULT_CONTENT_LIMIT);
        assert_eq!(config.units, Units::Metric);
        assert!(config.position.is_none());
        assert_eq!(
            config.search_delay,
            Duration::from_millis(DEFAULT_SEARCH_DELAY_MS)
        );
    }

    #[test]
    fn resolve_requires_a_category_unless_listing() {
        let cli = CliArgs::parse_from(["poilist"]);
        assert!(RawConfig::default().resolve(&cli).is_err());

        let cli = CliArgs::parse_from(["poilist", "--list-categories"]);
        assert!(RawConfig::default().resolve(&cli).is_ok());
    }

    #[test]
    fn resolve_rejects_half_positions() {
        let cli = CliArgs::parse_from(["poilist", "cafes"]);
        let mut raw = RawConfig::default();
        raw.position.lat = Some(52.0);

        assert!(raw.resolve(&cli).is_err());
    }

    #[test]
    fn resolve_rejects_tiny_content_limits() {
        let cli = CliArgs::parse_from(["poilist", "cafes", "--limit", "1"]);
        let mut raw = RawConfig::default();
        raw.apply_cli_overrides(&cli);

        assert!(raw.resolve(&cli).is_err());
    }

    #[test]
    fn resolve_checks_dataset_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pois.json");
        std::fs::write(&path, "{}").expect("write");

        let cli = CliArgs::parse_from(["poilist", "cafes"]);
        let mut raw = RawConfig::default();
        raw.dataset.path = Some(path.clone());
        let config = raw.resolve(&cli).expect("resolves");
        assert_eq!(config.dataset.as_deref(), Some(path.as_path()));

        let mut missing = RawConfig::default();
        missing.dataset.path = Some(dir.path().join("absent.json"));
        assert!(missing.resolve(&cli).is_err());
    }
}
