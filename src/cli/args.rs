use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use poilist::{LatLon, app_dirs};

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("poilist {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

/// Parse a `LAT,LON` pair into a [`LatLon`].
fn parse_position(raw: &str) -> Result<LatLon, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| String::from("expected LAT,LON"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} is out of range"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("longitude {lon} is out of range"));
    }
    Ok(LatLon::new(lat, lon))
}

#[derive(Parser, Debug)]
#[command(
    name = "poilist",
    version,
    long_version = long_version(),
    about = "Browse nearby places by category",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `poilist` binary.
pub(crate) struct CliArgs {
    #[arg(
        value_name = "CATEGORY",
        help = "Category of places to browse (see --list-categories)"
    )]
    pub(crate) category: Option<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "POILIST_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'd',
        long,
        value_name = "FILE",
        help = "Load places from a JSON dataset (default: built-in sample)"
    )]
    pub(crate) dataset: Option<PathBuf>,
    #[arg(
        long = "at",
        value_name = "LAT,LON",
        value_parser = parse_position,
        help = "Current position used for distance badges (default: unknown)"
    )]
    pub(crate) at: Option<LatLon>,
    #[arg(
        short = 'u',
        long,
        value_enum,
        help = "Distance units for the list badges (default: metric)"
    )]
    pub(crate) units: Option<UnitsArg>,
    #[arg(
        short = 'l',
        long = "limit",
        value_name = "NUM",
        help = "Maximum number of visible rows including the overflow slot (default: 6)"
    )]
    pub(crate) limit: Option<usize>,
    #[arg(
        long = "search-delay",
        value_name = "MS",
        help = "Simulated search latency in milliseconds (default: 120)"
    )]
    pub(crate) search_delay: Option<u64>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        long = "list-categories",
        help = "List the dataset categories and exit (default: disabled)"
    )]
    pub(crate) list_categories: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
/// Distance unit systems accepted via the command line.
pub(crate) enum UnitsArg {
    Metric,
    Imperial,
}

impl UnitsArg {
    /// Return the string representation consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            UnitsArg::Metric => "metric",
            UnitsArg::Imperial => "imperial",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the binary.
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
