use std::path::Path;

use anyhow::{Context, Result, bail};
use poilist::search;
use poilist::{
    BrowseHost, BrowseOutcome, Category, CategoryId, Dataset, HostAction, HostContext, MapOverlay,
    PoiScreen, SearchSession, SurfaceHandle,
};

use crate::settings::ResolvedConfig;

/// Action label forwarded to the route-preview hand-off.
const SETTINGS_ACTION_LABEL: &str = "Search settings";
/// Surface every screen in this binary renders onto.
const MAP_SURFACE: u64 = 1;

/// Coordinates building and running the interactive browse experience.
pub(crate) struct BrowseWorkflow {
    host: BrowseHost,
}

impl std::fmt::Debug for BrowseWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowseWorkflow").finish_non_exhaustive()
    }
}

impl BrowseWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let host = build_host(config)?;
        Ok(Self { host })
    }

    pub(crate) fn run(self) -> Result<BrowseOutcome> {
        self.host.run()
    }
}

/// Translate resolved configuration into a wired-up [`BrowseHost`].
fn build_host(config: ResolvedConfig) -> Result<BrowseHost> {
    let ResolvedConfig {
        category,
        dataset,
        position,
        units,
        content_limit,
        search_delay,
    } = config;

    let dataset = load_dataset(dataset.as_deref())?;
    let name = category.context("no category selected")?;
    let category = select_category(&dataset, &name)?;

    let (commands, completions) = search::spawn(dataset, position, search_delay);
    let session = SearchSession::new(commands, completions);
    let overlay = MapOverlay::new();

    let context = HostContext::new(
        HostAction::new(SETTINGS_ACTION_LABEL),
        SurfaceHandle::new(MAP_SURFACE),
    )
    .with_content_limit(content_limit)
    .with_formatter(units.formatter());

    let screen = PoiScreen::new(category, context, session, overlay.clone(), position);
    Ok(BrowseHost::new(screen, overlay))
}

/// Load the configured dataset, falling back to the built-in sample.
fn load_dataset(path: Option<&Path>) -> Result<Dataset> {
    match path {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("failed to load dataset {}", path.display())),
        None => Ok(Dataset::sample()),
    }
}

/// Find a category by id, falling back to a case-insensitive name match.
fn select_category(dataset: &Dataset, name: &str) -> Result<Category> {
    let id = CategoryId::new(name.to_ascii_lowercase());
    if let Some(category) = dataset.category(&id) {
        return Ok(category.clone());
    }

    let matched = dataset
        .catalog()
        .categories()
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(name));
    match matched {
        Some(category) => Ok(category.clone()),
        None => {
            let known: Vec<&str> = dataset
                .catalog()
                .categories()
                .iter()
                .map(|category| category.id.as_str())
                .collect();
            bail!("unknown category '{name}' (known: {})", known.join(", "))
        }
    }
}

/// Print every category in the configured dataset together with its POI count.
pub(crate) fn print_categories(config: &ResolvedConfig) -> Result<()> {
    let dataset = load_dataset(config.dataset.as_deref())?;
    for category in dataset.catalog().categories() {
        let count = dataset.pois_in(&category.id).count();
        println!("{:<14} {} ({count})", category.id.as_str(), category.name);
    }
    Ok(())
}
