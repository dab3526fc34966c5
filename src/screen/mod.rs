//! The POI category list screen: state machine, row construction, overlay
//! lifetime and the route-preview hand-off.

mod overlay;
mod route;
mod rows;
mod template;

pub use overlay::OverlayGuard;
pub use route::{RoutePreviewRequest, preview_request};
pub use rows::RowListBuilder;
pub use template::{HostAction, PlaceListTemplate, SurfaceHandle, TemplateAction, TemplateBody};

use std::sync::mpsc::TryRecvError;

use log::debug;

use crate::icons::IconRegistry;
use crate::map::MapOverlay;
use crate::search::{SearchCompletion, SearchSession};
use crate::types::{Category, DistanceFormatter, LatLon, MetricFormatter, ResultItem, RowList};

/// Default host list capacity when the environment does not supply one.
pub const DEFAULT_CONTENT_LIMIT: usize = 6;

const NO_ITEMS_MESSAGE: &str = "No places found for this category";

/// Host-tunable strings for the screen chrome.
#[derive(Debug, Clone)]
pub struct ScreenUi {
    /// Message shown instead of rows when a round finds nothing.
    pub no_items_message: String,
}

impl Default for ScreenUi {
    fn default() -> Self {
        Self {
            no_items_message: NO_ITEMS_MESSAGE.to_string(),
        }
    }
}

/// Everything the host environment injects into one screen.
pub struct HostContext {
    /// Maximum list length the host can display, including its own
    /// "more results" affordance.
    pub content_limit: usize,
    pub settings_action: HostAction,
    pub surface: SurfaceHandle,
    pub ui: ScreenUi,
    pub formatter: Box<dyn DistanceFormatter>,
    pub icons: IconRegistry,
}

impl HostContext {
    #[must_use]
    pub fn new(settings_action: HostAction, surface: SurfaceHandle) -> Self {
        Self {
            content_limit: DEFAULT_CONTENT_LIMIT,
            settings_action,
            surface,
            ui: ScreenUi::default(),
            formatter: Box::new(MetricFormatter),
            icons: IconRegistry::default(),
        }
    }

    #[must_use]
    pub fn with_content_limit(mut self, limit: usize) -> Self {
        self.content_limit = limit;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn DistanceFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_icons(mut self, icons: IconRegistry) -> Self {
        self.icons = icons;
        self
    }

    #[must_use]
    pub fn with_ui(mut self, ui: ScreenUi) -> Self {
        self.ui = ui;
        self
    }
}

/// What the screen is currently showing.
///
/// Exactly one state is active; transitions happen only inside the
/// completion handler and on an explicit re-search.
#[derive(Debug, Clone)]
pub enum ScreenState {
    Loading,
    Empty,
    Populated(RowList),
}

/// The category list screen.
///
/// Owns the search session, its overlay contribution and the current state.
/// The host drives it with serialized events and reads the template back on
/// demand.
pub struct PoiScreen {
    category: Category,
    context: HostContext,
    session: SearchSession,
    guard: OverlayGuard,
    reference: Option<LatLon>,
    state: ScreenState,
    results: Vec<ResultItem>,
    needs_render: bool,
    alive: bool,
}

impl PoiScreen {
    /// Construct the screen in the loading state and seed the search.
    #[must_use]
    pub fn new(
        category: Category,
        context: HostContext,
        mut session: SearchSession,
        overlay: MapOverlay,
        reference: Option<LatLon>,
    ) -> Self {
        let guard = OverlayGuard::acquire(overlay, category.id.clone());
        session.seed(ResultItem::category_seed(&category));
        Self {
            category,
            context,
            session,
            guard,
            reference,
            state: ScreenState::Loading,
            results: Vec::new(),
            needs_render: true,
            alive: true,
        }
    }

    /// Drain pending completions, applying only the ones that still matter.
    ///
    /// Returns whether any completion was applied.
    pub fn pump_completions(&mut self) -> bool {
        let mut applied = false;
        loop {
            match self.session.try_recv() {
                Ok(completion) => applied |= self.on_search_done(completion),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Completion callback for one search round.
    ///
    /// Applies the round synchronously: overlay first, then the state
    /// transition, then the render request. Completions for superseded
    /// rounds or a torn-down screen are dropped.
    pub fn on_search_done(&mut self, completion: SearchCompletion) -> bool {
        if !self.alive {
            debug!(
                "completion for round {} ignored; screen torn down",
                completion.query_id
            );
            return false;
        }
        if !self.session.matches_latest(completion.query_id) {
            debug!("completion for superseded round {} dropped", completion.query_id);
            return false;
        }
        self.session.record_completion();

        debug!(
            "round {} settled with {} results for '{}'",
            completion.query_id, completion.result_count, completion.phrase
        );

        self.results = completion.results.unwrap_or_default();
        self.guard.highlight(self.results.clone());

        self.state = if completion.result_count == 0 {
            ScreenState::Empty
        } else {
            ScreenState::Populated(self.build_rows())
        };
        self.request_render();
        true
    }

    /// Start a fresh round for the same category.
    ///
    /// The screen returns to loading; the previous round's completion, if it
    /// is still in flight, no longer matches and will be dropped.
    pub fn refresh_search(&mut self) {
        if !self.alive {
            return;
        }
        self.state = ScreenState::Loading;
        self.session.seed(ResultItem::category_seed(&self.category));
        self.request_render();
    }

    /// Adopt a fresh reference location and rebuild the distance badges.
    pub fn update_location(&mut self, reference: LatLon) {
        self.reference = Some(reference);
        if matches!(self.state, ScreenState::Populated(_)) {
            self.state = ScreenState::Populated(self.build_rows());
        }
        self.request_render();
    }

    /// Current visual description. A pure read; never issues a search.
    #[must_use]
    pub fn template(&self) -> PlaceListTemplate {
        let body = match &self.state {
            ScreenState::Loading => TemplateBody::Loading,
            ScreenState::Empty => TemplateBody::NoItems {
                message: self.context.ui.no_items_message.clone(),
            },
            ScreenState::Populated(rows) => TemplateBody::Rows(rows.clone()),
        };
        PlaceListTemplate {
            title: self.category.name.clone(),
            header_action: TemplateAction::Back,
            actions: vec![TemplateAction::Host(self.context.settings_action.clone())],
            body,
        }
    }

    /// "Search more" affordance: requests template re-emission without
    /// touching the state.
    pub fn on_click_search_more(&mut self) {
        self.request_render();
    }

    /// Row activation. Produces the route-preview hand-off for concrete
    /// POIs; the category stub and out-of-range indices yield `None`.
    pub fn on_result_click(&self, index: usize) -> Option<RoutePreviewRequest> {
        let ScreenState::Populated(rows) = &self.state else {
            return None;
        };
        let row = rows.get(index)?;
        preview_request(
            row.item(),
            self.context.settings_action.clone(),
            self.context.surface,
        )
    }

    /// Terminal teardown: retract the overlay contribution, request a map
    /// redraw and stop the session. Idempotent; completions arriving later
    /// are ignored.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.guard.release();
        self.session.shutdown();
        debug!("screen for '{}' torn down", self.category.id);
    }

    /// Flag that the host should re-read the template.
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Consume the pending render request, if any.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    #[must_use]
    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn reference(&self) -> Option<LatLon> {
        self.reference
    }

    /// Whether a round is still in flight.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.session.is_in_flight()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    fn build_rows(&self) -> RowList {
        RowListBuilder::new(
            &self.category,
            &self.context.icons,
            self.context.formatter.as_ref(),
            self.reference,
            self.context.content_limit,
        )
        .build(&self.results)
    }
}

impl Drop for PoiScreen {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::dataset::Dataset;
    use crate::search::{SearchCommand, SearchCompletion, spawn};
    use crate::types::{CategoryId, EMPTY_MARKER, PoiHandle};

    struct Harness {
        screen: PoiScreen,
        overlay: MapOverlay,
        commands: Receiver<SearchCommand>,
        completions: Sender<SearchCompletion>,
    }

    fn harness_with(category: Category, reference: Option<LatLon>, limit: usize) -> Harness {
        let (command_tx, command_rx) = mpsc::channel();
        let (completion_tx, completion_rx) = mpsc::channel();
        let session = SearchSession::new(command_tx, completion_rx);
        let overlay = MapOverlay::new();
        let context = HostContext::new(HostAction::new("Settings"), SurfaceHandle::new(7))
            .with_content_limit(limit);
        let screen = PoiScreen::new(category, context, session, overlay.clone(), reference);
        Harness {
            screen,
            overlay,
            commands: command_rx,
            completions: completion_tx,
        }
    }

    fn harness() -> Harness {
        harness_with(
            Category::new("restaurants", "Restaurants", "restaurants"),
            Some(LatLon::new(52.0, 13.0)),
            6,
        )
    }

    fn poi(name: &str, description: Option<&str>, lat: f64, lon: f64, id: u64) -> ResultItem {
        ResultItem::poi(
            name,
            description.map(str::to_string),
            LatLon::new(lat, lon),
            PoiHandle::new(id),
        )
    }

    fn two_restaurants() -> Vec<ResultItem> {
        vec![
            poi("Trattoria", Some("Pasta & wine"), 52.0, 13.0176, 1),
            poi("Imbiss", None, 52.0, 12.99, 2),
        ]
    }

    #[test]
    fn construction_enters_loading_and_seeds_the_category() {
        let mut h = harness();
        assert!(matches!(h.screen.state(), ScreenState::Loading));
        assert!(h.screen.is_searching());
        assert!(h.screen.take_render_request());

        match h.commands.try_recv().expect("seed command") {
            SearchCommand::Seed(seed) => {
                assert_eq!(seed.id, 1);
                assert_eq!(seed.item.name, "Restaurants");
                assert_eq!(seed.item.location(), None);
            }
            SearchCommand::Shutdown => panic!("unexpected shutdown"),
        }
    }

    #[test]
    fn zero_results_enter_empty_with_the_no_items_message() {
        let mut h = harness();
        h.completions
            .send(SearchCompletion::empty(1, "restaurants"))
            .expect("send completion");
        assert!(h.screen.pump_completions());

        assert!(matches!(h.screen.state(), ScreenState::Empty));
        match h.screen.template().body {
            TemplateBody::NoItems { message } => assert_eq!(message, NO_ITEMS_MESSAGE),
            _ => panic!("expected the no-items body"),
        }
    }

    #[test]
    fn two_results_populate_annotated_rows() {
        let mut h = harness();
        h.completions
            .send(SearchCompletion::new(1, "restaurants", two_restaurants()))
            .expect("send completion");
        assert!(h.screen.pump_completions());

        let ScreenState::Populated(rows) = h.screen.state() else {
            panic!("expected populated state");
        };
        assert_eq!(rows.len(), 2);

        let first = &rows.rows()[0];
        assert_eq!(first.title, "Trattoria");
        assert_eq!(first.description.text, "• Pasta & wine");
        assert_eq!(first.description.distance.as_deref(), Some("1.2 km"));

        let second = &rows.rows()[1];
        assert_eq!(second.title, "Imbiss");
        assert_eq!(second.description.text, EMPTY_MARKER);
        assert!(second.description.distance.is_some());
    }

    #[test]
    fn results_beyond_the_capacity_are_truncated() {
        let mut h = harness();
        let results: Vec<_> = (0..8u32)
            .map(|i| {
                poi(
                    &format!("poi-{i}"),
                    None,
                    52.0,
                    13.0 + 0.01 * f64::from(i),
                    u64::from(i),
                )
            })
            .collect();
        h.completions
            .send(SearchCompletion::new(1, "restaurants", results))
            .expect("send completion");
        h.screen.pump_completions();

        let ScreenState::Populated(rows) = h.screen.state() else {
            panic!("expected populated state");
        };
        assert_eq!(rows.len(), 5);
        assert!(rows.truncated());
    }

    #[test]
    fn overlay_tracks_the_visible_lifetime() {
        let mut h = harness();
        assert!(h.overlay.membership().is_empty());

        h.completions
            .send(SearchCompletion::new(1, "restaurants", two_restaurants()))
            .expect("send completion");
        h.screen.pump_completions();
        assert_eq!(h.overlay.membership(), [CategoryId::new("restaurants")]);
        assert_eq!(h.overlay.highlighted().len(), 2);

        h.screen.teardown();
        assert!(h.overlay.membership().is_empty());
        assert!(h.overlay.highlighted().is_empty());
        assert_eq!(h.overlay.redraw_count(), 1);
    }

    #[test]
    fn empty_rounds_still_activate_the_overlay_membership() {
        let mut h = harness();
        h.completions
            .send(SearchCompletion::empty(1, "restaurants"))
            .expect("send completion");
        h.screen.pump_completions();
        assert_eq!(h.overlay.membership(), [CategoryId::new("restaurants")]);
    }

    #[test]
    fn superseded_rounds_are_dropped() {
        let mut h = harness();
        h.screen.refresh_search();

        h.completions
            .send(SearchCompletion::new(1, "restaurants", two_restaurants()))
            .expect("send stale completion");
        assert!(!h.screen.pump_completions());
        assert!(matches!(h.screen.state(), ScreenState::Loading));

        h.completions
            .send(SearchCompletion::empty(2, "restaurants"))
            .expect("send current completion");
        assert!(h.screen.pump_completions());
        assert!(matches!(h.screen.state(), ScreenState::Empty));
    }

    #[test]
    fn completions_after_teardown_are_ignored() {
        let mut h = harness();
        h.screen.teardown();

        h.completions
            .send(SearchCompletion::new(1, "restaurants", two_restaurants()))
            .expect("send completion");
        assert!(!h.screen.pump_completions());
        assert!(matches!(h.screen.state(), ScreenState::Loading));
        assert!(h.overlay.membership().is_empty());
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut h = harness();
        h.screen.teardown();
        h.screen.teardown();
        assert_eq!(h.overlay.redraw_count(), 1);
    }

    #[test]
    fn dropping_the_screen_releases_the_overlay() {
        let h = harness();
        let overlay = h.overlay.clone();
        drop(h);
        assert!(overlay.membership().is_empty());
        assert_eq!(overlay.redraw_count(), 1);
    }

    #[test]
    fn row_click_hands_off_location_and_handle() {
        let mut h = harness();
        h.completions
            .send(SearchCompletion::new(1, "restaurants", two_restaurants()))
            .expect("send completion");
        h.screen.pump_completions();

        let request = h.screen.on_result_click(0).expect("request");
        assert_eq!(request.destination, LatLon::new(52.0, 13.0176));
        assert_eq!(request.poi, PoiHandle::new(1));
        assert_eq!(request.settings_action.label(), "Settings");
        assert_eq!(request.surface, SurfaceHandle::new(7));

        assert!(h.screen.on_result_click(5).is_none());
    }

    #[test]
    fn clicks_while_loading_produce_no_request() {
        let h = harness();
        assert!(h.screen.on_result_click(0).is_none());
    }

    #[test]
    fn template_reads_are_pure() {
        let mut h = harness();
        let _ = h.commands.try_recv().expect("construction seed");

        let _ = h.screen.template();
        let _ = h.screen.template();
        assert!(h.commands.try_recv().is_err(), "template read issued a command");
    }

    #[test]
    fn search_more_requests_a_render_without_state_changes() {
        let mut h = harness();
        let _ = h.commands.try_recv().expect("construction seed");
        assert!(h.screen.take_render_request());

        h.screen.on_click_search_more();
        assert!(h.screen.take_render_request());
        assert!(matches!(h.screen.state(), ScreenState::Loading));
        assert!(h.commands.try_recv().is_err(), "search-more issued a command");
    }

    #[test]
    fn render_requests_are_consumed_once() {
        let mut h = harness();
        assert!(h.screen.take_render_request());
        assert!(!h.screen.take_render_request());
    }

    #[test]
    fn location_updates_rebuild_the_distance_badges() {
        let mut h = harness_with(
            Category::new("restaurants", "Restaurants", "restaurants"),
            None,
            6,
        );
        h.completions
            .send(SearchCompletion::new(1, "restaurants", two_restaurants()))
            .expect("send completion");
        h.screen.pump_completions();

        let ScreenState::Populated(rows) = h.screen.state() else {
            panic!("expected populated state");
        };
        assert!(rows.rows().iter().all(|row| row.description.distance.is_none()));

        h.screen.update_location(LatLon::new(52.0, 13.0));
        let ScreenState::Populated(rows) = h.screen.state() else {
            panic!("expected populated state");
        };
        assert!(rows.rows().iter().all(|row| row.description.distance.is_some()));
        assert!(h.screen.take_render_request());
    }

    #[test]
    fn full_engine_round_reaches_the_screen() {
        let reference = Some(LatLon::new(52.52, 13.40));
        let (tx, rx) = spawn(Dataset::sample(), reference, Duration::from_millis(0));
        let session = SearchSession::new(tx, rx);
        let overlay = MapOverlay::new();
        let context = HostContext::new(HostAction::new("Settings"), SurfaceHandle::new(7));
        let mut screen = PoiScreen::new(
            Category::new("cafes", "Cafes", "cafes"),
            context,
            session,
            overlay.clone(),
            reference,
        );

        let deadline = Instant::now() + Duration::from_secs(2);
        while !screen.pump_completions() {
            assert!(Instant::now() < deadline, "no completion arrived");
            thread::sleep(Duration::from_millis(5));
        }

        let ScreenState::Populated(rows) = screen.state() else {
            panic!("expected populated state");
        };
        assert_eq!(rows.len(), 3);
        assert!(!rows.truncated());
        assert!(rows.rows().iter().all(|row| row.description.distance.is_some()));
        assert_eq!(overlay.membership(), [CategoryId::new("cafes")]);
    }

    #[test]
    fn refreshing_returns_to_loading_and_reseeds() {
        let mut h = harness();
        h.completions
            .send(SearchCompletion::new(1, "restaurants", two_restaurants()))
            .expect("send completion");
        h.screen.pump_completions();

        h.screen.refresh_search();
        assert!(matches!(h.screen.state(), ScreenState::Loading));
        assert!(h.screen.is_searching());

        let _ = h.commands.try_recv().expect("construction seed");
        match h.commands.try_recv().expect("refresh seed") {
            SearchCommand::Seed(seed) => assert_eq!(seed.id, 2),
            SearchCommand::Shutdown => panic!("unexpected shutdown"),
        }
    }
}
