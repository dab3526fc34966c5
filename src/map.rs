//! Shared map overlay state for highlighted search results.
//!
//! Every screen that wants results shown on the map registers as a
//! contributor and owns its own slice of the overlay. The map draws the
//! union of all contributions, so one screen tearing down can never clobber
//! the highlights of another that is still alive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::types::{CategoryId, ResultItem};

/// Identifies one contributor's slice of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayToken(u64);

#[derive(Debug)]
struct Contribution {
    category: CategoryId,
    items: Vec<ResultItem>,
    /// False until the first highlight; registration alone contributes
    /// nothing to the membership set.
    active: bool,
}

#[derive(Debug, Default)]
struct OverlayInner {
    next_token: u64,
    contributions: Vec<(OverlayToken, Contribution)>,
    redraws: u64,
}

/// Handle to the map's highlight overlay, shared between screens and host.
#[derive(Debug, Clone, Default)]
pub struct MapOverlay {
    inner: Arc<Mutex<OverlayInner>>,
}

impl MapOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, OverlayInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new contributor for `category`, initially inactive.
    #[must_use]
    pub fn register(&self, category: CategoryId) -> OverlayToken {
        let mut inner = self.lock();
        let token = OverlayToken(inner.next_token);
        inner.next_token += 1;
        inner.contributions.push((
            token,
            Contribution {
                category,
                items: Vec::new(),
                active: false,
            },
        ));
        token
    }

    /// Replace the results highlighted under `token` and activate it.
    ///
    /// No-op for tokens that were already cleared.
    pub fn set_highlighted(&self, token: OverlayToken, items: Vec<ResultItem>) {
        let mut inner = self.lock();
        if let Some((_, contribution)) = inner
            .contributions
            .iter_mut()
            .find(|(t, _)| *t == token)
        {
            contribution.items = items;
            contribution.active = true;
        }
    }

    /// Drop the contribution registered under `token`. Idempotent.
    pub fn clear(&self, token: OverlayToken) {
        let mut inner = self.lock();
        let before = inner.contributions.len();
        inner.contributions.retain(|(t, _)| *t != token);
        if inner.contributions.len() != before {
            debug!("overlay contribution {token:?} cleared");
        }
    }

    /// Categories currently highlighted: active contributions in
    /// registration order, without duplicates.
    #[must_use]
    pub fn membership(&self) -> Vec<CategoryId> {
        let inner = self.lock();
        let mut categories = Vec::new();
        for (_, contribution) in &inner.contributions {
            if contribution.active && !categories.contains(&contribution.category) {
                categories.push(contribution.category.clone());
            }
        }
        categories
    }

    /// Union of all highlighted results, in registration order.
    #[must_use]
    pub fn highlighted(&self) -> Vec<ResultItem> {
        self.lock()
            .contributions
            .iter()
            .filter(|(_, contribution)| contribution.active)
            .flat_map(|(_, contribution)| contribution.items.iter().cloned())
            .collect()
    }

    /// Ask the map to redraw with the current overlay state.
    pub fn request_redraw(&self) {
        self.lock().redraws += 1;
    }

    /// Number of redraws requested so far.
    #[must_use]
    pub fn redraw_count(&self) -> u64 {
        self.lock().redraws
    }
}
