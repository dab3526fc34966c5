use log::debug;

use crate::map::{MapOverlay, OverlayToken};
use crate::types::{CategoryId, ResultItem};

/// Scoped ownership of one screen's contribution to the map overlay.
///
/// Acquired when the screen is constructed and released exactly once on the
/// terminal teardown event. Dropping an unreleased guard releases it, so the
/// overlay is retracted even when teardown is skipped.
pub struct OverlayGuard {
    overlay: MapOverlay,
    token: OverlayToken,
    category: CategoryId,
    released: bool,
}

impl OverlayGuard {
    /// Register an inactive contribution for `category`.
    #[must_use]
    pub fn acquire(overlay: MapOverlay, category: CategoryId) -> Self {
        let token = overlay.register(category.clone());
        Self {
            overlay,
            token,
            category,
            released: false,
        }
    }

    /// Replace this screen's highlighted results after a completed round.
    ///
    /// No-op once released; a late completion must not resurrect the
    /// contribution.
    pub fn highlight(&self, items: Vec<ResultItem>) {
        if self.released {
            return;
        }
        self.overlay.set_highlighted(self.token, items);
    }

    /// Category this guard contributes.
    #[must_use]
    pub fn category(&self) -> &CategoryId {
        &self.category
    }

    /// Retract the contribution and request a map redraw. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.overlay.clear(self.token);
        self.overlay.request_redraw();
        debug!("overlay contribution for '{}' released", self.category);
    }
}

impl Drop for OverlayGuard {
    fn drop(&mut self) {
        self.release();
    }
}
