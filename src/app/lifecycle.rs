//! Load progress and render loop gating.

/// Asset loading and first-render bookkeeping.
///
/// `ready` only flips when the host supplies the first full pose, never
/// because loading finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadState {
    pub assets_total: usize,
    pub assets_loaded: usize,
    pub assets_failed: usize,
    pub ready: bool,
    pub first_render_done: bool,
    /// `Ready` has been sent to the host.
    pub tree_ready_sent: bool,
}

impl LoadState {
    #[must_use]
    pub fn new(assets_total: usize) -> Self {
        Self {
            assets_total,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn settled(&self) -> usize {
        self.assets_loaded + self.assets_failed
    }

    #[must_use]
    pub fn all_settled(&self) -> bool {
        self.settled() >= self.assets_total
    }

    /// Settled share in percent. Failed loads count as settled.
    #[must_use]
    pub fn progress_percent(&self) -> f32 {
        if self.assets_total == 0 {
            100.0
        } else {
            self.settled() as f32 / self.assets_total as f32 * 100.0
        }
    }

    /// Latches `ready`. Returns `true` on the transition.
    pub fn mark_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.ready, true)
    }

    /// Latches `first_render_done`. Returns `true` exactly once, on the
    /// first presented frame after `ready`.
    pub fn mark_rendered(&mut self) -> bool {
        self.ready && !std::mem::replace(&mut self.first_render_done, true)
    }
}

/// Whether the host should keep scheduling animation frames.
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    interaction_active: bool,
}

impl RenderLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn interaction_active(&self) -> bool {
        self.interaction_active
    }

    pub fn set_interaction(&mut self, active: bool) {
        self.interaction_active = active;
    }

    /// Continuous rendering while the user interacts, while assets are
    /// still arriving, and until the first frame has been shown.
    #[must_use]
    pub fn wants_next_frame(&self, load: &LoadState) -> bool {
        self.interaction_active || !load.all_settled() || !load.first_render_done
    }
}
