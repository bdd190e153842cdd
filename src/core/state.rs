//! # Application State
//!
//! Core navigation state for the browser. Domain logic only, no terminal
//! types. Presentation state (hover, card focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── view: View                    // Home | Categories | Tools{..}
//! ├── transition_lock: bool         // scroll transitions blocked
//! ├── transition: Option<Transition>// Home↔Categories slide in flight
//! ├── catalog: CatalogStatus        // Loading | Ready | Failed
//! ├── cards: Vec<CategoryCard>      // rendered categories grid
//! ├── tools: Option<ToolsList>      // rendered tools panel content
//! ├── render_generation: u64        // bumps on every tools render
//! ├── ripple: Option<Ripple>        // selection feedback
//! ├── panel: Option<PanelSlide>     // tools panel slide in/out
//! ├── scheduler: Scheduler          // pending timed tasks
//! ├── clock: Duration               // virtual time since start
//! └── timings: Timings              // fixed animation durations
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::Duration;

use crate::catalog::Catalog;
use crate::core::config::Timings;
use crate::core::render::{CategoryCard, ToolsList};
use crate::core::scheduler::Scheduler;

/// Shown in place of the categories grid when the catalog can't be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load tool categories.";

/// The two full-screen views the tools panel can sit on top of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseView {
    Home,
    Categories,
}

/// The active view. Exactly one at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Categories,
    Tools {
        category_id: String,
        /// Where `Back` returns to.
        return_to: BaseView,
    },
}

impl From<BaseView> for View {
    fn from(base: BaseView) -> Self {
        match base {
            BaseView::Home => View::Home,
            BaseView::Categories => View::Categories,
        }
    }
}

#[derive(Debug)]
pub enum CatalogStatus {
    Loading,
    Ready(Catalog),
    Failed(String),
}

/// A Home↔Categories slide in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: BaseView,
    pub to: BaseView,
    pub started_at: Duration,
}

/// Expanding selection feedback on a card, centered on the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ripple {
    pub category_id: String,
    /// Screen cell the click landed on.
    pub origin: (u16, u16),
    pub started_at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMotion {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSlide {
    pub motion: PanelMotion,
    pub started_at: Duration,
}

pub struct App {
    pub timings: Timings,
    pub clock: Duration,
    pub view: View,
    pub transition_lock: bool,
    pub transition: Option<Transition>,
    pub catalog: CatalogStatus,
    pub cards: Vec<CategoryCard>,
    pub tools: Option<ToolsList>,
    pub render_generation: u64,
    pub ripple: Option<Ripple>,
    pub panel: Option<PanelSlide>,
    pub scheduler: Scheduler,
    pub status_message: String,
}

impl App {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            clock: Duration::ZERO,
            view: View::Home,
            transition_lock: false,
            transition: None,
            catalog: CatalogStatus::Loading,
            cards: Vec::new(),
            tools: None,
            render_generation: 0,
            ripple: None,
            panel: None,
            scheduler: Scheduler::new(),
            status_message: String::new(),
        }
    }

    /// The full-screen view under the tools panel (or the active view if
    /// the panel is closed).
    pub fn base_view(&self) -> BaseView {
        match &self.view {
            View::Home => BaseView::Home,
            View::Categories => BaseView::Categories,
            View::Tools { return_to, .. } => *return_to,
        }
    }

    pub fn tools_visible(&self) -> bool {
        matches!(self.view, View::Tools { .. })
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.catalog {
            CatalogStatus::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Fraction of `duration` elapsed since `start`, clamped to `0.0..=1.0`.
    fn progress(&self, start: Duration, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = self.clock.saturating_sub(start);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }

    /// How far the current Home↔Categories slide has run. `None` when idle.
    pub fn transition_progress(&self) -> Option<f32> {
        self.transition
            .map(|t| self.progress(t.started_at, self.timings.transition))
    }

    pub fn ripple_progress(&self) -> Option<f32> {
        self.ripple
            .as_ref()
            .map(|r| self.progress(r.started_at, self.timings.feedback))
    }

    /// How much of the tools panel is on screen: 0.0 fully hidden, 1.0 fully shown.
    pub fn panel_extent(&self) -> f32 {
        match self.panel {
            Some(PanelSlide {
                motion: PanelMotion::In,
                started_at,
            }) => self.progress(started_at, self.timings.panel_slide),
            Some(PanelSlide {
                motion: PanelMotion::Out,
                started_at,
            }) => 1.0 - self.progress(started_at, self.timings.panel_slide),
            None => 0.0,
        }
    }

    /// Opacity-like progress of a revealed entry's entrance, `None` while hidden.
    pub fn entry_progress(&self, index: usize) -> Option<f32> {
        let entry = self.tools.as_ref()?.entries.get(index)?;
        entry
            .revealed_at
            .map(|at| self.progress(at, self.timings.entry_fade))
    }

    /// True while anything on screen is still moving or a task is pending.
    pub fn is_animating(&self) -> bool {
        let fading = self.tools.as_ref().is_some_and(|list| {
            (0..list.entries.len()).any(|i| self.entry_progress(i).is_some_and(|p| p < 1.0))
        });
        self.transition.is_some()
            || self.ripple.is_some()
            || self.panel.is_some_and(|p| {
                self.clock.saturating_sub(p.started_at) < self.timings.panel_slide
            })
            || fading
            || !self.scheduler.is_idle()
            || matches!(self.catalog, CatalogStatus::Loading)
    }
}
