//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Clock and Redraw Strategy
//!
//! The core runs on a virtual clock. Each loop iteration feeds
//! `Action::Tick(elapsed)` into `update()`, which runs every scheduled
//! animation step that has come due.
//!
//! - **Animating** (slide, ripple, stagger, loading): redraws every
//!   `frame_interval` (~30fps by default).
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Catalog Loading
//!
//! The catalog fetch is the only async work. It is spawned once at startup
//! and reports back over an mpsc channel as `Action::CatalogLoaded`, so
//! navigation keeps working while it is in flight.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::catalog::{self, source_for};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::render::LinkTarget;
use crate::core::state::{App, View};
use crate::tui::component::EventHandler;
use crate::tui::components::{CategoryGridState, GridEvent, PanelEvent, ToolsPanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core navigation logic)
pub struct TuiState {
    pub grid: CategoryGridState,
    pub panel: ToolsPanelState,
    /// Loading spinner frame
    pub spinner_frame: usize,
    /// Last tools render the panel state was reset for
    pub seen_generation: u64,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            grid: CategoryGridState::new(),
            panel: ToolsPanelState::new(),
            spinner_frame: 0,
            seen_generation: 0,
        }
    }

    /// Reset panel focus when a freshly rendered list is shown.
    fn sync(&mut self, app: &App) {
        if app.render_generation != self.seen_generation {
            self.panel.reset();
            self.seen_generation = app.render_generation;
        }
    }
}

/// Undoes terminal setup when dropped, so every exit path from `run`
/// (including an early `?`) leaves the shell usable.
struct TerminalModeGuard<F: FnMut()> {
    teardown: F,
}

impl<F: FnMut()> TerminalModeGuard<F> {
    fn new(teardown: F) -> Self {
        Self { teardown }
    }
}

impl<F: FnMut()> Drop for TerminalModeGuard<F> {
    fn drop(&mut self) {
        (self.teardown)();
    }
}

fn restore_terminal() {
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
}

/// Map a terminal event to a core action, letting the component that owns
/// the event's screen region interpret it first.
pub fn route_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Quit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if app.tools_visible() {
        return match tui.panel.handle_event(event)? {
            PanelEvent::Back => Some(Action::Back),
            PanelEvent::Open(index) => Some(Action::OpenLink(index)),
        };
    }

    match event {
        TuiEvent::ScrollDown => return Some(Action::ScrollDown),
        TuiEvent::ScrollUp => return Some(Action::ScrollUp),
        // Arrow keys scroll between Home and Categories when there is no grid to move in.
        TuiEvent::CursorDown if app.view == View::Home => return Some(Action::ScrollDown),
        TuiEvent::CursorUp if app.view == View::Categories && tui.grid.focused < tui.grid.columns.max(1) => {
            return Some(Action::ScrollUp);
        }
        _ => {}
    }

    // Cards under a panel that is still sliding out are covered.
    if app.view != View::Categories || app.panel_extent() > 0.0 {
        return None;
    }
    match tui.grid.handle_event(event)? {
        GridEvent::Select { index, origin } => {
            let card = app.cards.get(index)?;
            Some(Action::SelectCategory {
                category_id: card.category_id.clone(),
                origin,
            })
        }
    }
}

/// Open a tool link in a separate browser process.
fn open_link(target: &LinkTarget) -> std::io::Result<()> {
    debug!(
        "Opening {} (detached={}, no_referrer={})",
        target.url, target.detached, target.no_referrer
    );
    if target.detached {
        open::that_detached(&target.url)
    } else {
        open::that(&target.url)
    }
}

/// Fetch the catalog once in the background and report the result.
fn spawn_catalog_load(location: String, tx: mpsc::Sender<Action>) {
    info!("Spawning catalog load from {}", location);
    tokio::spawn(async move {
        let source = source_for(&location);
        let result = catalog::load(source.as_ref()).await;
        if tx.send(Action::CatalogLoaded(result)).is_err() {
            warn!("Failed to deliver catalog: receiver dropped");
        }
    });
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::new(config.timings);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_catalog_load(config.catalog_source.clone(), tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new(restore_terminal);
    execute!(stdout(), EnableMouseCapture)?;
    info!("Terminal modes enabled (mouse capture)");

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let now = start_time.elapsed();
        update(&mut app, Action::Tick(now));

        let animating = app.is_animating();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (now.as_millis() / 80) as usize;
            tui.sync(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short timeout while animating, otherwise wake for the next task or an event
        let timeout = if animating {
            config.frame_interval
        } else {
            app.scheduler
                .next_due()
                .map(|due| due.saturating_sub(app.clock).min(IDLE_POLL))
                .unwrap_or(IDLE_POLL)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Events see the clock as of their arrival
            update(&mut app, Action::Tick(start_time.elapsed()));
            let Some(action) = route_event(&event, &app, &mut tui) else {
                continue;
            };
            debug!("Dispatching {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::OpenLink(target) => {
                    if let Err(e) = open_link(&target) {
                        warn!("Failed to open {}: {}", target.url, e);
                        app.status_message = String::from("Could not open link");
                    }
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (catalog load)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            update(&mut app, action);
        }
    }

    info!("Shutting down");
    Ok(())
}
