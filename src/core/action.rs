//! # Actions
//!
//! Everything that can happen in the browser becomes an `Action`.
//! Mouse wheel down? That's `Action::ScrollDown`.
//! Catalog arrives? That's `Action::CatalogLoaded(result)`.
//! Time passes? That's `Action::Tick(now)`.
//!
//! The `update()` function is the single mutation entry point for `App`.
//! It never performs I/O; anything that must leave the process (quitting,
//! opening a browser) comes back as an [`Effect`] for the adapter to run.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```
//!
//! Navigation table:
//!
//! ```text
//! Home        ──ScrollDown──▶ Categories   (lock clear, panel closed)
//! Categories  ──ScrollUp────▶ Home         (lock clear, panel closed)
//! Categories  ──Select(id)──▶ Tools(id)    (after the feedback delay)
//! Tools       ──Back────────▶ Home | Categories (whichever was under it)
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::catalog::{Catalog, LoadError};
use crate::core::render::{LinkTarget, render_categories, render_tools};
use crate::core::scheduler::Task;
use crate::core::state::{
    App, BaseView, CatalogStatus, LOAD_FAILED_MESSAGE, PanelMotion, PanelSlide, Ripple,
    Transition, View,
};

#[derive(Debug)]
pub enum Action {
    /// Scroll intent toward the categories grid.
    ScrollDown,
    /// Scroll intent back toward the landing view.
    ScrollUp,
    /// A category card was clicked at `origin`.
    SelectCategory {
        category_id: String,
        origin: (u16, u16),
    },
    /// Close the tools panel.
    Back,
    /// Follow the link of the tools entry at this index.
    OpenLink(usize),
    /// Advance the virtual clock to `now` and run due tasks.
    Tick(Duration),
    CatalogLoaded(Result<Catalog, LoadError>),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    OpenLink(LinkTarget),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ScrollDown => {
            scroll(app, BaseView::Home, BaseView::Categories);
            Effect::None
        }
        Action::ScrollUp => {
            scroll(app, BaseView::Categories, BaseView::Home);
            Effect::None
        }
        Action::SelectCategory {
            category_id,
            origin,
        } => {
            select_category(app, category_id, origin);
            Effect::None
        }
        Action::Back => {
            back(app);
            Effect::None
        }
        Action::OpenLink(index) => open_link(app, index),
        Action::Tick(now) => {
            tick(app, now);
            Effect::None
        }
        Action::CatalogLoaded(result) => {
            catalog_loaded(app, result);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Home↔Categories. Only the `from → to` pair is honored; the opposite
/// direction (or any intent while suppressed) is dropped.
fn scroll(app: &mut App, from: BaseView, to: BaseView) {
    if app.tools_visible() {
        debug!("Scroll ignored: tools panel is open");
        return;
    }
    if app.transition_lock {
        debug!("Scroll ignored: transition in flight");
        return;
    }
    if app.base_view() != from {
        return;
    }

    info!("Transition {:?} -> {:?}", from, to);
    app.view = to.into();
    app.transition_lock = true;
    app.transition = Some(Transition {
        from,
        to,
        started_at: app.clock,
    });
    app.scheduler
        .schedule_at(app.clock + app.timings.lock, Task::ReleaseLock);
}

fn select_category(app: &mut App, category_id: String, origin: (u16, u16)) {
    if app.view != View::Categories {
        debug!("Select '{}' ignored in {:?}", category_id, app.view);
        return;
    }

    debug!("Selected category '{}' at {:?}", category_id, origin);
    let due = app.clock + app.timings.feedback;
    app.ripple = Some(Ripple {
        category_id: category_id.clone(),
        origin,
        started_at: app.clock,
    });
    // Ripple clears first so the panel never slides in over live feedback.
    app.scheduler.schedule_at(
        due,
        Task::ClearRipple {
            started_at: app.clock,
        },
    );
    app.scheduler.schedule_at(due, Task::ShowTools { category_id });
}

fn back(app: &mut App) {
    let View::Tools { return_to, .. } = app.view else {
        return;
    };
    debug!("Closing tools panel, returning to {:?}", return_to);
    app.view = return_to.into();
    app.panel = Some(PanelSlide {
        motion: PanelMotion::Out,
        started_at: app.clock,
    });
}

fn open_link(app: &App, index: usize) -> Effect {
    if !app.tools_visible() {
        return Effect::None;
    }
    match app.tools.as_ref().and_then(|list| list.entries.get(index)) {
        Some(entry) if entry.is_visible() => {
            info!("Opening link for '{}': {}", entry.name, entry.link.url);
            Effect::OpenLink(entry.link.clone())
        }
        _ => Effect::None,
    }
}

fn tick(app: &mut App, now: Duration) {
    // The clock never runs backwards.
    if now > app.clock {
        app.clock = now;
    }

    while let Some((due, task)) = app.scheduler.pop_due(app.clock) {
        run_task(app, due, task);
    }

    if let Some(t) = app.transition
        && app.clock.saturating_sub(t.started_at) >= app.timings.transition
    {
        app.transition = None;
    }
    if let Some(PanelSlide {
        motion: PanelMotion::Out,
        started_at,
    }) = app.panel
        && app.clock.saturating_sub(started_at) >= app.timings.panel_slide
    {
        app.panel = None;
    }
}

/// Runs one scheduled task. Follow-up delays are measured from `due`, not
/// from the clock, so one large tick equals many small ones.
fn run_task(app: &mut App, due: Duration, task: Task) {
    match task {
        Task::ReleaseLock => {
            app.transition_lock = false;
        }
        Task::ClearRipple { started_at } => {
            // A newer selection owns the ripple now; its own task clears it.
            if app.ripple.as_ref().is_some_and(|r| r.started_at == started_at) {
                app.ripple = None;
            }
        }
        Task::ShowTools { category_id } => show_tools(app, due, &category_id),
        Task::RevealTool { generation, index } => {
            if generation != app.render_generation {
                return;
            }
            if let Some(entry) = app
                .tools
                .as_mut()
                .and_then(|list| list.entries.get_mut(index))
            {
                entry.revealed_at = Some(due);
            }
        }
    }
}

fn show_tools(app: &mut App, due: Duration, category_id: &str) {
    let stagger = app.timings.stagger();
    let Some(list) = app
        .catalog()
        .and_then(|catalog| render_tools(catalog, category_id, stagger))
    else {
        debug!("No category '{}' to show, ignoring", category_id);
        return;
    };

    app.render_generation += 1;
    let generation = app.render_generation;
    for (index, entry) in list.entries.iter().enumerate() {
        app.scheduler
            .schedule_at(due + entry.reveal_delay, Task::RevealTool { generation, index });
    }

    info!(
        "Showing {} tools for '{}' (render #{})",
        list.entries.len(),
        category_id,
        generation
    );
    app.tools = Some(list);
    app.view = View::Tools {
        category_id: category_id.to_string(),
        return_to: app.base_view(),
    };
    app.panel = Some(PanelSlide {
        motion: PanelMotion::In,
        started_at: due,
    });
}

fn catalog_loaded(app: &mut App, result: Result<Catalog, LoadError>) {
    match result {
        Ok(catalog) => {
            app.cards = render_categories(&catalog);
            app.status_message = format!("{} categories", app.cards.len());
            app.catalog = CatalogStatus::Ready(catalog);
        }
        Err(e) => {
            warn!("Catalog unavailable: {}", e);
            app.cards.clear();
            app.status_message = String::from("Catalog unavailable");
            app.catalog = CatalogStatus::Failed(LOAD_FAILED_MESSAGE.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{loaded_app, sample_catalog, single_category_catalog, test_app};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn select(app: &mut App, id: &str) {
        update(
            app,
            Action::SelectCategory {
                category_id: id.to_string(),
                origin: (10, 5),
            },
        );
    }

    fn active_view_count(app: &App) -> usize {
        [
            app.view == View::Home,
            app.view == View::Categories,
            app.tools_visible(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Home → Categories with the lock already released.
    fn in_categories(app: &mut App) {
        update(app, Action::ScrollDown);
        let lock = app.timings.lock;
        update(app, Action::Tick(app.clock + lock));
        assert_eq!(app.view, View::Categories);
        assert!(!app.transition_lock);
    }

    #[test]
    fn test_scroll_down_enters_categories_and_locks() {
        let mut app = test_app();
        update(&mut app, Action::ScrollDown);
        assert_eq!(app.view, View::Categories);
        assert!(app.transition_lock);
        assert!(app.transition.is_some());
    }

    #[test]
    fn test_second_scroll_within_lock_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::ScrollDown);
        update(&mut app, Action::Tick(ms(100)));
        update(&mut app, Action::ScrollUp);
        update(&mut app, Action::ScrollDown);
        assert_eq!(app.view, View::Categories);
        assert_eq!(app.transition.unwrap().started_at, Duration::ZERO);

        // Nothing was queued: releasing the lock doesn't replay the dropped intents.
        update(&mut app, Action::Tick(ms(800)));
        assert!(!app.transition_lock);
        assert_eq!(app.view, View::Categories);
    }

    #[test]
    fn test_two_scroll_downs_start_one_transition() {
        let mut app = test_app();
        update(&mut app, Action::ScrollDown);
        update(&mut app, Action::ScrollDown);
        let release_tasks = app
            .scheduler
            .tasks()
            .filter(|(_, task)| **task == Task::ReleaseLock)
            .count();
        assert_eq!(release_tasks, 1);
    }

    #[test]
    fn test_lock_held_for_full_duration() {
        let mut app = test_app();
        update(&mut app, Action::ScrollDown);
        update(&mut app, Action::Tick(ms(799)));
        assert!(app.transition_lock);
        update(&mut app, Action::ScrollUp);
        assert_eq!(app.view, View::Categories);

        update(&mut app, Action::Tick(ms(800)));
        assert!(!app.transition_lock);
        assert!(app.transition.is_none());
        update(&mut app, Action::ScrollUp);
        assert_eq!(app.view, View::Home);
    }

    #[test]
    fn test_wrong_direction_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::ScrollUp);
        assert_eq!(app.view, View::Home);
        assert!(!app.transition_lock);
        assert!(app.scheduler.is_idle());
    }

    #[test]
    fn test_select_then_show_after_feedback_delay() {
        let mut app = loaded_app(single_category_catalog());
        in_categories(&mut app);
        let selected_at = app.clock;

        select(&mut app, "a");
        assert!(app.ripple.is_some());
        assert_eq!(app.view, View::Categories);

        update(&mut app, Action::Tick(selected_at + ms(299)));
        assert!(app.tools.is_none());
        assert_eq!(app.view, View::Categories);

        update(&mut app, Action::Tick(selected_at + ms(300)));
        assert!(app.ripple.is_none());
        assert_eq!(
            app.view,
            View::Tools {
                category_id: "a".into(),
                return_to: BaseView::Categories
            }
        );
        let list = app.tools.as_ref().unwrap();
        assert_eq!(list.title, "A");
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].name, "T1");
        assert_eq!(list.entries[0].link.url, "https://x");
    }

    #[test]
    fn test_entries_revealed_in_order() {
        let mut app = loaded_app(sample_catalog());
        in_categories(&mut app);
        let start = app.clock;
        select(&mut app, "writing");
        let shown_at = start + ms(300);
        update(&mut app, Action::Tick(shown_at));
        let count = app.tools.as_ref().unwrap().entries.len();
        assert!(count >= 2);
        assert!(app.tools.as_ref().unwrap().entries.iter().all(|e| !e.is_visible()));

        // First entry at +50ms, second at +150ms.
        update(&mut app, Action::Tick(shown_at + ms(50)));
        let entries = &app.tools.as_ref().unwrap().entries;
        assert!(entries[0].is_visible());
        assert!(!entries[1].is_visible());

        update(&mut app, Action::Tick(shown_at + ms(150)));
        assert!(app.tools.as_ref().unwrap().entries[1].is_visible());

        update(&mut app, Action::Tick(shown_at + ms(10_000)));
        let reveal_times: Vec<Duration> = app
            .tools
            .as_ref()
            .unwrap()
            .entries
            .iter()
            .map(|e| e.revealed_at.unwrap())
            .collect();
        assert!(reveal_times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_one_large_tick_matches_small_ticks() {
        let mut app = loaded_app(sample_catalog());
        in_categories(&mut app);
        let start = app.clock;
        select(&mut app, "writing");
        update(&mut app, Action::Tick(start + ms(5_000)));
        let first = app.tools.as_ref().unwrap().entries[0].revealed_at;
        assert_eq!(first, Some(start + ms(300) + ms(50)));
    }

    #[test]
    fn test_no_scroll_transition_while_tools_visible() {
        let mut app = loaded_app(single_category_catalog());
        in_categories(&mut app);
        select(&mut app, "a");
        let t = app.clock + ms(300);
        update(&mut app, Action::Tick(t));
        assert!(app.tools_visible());

        update(&mut app, Action::ScrollUp);
        update(&mut app, Action::ScrollDown);
        assert!(app.tools_visible());
        assert_eq!(app.base_view(), BaseView::Categories);
        assert!(!app.transition_lock);
        assert_eq!(active_view_count(&app), 1);
    }

    #[test]
    fn test_back_returns_to_previous_view() {
        let mut app = loaded_app(single_category_catalog());
        in_categories(&mut app);
        select(&mut app, "a");
        let t = app.clock + ms(300);
        update(&mut app, Action::Tick(t));

        update(&mut app, Action::Back);
        assert_eq!(app.view, View::Categories);
        assert_eq!(app.panel.unwrap().motion, PanelMotion::Out);

        let t = app.clock + ms(600);
        update(&mut app, Action::Tick(t));
        assert!(app.panel.is_none());
        assert_eq!(app.panel_extent(), 0.0);

        // Scrolling works again once the panel is closed.
        update(&mut app, Action::ScrollUp);
        assert_eq!(app.view, View::Home);
    }

    #[test]
    fn test_back_outside_tools_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::Back);
        assert_eq!(app.view, View::Home);
        assert!(app.panel.is_none());
    }

    #[test]
    fn test_scroll_between_select_and_show_returns_to_new_base() {
        let mut app = loaded_app(single_category_catalog());
        in_categories(&mut app);
        select(&mut app, "a");
        update(&mut app, Action::ScrollUp);
        assert_eq!(app.view, View::Home);

        let t = app.clock + ms(300);
        update(&mut app, Action::Tick(t));
        assert_eq!(
            app.view,
            View::Tools {
                category_id: "a".into(),
                return_to: BaseView::Home
            }
        );
        update(&mut app, Action::Back);
        assert_eq!(app.view, View::Home);
    }

    #[test]
    fn test_select_outside_categories_is_ignored() {
        let mut app = loaded_app(single_category_catalog());
        select(&mut app, "a");
        assert!(app.ripple.is_none());
        assert!(app.scheduler.is_idle());
    }

    #[test]
    fn test_unknown_category_is_silent_noop() {
        let mut app = loaded_app(single_category_catalog());
        in_categories(&mut app);
        select(&mut app, "missing");
        let t = app.clock + ms(1_000);
        update(&mut app, Action::Tick(t));
        assert_eq!(app.view, View::Categories);
        assert!(app.tools.is_none());
        assert_eq!(app.render_generation, 0);
    }

    #[test]
    fn test_rerender_replaces_entries_and_ignores_stale_reveals() {
        let mut app = loaded_app(sample_catalog());
        in_categories(&mut app);
        let start = app.clock;

        // Two clicks before the first panel opens: two renders, 40ms apart.
        select(&mut app, "writing");
        update(&mut app, Action::Tick(start + ms(40)));
        select(&mut app, "writing");

        update(&mut app, Action::Tick(start + ms(300)));
        let first_len = app.tools.as_ref().unwrap().entries.len();
        assert_eq!(app.render_generation, 1);

        update(&mut app, Action::Tick(start + ms(340)));
        assert_eq!(app.render_generation, 2);
        assert_eq!(app.tools.as_ref().unwrap().entries.len(), first_len);

        // The first render's reveal for entry 0 comes due now; it must not
        // touch the replacement list.
        update(&mut app, Action::Tick(start + ms(350)));
        assert!(
            app.tools
                .as_ref()
                .unwrap()
                .entries
                .iter()
                .all(|e| !e.is_visible())
        );

        update(&mut app, Action::Tick(start + ms(390)));
        assert_eq!(
            app.tools.as_ref().unwrap().entries[0].revealed_at,
            Some(start + ms(390))
        );
        assert_eq!(
            app.view,
            View::Tools {
                category_id: "writing".into(),
                return_to: BaseView::Categories
            }
        );
    }

    #[test]
    fn test_second_click_keeps_its_ripple_for_full_feedback() {
        let mut app = loaded_app(sample_catalog());
        in_categories(&mut app);
        let start = app.clock;

        select(&mut app, "writing");
        update(&mut app, Action::Tick(start + ms(40)));
        select(&mut app, "coding");

        // The first click's clear comes due; the second ripple keeps playing.
        update(&mut app, Action::Tick(start + ms(300)));
        let ripple = app.ripple.as_ref().unwrap();
        assert_eq!(ripple.category_id, "coding");
        assert_eq!(app.ripple_progress().map(|p| p < 1.0), Some(true));

        update(&mut app, Action::Tick(start + ms(340)));
        assert!(app.ripple.is_none());
    }

    #[test]
    fn test_switching_categories_replaces_list() {
        let mut app = loaded_app(sample_catalog());
        in_categories(&mut app);
        select(&mut app, "writing");
        let t = app.clock + ms(300);
        update(&mut app, Action::Tick(t));
        update(&mut app, Action::Back);
        select(&mut app, "coding");
        let t = app.clock + ms(300);
        update(&mut app, Action::Tick(t));
        let list = app.tools.as_ref().unwrap();
        assert_eq!(list.category_id, "coding");
        let expected = sample_catalog().category("coding").unwrap().tools.len();
        assert_eq!(list.entries.len(), expected);
    }

    #[test]
    fn test_failed_load_shows_message_and_scroll_still_works() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CatalogLoaded(Err(LoadError::Network("connection refused".into()))),
        );
        assert!(app.cards.is_empty());
        assert!(matches!(&app.catalog, CatalogStatus::Failed(msg) if msg == LOAD_FAILED_MESSAGE));

        update(&mut app, Action::ScrollDown);
        assert_eq!(app.view, View::Categories);

        select(&mut app, "a");
        update(&mut app, Action::Tick(ms(5_000)));
        assert!(!app.tools_visible());
        assert!(app.tools.is_none());
    }

    #[test]
    fn test_loaded_catalog_renders_cards() {
        let mut app = test_app();
        update(&mut app, Action::CatalogLoaded(Ok(single_category_catalog())));
        assert_eq!(app.cards.len(), 1);
        assert_eq!(app.cards[0].title, "A");
        assert_eq!(app.cards[0].category_id, "a");
        // Rendered but not shown.
        assert_eq!(app.view, View::Home);
    }

    #[test]
    fn test_open_link_only_for_revealed_entries() {
        let mut app = loaded_app(single_category_catalog());
        in_categories(&mut app);
        select(&mut app, "a");
        let shown_at = app.clock + ms(300);
        update(&mut app, Action::Tick(shown_at));
        assert_eq!(update(&mut app, Action::OpenLink(0)), Effect::None);

        update(&mut app, Action::Tick(shown_at + ms(50)));
        match update(&mut app, Action::OpenLink(0)) {
            Effect::OpenLink(target) => assert_eq!(target.url, "https://x"),
            other => panic!("expected OpenLink, got {:?}", other),
        }
        assert_eq!(update(&mut app, Action::OpenLink(7)), Effect::None);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut app = test_app();
        update(&mut app, Action::Tick(ms(500)));
        update(&mut app, Action::Tick(ms(100)));
        assert_eq!(app.clock, ms(500));
    }

    #[test]
    fn test_exactly_one_view_through_a_session() {
        let mut app = loaded_app(sample_catalog());
        let script = [
            Action::ScrollDown,
            Action::ScrollDown,
            Action::Tick(ms(900)),
            Action::SelectCategory {
                category_id: "coding".into(),
                origin: (0, 0),
            },
            Action::ScrollUp,
            Action::Tick(ms(1_300)),
            Action::ScrollUp,
            Action::Back,
            Action::Tick(ms(2_000)),
            Action::ScrollUp,
            Action::Back,
        ];
        for action in script {
            update(&mut app, action);
            assert_eq!(active_view_count(&app), 1);
        }
    }
}
