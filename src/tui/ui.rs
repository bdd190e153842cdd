use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::{App, BaseView, CatalogStatus, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CategoryGrid, GridContent, LandingPage, StatusBar, ToolsPanel,
};

/// Position of the Home/Categories strip: 0.0 shows Home, 1.0 shows Categories.
pub fn slide_position(app: &App) -> f32 {
    let position = |view: BaseView| match view {
        BaseView::Home => 0.0,
        BaseView::Categories => 1.0,
    };

    match (app.transition, app.transition_progress()) {
        (Some(t), Some(progress)) => {
            let from = position(t.from);
            let to = position(t.to);
            from + (to - from) * ease_in_out(progress)
        }
        _ => position(app.base_view()),
    }
}

/// Cubic ease-in-out over `0.0..=1.0`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn view_label(app: &App) -> String {
    match &app.view {
        View::Home => "Home".to_string(),
        View::Categories => "Categories".to_string(),
        View::Tools { category_id, .. } => {
            let title = app
                .tools
                .as_ref()
                .map(|list| list.title.as_str())
                .unwrap_or(category_id.as_str());
            format!("Tools: {title}")
        }
    }
}

fn hints(app: &App) -> &'static str {
    match app.view {
        View::Home => "scroll ↓ categories  q quit",
        View::Categories => "↑ home  click/enter open  q quit",
        View::Tools { .. } => "esc back  1-9 open link  q quit",
    }
}

fn grid_content(app: &App) -> GridContent<'_> {
    match &app.catalog {
        CatalogStatus::Loading => GridContent::Loading,
        CatalogStatus::Failed(message) => GridContent::Failed(message),
        CatalogStatus::Ready(_) => GridContent::Cards(&app.cards),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [status_area, main_area] = layout.areas(frame.area());

    let loading_frame =
        matches!(app.catalog, CatalogStatus::Loading).then_some(tui.spinner_frame);
    StatusBar::new(
        view_label(app),
        app.status_message.clone(),
        loading_frame,
        hints(app),
    )
    .render(frame, status_area);

    // Home and Categories are stacked vertically; the slide moves the
    // window from one to the other.
    let height = main_area.height;
    let offset = (slide_position(app) * height as f32).round() as u16;

    if offset < height {
        let home_area = Rect {
            height: height - offset,
            ..main_area
        };
        LandingPage::new(height, offset).render(frame, home_area);
    }

    if offset > 0 {
        let categories_area = Rect {
            y: main_area.y + height - offset,
            height: offset,
            ..main_area
        };
        let ripple = app.ripple.as_ref().zip(app.ripple_progress());
        CategoryGrid::new(&mut tui.grid, grid_content(app), ripple).render(frame, categories_area);
    } else {
        // Nothing to click while the grid is off screen.
        tui.grid.card_rects.clear();
    }

    draw_tools_panel(frame, main_area, app, tui);
}

fn draw_tools_panel(frame: &mut Frame, main_area: Rect, app: &App, tui: &mut TuiState) {
    let extent = app.panel_extent();
    let Some(list) = app.tools.as_ref().filter(|_| extent > 0.0) else {
        tui.panel.link_rects.clear();
        tui.panel.back_rect = Rect::default();
        return;
    };

    let width = ((extent * main_area.width as f32).round() as u16).min(main_area.width);
    if width == 0 {
        return;
    }
    let panel_area = Rect {
        x: main_area.right() - width,
        width,
        ..main_area
    };
    let progress = (0..list.entries.len())
        .map(|index| app.entry_progress(index))
        .collect();
    ToolsPanel::new(&mut tui.panel, list, progress).render(frame, panel_area);
}
