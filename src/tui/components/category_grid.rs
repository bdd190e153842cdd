//! # Category Grid Component
//!
//! The Categories view: a responsive grid of cards, one per category.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CategoryGridState` lives in `TuiState` (focus, hover, scroll, hit rects)
//! - `CategoryGrid` is created each frame with borrowed state and props
//!
//! Card geometry is recorded during render so mouse clicks can be mapped
//! back to a category id without recomputing the layout.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::render::CategoryCard;
use crate::core::state::Ripple;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Card height including borders: title + two description lines.
pub const CARD_HEIGHT: u16 = 5;
const ROW_GAP: u16 = 1;
const COLUMN_GAP: u16 = 1;
const HEADER_HEIGHT: u16 = 2;

/// Persistent state for the categories grid.
#[derive(Debug, Default)]
pub struct CategoryGridState {
    /// Keyboard focus.
    pub focused: usize,
    /// Card under the mouse pointer.
    pub hovered: Option<usize>,
    /// First visible grid row.
    pub first_row: usize,
    /// Column count from the last render.
    pub columns: usize,
    /// Visible cards from the last render: (card index, screen rect).
    pub card_rects: Vec<(usize, Rect)>,
    /// Number of cards at the last render.
    pub card_count: usize,
}

/// Events emitted by the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// Card `index` was chosen; `origin` is where the selection feedback starts.
    Select { index: usize, origin: (u16, u16) },
}

impl CategoryGridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card index at a screen position, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        self.card_rects
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(index, _)| *index)
    }

    fn center_of(&self, index: usize) -> (u16, u16) {
        self.card_rects
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, r)| (r.x + r.width / 2, r.y + r.height / 2))
            .unwrap_or((0, 0))
    }

    fn move_focus(&mut self, delta: isize) {
        if self.card_count == 0 {
            return;
        }
        let last = self.card_count as isize - 1;
        self.focused = (self.focused as isize + delta).clamp(0, last) as usize;
    }
}

impl EventHandler for CategoryGridState {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<GridEvent> {
        let columns = self.columns.max(1) as isize;
        match event {
            TuiEvent::CursorLeft => self.move_focus(-1),
            TuiEvent::CursorRight => self.move_focus(1),
            TuiEvent::CursorUp => self.move_focus(-columns),
            TuiEvent::CursorDown => self.move_focus(columns),
            TuiEvent::MouseMove(column, row) => {
                self.hovered = self.hit_test(*column, *row);
            }
            TuiEvent::MouseClick(column, row) => {
                let index = self.hit_test(*column, *row)?;
                self.focused = index;
                return Some(GridEvent::Select {
                    index,
                    origin: (*column, *row),
                });
            }
            TuiEvent::Submit if self.focused < self.card_count => {
                return Some(GridEvent::Select {
                    index: self.focused,
                    origin: self.center_of(self.focused),
                });
            }
            _ => {}
        }
        None
    }
}

/// What the grid area shows.
pub enum GridContent<'a> {
    Loading,
    Failed(&'a str),
    Cards(&'a [CategoryCard]),
}

/// Transient render wrapper for the categories grid.
pub struct CategoryGrid<'a> {
    state: &'a mut CategoryGridState,
    content: GridContent<'a>,
    /// Active selection feedback and its progress.
    ripple: Option<(&'a Ripple, f32)>,
}

impl<'a> CategoryGrid<'a> {
    pub fn new(
        state: &'a mut CategoryGridState,
        content: GridContent<'a>,
        ripple: Option<(&'a Ripple, f32)>,
    ) -> Self {
        Self {
            state,
            content,
            ripple,
        }
    }
}

/// Number of card columns for a given width (1 / 2 / 3 like a responsive grid).
pub fn columns_for(width: u16) -> usize {
    match width {
        0..60 => 1,
        60..100 => 2,
        _ => 3,
    }
}

/// Positions of the cards visible in `area`, starting at grid row `first_row`.
pub fn layout_cards(area: Rect, count: usize, columns: usize, first_row: usize) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let gaps = COLUMN_GAP * (columns as u16 - 1);
    let card_width = area.width.saturating_sub(gaps) / columns as u16;
    let mut rects = Vec::new();

    for index in (first_row * columns)..count {
        let row = (index / columns - first_row) as u16;
        let col = (index % columns) as u16;
        let y = area.y + row * (CARD_HEIGHT + ROW_GAP);
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        let x = area.x + col * (card_width + COLUMN_GAP);
        rects.push((index, Rect::new(x, y, card_width, CARD_HEIGHT)));
    }
    rects
}

/// Number of full card rows that fit in `height`.
pub fn visible_rows(height: u16) -> usize {
    (((height + ROW_GAP) / (CARD_HEIGHT + ROW_GAP)) as usize).max(1)
}

impl Component for CategoryGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(Span::styled(
            "Explore Categories",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(header, Rect { height: area.height.min(1), ..area });

        let grid_area = Rect {
            y: area.y + HEADER_HEIGHT.min(area.height),
            height: area.height.saturating_sub(HEADER_HEIGHT),
            ..area
        };

        let cards = match self.content {
            GridContent::Loading => {
                self.state.card_rects.clear();
                self.state.card_count = 0;
                let loading = Paragraph::new("Loading categories…")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center);
                frame.render_widget(loading, grid_area);
                return;
            }
            GridContent::Failed(message) => {
                self.state.card_rects.clear();
                self.state.card_count = 0;
                let failed = Paragraph::new(message)
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center);
                frame.render_widget(failed, grid_area);
                return;
            }
            GridContent::Cards(cards) => cards,
        };

        self.state.card_count = cards.len();
        self.state.columns = columns_for(grid_area.width);
        if cards.is_empty() {
            self.state.card_rects.clear();
            let empty = Paragraph::new("No categories yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, grid_area);
            return;
        }

        // Keep the focused card on screen.
        self.state.focused = self.state.focused.min(cards.len() - 1);
        let focused_row = self.state.focused / self.state.columns;
        let rows = visible_rows(grid_area.height);
        if focused_row < self.state.first_row {
            self.state.first_row = focused_row;
        } else if focused_row >= self.state.first_row + rows {
            self.state.first_row = focused_row + 1 - rows;
        }

        self.state.card_rects =
            layout_cards(grid_area, cards.len(), self.state.columns, self.state.first_row);

        for &(index, rect) in &self.state.card_rects {
            let card = &cards[index];
            let highlighted = index == self.state.focused
                || (card.hoverable && self.state.hovered == Some(index));
            render_card(frame, rect, card, highlighted);
        }

        if let Some((ripple, progress)) = self.ripple
            && let Some(index) = cards.iter().position(|c| c.category_id == ripple.category_id)
            && let Some(&(_, rect)) = self.state.card_rects.iter().find(|(i, _)| *i == index)
        {
            paint_ripple(frame, rect, ripple.origin, progress);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &CategoryCard, highlighted: bool) {
    let border_style = if highlighted {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let mut lines = vec![Line::from(Span::styled(
        card.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let wrapped = textwrap::wrap(&card.description, inner_width);
    lines.extend(wrapped.into_iter().take(2).map(|l| {
        Line::from(Span::styled(l.into_owned(), Style::default().fg(Color::Gray)))
    }));

    let paragraph = Paragraph::new(lines).block(Block::bordered().border_style(border_style));
    frame.render_widget(paragraph, area);
}

/// Tint every cell of `card` within the ripple radius around `origin`.
/// Rows count double so the circle looks round on terminal cells.
fn paint_ripple(frame: &mut Frame, card: Rect, origin: (u16, u16), progress: f32) {
    let ox = origin.0.clamp(card.x, card.right().saturating_sub(1)) as f32;
    let oy = origin.1.clamp(card.y, card.bottom().saturating_sub(1)) as f32;
    let radius = progress * card.width.max(card.height * 2) as f32;

    let buf = frame.buffer_mut();
    for y in card.top()..card.bottom() {
        for x in card.left()..card.right() {
            let dx = x as f32 - ox;
            let dy = (y as f32 - oy) * 2.0;
            if (dx * dx + dy * dy).sqrt() <= radius {
                buf[(x, y)].set_bg(Color::Indexed(24));
            }
        }
    }
}
