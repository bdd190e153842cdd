//! # Tools Panel Component
//!
//! Overlay listing one category's tools. Slides in from the right edge;
//! entries fade in one after another as the scheduler reveals them.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ToolsPanelState` lives in `TuiState` (focus, hover, hit rects)
//! - `ToolsPanel` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::core::render::ToolsList;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows per entry: name, description, link, spacer.
pub const ENTRY_HEIGHT: u16 = 4;
/// Rows an entry drops while fading in.
const ENTRY_RISE: f32 = 2.0;
const BACK_LABEL: &str = "← Back";

/// Persistent state for the tools panel.
#[derive(Debug, Default)]
pub struct ToolsPanelState {
    pub focused: usize,
    pub hovered_link: Option<usize>,
    pub entry_count: usize,
    /// First entry shown; moves to keep `focused` on screen.
    pub first_entry: usize,
    /// Back control position from the last render.
    pub back_rect: Rect,
    /// Link positions from the last render: (entry index, screen rect).
    pub link_rects: Vec<(usize, Rect)>,
}

/// Events emitted by the tools panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Back,
    Open(usize),
}

impl ToolsPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget focus and geometry; called whenever a new list is shown.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn link_at(&self, column: u16, row: u16) -> Option<usize> {
        self.link_rects
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(index, _)| *index)
    }
}

impl EventHandler for ToolsPanelState {
    type Event = PanelEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PanelEvent> {
        match event {
            TuiEvent::Back => Some(PanelEvent::Back),
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.focused = self.focused.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                if self.entry_count > 0 {
                    self.focused = (self.focused + 1).min(self.entry_count - 1);
                }
                None
            }
            TuiEvent::Submit if self.entry_count > 0 => Some(PanelEvent::Open(self.focused)),
            TuiEvent::OpenNth(index) => Some(PanelEvent::Open(*index)),
            TuiEvent::MouseMove(column, row) => {
                self.hovered_link = self.link_at(*column, *row);
                None
            }
            TuiEvent::MouseClick(column, row) => {
                if self.back_rect.contains(Position::new(*column, *row)) {
                    return Some(PanelEvent::Back);
                }
                let index = self.link_at(*column, *row)?;
                self.focused = index;
                Some(PanelEvent::Open(index))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the tools panel.
pub struct ToolsPanel<'a> {
    state: &'a mut ToolsPanelState,
    list: &'a ToolsList,
    /// Entrance progress per entry; `None` while hidden.
    progress: Vec<Option<f32>>,
}

impl<'a> ToolsPanel<'a> {
    pub fn new(state: &'a mut ToolsPanelState, list: &'a ToolsList, progress: Vec<Option<f32>>) -> Self {
        Self {
            state,
            list,
            progress,
        }
    }
}

impl Component for ToolsPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        self.state.entry_count = self.list.entries.len();
        self.state.link_rects.clear();
        self.state.back_rect = Rect::default();

        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(2));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Header: back control and title
        let back_width = (BACK_LABEL.chars().count() as u16).min(inner.width);
        self.state.back_rect = Rect::new(inner.x, inner.y, back_width, 1);
        frame.render_widget(
            Span::styled(BACK_LABEL, Style::default().fg(Color::Yellow)),
            self.state.back_rect,
        );
        if inner.height > 2 {
            let title = Line::from(Span::styled(
                self.list.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(title, Rect::new(inner.x, inner.y + 2, inner.width, 1));
        }

        let list_top = inner.y + 4;
        let list_bottom = inner.bottom();
        let text_width = inner.width as usize;

        let slots = visible_entries(list_bottom.saturating_sub(list_top));
        let count = self.list.entries.len();
        self.state.focused = self.state.focused.min(count.saturating_sub(1));
        if self.state.focused < self.state.first_entry {
            self.state.first_entry = self.state.focused;
        } else if self.state.focused >= self.state.first_entry + slots {
            self.state.first_entry = self.state.focused + 1 - slots;
        }
        self.state.first_entry = self.state.first_entry.min(count.saturating_sub(slots));
        let first = self.state.first_entry;

        for (index, entry) in self.list.entries.iter().enumerate().skip(first).take(slots) {
            let Some(progress) = self.progress.get(index).copied().flatten() else {
                continue;
            };

            let rise = ((1.0 - progress) * ENTRY_RISE).round() as u16;
            let y = list_top + (index - first) as u16 * ENTRY_HEIGHT + rise;
            if y + 3 > list_bottom {
                continue;
            }

            let settling = progress < 0.5;
            let focused = index == self.state.focused;
            let name_style = match (settling, focused) {
                (true, _) => Style::default().fg(Color::DarkGray),
                (false, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                (false, false) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            };
            let muted = Style::default().fg(if settling { Color::DarkGray } else { Color::Gray });

            frame.render_widget(
                Line::from(Span::styled(truncate_to_width(&entry.name, text_width), name_style)),
                Rect::new(inner.x, y, inner.width, 1),
            );
            frame.render_widget(
                Line::from(Span::styled(truncate_to_width(&entry.description, text_width), muted)),
                Rect::new(inner.x, y + 1, inner.width, 1),
            );

            let mut link_style = Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED);
            if self.state.hovered_link == Some(index) {
                link_style = link_style.add_modifier(Modifier::REVERSED);
            }
            let label = if index < 9 {
                format!("[{}] Try Now → {}", index + 1, entry.link.url)
            } else {
                format!("Try Now → {}", entry.link.url)
            };
            let label = truncate_to_width(&label, text_width);
            let link_rect = Rect::new(inner.x, y + 2, label_width(&label).min(inner.width), 1);
            frame.render_widget(Span::styled(label, link_style), link_rect);
            self.state.link_rects.push((index, link_rect));
        }

        if first > 0 || first + slots < count {
            let position = format!("{}-{} of {}", first + 1, (first + slots).min(count), count);
            let width = label_width(&position).min(inner.width);
            frame.render_widget(
                Span::styled(position, Style::default().fg(Color::DarkGray)),
                Rect::new(inner.right() - width, inner.y, width, 1),
            );
        }

        if self.list.entries.is_empty() {
            let empty = Paragraph::new("No tools in this category yet.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, Rect::new(inner.x, list_top.min(list_bottom), inner.width, 1));
        }
    }
}

/// Number of entries that fit in `height` rows. The last one may drop its spacer.
fn visible_entries(height: u16) -> usize {
    (((height + 1) / ENTRY_HEIGHT) as usize).max(1)
}

fn label_width(s: &str) -> u16 {
    s.chars().map(|c| c.width().unwrap_or(0) as u16).sum()
}

/// Cut `s` to at most `max_width` display columns, ending in "…" when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
