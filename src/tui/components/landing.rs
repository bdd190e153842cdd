//! # Landing Page Component
//!
//! The Home view: a centered headline inviting the user to scroll down.
//! During the Home↔Categories slide the page is drawn with its top
//! `scroll_offset` rows cut off, so it appears to move up off screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct LandingPage {
    /// Height of the full view, used for vertical centering.
    full_height: u16,
    /// Rows of the page already scrolled off the top.
    scroll_offset: u16,
}

impl LandingPage {
    pub fn new(full_height: u16, scroll_offset: u16) -> Self {
        Self {
            full_height,
            scroll_offset,
        }
    }

    fn lines() -> Vec<Line<'static>> {
        let headline = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let accent = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::DarkGray);

        vec![
            Line::from(Span::styled("Find the right", headline)),
            Line::from(vec![
                Span::styled("AI", accent),
                Span::styled(" tool for every job.", headline),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "A hand-picked catalog of tools, grouped by what you need to get done.",
                muted,
            )),
            Line::default(),
            Line::from(Span::styled("Scroll down ↓", Style::default().fg(Color::Yellow))),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                muted,
            )),
        ]
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text_lines = Self::lines();

        // Center within the full view height, not the visible slice, so the
        // text moves with the slide instead of re-centering.
        let text_height = text_lines.len() as u16;
        let top_padding = self.full_height.saturating_sub(text_height) / 2;
        let mut lines = vec![Line::default(); top_padding as usize];
        lines.extend(text_lines);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .scroll((self.scroll_offset, 0));

        frame.render_widget(paragraph, area);
    }
}
