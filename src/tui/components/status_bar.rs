//! # StatusBar Component
//!
//! Single top line showing where the user is and what they can do next.
//!
//! TitleBar-style stateless component: all data comes in as props, so it is
//! trivial to test by rendering into a `TestBackend`.
//!
//! The text changes with state:
//!
//! 1. **Loading**: `"Toolshelf | Home | ⠋ loading catalog"`
//! 2. **Status message**: `"Toolshelf | Categories | 3 categories"`
//! 3. **Default**: `"Toolshelf | Home"`
//!
//! Key hints for the current view are right-aligned when they fit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct StatusBar {
    /// Name of the active view
    pub view_label: String,
    /// Transient status (e.g. "3 categories", "Could not open link")
    pub status_message: String,
    /// Spinner frame while the catalog is loading
    pub loading_frame: Option<usize>,
    /// Key hints for the active view
    pub hints: &'static str,
}

impl StatusBar {
    pub fn new(
        view_label: String,
        status_message: String,
        loading_frame: Option<usize>,
        hints: &'static str,
    ) -> Self {
        Self {
            view_label,
            status_message,
            loading_frame,
            hints,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Toolshelf | {}", self.view_label);
        if let Some(frame) = self.loading_frame {
            text.push_str(&format!(" | {} loading catalog", SPINNER[frame % SPINNER.len()]));
        } else if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        text
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let left = self.text();
        let used = left.chars().count() + self.hints.chars().count() + 1;
        let mut spans = vec![Span::raw(left)];
        if used <= area.width as usize {
            let gap = area.width as usize - used + 1;
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(self.hints, Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
