use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the screen.
///
/// Props come in through the wrapper's constructor; anything that must
/// outlive a frame (focus, hover, hit rects) sits behind a `&mut *State`.
///
/// `render` takes `&mut self` so grid and panel components can record
/// where their cards and links landed. Clicks are resolved against that
/// geometry on the next event.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent component state that turns raw input into its own events.
pub trait EventHandler {
    /// What the component reports back to the router (`GridEvent`, `PanelEvent`).
    type Event;

    /// Returns `None` when the event only changed local state, or was not for us.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
