//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `StatusBar`: Top line with view name, status and key hints
//! - `LandingPage`: The Home view headline
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state in `TuiState` and emit events:
//! - `CategoryGrid`: Card grid with focus, hover, ripple and hit testing
//! - `ToolsPanel`: Sliding overlay with staggered entries and links
//!
//! Stateful components split into a persistent `*State` (owned by
//! `TuiState`) and a transient wrapper built each frame around borrowed
//! state and props. The wrapper records hit-test geometry during render
//! so the event loop can map clicks without recomputing layout.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── status_bar.rs     (Top status line)
//! ├── landing.rs        (Home view)
//! ├── category_grid.rs  (Categories view)
//! └── tools_panel.rs    (Tools overlay)
//! ```

pub mod category_grid;
pub mod landing;
pub mod status_bar;
pub mod tools_panel;

pub use category_grid::{CategoryGrid, CategoryGridState, GridContent, GridEvent};
pub use landing::LandingPage;
pub use status_bar::StatusBar;
pub use tools_panel::{PanelEvent, ToolsPanel, ToolsPanelState};

/// Flatten a test buffer into one string of cell symbols.
#[cfg(test)]
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
