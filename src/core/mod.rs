//! # Core Application Logic
//!
//! This module contains the browser's navigation logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (view, lock)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Scheduler (timing)   │
//!                    │  • Renderer (items)     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all navigation state in one place
//! - [`action`]: The `Action` enum and `update()`, the only way state changes
//! - [`scheduler`]: Virtual-clock queue for timed animation steps
//! - [`render`]: Catalog → display-item descriptors
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod render;
pub mod scheduler;
pub mod state;
