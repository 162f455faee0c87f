//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod sidebar;
mod status;

pub use render::render;

/// Horizontal padding inside the edit and preview panes.
pub const PANE_PADDING: u16 = 1;
/// Fixed column width of the AI sidebar.
pub const AI_SIDEBAR_WIDTH: u16 = 36;
