// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. preview::PreviewLine)
    clippy::module_name_repetitions
)]

//! # mdraft
//!
//! A terminal markdown editor with live preview and an AI assistant.
//!
//! mdraft edits markdown in the terminal with:
//! - Side-by-side live preview (edit, split, and preview-only views)
//! - Light, Dark, and Dracula themes
//! - Markdown save and PDF export
//! - A Gemini-backed assistant for rewriting, continuing, and analyzing text
//!
//! ## Architecture
//!
//! mdraft uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: The editable markdown buffer
//! - [`preview`]: Markdown to styled-line rendering
//! - [`ai`]: Gemini client and prompt building
//! - [`export`]: Markdown save and PDF export
//! - [`ui`]: Terminal UI components

pub mod ai;
pub mod app;
pub mod document;
pub mod export;
pub mod preview;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::ui::viewport::Viewport;
}
