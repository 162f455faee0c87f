//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, PromptKind, PromptState, SIDEBAR_ROWS, SPLIT_MIN_WIDTH, ToastLevel, ViewMode};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;

use crate::ai::Generator;
use crate::ui::style::Theme;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    theme: Theme,
    view_mode: ViewMode,
    pub(crate) generator: Option<Arc<dyn Generator>>,
}

impl App {
    /// Create a new application. Without a file it opens the welcome
    /// document.
    pub fn new() -> Self {
        Self {
            file_path: None,
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            generator: None,
        }
    }

    /// Open this markdown file at startup.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Set the initial color theme.
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the initial view mode.
    pub const fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Attach an AI generation backend. Without one, AI requests show
    /// an error toast.
    pub fn with_generator(mut self, generator: Option<Arc<dyn Generator>>) -> Self {
        self.generator = generator;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
