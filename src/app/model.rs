use std::time::{Duration, Instant};

use crate::document::Document;
use crate::preview::{self, PreviewLine};
use crate::ui::style::Theme;
use crate::ui::viewport::Viewport;

/// Minimum terminal width for the split view. Narrower terminals fall back
/// to the edit pane (96 columns ≈ 768 px at 8 px cells).
pub const SPLIT_MIN_WIDTH: u16 = 96;

/// Which pane(s) fill the content area.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Edit,
    #[default]
    Split,
    Preview,
}

impl ViewMode {
    /// Human-readable name for the toolbar.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Split => "Split",
            Self::Preview => "Preview",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which value the file prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Path of a markdown file to open.
    OpenFile,
    /// New working file name.
    Rename,
}

/// An active one-line text prompt in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
}

/// The number of selectable rows in the AI sidebar: the quick actions
/// plus the custom prompt field.
pub const SIDEBAR_ROWS: usize = crate::ai::QUICK_ACTIONS.len() + 1;

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document being edited
    pub document: Document,
    /// Active color theme
    pub theme: Theme,
    /// Which pane(s) are shown
    pub view_mode: ViewMode,
    /// Rendered preview lines, kept in sync with the document
    pub preview_lines: Vec<PreviewLine>,
    /// Viewport managing preview scroll position
    pub viewport: Viewport,
    /// First visible line of the edit pane
    pub editor_scroll: usize,
    /// Terminal width
    pub width: u16,
    /// Terminal height
    pub height: u16,
    /// Whether the AI sidebar is open (and focused)
    pub ai_open: bool,
    /// Whether an AI request is in flight
    pub ai_pending: bool,
    /// Custom prompt text in the sidebar
    pub ai_prompt: String,
    /// Last analyze result shown in the sidebar
    pub ai_result: Option<String>,
    /// Selected sidebar row (quick actions, then custom prompt)
    pub sidebar_selected: usize,
    /// Active footer prompt, if any
    pub prompt: Option<PromptState>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_name", &self.document.file_name())
            .field("theme", &self.theme)
            .field("view_mode", &self.view_mode)
            .field("ai_open", &self.ai_open)
            .field("ai_pending", &self.ai_pending)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model with default settings.
    ///
    /// A terminal too narrow for the split view downgrades it to the edit
    /// pane from the start.
    pub fn new(
        document: Document,
        theme: Theme,
        view_mode: ViewMode,
        terminal_size: (u16, u16),
    ) -> Self {
        let (width, height) = terminal_size;
        let view_mode = if view_mode == ViewMode::Split && width < SPLIT_MIN_WIDTH {
            ViewMode::Edit
        } else {
            view_mode
        };

        let mut model = Self {
            document,
            theme,
            view_mode,
            preview_lines: Vec::new(),
            viewport: Viewport::new(height.saturating_sub(2), 0),
            editor_scroll: 0,
            width,
            height,
            ai_open: false,
            ai_pending: false,
            ai_prompt: String::new(),
            ai_result: None,
            sidebar_selected: 0,
            prompt: None,
            help_visible: false,
            toast: None,
            should_quit: false,
        };
        model.sync_preview();
        model
    }

    /// Height of the content area (terminal minus toolbar and status rows).
    pub const fn content_height(&self) -> u16 {
        self.height.saturating_sub(2)
    }

    /// Width available to the edit/preview panes, after the sidebar.
    pub fn content_width(&self) -> u16 {
        if self.ai_open {
            self.width.saturating_sub(crate::ui::AI_SIDEBAR_WIDTH)
        } else {
            self.width
        }
    }

    /// Wrap width of the preview pane for the current layout.
    pub fn preview_width(&self) -> u16 {
        let content = self.content_width();
        // The split preview pane loses one column to its divider border.
        let pane = match self.view_mode {
            ViewMode::Split => (content / 2).saturating_sub(1),
            ViewMode::Edit | ViewMode::Preview => content,
        };
        pane.saturating_sub(crate::ui::PANE_PADDING * 2).max(4)
    }

    /// Re-render the preview and keep the scroll position valid.
    ///
    /// Called whenever the document or the preview width changes.
    pub fn sync_preview(&mut self) {
        self.preview_lines = preview::render(&self.document.text(), self.preview_width());
        self.viewport.resize(self.content_height());
        self.viewport.set_total_lines(self.preview_lines.len());
    }

    /// Scroll the edit pane so the cursor stays visible.
    pub fn follow_cursor(&mut self) {
        let height = self.content_height() as usize;
        if height == 0 {
            return;
        }
        let line = self.document.cursor().line;
        if line >= self.editor_scroll + height {
            self.editor_scroll = line + 1 - height;
        }
        let max = self.document.line_count().saturating_sub(height);
        self.editor_scroll = self.editor_scroll.min(max);
        if line < self.editor_scroll {
            self.editor_scroll = line;
        }
    }

    /// Whether the edit pane is visible and accepting input.
    pub fn editing_active(&self) -> bool {
        matches!(self.view_mode, ViewMode::Edit | ViewMode::Split)
            && !self.ai_open
            && self.prompt.is_none()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            document: Document::default(),
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            preview_lines: Vec::new(),
            viewport: Viewport::new(22, 0),
            editor_scroll: 0,
            width: 80,
            height: 24,
            ai_open: false,
            ai_pending: false,
            ai_prompt: String::new(),
            ai_result: None,
            sidebar_selected: 0,
            prompt: None,
            help_visible: false,
            toast: None,
            should_quit: false,
        }
    }
}
