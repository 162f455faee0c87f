use crate::ai::{AiAction, AiReply};
use crate::document::Direction;

use super::model::{
    Model, PromptKind, PromptState, SIDEBAR_ROWS, SPLIT_MIN_WIDTH, ToastLevel, ViewMode,
};

/// All possible events and actions in the application.
///
/// Input handling translates raw terminal events into these messages and
/// `update` applies them to the model. Messages that touch the filesystem
/// or the network are additionally picked up by the side-effect handler
/// after the state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Editing
    InsertChar(char),
    InsertNewline,
    /// Bracketed paste into the edit pane
    Paste(String),
    DeleteBack,
    DeleteForward,
    MoveCursor(Direction),
    MoveHome,
    MoveEnd,
    MoveWordLeft,
    MoveWordRight,
    MoveToStart,
    MoveToEnd,

    // Preview navigation
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GoToTop,
    GoToBottom,

    // View and theme
    SetViewMode(ViewMode),
    CycleTheme,

    // AI sidebar
    ToggleAiSidebar,
    CloseAiSidebar,
    SidebarUp,
    SidebarDown,
    AiPromptInput(String),
    /// Start a generation request (the side-effect handler spawns the worker)
    AiRequest {
        instruction: String,
        action: AiAction,
    },
    /// A generation request finished
    AiResolved(AiReply),

    // File prompts and IO
    StartOpenPrompt,
    StartRenamePrompt,
    FilePromptInput(String),
    FilePromptCancel,
    /// Open the markdown file at this path (the side-effect handler reads it)
    OpenFile(String),
    RenameFile(String),
    SaveDocument,
    ExportPdf,

    // Window
    Resize(u16, u16),
    ToggleHelp,
    HideHelp,
    Quit,
    Redraw,
}

/// Pure state transition function. Takes ownership of the model and the
/// message, returns the new model. IO happens afterwards in
/// `handle_message_side_effects`.
#[allow(clippy::too_many_lines)]
pub fn update(model: Model, msg: Message) -> Model {
    let mut model = model;

    match msg {
        Message::InsertChar(ch) => {
            model.document.insert_char(ch);
            model.follow_cursor();
            model.sync_preview();
        }
        Message::InsertNewline => {
            model.document.split_line();
            model.follow_cursor();
            model.sync_preview();
        }
        Message::Paste(text) => {
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            model.document.insert_str(&text);
            model.follow_cursor();
            model.sync_preview();
        }
        Message::DeleteBack => {
            if model.document.delete_back() {
                model.sync_preview();
            }
            model.follow_cursor();
        }
        Message::DeleteForward => {
            if model.document.delete_forward() {
                model.sync_preview();
            }
        }
        Message::MoveCursor(direction) => {
            model.document.move_cursor(direction);
            model.follow_cursor();
        }
        Message::MoveHome => model.document.move_home(),
        Message::MoveEnd => model.document.move_end(),
        Message::MoveWordLeft => model.document.move_word_left(),
        Message::MoveWordRight => model.document.move_word_right(),
        Message::MoveToStart => {
            model.document.move_to_start();
            model.follow_cursor();
        }
        Message::MoveToEnd => {
            model.document.move_to_end();
            model.follow_cursor();
        }

        Message::ScrollUp(amount) => model.viewport.scroll_up(amount),
        Message::ScrollDown(amount) => model.viewport.scroll_down(amount),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::SetViewMode(mode) => {
            model.view_mode = mode;
            model.sync_preview();
        }
        Message::CycleTheme => {
            model.theme = model.theme.next();
            model.show_toast(ToastLevel::Info, format!("Theme: {}", model.theme.name()));
        }

        Message::ToggleAiSidebar => {
            model.ai_open = !model.ai_open;
            if !model.ai_open {
                model.ai_result = None;
            }
            model.sync_preview();
        }
        Message::CloseAiSidebar => {
            model.ai_open = false;
            model.ai_result = None;
            model.sync_preview();
        }
        Message::SidebarUp => {
            model.sidebar_selected = model.sidebar_selected.saturating_sub(1);
        }
        Message::SidebarDown => {
            model.sidebar_selected = (model.sidebar_selected + 1).min(SIDEBAR_ROWS - 1);
        }
        Message::AiPromptInput(input) => model.ai_prompt = input,
        Message::AiRequest { .. } => {
            model.ai_pending = true;
            model.ai_result = None;
        }
        Message::AiResolved(reply) => {
            model.ai_pending = false;
            match reply.result {
                Ok(text) if text.trim().is_empty() => {
                    model.show_toast(ToastLevel::Info, "AI returned an empty result");
                }
                Ok(text) => match reply.action {
                    AiAction::Replace => {
                        model.document.set_content(&text);
                        model.follow_cursor();
                        model.sync_preview();
                        model.show_toast(ToastLevel::Info, "Document replaced with AI result");
                    }
                    AiAction::Append => {
                        model.document.append_content(&text);
                        model.sync_preview();
                        model.show_toast(ToastLevel::Info, "AI result appended");
                    }
                    AiAction::Analyze => {
                        // A sidebar closed mid-flight drops the display.
                        if model.ai_open {
                            model.ai_result = Some(text);
                        }
                    }
                },
                Err(err) => {
                    model.show_toast(ToastLevel::Error, format!("AI request failed: {err}"));
                }
            }
        }

        Message::StartOpenPrompt => {
            model.prompt = Some(PromptState {
                kind: PromptKind::OpenFile,
                input: String::new(),
            });
        }
        Message::StartRenamePrompt => {
            model.prompt = Some(PromptState {
                kind: PromptKind::Rename,
                input: model.document.file_name().to_string(),
            });
        }
        Message::FilePromptInput(input) => {
            if let Some(prompt) = model.prompt.as_mut() {
                prompt.input = input;
            }
        }
        Message::FilePromptCancel => model.prompt = None,
        Message::OpenFile(_) => {
            model.prompt = None;
        }
        Message::RenameFile(name) => {
            model.prompt = None;
            let trimmed = name.trim();
            if trimmed.is_empty() {
                model.show_toast(ToastLevel::Warning, "File name cannot be empty");
            } else {
                model.document.set_file_name(trimmed);
                model.show_toast(
                    ToastLevel::Info,
                    format!("Renamed to {}", model.document.file_name()),
                );
            }
        }
        // Pure side effects, no state transition here.
        Message::SaveDocument | Message::ExportPdf | Message::Redraw => {}

        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            if model.view_mode == ViewMode::Split && width < SPLIT_MIN_WIDTH {
                model.view_mode = ViewMode::Edit;
            }
            model.follow_cursor();
            model.sync_preview();
        }
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Quit => model.should_quit = true,
    }

    model
}
