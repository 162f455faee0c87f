use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::document::Direction;

use super::event_loop::ResizeDebouncer;
use super::model::{PromptKind, ViewMode};

impl App {
    pub(super) fn handle_event(
        &self,
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => self.handle_key(key, model),
            Event::Paste(text) if model.editing_active() => Some(Message::Paste(text)),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize queued");
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.prompt.is_some() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            let _ = key;
            return Some(Message::HideHelp);
        }

        // The footer prompt captures all keys while active.
        if let Some(prompt) = model.prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::FilePromptCancel),
                KeyCode::Enter => {
                    let input = prompt.input.clone();
                    match prompt.kind {
                        PromptKind::OpenFile => Some(Message::OpenFile(input)),
                        PromptKind::Rename => Some(Message::RenameFile(input)),
                    }
                }
                KeyCode::Backspace => {
                    let mut next = prompt.input.clone();
                    next.pop();
                    Some(Message::FilePromptInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = prompt.input.clone();
                    next.push(c);
                    Some(Message::FilePromptInput(next))
                }
                _ => None,
            };
        }

        // Global shortcuts work in every mode.
        if let Some(msg) = Self::global_key(key, model) {
            return Some(msg);
        }

        // The AI sidebar captures the remaining keys while open.
        if model.ai_open {
            return Self::sidebar_key(key, model);
        }

        match model.view_mode {
            ViewMode::Edit | ViewMode::Split => Self::editor_key(key, model),
            ViewMode::Preview => Self::preview_key(key, model),
        }
    }

    fn global_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => Some(Message::Quit),
            KeyCode::Char('s') if ctrl => Some(Message::SaveDocument),
            KeyCode::Char('p') if ctrl => Some(Message::ExportPdf),
            KeyCode::Char('o') if ctrl => Some(Message::StartOpenPrompt),
            KeyCode::Char('r') if ctrl => Some(Message::StartRenamePrompt),
            KeyCode::Char('t') if ctrl => Some(Message::CycleTheme),
            KeyCode::Char('a') if ctrl => Some(Message::ToggleAiSidebar),
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::SetViewMode(ViewMode::Edit)),
            KeyCode::F(3) if model.width >= super::model::SPLIT_MIN_WIDTH => {
                Some(Message::SetViewMode(ViewMode::Split))
            }
            KeyCode::F(4) => Some(Message::SetViewMode(ViewMode::Preview)),
            _ => None,
        }
    }

    fn sidebar_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        let custom_row = crate::ai::QUICK_ACTIONS.len();
        match key.code {
            KeyCode::Esc => Some(Message::CloseAiSidebar),
            KeyCode::Up => Some(Message::SidebarUp),
            KeyCode::Down | KeyCode::Tab => Some(Message::SidebarDown),
            KeyCode::Enter if model.ai_pending => None,
            KeyCode::Enter => {
                if let Some(quick) = crate::ai::QUICK_ACTIONS.get(model.sidebar_selected) {
                    Some(Message::AiRequest {
                        instruction: quick.instruction.to_string(),
                        action: quick.action,
                    })
                } else if model.ai_prompt.trim().is_empty() {
                    None
                } else {
                    Some(Message::AiRequest {
                        instruction: model.ai_prompt.clone(),
                        action: crate::ai::AiAction::Replace,
                    })
                }
            }
            KeyCode::Backspace if model.sidebar_selected == custom_row => {
                let mut next = model.ai_prompt.clone();
                next.pop();
                Some(Message::AiPromptInput(next))
            }
            KeyCode::Char(c)
                if model.sidebar_selected == custom_row
                    && !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut next = model.ai_prompt.clone();
                next.push(c);
                Some(Message::AiPromptInput(next))
            }
            _ => None,
        }
    }

    fn editor_key(key: event::KeyEvent, _model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            _ => None,
        }
    }

    fn preview_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(1))
                } else {
                    None
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(1))
                } else {
                    None
                }
            }
            KeyCode::Char(' ') | KeyCode::PageDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::PageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::PageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('d') => {
                if model.viewport.can_scroll_down() {
                    Some(Message::HalfPageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('u') => {
                if model.viewport.can_scroll_up() {
                    Some(Message::HalfPageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn view(&self, model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
