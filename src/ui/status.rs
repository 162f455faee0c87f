use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, PromptKind, ToastLevel, ViewMode};

/// Render the single footer row. An active prompt or toast takes the row
/// over from the regular status line.
pub fn render_footer(model: &Model, frame: &mut Frame, area: Rect) {
    if model.prompt.is_some() {
        render_prompt_bar(model, frame, area);
    } else if model.active_toast().is_some() {
        render_toast_bar(model, frame, area);
    } else {
        render_status_bar(model, frame, area);
    }
}

fn render_prompt_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = model.prompt.as_ref() else {
        return;
    };
    let label = match prompt.kind {
        PromptKind::OpenFile => "Open file",
        PromptKind::Rename => "Rename to",
    };
    let text = format!(" {label}: {}▏ Enter: confirm  Esc: cancel", prompt.input);
    let styles = model.theme.styles();
    let bar = Paragraph::new(text).style(
        Style::default()
            .bg(styles.accent)
            .fg(styles.background)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(bar, area);
}

fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let styles = model.theme.styles();
    let dirty = if model.document.is_dirty() { "*" } else { "" };
    let cursor = model.document.cursor();
    let ai = if model.ai_pending {
        "  [AI…]"
    } else if model.ai_open {
        "  [AI]"
    } else {
        ""
    };

    // Cursor position in the editor, scroll position in the preview pager.
    let position = if model.view_mode == ViewMode::Preview {
        format!("{}%", model.viewport.scroll_percent())
    } else {
        format!("Ln {}, Col {}", cursor.line + 1, cursor.col + 1)
    };

    let status = format!(
        " {}{}  [{}] [{}]  {} chars  {} words  {}{}  F1:help",
        model.document.file_name(),
        dirty,
        model.view_mode.name(),
        model.theme.name(),
        model.document.char_count(),
        model.document.word_count(),
        position,
        ai,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(styles.status_bg).fg(styles.status_fg));
    frame.render_widget(status_bar, area);
}

fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let bar = Paragraph::new(format!(" {prefix} {message}")).style(style);
    frame.render_widget(bar, area);
}
