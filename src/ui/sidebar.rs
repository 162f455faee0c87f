use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::ai::QUICK_ACTIONS;
use crate::app::Model;

/// Render the AI assistant panel on the right edge.
pub fn render_sidebar(model: &Model, frame: &mut Frame, area: Rect) {
    let styles = model.theme.styles();
    let block = Block::default()
        .title(" AI Assistant ")
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(styles.border))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(styles.panel_bg).fg(styles.foreground));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    for (idx, quick) in QUICK_ACTIONS.iter().enumerate() {
        let selected = model.sidebar_selected == idx;
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(styles.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(styles.foreground)
        };
        lines.push(Line::styled(format!("{marker}{}", quick.label), style));
    }

    lines.push(Line::raw(""));
    let custom_selected = model.sidebar_selected == QUICK_ACTIONS.len();
    let marker = if custom_selected { "> " } else { "  " };
    let label_style = if custom_selected {
        Style::default()
            .fg(styles.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(styles.foreground)
    };
    lines.push(Line::styled(format!("{marker}Custom prompt:"), label_style));
    let caret = if custom_selected { "▏" } else { "" };
    lines.push(Line::styled(
        format!("  {}{caret}", model.ai_prompt),
        Style::default().fg(styles.foreground),
    ));

    lines.push(Line::raw(""));
    if model.ai_pending {
        lines.push(Line::styled(
            "  Thinking…",
            Style::default()
                .fg(styles.muted)
                .add_modifier(Modifier::ITALIC),
        ));
    } else if let Some(result) = model.ai_result.as_deref() {
        lines.push(Line::styled(
            "  Analysis",
            Style::default()
                .fg(styles.accent)
                .add_modifier(Modifier::BOLD),
        ));
        for text_line in result.lines() {
            lines.push(Line::styled(
                text_line.to_string(),
                Style::default().fg(styles.foreground),
            ));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  Up/Down select · Enter run · Esc close",
        Style::default().fg(styles.muted),
    ));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(panel, inner);
}
