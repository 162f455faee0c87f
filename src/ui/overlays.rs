use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let styles = model.theme.styles();
    let section_style = Style::default()
        .fg(styles.accent)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(styles.muted);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("View", section_style));
    all_lines.push(Line::raw("  F2 / F3 / F4        Edit / Split / Preview"));
    all_lines.push(Line::raw("  Ctrl-t              Cycle theme"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("File", section_style));
    all_lines.push(Line::raw("  Ctrl-s              Save markdown"));
    all_lines.push(Line::raw("  Ctrl-p              Export PDF"));
    all_lines.push(Line::raw("  Ctrl-o              Open file"));
    all_lines.push(Line::raw("  Ctrl-r              Rename file"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("AI Assistant", section_style));
    all_lines.push(Line::raw("  Ctrl-a              Toggle sidebar"));
    all_lines.push(Line::raw("  Up/Down, Enter      Select and run an action"));
    all_lines.push(Line::raw("  Esc                 Close sidebar"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Preview mode", section_style));
    all_lines.push(Line::raw("  j/k or Up/Down      Scroll"));
    all_lines.push(Line::raw("  Space / b           Page down / up"));
    all_lines.push(Line::raw("  d / u               Half page down / up"));
    all_lines.push(Line::raw("  g / G               Top / bottom"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Quit", section_style));
    all_lines.push(Line::raw("  Ctrl-q              Quit"));
    all_lines.push(Line::raw(""));
    all_lines.push(Line::styled("Press any key to close", dim_style));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .border_style(Style::default().fg(styles.border))
        .style(Style::default().bg(styles.panel_bg).fg(styles.foreground));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(all_lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
