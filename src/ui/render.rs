use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::{Model, ViewMode};
use crate::ui::style::ThemeStyles;

use super::{AI_SIDEBAR_WIDTH, PANE_PADDING, overlays, sidebar, status};

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let styles = model.theme.styles();

    frame.render_widget(
        Block::default().style(Style::default().bg(styles.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_toolbar(model, frame, rows[0]);

    let content = if model.ai_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(AI_SIDEBAR_WIDTH)])
            .split(rows[1]);
        sidebar::render_sidebar(model, frame, columns[1]);
        columns[0]
    } else {
        rows[1]
    };

    match model.view_mode {
        ViewMode::Edit => render_editor(model, frame, content),
        ViewMode::Preview => render_preview(model, frame, content),
        ViewMode::Split => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(content);
            render_editor(model, frame, panes[0]);
            render_preview(model, frame, panes[1]);
        }
    }

    status::render_footer(model, frame, rows[2]);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    let styles = model.theme.styles();
    let base = Style::default().bg(styles.toolbar_bg).fg(styles.toolbar_fg);
    let active = Style::default()
        .bg(styles.toolbar_bg)
        .fg(styles.accent)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" mdraft ", base.add_modifier(Modifier::BOLD)),
        Span::styled("· ", base),
        Span::styled(model.document.file_name().to_string(), base),
        Span::styled(if model.document.is_dirty() { "*" } else { "" }, base),
        Span::styled("   ", base),
    ];
    for mode in [ViewMode::Edit, ViewMode::Split, ViewMode::Preview] {
        let style = if model.view_mode == mode { active } else { base };
        spans.push(Span::styled(format!(" {} ", mode.name()), style));
    }
    spans.push(Span::styled("   ", base));
    let ai_style = if model.ai_open { active } else { base };
    spans.push(Span::styled(" ✨ AI ", ai_style));

    let toolbar = Paragraph::new(Line::from(spans)).style(base);
    frame.render_widget(toolbar, area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let styles = model.theme.styles();
    let block = pane_block(&styles, model.view_mode == ViewMode::Split, Borders::NONE);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let cursor = model.document.cursor();
    let start = model.editor_scroll;
    let end = (start + inner.height as usize).min(model.document.line_count());

    let mut lines: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for idx in start..end {
        let text = model.document.line_at(idx).unwrap_or_default();
        if idx == cursor.line {
            lines.push(caret_line(&text, cursor.col, &styles));
        } else {
            lines.push(Line::styled(text, Style::default().fg(styles.foreground)));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Split the cursor line into before / caret cell / after spans.
/// The cursor column is a byte offset within the line.
fn caret_line(text: &str, col: usize, styles: &ThemeStyles) -> Line<'static> {
    let base = Style::default().fg(styles.foreground);
    let mut col = col.min(text.len());
    while col > 0 && !text.is_char_boundary(col) {
        col -= 1;
    }
    let (before, rest) = text.split_at(col);
    let at: String = rest.chars().take(1).collect();
    let after: String = rest.chars().skip(1).collect();
    let caret_text = if at.is_empty() { " ".to_string() } else { at };
    Line::from(vec![
        Span::styled(before.to_string(), base),
        Span::styled(caret_text, styles.caret),
        Span::styled(after, base),
    ])
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let styles = model.theme.styles();
    let borders = if model.view_mode == ViewMode::Split {
        Borders::LEFT
    } else {
        Borders::NONE
    };
    let block = pane_block(&styles, model.view_mode == ViewMode::Split, borders);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = model.viewport.visible_range();
    let lines: Vec<Line> = model
        .preview_lines
        .iter()
        .skip(visible.start)
        .take(visible.len())
        .map(|line| {
            let base = styles.block_style(&line.kind);
            let spans: Vec<Span> = line
                .spans
                .iter()
                .map(|span| {
                    Span::styled(span.text.clone(), styles.inline_style(base, span))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn pane_block(styles: &ThemeStyles, split: bool, borders: Borders) -> Block<'static> {
    let mut block = Block::default()
        .borders(borders)
        .padding(Padding::horizontal(PANE_PADDING))
        .style(Style::default().bg(styles.background));
    if split {
        block = block.border_style(Style::default().fg(styles.border));
    }
    block
}
