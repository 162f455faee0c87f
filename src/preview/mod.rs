//! Markdown preview rendering.
//!
//! Converts markdown text into theme-agnostic [`PreviewLine`]s, wrapped to a
//! target width. The UI layer pairs each line with the active theme's styles
//! when drawing, so a theme switch never re-parses the document.
//!
//! Supports headings, paragraphs, fenced code blocks, block quotes, ordered
//! and unordered lists (nested), tables (flattened to text rows), rules,
//! and the inline set: bold, italic, strikethrough, inline code, links.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

/// The block-level role of a rendered line. Drives the base style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    CodeBlock,
    Quote,
    ListItem,
    Rule,
    Empty,
}

/// A run of text with uniform inline formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
}

impl InlineSpan {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Same formatting, different text.
    fn with_text(&self, text: String) -> Self {
        Self {
            text,
            ..self_flags(self)
        }
    }
}

// Clone the flag set without the text allocation.
fn self_flags(span: &InlineSpan) -> InlineSpan {
    InlineSpan {
        text: String::new(),
        strong: span.strong,
        emphasis: span.emphasis,
        strikethrough: span.strikethrough,
        code: span.code,
        link: span.link,
    }
}

/// One display line of the rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub kind: BlockKind,
    pub spans: Vec<InlineSpan>,
}

impl PreviewLine {
    fn empty() -> Self {
        Self {
            kind: BlockKind::Empty,
            spans: Vec::new(),
        }
    }

    /// Concatenated text of all spans, used by tests and PDF layout.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Inline formatting flags tracked while walking parser events.
#[derive(Debug, Clone, Copy, Default)]
struct InlineState {
    strong: bool,
    emphasis: bool,
    strikethrough: bool,
    link: bool,
}

/// Accumulates parser events into logical lines, then wraps them.
struct Renderer {
    lines: Vec<PreviewLine>,
    current: Vec<InlineSpan>,
    kind: BlockKind,
    inline: InlineState,
    /// Display-width indent applied to wrapped continuations of this block.
    hang_indent: usize,
    in_code_block: bool,
    /// One entry per open list; `Some(n)` is the next ordered index.
    list_stack: Vec<Option<u64>>,
    quote_depth: usize,
    /// Table cells collected for the current row.
    table_row: Option<Vec<String>>,
    width: usize,
}

impl Renderer {
    fn new(width: u16) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            kind: BlockKind::Paragraph,
            inline: InlineState::default(),
            hang_indent: 0,
            in_code_block: false,
            list_stack: Vec::new(),
            quote_depth: 0,
            table_row: None,
            width: usize::from(width).max(4),
        }
    }

    fn push_span(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        self.current.push(InlineSpan {
            text: text.to_string(),
            strong: self.inline.strong,
            emphasis: self.inline.emphasis,
            strikethrough: self.inline.strikethrough,
            code,
            link: self.inline.link,
        });
    }

    /// Wrap and emit the accumulated line.
    fn flush_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current);
        let kind = self.kind.clone();
        for wrapped in wrap_spans(&spans, self.width, self.hang_indent) {
            self.lines.push(PreviewLine {
                kind: kind.clone(),
                spans: wrapped,
            });
        }
    }

    /// Emit a blank separator line unless one is already last.
    fn blank_line(&mut self) {
        if matches!(self.lines.last(), Some(line) if line.kind != BlockKind::Empty) {
            self.lines.push(PreviewLine::empty());
        }
    }

    fn quote_prefix(&self) -> String {
        "▌ ".repeat(self.quote_depth)
    }

    fn start_block_line(&mut self) {
        if self.quote_depth > 0 {
            self.current.push(InlineSpan::plain(self.quote_prefix()));
        }
    }
}

/// Render markdown to preview lines wrapped at `width` columns.
pub fn render(markdown: &str, width: u16) -> Vec<PreviewLine> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut r = Renderer::new(width);

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    r.blank_line();
                    r.kind = BlockKind::Heading(heading_level(level));
                    r.hang_indent = 0;
                    r.start_block_line();
                }
                Tag::Paragraph => {
                    r.blank_line();
                    if r.quote_depth > 0 {
                        r.kind = BlockKind::Quote;
                    } else if !r.list_stack.is_empty() {
                        r.kind = BlockKind::ListItem;
                    } else {
                        r.kind = BlockKind::Paragraph;
                        r.hang_indent = 0;
                    }
                    if r.list_stack.is_empty() {
                        r.start_block_line();
                    }
                }
                Tag::CodeBlock(_) => {
                    r.flush_line();
                    r.blank_line();
                    r.in_code_block = true;
                    r.kind = BlockKind::CodeBlock;
                    r.hang_indent = 0;
                }
                Tag::BlockQuote(_) => {
                    r.flush_line();
                    r.blank_line();
                    r.quote_depth += 1;
                }
                Tag::List(start) => {
                    r.flush_line();
                    if r.list_stack.is_empty() {
                        r.blank_line();
                    }
                    r.list_stack.push(start);
                }
                Tag::Item => {
                    r.flush_line();
                    r.kind = BlockKind::ListItem;
                    let depth = r.list_stack.len().saturating_sub(1);
                    let indent = "  ".repeat(depth);
                    let marker = match r.list_stack.last_mut() {
                        Some(Some(n)) => {
                            let m = format!("{n}. ");
                            *n += 1;
                            m
                        }
                        _ => "• ".to_string(),
                    };
                    r.start_block_line();
                    let prefix = format!("{indent}{marker}");
                    r.hang_indent = prefix.width() + r.quote_prefix().width();
                    r.current.push(InlineSpan::plain(prefix));
                }
                Tag::Strong => r.inline.strong = true,
                Tag::Emphasis => r.inline.emphasis = true,
                Tag::Strikethrough => r.inline.strikethrough = true,
                Tag::Link { .. } => r.inline.link = true,
                Tag::Table(_) => {
                    r.flush_line();
                    r.blank_line();
                    r.kind = BlockKind::Paragraph;
                    r.hang_indent = 0;
                }
                Tag::TableHead | Tag::TableRow => {
                    r.table_row = Some(Vec::new());
                }
                Tag::TableCell => {
                    if let Some(row) = &mut r.table_row {
                        row.push(String::new());
                    }
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(_) | TagEnd::Paragraph => {
                    r.flush_line();
                    if matches!(tag, TagEnd::Paragraph) && r.list_stack.is_empty() {
                        r.hang_indent = 0;
                    }
                }
                TagEnd::CodeBlock => {
                    r.flush_line();
                    r.in_code_block = false;
                    r.kind = BlockKind::Paragraph;
                }
                TagEnd::BlockQuote(_) => {
                    r.flush_line();
                    r.quote_depth = r.quote_depth.saturating_sub(1);
                }
                TagEnd::List(_) => {
                    r.flush_line();
                    r.list_stack.pop();
                    if r.list_stack.is_empty() {
                        r.hang_indent = 0;
                    }
                }
                TagEnd::Item => r.flush_line(),
                TagEnd::Strong => r.inline.strong = false,
                TagEnd::Emphasis => r.inline.emphasis = false,
                TagEnd::Strikethrough => r.inline.strikethrough = false,
                TagEnd::Link => r.inline.link = false,
                TagEnd::TableHead | TagEnd::TableRow => {
                    if let Some(row) = r.table_row.take() {
                        r.current.push(InlineSpan::plain(row.join(" | ")));
                        r.flush_line();
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some(row) = &mut r.table_row {
                    if let Some(cell) = row.last_mut() {
                        cell.push_str(&text);
                    }
                } else if r.in_code_block {
                    // Fenced code arrives as one event; keep lines verbatim
                    for code_line in text.lines() {
                        r.start_block_line();
                        r.push_span(code_line, true);
                        emit_code_line(&mut r);
                    }
                } else {
                    r.push_span(&text, false);
                }
            }
            Event::Code(code) => {
                if let Some(row) = &mut r.table_row {
                    if let Some(cell) = row.last_mut() {
                        cell.push_str(&code);
                    }
                } else {
                    r.push_span(&code, true);
                }
            }
            Event::SoftBreak => r.push_span(" ", false),
            Event::HardBreak => {
                r.flush_line();
                r.start_block_line();
                if r.hang_indent > 0 {
                    r.current.push(InlineSpan::plain(" ".repeat(r.hang_indent)));
                }
            }
            Event::Rule => {
                r.flush_line();
                r.blank_line();
                r.lines.push(PreviewLine {
                    kind: BlockKind::Rule,
                    spans: vec![InlineSpan::plain("─".repeat(r.width.min(40)))],
                });
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                r.push_span(marker, false);
            }
            _ => {}
        }
    }
    r.flush_line();

    // Drop a leading separator left by the first block
    if matches!(r.lines.first(), Some(line) if line.kind == BlockKind::Empty) {
        r.lines.remove(0);
    }
    r.lines
}

/// Code lines are sliced hard at the width instead of word-wrapped.
fn emit_code_line(r: &mut Renderer) {
    let spans = std::mem::take(&mut r.current);
    let text: String = spans.iter().map(|s| s.text.as_str()).collect();
    let mut rest = text.as_str();
    loop {
        let (chunk, remainder) = split_at_width(rest, r.width);
        r.lines.push(PreviewLine {
            kind: BlockKind::CodeBlock,
            spans: vec![InlineSpan {
                text: chunk.to_string(),
                code: true,
                ..InlineSpan::default()
            }],
        });
        if remainder.is_empty() {
            break;
        }
        rest = remainder;
    }
}

/// Split `s` so the first part's display width fits in `width`.
fn split_at_width(s: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        let w = UnicodeWidthStr::width(ch.encode_utf8(&mut [0u8; 4]) as &str);
        if used + w > width && idx > 0 {
            return s.split_at(idx);
        }
        used += w;
    }
    (s, "")
}

/// Greedy word-wrap across styled spans. Continuation lines are padded
/// with `hang_indent` spaces so list items align under their text.
fn wrap_spans(spans: &[InlineSpan], width: usize, hang_indent: usize) -> Vec<Vec<InlineSpan>> {
    let mut out: Vec<Vec<InlineSpan>> = Vec::new();
    let mut line: Vec<InlineSpan> = Vec::new();
    let mut line_width = 0usize;
    let indent = hang_indent.min(width.saturating_sub(1));

    let mut break_line = |line: &mut Vec<InlineSpan>, line_width: &mut usize| {
        out.push(std::mem::take(line));
        if indent > 0 {
            line.push(InlineSpan::plain(" ".repeat(indent)));
        }
        *line_width = indent;
    };

    for span in spans {
        let mut pending = self_flags(span);
        // Tokenize into words and whitespace runs so breaks land between words
        for token in tokenize(&span.text) {
            let token_width = token.width();
            if line_width + token_width <= width {
                pending.text.push_str(token);
                line_width += token_width;
                continue;
            }
            if !pending.text.is_empty() {
                line.push(pending.clone());
                pending.text.clear();
            }
            if token.trim().is_empty() {
                // Whitespace at the break point is swallowed
                if line_width > indent {
                    break_line(&mut line, &mut line_width);
                }
                continue;
            }
            if line_width > indent {
                break_line(&mut line, &mut line_width);
            }
            // A word longer than the remaining width is hard-sliced
            let mut word = token;
            while word.width() > width.saturating_sub(line_width) {
                let avail = width.saturating_sub(line_width).max(1);
                let (chunk, rest) = split_at_width(word, avail);
                if chunk.is_empty() {
                    break;
                }
                line.push(span.with_text(chunk.to_string()));
                break_line(&mut line, &mut line_width);
                word = rest;
            }
            pending.text.push_str(word);
            line_width += word.width();
        }
        if !pending.text.is_empty() {
            line.push(pending);
        }
    }
    if !line.iter().all(|s| s.text.trim().is_empty()) || out.is_empty() {
        out.push(line);
    }
    out
}

/// Split text into alternating word and whitespace tokens.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (idx, ch) in text.char_indices() {
        let is_space = ch == ' ';
        match in_space {
            None => in_space = Some(is_space),
            Some(prev) if prev != is_space => {
                tokens.push(&text[start..idx]);
                start = idx;
                in_space = Some(is_space);
            }
            _ => {}
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

const fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
