//! Theming and color definitions.
//!
//! This module defines the visual themes for the editor chrome and the
//! rendered preview. A [`Theme`] is pure selector state; [`Theme::styles`]
//! maps it to the concrete style tokens used everywhere else.

use ratatui::style::{Color, Modifier, Style};

use crate::preview::{BlockKind, InlineSpan};

/// The available visual themes.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Dracula,
}

impl Theme {
    /// Cycle to the next theme (Light → Dark → Dracula → Light).
    pub const fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Dracula,
            Self::Dracula => Self::Light,
        }
    }

    /// Human-readable name for the status bar.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Dracula => "Dracula",
        }
    }

    /// The style tokens for this theme. Pure function of the selector.
    pub fn styles(self) -> ThemeStyles {
        match self {
            Self::Light => ThemeStyles::light(),
            Self::Dark => ThemeStyles::dark(),
            Self::Dracula => ThemeStyles::dracula(),
        }
    }
}

/// Concrete style tokens for one theme.
#[derive(Debug, Clone)]
pub struct ThemeStyles {
    /// Base background for both panes
    pub background: Color,
    /// Base foreground for editor text
    pub foreground: Color,
    /// Toolbar row colors
    pub toolbar_bg: Color,
    pub toolbar_fg: Color,
    /// Footer / status bar colors
    pub status_bg: Color,
    pub status_fg: Color,
    /// Accent color (active view-mode tab, AI controls)
    pub accent: Color,
    /// Pane divider / sidebar border
    pub border: Color,
    /// Editor cursor cell
    pub caret: Style,
    /// Sidebar panel background
    pub panel_bg: Color,
    /// Dimmed secondary text
    pub muted: Color,
    /// Heading colors indexed by level (1-based, clamped)
    headings: [Color; 4],
    /// Inline and fenced code
    code: Color,
    /// Block quotes
    quote: Color,
    /// Links
    link: Color,
}

impl ThemeStyles {
    fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Indexed(235),
            toolbar_bg: Color::Indexed(255),
            toolbar_fg: Color::Indexed(238),
            status_bg: Color::Indexed(254),
            status_fg: Color::Indexed(240),
            accent: Color::Indexed(25),
            border: Color::Indexed(250),
            caret: Style::default().bg(Color::Indexed(235)).fg(Color::White),
            panel_bg: Color::Indexed(255),
            muted: Color::Indexed(245),
            headings: [
                Color::Indexed(25),
                Color::Indexed(28),
                Color::Indexed(136),
                Color::Indexed(24),
            ],
            code: Color::Indexed(124),
            quote: Color::Indexed(25),
            link: Color::Indexed(25),
        }
    }

    fn dark() -> Self {
        Self {
            background: Color::Indexed(233),
            foreground: Color::Indexed(252),
            toolbar_bg: Color::Indexed(235),
            toolbar_fg: Color::Indexed(250),
            status_bg: Color::Indexed(236),
            status_fg: Color::Indexed(248),
            accent: Color::Indexed(39),
            border: Color::Indexed(238),
            caret: Style::default().bg(Color::White).fg(Color::Black),
            panel_bg: Color::Indexed(234),
            muted: Color::Indexed(243),
            headings: [Color::Cyan, Color::Green, Color::Yellow, Color::Blue],
            code: Color::Red,
            quote: Color::Blue,
            link: Color::LightBlue,
        }
    }

    fn dracula() -> Self {
        Self {
            background: Color::Rgb(40, 42, 54),
            foreground: Color::Rgb(248, 248, 242),
            toolbar_bg: Color::Rgb(33, 34, 44),
            toolbar_fg: Color::Rgb(248, 248, 242),
            status_bg: Color::Rgb(33, 34, 44),
            status_fg: Color::Rgb(98, 114, 164),
            accent: Color::Rgb(189, 147, 249),
            border: Color::Rgb(68, 71, 90),
            caret: Style::default()
                .bg(Color::Rgb(248, 248, 242))
                .fg(Color::Rgb(40, 42, 54)),
            panel_bg: Color::Rgb(33, 34, 44),
            muted: Color::Rgb(98, 114, 164),
            headings: [
                Color::Rgb(189, 147, 249),
                Color::Rgb(255, 121, 198),
                Color::Rgb(139, 233, 253),
                Color::Rgb(80, 250, 123),
            ],
            code: Color::Rgb(241, 250, 140),
            quote: Color::Rgb(98, 114, 164),
            link: Color::Rgb(139, 233, 253),
        }
    }

    /// Base style for a rendered preview line.
    pub fn block_style(&self, kind: &BlockKind) -> Style {
        let base = Style::default().fg(self.foreground);
        match kind {
            BlockKind::Heading(level) => {
                let idx = (usize::from(*level).saturating_sub(1)).min(3);
                let style = Style::default()
                    .fg(self.headings[idx])
                    .add_modifier(Modifier::BOLD);
                if *level == 1 {
                    style.add_modifier(Modifier::UNDERLINED)
                } else {
                    style
                }
            }
            BlockKind::CodeBlock => Style::default().fg(self.code),
            BlockKind::Quote => Style::default()
                .fg(self.quote)
                .add_modifier(Modifier::ITALIC),
            BlockKind::Rule => Style::default().fg(self.muted).add_modifier(Modifier::DIM),
            BlockKind::ListItem | BlockKind::Paragraph | BlockKind::Empty => base,
        }
    }

    /// Style for an inline span, merged with its line's base style.
    pub fn inline_style(&self, base: Style, span: &InlineSpan) -> Style {
        let mut style = base;
        if span.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if span.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if span.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if span.code {
            style = style.fg(self.code);
        }
        if span.link {
            style = style.fg(self.link).add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_covers_all_variants() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Dracula);
        assert_eq!(Theme::Dracula.next(), Theme::Light);
    }

    #[test]
    fn test_heading_styles_are_bold() {
        for theme in [Theme::Light, Theme::Dark, Theme::Dracula] {
            for level in 1..=6 {
                let style = theme.styles().block_style(&BlockKind::Heading(level));
                assert!(style.add_modifier.contains(Modifier::BOLD));
            }
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        let style = Theme::Dark.styles().block_style(&BlockKind::Heading(1));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_dracula_background_token() {
        let styles = Theme::Dracula.styles();
        assert_eq!(styles.background, Color::Rgb(40, 42, 54));
    }

    #[test]
    fn test_link_spans_are_underlined() {
        let styles = Theme::Light.styles();
        let span = InlineSpan {
            text: "example".to_string(),
            link: true,
            ..InlineSpan::default()
        };
        let style = styles.inline_style(Style::default(), &span);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }
}
