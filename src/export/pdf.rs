//! PDF export.
//!
//! Lays the rendered preview lines onto A4 pages with printpdf's builtin
//! Helvetica fonts. The same line renderer drives the on-screen preview, so
//! the PDF matches what the user sees modulo pagination.

use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tracing::debug;

use crate::preview::{self, BlockKind, PreviewLine};

/// Fixed export settings, matching the app's document styling.
#[derive(Debug, Clone, Copy)]
pub struct PdfOptions {
    /// Page margin on all sides.
    pub margin_mm: f32,
    /// Page width (A4 portrait).
    pub page_width_mm: f32,
    /// Page height (A4 portrait).
    pub page_height_mm: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
        }
    }
}

/// Body font size in points.
const BODY_PT: f32 = 11.0;
/// Heading font sizes by level (H1..H3, deeper levels use H3's).
const HEADING_PT: [f32; 3] = [16.0, 14.0, 12.0];
/// Code font size in points.
const CODE_PT: f32 = 9.5;
/// Line height as a multiple of font size.
const LINE_HEIGHT: f32 = 1.35;
/// Points per millimeter.
const PT_PER_MM: f32 = 72.0 / 25.4;
/// Approximate average glyph width as a fraction of font size (Helvetica).
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Export `content` as a PDF at `path`, titled with the document name.
///
/// Written atomically: the document is assembled in a temp file that is
/// renamed over the target only after a successful save.
pub fn export_pdf(content: &str, title: &str, path: &Path, options: &PdfOptions) -> Result<()> {
    let columns = wrap_columns(options);
    let lines = preview::render(content, columns);
    debug!(lines = lines.len(), columns, "laying out pdf");

    let bytes = render_document(&lines, title, options)?;
    super::write_atomic(path, &bytes)
        .with_context(|| format!("failed to export {}", path.display()))
}

/// How many body-font characters fit between the margins.
fn wrap_columns(options: &PdfOptions) -> u16 {
    let usable_mm = (options.page_width_mm - 2.0 * options.margin_mm).max(10.0);
    let char_mm = BODY_PT * GLYPH_WIDTH_RATIO / PT_PER_MM;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Both operands are small positive values.
    let cols = (usable_mm / char_mm) as u16;
    cols.max(20)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    mono: IndirectFontRef,
}

fn render_document(lines: &[PreviewLine], title: &str, options: &PdfOptions) -> Result<Vec<u8>> {
    let page_w = Mm(options.page_width_mm);
    let page_h = Mm(options.page_height_mm);
    let (doc, first_page, first_layer) = PdfDocument::new(title, page_w, page_h, "Layer 1");

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
        mono: doc.add_builtin_font(BuiltinFont::Courier)?,
    };

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let top = options.page_height_mm - options.margin_mm;
    let mut y_mm = top;

    for line in lines {
        let size_pt = font_size(&line.kind);
        let step_mm = size_pt * LINE_HEIGHT / PT_PER_MM;

        if y_mm - step_mm < options.margin_mm {
            let (page, new_layer) = doc.add_page(page_w, page_h, "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
            y_mm = top;
        }
        y_mm -= step_mm;

        if line.kind == BlockKind::Empty {
            continue;
        }
        draw_line(&layer, line, &fonts, size_pt, options.margin_mm, y_mm);
    }

    let mut out = BufWriter::new(Vec::new());
    doc.save(&mut out)?;
    out.into_inner()
        .map_err(|e| anyhow::anyhow!("pdf buffer flush: {e}"))
}

fn draw_line(
    layer: &PdfLayerReference,
    line: &PreviewLine,
    fonts: &Fonts,
    size_pt: f32,
    margin_mm: f32,
    y_mm: f32,
) {
    let mut x_mm = margin_mm;
    let char_mm = size_pt * GLYPH_WIDTH_RATIO / PT_PER_MM;

    for span in &line.spans {
        if span.text.is_empty() {
            continue;
        }
        let font = span_font(line, fonts, span.strong, span.emphasis, span.code);
        layer.use_text(span.text.clone(), size_pt, Mm(x_mm), Mm(y_mm), font);
        #[allow(clippy::cast_precision_loss)]
        // Span lengths are line-sized.
        let advance = span.text.chars().count() as f32 * char_mm;
        x_mm += advance;
    }
}

fn span_font<'a>(
    line: &PreviewLine,
    fonts: &'a Fonts,
    strong: bool,
    emphasis: bool,
    code: bool,
) -> &'a IndirectFontRef {
    if code || line.kind == BlockKind::CodeBlock {
        &fonts.mono
    } else if strong || matches!(line.kind, BlockKind::Heading(_)) {
        &fonts.bold
    } else if emphasis || line.kind == BlockKind::Quote {
        &fonts.italic
    } else {
        &fonts.regular
    }
}

const fn font_size(kind: &BlockKind) -> f32 {
    match kind {
        BlockKind::Heading(level) => {
            let idx = level.saturating_sub(1);
            HEADING_PT[if idx > 2 { 2 } else { idx as usize }]
        }
        BlockKind::CodeBlock => CODE_PT,
        _ => BODY_PT,
    }
}
