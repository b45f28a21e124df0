//! Single-page PDF writer for a [`StatementLayout`].
//!
//! All geometry is in PDF points with the origin at the bottom-left corner of an
//! A5 landscape page. No money passes through here, only coordinates.
#![allow(clippy::float_arithmetic)]

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use super::error::StatementError;
use super::layout::{StatementLayout, StatementRow};
use super::metrics::{Face, text_width, wrap_text};

const MM_PER_PT: f32 = 25.4 / 72.0;

// A5 landscape.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 419.53;

const MARGIN_LEFT: f32 = 25.0;
const MARGIN_RIGHT: f32 = 25.0;
const MARGIN_TOP: f32 = 25.0;
const FRAME_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

// Header block.
const HEADER_PADDING: f32 = 5.0;
const HEADER_TITLE_SIZE: f32 = 12.0;
const HEADER_TITLE_LEADING: f32 = 14.0;
const HEADER_SUBTITLE_SIZE: f32 = 10.0;
const HEADER_SUBTITLE_LEADING: f32 = 12.0;
const HEADER_GAP: f32 = 8.0;

// Line-item table.
const COLUMN_WIDTHS: [f32; 3] = [170.0, 190.0, 100.0];
const TABLE_FONT_SIZE: f32 = 9.5;
const CELL_PADDING_X: f32 = 6.0;
const CELL_PADDING_TOP: f32 = 2.0;
const CELL_PADDING_BOTTOM: f32 = 3.0;
const RULE_WIDTH: f32 = 1.0;

// Footer.
const FOOTER_GAP: f32 = 6.0;
const FOOTER_SIZE: f32 = 8.0;

const LIGHT_GREY: (f32, f32, f32) = (0.827, 0.827, 0.827);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

fn mm(pt: f32) -> Mm {
    Mm(pt * MM_PER_PT)
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Renders `layout` to PDF bytes.
pub(crate) fn render(layout: &StatementLayout) -> Result<Vec<u8>, StatementError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("{} {}", layout.title, layout.business_line),
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "statement",
    );

    {
        let canvas = Canvas {
            layer: doc.get_page(page).get_layer(layer),
            fonts: Fonts::load(&doc)?,
        };

        let below_header = canvas.header_block(layout, PAGE_HEIGHT - MARGIN_TOP);
        let below_table = canvas.table(&layout.rows, below_header - HEADER_GAP);
        canvas.footer(&layout.footer, below_table - FOOTER_GAP);
    }

    doc.save_to_bytes()
        .map_err(|e| StatementError::Pdf(e.to_string()))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, StatementError> {
        let load = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| StatementError::Pdf(e.to_string()))
        };

        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            oblique: load(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Oblique => &self.oblique,
        }
    }
}

struct Canvas {
    layer: PdfLayerReference,
    fonts: Fonts,
}

impl Canvas {
    fn fill_rect(&self, left: f32, bottom: f32, right: f32, top: f32) {
        self.layer.set_fill_color(rgb(LIGHT_GREY));
        self.layer.add_rect(
            Rect::new(mm(left), mm(bottom), mm(right), mm(top)).with_mode(PaintMode::Fill),
        );
        self.layer.set_fill_color(rgb(BLACK));
    }

    fn rule(&self, left: f32, right: f32, y: f32) {
        self.layer.set_outline_color(rgb(BLACK));
        self.layer.set_outline_thickness(RULE_WIDTH);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(mm(left), mm(y)), false),
                (Point::new(mm(right), mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn text(&self, text: &str, face: Face, size: f32, x: f32, baseline: f32) {
        if text.is_empty() {
            return;
        }
        self.layer
            .use_text(text, size, mm(x), mm(baseline), self.fonts.get(face));
    }

    fn text_centered(&self, text: &str, face: Face, size: f32, center: f32, baseline: f32) {
        let x = center - text_width(text, face, size) / 2.0;
        self.text(text, face, size, x, baseline);
    }

    fn text_right(&self, text: &str, face: Face, size: f32, right: f32, baseline: f32) {
        let x = right - text_width(text, face, size);
        self.text(text, face, size, x, baseline);
    }

    /// Draws the shaded header block, wrapping each line to the frame. Returns the y
    /// of its bottom edge.
    fn header_block(&self, layout: &StatementLayout, top: f32) -> f32 {
        let max_width = FRAME_WIDTH - 2.0 * HEADER_PADDING;
        let paragraphs: Vec<(Vec<String>, Face, f32, f32)> = [
            (
                layout.business_line.as_str(),
                Face::Oblique,
                HEADER_SUBTITLE_SIZE,
                HEADER_SUBTITLE_LEADING,
            ),
            (
                layout.title.as_str(),
                Face::Bold,
                HEADER_TITLE_SIZE,
                HEADER_TITLE_LEADING,
            ),
            (
                layout.period_line.as_str(),
                Face::Regular,
                HEADER_SUBTITLE_SIZE,
                HEADER_SUBTITLE_LEADING,
            ),
        ]
        .into_iter()
        .map(|(text, face, size, leading)| {
            (wrap_text(text, face, size, max_width), face, size, leading)
        })
        .collect();

        let paragraph_height = |lines: &[String], leading: f32| {
            let count = f32::from(u16::try_from(lines.len()).unwrap_or(u16::MAX));
            count * leading + 2.0 * HEADER_PADDING
        };

        let height: f32 = paragraphs
            .iter()
            .map(|(lines, _, _, leading)| paragraph_height(lines, *leading))
            .sum();
        let bottom = top - height;
        self.fill_rect(MARGIN_LEFT, bottom, MARGIN_LEFT + FRAME_WIDTH, top);

        let center = MARGIN_LEFT + FRAME_WIDTH / 2.0;
        let mut paragraph_top = top;
        for (lines, face, size, leading) in &paragraphs {
            let mut baseline = paragraph_top - HEADER_PADDING - size;
            for line in lines {
                self.text_centered(line, *face, *size, center, baseline);
                baseline -= leading;
            }
            paragraph_top -= paragraph_height(lines, *leading);
        }

        bottom
    }

    /// Draws the line-item table centred in the frame. Returns the y of its bottom edge.
    fn table(&self, rows: &[StatementRow], top: f32) -> f32 {
        let table_width: f32 = COLUMN_WIDTHS.iter().sum();
        let left = MARGIN_LEFT + (FRAME_WIDTH - table_width) / 2.0;
        let right = left + table_width;
        let row_height = CELL_PADDING_TOP + TABLE_FONT_SIZE * 1.2 + CELL_PADDING_BOTTOM;

        let label_x = left + CELL_PADDING_X;
        let sub_label_x = left + COLUMN_WIDTHS[0] + CELL_PADDING_X;
        let amount_right = right - CELL_PADDING_X;

        let mut row_top = top;
        for row in rows {
            let row_bottom = row_top - row_height;
            let style = row.style;

            if style.is_shaded() {
                self.fill_rect(left, row_bottom, right, row_top);
            }
            if style.has_rule_above() {
                self.rule(left, right, row_top);
            }
            if style.has_rule_below() {
                self.rule(left, right, row_bottom);
            }

            let face = if style.is_bold() {
                Face::Bold
            } else {
                Face::Regular
            };
            let baseline = row_bottom + CELL_PADDING_BOTTOM + TABLE_FONT_SIZE * 0.25;

            self.text(&row.label, face, TABLE_FONT_SIZE, label_x, baseline);
            self.text(&row.sub_label, face, TABLE_FONT_SIZE, sub_label_x, baseline);
            self.text_right(&row.amount, face, TABLE_FONT_SIZE, amount_right, baseline);

            row_top = row_bottom;
        }

        row_top
    }

    fn footer(&self, text: &str, top: f32) {
        self.text(text, Face::Oblique, FOOTER_SIZE, MARGIN_LEFT, top - FOOTER_SIZE);
    }
}
