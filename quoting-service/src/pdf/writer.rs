//! PDF layout with printpdf. The byte layout is not part of the contract;
//! only the textual content assembled in [`super::document`] is.

use crate::pdf::document::{QuoteDocument, TABLE_HEADER};
use anyhow::anyhow;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use service_core::error::AppError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const FOOTER_Y: f32 = 10.0;

// Column x positions of the line table.
const COL_QTY: f32 = 112.0;
const COL_UNIT_PRICE: f32 = 136.0;
const COL_DISCOUNT: f32 = 160.0;
const COL_TOTAL: f32 = 190.0;

struct Palette;

impl Palette {
    fn primary() -> Color {
        Color::Rgb(Rgb::new(0.39, 0.40, 0.95, None))
    }
    fn dark() -> Color {
        Color::Rgb(Rgb::new(0.12, 0.12, 0.16, None))
    }
    fn muted() -> Color {
        Color::Rgb(Rgb::new(0.47, 0.47, 0.55, None))
    }
}

struct PageWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    layer: PdfLayerReference,
    page_number: usize,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, AppError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "page");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::InternalError(anyhow!("failed to load font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::InternalError(anyhow!("failed to load font: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            regular,
            bold,
            layer,
            page_number: 1,
            y: PAGE_HEIGHT - 16.0,
        })
    }

    fn text(&self, content: &str, size: f32, x: f32, bold: bool, color: Color) {
        self.layer.set_fill_color(color);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(content, size, Mm(x), Mm(self.y), font);
    }

    /// Right-aligned text, approximated from Helvetica's average glyph width.
    fn text_right(&self, content: &str, size: f32, right_x: f32, bold: bool, color: Color) {
        let approx_width = content.chars().count() as f32 * size * 0.175;
        self.layer.set_fill_color(color);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(content, size, Mm(right_x - approx_width), Mm(self.y), font);
    }

    fn separator(&self, from_x: f32, to_x: f32) {
        self.layer.set_outline_color(Palette::primary());
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from_x), Mm(self.y)), false),
                (Point::new(Mm(to_x), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn footer(&mut self, footer_left: &str) {
        let saved = self.y;
        self.y = FOOTER_Y;
        self.text(footer_left, 7.0, MARGIN, false, Palette::muted());
        self.text_right(
            &format!("Page {}", self.page_number),
            7.0,
            PAGE_WIDTH - MARGIN,
            false,
            Palette::muted(),
        );
        self.y = saved;
    }

    fn new_page(&mut self, footer_left: &str) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "page");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_number += 1;
        self.y = PAGE_HEIGHT - MARGIN;
        self.footer(footer_left);
    }

    /// Move down, breaking the page when `needed` millimetres do not fit.
    fn advance(&mut self, needed: f32, footer_left: &str) {
        if self.y - needed < MARGIN + 8.0 {
            self.new_page(footer_left);
        } else {
            self.y -= needed;
        }
    }
}

/// Render a quote document to PDF bytes.
pub fn write_pdf(document: &QuoteDocument) -> Result<Vec<u8>, AppError> {
    let mut w = PageWriter::new(&document.reference)?;
    let footer_left = document.footer_left.clone();
    w.footer(&footer_left);

    // Header: brand and reference.
    w.text(&document.brand, 18.0, MARGIN, true, Palette::primary());
    w.text_right(&document.reference, 10.0, PAGE_WIDTH - MARGIN, false, Palette::muted());

    w.advance(14.0, &footer_left);
    w.text(&document.title, 26.0, MARGIN, true, Palette::dark());

    w.advance(8.0, &footer_left);
    w.text(&document.date_line, 9.0, MARGIN, false, Palette::muted());

    w.advance(5.0, &footer_left);
    w.separator(MARGIN, PAGE_WIDTH - MARGIN);

    // Issuer / client columns.
    let mid_x = PAGE_WIDTH / 2.0 + 5.0;
    w.advance(7.0, &footer_left);
    w.text("EMETTEUR", 7.5, MARGIN, true, Palette::primary());
    w.text("CLIENT", 7.5, mid_x, true, Palette::primary());

    let block_start = w.y;
    let mut y = block_start;
    for (i, line) in document.issuer.iter().enumerate() {
        w.y = y - 5.0;
        w.text(line, 9.0, MARGIN, i == 0, if i == 0 { Palette::dark() } else { Palette::muted() });
        y = w.y;
    }
    let issuer_end = w.y;
    let mut y = block_start;
    for (i, line) in document.client.iter().enumerate() {
        w.y = y - 5.0;
        w.text(line, 9.0, mid_x, i == 0, if i == 0 { Palette::dark() } else { Palette::muted() });
        y = w.y;
    }
    w.y = issuer_end.min(w.y);

    // Table header.
    w.advance(12.0, &footer_left);
    w.text(TABLE_HEADER[0], 8.0, MARGIN, true, Palette::dark());
    w.text(TABLE_HEADER[1], 8.0, COL_QTY, true, Palette::dark());
    w.text_right(TABLE_HEADER[2], 8.0, COL_UNIT_PRICE, true, Palette::dark());
    w.text(TABLE_HEADER[3], 8.0, COL_DISCOUNT, true, Palette::dark());
    w.text_right(TABLE_HEADER[4], 8.0, COL_TOTAL, true, Palette::dark());
    w.advance(2.0, &footer_left);
    w.separator(MARGIN, PAGE_WIDTH - MARGIN);

    // Table rows.
    for row in &document.rows {
        let needed = if row.description.is_some() { 10.0 } else { 6.0 };
        w.advance(needed, &footer_left);
        w.text(&row.label, 8.5, MARGIN, false, Palette::dark());
        w.text(&row.quantity, 8.5, COL_QTY, false, Palette::dark());
        w.text_right(&row.unit_price, 8.5, COL_UNIT_PRICE, false, Palette::dark());
        w.text(&row.discount, 8.5, COL_DISCOUNT, false, Palette::dark());
        w.text_right(&row.total, 8.5, COL_TOTAL, true, Palette::dark());
        if let Some(description) = &row.description {
            w.advance(4.0, &footer_left);
            w.text(description, 7.5, MARGIN, false, Palette::muted());
        }
    }

    // Totals block, kept on one page.
    let totals_height = document.totals.len() as f32 * 8.0 + 12.0;
    w.advance(14.0, &footer_left);
    if w.y - totals_height < MARGIN + 8.0 {
        w.new_page(&footer_left);
    }
    let box_x = PAGE_WIDTH - MARGIN - 90.0;
    for total in &document.totals {
        if total.emphasis {
            w.advance(3.0, &footer_left);
            w.separator(box_x, PAGE_WIDTH - MARGIN);
            w.advance(7.0, &footer_left);
            w.text(&total.label, 12.0, box_x, true, Palette::primary());
            w.text_right(&total.amount, 12.0, PAGE_WIDTH - MARGIN, true, Palette::primary());
        } else {
            w.text(&total.label, 9.0, box_x, false, Palette::dark());
            w.text_right(&total.amount, 9.0, PAGE_WIDTH - MARGIN, false, Palette::dark());
            w.advance(8.0, &footer_left);
        }
    }

    // Notes.
    if let Some(notes) = &document.notes {
        w.advance(16.0, &footer_left);
        w.text("NOTES", 8.0, MARGIN, true, Palette::primary());
        for line in notes.lines() {
            w.advance(5.0, &footer_left);
            w.text(line, 8.5, MARGIN, false, Palette::muted());
        }
    }

    // Legal footer on the last page.
    w.y = FOOTER_Y + 8.0;
    w.text(&document.legal_footer, 7.0, MARGIN, false, Palette::muted());

    let mut bytes = Vec::new();
    w.doc
        .save(&mut std::io::BufWriter::new(&mut bytes))
        .map_err(|e| AppError::InternalError(anyhow!("failed to write PDF: {}", e)))?;
    Ok(bytes)
}
