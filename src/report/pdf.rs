use anyhow::{Context, Result};
use chrono::NaiveDate;
use encoding_rs::WINDOWS_1252;
use log::debug;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use crate::domain::models::OpeningCount;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BODY_TOP_MM: f32 = 25.0;
// Body text never runs into the footer band.
const BODY_BOTTOM_MM: f32 = 277.0;
const NOTES_BOX_HEIGHT_MM: f32 = 60.0;

const HEADER_TITLE: &str = "FICHE DE PREPARATION - MATCH";
const WHITE_SECTION_TITLE: &str = "AVEC LES BLANCS (Il joue...)";
const BLACK_SECTION_TITLE: &str = "AVEC LES NOIRS (Il defend...)";
const NO_DATA_LINE: &str = "Pas assez de donnees.";
const NOTES_TITLE: &str = "NOTES DU COACH :";

const SUBSTITUTION: char = '?';
// Average Helvetica glyph width relative to the font size, used to
// center text set in a builtin font.
const GLYPH_WIDTH_RATIO: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;

/// Render the match preparation sheet for one opponent.
///
/// A4 portrait, one header and footer per page, identity block, one
/// repertoire section per color, and a shaded free-form notes area. An
/// empty or absent table renders the fixed no-data line. The document is
/// returned complete; nothing is streamed.
pub fn render_report(
    target_name: &str,
    handle: &str,
    white: Option<&[OpeningCount]>,
    black: Option<&[OpeningCount]>,
    generated_on: NaiveDate,
) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Fiche de preparation",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = ReportFonts::load(&doc)?;
    let stamp = format!("Genere le {} par MasterCoach App", generated_on);

    let first_layer = doc.get_page(page).get_layer(layer);
    let mut cursor = PageCursor::start(&doc, &fonts, &stamp, first_layer);

    cursor.text_line(&format!("Adversaire : {}", encode_safe(target_name)), FontStyle::Regular, 12.0, 10.0);
    cursor.text_line(&format!("Pseudo Lichess : {}", encode_safe(handle)), FontStyle::Regular, 12.0, 10.0);
    cursor.rule();
    cursor.gap(10.0);

    render_section(&mut cursor, WHITE_SECTION_TITLE, white);
    cursor.gap(5.0);
    render_section(&mut cursor, BLACK_SECTION_TITLE, black);
    cursor.gap(10.0);

    cursor.text_line(NOTES_TITLE, FontStyle::Bold, 12.0, 10.0);
    cursor.notes_box();

    doc.save_to_bytes().context("Failed to serialize report document")
}

/// Download filename for one opponent, spaces replaced so the name stays
/// a single token.
pub fn report_filename(target_name: &str) -> String {
    format!("prepa_{}.pdf", target_name.trim().replace(' ', "_"))
}

/// Replace every character the document character set cannot represent.
/// Rendering never fails on exotic input; it substitutes and continues.
pub fn encode_safe(text: &str) -> String {
    let (_, _, had_errors) = WINDOWS_1252.encode(text);
    if !had_errors {
        return text.to_string();
    }
    debug!("Substituting unencodable characters in '{}'", text);
    text.chars()
        .map(|c| {
            let mut buf = [0u8; 4];
            let (_, _, bad) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
            if bad {
                SUBSTITUTION
            } else {
                c
            }
        })
        .collect()
}

fn render_section(cursor: &mut PageCursor, title: &str, table: Option<&[OpeningCount]>) {
    cursor.text_line(title, FontStyle::Bold, 14.0, 10.0);
    match table {
        Some(rows) if !rows.is_empty() => {
            for row in rows {
                let line = format!("- {} ({}x)", encode_safe(&row.opening), row.games);
                cursor.text_line(&line, FontStyle::Regular, 11.0, 8.0);
            }
        }
        _ => cursor.text_line(NO_DATA_LINE, FontStyle::Regular, 11.0, 8.0),
    }
}

// --- Fonts ---

#[derive(Clone, Copy)]
enum FontStyle {
    Regular,
    Bold,
    Italic,
}

struct ReportFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl ReportFonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        Ok(Self {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .context("Failed to load report font")?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .context("Failed to load report bold font")?,
            italic: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .context("Failed to load report italic font")?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

// --- Page Layout ---

/// Tracks a top-down write position on the current page and opens a new
/// page, with header and footer redrawn, whenever a block would cross
/// into the footer band.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a ReportFonts,
    stamp: &'a str,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn start(
        doc: &'a PdfDocumentReference,
        fonts: &'a ReportFonts,
        stamp: &'a str,
        layer: PdfLayerReference,
    ) -> Self {
        let mut cursor = Self {
            doc,
            fonts,
            stamp,
            layer,
            y: BODY_TOP_MM,
        };
        cursor.decorate_page();
        cursor
    }

    /// Header and footer for the current page.
    fn decorate_page(&mut self) {
        self.centered_text(HEADER_TITLE, FontStyle::Bold, 16.0, MARGIN_MM + 7.0);
        self.centered_text(self.stamp, FontStyle::Italic, 8.0, PAGE_HEIGHT_MM - 10.0);
    }

    fn break_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = BODY_TOP_MM;
        self.decorate_page();
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y + needed > BODY_BOTTOM_MM {
            self.break_page();
        }
    }

    /// One full-width text cell of the given height, top-aligned at the
    /// current position.
    fn text_line(&mut self, text: &str, style: FontStyle, size: f32, height: f32) {
        self.ensure_room(height);
        let baseline = self.y + height * 0.7;
        self.layer.use_text(
            text,
            size,
            Mm(MARGIN_MM),
            Mm(flip_y(baseline)),
            self.fonts.get(style),
        );
        self.y += height;
    }

    /// Text centered on the page width at a fixed vertical position,
    /// without moving the cursor.
    fn centered_text(&mut self, text: &str, style: FontStyle, size: f32, at_y: f32) {
        let width = text.chars().count() as f32 * size * GLYPH_WIDTH_RATIO * PT_TO_MM;
        let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
        self.layer.use_text(
            text,
            size,
            Mm(x),
            Mm(flip_y(at_y)),
            self.fonts.get(style),
        );
    }

    /// Horizontal rule across the body width at the current position.
    fn rule(&mut self) {
        self.ensure_room(1.0);
        let y = flip_y(self.y);
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(y)), false),
                (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(line);
    }

    fn gap(&mut self, height: f32) {
        self.y += height;
    }

    /// Shaded rectangle reserved for handwritten coach notes.
    fn notes_box(&mut self) {
        self.ensure_room(NOTES_BOX_HEIGHT_MM);
        let grey = 240.0 / 255.0;
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(grey, grey, grey, None)));
        let rect = Rect::new(
            Mm(MARGIN_MM),
            Mm(flip_y(self.y + NOTES_BOX_HEIGHT_MM)),
            Mm(PAGE_WIDTH_MM - MARGIN_MM),
            Mm(flip_y(self.y)),
        )
        .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
        // Back to black so any further text paints normally.
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.y += NOTES_BOX_HEIGHT_MM;
    }
}

// PDF user space grows upward; the layout above counts down from the top.
fn flip_y(from_top: f32) -> f32 {
    PAGE_HEIGHT_MM - from_top
}
