//! PDF document output.
//!
//! Same layout as [`TextPresenter`](super::TextPresenter): the title, the time
//! the document was generated, then `key: value` lines, one block per row.
//! Long reports continue on further A4 pages.

use super::Report;
use crate::error::{Error, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 20.0;
const INDENT: f32 = 8.0;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 7.0;

/// Writes a [`Report`] as a PDF document.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    generated_at: DateTime<Tz>,
}

/// Text cursor over the pages of a document.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl PageCursor<'_> {
    /// Write one line at `x`, starting a new page when the bottom margin is reached.
    fn line(&mut self, text: &str, x: f32, size: f32, font: &IndirectFontRef) {
        if self.y < MARGIN {
            self.pages += 1;
            let (page, layer) =
                self.doc
                    .add_page(PAGE_WIDTH, PAGE_HEIGHT, format!("Page {}", self.pages));
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT.0 - MARGIN;
        }
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    fn skip(&mut self) {
        self.y -= LINE_HEIGHT / 2.0;
    }
}

fn pdf_error<E: std::fmt::Debug>(e: E) -> Error {
    Error::Output(format!("PDF: {e:?}"))
}

impl PdfWriter {
    pub fn new(generated_at: DateTime<Tz>) -> PdfWriter {
        PdfWriter { generated_at }
    }

    /// Lay the report out and return the encoded document.
    ///
    /// # Arguments
    /// * `report` - The report to write
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The PDF file content
    /// * `Err(Error::Output)` - If a font cannot be embedded or the document cannot be encoded
    pub fn write(&self, report: &Report) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(&report.title, PAGE_WIDTH, PAGE_HEIGHT, "Page 1");
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;

        let pages = {
            let mut cursor = PageCursor {
                doc: &doc,
                layer: doc.get_page(page).get_layer(layer),
                y: PAGE_HEIGHT.0 - MARGIN,
                pages: 1,
            };
            cursor.line(&report.title, MARGIN, TITLE_SIZE, &bold);
            cursor.line(
                &format!(
                    "Generated: {}",
                    self.generated_at.format("%Y-%m-%d %H:%M:%S %Z")
                ),
                MARGIN,
                BODY_SIZE,
                &regular,
            );

            let numbered = report.rows.len() > 1;
            for i in 0..report.rows.len() {
                cursor.skip();
                let x = if numbered {
                    cursor.line(&format!("{}:", i + 1), MARGIN, BODY_SIZE, &bold);
                    MARGIN + INDENT
                } else {
                    MARGIN
                };
                for (key, value) in report.fields(i) {
                    cursor.line(&format!("{key}: {value}"), x, BODY_SIZE, &regular);
                }
            }
            cursor.pages
        };
        log::debug!("PdfWriter: '{}' {} rows on {pages} pages", report.title, report.rows.len());

        doc.save_to_bytes().map_err(pdf_error)
    }
}
