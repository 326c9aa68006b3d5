//! PDF materialization of draw instructions.
//!
//! Emits a minimal single-page PDF: one Type1 Helvetica resource and one
//! uncompressed content stream holding the instructions in order. Keeping
//! the stream uncompressed lets tests assert directly on the visible text
//! bytes. Layout coordinates are top-left based and get flipped into the
//! PDF's bottom-left device space here; a text instruction's `y` means the
//! glyph top edge and is shifted down to the baseline.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::error::DocumentResult;
use crate::instruction::{DrawInstruction, TextAlign};
use crate::page::PageMetrics;
use crate::render::{Artifact, Materializer};
use crate::text::text_width;

const FONT_RESOURCE: Name<'static> = Name(b"F1");

/// Helvetica's baseline sits roughly 80% of the em below the glyph top.
const BASELINE_FACTOR: f32 = 0.8;

/// Production materializer backed by `pdf-writer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfMaterializer;

impl PdfMaterializer {
    pub fn new() -> Self {
        Self
    }
}

impl Materializer for PdfMaterializer {
    fn materialize(
        &self,
        page: &PageMetrics,
        instructions: &[DrawInstruction],
    ) -> DocumentResult<Artifact> {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let font_id = Ref::new(4);
        let content_id = Ref::new(5);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        {
            let mut page_writer = pdf.page(page_id);
            page_writer
                .media_box(Rect::new(0.0, 0.0, page.width, page.height))
                .parent(page_tree_id)
                .contents(content_id);
            page_writer
                .resources()
                .fonts()
                .pair(FONT_RESOURCE, font_id);
        }

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        let content = encode_content(page, instructions);
        pdf.stream(content_id, &content.finish());

        Ok(Artifact::new(pdf.finish()))
    }
}

fn encode_content(page: &PageMetrics, instructions: &[DrawInstruction]) -> Content {
    let mut content = Content::new();

    for instruction in instructions {
        match instruction {
            DrawInstruction::Text {
                content: run,
                x,
                y,
                size,
                color,
                align,
            } => {
                let anchor = anchored_x(*x, run, *size, *align);
                let baseline = page.height - (y + BASELINE_FACTOR * size);
                let bytes = to_winansi(run);
                content.save_state();
                content.set_fill_rgb(color.r, color.g, color.b);
                content
                    .begin_text()
                    .set_font(FONT_RESOURCE, *size)
                    .next_line(anchor, baseline)
                    .show(Str(&bytes))
                    .end_text();
                content.restore_state();
            }
            DrawInstruction::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                content.save_state();
                content.set_stroke_rgb(color.r, color.g, color.b);
                content.set_line_width(*width);
                content.move_to(*x1, page.height - y1);
                content.line_to(*x2, page.height - y2);
                content.stroke();
                content.restore_state();
            }
            DrawInstruction::FilledRect { x, y, w, h, color } => {
                content.save_state();
                content.set_fill_rgb(color.r, color.g, color.b);
                content.rect(*x, page.height - y - h, *w, *h);
                content.fill_nonzero();
                content.restore_state();
            }
        }
    }

    content
}

/// Left edge of a run after applying its alignment to the anchor `x`.
fn anchored_x(x: f32, run: &str, size: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => x,
        TextAlign::Center => x - text_width(run, size) / 2.0,
        TextAlign::Right => x - text_width(run, size),
    }
}

/// Map text to WinAnsi (CP1252) bytes for the built-in font.
///
/// Latin-1 maps through; the CP1252 specials (curly quotes, dashes, euro)
/// are remapped; anything else prints `?`.
fn to_winansi(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn winansi_byte(c: char) -> u8 {
    match c {
        '\u{0020}'..='\u{007e}' => c as u8,
        '\u{00a0}'..='\u{00ff}' => (c as u32) as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        _ => b'?',
    }
}
