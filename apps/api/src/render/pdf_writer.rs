//! Serializes a [`LaidOutDocument`] into PDF bytes with `lopdf`.
//!
//! Layout works in millimetres from the top-left corner; PDF user space is
//! points from the bottom-left, so every coordinate is scaled and flipped here.
//! Fonts are the standard Type1 Helvetica faces referenced by name, so nothing
//! is embedded and the output only depends on the drawing commands.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::errors::RenderError;
use crate::layout::canvas::{Align, DrawOp, LaidOutDocument, Paint};
use crate::layout::font_metrics::{get_metrics, FontStyle, PT_TO_MM};
use crate::layout::palette::Rgb;

/// Bezier control-point factor for quarter circles.
const KAPPA: f32 = 0.552_284_8;

const PRODUCER: &str = "reviewdoc";

pub fn write_pdf(doc: &LaidOutDocument, title: &str) -> Result<Vec<u8>, RenderError> {
    let page_w = doc.geometry.width_mm / PT_TO_MM;
    let page_h = doc.geometry.height_mm / PT_TO_MM;

    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();
    let resources_id = document.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in FontStyle::ALL {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    document.objects.insert(
        resources_id,
        Object::Dictionary(dictionary! { "Font" => fonts }),
    );

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let mut painter = PagePainter::new(doc.geometry.height_mm);
        for op in page.ops() {
            painter.draw(op);
        }
        let bytes = painter
            .finish()
            .encode()
            .map_err(|e| RenderError::RenderFailed(format!("content encoding failed: {e}")))?;
        let content_id = document.add_object(Stream::new(lopdf::Dictionary::new(), bytes));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    document.trailer.set("Root", catalog_id);

    // No creation date: identical input must give identical bytes.
    let info_id = document.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
    });
    document.trailer.set("Info", info_id);

    let mut out = Vec::new();
    document
        .save_to(&mut out)
        .map_err(|e| RenderError::RenderFailed(format!("PDF serialization failed: {e}")))?;
    Ok(out)
}

// ────────────────────────────────────────────────────────────────────────────
// Page painter
// ────────────────────────────────────────────────────────────────────────────

struct PagePainter {
    page_height_mm: f32,
    content: Content,
}

fn pt(mm: f32) -> f32 {
    mm / PT_TO_MM
}

fn color_operands(color: Rgb) -> Vec<Object> {
    color.unit().iter().map(|c| (*c).into()).collect()
}

impl PagePainter {
    fn new(page_height_mm: f32) -> Self {
        Self {
            page_height_mm,
            content: Content { operations: vec![] },
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    /// Top-down millimetre `y` to bottom-up points.
    fn flip(&self, y_mm: f32) -> f32 {
        pt(self.page_height_mm - y_mm)
    }

    fn draw(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Rect {
                x,
                y,
                w,
                h,
                radius,
                paint,
            } => {
                self.set_paint(paint);
                let x0 = pt(*x);
                let y0 = self.flip(y + h);
                self.rect_path(x0, y0, pt(*w), pt(*h), pt(*radius));
                self.paint_path(paint);
            }
            DrawOp::Circle { cx, cy, r, paint } => {
                self.set_paint(paint);
                let (cx, cy, r) = (pt(*cx), self.flip(*cy), pt(*r));
                self.circle_path(cx, cy, r);
                self.paint_path(paint);
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                self.op("w", vec![pt(*width).into()]);
                self.op("RG", color_operands(*color));
                self.op("m", vec![pt(*x1).into(), self.flip(*y1).into()]);
                self.op("l", vec![pt(*x2).into(), self.flip(*y2).into()]);
                self.op("S", vec![]);
            }
            DrawOp::Text {
                x,
                y,
                text,
                style,
                align,
            } => {
                if text.trim().is_empty() {
                    return;
                }
                let left = match align {
                    Align::Left => *x,
                    Align::Center => x - get_metrics(style.font).width_mm(text, style.size) / 2.0,
                };
                self.op("BT", vec![]);
                self.op(
                    "Tf",
                    vec![
                        Object::Name(style.font.resource_name().as_bytes().to_vec()),
                        style.size.into(),
                    ],
                );
                self.op("rg", color_operands(style.color));
                self.op("Td", vec![pt(left).into(), self.flip(*y).into()]);
                self.op(
                    "Tj",
                    vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
                );
                self.op("ET", vec![]);
            }
        }
    }

    fn set_paint(&mut self, paint: &Paint) {
        match paint {
            Paint::Fill(color) => self.op("rg", color_operands(*color)),
            Paint::Stroke { color, width } => {
                self.op("w", vec![pt(*width).into()]);
                self.op("RG", color_operands(*color));
            }
        }
    }

    fn paint_path(&mut self, paint: &Paint) {
        match paint {
            Paint::Fill(_) => self.op("f", vec![]),
            Paint::Stroke { .. } => self.op("S", vec![]),
        }
    }

    fn curve(&mut self, points: [f32; 6]) {
        self.op("c", points.iter().map(|v| (*v).into()).collect());
    }

    fn rect_path(&mut self, x0: f32, y0: f32, w: f32, h: f32, radius: f32) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        if r == 0.0 {
            self.op("re", vec![x0.into(), y0.into(), w.into(), h.into()]);
            return;
        }
        let (x1, y1) = (x0 + w, y0 + h);
        let k = r * KAPPA;
        self.op("m", vec![(x0 + r).into(), y0.into()]);
        self.op("l", vec![(x1 - r).into(), y0.into()]);
        self.curve([x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r]);
        self.op("l", vec![x1.into(), (y1 - r).into()]);
        self.curve([x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1]);
        self.op("l", vec![(x0 + r).into(), y1.into()]);
        self.curve([x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r]);
        self.op("l", vec![x0.into(), (y0 + r).into()]);
        self.curve([x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0]);
        self.op("h", vec![]);
    }

    fn circle_path(&mut self, cx: f32, cy: f32, r: f32) {
        let k = r * KAPPA;
        self.op("m", vec![(cx + r).into(), cy.into()]);
        self.curve([cx + r, cy + k, cx + k, cy + r, cx, cy + r]);
        self.curve([cx - k, cy + r, cx - r, cy + k, cx - r, cy]);
        self.curve([cx - r, cy - k, cx - k, cy - r, cx, cy - r]);
        self.curve([cx + k, cy - r, cx + r, cy - k, cx + r, cy]);
        self.op("h", vec![]);
    }
}

/// Encodes text for the WinAnsiEncoding standard fonts. Typographic
/// punctuation maps to its cp1252 slot; anything else outside Latin-1 becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::{Composer, TextStyle};
    use crate::layout::font_metrics::default_page_config;
    use crate::layout::palette::{PRIMARY, TEXT};

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    fn make_two_page_doc() -> LaidOutDocument {
        let mut composer = Composer::new(default_page_config());
        composer.fill_rect(0.0, 0.0, 210.0, 60.0, 0.0, PRIMARY);
        composer.start_page();
        composer.fill_rect(20.0, 30.0, 170.0, 12.0, 3.0, PRIMARY);
        composer.fill_circle(25.0, 50.0, 3.0, PRIMARY);
        composer.text(
            105.0,
            40.0,
            "Centered heading",
            TextStyle::new(FontStyle::Bold, 14.0, TEXT),
            Align::Center,
        );
        composer.finish()
    }

    #[test]
    fn test_output_is_a_pdf_with_expected_text() {
        let bytes = write_pdf(&make_two_page_doc(), "Sample").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, "Centered heading"));
        assert!(contains(&bytes, "Helvetica-Bold"));
        assert!(contains(&bytes, "WinAnsiEncoding"));
    }

    #[test]
    fn test_page_count_matches_layout() {
        let bytes = write_pdf(&make_two_page_doc(), "Sample").unwrap();
        let media_boxes = bytes.windows(8).filter(|w| *w == b"MediaBox").count();
        assert_eq!(media_boxes, 2);
    }

    #[test]
    fn test_output_is_deterministic() {
        let doc = make_two_page_doc();
        assert_eq!(
            write_pdf(&doc, "Sample").unwrap(),
            write_pdf(&doc, "Sample").unwrap()
        );
    }

    #[test]
    fn test_win_ansi_maps_typographic_punctuation() {
        assert_eq!(to_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(to_win_ansi("“q”"), vec![0x93, b'q', 0x94]);
        assert_eq!(to_win_ansi("é"), vec![0xE9]);
        assert_eq!(to_win_ansi("日"), vec![b'?']);
    }
}
