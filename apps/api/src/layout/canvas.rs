//! Page-drawing commands and the cursor-driven composer that places blocks.
//!
//! Coordinates are millimetres from the top-left page corner; text `y` is the
//! baseline. The composer owns a single [`RenderCursor`] for one render pass.
//! A block is measured before it is placed: if it does not fit below the
//! cursor the composer opens a fresh page, so blocks are never split. The only
//! exception is a block taller than a whole empty page, which is flowed line
//! by line through [`Composer::flow_lines`].

use tracing::warn;

use crate::layout::font_metrics::{get_metrics, FontStyle, PageConfig, PT_TO_MM};
use crate::layout::palette::Rgb;
use crate::layout::wrap::wrap_text;

// ────────────────────────────────────────────────────────────────────────────
// Drawing commands
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Rgb),
    Stroke { color: Rgb, width: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: FontStyle, size: f32, color: Rgb) -> Self {
        Self { font, size, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        paint: Paint,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        paint: Paint,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
        align: Align,
    },
}

/// One output page. `chrome` holds the running header / closing footer stamped
/// after the page count is known.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub content: Vec<DrawOp>,
    pub chrome: Vec<DrawOp>,
}

impl Page {
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.content.iter().chain(self.chrome.iter())
    }
}

/// Where a block landed. `height` is the exact cursor advance it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub label: String,
    pub page: usize,
    pub end_page: usize,
    pub top: f32,
    pub height: f32,
    pub oversize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    pub page: usize,
    pub y: f32,
}

/// The laid-out document: pages of drawing commands plus the placement log.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub geometry: PageConfig,
    pub pages: Vec<Page>,
    pub blocks: Vec<PlacedBlock>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement helpers
// ────────────────────────────────────────────────────────────────────────────

/// Vertical advance of one wrapped line.
pub fn line_height(size_pt: f32, spacing: f32) -> f32 {
    size_pt * 0.35 * spacing
}

/// Offset from the top of a line box to its baseline.
pub fn ascent(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 0.75
}

pub fn wrap(text: &str, style: &TextStyle, max_width_mm: f32) -> Vec<String> {
    wrap_text(text, get_metrics(style.font), style.size, max_width_mm)
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

pub struct Composer {
    geometry: PageConfig,
    pages: Vec<Page>,
    blocks: Vec<PlacedBlock>,
    cursor: RenderCursor,
    /// Lowest `y` reached by placed content on the current page.
    content_end: f32,
    /// The last placed block is a heading that must share its page with the next one.
    keep_with_next: bool,
}

impl Composer {
    /// Starts on a free-form first page with the cursor at the very top.
    pub fn new(geometry: PageConfig) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            blocks: Vec::new(),
            cursor: RenderCursor { page: 0, y: 0.0 },
            content_end: 0.0,
            keep_with_next: false,
        }
    }

    #[cfg(test)]
    pub fn cursor(&self) -> RenderCursor {
        self.cursor
    }

    pub fn start_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = RenderCursor {
            page: self.pages.len() - 1,
            y: self.geometry.content_top(),
        };
        self.content_end = self.geometry.content_top();
        self.keep_with_next = false;
    }

    /// Nothing has been placed on the current page yet, so breaking would not help.
    fn at_page_top(&self) -> bool {
        self.cursor.y <= self.geometry.content_top()
    }

    /// Whether a block of `height` can be placed whole. Right after a lead
    /// block only the room left on the current page counts.
    pub fn fits(&self, height: f32) -> bool {
        if self.keep_with_next {
            self.cursor.y + height <= self.geometry.content_bottom()
        } else {
            height <= self.geometry.usable_height()
        }
    }

    /// Places a block of the given measured height and returns its top `y`.
    pub fn place(&mut self, label: impl Into<String>, height: f32) -> f32 {
        let label = label.into();
        if self.cursor.y + height > self.geometry.content_bottom() && !self.at_page_top() {
            self.start_page();
        }
        let oversize = height > self.geometry.usable_height();
        if oversize {
            warn!(block = %label, height, "block exceeds page height; drawing unsplit");
        }
        let top = self.cursor.y;
        self.blocks.push(PlacedBlock {
            label,
            page: self.cursor.page,
            end_page: self.cursor.page,
            top,
            height,
            oversize,
        });
        self.cursor.y += height;
        self.content_end = self.cursor.y;
        self.keep_with_next = false;
        top
    }

    /// Opens a new page unless `height` fits below the cursor.
    pub fn keep_together(&mut self, height: f32) {
        if self.cursor.y + height > self.geometry.content_bottom() && !self.at_page_top() {
            self.start_page();
        }
    }

    /// Places a heading block that the next block must follow on the same
    /// page. Call [`Composer::keep_together`] first with the combined height.
    pub fn place_lead(&mut self, label: impl Into<String>, height: f32) -> f32 {
        let top = self.place(label, height);
        self.keep_with_next = true;
        top
    }

    /// Moves the cursor down without placing anything, e.g. inter-block spacing.
    pub fn advance(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    /// Ensures placed content on the current page ends above `limit`, opening
    /// a new page otherwise. Trailing spacing does not count. Used to keep the
    /// closing footer clear of content.
    pub fn reserve_below(&mut self, limit: f32) {
        if self.content_end > limit {
            self.start_page();
        }
    }

    /// Flows lines that cannot be placed whole. Starts on a fresh page, or
    /// directly below a lead block, and breaks wherever the next line would
    /// cross the bottom margin.
    pub fn flow_lines(
        &mut self,
        label: impl Into<String>,
        lines: &[(String, TextStyle)],
        x: f32,
        line_h: f32,
    ) {
        let label = label.into();
        warn!(
            block = %label,
            lines = lines.len(),
            "block taller than a page; flowing across pages"
        );
        if !self.at_page_top() && !self.keep_with_next {
            self.start_page();
        }
        self.keep_with_next = false;
        let page = self.cursor.page;
        let top = self.cursor.y;
        let mut consumed = 0.0_f32;

        for (text, style) in lines {
            if self.cursor.y + line_h > self.geometry.content_bottom() {
                consumed += self.geometry.content_bottom() - self.cursor.y;
                self.start_page();
            }
            if !text.is_empty() {
                let baseline = self.cursor.y + ascent(style.size);
                self.text(x, baseline, text, *style, Align::Left);
            }
            self.cursor.y += line_h;
            consumed += line_h;
        }
        self.content_end = self.cursor.y;

        self.blocks.push(PlacedBlock {
            label,
            page,
            end_page: self.cursor.page,
            top,
            height: consumed,
            oversize: true,
        });
    }

    // ── drawing ──

    fn push(&mut self, op: DrawOp) {
        let page = self.cursor.page;
        self.pages[page].content.push(op);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Rgb) {
        self.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            radius,
            paint: Paint::Fill(color),
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Rgb,
        width: f32,
    ) {
        self.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            radius,
            paint: Paint::Stroke { color, width },
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        self.push(DrawOp::Circle {
            cx,
            cy,
            r,
            paint: Paint::Fill(color),
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, width: f32) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        });
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle, align: Align) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style,
            align,
        });
    }

    /// Draws pre-wrapped lines starting with a line box at `top`.
    pub fn text_lines(&mut self, x: f32, top: f32, lines: &[String], style: TextStyle, line_h: f32) {
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top + i as f32 * line_h + ascent(style.size);
            self.text(x, baseline, line, style, Align::Left);
        }
    }

    pub fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            geometry: self.geometry,
            pages: self.pages,
            blocks: self.blocks,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
