//! Greedy word wrap against the static font metrics.
//!
//! Block heights are derived from the line counts produced here, and the
//! drawing pass prints exactly these lines, so measurement and output never
//! disagree.

use crate::layout::font_metrics::{FontMetricTable, PT_TO_MM};

/// Wraps `text` into lines no wider than `max_width_mm` at `size_pt`.
///
/// Explicit newlines start a new paragraph; an empty paragraph between two
/// others is kept as an empty line. A word wider than the whole line is split
/// at character boundaries. Blank input yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // Work in em so the per-character sums match `measure_str` exactly.
    let max_width = max_width_mm / (size_pt * PT_TO_MM);
    let mut lines = Vec::new();

    for paragraph in text.trim_end().lines() {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_w = metrics.measure_str(word);
            let space_w = if current.is_empty() {
                0.0
            } else {
                metrics.space_width
            };

            if current_width + space_w + word_w <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if word_w <= max_width {
                current.push_str(word);
                current_width = word_w;
            } else {
                let (full, rest, rest_w) = split_long_word(word, metrics, max_width);
                lines.extend(full);
                current = rest;
                current_width = rest_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Breaks a word that cannot fit on one line into full-width chunks plus a
/// trailing remainder that later words may join.
fn split_long_word(
    word: &str,
    metrics: &FontMetricTable,
    max_width: f32,
) -> (Vec<String>, String, f32) {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0.0_f32;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let char_w = metrics.measure_str(c.encode_utf8(&mut buf));
        if !chunk.is_empty() && chunk_width + char_w > max_width {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0.0;
        }
        chunk.push(c);
        chunk_width += char_w;
    }

    (chunks, chunk, chunk_width)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
