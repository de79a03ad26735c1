//! Review report layout: one linear pass over a fixed block order.
//!
//! Order: cover, executive summary, detailed section analysis, clarification
//! questions, rewritten CV sections, strategic recommendations. The last three
//! are skipped entirely when the record has nothing for them. Every block is
//! measured from its wrapped line counts before it is placed. List headings
//! travel with their first item and section titles with their first block. Running headers and the closing footer are
//! stamped once the page count is known.

use tracing::debug;

use crate::errors::RenderError;
use crate::layout::canvas::{
    ascent, line_height, wrap, Align, Composer, DrawOp, LaidOutDocument, TextStyle,
};
use crate::layout::font_metrics::FontStyle;
use crate::layout::palette::{
    priority_tone, score_ratio, score_tier, score_tone, status_tone, Rgb, ACCENT, BACKGROUND,
    DANGER, LIGHT_GRAY, LIGHT_TEXT, MEDIUM_GRAY, PRIMARY, SECONDARY, SUCCESS, TEXT, WARNING,
    WHITE,
};
use crate::models::review::{
    CvReference, Example, ReviewRecord, SectionReview, MAX_SECTION_SCORE,
};
use crate::render::labels::{
    capitalize, format_score, job_role_display, long_date, markets_display,
};
use crate::render::{review_identity, RenderOptions};

// ────────────────────────────────────────────────────────────────────────────
// Fixed chrome dimensions (mm)
// ────────────────────────────────────────────────────────────────────────────

const COVER_BAND: f32 = 60.0;
const COVER_CARD_TOP: f32 = 80.0;
const COVER_CARD_HEIGHT: f32 = 50.0;
const COVER_TILE_TOP: f32 = 146.0;
const COVER_TILE_HEIGHT: f32 = 35.0;

const BANNER_HEIGHT: f32 = 12.0;
const BANNER_GAP: f32 = 8.0;

const BULLET_INDENT: f32 = 8.0;
const SECTION_TITLE_HEIGHT: f32 = 12.0;
const BADGE_HEIGHT: f32 = 8.0;
const SECTION_LIST_HEADING: f32 = 8.0;
const SECTION_ITEM_GAP: f32 = 3.0;
const JUSTIFICATION_GAP: f32 = 6.0;
const EXAMPLES_HEADING: f32 = 10.0;
const EXAMPLE_GAP: f32 = 6.0;

const HEADER_TEXT_Y: f32 = 10.0;
const HEADER_RULE_Y: f32 = 15.0;
/// Footer rule sits this far above the page bottom.
const FOOTER_RULE_OFFSET: f32 = 30.0;
/// Placed content must end at least this far above the page bottom on the last page.
const FOOTER_CLEARANCE: f32 = 32.0;

const BODY_SPACING: f32 = 1.5;
const BULLET_SPACING: f32 = 1.4;

const QUESTIONS_INTRO: &str =
    "To provide more targeted recommendations, please provide the following information:";
const REWRITTEN_INTRO: &str =
    "Below are improved versions of your CV sections incorporating our recommendations:";

fn regular(size: f32, color: Rgb) -> TextStyle {
    TextStyle::new(FontStyle::Regular, size, color)
}

fn bold(size: f32, color: Rgb) -> TextStyle {
    TextStyle::new(FontStyle::Bold, size, color)
}

fn oblique(size: f32, color: Rgb) -> TextStyle {
    TextStyle::new(FontStyle::Oblique, size, color)
}

fn non_blank(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
        .collect()
}

fn printable_examples(examples: &[Example]) -> Vec<&Example> {
    examples
        .iter()
        .filter(|e| {
            !(e.bad.trim().is_empty() && e.better.trim().is_empty() && e.why_better.trim().is_empty())
        })
        .collect()
}

/// One labelled part of an example box: label, label colour, text style, wrapped lines.
type ExamplePart<'e> = (&'e str, Rgb, TextStyle, Vec<String>);

/// Lays out the full report. Fails only on missing identity fields.
pub fn layout_review(
    record: &ReviewRecord,
    options: &RenderOptions,
) -> Result<LaidOutDocument, RenderError> {
    let identity = review_identity(record)?;

    let mut report = ReportLayout::new(record, identity.cv, options);
    report.cover();
    report.executive_summary();
    report.section_analysis();
    report.questions();
    report.rewritten_cv();
    report.strategic_notes();

    let page_height = report.page_h;
    report.c.reserve_below(page_height - FOOTER_CLEARANCE);
    let mut document = report.c.finish();

    let generated = options.generated_at.format("%d/%m/%Y").to_string();
    stamp_chrome(
        &mut document,
        identity.cv.full_name.trim(),
        &identity.short_id,
        &options.brand_line,
        &generated,
    );

    debug!(
        review_id = %record.id,
        pages = document.page_count(),
        blocks = document.blocks.len(),
        "Laid out review report"
    );
    Ok(document)
}

// ────────────────────────────────────────────────────────────────────────────
// Report layout pass
// ────────────────────────────────────────────────────────────────────────────

/// A bulleted list whose heading is kept on the same page as its first item.
struct BulletList<'s> {
    label: String,
    heading: &'s str,
    heading_style: TextStyle,
    heading_box: f32,
    item_gap: f32,
    tail_gap: f32,
}

struct ReportLayout<'a> {
    c: Composer,
    record: &'a ReviewRecord,
    cv: &'a CvReference,
    page_w: f32,
    page_h: f32,
    margin: f32,
    content_w: f32,
    content_top: f32,
}

impl<'a> ReportLayout<'a> {
    fn new(record: &'a ReviewRecord, cv: &'a CvReference, options: &RenderOptions) -> Self {
        let geometry = options.page.clone();
        Self {
            page_w: geometry.width_mm,
            page_h: geometry.height_mm,
            margin: geometry.margin_mm,
            content_w: geometry.content_width(),
            content_top: geometry.content_top(),
            c: Composer::new(geometry),
            record,
            cv,
        }
    }

    fn max_total(&self) -> f64 {
        self.record.max_total_score()
    }

    // ── cover ──

    fn cover(&mut self) {
        let (w, m, cw) = (self.page_w, self.margin, self.content_w);
        self.c.place("cover", COVER_TILE_TOP + COVER_TILE_HEIGHT);

        self.c.fill_rect(0.0, 0.0, w, COVER_BAND, 0.0, PRIMARY);
        self.c.fill_circle(w - 30.0, 30.0, 20.0, SECONDARY);
        self.c.fill_circle(30.0, 40.0, 15.0, ACCENT);
        self.c
            .text(w / 2.0, 40.0, "CV REVIEW REPORT", bold(28.0, WHITE), Align::Center);
        self.c.text(
            w / 2.0,
            50.0,
            "Professional Analysis & Recommendations",
            regular(14.0, WHITE),
            Align::Center,
        );

        self.c
            .fill_rect(m, COVER_CARD_TOP, cw, COVER_CARD_HEIGHT, 5.0, LIGHT_GRAY);
        self.c.stroke_rect(
            m,
            COVER_CARD_TOP,
            cw,
            COVER_CARD_HEIGHT,
            5.0,
            MEDIUM_GRAY,
            0.5,
        );
        self.c.text(
            m + 10.0,
            COVER_CARD_TOP + 15.0,
            self.cv.full_name.trim(),
            bold(18.0, PRIMARY),
            Align::Left,
        );

        let review_date = self
            .record
            .completed_at
            .as_deref()
            .map(long_date)
            .unwrap_or_default();
        let details = [
            ("Applying for", job_role_display(&self.cv.applying_for_job_role).to_string()),
            ("Target Markets", markets_display(&self.cv.target_markets)),
            ("Service Level", capitalize(&self.record.review_type)),
            ("Review Date", review_date),
        ];
        let mut y = COVER_CARD_TOP + 23.0;
        for (label, value) in details.iter().filter(|(_, v)| !v.trim().is_empty()) {
            self.c.text(
                m + 10.0,
                y,
                &format!("{label}: {value}"),
                regular(12.0, TEXT),
                Align::Left,
            );
            y += 6.0;
        }

        let tile_w = cw / 2.0 - 5.0;
        let right_x = m + cw / 2.0 + 5.0;
        self.c
            .fill_rect(m, COVER_TILE_TOP, tile_w, COVER_TILE_HEIGHT, 3.0, SECONDARY);
        self.c
            .fill_rect(right_x, COVER_TILE_TOP, tile_w, COVER_TILE_HEIGHT, 3.0, ACCENT);

        let left_center = m + tile_w / 2.0;
        let right_center = right_x + tile_w / 2.0;
        let label_y = COVER_TILE_TOP + 12.0;
        let value_y = COVER_TILE_TOP + 20.0;
        let summary = &self.record.global_summary;

        self.c.text(
            left_center,
            label_y,
            "OVERALL READINESS",
            bold(14.0, WHITE),
            Align::Center,
        );
        self.c.text(
            left_center,
            value_y,
            &summary.overall_readiness.trim().to_uppercase(),
            bold(16.0, WHITE),
            Align::Center,
        );
        self.c
            .text(right_center, label_y, "TOTAL SCORE", bold(14.0, WHITE), Align::Center);
        self.c.text(
            right_center,
            value_y,
            &format!(
                "{}/{}",
                format_score(summary.total_score),
                format_score(self.max_total())
            ),
            bold(16.0, WHITE),
            Align::Center,
        );
    }

    // ── shared blocks ──

    fn banner(&mut self, label: &str, title: &str, color: Rgb) {
        let (m, cw) = (self.margin, self.content_w);
        let top = self.c.place(label, BANNER_HEIGHT + BANNER_GAP);
        self.c.fill_rect(m, top, cw, BANNER_HEIGHT, 0.0, color);
        self.c
            .stroke_rect(m, top, cw, BANNER_HEIGHT, 0.0, MEDIUM_GRAY, 0.5);
        self.c
            .text(m + 8.0, top + 7.8, title, bold(14.0, WHITE), Align::Left);
    }

    /// A full-width paragraph with no chrome, e.g. a page introduction.
    fn paragraph(&mut self, label: &str, text: &str, style: TextStyle, gap: f32) {
        let lh = line_height(style.size, BODY_SPACING);
        let lines = wrap(text, &style, self.content_w);
        if lines.is_empty() {
            return;
        }
        let height = lines.len() as f32 * lh + gap;
        if !self.c.fits(height) {
            self.flow(label, &lines, style, self.margin, lh, gap);
            return;
        }
        let top = self.c.place(label, height);
        self.c.text_lines(self.margin, top, &lines, style, lh);
    }

    fn flow(&mut self, label: &str, lines: &[String], style: TextStyle, x: f32, lh: f32, gap: f32) {
        let styled: Vec<(String, TextStyle)> =
            lines.iter().map(|l| (l.clone(), style)).collect();
        self.c.flow_lines(label, &styled, x, lh);
        self.c.advance(gap);
    }

    fn bullet_list(&mut self, list: BulletList<'_>, items: &[(&str, Rgb)]) {
        if items.is_empty() {
            return;
        }
        let m = self.margin;
        let style = regular(10.0, TEXT);
        let lh = line_height(10.0, BULLET_SPACING);
        let text_x = m + BULLET_INDENT;

        for (i, (item, color)) in items.iter().enumerate() {
            let lines = self.bullet_lines(item);
            let item_h = lines.len() as f32 * lh + list.item_gap;
            let heading_h = if i == 0 { list.heading_box } else { 0.0 };
            let label = if i == 0 {
                list.label.clone()
            } else {
                format!("{}[{i}]", list.label)
            };

            if !self.c.fits(heading_h + item_h) {
                let mut styled = Vec::new();
                if heading_h > 0.0 {
                    styled.push((list.heading.to_string(), list.heading_style));
                }
                styled.extend(lines.into_iter().map(|l| (l, style)));
                self.c.flow_lines(label, &styled, text_x, lh);
                self.c.advance(list.item_gap);
                continue;
            }

            let mut top = self.c.place(label, heading_h + item_h);
            if heading_h > 0.0 {
                self.list_heading(&list, top);
                top += heading_h;
            }
            let baseline = top + ascent(10.0);
            self.c.fill_circle(m + 2.0, baseline - 1.2, 1.5, *color);
            self.c.text_lines(text_x, top, &lines, style, lh);
        }
        self.c.advance(list.tail_gap);
    }

    fn list_heading(&mut self, list: &BulletList<'_>, top: f32) {
        self.c.text(
            self.margin,
            top + ascent(list.heading_style.size),
            list.heading,
            list.heading_style,
            Align::Left,
        );
    }

    // ── executive summary ──

    fn executive_summary(&mut self) {
        self.c.start_page();
        self.banner("executive_summary", "EXECUTIVE SUMMARY", PRIMARY);

        let m = self.margin;
        let record = self.record;
        let summary = &record.global_summary;
        let max_total = self.max_total();
        let readiness = summary.overall_readiness.trim();

        let mut lines: Vec<(String, Rgb)> = Vec::new();
        if !readiness.is_empty() {
            let color = if readiness.eq_ignore_ascii_case("ready") {
                SUCCESS
            } else {
                WARNING
            };
            lines.push((format!("Status: {readiness}"), color));
        }
        let percent = (score_ratio(summary.total_score, max_total) * 100.0).round();
        lines.push((
            format!(
                "Total Score: {}/{} ({}%)",
                format_score(summary.total_score),
                format_score(max_total),
                percent as i64
            ),
            TEXT,
        ));

        let top = self
            .c
            .place("executive_summary.assessment", 8.0 + lines.len() as f32 * 6.0 + 9.0);
        self.c.text(
            m,
            top + ascent(12.0),
            "Overall Assessment:",
            bold(12.0, TEXT),
            Align::Left,
        );
        for (i, (line, color)) in lines.iter().enumerate() {
            let baseline = top + 8.0 + i as f32 * 6.0 + ascent(11.0);
            self.c
                .text(m + 5.0, baseline, line, regular(11.0, *color), Align::Left);
        }

        let fixes: Vec<(&str, Rgb)> = non_blank(&summary.priority_fixes)
            .into_iter()
            .enumerate()
            .map(|(i, fix)| (fix, priority_tone(i).color()))
            .collect();
        self.bullet_list(
            BulletList {
                label: "executive_summary.priorities".to_string(),
                heading: "PRIORITY ACTION ITEMS:",
                heading_style: bold(12.0, TEXT),
                heading_box: 10.0,
                item_gap: 4.0,
                tail_gap: 6.0,
            },
            &fixes,
        );

        let overview: Vec<(String, Rgb)> = summary
            .scoring_breakdown
            .iter()
            .filter(|s| !s.section_name.trim().is_empty())
            .map(|s| {
                let ratio = score_ratio(s.score, MAX_SECTION_SCORE);
                (
                    format!(
                        "{} - {} ({}/{})",
                        s.section_name.trim(),
                        score_tier(ratio).label(),
                        format_score(s.score),
                        format_score(MAX_SECTION_SCORE)
                    ),
                    score_tone(ratio).color(),
                )
            })
            .collect();
        let overview_items: Vec<(&str, Rgb)> =
            overview.iter().map(|(s, c)| (s.as_str(), *c)).collect();
        self.bullet_list(
            BulletList {
                label: "executive_summary.overview".to_string(),
                heading: "SECTION PERFORMANCE OVERVIEW:",
                heading_style: bold(12.0, TEXT),
                heading_box: 12.0,
                item_gap: 4.0,
                tail_gap: 6.0,
            },
            &overview_items,
        );
    }

    // ── detailed section analysis ──

    fn section_analysis(&mut self) {
        self.c.start_page();
        self.banner(
            "section_analysis",
            "DETAILED SECTION ANALYSIS",
            SECONDARY,
        );

        let record = self.record;
        let sections = &record.sections;
        for (i, section) in sections.iter().enumerate() {
            let label = format!("section_analysis[{i}]");
            let first_block = self.first_block_height(section);
            self.section_title(&label, i, section, first_block);
            self.justification(&label, &section.justification);

            let lists = [
                ("strengths", "STRENGTHS", SUCCESS, &section.strengths),
                ("weaknesses", "AREAS FOR IMPROVEMENT", DANGER, &section.weaknesses),
                ("edits", "ACTIONABLE RECOMMENDATIONS", ACCENT, &section.actionable_edits),
            ];
            for (key, heading, color, items) in lists {
                let items: Vec<(&str, Rgb)> =
                    non_blank(items).into_iter().map(|s| (s, color)).collect();
                self.section_list(&label, key, heading, color, &items);
            }

            self.examples(&label, &section.examples);

            let missing: Vec<(&str, Rgb)> = section
                .reportable_missing_content()
                .into_iter()
                .map(|s| (s, WARNING))
                .collect();
            self.section_list(&label, "missing", "MISSING ELEMENTS", WARNING, &missing);

            if i + 1 < sections.len() {
                self.c.advance(4.0);
                let top = self.c.place(format!("{label}.separator"), 10.0);
                let (m, w) = (self.margin, self.page_w);
                self.c.line(m, top + 2.0, w - m, top + 2.0, LIGHT_GRAY, 0.5);
            }
        }
    }

    fn section_list(&mut self, label: &str, key: &str, heading: &str, color: Rgb, items: &[(&str, Rgb)]) {
        self.bullet_list(
            BulletList {
                label: format!("{label}.{key}"),
                heading,
                heading_style: bold(11.0, color),
                heading_box: SECTION_LIST_HEADING,
                item_gap: SECTION_ITEM_GAP,
                tail_gap: 5.0,
            },
            items,
        );
    }

    /// Draws the numbered title and badges, kept on one page with the
    /// section's first block of `first_block` height.
    fn section_title(
        &mut self,
        label: &str,
        index: usize,
        section: &SectionReview,
        first_block: f32,
    ) {
        let style = bold(13.0, PRIMARY);
        let lh = line_height(13.0, 1.2);
        let title = format!("{}. {}", index + 1, section.name.trim());
        // Leave room for the two badges on the right.
        let lines = wrap(&title, &style, self.content_w - 65.0);
        let extra = lines.len().saturating_sub(1) as f32 * lh;
        let title_h = SECTION_TITLE_HEIGHT + extra;
        let block_label = format!("{label}.title");

        if !self.c.fits(title_h) {
            // Taller than a page: badges go at the top of a fresh page and the
            // title flows from there.
            self.c.keep_together(title_h);
            self.section_badges(self.content_top, section);
            let styled: Vec<(String, TextStyle)> =
                lines.into_iter().map(|l| (l, style)).collect();
            self.c.flow_lines(block_label, &styled, self.margin, lh);
            return;
        }

        self.c.keep_together(title_h + first_block);
        let top = self.c.place_lead(block_label, title_h);
        self.c.text_lines(self.margin, top, &lines, style, lh);
        self.section_badges(top, section);
    }

    fn section_badges(&mut self, top: f32, section: &SectionReview) {
        let (m, w) = (self.margin, self.page_w);

        let status = section.status.as_str().trim();
        if !status.is_empty() {
            let x = w - m - 60.0;
            self.c
                .fill_rect(x, top, 25.0, BADGE_HEIGHT, 2.0, status_tone(&section.status).color());
            self.c.text(
                x + 12.5,
                top + 5.5,
                &status.to_uppercase(),
                bold(8.0, WHITE),
                Align::Center,
            );
        }

        let x = w - m - 30.0;
        let tone = score_tone(score_ratio(section.score, MAX_SECTION_SCORE));
        self.c.fill_rect(x, top, 20.0, BADGE_HEIGHT, 3.0, tone.color());
        self.c
            .stroke_rect(x, top, 20.0, BADGE_HEIGHT, 3.0, WHITE, 0.5);
        self.c.text(
            x + 10.0,
            top + 5.7,
            &format!(
                "{}/{}",
                format_score(section.score),
                format_score(MAX_SECTION_SCORE)
            ),
            bold(9.0, WHITE),
            Align::Center,
        );
    }

    fn justification_lines(&self, justification: &str) -> Vec<String> {
        let justification = justification.trim();
        if justification.is_empty() {
            return Vec::new();
        }
        let style = oblique(10.0, LIGHT_TEXT);
        wrap(&format!("\"{justification}\""), &style, self.content_w - 16.0)
    }

    fn justification_box(lines: &[String]) -> f32 {
        (lines.len() as f32 * line_height(10.0, BODY_SPACING) + 6.0).max(15.0)
    }

    fn bullet_lines(&self, item: &str) -> Vec<String> {
        wrap(item, &regular(10.0, TEXT), self.content_w - BULLET_INDENT)
    }

    fn bullet_height(&self, item: &str, gap: f32) -> f32 {
        self.bullet_lines(item).len() as f32 * line_height(10.0, BULLET_SPACING) + gap
    }

    fn example_parts<'e>(&self, example: &'e Example) -> Vec<ExamplePart<'e>> {
        let text_w = self.content_w - 24.0;
        [
            ("BEFORE:", DANGER, regular(9.0, TEXT), example.bad.as_str()),
            ("AFTER:", SUCCESS, regular(9.0, TEXT), example.better.as_str()),
            ("WHY BETTER:", SECONDARY, oblique(9.0, LIGHT_TEXT), example.why_better.as_str()),
        ]
        .into_iter()
        .map(|(title, color, style, text)| (title, color, style, wrap(text, &style, text_w)))
        .filter(|(_, _, _, lines)| !lines.is_empty())
        .collect()
    }

    /// Padding, the "Example n:" title, then label + lines + spacing per part.
    fn example_box(parts: &[ExamplePart<'_>]) -> f32 {
        let lh = line_height(9.0, BODY_SPACING);
        4.0 + 8.0
            + parts
                .iter()
                .map(|(_, _, _, lines)| 5.0 + lines.len() as f32 * lh + 3.0)
                .sum::<f32>()
            + 2.0
    }

    /// Height of the first block drawn below a section title, in section order.
    fn first_block_height(&self, section: &SectionReview) -> f32 {
        let justification = self.justification_lines(&section.justification);
        if !justification.is_empty() {
            return Self::justification_box(&justification) + JUSTIFICATION_GAP;
        }
        let lists = [&section.strengths, &section.weaknesses, &section.actionable_edits];
        if let Some(first) = lists.into_iter().find_map(|items| non_blank(items).first().copied()) {
            return SECTION_LIST_HEADING + self.bullet_height(first, SECTION_ITEM_GAP);
        }
        if let Some(example) = printable_examples(&section.examples).first() {
            let parts = self.example_parts(example);
            return EXAMPLES_HEADING + Self::example_box(&parts) + EXAMPLE_GAP;
        }
        section
            .reportable_missing_content()
            .first()
            .map(|item| SECTION_LIST_HEADING + self.bullet_height(item, SECTION_ITEM_GAP))
            .unwrap_or(0.0)
    }

    fn justification(&mut self, label: &str, justification: &str) {
        let lines = self.justification_lines(justification);
        if lines.is_empty() {
            return;
        }
        let (m, cw) = (self.margin, self.content_w);
        let style = oblique(10.0, LIGHT_TEXT);
        let lh = line_height(10.0, BODY_SPACING);
        let box_h = Self::justification_box(&lines);
        let gap = JUSTIFICATION_GAP;
        let block_label = format!("{label}.justification");

        if !self.c.fits(box_h + gap) {
            self.flow(&block_label, &lines, style, m + 8.0, lh, gap);
            return;
        }
        let top = self.c.place(block_label, box_h + gap);
        self.c.fill_rect(m, top, cw, box_h, 3.0, BACKGROUND);
        self.c.text_lines(m + 8.0, top + 3.0, &lines, style, lh);
    }

    fn examples(&mut self, label: &str, examples: &[Example]) {
        let examples = printable_examples(examples);
        if examples.is_empty() {
            return;
        }

        let (m, cw) = (self.margin, self.content_w);
        let heading_style = bold(11.0, SECONDARY);
        let title_style = bold(10.0, SECONDARY);
        let lh = line_height(9.0, BODY_SPACING);
        let list_label = format!("{label}.examples");

        for (j, example) in examples.iter().enumerate() {
            let parts = self.example_parts(example);
            let box_h = Self::example_box(&parts);
            let gap = EXAMPLE_GAP;
            let heading_h = if j == 0 { EXAMPLES_HEADING } else { 0.0 };
            let block_label = if j == 0 {
                list_label.clone()
            } else {
                format!("{list_label}[{j}]")
            };
            let example_title = format!("Example {}:", j + 1);

            if !self.c.fits(heading_h + box_h + gap) {
                let mut styled = Vec::new();
                if heading_h > 0.0 {
                    styled.push(("BEFORE & AFTER EXAMPLES".to_string(), heading_style));
                }
                styled.push((example_title, title_style));
                for (title, color, style, lines) in &parts {
                    styled.push((title.to_string(), bold(10.0, *color)));
                    styled.extend(lines.iter().map(|l| (l.clone(), *style)));
                }
                self.c.flow_lines(block_label, &styled, m + 8.0, lh);
                self.c.advance(gap);
                continue;
            }

            let mut top = self.c.place(block_label, heading_h + box_h + gap);
            if heading_h > 0.0 {
                self.c.text(
                    m,
                    top + ascent(11.0),
                    "BEFORE & AFTER EXAMPLES",
                    heading_style,
                    Align::Left,
                );
                top += heading_h;
            }

            self.c.fill_rect(m, top, cw, box_h, 3.0, LIGHT_GRAY);
            self.c.stroke_rect(m, top, cw, box_h, 3.0, MEDIUM_GRAY, 0.3);

            let mut y = top + 4.0;
            self.c
                .text(m + 8.0, y + ascent(10.0), &example_title, title_style, Align::Left);
            y += 8.0;
            for (title, color, style, lines) in &parts {
                self.c
                    .text(m + 8.0, y + ascent(10.0), title, bold(10.0, *color), Align::Left);
                y += 5.0;
                self.c.text_lines(m + 12.0, y, lines, *style, lh);
                y += lines.len() as f32 * lh + 3.0;
            }
        }
    }

    // ── clarification questions ──

    fn questions(&mut self) {
        let record = self.record;
        let questions = non_blank(&record.global_summary.questions);
        if questions.is_empty() {
            return;
        }
        self.c.start_page();
        self.banner("questions", "CLARIFICATION QUESTIONS", ACCENT);
        self.paragraph("questions.intro", QUESTIONS_INTRO, regular(11.0, TEXT), 8.0);

        let m = self.margin;
        let style = regular(10.0, TEXT);
        let lh = line_height(10.0, BODY_SPACING);
        for (i, question) in questions.iter().enumerate() {
            let label = format!("questions[{i}]");
            let lines = wrap(question, &style, self.content_w - 12.0);
            let height = lines.len() as f32 * lh + 5.0;
            if !self.c.fits(height) {
                self.flow(&label, &lines, style, m + 12.0, lh, 5.0);
                continue;
            }
            let top = self.c.place(label, height);
            let baseline = top + ascent(10.0);
            self.c.fill_circle(m + 5.0, baseline - 1.2, 3.0, ACCENT);
            self.c.text(
                m + 5.0,
                baseline,
                &(i + 1).to_string(),
                bold(9.0, WHITE),
                Align::Center,
            );
            self.c.text_lines(m + 12.0, top, &lines, style, lh);
        }
    }

    // ── rewritten cv ──

    fn rewritten_cv(&mut self) {
        let record = self.record;
        let sections: Vec<_> = record
            .rewritten_sections()
            .iter()
            .filter(|s| !(s.section_name.trim().is_empty() && s.content.trim().is_empty()))
            .collect();
        if sections.is_empty() {
            return;
        }
        self.c.start_page();
        self.banner("rewritten_cv", "REWRITTEN CV SECTIONS", SUCCESS);
        self.paragraph("rewritten_cv.intro", REWRITTEN_INTRO, regular(11.0, TEXT), 8.0);

        let (m, cw) = (self.margin, self.content_w);
        let style = regular(10.0, TEXT);
        let lh = line_height(10.0, BODY_SPACING);
        let bar_h = 10.0;
        let bar_gap = 3.0;
        let gap = 8.0;

        for (i, section) in sections.iter().enumerate() {
            let label = format!("rewritten_cv[{i}]");
            let lines = wrap(&section.content, &style, cw - 16.0);
            let box_h = if lines.is_empty() {
                0.0
            } else {
                (lines.len() as f32 * lh + 8.0).max(20.0)
            };
            let height = bar_h + bar_gap + box_h + gap;

            if !self.c.fits(height) {
                let mut styled = vec![(section.section_name.trim().to_string(), bold(12.0, SUCCESS))];
                styled.extend(lines.into_iter().map(|l| (l, style)));
                self.c.flow_lines(label, &styled, m + 8.0, lh);
                self.c.advance(gap);
                continue;
            }

            let top = self.c.place(label, height);
            self.name_bar(top, &section.section_name);
            if box_h > 0.0 {
                let box_top = top + bar_h + bar_gap;
                self.c.fill_rect(m, box_top, cw, box_h, 2.0, BACKGROUND);
                self.c.text_lines(m + 8.0, box_top + 4.0, &lines, style, lh);
            }
        }
    }

    fn name_bar(&mut self, top: f32, name: &str) {
        self.c
            .fill_rect(self.margin, top, self.content_w, 10.0, 2.0, SUCCESS);
        self.c.text(
            self.margin + 6.0,
            top + 6.8,
            name.trim(),
            bold(12.0, WHITE),
            Align::Left,
        );
    }

    // ── strategic recommendations ──

    fn strategic_notes(&mut self) {
        let record = self.record;
        let Some(meta) = record.meta.as_ref() else {
            return;
        };
        if meta.notes.trim().is_empty() {
            return;
        }
        self.c.start_page();
        self.banner(
            "strategic_notes",
            "STRATEGIC RECOMMENDATIONS",
            SECONDARY,
        );

        let (m, cw) = (self.margin, self.content_w);
        let style = regular(11.0, TEXT);
        let lh = line_height(11.0, BODY_SPACING);
        let lines = wrap(&meta.notes, &style, cw - 16.0);
        let box_h = (lines.len() as f32 * lh + 8.0).max(30.0);
        let gap = 6.0;

        if self.c.fits(box_h + gap) {
            let top = self.c.place("strategic_notes.notes", box_h + gap);
            self.c.fill_rect(m, top, cw, box_h, 3.0, BACKGROUND);
            self.c.text_lines(m + 8.0, top + 4.0, &lines, style, lh);
        } else {
            self.flow("strategic_notes.notes", &lines, style, m + 8.0, lh, gap);
        }

        let mut caption = Vec::new();
        if !meta.version.trim().is_empty() {
            caption.push(format!("Review version: {}", meta.version.trim()));
        }
        if !meta.review_date.trim().is_empty() {
            caption.push(format!("Review date: {}", long_date(&meta.review_date)));
        }
        if !caption.is_empty() {
            let top = self.c.place("strategic_notes.caption", 6.0);
            self.c.text(
                m,
                top + ascent(9.0),
                &caption.join(" | "),
                regular(9.0, LIGHT_TEXT),
                Align::Left,
            );
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Post-pass chrome
// ────────────────────────────────────────────────────────────────────────────

/// Running header on every page after the cover; closing footer on the last page.
fn stamp_chrome(
    document: &mut LaidOutDocument,
    full_name: &str,
    short_id: &str,
    brand_line: &str,
    generated: &str,
) {
    let (w, h, m) = (
        document.geometry.width_mm,
        document.geometry.height_mm,
        document.geometry.margin_mm,
    );
    let numbered = document.pages.len().saturating_sub(1);

    for (i, page) in document.pages.iter_mut().enumerate().skip(1) {
        page.chrome.push(DrawOp::Line {
            x1: m,
            y1: HEADER_RULE_Y,
            x2: w - m,
            y2: HEADER_RULE_Y,
            color: PRIMARY,
            width: 0.8,
        });
        page.chrome.push(DrawOp::Text {
            x: w / 2.0,
            y: HEADER_TEXT_Y,
            text: format!("CV Review Report - {full_name} | Page {i} of {numbered}"),
            style: regular(9.0, LIGHT_TEXT),
            align: Align::Center,
        });
    }

    if let Some(last) = document.pages.last_mut() {
        let rule_y = h - FOOTER_RULE_OFFSET;
        last.chrome.push(DrawOp::Line {
            x1: m,
            y1: rule_y,
            x2: w - m,
            y2: rule_y,
            color: PRIMARY,
            width: 0.4,
        });
        last.chrome.push(DrawOp::Text {
            x: w / 2.0,
            y: rule_y + 8.0,
            text: brand_line.to_string(),
            style: regular(9.0, LIGHT_TEXT),
            align: Align::Center,
        });
        last.chrome.push(DrawOp::Text {
            x: w / 2.0,
            y: rule_y + 12.0,
            text: format!("Report ID: {short_id} | Generated: {generated}"),
            style: regular(9.0, LIGHT_TEXT),
            align: Align::Center,
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{make_full_review, make_section};
    use crate::models::review::{RewrittenCv, RewrittenSection, SectionStatus};

    fn layout(record: &ReviewRecord) -> LaidOutDocument {
        layout_review(record, &RenderOptions::default()).unwrap()
    }

    /// Top-level part of a block label, e.g. `section_analysis[0].title` → `section_analysis`.
    fn part(label: &str) -> &str {
        label
            .split(|c| c == '.' || c == '[')
            .next()
            .unwrap_or(label)
    }

    fn texts(document: &LaidOutDocument) -> Vec<String> {
        document
            .pages
            .iter()
            .flat_map(|p| p.ops())
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn make_long_review(sections: usize) -> ReviewRecord {
        let mut record = make_full_review();
        record.sections = (0..sections)
            .map(|i| make_section(&format!("Section {i}"), SectionStatus::NeedsWork, 1.5))
            .collect();
        record
    }

    // ── ordering ──

    #[test]
    fn test_parts_appear_once_in_fixed_order() {
        let document = layout(&make_full_review());
        let mut parts: Vec<&str> = document.blocks.iter().map(|b| part(&b.label)).collect();
        parts.dedup();
        assert_eq!(
            parts,
            vec![
                "cover",
                "executive_summary",
                "section_analysis",
                "questions",
                "rewritten_cv",
                "strategic_notes"
            ]
        );
    }

    #[test]
    fn test_block_labels_are_unique() {
        let document = layout(&make_long_review(6));
        let mut labels: Vec<&str> = document.blocks.iter().map(|b| b.label.as_str()).collect();
        let total = labels.len();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), total);
    }

    #[test]
    fn test_optional_parts_are_skipped() {
        let mut record = make_full_review();
        record.rewritten_cv = None;
        record.meta = None;
        record.global_summary.questions.clear();
        let document = layout(&record);
        assert!(document
            .blocks
            .iter()
            .all(|b| !matches!(part(&b.label), "questions" | "rewritten_cv" | "strategic_notes")));
        let all = texts(&document);
        assert!(!all.iter().any(|t| t == "REWRITTEN CV SECTIONS"));
        assert!(!all.iter().any(|t| t == "STRATEGIC RECOMMENDATIONS"));
        assert!(!all.iter().any(|t| t == "CLARIFICATION QUESTIONS"));
    }

    #[test]
    fn test_empty_rewritten_sections_skip_the_part() {
        let mut record = make_full_review();
        record.rewritten_cv = Some(RewrittenCv { sections: vec![] });
        let document = layout(&record);
        assert!(!document.blocks.iter().any(|b| part(&b.label) == "rewritten_cv"));
    }

    // ── pagination ──

    #[test]
    fn test_blocks_never_cross_margins() {
        let document = layout(&make_long_review(8));
        let g = &document.geometry;
        assert!(document.page_count() > 4);
        for block in document.blocks.iter().filter(|b| b.page > 0 && !b.oversize) {
            assert!(
                block.top >= g.content_top() - 1e-3,
                "{} starts above content top",
                block.label
            );
            assert!(
                block.top + block.height <= g.content_bottom() + 1e-3,
                "{} ends below the bottom margin",
                block.label
            );
            assert_eq!(block.page, block.end_page);
        }
    }

    #[test]
    fn test_list_heading_travels_with_first_item() {
        let document = layout(&make_long_review(8));
        let strengths = document
            .blocks
            .iter()
            .filter(|b| b.label.ends_with(".strengths"));
        for block in strengths {
            let page = &document.pages[block.page];
            let heading_y = page.content.iter().find_map(|op| match op {
                DrawOp::Text { text, y, .. }
                    if text == "STRENGTHS" && *y >= block.top && *y <= block.top + block.height =>
                {
                    Some(*y)
                }
                _ => None,
            });
            assert!(heading_y.is_some(), "{} lost its heading", block.label);
        }
    }

    /// Every section title shares its page with the block drawn after it.
    fn assert_titles_lead_their_sections(document: &LaidOutDocument) {
        for (k, title) in document.blocks.iter().enumerate() {
            if !title.label.ends_with(".title") {
                continue;
            }
            let next = document.blocks.get(k + 1);
            assert!(
                next.is_some_and(|b| b.page == title.end_page),
                "{} is the last block on page {}",
                title.label,
                title.end_page
            );
        }
    }

    #[test]
    fn test_section_title_stays_with_its_first_block() {
        for count in 1..=16 {
            let mut record = make_long_review(count);
            for (i, section) in record.sections.iter_mut().enumerate() {
                section.justification =
                    "Shows steady progression through acute posts. ".repeat(1 + i % 5);
            }
            assert_titles_lead_their_sections(&layout(&record));
        }
    }

    #[test]
    fn test_title_without_justification_stays_with_first_list() {
        for count in 1..=16 {
            let mut record = make_long_review(count);
            for section in &mut record.sections {
                section.justification.clear();
            }
            let document = layout(&record);
            assert_titles_lead_their_sections(&document);
            for (k, title) in document.blocks.iter().enumerate() {
                if title.label.ends_with(".title") {
                    let next = &document.blocks[k + 1];
                    assert!(next.label.ends_with(".strengths"), "{}", next.label);
                }
            }
        }
    }

    #[test]
    fn test_oversize_section_title_flows_within_margins() {
        let mut record = make_full_review();
        record.sections[0].name = "Clinical governance and patient safety ".repeat(120);
        let document = layout(&record);
        let g = &document.geometry;
        let title = document
            .blocks
            .iter()
            .find(|b| b.label == "section_analysis[0].title")
            .unwrap();
        assert!(title.oversize);
        assert!(title.end_page > title.page);
        for page in &document.pages[1..] {
            for op in &page.content {
                if let DrawOp::Text { y, text, .. } = op {
                    assert!(*y <= g.content_bottom() + 1e-3, "{text} below the bottom margin");
                }
            }
        }
    }

    #[test]
    fn test_footer_band_is_clear_on_last_page() {
        let document = layout(&make_long_review(5));
        let last = document.page_count() - 1;
        let limit = document.geometry.height_mm - FOOTER_CLEARANCE;
        for block in document.blocks.iter().filter(|b| b.end_page == last && !b.oversize) {
            assert!(block.top + block.height <= limit + 1e-3, "{}", block.label);
        }
    }

    #[test]
    fn test_oversize_rewritten_content_flows() {
        let mut record = make_full_review();
        record.rewritten_cv = Some(RewrittenCv {
            sections: vec![RewrittenSection {
                section_name: "Experience".to_string(),
                content: "Managed acute admissions on a busy take. ".repeat(200),
            }],
        });
        let document = layout(&record);
        let flowed = document
            .blocks
            .iter()
            .find(|b| b.label == "rewritten_cv[0]")
            .unwrap();
        assert!(flowed.oversize);
        assert!(flowed.end_page > flowed.page);
    }

    // ── chrome ──

    #[test]
    fn test_running_header_on_every_page_but_cover() {
        let document = layout(&make_full_review());
        let numbered = document.page_count() - 1;
        assert!(document.pages[0].chrome.is_empty() || document.page_count() == 1);
        for (i, page) in document.pages.iter().enumerate().skip(1) {
            let expected = format!("CV Review Report - Jane Doe | Page {i} of {numbered}");
            assert!(page
                .chrome
                .iter()
                .any(|op| matches!(op, DrawOp::Text { text, .. } if *text == expected)));
        }
    }

    #[test]
    fn test_footer_only_on_last_page() {
        let document = layout(&make_full_review());
        let footers: Vec<usize> = document
            .pages
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.chrome.iter().any(|op| {
                    matches!(op, DrawOp::Text { text, .. } if text.starts_with("Report ID: A8B9C0D1"))
                })
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(footers, vec![document.page_count() - 1]);
    }

    // ── content ──

    #[test]
    fn test_executive_summary_contents() {
        let all = texts(&layout(&make_full_review()));
        assert!(all.iter().any(|t| t == "Status: Nearly ready"));
        assert!(all.iter().any(|t| t == "Total Score: 5/8 (63%)"));
        assert!(all.iter().any(|t| t == "Personal Statement - Good (3/4)"));
        assert!(all.iter().any(|t| t == "Clinical Skills - Needs Improvement (2/4)"));
    }

    #[test]
    fn test_cover_details() {
        let all = texts(&layout(&make_full_review()));
        assert!(all.iter().any(|t| t == "Target Markets: UK, Ireland"));
        assert!(all.iter().any(|t| t == "Service Level: Premium"));
        assert!(all.iter().any(|t| t == "Review Date: 5 March 2024"));
        assert!(all.iter().any(|t| t == "NEARLY READY"));
    }

    #[test]
    fn test_empty_section_sentinel_suppresses_missing_elements() {
        let mut record = make_full_review();
        for section in &mut record.sections {
            section.missing_content = vec!["Empty section".to_string()];
        }
        let document = layout(&record);
        assert!(!texts(&document).iter().any(|t| t == "MISSING ELEMENTS"));
    }

    #[test]
    fn test_sentinel_beside_real_gaps_keeps_missing_elements() {
        let mut record = make_full_review();
        record.sections[0].missing_content =
            vec!["Empty section".to_string(), "No audit evidence".to_string()];
        let all = texts(&layout(&record));
        assert!(all.iter().any(|t| t == "MISSING ELEMENTS"));
        assert!(all.iter().any(|t| t == "Empty section"));
    }

    #[test]
    fn test_zero_sections_still_lays_out() {
        let mut record = make_full_review();
        record.sections.clear();
        record.global_summary.scoring_breakdown.clear();
        let all = texts(&layout(&record));
        assert!(all.iter().any(|t| t == "Total Score: 5/0 (0%)"));
    }
}
