//! Report colours and the score / status lookup tables.

use crate::models::review::SectionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to 0.0..=1.0 for PDF colour operators.
    pub fn unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

pub const PRIMARY: Rgb = Rgb(34, 139, 34);
pub const SECONDARY: Rgb = Rgb(70, 130, 180);
pub const ACCENT: Rgb = Rgb(255, 140, 0);
pub const SUCCESS: Rgb = Rgb(46, 204, 113);
pub const WARNING: Rgb = Rgb(241, 196, 15);
pub const DANGER: Rgb = Rgb(231, 76, 60);
pub const TEXT: Rgb = Rgb(44, 62, 80);
pub const LIGHT_TEXT: Rgb = Rgb(127, 140, 141);
pub const LIGHT_GRAY: Rgb = Rgb(236, 240, 241);
pub const MEDIUM_GRAY: Rgb = Rgb(189, 195, 199);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BACKGROUND: Rgb = Rgb(248, 249, 250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Accent,
    Danger,
    Neutral,
}

impl Tone {
    pub fn color(self) -> Rgb {
        match self {
            Tone::Success => SUCCESS,
            Tone::Warning => WARNING,
            Tone::Accent => ACCENT,
            Tone::Danger => DANGER,
            Tone::Neutral => LIGHT_TEXT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    VeryGood,
    Good,
    Satisfactory,
    NeedsImprovement,
    Poor,
}

impl ScoreTier {
    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent",
            ScoreTier::VeryGood => "Very Good",
            ScoreTier::Good => "Good",
            ScoreTier::Satisfactory => "Satisfactory",
            ScoreTier::NeedsImprovement => "Needs Improvement",
            ScoreTier::Poor => "Poor",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lookup tables  (ratio thresholds, inclusive, highest first)
// ────────────────────────────────────────────────────────────────────────────

const SCORE_TIERS: [(f64, ScoreTier); 5] = [
    (0.9, ScoreTier::Excellent),
    (0.8, ScoreTier::VeryGood),
    (0.7, ScoreTier::Good),
    (0.6, ScoreTier::Satisfactory),
    (0.4, ScoreTier::NeedsImprovement),
];

const BADGE_TONES: [(f64, Tone); 3] = [
    (0.8, Tone::Success),
    (0.6, Tone::Warning),
    (0.4, Tone::Accent),
];

/// `score / max`, or 0 when the ratio is undefined.
pub fn score_ratio(score: f64, max: f64) -> f64 {
    if max > 0.0 && score.is_finite() {
        score / max
    } else {
        0.0
    }
}

/// NaN never satisfies `>=`, so undefined ratios land in the last tier.
pub fn score_tier(ratio: f64) -> ScoreTier {
    SCORE_TIERS
        .iter()
        .find(|(min, _)| ratio >= *min)
        .map(|(_, tier)| *tier)
        .unwrap_or(ScoreTier::Poor)
}

pub fn score_tone(ratio: f64) -> Tone {
    BADGE_TONES
        .iter()
        .find(|(min, _)| ratio >= *min)
        .map(|(_, tone)| *tone)
        .unwrap_or(Tone::Danger)
}

pub fn status_tone(status: &SectionStatus) -> Tone {
    match status {
        SectionStatus::Ok | SectionStatus::Good => Tone::Success,
        SectionStatus::Missing | SectionStatus::NeedsWork => Tone::Danger,
        SectionStatus::Warning => Tone::Warning,
        SectionStatus::Other(_) => Tone::Neutral,
    }
}

/// Priority items: the first two are urgent, the next two important.
pub fn priority_tone(index: usize) -> Tone {
    match index {
        0 | 1 => Tone::Danger,
        2 | 3 => Tone::Warning,
        _ => Tone::Accent,
    }
}
