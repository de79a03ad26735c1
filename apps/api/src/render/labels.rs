//! Display labels, date formats and filename fragments shared by every renderer.

use chrono::{DateTime, NaiveDate, Utc};

/// Human-readable name for a job-role code; unknown codes pass through.
pub fn job_role_display(code: &str) -> &str {
    match code {
        "tier1" => "Tier 1 (SHO, CT/ST1–2, FY2, JCF, CF, etc.)",
        "middleGrade" => "Middle Grade (Registrar, SpR, SCF, CF, etc.)",
        "consultant" => "Consultant",
        other => other,
    }
}

fn market_display(code: &str) -> &str {
    match code {
        "uk" => "UK",
        "republicOfIreland" => "Ireland",
        "europe" => "Europe",
        "america" => "America",
        "gcc" => "GCC",
        "others" => "Others",
        other => other,
    }
}

/// Comma-joined display names of the target markets.
pub fn markets_display(codes: &[String]) -> String {
    codes
        .iter()
        .map(|c| market_display(c))
        .filter(|m| !m.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Upper-cases the first character, leaves the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// `dd/mm/yyyy`, or the raw text when it is not a recognisable date.
pub fn short_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Long British form, e.g. `5 March 2024`; unparseable input is kept as-is.
pub fn long_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%-d %B %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Scores print without a trailing `.0` when integral.
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{}", score as i64)
    } else if score.is_finite() {
        let s = format!("{score:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        "0".to_string()
    }
}

/// Last eight characters of a record id, upper-cased.
pub fn short_id(id: &str) -> String {
    let chars: Vec<char> = id.trim().chars().collect();
    let start = chars.len().saturating_sub(8);
    chars[start..].iter().collect::<String>().to_uppercase()
}

/// Whitespace runs become `_`; characters unsafe in a filename are dropped.
pub fn filename_name(name: &str) -> String {
    name.split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
                .filter(|c| !c.is_control())
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
