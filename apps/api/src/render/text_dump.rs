//! Flat text builder shared by the review and CV text exports.
//!
//! A block is a delimiter line, its label, another delimiter and a blank line.
//! Headers are always written; a body line whose value is blank is left out.
//! Raw text is copied verbatim, never wrapped or trimmed.

const DELIMITER_WIDTH: usize = 50;

#[derive(Debug, Default)]
pub struct TextDump {
    lines: Vec<String>,
}

impl TextDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn block(&mut self, label: &str) {
        let rule = "=".repeat(DELIMITER_WIDTH);
        self.lines.push(rule.clone());
        self.lines.push(label.to_string());
        self.lines.push(rule);
        self.blank();
    }

    /// `Label: value`, omitted when the value is blank.
    pub fn field(&mut self, label: &str, value: &str) {
        if !value.trim().is_empty() {
            self.lines.push(format!("{label}: {value}"));
        }
    }

    /// Free text on its own lines, omitted when blank.
    pub fn text(&mut self, value: &str) {
        if !value.trim().is_empty() {
            self.lines.push(value.to_string());
        }
    }

    /// A sub-heading followed by its free text; both omitted when the text is blank.
    pub fn labelled_text(&mut self, label: &str, value: &str) {
        if !value.trim().is_empty() {
            self.lines.push(format!("{label}:"));
            self.lines.push(value.to_string());
            self.blank();
        }
    }

    /// A sub-heading with bulleted items. Blank items are skipped and the
    /// heading is omitted when nothing is left.
    pub fn list<S: AsRef<str>>(&mut self, label: &str, items: &[S]) {
        let items: Vec<&str> = items
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !s.trim().is_empty())
            .collect();
        if items.is_empty() {
            return;
        }
        self.lines.push(format!("{label}:"));
        for item in items {
            self.lines.push(format!("- {item}"));
        }
        self.blank();
    }

    /// Like [`TextDump::list`] but numbered from 1.
    pub fn numbered<S: AsRef<str>>(&mut self, label: Option<&str>, items: &[S]) {
        let items: Vec<&str> = items
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !s.trim().is_empty())
            .collect();
        if items.is_empty() {
            return;
        }
        if let Some(label) = label {
            self.lines.push(format!("{label}:"));
        }
        for (i, item) in items.iter().enumerate() {
            self.lines.push(format!("{}. {item}", i + 1));
        }
        self.blank();
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_frames_label_with_delimiters() {
        let mut dump = TextDump::new();
        dump.block("OTHERS");
        let rule = "=".repeat(50);
        assert_eq!(dump.finish(), format!("{rule}\nOTHERS\n{rule}\n"));
    }

    #[test]
    fn test_blank_field_is_omitted() {
        let mut dump = TextDump::new();
        dump.field("Email", "   ");
        dump.field("Status", "pending");
        assert_eq!(dump.finish(), "Status: pending");
    }

    #[test]
    fn test_text_is_verbatim() {
        let raw = "  Line one\n\tLine two  ";
        let mut dump = TextDump::new();
        dump.text(raw);
        assert_eq!(dump.finish(), raw);
    }

    #[test]
    fn test_list_skips_blank_items_and_empty_heading() {
        let mut dump = TextDump::new();
        dump.list("Strengths", &["", "  "]);
        assert_eq!(dump.finish(), "");

        let mut dump = TextDump::new();
        dump.list("Strengths", &["Clear", ""]);
        assert_eq!(dump.finish(), "Strengths:\n- Clear\n");
    }

    #[test]
    fn test_numbered_items_count_from_one() {
        let mut dump = TextDump::new();
        dump.numbered(None, &["First", "Second"]);
        assert_eq!(dump.finish(), "1. First\n2. Second\n");
    }
}
