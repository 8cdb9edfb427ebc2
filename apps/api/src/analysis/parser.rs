//! Response Parser — turns the model's free-text analysis into an `AnalysisRecord`.
//!
//! The model is asked for prose, not JSON, so this is line-oriented label matching:
//! each trimmed line is classified by the first label it contains (priority order
//! below), and the value after the line's last colon becomes the field value.
//! A later line with the same label overwrites the earlier one; nothing accumulates.
//!
//! Parsing is total: malformed or missing fields degrade to their defaults.

use serde::{Deserialize, Serialize};

pub const NO_KEYWORDS_MISSING: &str = "No keywords missing.";
pub const NO_IMPROVEMENTS: &str = "No improvements suggested.";
pub const NO_ALTERNATIVE_ROLES: &str = "No alternative roles suggested.";

/// Separator between items in a list-valued field.
const ITEM_SEPARATOR: &str = ", ";

/// Structured result of one analysis. All four fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Intended range 0–100, but not clamped: whatever integer the model wrote.
    pub overall_match: i64,
    pub missing_keywords: Vec<String>,
    pub improvements: Vec<String>,
    pub alternative_roles: Vec<String>,
}

/// A line classifier. Declaration order is match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    OverallMatch,
    MissingKeywords,
    Improvements,
    AlternativeRoles,
}

impl Label {
    const PRIORITY: [Label; 4] = [
        Label::OverallMatch,
        Label::MissingKeywords,
        Label::Improvements,
        Label::AlternativeRoles,
    ];

    fn marker(self) -> &'static str {
        match self {
            Label::OverallMatch => "Overall Match:",
            Label::MissingKeywords => "Missing Keywords:",
            Label::Improvements => "Improvements:",
            Label::AlternativeRoles => "Alternative Roles:",
        }
    }

    /// Substring containment, not prefix matching. First label in priority order wins.
    fn classify(line: &str) -> Option<Label> {
        Self::PRIORITY
            .into_iter()
            .find(|label| line.contains(label.marker()))
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    overall_match: i64,
    missing_keywords: Vec<String>,
    improvements: Vec<String>,
    alternative_roles: Vec<String>,
}

impl Accumulator {
    fn apply(mut self, label: Label, line: &str) -> Self {
        let value = value_after_last_colon(line);
        match label {
            Label::OverallMatch => self.overall_match = parse_percentage(value),
            Label::MissingKeywords => self.missing_keywords = split_items(value),
            Label::Improvements => self.improvements = split_items(value),
            Label::AlternativeRoles => self.alternative_roles = split_items(value),
        }
        self
    }

    fn finish(self) -> AnalysisRecord {
        AnalysisRecord {
            overall_match: self.overall_match,
            missing_keywords: or_sentinel(self.missing_keywords, NO_KEYWORDS_MISSING),
            improvements: or_sentinel(self.improvements, NO_IMPROVEMENTS),
            alternative_roles: or_sentinel(self.alternative_roles, NO_ALTERNATIVE_ROLES),
        }
    }
}

/// Parses the model's free-text analysis. Never fails.
pub fn parse_analysis(text: &str) -> AnalysisRecord {
    split_lines(text)
        .map(str::trim)
        .fold(Accumulator::default(), |acc, line| match Label::classify(line) {
            Some(label) => acc.apply(label, line),
            None => acc,
        })
        .finish()
}

/// Line boundaries of Python's `str.splitlines`, so a lone `\r` or a Unicode
/// line separator ends a line just like `\n`.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// `\r\n` yields an empty segment between its two halves; empty lines carry no label.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_break)
}

fn value_after_last_colon(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or_default().trim()
}

/// `"85%"` → 85. Anything that is not an integer once `%` is removed → 0.
/// Single underscores between digits group them (`"1_000"`), as in Python literals.
fn parse_percentage(value: &str) -> i64 {
    let value = value.replace('%', "");
    strip_digit_separators(value.trim())
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// `None` when an underscore is not directly between two ASCII digits.
fn strip_digit_separators(value: &str) -> Option<String> {
    let chars: Vec<char> = value.chars().collect();
    let between_digits = |i: usize| {
        i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
    };

    let mut digits = String::with_capacity(value.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !between_digits(i) {
                return None;
            }
        } else {
            digits.push(c);
        }
    }
    Some(digits)
}

fn split_items(value: &str) -> Vec<String> {
    value
        .split(ITEM_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn or_sentinel(items: Vec<String>, sentinel: &str) -> Vec<String> {
    if items.is_empty() {
        vec![sentinel.to_string()]
    } else {
        items
    }
}
