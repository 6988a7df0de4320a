//! Line Classifier — assigns each line of generated resume text a layout role.
//!
//! # Rule order (first match wins)
//! 1. Empty after trimming → `Blank`
//! 2. Entirely uppercase, or ends with `:` → `Heading`
//! 3. Starts with a bullet marker → `Bullet`, markers collapsed to one canonical glyph
//! 4. Anything else → `Body`
//!
//! The heading check precedes the bullet check, so `- SKILLS` is a heading.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The canonical bullet glyph every Bullet line starts with after normalization.
pub const CANONICAL_BULLET: char = '\u{2022}';

/// Role-only view of a classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Heading,
    Bullet,
    Body,
    Blank,
}

/// A line tagged with its role. Content is the trimmed line; bullets are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "snake_case")]
pub enum ClassifiedLine {
    Heading(String),
    Bullet(String),
    Body(String),
    Blank,
}

impl ClassifiedLine {
    pub fn role(&self) -> LineRole {
        match self {
            ClassifiedLine::Heading(_) => LineRole::Heading,
            ClassifiedLine::Bullet(_) => LineRole::Bullet,
            ClassifiedLine::Body(_) => LineRole::Body,
            ClassifiedLine::Blank => LineRole::Blank,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ClassifiedLine::Heading(s) | ClassifiedLine::Bullet(s) | ClassifiedLine::Body(s) => s,
            ClassifiedLine::Blank => "",
        }
    }
}

/// Which leading glyphs count as bullet markers, and what they collapse to.
///
/// Upstream text sometimes arrives with a filled-square glyph before or instead
/// of the bullet (`•■ Python`, `■ Python`). Those fillers are part of the
/// marker set here rather than special-cased, so new artifacts are a config change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletGlyphs {
    pub canonical: char,
    pub markers: Vec<char>,
}

impl Default for BulletGlyphs {
    fn default() -> Self {
        Self {
            canonical: CANONICAL_BULLET,
            markers: vec![CANONICAL_BULLET, '-', '\u{25A0}', '\u{25AA}'],
        }
    }
}

impl BulletGlyphs {
    /// Builds a marker set from a string of glyphs (the `BULLET_MARKERS` setting).
    /// Whitespace is ignored; the canonical glyph is always a marker.
    pub fn from_markers(markers: &str) -> Self {
        let mut glyphs = vec![CANONICAL_BULLET];
        for c in markers.chars().filter(|c| !c.is_whitespace()) {
            if !glyphs.contains(&c) {
                glyphs.push(c);
            }
        }
        Self {
            canonical: CANONICAL_BULLET,
            markers: glyphs,
        }
    }

    fn is_marker(&self, c: char) -> bool {
        c == self.canonical || self.markers.contains(&c)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineClassifier {
    pub bullets: BulletGlyphs,
}

#[allow(dead_code)]
static DEFAULT_CLASSIFIER: Lazy<LineClassifier> = Lazy::new(LineClassifier::default);

/// Classifies one line with the default bullet glyphs.
#[allow(dead_code)]
pub fn classify(line: &str) -> ClassifiedLine {
    DEFAULT_CLASSIFIER.classify(line)
}

impl LineClassifier {
    pub fn new(bullets: BulletGlyphs) -> Self {
        Self { bullets }
    }

    pub fn classify(&self, line: &str) -> ClassifiedLine {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return ClassifiedLine::Blank;
        }

        if is_all_uppercase(trimmed) || trimmed.ends_with(':') {
            return ClassifiedLine::Heading(trimmed.to_string());
        }

        if trimmed.starts_with(|c: char| self.bullets.is_marker(c)) {
            let rest = trimmed.trim_start_matches(|c: char| c.is_whitespace() || self.bullets.is_marker(c));
            return ClassifiedLine::Bullet(format!("{} {}", self.bullets.canonical, rest));
        }

        ClassifiedLine::Body(trimmed.to_string())
    }

    /// Splits text into lines and classifies each, preserving source order.
    pub fn classify_text(&self, text: &str) -> Vec<ClassifiedLine> {
        text.lines().map(|line| self.classify(line)).collect()
    }
}

/// True when the text has at least one cased character and none are lowercase.
/// Digits and punctuation are ignored, so `5 YEARS` counts and `•` alone does not.
fn is_all_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        for line in ["", "   ", "\t", " \t  \r"] {
            assert_eq!(classify(line), ClassifiedLine::Blank, "line {line:?}");
            assert_eq!(classify(line).content(), "");
        }
    }

    #[test]
    fn test_uppercase_is_heading() {
        assert_eq!(classify("  NAME "), ClassifiedLine::Heading("NAME".to_string()));
        assert_eq!(
            classify("WORK EXPERIENCE (2019-2024)"),
            ClassifiedLine::Heading("WORK EXPERIENCE (2019-2024)".to_string())
        );
    }

    #[test]
    fn test_trailing_colon_is_heading() {
        assert_eq!(classify("Skills:"), ClassifiedLine::Heading("Skills:".to_string()));
    }

    #[test]
    fn test_heading_precedes_bullet() {
        assert_eq!(classify("- PYTHON"), ClassifiedLine::Heading("- PYTHON".to_string()));
        assert_eq!(
            classify("• Tools used:"),
            ClassifiedLine::Heading("• Tools used:".to_string())
        );
    }

    #[test]
    fn test_hyphen_bullet_normalized() {
        assert_eq!(
            classify("- Machine Learning"),
            ClassifiedLine::Bullet("• Machine Learning".to_string())
        );
    }

    #[test]
    fn test_filler_glyph_sequences_collapse() {
        for line in ["•■ Python", "■ Python", "• • Python", "  ▪Python", "-   Python", "•Python"] {
            assert_eq!(
                classify(line),
                ClassifiedLine::Bullet("• Python".to_string()),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn test_marker_only_line() {
        assert_eq!(classify("--"), ClassifiedLine::Bullet("• ".to_string()));
    }

    #[test]
    fn test_bullet_normalization_is_idempotent() {
        for line in ["- Built data pipelines", "•■ Python", "-", "▪ 5 years data projects"] {
            let first = classify(line);
            assert_eq!(first.role(), LineRole::Bullet);
            let second = classify(first.content());
            assert_eq!(second, first, "re-classifying {:?}", first.content());
        }
    }

    #[test]
    fn test_asterisk_is_not_a_default_marker() {
        assert_eq!(
            classify("*Python* developer"),
            ClassifiedLine::Body("*Python* developer".to_string())
        );
        assert_eq!(
            classify("* Python"),
            ClassifiedLine::Body("* Python".to_string())
        );
    }

    #[test]
    fn test_body_line_trimmed() {
        assert_eq!(
            classify("  Jane Doe  "),
            ClassifiedLine::Body("Jane Doe".to_string())
        );
        assert_eq!(
            classify("Led 3 projects in 2023."),
            ClassifiedLine::Body("Led 3 projects in 2023.".to_string())
        );
    }

    #[test]
    fn test_digits_only_line_is_body() {
        // No cased characters, so not "uppercase".
        assert_eq!(classify("2019 - 2024"), ClassifiedLine::Body("2019 - 2024".to_string()));
    }

    #[test]
    fn test_custom_markers() {
        let classifier = LineClassifier::new(BulletGlyphs::from_markers("> ~"));
        assert_eq!(
            classifier.classify("> Rust"),
            ClassifiedLine::Bullet("• Rust".to_string())
        );
        // Hyphen is not in the custom set.
        assert_eq!(
            classifier.classify("- Rust"),
            ClassifiedLine::Body("- Rust".to_string())
        );
        // Canonical glyph is always accepted.
        assert_eq!(
            classifier.classify("• Rust"),
            ClassifiedLine::Bullet("• Rust".to_string())
        );
    }

    #[test]
    fn test_classify_text_preserves_order() {
        let lines = LineClassifier::default().classify_text("SKILLS:\n- Python\r\n\nJane");
        let roles: Vec<LineRole> = lines.iter().map(|l| l.role()).collect();
        assert_eq!(
            roles,
            vec![LineRole::Heading, LineRole::Bullet, LineRole::Blank, LineRole::Body]
        );
    }

    #[test]
    fn test_serializes_as_tagged_variant() {
        let json = serde_json::to_value(ClassifiedLine::Bullet("• Rust".to_string())).unwrap();
        assert_eq!(json["role"], "bullet");
        assert_eq!(json["content"], "• Rust");
        let blank = serde_json::to_value(ClassifiedLine::Blank).unwrap();
        assert_eq!(blank["role"], "blank");
    }
}
