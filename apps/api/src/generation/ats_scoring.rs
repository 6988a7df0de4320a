//! ATS Scoring — keyword relevance of generated resume text.
//!
//! Algorithm: for each keyword in the set, a case-insensitive substring test
//! against the text. `score = floor(matched / total × 100)`, so the score is
//! always in `[0, 100]` and empty text scores 0.
//!
//! Substring semantics are deliberate: `ai` matches inside `maintained`, and
//! `project` matches `projects`.

use serde::{Deserialize, Serialize};

/// The default vocabulary for resume relevance.
pub const DEFAULT_ATS_KEYWORDS: &[&str] = &[
    "python",
    "machine learning",
    "deep learning",
    "data",
    "ai",
    "project",
    "experience",
    "education",
];

/// A de-duplicated, lowercased keyword set. Iteration order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Trims, lowercases and de-duplicates; empty entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: Vec<String> = Vec::new();
        for keyword in keywords {
            let normalized = keyword.as_ref().trim().to_lowercase();
            if !normalized.is_empty() && !set.contains(&normalized) {
                set.push(normalized);
            }
        }
        Self(set)
    }

    /// Parses the comma-separated `ATS_KEYWORDS` setting.
    pub fn from_csv(value: &str) -> Self {
        Self::new(value.split(','))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new(DEFAULT_ATS_KEYWORDS)
    }
}

/// Score plus the keywords behind it, returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32, // 0 – 100
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub total_keywords: usize,
}

/// Computes the bounded keyword score of `text`.
#[allow(dead_code)]
pub fn score(text: &str, keywords: &KeywordSet) -> u32 {
    score_report(text, keywords).score
}

/// Computes the score together with matched and missing keywords.
pub fn score_report(text: &str, keywords: &KeywordSet) -> AtsReport {
    let haystack = text.to_lowercase();
    let (matched, missing): (Vec<String>, Vec<String>) = keywords
        .iter()
        .map(str::to_string)
        .partition(|kw| haystack.contains(kw.as_str()));

    let total = keywords.len();
    let score = if total == 0 {
        0
    } else {
        (matched.len() * 100 / total) as u32
    };

    AtsReport {
        score,
        matched,
        missing,
        total_keywords: total,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(score("", &KeywordSet::default()), 0);
    }

    #[test]
    fn test_all_keywords_score_hundred() {
        let text = "Python, machine learning and deep learning on data for AI; \
                    project experience; education";
        assert_eq!(score(text, &KeywordSet::default()), 100);
    }

    #[test]
    fn test_floor_division() {
        // 1 of 8 → 12.5 → 12
        assert_eq!(score("python", &KeywordSet::default()), 12);
        // 3 of 8 → 37.5 → 37
        assert_eq!(score("python data project", &KeywordSet::default()), 37);
    }

    #[test]
    fn test_case_insensitive() {
        let keywords = KeywordSet::default();
        let text = "Led Machine Learning PROJECTS using python";
        assert_eq!(
            score(text, &keywords),
            score(&text.to_uppercase(), &keywords)
        );
        assert_eq!(
            score(text, &keywords),
            score(&text.to_lowercase(), &keywords)
        );
    }

    #[test]
    fn test_adding_absent_keyword_never_decreases() {
        let keywords = KeywordSet::default();
        let base = "Built python tooling.";
        let before = score(base, &keywords);
        for kw in keywords.iter() {
            let after = score(&format!("{base} {kw}"), &keywords);
            assert!(after >= before, "adding {kw:?}: {after} < {before}");
        }
    }

    #[test]
    fn test_substring_semantics() {
        let report = score_report("Maintained pipelines", &KeywordSet::new(["ai"]));
        assert_eq!(report.matched, vec!["ai".to_string()]);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_report_partitions_keywords() {
        let report = score_report("Python developer with data skills", &KeywordSet::default());
        assert_eq!(report.matched, vec!["python".to_string(), "data".to_string()]);
        assert_eq!(report.missing.len(), 6);
        assert_eq!(report.total_keywords, 8);
        assert_eq!(report.score, 25);
    }

    #[test]
    fn test_empty_keyword_set_scores_zero() {
        let empty = KeywordSet::new(Vec::<String>::new());
        assert!(empty.is_empty());
        assert_eq!(score("python", &empty), 0);
    }

    #[test]
    fn test_keyword_set_normalization() {
        let set = KeywordSet::from_csv(" Rust, rust ,, Kubernetes ");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["rust", "kubernetes"]);
    }

    #[test]
    fn test_score_is_bounded_for_arbitrary_text() {
        let keywords = KeywordSet::default();
        for text in ["", "x", "data data data data", &"ai ".repeat(1000)] {
            let s = score(text, &keywords);
            assert!(s <= 100);
        }
    }
}
