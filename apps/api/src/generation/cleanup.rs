//! Markdown cleanup for generated resume text.
//!
//! The model is asked for plain text but frequently answers with markdown:
//! `**SKILLS**`, `## Experience`, `* item` lists, code fences around the whole
//! answer. Left in, the markers are printed into the PDF and `* item` lines miss
//! the bullet role, so they are rewritten before classification. The text
//! returned to the caller is never cleaned.

use once_cell::sync::Lazy;
use regex::Regex;

/// A fence wrapping the whole response: ```` ```text\n...\n``` ````.
static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*```[A-Za-z]*\n(.*?)\n```\s*$").unwrap());

/// Candidate strong emphasis, `**x**`. Delimiter flanking is checked in `strip_strong_stars`.
static RE_STRONG_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").unwrap());

/// A whole line (optionally a `-` list item) wrapped in `__`.
static RE_STRONG_UNDERSCORE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*(?:-[ \t]+)?)__([^_\n]+)__([ \t]*)$").unwrap());

/// Markdown `*` list markers. Only a `*` followed by whitespace opens a list item.
static RE_STAR_LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([ \t]*)\*[ \t]+").unwrap());

/// ATX heading markers at line start.
static RE_HEADING_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap());

/// Horizontal rules (`---`, `***`, `___`) on their own line.
static RE_RULES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*([-*_])[ \t]*(?:[-*_][ \t]*){2,}$").unwrap());

const OPENING_PUNCT: &str = "([{\"'";
const CLOSING_PUNCT: &str = ".,;:!?)]}\"'";

/// Strips markdown markers so the remaining text classifies on its content.
///
/// Line structure is preserved: every input line maps to exactly one output
/// line (rules become blank lines), except that an outer code fence is unwrapped.
/// Anything that only looks like markup (`2**10`, `__init__`, `*italic*`) is kept.
pub fn clean_generated_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n");

    let text = match RE_OUTER_FENCES.captures(&text) {
        Some(caps) => caps[1].to_string(),
        None => text,
    };

    let text = RE_RULES.replace_all(&text, "");
    let text = RE_HEADING_MARKS.replace_all(&text, "");
    let text = RE_STAR_LIST_ITEM.replace_all(&text, "${1}- ");
    let text = RE_STRONG_UNDERSCORE_LINE.replace_all(&text, |caps: &regex::Captures| {
        let inner = &caps[2];
        if is_identifier_like(inner) {
            caps[0].to_string()
        } else {
            format!("{}{}{}", &caps[1], inner, &caps[3])
        }
    });
    strip_strong_stars(&text)
}

/// Removes `**` pairs that open after whitespace or opening punctuation and
/// close before whitespace or closing punctuation, with no space just inside.
fn strip_strong_stars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in RE_STRONG_STARS.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let opens = text[..whole.start()]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || OPENING_PUNCT.contains(c));
        let closes = text[whole.end()..]
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || CLOSING_PUNCT.contains(c));
        let tight = inner.as_str().trim() == inner.as_str();

        if opens && closes && tight {
            out.push_str(&text[last..whole.start()]);
            out.push_str(inner.as_str());
            last = whole.end();
        }
    }

    out.push_str(&text[last..]);
    out
}

/// `init`, `slots`, `snake_case`: dunder names, not emphasis.
fn is_identifier_like(inner: &str) -> bool {
    inner
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
