//! Static glyph-width tables for the PDF standard-14 text faces.
//!
//! Widths are in em units (relative to font size), taken from the Adobe AFM
//! metrics of the base faces and rounded to three decimals. The renderer only
//! needs them to decide where an over-wide line wraps, so the residual error
//! from rounding is irrelevant at resume font sizes.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// Font families every PDF viewer ships without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A concrete face: family plus weight. Maps 1:1 onto a PDF base font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FontFace {
    pub family: FontFamily,
    pub weight: FontWeight,
}

impl FontFace {
    pub const fn new(family: FontFamily, weight: FontWeight) -> Self {
        Self { family, weight }
    }

    /// The PostScript name used as `/BaseFont` in the PDF font dictionary.
    pub fn base_font_name(&self) -> &'static str {
        match (self.family, self.weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold) => "Helvetica-Bold",
            (FontFamily::Times, FontWeight::Regular) => "Times-Roman",
            (FontFamily::Times, FontWeight::Bold) => "Times-Bold",
            (FontFamily::Courier, FontWeight::Regular) => "Courier",
            (FontFamily::Courier, FontWeight::Bold) => "Courier-Bold",
        }
    }
}

impl FontFamily {
    /// Parses the `FONT_FAMILY` setting. Accepts the family or common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "sans" | "arial" => Some(FontFamily::Helvetica),
            "times" | "times-roman" | "serif" => Some(FontFamily::Times),
            "courier" | "mono" | "monospace" => Some(FontFamily::Courier),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Width of U+2022 BULLET, the canonical bullet glyph.
    pub bullet_width: f32,
    /// Fallback width for every other non-ASCII character.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    fn glyph_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '\u{2022}' {
            self.bullet_width
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.glyph_width(c)).sum()
    }

    /// Measures the rendered width of a string in points at `size_pt`.
    pub fn measure_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_pt`.
    ///
    /// Whitespace runs collapse to single spaces. A single word wider than the
    /// column stays on its own line rather than being split mid-word. Empty or
    /// whitespace-only input returns an empty vector.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;
        let space_w = self.space_width * size_pt;

        for word in text.split_whitespace() {
            let word_w = self.measure_pt(word, size_pt);

            if !current.is_empty() && current_width + space_w + word_w > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Returns the static metric table for a face.
pub fn get_metrics(face: &FontFace) -> &'static FontMetricTable {
    match (face.family, face.weight) {
        (FontFamily::Helvetica, FontWeight::Regular) => &HELVETICA_TABLE,
        (FontFamily::Helvetica, FontWeight::Bold) => &HELVETICA_BOLD_TABLE,
        (FontFamily::Times, FontWeight::Regular) => &TIMES_ROMAN_TABLE,
        (FontFamily::Times, FontWeight::Bold) => &TIMES_BOLD_TABLE,
        (FontFamily::Courier, FontWeight::Regular) => &COURIER_TABLE,
        (FontFamily::Courier, FontWeight::Bold) => &COURIER_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    bullet_width: 0.350,
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    bullet_width: 0.350,
    average_char_width: 0.584,
    space_width: 0.278,
};

static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    bullet_width: 0.350,
    average_char_width: 0.500,
    space_width: 0.250,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.555, 0.500, 0.500, 1.000, 0.833, 0.278, 0.333, 0.333, 0.500, 0.570, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.570, 0.570, 0.570, 0.500, 0.930,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.778, 0.389, 0.500, 0.778, 0.667, 0.944,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.611, 0.778, 0.722, 0.556, 0.667, 0.722, 0.722, 1.000, 0.722, 0.722, 0.667,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.581, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.556, 0.444, 0.556, 0.444, 0.333, 0.500, 0.556, 0.278, 0.333, 0.556, 0.278, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.500, 0.556, 0.556, 0.444, 0.389, 0.333, 0.556, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.394, 0.220, 0.394, 0.520,
    ],
    bullet_width: 0.350,
    average_char_width: 0.530,
    space_width: 0.250,
};

// Courier is monospaced: every glyph, bullet included, is 0.6em.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.600; 95],
    bullet_width: 0.600,
    average_char_width: 0.600,
    space_width: 0.600,
};

static COURIER_BOLD_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.600; 95],
    bullet_width: 0.600,
    average_char_width: 0.600,
    space_width: 0.600,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
