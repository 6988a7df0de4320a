//! Page geometry and text styles for the rendered resume.
//!
//! All lengths are PDF points (1/72 inch). Vertical positions in the layout
//! model are measured downward from the top edge; the PDF writer flips them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::font_metrics::{FontFace, FontFamily, FontWeight};

const POINTS_PER_INCH: f32 = 72.0;
const POINTS_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Error, PartialEq)]
pub enum PageSetupError {
    #[error("unknown page size '{0}' (expected letter, a4, legal or WIDTHxHEIGHT)")]
    UnknownPageSize(String),

    #[error("invalid length '{0}' (expected a number with optional pt, in or mm suffix)")]
    InvalidLength(String),

    #[error("margins must be one value or four comma-separated values, got {0}")]
    MarginCount(usize),

    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("margins leave no usable area on a {width}x{height}pt page")]
    NoUsableArea { width: f32, height: f32 },
}

// ────────────────────────────────────────────────────────────────────────────
// Page size & margins
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize {
        width_pt: 612.0,
        height_pt: 792.0,
    };
    pub const A4: PageSize = PageSize {
        width_pt: 595.28,
        height_pt: 841.89,
    };
    pub const LEGAL: PageSize = PageSize {
        width_pt: 612.0,
        height_pt: 1008.0,
    };

    /// Parses `letter`, `a4`, `legal`, or explicit `WIDTHxHEIGHT` (lengths with optional units).
    pub fn parse(value: &str) -> Result<Self, PageSetupError> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "letter" => return Ok(Self::LETTER),
            "a4" => return Ok(Self::A4),
            "legal" => return Ok(Self::LEGAL),
            _ => {}
        }

        let (w, h) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| PageSetupError::UnknownPageSize(value.to_string()))?;
        let size = PageSize {
            width_pt: parse_length(w)?,
            height_pt: parse_length(h)?,
        };
        if size.width_pt <= 0.0 || size.height_pt <= 0.0 {
            return Err(PageSetupError::UnknownPageSize(value.to_string()));
        }
        Ok(size)
    }
}

/// The four edge distances, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Parses one value (all edges) or `top,right,bottom,left`.
    pub fn parse(value: &str) -> Result<Self, PageSetupError> {
        let parts = value
            .split(',')
            .map(parse_length)
            .collect::<Result<Vec<f32>, _>>()?;

        match parts.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            other => Err(PageSetupError::MarginCount(other.len())),
        }
    }
}

/// Parses a non-negative length: `40`, `40pt`, `0.5in`, `12.7mm`.
pub fn parse_length(value: &str) -> Result<f32, PageSetupError> {
    let trimmed = value.trim().to_ascii_lowercase();
    let (number, scale) = if let Some(n) = trimmed.strip_suffix("pt") {
        (n, 1.0)
    } else if let Some(n) = trimmed.strip_suffix("in") {
        (n, POINTS_PER_INCH)
    } else if let Some(n) = trimmed.strip_suffix("mm") {
        (n, POINTS_PER_MM)
    } else {
        (trimmed.as_str(), 1.0)
    };

    let parsed: f32 = number
        .trim()
        .parse()
        .map_err(|_| PageSetupError::InvalidLength(value.trim().to_string()))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(PageSetupError::InvalidLength(value.trim().to_string()));
    }
    Ok(parsed * scale)
}

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

/// Fill color, each channel 0.0 – 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parses `#RRGGBB` (leading `#` optional).
    pub fn from_hex(value: &str) -> Result<Self, PageSetupError> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PageSetupError::InvalidColor(value.trim().to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| PageSetupError::InvalidColor(value.trim().to_string()))
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// Visual style of a single fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Rgb,
}

/// Everything the renderer needs to place lines on pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_size: PageSize,
    pub margins: Margins,
    pub heading_style: TextStyle,
    pub body_style: TextStyle,
    pub bullet_style: TextStyle,
    pub heading_line_height: f32,
    pub body_line_height: f32,
    pub blank_spacing: f32,
    /// Horizontal offset of bullet lines from the left margin.
    pub bullet_indent: f32,
    /// Word-wrap lines wider than the text column instead of letting them overflow.
    pub wrap_long_lines: bool,
}

impl Default for PageLayout {
    /// US letter, 40pt margins, 14pt bold headings, 10pt body.
    fn default() -> Self {
        Self::new(PageSize::LETTER, Margins::uniform(40.0), FontFamily::Helvetica, Rgb::BLACK)
    }
}

impl PageLayout {
    pub fn new(page_size: PageSize, margins: Margins, family: FontFamily, accent: Rgb) -> Self {
        let body_style = TextStyle {
            face: FontFace::new(family, FontWeight::Regular),
            size_pt: 10.0,
            color: Rgb::BLACK,
        };
        Self {
            page_size,
            margins,
            heading_style: TextStyle {
                face: FontFace::new(family, FontWeight::Bold),
                size_pt: 14.0,
                color: accent,
            },
            body_style,
            bullet_style: body_style,
            heading_line_height: 20.0,
            body_line_height: 15.0,
            blank_spacing: 10.0,
            bullet_indent: 12.0,
            wrap_long_lines: true,
        }
    }

    /// Lowest baseline (from the top edge) a fragment may sit on.
    pub fn bottom_limit(&self) -> f32 {
        self.page_size.height_pt - self.margins.bottom
    }

    /// Vertical space between the top margin and the bottom limit.
    pub fn usable_height(&self) -> f32 {
        self.bottom_limit() - self.margins.top
    }

    pub fn text_width(&self) -> f32 {
        self.page_size.width_pt - self.margins.left - self.margins.right
    }

    /// Rejects margins that leave no room to place text.
    pub fn validate(&self) -> Result<(), PageSetupError> {
        if self.usable_height() <= 0.0 || self.text_width() <= self.bullet_indent {
            return Err(PageSetupError::NoUsableArea {
                width: self.page_size.width_pt,
                height: self.page_size.height_pt,
            });
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
