//! Document Renderer — lays classified lines out on pages.
//!
//! Rendering is a fold over the classified lines. The accumulator (`LayoutCursor`)
//! owns the cursor position, the page being filled and the finished pages; each
//! line consumes the accumulator and returns it advanced.
//!
//! # Page-break rule
//! Before any fragment is emitted, if the cursor sits below
//! `page_height - bottom_margin`, the current page is closed and the cursor
//! resets to `(left margin, top margin)`. Blank lines only move the cursor, so a
//! trailing run of blanks never opens an empty page.
//!
//! The final page is always appended: empty input renders as one empty page.

use serde::{Deserialize, Serialize};

use crate::layout::classifier::{ClassifiedLine, LineRole};
use crate::layout::font_metrics::get_metrics;
use crate::layout::page_setup::{PageLayout, PageSize, TextStyle};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One positioned, styled piece of text.
///
/// `y` is the baseline distance from the top edge of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub role: LineRole,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub fragments: Vec<Fragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.pages.iter().flat_map(|p| p.fragments.iter())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fold accumulator
// ────────────────────────────────────────────────────────────────────────────

struct LayoutCursor<'a> {
    layout: &'a PageLayout,
    y: f32,
    current: Page,
    pages: Vec<Page>,
}

impl<'a> LayoutCursor<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        Self {
            layout,
            y: layout.margins.top,
            current: Page::default(),
            pages: Vec::new(),
        }
    }

    fn place(mut self, line: &ClassifiedLine) -> Self {
        let layout = self.layout;
        let left = layout.margins.left;
        let text = line.content();
        let role = line.role();

        match role {
            LineRole::Blank => self.y += layout.blank_spacing,
            LineRole::Heading => self.emit(
                text,
                role,
                layout.heading_style,
                left,
                0.0,
                layout.heading_line_height,
            ),
            LineRole::Bullet => {
                let x = left + layout.bullet_indent;
                // Continuation lines hang past the marker so wrapped text aligns.
                let hang = text
                    .char_indices()
                    .nth(2)
                    .map(|(idx, _)| {
                        get_metrics(&layout.bullet_style.face)
                            .measure_pt(&text[..idx], layout.bullet_style.size_pt)
                    })
                    .unwrap_or(0.0);
                self.emit(text, role, layout.bullet_style, x, hang, layout.body_line_height)
            }
            LineRole::Body => self.emit(
                text,
                role,
                layout.body_style,
                left,
                0.0,
                layout.body_line_height,
            ),
        }
        self
    }

    /// Emits `text` as one fragment, or several when it is wrapped to the column.
    fn emit(
        &mut self,
        text: &str,
        role: LineRole,
        style: TextStyle,
        x: f32,
        continuation_indent: f32,
        advance: f32,
    ) {
        let segments = self.segments(text, style, x + continuation_indent);
        for (i, segment) in segments.into_iter().enumerate() {
            self.break_page_if_needed();
            let x = if i == 0 { x } else { x + continuation_indent };
            self.current.fragments.push(Fragment {
                x,
                y: self.y,
                text: segment,
                role,
                style,
            });
            self.y += advance;
        }
    }

    /// Splits `text` so every segment fits between `x` and the right margin.
    fn segments(&self, text: &str, style: TextStyle, x: f32) -> Vec<String> {
        let layout = self.layout;
        let available = layout.page_size.width_pt - layout.margins.right - x;
        let metrics = get_metrics(&style.face);

        if !layout.wrap_long_lines || metrics.measure_pt(text, style.size_pt) <= available {
            return vec![text.to_string()];
        }

        let wrapped = metrics.wrap(text, style.size_pt, available);
        if wrapped.is_empty() {
            vec![text.to_string()]
        } else {
            wrapped
        }
    }

    fn break_page_if_needed(&mut self) {
        if self.y > self.layout.bottom_limit() {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = self.layout.margins.top;
        }
    }

    fn finish(mut self) -> RenderedDocument {
        self.pages.push(self.current);
        RenderedDocument {
            page_size: self.layout.page_size,
            pages: self.pages,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out classified lines into a paginated document. Always returns at least one page.
pub fn render(lines: &[ClassifiedLine], layout: &PageLayout) -> RenderedDocument {
    lines
        .iter()
        .fold(LayoutCursor::new(layout), LayoutCursor::place)
        .finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
