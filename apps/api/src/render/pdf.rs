//! PDF Writer — serializes a `RenderedDocument` with the lopdf object model.
//!
//! Text uses the unembedded standard-14 faces with `WinAnsiEncoding`, so the
//! canonical bullet (U+2022) and common typographic punctuation survive. Any
//! character outside that code page is written as `?`.

use std::collections::BTreeSet;

use bytes::Bytes;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use crate::layout::font_metrics::FontFace;
use crate::layout::renderer::{Page, RenderedDocument};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to encode page content: {0}")]
    Content(String),

    #[error("failed to serialize PDF: {0}")]
    Write(String),
}

/// Encodes the document as PDF 1.5 bytes. Page count equals `doc.page_count()`.
pub fn write_pdf(doc: &RenderedDocument) -> Result<Bytes, PdfError> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    // One font object per face actually used, keyed by its base font name.
    let faces: BTreeSet<FontFace> = doc.fragments().map(|f| f.style.face).collect();
    let mut fonts = Dictionary::new();
    for face in &faces {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.base_font_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let page_height = doc.page_size.height_pt;
    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let encoded = page_content(page, page_height)
            .encode()
            .map_err(|e| PdfError::Content(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(doc.page_size.width_pt),
            Object::Real(page_height),
        ],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::string_literal("Resume"),
        "Producer" => Object::string_literal(concat!(
            env!("CARGO_PKG_NAME"),
            " ",
            env!("CARGO_PKG_VERSION")
        )),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);
    pdf.compress();

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(Bytes::from(buffer))
}

/// Text operators for one page. PDF space has its origin at the bottom-left.
fn page_content(page: &Page, page_height: f32) -> Content {
    let mut operations = Vec::with_capacity(page.fragments.len() * 6);
    for fragment in &page.fragments {
        let style = &fragment.style;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(style.face.base_font_name().as_bytes().to_vec()),
                Object::Real(style.size_pt),
            ],
        ));
        operations.push(Operation::new(
            "rg",
            vec![
                Object::Real(style.color.r),
                Object::Real(style.color.g),
                Object::Real(style.color.b),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                Object::Real(fragment.x),
                Object::Real(page_height - fragment.y),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&fragment.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Maps text onto the WinAnsi (Windows-1252) code page used by the base fonts.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{00A0}'..='\u{00FF}' => c as u8,
            '\t' => b' ',
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::classifier::LineClassifier;
    use crate::layout::page_setup::{PageLayout, PageSize};
    use crate::layout::renderer::render;

    fn sample_document(text: &str) -> RenderedDocument {
        let lines = LineClassifier::default().classify_text(text);
        render(&lines, &PageLayout::default())
    }

    fn base_fonts(pdf: &Document) -> BTreeSet<String> {
        pdf.objects
            .values()
            .filter_map(|o| o.as_dict().ok())
            .filter_map(|d| d.get(b"BaseFont").ok())
            .filter_map(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .collect()
    }

    #[test]
    fn test_pdf_header_and_trailer() {
        let bytes = write_pdf(&sample_document("NAME\nJane Doe")).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).into_owned();
        assert!(tail.contains("%%EOF"), "missing EOF marker: {tail:?}");
    }

    #[test]
    fn test_page_count_round_trips() {
        let text = (0..150)
            .map(|i| format!("Line {i} of data project experience"))
            .collect::<Vec<_>>()
            .join("\n");
        let doc = sample_document(&text);
        assert!(doc.page_count() > 1);

        let bytes = write_pdf(&doc).unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), doc.page_count());
    }

    #[test]
    fn test_empty_document_is_single_blank_page() {
        let doc = render(&[], &PageLayout::default());
        let bytes = write_pdf(&doc).unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
        assert!(base_fonts(&loaded).is_empty());
    }

    #[test]
    fn test_only_used_faces_are_registered() {
        let doc = sample_document("SKILLS:\n- Python");
        let loaded = Document::load_mem(&write_pdf(&doc).unwrap()).unwrap();
        let fonts = base_fonts(&loaded);
        assert_eq!(
            fonts,
            BTreeSet::from(["Helvetica".to_string(), "Helvetica-Bold".to_string()])
        );
    }

    #[test]
    fn test_custom_page_size_is_written() {
        let layout = PageLayout {
            page_size: PageSize::A4,
            ..PageLayout::default()
        };
        let doc = render(&LineClassifier::default().classify_text("Jane"), &layout);
        let loaded = Document::load_mem(&write_pdf(&doc).unwrap()).unwrap();

        let pages = loaded
            .objects
            .values()
            .filter_map(|o| o.as_dict().ok())
            .find(|d| d.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Pages".as_slice()))
            .expect("Pages node");
        let media_box = pages.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = match &media_box[2] {
            Object::Real(w) => *w,
            Object::Integer(i) => *i as f32,
            other => panic!("unexpected MediaBox entry {other:?}"),
        };
        assert!((width - PageSize::A4.width_pt).abs() < 0.01);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Rust (2024)"), b"Rust (2024)".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} Python"), vec![0x95, b' ', b'P', b'y', b't', b'h', b'o', b'n']);
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2014}"), vec![0x97]);
        assert_eq!(encode_win_ansi("\u{25A0}日"), b"??".to_vec());
    }
}
