// Render: turns a laid-out RenderedDocument into downloadable bytes.

pub mod pdf;

pub use pdf::{write_pdf, PdfError};
