// Layout: line classification, page geometry and the paginating renderer.
// Rendering is CPU-bound; the pipeline runs it inside tokio::task::spawn_blocking.

pub mod classifier;
pub mod font_metrics;
pub mod page_setup;
pub mod renderer;

// Re-export the public API consumed by the pipeline and handlers.
pub use classifier::{BulletGlyphs, ClassifiedLine, LineClassifier};
pub use page_setup::PageLayout;
pub use renderer::{render, RenderedDocument};
