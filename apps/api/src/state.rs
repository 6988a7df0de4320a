use std::sync::Arc;

use crate::generation::pipeline::ResumePipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The resume pipeline, holding the upstream client and layout settings.
    pub pipeline: Arc<ResumePipeline>,
}
