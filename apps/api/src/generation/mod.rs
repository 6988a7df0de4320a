// Resume generation: upstream call, markdown cleanup, ATS scoring and the run pipeline.
// All upstream calls go through llm_client::TextGenerator; nothing here talks HTTP directly.

pub mod ats_scoring;
pub mod cleanup;
pub mod handlers;
pub mod pipeline;
