//! Resume Pipeline — sequences one generation run.
//!
//! Flow: validate summary → build prompt → TextGenerator (single call, no retry)
//!       → cleanup → classify → render → encode PDF → ATS score → artifacts.
//!
//! Either every artifact is produced or the run fails with one `AppError`;
//! there are no partial results. Runs are serialized through `run_gate`.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::ats_scoring::{score_report, AtsReport, KeywordSet};
use crate::generation::cleanup::clean_generated_text;
use crate::layout::{render, ClassifiedLine, LineClassifier, PageLayout, RenderedDocument};
use crate::llm_client::prompts::build_resume_prompt;
use crate::llm_client::TextGenerator;
use crate::render::{write_pdf, PdfError};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Everything the pipeline needs besides the upstream collaborator.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub classifier: LineClassifier,
    pub layout: PageLayout,
    pub keywords: KeywordSet,
}

/// The complete output of one successful run.
#[derive(Debug, Clone)]
pub struct ResumeArtifacts {
    pub run_id: Uuid,
    /// Generated text exactly as the upstream returned it.
    pub resume_text: String,
    pub lines: Vec<ClassifiedLine>,
    pub document: RenderedDocument,
    pub pdf: Bytes,
    pub ats: AtsReport,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub struct ResumePipeline {
    generator: Arc<dyn TextGenerator>,
    options: PipelineOptions,
    run_gate: Mutex<()>,
}

impl ResumePipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, options: PipelineOptions) -> Self {
        Self {
            generator,
            options,
            run_gate: Mutex::new(()),
        }
    }

    /// Runs the full pipeline for one professional summary.
    ///
    /// Steps:
    /// 1. Blank summary → `EmptyInput` (the upstream is never called)
    /// 2. Prompt + one upstream call; failure → `ExternalService`, verbatim
    /// 3. cleanup → classify → render → PDF on the blocking pool
    /// 4. ATS score over the generated text
    pub async fn run(&self, raw_summary: &str) -> Result<ResumeArtifacts, AppError> {
        let summary = raw_summary.trim();
        if summary.is_empty() {
            return Err(AppError::EmptyInput);
        }
        let summary_chars = summary.chars().count();

        let _gate = self.run_gate.lock().await;
        let run_id = Uuid::new_v4();

        // Step 2: upstream generation
        info!(%run_id, summary_chars, "Generating resume");
        let prompt = build_resume_prompt(summary);
        let resume_text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                let err = AppError::from(e);
                warn!(%run_id, error = %err, "Upstream generation failed");
                return Err(err);
            }
        };

        // Step 3: layout is CPU-bound
        let classifier = self.options.classifier.clone();
        let layout = self.options.layout.clone();
        let text = resume_text.clone();
        let (lines, document, pdf) =
            tokio::task::spawn_blocking(move || typeset(&text, &classifier, &layout))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

        // Step 4: score what the upstream produced, not the cleaned copy
        let ats = score_report(&resume_text, &self.options.keywords);

        info!(
            %run_id,
            lines = lines.len(),
            pages = document.page_count(),
            pdf_bytes = pdf.len(),
            ats_score = ats.score,
            "Resume run complete"
        );

        Ok(ResumeArtifacts {
            run_id,
            resume_text,
            lines,
            document,
            pdf,
            ats,
            generated_at: Utc::now(),
        })
    }
}

/// Classifies, lays out and encodes the generated text.
fn typeset(
    text: &str,
    classifier: &LineClassifier,
    layout: &PageLayout,
) -> Result<(Vec<ClassifiedLine>, RenderedDocument, Bytes), PdfError> {
    let lines = classifier.classify_text(&clean_generated_text(text));
    let document = render(&lines, layout);
    let pdf = write_pdf(&document)?;
    Ok((lines, document, pdf))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
