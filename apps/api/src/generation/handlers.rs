//! Axum route handlers for the Resume API.

use axum::{
    extract::{FromRequest, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::ats_scoring::AtsReport;
use crate::generation::pipeline::ResumeArtifacts;
use crate::layout::ClassifiedLine;
use crate::state::AppState;

/// Download name of the rendered resume.
pub const PDF_FILENAME: &str = "Resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `Json` extractor whose rejections render as `AppError::Validation`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub run_id: Uuid,
    pub resume_text: String,
    pub ats: AtsReport,
    pub lines: Vec<ClassifiedLine>,
    pub page_count: usize,
    pub pdf_base64: String,
    pub generated_at: DateTime<Utc>,
}

impl From<ResumeArtifacts> for GenerateResponse {
    fn from(artifacts: ResumeArtifacts) -> Self {
        Self {
            run_id: artifacts.run_id,
            page_count: artifacts.document.page_count(),
            pdf_base64: STANDARD.encode(&artifacts.pdf),
            resume_text: artifacts.resume_text,
            ats: artifacts.ats,
            lines: artifacts.lines,
            generated_at: artifacts.generated_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Full pipeline: generate → classify → render → score.
/// Returns the text, ATS report, classified lines and the PDF as base64.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let artifacts = state.pipeline.run(&request.summary).await?;
    Ok(Json(artifacts.into()))
}

/// POST /api/v1/resumes/pdf
///
/// Same pipeline as `/generate`; responds with the PDF itself as an attachment.
pub async fn handle_pdf(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let artifacts = state.pipeline.run(&request.summary).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILENAME}\""),
            ),
        ],
        artifacts.pdf,
    ))
}

/// GET /
///
/// Minimal single-page form over the JSON API.
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Resume Builder with ATS Scoring</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
  textarea { width: 100%; height: 14rem; }
  pre { white-space: pre-wrap; background: #f6f6f6; padding: 1rem; }
  .error { color: #b00020; }
</style>
</head>
<body>
<h1>Resume Builder with ATS Scoring</h1>
<p>Enter your professional summary. A complete, ATS-friendly resume is generated from it.</p>
<textarea id="summary" placeholder="Professional Summary"></textarea>
<p><button id="generate">Generate Resume</button> <span id="status"></span></p>
<div id="result" hidden>
  <h2>Resume Output</h2>
  <pre id="resume"></pre>
  <h2 id="score"></h2>
  <a id="download" download="Resume.pdf">Download PDF</a>
</div>
<script>
const button = document.getElementById("generate");
const status = document.getElementById("status");
button.addEventListener("click", async () => {
  status.className = "";
  status.textContent = "Generating your resume...";
  button.disabled = true;
  try {
    const res = await fetch("/api/v1/resumes/generate", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ summary: document.getElementById("summary").value }),
    });
    const body = await res.json();
    if (!res.ok) {
      status.className = "error";
      status.textContent = body.error.message;
      return;
    }
    document.getElementById("resume").textContent = body.resume_text;
    document.getElementById("score").textContent = `ATS Score: ${body.ats.score}/100`;
    document.getElementById("download").href = `data:application/pdf;base64,${body.pdf_base64}`;
    document.getElementById("result").hidden = false;
    status.textContent = "Resume Generated!";
  } catch (err) {
    status.className = "error";
    status.textContent = String(err);
  } finally {
    button.disabled = false;
  }
});
</script>
</body>
</html>
"#;
