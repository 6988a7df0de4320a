// Prompt templates sent to the text-generation collaborator.
// The pipeline treats the response strictly as data; nothing here is parsed back.

/// Resume generation prompt. Replace `{summary}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = "\
You are a resume expert. Given the following professional summary, extract the candidate's \
name if possible and generate a complete, well-formatted professional resume in plain text format.\n\
Use clear headings (e.g., Name, Summary, Skills, Experience, Education), make the headings bold \
and uppercase, and keep the content in clean bullet points where relevant. Ensure it's ATS-optimized.\n\
Summary: {summary}";

/// Fills the resume prompt with the user's summary.
pub fn build_resume_prompt(summary: &str) -> String {
    RESUME_PROMPT_TEMPLATE.replace("{summary}", summary.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_resume_prompt_embeds_summary() {
        let prompt = build_resume_prompt("  Jane Doe, data engineer  ");
        assert!(prompt.ends_with("Summary: Jane Doe, data engineer"));
        assert!(!prompt.contains("{summary}"));
        assert!(prompt.contains("ATS-optimized"));
    }
}
