//! Interview support — drafts targeted questions and an executive
//! evaluation for a candidate against the confirmed job description.
//!
//! These are caller-facing drafting features, so generation failures are
//! surfaced rather than silently degraded: an empty question list helps
//! nobody.

use crate::llm_client::prompts::{
    EXECUTIVE_SUMMARY_PROMPT_TEMPLATE, INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
};
use crate::llm_client::{Generation, LlmError, TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Drafts 5 targeted interview questions mixing technical and behavioral
/// angles, grounded in the JD and resume summaries.
pub async fn generate_questions(
    generator: &dyn TextGenerator,
    jd_summary: &str,
    resume_summary: &str,
) -> Result<Generation, LlmError> {
    let prompt = INTERVIEW_QUESTIONS_PROMPT_TEMPLATE
        .replace("{jd_summary}", jd_summary)
        .replace("{resume_summary}", resume_summary);
    generator
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await
}

/// Drafts a 5-6 sentence executive evaluation: strengths, risks, and a
/// hiring recommendation.
pub async fn generate_summary(
    generator: &dyn TextGenerator,
    jd_summary: &str,
    resume_summary: &str,
) -> Result<Generation, LlmError> {
    let prompt = EXECUTIVE_SUMMARY_PROMPT_TEMPLATE
        .replace("{jd_summary}", jd_summary)
        .replace("{resume_summary}", resume_summary);
    generator
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await
}
