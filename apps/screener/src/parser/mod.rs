//! Structured document builder — composes the three extractors into
//! normalized resume and job-description records.
//!
//! Builders are total: every extractor is failure-tolerant, so parsing
//! never errors. Summaries are bounded prefixes reused consistently
//! wherever the text is later embedded or displayed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::llm_client::TextGenerator;

pub mod experience;
pub mod name;
pub mod skills;

pub use skills::SkillVocabulary;

/// Resume summary bound: trades embedding/prompt cost against context.
pub const RESUME_SUMMARY_CHARS: usize = 1000;
/// Job-description summary bound.
pub const JD_SUMMARY_CHARS: usize = 1500;

/// Normalized representation of an uploaded candidate document.
/// Created once per document; immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// `None` when no extraction tier succeeds; such candidates still
    /// appear in results, keyed by filename.
    pub name: Option<String>,
    /// 0 when unresolved.
    pub years_experience: u32,
    pub skills: BTreeSet<String>,
    pub summary: String,
}

/// Normalized representation of a confirmed job description.
/// Created once; immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub summary: String,
    pub skills: BTreeSet<String>,
    /// 0 means unspecified.
    pub years_required: u32,
}

/// Char-boundary-safe prefix of at most `max_chars` characters.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parses a raw resume into a normalized record.
pub async fn parse_resume(
    text: &str,
    filename: Option<&str>,
    vocabulary: &SkillVocabulary,
    generator: &dyn TextGenerator,
) -> ResumeRecord {
    ResumeRecord {
        name: name::extract_name(text, filename, generator).await,
        years_experience: experience::extract_years_experience(text, generator).await,
        skills: vocabulary.extract(text),
        summary: char_prefix(text, RESUME_SUMMARY_CHARS).to_string(),
    }
}

/// Parses a raw job description into a normalized record.
///
/// Required years come from the explicit-phrase tier only: date-range
/// inference and the generative fallback model a career span, which has no
/// meaning for a job posting.
pub fn parse_jd(text: &str, vocabulary: &SkillVocabulary) -> JobRecord {
    JobRecord {
        summary: char_prefix(text, JD_SUMMARY_CHARS).to_string(),
        skills: vocabulary.extract(text),
        years_required: experience::years_from_phrases(text).unwrap_or(0),
    }
}
