//! JD optimizer — drafts and reviews job descriptions, and scores them for
//! inclusivity, completeness, and readability.
//!
//! The three quality scores are deterministic and local; drafting and the
//! free-form review go through the text-generation capability.

use crate::llm_client::prompts::{
    JD_GENERATE_PROMPT_TEMPLATE, JD_IMPROVE_PROMPT_TEMPLATE, JD_OPTIMIZE_PROMPT_TEMPLATE,
};
use crate::llm_client::{Generation, LlmError, TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Exclusionary phrasing that depresses the inclusivity score.
const BIASED_TERMS: &[&str] = &[
    "rockstar",
    "ninja",
    "aggressive",
    "dominant",
    "young",
    "digital native",
    "competitive",
];

/// Sections a complete posting is expected to carry.
const REQUIRED_SECTIONS: &[&str] = &[
    "responsibilities",
    "requirements",
    "benefits",
    "equal opportunity",
];

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Drafts a professional job description from role parameters.
pub async fn generate_jd(
    generator: &dyn TextGenerator,
    title: &str,
    department: &str,
    seniority: &str,
    requirements: &str,
) -> Result<Generation, LlmError> {
    let prompt = JD_GENERATE_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{department}", department)
        .replace("{seniority}", seniority)
        .replace("{requirements}", requirements);
    generator
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await
}

/// Runs the improvement pass over a drafted or pasted JD.
pub async fn improve_jd(
    generator: &dyn TextGenerator,
    jd_text: &str,
) -> Result<Generation, LlmError> {
    let prompt = JD_IMPROVE_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    generator
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await
}

/// Reviews a JD for inclusivity, clarity, and keyword strength, returning
/// the model's critique.
pub async fn optimize_jd(
    generator: &dyn TextGenerator,
    jd_text: &str,
) -> Result<Generation, LlmError> {
    let prompt = JD_OPTIMIZE_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    generator
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await
}

/// Fraction of the biased-term list absent from the text, with the terms
/// that were found. 1.0 means fully clean.
pub fn inclusivity_score(text: &str) -> (f64, Vec<&'static str>) {
    let text_lower = text.to_lowercase();
    let found: Vec<&'static str> = BIASED_TERMS
        .iter()
        .copied()
        .filter(|term| text_lower.contains(term))
        .collect();
    let score = 1.0 - found.len() as f64 / BIASED_TERMS.len() as f64;
    (round3(score), found)
}

/// Fraction of the required sections present in the text, with the sections
/// that were found.
pub fn completeness_score(text: &str) -> (f64, Vec<&'static str>) {
    let text_lower = text.to_lowercase();
    let present: Vec<&'static str> = REQUIRED_SECTIONS
        .iter()
        .copied()
        .filter(|section| text_lower.contains(section))
        .collect();
    let score = present.len() as f64 / REQUIRED_SECTIONS.len() as f64;
    (round3(score), present)
}

/// Flesch reading ease normalized into `[0,1]`. Higher is easier to read.
pub fn readability_score(text: &str) -> f64 {
    round3((flesch_reading_ease(text) / 100.0).clamp(0.0, 1.0))
}

/// Flesch reading ease: 206.835 - 1.015 * (words/sentences)
/// - 84.6 * (syllables/words), with a vowel-group syllable heuristic.
fn flesch_reading_ease(text: &str) -> f64 {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_alphabetic()))
        .collect();
    if words.is_empty() {
        return 0.0;
    }

    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| s.chars().any(|c| c.is_alphabetic()))
        .count()
        .max(1);

    let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();

    206.835 - 1.015 * (words.len() as f64 / sentences as f64)
        - 84.6 * (syllables as f64 / words.len() as f64)
}

/// Counts vowel groups, discounting a trailing silent 'e'. Minimum one
/// syllable per word.
fn syllable_count(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut count = 0;
    let mut previous_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    if lower.ends_with('e') && !lower.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}
