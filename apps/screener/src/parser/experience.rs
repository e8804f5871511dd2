//! Experience extraction — a three-tier fallback cascade.
//!
//! Cheap deterministic signals run first; the generative tier exists only
//! for resumes lacking both an explicit "N years" claim and inferable dates.
//! Tiers run in strict order and the first non-zero result wins; if all
//! three fail the extractor resolves to 0.

use std::collections::BTreeSet;

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::llm_client::prompts::EXPERIENCE_PROMPT_TEMPLATE;
use crate::llm_client::{TextGenerator, DEFAULT_TEMPERATURE};
use crate::parser::char_prefix;

/// Characters of resume text forwarded to the generative tier.
const GENERATOR_PROMPT_CHARS: usize = 2000;
const GENERATOR_MAX_TOKENS: u32 = 64;

static YEARS_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\+?\s+years?").expect("valid years-phrase regex"));
static CALENDAR_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("valid calendar-year regex"));
static FIRST_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("valid integer regex"));

/// Tier 1 — explicit phrase. Scans for `<integer>(+)? year(s)` and returns
/// the maximum integer found, favoring the most generous explicit claim.
pub fn years_from_phrases(text: &str) -> Option<u32> {
    YEARS_PHRASE
        .captures_iter(&text.to_lowercase())
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
}

/// Tier 2 — date-range inference. Collects distinct calendar years within a
/// sane bound (after 1970, not in the future) and approximates career span
/// as `max - min`. Fewer than two distinct qualifying years is unresolved.
pub fn years_from_date_span(text: &str, current_year: i32) -> Option<u32> {
    let years: BTreeSet<i32> = CALENDAR_YEAR
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|y| *y > 1970 && *y <= current_year)
        .collect();

    if years.len() < 2 {
        return None;
    }
    let min = *years.iter().next()?;
    let max = *years.iter().next_back()?;
    Some((max - min) as u32)
}

/// Tier 3 — generative fallback. Prompts for a single integer and parses the
/// first integer token from the response. Any failure (empty response, no
/// integer, upstream error) is unresolved, never propagated.
async fn years_from_generator(text: &str, generator: &dyn TextGenerator) -> Option<u32> {
    let prompt =
        EXPERIENCE_PROMPT_TEMPLATE.replace("{resume_text}", char_prefix(text, GENERATOR_PROMPT_CHARS));
    let generation = generator
        .generate_lossy(&prompt, DEFAULT_TEMPERATURE, GENERATOR_MAX_TOKENS)
        .await;

    FIRST_INTEGER
        .find(&generation.text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Resolves total years of professional experience through the cascade.
pub async fn extract_years_experience(text: &str, generator: &dyn TextGenerator) -> u32 {
    if let Some(years) = years_from_phrases(text).filter(|&y| y > 0) {
        debug!(years, "experience resolved from explicit phrase");
        return years;
    }

    if let Some(years) = years_from_date_span(text, Utc::now().year()).filter(|&y| y > 0) {
        debug!(years, "experience resolved from date span");
        return years;
    }

    match years_from_generator(text, generator).await.filter(|&y| y > 0) {
        Some(years) => {
            debug!(years, "experience resolved from generative fallback");
            years
        }
        None => 0,
    }
}
