//! Name extraction — a four-tier fallback cascade gated by a validity
//! predicate.
//!
//! The predicate carries most of the weight here: resumes open with section
//! headers, degree titles, and technology stack lines that a naive
//! two-to-four-word heuristic would happily mistake for a person. Each tier
//! produces candidates; the predicate decides whether any of them is
//! plausibly a name. Tiers run in strict order and stop at first success.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::llm_client::prompts::NAME_PROMPT_TEMPLATE;
use crate::llm_client::{TextGenerator, DEFAULT_TEMPERATURE};
use crate::parser::char_prefix;

/// Characters of resume text scanned by the entity-recognition tier.
const ENTITY_SCAN_CHARS: usize = 3000;
/// Non-empty leading lines inspected by the positional tier.
const POSITIONAL_LINE_COUNT: usize = 6;
/// Characters of resume text forwarded to the generative tier.
const GENERATOR_PROMPT_CHARS: usize = 2000;
const GENERATOR_MAX_TOKENS: u32 = 32;
/// Upper bound on a plausible name length.
const MAX_NAME_CHARS: usize = 40;
/// Sentinel the generative tier returns when it cannot find a name.
const NULL_SENTINEL: &str = "NULL";

/// Document-structure phrases rejected on exact (case-insensitive) match.
const RESERVED_PHRASES: &[&str] = &[
    "curriculum vitae",
    "personal details",
    "about me",
    "life philosophy",
    "work experience",
    "work history",
    "professional summary",
    "professional experience",
    "technical skills",
    "career objective",
    "contact information",
];

/// Individual tokens that disqualify a candidate: section headers, degree
/// names, job titles, technology names, geography terms.
const RESERVED_WORDS: &[&str] = &[
    // section headers
    "resume", "summary", "objective", "experience", "education", "skills", "profile",
    "contact", "references", "projects", "certifications", "achievements", "languages",
    // degrees
    "bachelor", "bachelors", "master", "masters", "phd", "mba", "bsc", "msc", "btech",
    "diploma", "university", "college", "institute",
    // job titles
    "manager", "engineer", "engineering", "developer", "analyst", "consultant",
    "director", "architect", "administrator", "scientist", "designer", "specialist",
    "senior", "junior", "lead", "intern", "associate", "project", "product", "software",
    "data", "business",
    // technologies
    "python", "java", "javascript", "sql", "aws", "azure", "docker", "kubernetes",
    "react", "node", "excel", "tableau", "linux", "git", "machine", "learning",
    // geography
    "north", "south", "east", "west", "street", "avenue", "city", "state", "india",
    "america", "american", "york", "london", "delhi", "bangalore",
];

/// Known document extensions stripped by the filename tier.
const DOC_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc", ".txt", ".rtf"];

/// Capitalized 2-4 word spans — the person-entity candidates of tier 1.
static PERSON_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][A-Za-z'-]+(?:[ \t][A-Z][A-Za-z'-]+){1,3}")
        .expect("valid person-span regex")
});

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_\-.0-9]+").expect("valid separator regex"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Whether a candidate string plausibly names a person.
///
/// Rejects: wrong token count, digits, characters outside letters / spaces /
/// apostrophes / hyphens, uncapitalized or all-caps tokens, reserved
/// document/job/technology vocabulary, reserved header phrases, and
/// over-long strings.
pub fn is_valid_name(candidate: &str) -> bool {
    let name = candidate.trim();
    if name.is_empty() || name.chars().count() >= MAX_NAME_CHARS {
        return false;
    }

    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 4 {
        return false;
    }

    if name.chars().any(|c| c.is_numeric()) {
        return false;
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '\'' || c == '-')
    {
        return false;
    }

    let lowered = name.to_lowercase();
    if RESERVED_PHRASES.contains(&lowered.as_str()) {
        return false;
    }

    for token in &tokens {
        let mut chars = token.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {}
            _ => return false,
        }
        // Reject all-caps header fragments: no two consecutive uppercase chars.
        let mut previous_upper = true;
        for c in chars {
            let upper = c.is_uppercase();
            if upper && previous_upper {
                return false;
            }
            previous_upper = upper;
        }
        if RESERVED_WORDS.contains(&token.to_lowercase().as_str()) {
            return false;
        }
    }

    true
}

fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tier 1 — person-entity recognition over a bounded prefix. Candidate spans
/// are title-cased and validated in document order.
fn name_from_entities(text: &str) -> Option<String> {
    let prefix = char_prefix(text, ENTITY_SCAN_CHARS);
    PERSON_SPAN
        .find_iter(prefix)
        .map(|span| title_case(span.as_str()))
        .find(|candidate| is_valid_name(candidate))
}

/// Tier 2 — positional heuristic over the first few non-empty lines, with
/// all-caps lines normalized to title case before validation.
fn name_from_leading_lines(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(POSITIONAL_LINE_COUNT)
        .map(|line| {
            if line.chars().any(|c| c.is_lowercase()) {
                line.to_string()
            } else {
                title_case(line)
            }
        })
        .find(|candidate| is_valid_name(candidate))
}

/// Tier 3 — filename heuristic: strip known document extensions, replace
/// separators and digits with spaces, collapse whitespace, title-case.
fn name_from_filename(filename: &str) -> Option<String> {
    let mut stem = filename;
    for ext in DOC_EXTENSIONS {
        if let Some(idx) = stem.len().checked_sub(ext.len()) {
            if stem.is_char_boundary(idx) && stem[idx..].eq_ignore_ascii_case(ext) {
                stem = &stem[..idx];
                break;
            }
        }
    }

    let spaced = SEPARATOR_RUN.replace_all(stem, " ");
    let collapsed = WHITESPACE_RUN.replace_all(spaced.trim(), " ");
    let candidate = title_case(&collapsed);

    is_valid_name(&candidate).then_some(candidate)
}

/// Tier 4 — generative fallback. The model is instructed to return a literal
/// NULL sentinel when uncertain; the sentinel or any failure means no name.
async fn name_from_generator(text: &str, generator: &dyn TextGenerator) -> Option<String> {
    let prompt =
        NAME_PROMPT_TEMPLATE.replace("{resume_text}", char_prefix(text, GENERATOR_PROMPT_CHARS));
    let generation = generator
        .generate_lossy(&prompt, DEFAULT_TEMPERATURE, GENERATOR_MAX_TOKENS)
        .await;

    let answer = generation
        .text
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string();

    if answer.is_empty() || answer.eq_ignore_ascii_case(NULL_SENTINEL) {
        return None;
    }
    Some(answer)
}

/// Resolves the candidate's name through the cascade, or `None` when every
/// tier fails. A nameless candidate still appears in results, keyed by
/// filename.
pub async fn extract_name(
    text: &str,
    filename: Option<&str>,
    generator: &dyn TextGenerator,
) -> Option<String> {
    if let Some(name) = name_from_entities(text) {
        debug!(%name, "name resolved from entity recognition");
        return Some(name);
    }

    if let Some(name) = name_from_leading_lines(text) {
        debug!(%name, "name resolved from leading lines");
        return Some(name);
    }

    if let Some(name) = filename.and_then(name_from_filename) {
        debug!(%name, "name resolved from filename");
        return Some(name);
    }

    let name = name_from_generator(text, generator).await;
    if let Some(name) = &name {
        debug!(%name, "name resolved from generative fallback");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::{FailingGenerator, StaticGenerator};

    #[test]
    fn test_accepts_plain_two_token_name() {
        assert!(is_valid_name("Maria Garcia"));
    }

    #[test]
    fn test_accepts_hyphen_and_apostrophe() {
        assert!(is_valid_name("Mary-Jane O'Connor"));
    }

    #[test]
    fn test_rejects_all_caps_header() {
        assert!(!is_valid_name("PROJECT MANAGER"));
    }

    #[test]
    fn test_rejects_reserved_title_words() {
        assert!(!is_valid_name("Project Manager"));
    }

    #[test]
    fn test_rejects_digits() {
        assert!(!is_valid_name("John123 Smith"));
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        assert!(!is_valid_name("X Æ A-12"));
    }

    #[test]
    fn test_rejects_single_token() {
        assert!(!is_valid_name("Madonna"));
    }

    #[test]
    fn test_rejects_five_tokens() {
        assert!(!is_valid_name("One Two Three Four Five"));
    }

    #[test]
    fn test_rejects_reserved_header_phrase() {
        assert!(!is_valid_name("Curriculum Vitae"));
        assert!(!is_valid_name("About Me"));
    }

    #[test]
    fn test_rejects_uncapitalized_token() {
        assert!(!is_valid_name("maria garcia"));
    }

    #[test]
    fn test_rejects_overlong_string() {
        let long = "Abcdefghijklmnopqrst Abcdefghijklmnopqrstu";
        assert!(!is_valid_name(long));
    }

    #[test]
    fn test_rejects_technology_stack_line() {
        assert!(!is_valid_name("Python Sql"));
    }

    #[test]
    fn test_entity_tier_finds_name_in_running_text() {
        let text = "The resume of Maria Garcia, submitted for review.";
        assert_eq!(name_from_entities(text), Some("Maria Garcia".to_string()));
    }

    #[test]
    fn test_entity_tier_skips_reserved_spans() {
        let text = "Machine Learning Engineer position wanted by Omar Haddad";
        assert_eq!(name_from_entities(text), Some("Omar Haddad".to_string()));
    }

    #[test]
    fn test_positional_tier_reads_leading_lines() {
        let text = "SUMMARY\n\nJane Mitchell\nData analyst with SQL focus\n";
        assert_eq!(
            name_from_leading_lines(text),
            Some("Jane Mitchell".to_string())
        );
    }

    #[test]
    fn test_positional_tier_normalizes_all_caps_line() {
        let text = "JANE MITCHELL\nData analyst\n";
        assert_eq!(
            name_from_leading_lines(text),
            Some("Jane Mitchell".to_string())
        );
    }

    #[test]
    fn test_positional_tier_bounded_line_count() {
        let text = "a\nb\nc\nd\ne\nf\nJane Mitchell\n";
        assert_eq!(name_from_leading_lines(text), None);
    }

    #[test]
    fn test_filename_tier_strips_extension_and_separators() {
        assert_eq!(
            name_from_filename("raj_patel_2024.pdf"),
            Some("Raj Patel".to_string())
        );
    }

    #[test]
    fn test_filename_tier_rejects_generic_filenames() {
        assert_eq!(name_from_filename("resume_final_v2.docx"), None);
    }

    #[tokio::test]
    async fn test_generative_tier_strips_quoting() {
        let generator = StaticGenerator::new("\"Lena Fischer\"\nConfidence: high");
        let name = name_from_generator("...", &generator).await;
        assert_eq!(name, Some("Lena Fischer".to_string()));
    }

    #[tokio::test]
    async fn test_generative_tier_honors_null_sentinel() {
        let generator = StaticGenerator::new("null");
        assert_eq!(name_from_generator("...", &generator).await, None);
    }

    #[tokio::test]
    async fn test_generative_tier_failure_means_no_name() {
        assert_eq!(name_from_generator("...", &FailingGenerator).await, None);
    }

    #[tokio::test]
    async fn test_cascade_stops_before_generator() {
        let generator = StaticGenerator::new("Wrong Person");
        let name = extract_name("Maria Garcia\nPython developer", None, &generator).await;
        assert_eq!(name, Some("Maria Garcia".to_string()));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_cascade_reaches_filename_tier() {
        let text = "objective: seeking data roles with sql and excel";
        let generator = StaticGenerator::new("NULL");
        let name = extract_name(text, Some("amara_okafor.docx"), &generator).await;
        assert_eq!(name, Some("Amara Okafor".to_string()));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_cascade_resolves_none_when_all_tiers_fail() {
        let text = "objective: seeking data roles";
        let generator = StaticGenerator::new("NULL");
        let name = extract_name(text, Some("resume.pdf"), &generator).await;
        assert_eq!(name, None);
        assert_eq!(generator.calls(), 1);
    }
}
