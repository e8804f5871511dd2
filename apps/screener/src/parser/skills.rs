//! Skill extraction — exact-substring containment against a fixed,
//! caller-extensible vocabulary. Deliberately lightweight: no tokenization,
//! no stemming, case-insensitive.

use std::collections::BTreeSet;

/// The reference skill vocabulary. Multi-word entries match as phrases.
const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "sql",
    "java",
    "aws",
    "docker",
    "kubernetes",
    "excel",
    "tableau",
    "machine learning",
    "deep learning",
    "project management",
    "react",
    "node",
];

/// A fixed list of lower-cased skill tokens matched by substring containment.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    entries: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().map(|s| s.to_string()))
    }
}

impl SkillVocabulary {
    /// Builds a vocabulary from caller-supplied entries. Entries are
    /// lower-cased and deduplicated; empty entries are dropped.
    pub fn new(entries: impl IntoIterator<Item = String>) -> Self {
        let mut seen = BTreeSet::new();
        let entries = entries
            .into_iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .filter(|e| seen.insert(e.clone()))
            .collect();
        Self { entries }
    }

    /// Extends the default vocabulary with additional entries.
    pub fn with_extra(extra: impl IntoIterator<Item = String>) -> Self {
        Self::new(
            DEFAULT_SKILLS
                .iter()
                .map(|s| s.to_string())
                .chain(extra),
        )
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns every vocabulary entry occurring anywhere as a substring of
    /// the lower-cased text. Total: always a (possibly empty) set.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let text_lower = text.to_lowercase();
        self.entries
            .iter()
            .filter(|skill| text_lower.contains(skill.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_is_case_insensitive() {
        let vocab = SkillVocabulary::default();
        let skills = vocab.extract("Expert in PYTHON and Docker.");
        assert!(skills.contains("python"));
        assert!(skills.contains("docker"));
    }

    #[test]
    fn test_extract_matches_multiword_phrases() {
        let vocab = SkillVocabulary::default();
        let skills = vocab.extract("Applied machine learning to fraud detection");
        assert!(skills.contains("machine learning"));
    }

    #[test]
    fn test_extract_collapses_duplicates() {
        let vocab = SkillVocabulary::default();
        let skills = vocab.extract("sql sql SQL and more sql");
        assert_eq!(skills.iter().filter(|s| *s == "sql").count(), 1);
    }

    #[test]
    fn test_extract_empty_text_yields_empty_set() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.extract("").is_empty());
    }

    #[test]
    fn test_extract_is_idempotent() {
        let vocab = SkillVocabulary::default();
        let text = "Python, AWS, and Tableau dashboards";
        assert_eq!(vocab.extract(text), vocab.extract(text));
    }

    #[test]
    fn test_custom_vocabulary_extends_matching() {
        let vocab = SkillVocabulary::with_extra(vec!["rust".to_string()]);
        let skills = vocab.extract("Systems programming in Rust");
        assert!(skills.contains("rust"));
    }

    #[test]
    fn test_vocabulary_normalizes_and_dedupes_entries() {
        let vocab = SkillVocabulary::new(vec![
            "  Rust ".to_string(),
            "rust".to_string(),
            "".to_string(),
        ]);
        assert_eq!(vocab.entries(), &["rust".to_string()]);
    }
}
