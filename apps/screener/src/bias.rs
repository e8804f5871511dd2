//! Bias auditing — redacts demographic and name tokens from a resume so a
//! caller can compare scores before and after redaction.
//!
//! This is a heuristic sensitivity probe, not a proof of fairness: it can
//! only say that *a* shift occurred, not its direction or cause.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Marker substituted for every redacted span.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Score shift above which the probe reports sensitivity.
pub const BIAS_THRESHOLD: f64 = 0.07;

/// Demographic, marital, religious, and nationality terms to strip.
const SENSITIVE_TERMS: &[&str] = &[
    "male", "female", "married", "single", "indian", "american", "asian", "christian",
    "muslim", "hindu", "black", "white",
];

static TERM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SENSITIVE_TERMS
        .iter()
        .map(|term| {
            RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
                .expect("valid sensitive-term regex")
        })
        .collect()
});

/// Two consecutive capitalized words — a crude proper-name pattern.
static PROPER_NAME_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+\s[A-Z][a-z]+").expect("valid proper-name regex"));

/// Replaces sensitive terms (case-insensitive, in list order) and
/// consecutive-capitalized-word pairs with the redaction marker.
pub fn redact(text: &str) -> String {
    let mut redacted = text.to_string();
    for pattern in TERM_PATTERNS.iter() {
        redacted = pattern.replace_all(&redacted, REDACTION_MARKER).into_owned();
    }
    PROPER_NAME_PAIR
        .replace_all(&redacted, REDACTION_MARKER)
        .into_owned()
}

/// Outcome of comparing a candidate's score before and after redaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BiasFinding {
    /// The score moved by more than the threshold after redaction.
    MaterialShift { delta: f64 },
    NoMaterialBias,
}

impl fmt::Display for BiasFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiasFinding::MaterialShift { delta } => {
                write!(f, "Score changed by {delta} after redaction")
            }
            BiasFinding::NoMaterialBias => write!(f, "No material bias detected"),
        }
    }
}

/// Compares scores before and after redaction. A shift above the threshold
/// reports the rounded magnitude of the change.
pub fn analyze_bias(original_score: f64, redacted_score: f64) -> BiasFinding {
    let delta = (original_score - redacted_score).abs();
    if delta > BIAS_THRESHOLD {
        BiasFinding::MaterialShift {
            delta: (delta * 1000.0).round() / 1000.0,
        }
    } else {
        BiasFinding::NoMaterialBias
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_terms_case_insensitively() {
        let out = redact("A Married candidate, HINDU faith");
        assert!(!out.to_lowercase().contains("married"));
        assert!(!out.to_lowercase().contains("hindu"));
        assert!(out.contains(REDACTION_MARKER));
    }

    #[test]
    fn test_redacts_proper_name_pairs() {
        let out = redact("Prepared by Maria Garcia last week");
        assert!(!out.contains("Maria Garcia"));
        assert!(out.contains(REDACTION_MARKER));
    }

    #[test]
    fn test_leaves_neutral_text_untouched() {
        let text = "seven years of sql and python experience";
        assert_eq!(redact(text), text);
    }

    #[test]
    fn test_term_inside_longer_word_is_redacted() {
        // Substring semantics, list order: "male" strips first, leaving the
        // "fe" prefix behind. Crude, and kept that way on purpose.
        let out = redact("female applicant");
        assert!(!out.contains("female"));
    }

    #[test]
    fn test_material_shift_reports_delta() {
        let finding = analyze_bias(0.80, 0.72);
        assert_eq!(finding, BiasFinding::MaterialShift { delta: 0.08 });
        assert_eq!(finding.to_string(), "Score changed by 0.08 after redaction");
    }

    #[test]
    fn test_small_shift_reports_no_bias() {
        let finding = analyze_bias(0.50, 0.48);
        assert_eq!(finding, BiasFinding::NoMaterialBias);
        assert_eq!(finding.to_string(), "No material bias detected");
    }

    #[test]
    fn test_shift_direction_does_not_matter() {
        assert!(matches!(
            analyze_bias(0.40, 0.55),
            BiasFinding::MaterialShift { .. }
        ));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(analyze_bias(0.50, 0.43), BiasFinding::NoMaterialBias);
    }
}
