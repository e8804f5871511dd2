//! Scoring engine — combines four independent sub-scores into a weighted
//! total.
//!
//! The four dimensions never short-circuit each other: each is computable
//! on its own, and the breakdown is stored so that re-ranking under new
//! weights replays a plain weighted sum instead of re-extracting or
//! re-embedding.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::parser::{JobRecord, ResumeRecord};

pub mod embedder;

pub use embedder::{cosine_similarity, Embedder, HashEmbedder, EMBEDDING_DIM};

/// Caller-supplied weights over the four scoring dimensions. Non-negative,
/// not required to sum to 1 — the total is an unnormalized weighted sum,
/// and callers choose weights for the output range they want.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub semantic: f64,
    pub gap: f64,
}

impl Default for Weights {
    /// The reference UI defaults, which happen to sum to 1.0.
    fn default() -> Self {
        Self {
            skills: 0.3,
            experience: 0.2,
            semantic: 0.3,
            gap: 0.2,
        }
    }
}

/// The four sub-scores, each rounded to 3 decimals. All nominally in
/// `[0,1]`; `semantic_score` is unclamped cosine similarity and may fall
/// outside that range in principle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_score: f64,
    pub experience_score: f64,
    pub semantic_score: f64,
    pub gap_score: f64,
}

impl ScoreBreakdown {
    /// Re-applies weights to the stored sub-scores. Bit-for-bit reproducible
    /// from the breakdown alone — no re-embedding, no re-extraction.
    pub fn weighted_total(&self, weights: &Weights) -> f64 {
        weights.skills * self.skill_score
            + weights.experience * self.experience_score
            + weights.semantic * self.semantic_score
            + weights.gap * self.gap_score
    }
}

/// Display/storage precision shared by sub-scores and totals.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Fraction of required skills the resume covers. 0 when the job requires
/// no skills — no requirement means no signal, not a perfect score.
fn skill_score(job: &JobRecord, resume: &ResumeRecord) -> f64 {
    if job.skills.is_empty() {
        return 0.0;
    }
    let matched = job.skills.intersection(&resume.skills).count();
    matched as f64 / job.skills.len() as f64
}

/// Experience fit, capped at 1 — exceeding the requirement earns no extra
/// credit. 0 when the job states no requirement.
fn experience_score(job: &JobRecord, resume: &ResumeRecord) -> f64 {
    if job.years_required == 0 {
        return 0.0;
    }
    (resume.years_experience as f64 / job.years_required as f64).min(1.0)
}

/// Penalty for missing required skills. Not `1 - skill_score` in general:
/// both derive from the same two sets, but this one only counts what the
/// job needs and the resume lacks.
fn gap_score(job: &JobRecord, resume: &ResumeRecord) -> f64 {
    if job.skills.is_empty() {
        return 0.0;
    }
    let missing = job.skills.difference(&resume.skills).count();
    1.0 - missing as f64 / job.skills.len() as f64
}

/// Scores one resume against the job record and the shared job embedding.
///
/// Returns the weighted total, the breakdown, and the freshly computed
/// resume embedding so callers can cache it (re-ranking, bias auditing)
/// instead of re-embedding on every weight change. An embedding failure
/// propagates: semantic similarity has no safe default.
pub fn score_candidate(
    job: &JobRecord,
    resume: &ResumeRecord,
    job_embedding: &[f32],
    weights: &Weights,
    embedder: &dyn Embedder,
) -> Result<(f64, ScoreBreakdown, Vec<f32>), AppError> {
    let resume_embedding = embedder.embed(&resume.summary)?;
    let semantic = cosine_similarity(job_embedding, &resume_embedding) as f64;

    let breakdown = ScoreBreakdown {
        skill_score: round3(skill_score(job, resume)),
        experience_score: round3(experience_score(job, resume)),
        semantic_score: round3(semantic),
        gap_score: round3(gap_score(job, resume)),
    };

    let total = round3(breakdown.weighted_total(weights));
    Ok((total, breakdown, resume_embedding))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn skills(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn job(required: &[&str], years: u32) -> JobRecord {
        JobRecord {
            summary: "Data engineer building python and sql pipelines".to_string(),
            skills: skills(required),
            years_required: years,
        }
    }

    fn resume(owned: &[&str], years: u32) -> ResumeRecord {
        ResumeRecord {
            name: Some("Maria Garcia".to_string()),
            years_experience: years,
            skills: skills(owned),
            summary: "Engineer with python and excel background".to_string(),
        }
    }

    #[test]
    fn test_reference_scenario() {
        // job {python, sql} @ 5 years vs resume {python, excel} @ 3 years
        let embedder = HashEmbedder::default();
        let job = job(&["python", "sql"], 5);
        let resume = resume(&["python", "excel"], 3);
        let job_embedding = embedder.embed(&job.summary).unwrap();

        let (_, breakdown, _) =
            score_candidate(&job, &resume, &job_embedding, &Weights::default(), &embedder)
                .unwrap();

        assert_eq!(breakdown.skill_score, 0.5);
        assert_eq!(breakdown.gap_score, 0.5);
        assert_eq!(breakdown.experience_score, 0.6);
    }

    #[test]
    fn test_empty_required_skills_zeroes_both_skill_signals() {
        let embedder = HashEmbedder::default();
        let job = job(&[], 5);
        let resume = resume(&["python", "sql", "aws"], 10);
        let job_embedding = embedder.embed(&job.summary).unwrap();

        let (_, breakdown, _) =
            score_candidate(&job, &resume, &job_embedding, &Weights::default(), &embedder)
                .unwrap();

        assert_eq!(breakdown.skill_score, 0.0);
        assert_eq!(breakdown.gap_score, 0.0);
    }

    #[test]
    fn test_experience_score_caps_at_one() {
        let job = job(&["python"], 2);
        let resume = resume(&["python"], 50);
        assert_eq!(experience_score(&job, &resume), 1.0);
    }

    #[test]
    fn test_no_required_years_means_no_experience_signal() {
        let job = job(&["python"], 0);
        let resume = resume(&["python"], 10);
        assert_eq!(experience_score(&job, &resume), 0.0);
    }

    #[test]
    fn test_gap_score_ignores_irrelevant_extras() {
        // Resume covers everything required plus noise: no gap penalty,
        // even though skill_score's complement would differ with extras.
        let job = job(&["python", "sql"], 3);
        let resume = resume(&["python", "sql", "excel", "tableau"], 3);
        assert_eq!(gap_score(&job, &resume), 1.0);
    }

    #[test]
    fn test_semantic_score_uses_cached_job_embedding() {
        let embedder = HashEmbedder::default();
        let job = job(&["python"], 3);
        let resume = resume(&["python"], 3);
        let job_embedding = embedder.embed(&job.summary).unwrap();

        let (_, breakdown, resume_embedding) =
            score_candidate(&job, &resume, &job_embedding, &Weights::default(), &embedder)
                .unwrap();

        let expected =
            round3_for_test(cosine_similarity(&job_embedding, &resume_embedding) as f64);
        assert_eq!(breakdown.semantic_score, expected);
    }

    #[test]
    fn test_reweighting_stored_breakdown_is_exact() {
        let breakdown = ScoreBreakdown {
            skill_score: 0.5,
            experience_score: 0.6,
            semantic_score: 0.412,
            gap_score: 0.5,
        };
        let weights = Weights {
            skills: 0.4,
            experience: 0.1,
            semantic: 0.4,
            gap: 0.1,
        };

        let expected = 0.4 * 0.5 + 0.1 * 0.6 + 0.4 * 0.412 + 0.1 * 0.5;
        assert_eq!(breakdown.weighted_total(&weights), expected);
        // Replaying with the same weights reproduces the same bits.
        assert_eq!(
            breakdown.weighted_total(&weights),
            breakdown.weighted_total(&weights)
        );
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let breakdown = ScoreBreakdown {
            skill_score: 1.0,
            experience_score: 1.0,
            semantic_score: 1.0,
            gap_score: 1.0,
        };
        let heavy = Weights {
            skills: 2.0,
            experience: 2.0,
            semantic: 2.0,
            gap: 2.0,
        };
        assert_eq!(breakdown.weighted_total(&heavy), 8.0);
    }

    #[test]
    fn test_sub_scores_round_to_three_decimals() {
        let embedder = HashEmbedder::default();
        let job = job(&["python", "sql", "aws"], 3);
        let resume = resume(&["python"], 1);
        let job_embedding = embedder.embed(&job.summary).unwrap();

        let (_, breakdown, _) =
            score_candidate(&job, &resume, &job_embedding, &Weights::default(), &embedder)
                .unwrap();

        // 1/3 rounds to 0.333
        assert_eq!(breakdown.skill_score, 0.333);
        assert_eq!(breakdown.experience_score, 0.333);
    }

    fn round3_for_test(value: f64) -> f64 {
        (value * 1000.0).round() / 1000.0
    }
}
