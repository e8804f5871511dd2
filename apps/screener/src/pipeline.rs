//! Pipeline driver — owns the injected model clients and runs the
//! parse-then-score flow over a batch of resumes.
//!
//! All process-wide state (generation client, embedder, vocabulary) is
//! constructed once and passed in; components stay swappable and testable
//! in isolation. Resumes are processed independently: one candidate
//! failing never rolls back records already computed for the others.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::parser::{self, JobRecord, ResumeRecord, SkillVocabulary};
use crate::scoring::{self, Embedder, ScoreBreakdown, Weights};

/// A raw resume document handed to the pipeline: the extracted plain text
/// plus the upload filename used for the name-extraction fallback and as
/// the display key for nameless candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub filename: String,
    pub text: String,
}

/// One ranked result row — the stable interchange shape for ranking tables,
/// reports, and exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Extracted name, or the filename when no extractor succeeded.
    pub candidate: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub resume: ResumeRecord,
    /// Cached resume embedding, kept so re-ranking and bias auditing never
    /// re-embed. Not part of the serialized contract.
    #[serde(skip)]
    pub embedding: Vec<f32>,
}

impl ScoredCandidate {
    /// Replays the weighted sum against the stored breakdown. Cheap;
    /// extraction and embedding are not. Rounded to the same 3-decimal
    /// precision as the originally stored total, so replaying the same
    /// weights reproduces the same score.
    pub fn rescore(&mut self, weights: &Weights) {
        self.score = scoring::round3(self.breakdown.weighted_total(weights));
    }
}

/// The extraction-and-scoring pipeline with its injected dependencies.
pub struct Pipeline {
    generator: Arc<dyn TextGenerator>,
    embedder: Arc<dyn Embedder>,
    vocabulary: SkillVocabulary,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        embedder: Arc<dyn Embedder>,
        vocabulary: SkillVocabulary,
    ) -> Self {
        Self {
            generator,
            embedder,
            vocabulary,
        }
    }

    pub fn parse_jd(&self, text: &str) -> JobRecord {
        parser::parse_jd(text, &self.vocabulary)
    }

    pub async fn parse_resume(&self, text: &str, filename: Option<&str>) -> ResumeRecord {
        parser::parse_resume(text, filename, &self.vocabulary, self.generator.as_ref()).await
    }

    /// Embeds a summary with the pipeline's embedder. Used once per job, so
    /// the batch shares a single job embedding.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.embedder.embed(text)
    }

    pub fn score_candidate(
        &self,
        job: &JobRecord,
        resume: &ResumeRecord,
        job_embedding: &[f32],
        weights: &Weights,
    ) -> Result<(f64, ScoreBreakdown, Vec<f32>), AppError> {
        scoring::score_candidate(job, resume, job_embedding, weights, self.embedder.as_ref())
    }

    /// Screens a batch of resumes against a confirmed job description and
    /// returns candidates ranked by descending total score.
    ///
    /// The job summary is embedded once. Each resume is parsed and scored
    /// independently and sequentially; an embedding failure drops only that
    /// candidate's row (logged), never the batch.
    pub async fn screen(
        &self,
        job: &JobRecord,
        documents: &[ResumeDocument],
        weights: &Weights,
    ) -> Result<Vec<ScoredCandidate>, AppError> {
        let job_embedding = self.embed(&job.summary)?;

        let mut results = Vec::with_capacity(documents.len());
        for document in documents {
            let resume = self
                .parse_resume(&document.text, Some(&document.filename))
                .await;

            match self.score_candidate(job, &resume, &job_embedding, weights) {
                Ok((score, breakdown, embedding)) => {
                    let candidate = resume
                        .name
                        .clone()
                        .unwrap_or_else(|| document.filename.clone());
                    debug!(%candidate, score, "candidate scored");
                    results.push(ScoredCandidate {
                        candidate,
                        score,
                        breakdown,
                        resume,
                        embedding,
                    });
                }
                Err(e) => {
                    error!(filename = %document.filename, "scoring failed for candidate: {e}");
                }
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(results)
    }
}
