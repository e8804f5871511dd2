//! Resume screening pipeline: multi-tier field extraction, multi-signal
//! scoring, and post-hoc bias auditing.
//!
//! The public surface is the [`Pipeline`] driver plus the interchange
//! shapes it produces ([`parser::ResumeRecord`], [`parser::JobRecord`],
//! [`scoring::ScoreBreakdown`], [`pipeline::ScoredCandidate`]). Everything
//! model-shaped is injected: text generation behind
//! [`llm_client::TextGenerator`], embedding behind [`scoring::Embedder`].

pub mod bias;
pub mod config;
pub mod errors;
pub mod interview;
pub mod jd_optimizer;
pub mod llm_client;
pub mod parser;
pub mod pipeline;
pub mod scoring;

pub use config::Config;
pub use errors::AppError;
pub use pipeline::{Pipeline, ResumeDocument, ScoredCandidate};
