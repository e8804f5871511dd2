//! Semantic embedding — maps free text to a fixed-length dense vector.
//!
//! The trait is the seam: scoring depends only on `Embedder`, so the
//! default feature-hashing implementation can be swapped for a model-backed
//! one without touching the engine. Two embeddings are comparable only if
//! produced by the same embedder.

use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;
use tracing::warn;

use crate::errors::AppError;

/// Dimensionality of every vector produced by the default embedder.
pub const EMBEDDING_DIM: usize = 384;

// Fixed seeds keep the hash deterministic across processes and Rust
// versions. Changing them changes every embedding.
const HASH_SEED_K0: u64 = 0x7265_7375_6d65_7376; // "resumesv"
const HASH_SEED_K1: u64 = 0x6a6f_625f_6d61_7463; // "job_matc"

/// Text-to-vector capability. No retries or error branches at this layer:
/// failures propagate to the caller, where they are fatal to that single
/// candidate's scoring.
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;
}

/// Deterministic feature-hashing embedder: lower-cased word tokens are
/// sign-hashed into a fixed number of dimensions and L2-normalized.
/// Identical text always yields identical vectors.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimension: EMBEDDING_DIM,
        }
    }
}

impl HashEmbedder {
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        hasher.finish()
    }
}

impl Embedder for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = self.hash_token(token);
            let idx = (hash as usize) % self.dimension;
            // Sign hashing: a second hash bit decides the direction, which
            // keeps colliding tokens from only ever accumulating.
            let sign = if self.hash_token(&format!("{token}#sign")) & 1 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }
}

/// Raw cosine similarity, unclamped. Returns 0.0 for zero-norm vectors and
/// for dimension mismatches (which indicate embeddings from different
/// embedders and are logged).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
