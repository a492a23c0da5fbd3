// mod.rs - Core logic module

pub mod alignment;
pub mod batch;
pub mod distance;
pub mod matrix;
pub mod scoring;
pub mod traceback;

// Re-export main types for convenience
pub use alignment::{
    align_pair, AlignmentEngine, AlignmentMatrices, AlignmentVariant, ScoreMatrix, Step,
    TracebackMatrix,
};
pub use batch::{cross_alignment_scores, pairwise_alignment_scores};
pub use distance::{
    cross_pairwise_distances, hamming_distance, self_pairwise_distances, DistanceMatrix,
    DistanceMatrixBuilder,
};
pub use matrix::Matrix;
pub use scoring::{Direction, EditCosts, LinearScores, ScoringScheme, SubstitutionMode};
pub use traceback::{compute_alignment_stats, reconstruct, AlignedPair, AlignmentStats};
