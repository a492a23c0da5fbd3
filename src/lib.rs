// lib.rs - msadist library root

//! # msadist - Pairwise alignment DP matrices and Hamming distance matrices
//!
//! This library builds full dynamic-programming score and traceback matrices
//! for five pairwise alignment variants and computes Hamming distance
//! matrices over sequence lists. It is the computational core behind
//! sequence screening and genetic-distance workflows on FASTA data.
//!
//! ## Features
//!
//! - **Global alignment**: boolean, linear and edit-distance variants
//!   (Needleman–Wunsch family)
//! - **Local alignment**: standard and zero-origin variants (Smith–Waterman family)
//! - **Traceback**: every cell records its predecessor move; the aligned pair
//!   and its statistics can be reconstructed on demand
//! - **Distance matrices**: self-pairwise (upper triangle) and cross-pairwise Hamming
//! - **Batch scoring**: all-vs-all alignment scores across a rayon pool
//! - **Multiple formats**: TSV, CSV, PHYLIP and JSON output
//!
//! ## Basic Usage
//!
//! ```rust
//! use msadist::prelude::*;
//!
//! let engine = AlignmentEngine::new(AlignmentVariant::GlobalLinear, ScoringScheme::textbook())?;
//! let matrices = engine.align(b"GATTACA", b"GCATGCU");
//! assert_eq!(matrices.scores.shape(), (8, 8));
//! assert_eq!(matrices.final_score(), 0);
//!
//! let sequences: [&[u8]; 3] = [b"ACGT", b"ACGA", b"TCGA"];
//! let distances = self_pairwise_distances(&sequences);
//! assert_eq!(distances[(0, 2)], 2);
//! assert_eq!(distances[(2, 0)], 0);
//! # Ok::<(), msadist::MsaError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{align_pair, cross_alignment_scores, pairwise_alignment_scores};
    pub use crate::core::{
        cross_pairwise_distances, hamming_distance, self_pairwise_distances, DistanceMatrix,
        DistanceMatrixBuilder,
    };
    pub use crate::core::{AlignmentEngine, AlignmentMatrices, AlignmentVariant, Step};
    pub use crate::core::{Matrix, ScoreMatrix, ScoringScheme, TracebackMatrix};
    pub use crate::data::{SequenceRecord, SequenceSet};
    pub use crate::error::MsaError;
    pub use crate::output::{write_matrix, Labels, OutputFormat};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use crate::core::{AlignmentEngine, AlignmentVariant, DistanceMatrixBuilder, ScoringScheme};
pub use data::{SequenceRecord, SequenceSet};
pub use error::MsaError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "msadist v{} - Pairwise alignment and distance matrix calculator",
        VERSION
    )
}
