// traceback.rs - Optional reconstruction of an aligned pair from DP matrices
//
// The engine stops at matrix construction. Everything here consumes a
// finished ScoreMatrix + TracebackMatrix and is never needed to build them.

use crate::core::alignment::{AlignmentMatrices, ScoreMatrix, Step};
use crate::core::scoring::Direction;
use serde::{Deserialize, Serialize};

pub const GAP: char = '-';

/// An aligned sequence pair recovered from a traceback walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub aligned_a: String,
    pub aligned_b: String,
    pub score: i64,
    /// Cell where the walk stopped
    pub start: (usize, usize),
    /// Cell where the walk began
    pub end: (usize, usize),
}

/// Alignment statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub snps: usize,
    pub indel_events: usize,
    pub indel_bases: usize,
    pub alignment_length: usize,
    pub identity_percent: f64,
}

/// First cell in row-major order holding the extremum for `direction`
pub fn best_cell(scores: &ScoreMatrix, direction: Direction) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_value = scores[(0, 0)];
    for (i, j, &value) in scores.indexed_iter() {
        let better = match direction {
            Direction::Maximize => value > best_value,
            Direction::Minimize => value < best_value,
        };
        if better {
            best = (i, j);
            best_value = value;
        }
    }
    best
}

/// Where a walk starts: bottom-right for global variants, best cell for local
pub fn end_cell(matrices: &AlignmentMatrices) -> (usize, usize) {
    if matrices.variant.is_local() {
        best_cell(&matrices.scores, Direction::Maximize)
    } else {
        let (rows, cols) = matrices.scores.shape();
        (rows - 1, cols - 1)
    }
}

/// Score used to rank the pair: H at [`end_cell`]
pub fn alignment_score(matrices: &AlignmentMatrices) -> i64 {
    matrices.scores[end_cell(matrices)]
}

/// Cells visited from `from` back to the walk's stopping point, inclusive.
///
/// Global walks follow the boundary row/column to the origin; local walks
/// stop at the first cell whose predecessor is `Step::None`.
pub fn traceback_path(matrices: &AlignmentMatrices, from: (usize, usize)) -> Vec<(usize, usize)> {
    let local = matrices.variant.is_local();
    let (mut i, mut j) = from;
    let mut path = vec![(i, j)];

    loop {
        let step = if local {
            matrices.traceback[(i, j)]
        } else if i == 0 && j == 0 {
            Step::None
        } else if i == 0 {
            Step::Left
        } else if j == 0 {
            Step::Up
        } else {
            matrices.traceback[(i, j)]
        };

        let (di, dj) = step.offset();
        if (di, dj) == (0, 0) {
            break;
        }
        i = i.wrapping_add_signed(di);
        j = j.wrapping_add_signed(dj);
        path.push((i, j));
    }
    path
}

/// Walk the traceback from [`end_cell`] and spell out the aligned pair
pub fn reconstruct(a: &[u8], b: &[u8], matrices: &AlignmentMatrices) -> AlignedPair {
    let end = end_cell(matrices);
    let path = traceback_path(matrices, end);

    let mut aligned_a = Vec::with_capacity(path.len());
    let mut aligned_b = Vec::with_capacity(path.len());
    for pair in path.windows(2) {
        let (i, j) = pair[0];
        let (pi, pj) = pair[1];
        match (i - pi, j - pj) {
            (1, 1) => {
                aligned_a.push(char::from(a[i - 1]));
                aligned_b.push(char::from(b[j - 1]));
            }
            (1, 0) => {
                aligned_a.push(char::from(a[i - 1]));
                aligned_b.push(GAP);
            }
            _ => {
                aligned_a.push(GAP);
                aligned_b.push(char::from(b[j - 1]));
            }
        }
    }
    aligned_a.reverse();
    aligned_b.reverse();

    AlignedPair {
        aligned_a: aligned_a.into_iter().collect(),
        aligned_b: aligned_b.into_iter().collect(),
        score: matrices.scores[end],
        start: path.last().copied().unwrap_or(end),
        end,
    }
}

/// Compute alignment statistics from aligned sequences
pub fn compute_alignment_stats(query: &str, reference: &str) -> AlignmentStats {
    let query_bytes = query.as_bytes();
    let ref_bytes = reference.as_bytes();
    let gap = GAP as u8;

    let mut snps = 0;
    let mut indel_events = 0;
    let mut indel_bases = 0;
    let mut identical = 0;
    let mut in_gap = false;
    let length = query_bytes.len().min(ref_bytes.len());

    for (&q, &r) in query_bytes.iter().zip(ref_bytes.iter()) {
        if q == gap || r == gap {
            if !in_gap {
                indel_events += 1;
                in_gap = true;
            }
            indel_bases += 1;
        } else {
            in_gap = false;
            if q != r {
                snps += 1;
            } else {
                identical += 1;
            }
        }
    }

    let identity_percent = if length == 0 {
        0.0
    } else {
        100.0 * identical as f64 / length as f64
    };

    AlignmentStats {
        snps,
        indel_events,
        indel_bases,
        alignment_length: length,
        identity_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alignment::{AlignmentEngine, AlignmentVariant};
    use crate::core::scoring::ScoringScheme;

    fn matrices(variant: AlignmentVariant, a: &[u8], b: &[u8]) -> AlignmentMatrices {
        AlignmentEngine::new(variant, variant.default_scheme())
            .unwrap()
            .align(a, b)
    }

    #[test]
    fn test_identical_global_is_all_diagonal() {
        let m = matrices(AlignmentVariant::GlobalLinear, b"ACGT", b"ACGT");
        let path = traceback_path(&m, (4, 4));
        assert_eq!(path, vec![(4, 4), (3, 3), (2, 2), (1, 1), (0, 0)]);
        let pair = reconstruct(b"ACGT", b"ACGT", &m);
        assert_eq!(pair.aligned_a, "ACGT");
        assert_eq!(pair.aligned_b, "ACGT");
        assert_eq!(pair.score, 4);
    }

    #[test]
    fn test_global_walk_follows_boundary() {
        let m = matrices(AlignmentVariant::GlobalLinear, b"AC", b"");
        assert_eq!(traceback_path(&m, (2, 0)), vec![(2, 0), (1, 0), (0, 0)]);
        let pair = reconstruct(b"AC", b"", &m);
        assert_eq!(pair.aligned_a, "AC");
        assert_eq!(pair.aligned_b, "--");
    }

    #[test]
    fn test_global_reconstruction_with_gap() {
        let m = AlignmentEngine::new(AlignmentVariant::GlobalLinear, ScoringScheme::linear(2, -3, -1))
            .unwrap()
            .align(b"ACGT", b"AGT");
        let pair = reconstruct(b"ACGT", b"AGT", &m);
        assert_eq!(pair.aligned_a, "ACGT");
        assert_eq!(pair.aligned_b, "A-GT");
        assert_eq!(pair.score, 5);
        assert_eq!(pair.start, (0, 0));
    }

    #[test]
    fn test_local_reconstruction_stops_at_floor() {
        let m = matrices(AlignmentVariant::LocalZeroOrigin, b"TTACG", b"GACGG");
        let pair = reconstruct(b"TTACG", b"GACGG", &m);
        assert_eq!(pair.aligned_a, "ACG");
        assert_eq!(pair.aligned_b, "ACG");
        assert_eq!(pair.score, 3);
        assert_eq!(pair.end, (5, 4));
        assert_eq!(pair.start, (2, 1));
    }

    #[test]
    fn test_local_without_positive_cells_is_empty() {
        let m = matrices(AlignmentVariant::LocalZeroOrigin, b"AAA", b"TTT");
        let pair = reconstruct(b"AAA", b"TTT", &m);
        assert!(pair.aligned_a.is_empty());
        assert_eq!(pair.score, 0);
    }

    #[test]
    fn test_best_cell_minimize() {
        let m = matrices(AlignmentVariant::GlobalEditDistance, b"AC", b"AC");
        // (0,0) and (1,1), (2,2) all hold 0; first in row-major order wins
        assert_eq!(best_cell(&m.scores, Direction::Minimize), (0, 0));
        assert_eq!(alignment_score(&m), 0);
    }

    #[test]
    fn test_compute_alignment_stats() {
        let stats = compute_alignment_stats("AC--GTA", "ACTTGAA");
        assert_eq!(stats.snps, 1);
        assert_eq!(stats.indel_events, 1);
        assert_eq!(stats.indel_bases, 2);
        assert_eq!(stats.alignment_length, 7);
        assert!((stats.identity_percent - 400.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_on_empty_alignment() {
        let stats = compute_alignment_stats("", "");
        assert_eq!(stats.alignment_length, 0);
        assert_eq!(stats.identity_percent, 0.0);
    }
}
