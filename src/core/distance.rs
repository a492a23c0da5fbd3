// distance.rs - Hamming distance and pairwise distance matrices

use crate::core::matrix::Matrix;
use log::{debug, warn};

pub type DistanceMatrix = Matrix<usize>;

/// Count mismatching positions over the first `min(len(a), len(b))` symbols.
///
/// Sequences of unequal length are truncated to the shorter one; this is
/// not an error.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    if a.len() != b.len() {
        debug!("hamming: len(a)={} != len(b)={}, truncating", a.len(), b.len());
    }
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

/// Builds dense Hamming distance matrices
#[derive(Debug, Clone)]
pub struct DistanceMatrixBuilder {
    /// Log a warning when any compared pair had to be truncated
    pub warn_on_truncation: bool,
}

impl Default for DistanceMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceMatrixBuilder {
    pub fn new() -> Self {
        Self {
            warn_on_truncation: true,
        }
    }

    pub fn quiet() -> Self {
        Self {
            warn_on_truncation: false,
        }
    }

    /// k × k matrix with entry (i, j) = d(seq[i], seq[j]) for i < j only.
    /// The diagonal and lower triangle stay 0.
    pub fn self_pairwise<S: AsRef<[u8]>>(&self, sequences: &[S]) -> DistanceMatrix {
        let k = sequences.len();
        let mut matrix = DistanceMatrix::new(k, k);
        let mut truncated = 0usize;

        for i in 0..k {
            let a = sequences[i].as_ref();
            for j in (i + 1)..k {
                let b = sequences[j].as_ref();
                if a.len() != b.len() {
                    truncated += 1;
                }
                matrix[(i, j)] = hamming_distance(a, b);
            }
        }

        self.report_truncation(truncated, k * k.saturating_sub(1) / 2);
        matrix
    }

    /// n1 × n2 matrix with entry (i, j) = d(list_a[i], list_b[j]), fully populated
    pub fn cross_pairwise<A: AsRef<[u8]>, B: AsRef<[u8]>>(
        &self,
        list_a: &[A],
        list_b: &[B],
    ) -> DistanceMatrix {
        let mut matrix = DistanceMatrix::new(list_a.len(), list_b.len());
        let mut truncated = 0usize;

        for (i, a) in list_a.iter().enumerate() {
            let a = a.as_ref();
            for (j, b) in list_b.iter().enumerate() {
                let b = b.as_ref();
                if a.len() != b.len() {
                    truncated += 1;
                }
                matrix[(i, j)] = hamming_distance(a, b);
            }
        }

        self.report_truncation(truncated, list_a.len() * list_b.len());
        matrix
    }

    fn report_truncation(&self, truncated: usize, total: usize) {
        if self.warn_on_truncation && truncated > 0 {
            warn!(
                "{} of {} pairs differ in length; compared over the shorter length",
                truncated, total
            );
        }
    }
}

/// Self-pairwise Hamming matrix with the default builder
pub fn self_pairwise_distances<S: AsRef<[u8]>>(sequences: &[S]) -> DistanceMatrix {
    DistanceMatrixBuilder::new().self_pairwise(sequences)
}

/// Cross-pairwise Hamming matrix with the default builder
pub fn cross_pairwise_distances<A: AsRef<[u8]>, B: AsRef<[u8]>>(
    list_a: &[A],
    list_b: &[B],
) -> DistanceMatrix {
    DistanceMatrixBuilder::new().cross_pairwise(list_a, list_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_single_mismatch() {
        assert_eq!(hamming_distance(b"AGCT", b"AGGT"), 1);
    }

    #[test]
    fn test_hamming_truncates_to_shorter() {
        assert_eq!(hamming_distance(b"AAAA", b"AA"), 0);
        assert_eq!(hamming_distance(b"AA", b"AAAA"), 0);
        assert_eq!(hamming_distance(b"AA", b"AA"), 0);
        // trailing symbols of the longer sequence never count
        assert_eq!(hamming_distance(b"ACGTTTTT", b"ACGA"), 1);
    }

    #[test]
    fn test_hamming_empty() {
        assert_eq!(hamming_distance(b"", b""), 0);
        assert_eq!(hamming_distance(b"", b"ACGT"), 0);
    }

    #[test]
    fn test_self_pairwise_upper_triangle() {
        let seqs = ["AAAA", "AAAT", "TTTT"];
        let m = self_pairwise_distances(&seqs);
        assert_eq!(
            m.to_rows(),
            vec![vec![0, 1, 4], vec![0, 0, 3], vec![0, 0, 0]]
        );
    }

    #[test]
    fn test_self_pairwise_degenerate_inputs() {
        let empty: [&str; 0] = [];
        assert_eq!(self_pairwise_distances(&empty).shape(), (0, 0));
        assert_eq!(self_pairwise_distances(&["ACGT"]).to_rows(), vec![vec![0]]);
    }

    #[test]
    fn test_cross_pairwise_full() {
        let a = ["AAAA", "CCCC"];
        let b = ["AAAC", "CC", "GGGG"];
        let m = DistanceMatrixBuilder::quiet().cross_pairwise(&a, &b);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.to_rows(), vec![vec![1, 2, 4], vec![3, 0, 4]]);
    }

    #[test]
    fn test_cross_pairwise_accepts_byte_vectors() {
        let a: Vec<Vec<u8>> = vec![b"ACGT".to_vec()];
        let b: Vec<String> = vec!["ACGA".to_string(), "TCGT".to_string()];
        let m = cross_pairwise_distances(&a, &b);
        assert_eq!(m.row(0), &[1, 1]);
    }
}
