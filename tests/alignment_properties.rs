use msadist::core::traceback::{reconstruct, traceback_path};
use msadist::prelude::*;
use proptest::prelude::*;

const VARIANTS: [AlignmentVariant; 4] = [
    AlignmentVariant::GlobalBoolean,
    AlignmentVariant::GlobalLinear,
    AlignmentVariant::LocalStandard,
    AlignmentVariant::LocalZeroOrigin,
];

fn full_linear_score(s: &[u8], t: &[u8], m: i32, x: i32, gap: i32) -> Vec<Vec<i64>> {
    let (m, x, gap) = (i64::from(m), i64::from(x), i64::from(gap));
    let n = s.len();
    let k = t.len();
    let mut dp = vec![vec![0i64; k + 1]; n + 1];
    for i in 1..=n {
        dp[i][0] = dp[i - 1][0] + gap;
    }
    for j in 1..=k {
        dp[0][j] = dp[0][j - 1] + gap;
    }
    for i in 1..=n {
        for j in 1..=k {
            let score = if s[i - 1] == t[j - 1] { m } else { x };
            let diag = dp[i - 1][j - 1] + score;
            let up = dp[i - 1][j] + gap;
            let left = dp[i][j - 1] + gap;
            dp[i][j] = diag.max(up).max(left);
        }
    }
    dp
}

fn full_edit_cost(s: &[u8], t: &[u8], mc: i32, xc: i32, ins: i32, del: i32) -> Vec<Vec<i64>> {
    let (mc, xc, ins, del) = (i64::from(mc), i64::from(xc), i64::from(ins), i64::from(del));
    let n = s.len();
    let k = t.len();
    let mut dp = vec![vec![0i64; k + 1]; n + 1];
    for i in 1..=n {
        dp[i][0] = dp[i - 1][0] + ins;
    }
    for j in 1..=k {
        dp[0][j] = dp[0][j - 1] + del;
    }
    for i in 1..=n {
        for j in 1..=k {
            let cost = if s[i - 1] == t[j - 1] { mc } else { xc };
            let diag = dp[i - 1][j - 1] + cost;
            let up = dp[i - 1][j] + ins;
            let left = dp[i][j - 1] + del;
            dp[i][j] = diag.min(up).min(left);
        }
    }
    dp
}

fn path_monotone(path: &[(usize, usize)]) -> bool {
    path.windows(2).all(|w| {
        let di = w[0].0 as isize - w[1].0 as isize;
        let dj = w[0].1 as isize - w[1].1 as isize;
        matches!((di, dj), (1, 0) | (0, 1) | (1, 1))
    })
}

proptest! {
    #[test]
    fn shape_is_lengths_plus_one(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        for variant in VARIANTS {
            let engine = AlignmentEngine::new(variant, ScoringScheme::textbook()).unwrap();
            let m = engine.align(a.as_bytes(), b.as_bytes());
            prop_assert_eq!(m.scores.shape(), (a.len() + 1, b.len() + 1));
            prop_assert_eq!(m.traceback.shape(), (a.len() + 1, b.len() + 1));
        }
        let engine = AlignmentEngine::new(AlignmentVariant::GlobalEditDistance, ScoringScheme::levenshtein()).unwrap();
        prop_assert_eq!(engine.align(a.as_bytes(), b.as_bytes()).scores.shape(), (a.len() + 1, b.len() + 1));
    }

    #[test]
    fn global_linear_matches_reference(
        a in "[ACGT]{0,7}",
        b in "[ACGT]{0,7}",
        m in 0i32..4,
        x in -3i32..2,
        gap in -3i32..1,
    ) {
        let engine = AlignmentEngine::new(AlignmentVariant::GlobalLinear, ScoringScheme::linear(m, x, gap)).unwrap();
        let got = engine.align(a.as_bytes(), b.as_bytes());
        prop_assert_eq!(got.scores.to_rows(), full_linear_score(a.as_bytes(), b.as_bytes(), m, x, gap));
    }

    #[test]
    fn extreme_parameters_match_reference(
        a in "[ACGT]{0,7}",
        b in "[ACGT]{0,7}",
        x in i32::MIN..-1_000_000,
        gap in i32::MIN..-1_000_000,
    ) {
        let engine = AlignmentEngine::new(AlignmentVariant::GlobalLinear, ScoringScheme::linear(i32::MAX, x, gap)).unwrap();
        let got = engine.align(a.as_bytes(), b.as_bytes());
        prop_assert_eq!(got.scores.to_rows(), full_linear_score(a.as_bytes(), b.as_bytes(), i32::MAX, x, gap));

        let engine = AlignmentEngine::new(
            AlignmentVariant::GlobalEditDistance,
            ScoringScheme::edit_costs(0, i32::MAX, i32::MAX, i32::MAX),
        ).unwrap();
        let got = engine.align(a.as_bytes(), b.as_bytes());
        prop_assert_eq!(got.scores.to_rows(), full_edit_cost(a.as_bytes(), b.as_bytes(), 0, i32::MAX, i32::MAX, i32::MAX));
    }

    #[test]
    fn edit_distance_matches_reference(
        a in "[ACGT]{0,7}",
        b in "[ACGT]{0,7}",
        mc in 0i32..2,
        xc in 0i32..4,
        ins in 0i32..4,
        del in 0i32..4,
    ) {
        let engine = AlignmentEngine::new(
            AlignmentVariant::GlobalEditDistance,
            ScoringScheme::edit_costs(mc, xc, ins, del),
        ).unwrap();
        let got = engine.align(a.as_bytes(), b.as_bytes());
        prop_assert_eq!(got.scores.to_rows(), full_edit_cost(a.as_bytes(), b.as_bytes(), mc, xc, ins, del));
    }

    #[test]
    fn local_cells_are_non_negative(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}", gap in -3i32..0) {
        let scheme = ScoringScheme::linear(2, -1, gap);
        for variant in [AlignmentVariant::LocalStandard, AlignmentVariant::LocalZeroOrigin] {
            let m = AlignmentEngine::new(variant, scheme).unwrap().align(a.as_bytes(), b.as_bytes());
            for (i, j, &v) in m.scores.indexed_iter() {
                if i > 0 && j > 0 {
                    prop_assert!(v >= 0);
                }
            }
        }
        let zero = AlignmentEngine::new(AlignmentVariant::LocalZeroOrigin, scheme).unwrap();
        let m = zero.align(a.as_bytes(), b.as_bytes());
        prop_assert!(m.scores.indexed_iter().all(|(_, _, &v)| v >= 0));
    }

    #[test]
    fn traceback_points_at_a_term_that_produced_the_value(
        a in "[ACGT]{1,7}",
        b in "[ACGT]{1,7}",
        gap in -3i32..0,
    ) {
        let scheme = ScoringScheme::linear(1, -1, gap);
        let m = AlignmentEngine::new(AlignmentVariant::GlobalLinear, scheme).unwrap().align(a.as_bytes(), b.as_bytes());
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let value = m.scores[(i, j)];
                let sub = if a.as_bytes()[i - 1] == b.as_bytes()[j - 1] { 1 } else { -1 };
                let expected = match m.traceback[(i, j)] {
                    Step::Diagonal => m.scores[(i - 1, j - 1)] + sub,
                    Step::Up => m.scores[(i - 1, j)] + i64::from(gap),
                    Step::Left => m.scores[(i, j - 1)] + i64::from(gap),
                    Step::None => i64::MIN,
                };
                prop_assert_eq!(value, expected);
            }
        }
        let path = traceback_path(&m, (a.len(), b.len()));
        prop_assert_eq!(path.last().copied(), Some((0, 0)));
        prop_assert!(path_monotone(&path));
    }

    #[test]
    fn identical_sequences_align_on_the_diagonal(
        s in "[ACGT]{1,10}",
        m in 1i32..5,
        gap_below in 0i32..4,
        mismatch_below in 1i32..5,
    ) {
        let gap = -gap_below;
        let mismatch = m - mismatch_below;
        let scheme = ScoringScheme::linear(m, mismatch, gap);
        let matrices = AlignmentEngine::new(AlignmentVariant::GlobalLinear, scheme).unwrap().align(s.as_bytes(), s.as_bytes());
        let n = s.len();
        prop_assert_eq!(matrices.final_score(), n as i64 * i64::from(m));

        let path = traceback_path(&matrices, (n, n));
        let expected: Vec<(usize, usize)> = (0..=n).rev().map(|i| (i, i)).collect();
        prop_assert_eq!(path, expected);

        let aligned = reconstruct(s.as_bytes(), s.as_bytes(), &matrices);
        prop_assert_eq!(&aligned.aligned_a, &s);
        prop_assert_eq!(&aligned.aligned_b, &s);
    }

    #[test]
    fn boolean_homopolymer_scores_minus_length(base in "[ACGT]", n in 0usize..12) {
        let s = base.repeat(n);
        let m = align_pair(s.as_bytes(), s.as_bytes(), "global-boolean", ScoringScheme::linear(1, -1, -1)).unwrap();
        prop_assert_eq!(m.final_score(), -(n as i64));
    }
}

#[test]
fn gattaca_literature_oracle() {
    let m = align_pair(b"GATTACA", b"GCATGCU", "global-linear", ScoringScheme::textbook()).unwrap();
    assert_eq!(m.scores[(7, 7)], 0);
}

#[test]
fn unknown_variant_fails_before_allocation() {
    let err = align_pair(b"A", b"A", "global-affine", ScoringScheme::textbook()).unwrap_err();
    assert!(matches!(err, MsaError::Configuration(_)));
    let err = align_pair(b"A", b"A", "local-standard", ScoringScheme::levenshtein()).unwrap_err();
    assert!(matches!(err, MsaError::Configuration(_)));
}
