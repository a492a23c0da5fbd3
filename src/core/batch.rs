// batch.rs - All-vs-all alignment scoring across a sequence list
//
// Each pair gets its own engine call, so pairs are independent and are
// spread over the rayon pool. The engine itself stays single-threaded.

use crate::core::alignment::{AlignmentEngine, ScoreMatrix};
use crate::core::traceback::alignment_score;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

fn progress_bar(total: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Score every (list_a[i], list_b[j]) pair; entry = H at the alignment's end cell
pub fn cross_alignment_scores<A, B>(
    list_a: &[A],
    list_b: &[B],
    engine: &AlignmentEngine,
    show_progress: bool,
) -> ScoreMatrix
where
    A: AsRef<[u8]> + Sync,
    B: AsRef<[u8]> + Sync,
{
    let (n1, n2) = (list_a.len(), list_b.len());
    let total = n1 * n2;
    info!(
        "Scoring {} x {} = {} alignments ({})",
        n1,
        n2,
        total,
        engine.variant()
    );
    let start = Instant::now();

    let pb = progress_bar(total, show_progress);
    // Update every 1%
    let update_interval = std::cmp::max(1, total / 100);
    let counter = AtomicUsize::new(0);

    let rows: Vec<Vec<i64>> = list_a
        .par_iter()
        .map(|a| {
            list_b
                .iter()
                .map(|b| {
                    let score = alignment_score(&engine.align(a.as_ref(), b.as_ref()));
                    let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % update_interval == 0 {
                        pb.set_position(count as u64);
                    }
                    score
                })
                .collect()
        })
        .collect();

    pb.finish_and_clear();
    info!("Scored {} alignments in {:.2}s", total, start.elapsed().as_secs_f64());

    let mut matrix = ScoreMatrix::new(n1, n2);
    for (i, row) in rows.into_iter().enumerate() {
        for (j, score) in row.into_iter().enumerate() {
            matrix[(i, j)] = score;
        }
    }
    matrix
}

/// Score every ordered pair of one list, diagonal included
pub fn pairwise_alignment_scores<S>(
    sequences: &[S],
    engine: &AlignmentEngine,
    show_progress: bool,
) -> ScoreMatrix
where
    S: AsRef<[u8]> + Sync,
{
    cross_alignment_scores(sequences, sequences, engine, show_progress)
}
