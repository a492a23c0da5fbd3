// screen.rs - Length screening of (gapped) alignment members

use crate::data::sequences::SequenceSet;
use crate::error::{MsaError, Result};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_GAP_CHARS: [&str; 2] = ["-", "n"];
pub const DEFAULT_MIN_LEN_FRACTION: f64 = 0.8;

/// Replace every occurrence of each pattern in `patterns` with `replacement`,
/// applied in order
pub fn replace_chars<S: AsRef<str>>(patterns: &[S], replacement: &str, text: &str) -> String {
    let mut out = text.to_string();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !pattern.is_empty() {
            out = out.replace(pattern, replacement);
        }
    }
    out
}

/// A sequence falling below the minimum required length
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortSequence {
    pub id: String,
    pub ungapped_len: usize,
    pub fraction_of_median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenReport {
    pub n_sequences: usize,
    pub average_len: f64,
    pub median_len: f64,
    pub min_len_fraction: f64,
    /// `floor(median_len * min_len_fraction)`
    pub min_required: usize,
    pub short: Vec<ShortSequence>,
}

fn median(values: &[usize]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

/// Screen ungapped lengths against a fraction of the median length
pub fn screen<S: AsRef<str>>(
    set: &SequenceSet,
    min_len_fraction: f64,
    gap_chars: &[S],
) -> Result<ScreenReport> {
    if set.is_empty() {
        return Err(MsaError::InvalidSequence(
            "cannot screen an empty sequence set".to_string(),
        ));
    }

    let lengths: Vec<usize> = set
        .records()
        .iter()
        .map(|r| replace_chars(gap_chars, "", &r.sequence_str()).chars().count())
        .collect();

    let n = lengths.len();
    let average_len = lengths.iter().sum::<usize>() as f64 / n as f64;
    let median_len = median(&lengths);
    let min_required = (median_len * min_len_fraction) as usize;

    let short = set
        .records()
        .iter()
        .zip(lengths.iter())
        .filter(|(_, &len)| len < min_required)
        .map(|(record, &len)| ShortSequence {
            id: record.id.clone(),
            ungapped_len: len,
            fraction_of_median: if median_len > 0.0 {
                len as f64 / median_len
            } else {
                0.0
            },
        })
        .collect();

    Ok(ScreenReport {
        n_sequences: n,
        average_len,
        median_len,
        min_len_fraction,
        min_required,
        short,
    })
}

impl fmt::Display for ScreenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "no. of sequences = {}", self.n_sequences)?;
        writeln!(f, "Average seq len = {:.3}", self.average_len)?;
        writeln!(f, "Median seq len = {}", self.median_len)?;
        writeln!(f, "Minimum seq len required = {}", self.min_required)?;
        writeln!(
            f,
            "Min seq len calculated as {} * median seq length",
            self.min_len_fraction
        )?;
        if !self.short.is_empty() {
            writeln!(f)?;
            writeln!(f, "Short seqs (< min length required)")?;
            writeln!(f, "{:<24}\t{:>8}\t{:>16}", "id", "len", "% of median len")?;
            for s in &self.short {
                writeln!(
                    f,
                    "{:<24}\t{:>8}\t{:>16.3}",
                    s.id, s.ungapped_len, s.fraction_of_median
                )?;
            }
        }
        Ok(())
    }
}
