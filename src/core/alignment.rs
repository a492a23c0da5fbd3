// alignment.rs - Dynamic-programming score and traceback matrices

use crate::core::matrix::Matrix;
use crate::core::scoring::{Direction, EditCosts, LinearScores, ScoringScheme, SubstitutionMode};
use crate::error::{MsaError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ScoreMatrix = Matrix<i64>;
pub type TracebackMatrix = Matrix<Step>;

/// Predecessor recorded for a cell of the traceback matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    /// (-1, -1)
    Diagonal,
    /// (-1, 0)
    Up,
    /// (0, -1)
    Left,
    /// (0, 0): origin, boundary, or a local cell reset to the floor
    #[default]
    None,
}

impl Step {
    /// Row/column offset to the predecessor cell
    pub fn offset(self) -> (isize, isize) {
        match self {
            Step::Diagonal => (-1, -1),
            Step::Up => (-1, 0),
            Step::Left => (0, -1),
            Step::None => (0, 0),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (di, dj) = self.offset();
        write!(f, "({},{})", di, dj)
    }
}

/// Selectable recurrence and boundary policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentVariant {
    GlobalBoolean,
    GlobalLinear,
    GlobalEditDistance,
    LocalStandard,
    LocalZeroOrigin,
}

impl FromStr for AlignmentVariant {
    type Err = MsaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "global-boolean" => Ok(AlignmentVariant::GlobalBoolean),
            "global-linear" => Ok(AlignmentVariant::GlobalLinear),
            "global-edit-distance" => Ok(AlignmentVariant::GlobalEditDistance),
            "local-standard" => Ok(AlignmentVariant::LocalStandard),
            "local-zero-origin" => Ok(AlignmentVariant::LocalZeroOrigin),
            _ => Err(MsaError::config(format!(
                "Unknown alignment variant: {}. Use: {}",
                s,
                AlignmentVariant::names().join(", ")
            ))),
        }
    }
}

impl fmt::Display for AlignmentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AlignmentVariant {
    pub const ALL: [AlignmentVariant; 5] = [
        AlignmentVariant::GlobalBoolean,
        AlignmentVariant::GlobalLinear,
        AlignmentVariant::GlobalEditDistance,
        AlignmentVariant::LocalStandard,
        AlignmentVariant::LocalZeroOrigin,
    ];

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.name()).collect()
    }

    /// Global variant for a substitution mode
    pub fn global(mode: SubstitutionMode) -> Self {
        match mode {
            SubstitutionMode::Boolean => AlignmentVariant::GlobalBoolean,
            SubstitutionMode::Linear => AlignmentVariant::GlobalLinear,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AlignmentVariant::GlobalBoolean => "global-boolean",
            AlignmentVariant::GlobalLinear => "global-linear",
            AlignmentVariant::GlobalEditDistance => "global-edit-distance",
            AlignmentVariant::LocalStandard => "local-standard",
            AlignmentVariant::LocalZeroOrigin => "local-zero-origin",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            AlignmentVariant::GlobalBoolean => "Needleman-Wunsch, boolean substitution",
            AlignmentVariant::GlobalLinear => "Needleman-Wunsch, match/mismatch substitution",
            AlignmentVariant::GlobalEditDistance => "Minimum-cost edit distance",
            AlignmentVariant::LocalStandard => "Smith-Waterman, gap-penalised first column",
            AlignmentVariant::LocalZeroOrigin => "Smith-Waterman, zero first row and column",
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AlignmentVariant::LocalStandard | AlignmentVariant::LocalZeroOrigin
        )
    }

    pub fn direction(&self) -> Direction {
        match self {
            AlignmentVariant::GlobalEditDistance => Direction::Minimize,
            _ => Direction::Maximize,
        }
    }

    pub fn substitution_mode(&self) -> SubstitutionMode {
        match self {
            AlignmentVariant::GlobalBoolean => SubstitutionMode::Boolean,
            _ => SubstitutionMode::Linear,
        }
    }

    /// Scheme used when the caller supplies none
    pub fn default_scheme(&self) -> ScoringScheme {
        match self {
            AlignmentVariant::GlobalEditDistance => ScoringScheme::levenshtein(),
            _ => ScoringScheme::textbook(),
        }
    }
}

/// Score matrix H and traceback matrix TB for one sequence pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentMatrices {
    pub variant: AlignmentVariant,
    pub scores: ScoreMatrix,
    pub traceback: TracebackMatrix,
}

impl AlignmentMatrices {
    /// H[n1][n2]
    pub fn final_score(&self) -> i64 {
        let (rows, cols) = self.scores.shape();
        self.scores[(rows - 1, cols - 1)]
    }
}

/// Builds DP matrices for a validated (variant, scheme) pair.
/// Holds no state between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentEngine {
    variant: AlignmentVariant,
    scheme: ScoringScheme,
}

impl AlignmentEngine {
    /// Validate that `scheme` carries the parameters `variant` needs
    pub fn new(variant: AlignmentVariant, scheme: ScoringScheme) -> Result<Self> {
        if scheme.direction() != variant.direction() {
            let needed = match variant {
                AlignmentVariant::GlobalEditDistance => {
                    "match/mismatch/insertion/deletion costs"
                }
                _ => "match/mismatch/gap scores",
            };
            return Err(MsaError::config(format!(
                "variant '{}' requires {} (got {})",
                variant,
                needed,
                scheme.description()
            )));
        }
        Ok(Self { variant, scheme })
    }

    /// Parse the variant name, then validate as in [`AlignmentEngine::new`]
    pub fn from_names(variant: &str, scheme: ScoringScheme) -> Result<Self> {
        Self::new(variant.parse()?, scheme)
    }

    pub fn variant(&self) -> AlignmentVariant {
        self.variant
    }

    pub fn scheme(&self) -> &ScoringScheme {
        &self.scheme
    }

    /// Build the (|a|+1) × (|b|+1) score and traceback matrices
    pub fn align(&self, a: &[u8], b: &[u8]) -> AlignmentMatrices {
        debug!(
            "building {} matrices for {} x {} ({})",
            self.variant,
            a.len(),
            b.len(),
            self.scheme.description()
        );
        // new() pairs EditCosts only with the edit-distance variant
        let (scores, traceback) = match &self.scheme {
            ScoringScheme::EditCosts(costs) => global_edit_distance(a, b, costs),
            ScoringScheme::Linear(scores) => linear_family(a, b, scores, self.variant),
        };
        AlignmentMatrices {
            variant: self.variant,
            scores,
            traceback,
        }
    }
}

/// Record the first of diagonal, up, left whose term equals the cell value
#[inline]
fn pick_step(value: i64, diag: i64, up: i64, left: i64) -> Step {
    if value == diag {
        Step::Diagonal
    } else if value == up {
        Step::Up
    } else if value == left {
        Step::Left
    } else {
        Step::None
    }
}

/// Global (boolean/linear) and local (standard/zero-origin) recurrences
fn linear_family(
    a: &[u8],
    b: &[u8],
    scores: &LinearScores,
    variant: AlignmentVariant,
) -> (ScoreMatrix, TracebackMatrix) {
    let (n1, n2) = (a.len(), b.len());
    let mode = variant.substitution_mode();
    let gap = i64::from(scores.gap);
    let mut h = ScoreMatrix::new(n1 + 1, n2 + 1);
    let mut tb = TracebackMatrix::new(n1 + 1, n2 + 1);

    let (penalise_rows, penalise_cols) = match variant {
        AlignmentVariant::LocalStandard => (true, false),
        AlignmentVariant::LocalZeroOrigin => (false, false),
        _ => (true, true),
    };
    if penalise_rows {
        for i in 1..=n1 {
            h[(i, 0)] = i as i64 * gap;
        }
    }
    if penalise_cols {
        for j in 1..=n2 {
            h[(0, j)] = j as i64 * gap;
        }
    }

    let floor = variant.is_local();
    for i in 1..=n1 {
        for j in 1..=n2 {
            let diag = h[(i - 1, j - 1)] + i64::from(scores.substitution(mode, a[i - 1], b[j - 1]));
            let up = h[(i - 1, j)] + gap;
            let left = h[(i, j - 1)] + gap;
            let mut value = up.max(left).max(diag);
            if floor {
                value = value.max(0);
            }
            h[(i, j)] = value;
            tb[(i, j)] = pick_step(value, diag, up, left);
        }
    }
    (h, tb)
}

/// Minimum-cost recurrence with independent insertion and deletion costs
fn global_edit_distance(a: &[u8], b: &[u8], costs: &EditCosts) -> (ScoreMatrix, TracebackMatrix) {
    let (n1, n2) = (a.len(), b.len());
    let mut h = ScoreMatrix::new(n1 + 1, n2 + 1);
    let mut tb = TracebackMatrix::new(n1 + 1, n2 + 1);

    let insertion = i64::from(costs.insertion_cost);
    let deletion = i64::from(costs.deletion_cost);
    for i in 1..=n1 {
        h[(i, 0)] = i as i64 * insertion;
    }
    for j in 1..=n2 {
        h[(0, j)] = j as i64 * deletion;
    }

    for i in 1..=n1 {
        for j in 1..=n2 {
            let diag = h[(i - 1, j - 1)] + i64::from(costs.substitution(a[i - 1], b[j - 1]));
            let up = h[(i - 1, j)] + insertion;
            let left = h[(i, j - 1)] + deletion;
            let value = up.min(left).min(diag);
            h[(i, j)] = value;
            tb[(i, j)] = pick_step(value, diag, up, left);
        }
    }
    (h, tb)
}

/// Build matrices for a variant given by name; fails before allocating
/// anything if the name or scheme is unusable.
pub fn align_pair(
    a: &[u8],
    b: &[u8],
    variant: &str,
    scheme: ScoringScheme,
) -> Result<AlignmentMatrices> {
    Ok(AlignmentEngine::from_names(variant, scheme)?.align(a, b))
}
