// scoring.rs - Scoring schemes and substitution costs

use crate::error::{MsaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the recurrence keeps the largest or the smallest candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    /// Pick the better of two candidate scores
    pub fn best(self, a: i64, b: i64) -> i64 {
        match self {
            Direction::Maximize => a.max(b),
            Direction::Minimize => a.min(b),
        }
    }
}

/// How a diagonal step is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMode {
    /// `mismatch * [x1 == x2]`. The match parameter is never consulted.
    Boolean,
    /// `match` when equal, `mismatch` otherwise
    Linear,
}

impl FromStr for SubstitutionMode {
    type Err = MsaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "boolean" | "bool" => Ok(SubstitutionMode::Boolean),
            "linear" | "match-mismatch" | "match_mismatch" => Ok(SubstitutionMode::Linear),
            _ => Err(MsaError::config(format!(
                "Unknown substitution mode: {}. Use: boolean, linear",
                s
            ))),
        }
    }
}

impl fmt::Display for SubstitutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionMode::Boolean => write!(f, "boolean"),
            SubstitutionMode::Linear => write!(f, "linear"),
        }
    }
}

/// 1 if the two symbols are equal, 0 otherwise
#[inline]
pub fn equality_indicator(x1: u8, x2: u8) -> i32 {
    i32::from(x1 == x2)
}

/// Boolean substitution: the mismatch parameter scaled by the equality indicator
#[inline]
pub fn boolean_substitution(x1: u8, x2: u8, mismatch: i32) -> i32 {
    mismatch * equality_indicator(x1, x2)
}

/// Linear substitution: `match_value` on equality, `mismatch` otherwise
#[inline]
pub fn linear_substitution(x1: u8, x2: u8, match_value: i32, mismatch: i32) -> i32 {
    if x1 == x2 {
        match_value
    } else {
        mismatch
    }
}

/// Uniform match/mismatch/gap scores for the maximizing family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearScores {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap: i32,
}

/// Costs for the minimizing (edit distance) family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCosts {
    pub match_cost: i32,
    pub mismatch_cost: i32,
    /// Charged when the path moves down a row, (i-1, j) -> (i, j)
    pub insertion_cost: i32,
    /// Charged when the path moves across a column, (i, j-1) -> (i, j)
    pub deletion_cost: i32,
}

/// Scoring configuration consumed by the alignment engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScoringScheme {
    Linear(LinearScores),
    EditCosts(EditCosts),
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self::textbook()
    }
}

impl ScoringScheme {
    /// match 1, mismatch -1, gap -1
    pub fn textbook() -> Self {
        Self::linear(1, -1, -1)
    }

    /// Unit-cost edit distance
    pub fn levenshtein() -> Self {
        Self::edit_costs(0, 1, 1, 1)
    }

    pub fn linear(match_score: i32, mismatch_score: i32, gap: i32) -> Self {
        ScoringScheme::Linear(LinearScores {
            match_score,
            mismatch_score,
            gap,
        })
    }

    pub fn edit_costs(
        match_cost: i32,
        mismatch_cost: i32,
        insertion_cost: i32,
        deletion_cost: i32,
    ) -> Self {
        ScoringScheme::EditCosts(EditCosts {
            match_cost,
            mismatch_cost,
            insertion_cost,
            deletion_cost,
        })
    }

    /// Create a scheme from a preset name
    pub fn from_preset(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "textbook" => Ok(Self::textbook()),
            "dna" => Ok(Self::linear(2, -1, -2)),
            "levenshtein" | "edit" => Ok(Self::levenshtein()),
            _ => Err(MsaError::config(format!(
                "Unknown scoring preset: {}. Use: textbook, dna, levenshtein",
                name
            ))),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            ScoringScheme::Linear(_) => Direction::Maximize,
            ScoringScheme::EditCosts(_) => Direction::Minimize,
        }
    }

    pub fn as_linear(&self) -> Option<&LinearScores> {
        match self {
            ScoringScheme::Linear(scores) => Some(scores),
            _ => None,
        }
    }

    pub fn as_edit_costs(&self) -> Option<&EditCosts> {
        match self {
            ScoringScheme::EditCosts(costs) => Some(costs),
            _ => None,
        }
    }

    pub fn description(&self) -> String {
        match self {
            ScoringScheme::Linear(s) => format!(
                "match={}, mismatch={}, gap={}",
                s.match_score, s.mismatch_score, s.gap
            ),
            ScoringScheme::EditCosts(c) => format!(
                "match_cost={}, mismatch_cost={}, insertion_cost={}, deletion_cost={}",
                c.match_cost, c.mismatch_cost, c.insertion_cost, c.deletion_cost
            ),
        }
    }
}

impl LinearScores {
    pub fn substitution(&self, mode: SubstitutionMode, x1: u8, x2: u8) -> i32 {
        match mode {
            SubstitutionMode::Boolean => boolean_substitution(x1, x2, self.mismatch_score),
            SubstitutionMode::Linear => {
                linear_substitution(x1, x2, self.match_score, self.mismatch_score)
            }
        }
    }
}

impl EditCosts {
    pub fn substitution(&self, x1: u8, x2: u8) -> i32 {
        linear_substitution(x1, x2, self.match_cost, self.mismatch_cost)
    }
}
