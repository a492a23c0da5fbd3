// config.rs - Configuration file support

use crate::error::{MsaError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub fasta: Option<String>,
    pub fasta2: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,

    // Alignment
    pub variant: Option<String>,
    pub substitution_mode: Option<String>,
    pub scoring_preset: Option<String>,
    pub match_score: Option<i32>,
    pub mismatch_score: Option<i32>,
    pub gap: Option<i32>,
    pub match_cost: Option<i32>,
    pub mismatch_cost: Option<i32>,
    pub insertion_cost: Option<i32>,
    pub deletion_cost: Option<i32>,

    // Single pair
    pub query: Option<String>,
    pub target: Option<String>,

    // Screening
    pub min_len: Option<f64>,
    pub gap_chars: Option<String>,

    // Metadata
    pub location_field: Option<usize>,

    // Id filtering
    pub include: Option<String>,
    pub exclude: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub align_all: Option<bool>,
    pub screen: Option<bool>,
    pub dry_run: Option<bool>,
    pub verbose: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MsaError::io(path, e))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            MsaError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| MsaError::Output(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).map_err(|e| MsaError::io(path, e))?;

        info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# msadist.toml - Configuration file for msadist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Input FASTA file
fasta = "/path/to/sequences.fasta"

# Second FASTA file for cross-pairwise matrices
# fasta2 = "/path/to/references.fasta"

# Output matrix file
output = "matrix.tsv"

# Output format: tsv, csv, phylip, json
format = "tsv"

# =============================================================================
# ALIGNMENT
# =============================================================================

# Variant: global-boolean, global-linear, global-edit-distance,
#          local-standard, local-zero-origin
variant = "global-linear"

# Substitution mode the variant must use: boolean, linear
# substitution_mode = "linear"

# Scoring preset: textbook, dna, levenshtein
# scoring_preset = "dna"

# Explicit linear scores (override the preset)
# match_score = 2
# mismatch_score = -1
# gap = -2

# Explicit edit costs for global-edit-distance (override the preset)
# match_cost = 0
# mismatch_cost = 1
# insertion_cost = 1
# deletion_cost = 1

# =============================================================================
# SINGLE PAIR
# =============================================================================

# Align one pair instead of building a matrix
# query = "seq1"
# target = "seq2"

# =============================================================================
# SCREENING
# =============================================================================

# Minimum length as a fraction of the median length
min_len = 0.8

# Comma-separated gap characters stripped before measuring length
gap_chars = "-,n"

# =============================================================================
# METADATA
# =============================================================================

# '|' header field holding "continent/country/state/city/district";
# writes <output stem>.locations.tsv
# location_field = 3

# =============================================================================
# ID FILTERING
# =============================================================================

# include = "^EPI_.*"
# exclude = "control.*"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# All-vs-all alignment scores instead of Hamming distances
align_all = false

# Print the sequence length screening report
screen = false

# Validate inputs without computation (dry run)
dry_run = false

# Debug logging
verbose = false
"#
        .to_string()
    }
}
