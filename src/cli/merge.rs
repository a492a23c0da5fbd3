// merge.rs - Merge configuration file with CLI arguments

use crate::cli::args::{DEFAULT_FORMAT, DEFAULT_GAP_CHARS, DEFAULT_VARIANT};
use crate::cli::{Args, Config};
use crate::data::screen::DEFAULT_MIN_LEN_FRACTION;
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.fasta.is_none() {
            self.fasta = config.fasta;
        }
        if self.fasta2.is_none() {
            self.fasta2 = config.fasta2;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Settings with defaults (only override defaults, not explicit CLI values)
        if self.format == DEFAULT_FORMAT {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        if self.variant == DEFAULT_VARIANT {
            if let Some(variant) = config.variant {
                self.variant = variant;
            }
        }
        if self.min_len == DEFAULT_MIN_LEN_FRACTION {
            if let Some(min_len) = config.min_len {
                self.min_len = min_len;
            }
        }
        if self.gap_chars == DEFAULT_GAP_CHARS {
            if let Some(gap_chars) = config.gap_chars {
                self.gap_chars = gap_chars;
            }
        }

        // Scoring
        if self.substitution_mode.is_none() {
            self.substitution_mode = config.substitution_mode;
        }
        if self.scoring_preset.is_none() {
            self.scoring_preset = config.scoring_preset;
        }
        if self.match_score.is_none() {
            self.match_score = config.match_score;
        }
        if self.mismatch_score.is_none() {
            self.mismatch_score = config.mismatch_score;
        }
        if self.gap.is_none() {
            self.gap = config.gap;
        }
        if self.match_cost.is_none() {
            self.match_cost = config.match_cost;
        }
        if self.mismatch_cost.is_none() {
            self.mismatch_cost = config.mismatch_cost;
        }
        if self.insertion_cost.is_none() {
            self.insertion_cost = config.insertion_cost;
        }
        if self.deletion_cost.is_none() {
            self.deletion_cost = config.deletion_cost;
        }

        // Single pair
        if self.query.is_none() {
            self.query = config.query;
        }
        if self.target.is_none() {
            self.target = config.target;
        }

        // Metadata
        if self.location_field.is_none() {
            self.location_field = config.location_field;
        }

        // Id filtering
        if self.include.is_none() {
            self.include = config.include;
        }
        if self.exclude.is_none() {
            self.exclude = config.exclude;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (config only switches on what the CLI left off)
        self.align_all |= config.align_all.unwrap_or(false);
        self.screen |= config.screen.unwrap_or(false);
        self.dry_run |= config.dry_run.unwrap_or(false);
        self.verbose |= config.verbose.unwrap_or(false);

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
