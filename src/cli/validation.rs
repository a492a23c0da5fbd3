// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::{AlignmentEngine, AlignmentVariant, Direction, ScoringScheme, SubstitutionMode};
use crate::error::{MsaError, Result};
use crate::output::OutputFormat;
use regex::Regex;
use std::str::FromStr;

/// What the pipeline will compute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Screen,
    SinglePair { query: String, target: String },
    AlignAll,
    Hamming,
}

pub struct ValidationResult {
    pub mode: RunMode,
    pub engine: AlignmentEngine,
    pub format: OutputFormat,
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
    pub gap_chars: Vec<String>,
    pub min_len: f64,
    pub location_field: Option<usize>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    if args.fasta.is_none() {
        return Err(MsaError::config("--fasta is required"));
    }

    let mode = resolve_mode(args)?;
    let variant = AlignmentVariant::from_str(&args.variant)?;
    check_substitution_mode(args.substitution_mode.as_deref(), variant)?;
    let scheme = resolve_scheme(args, variant)?;
    let engine = AlignmentEngine::new(variant, scheme)?;
    let format = OutputFormat::from_str(&args.format)?;

    if format == OutputFormat::Phylip {
        match mode {
            RunMode::SinglePair { .. } => {
                return Err(MsaError::config(
                    "PHYLIP output is not available for single-pair matrices",
                ))
            }
            RunMode::AlignAll => {
                return Err(MsaError::config(
                    "PHYLIP output is only available for Hamming distance matrices",
                ))
            }
            RunMode::Hamming if args.fasta2.is_some() => {
                return Err(MsaError::config(
                    "PHYLIP output is not available for cross-pairwise matrices",
                ))
            }
            _ => {}
        }
    }

    if args.location_field == Some(0) {
        return Err(MsaError::config(
            "--location-field must be at least 1 (field 0 is the sequence id)",
        ));
    }
    if args.location_field.is_some() && args.output.is_none() {
        return Err(MsaError::config("--location-field needs --output"));
    }

    if !(0.0..=1.0).contains(&args.min_len) {
        return Err(MsaError::config("--min-len must be between 0.0 and 1.0"));
    }

    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err(MsaError::config("--threads must be at least 1"));
        }
    }

    let include_regex = compile_regex(args.include.as_deref(), "include")?;
    let exclude_regex = compile_regex(args.exclude.as_deref(), "exclude")?;

    let gap_chars = args
        .gap_chars
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    Ok(ValidationResult {
        mode,
        engine,
        format,
        include_regex,
        exclude_regex,
        gap_chars,
        min_len: args.min_len,
        location_field: args.location_field,
    })
}

fn resolve_mode(args: &Args) -> Result<RunMode> {
    let single_pair = args.query.is_some() || args.target.is_some();
    let selected = [args.screen, single_pair, args.align_all]
        .iter()
        .filter(|&&on| on)
        .count();
    if selected > 1 {
        return Err(MsaError::config(
            "--screen, --query/--target and --align-all are mutually exclusive",
        ));
    }

    if args.screen {
        return Ok(RunMode::Screen);
    }
    if single_pair {
        return match (&args.query, &args.target) {
            (Some(query), Some(target)) => Ok(RunMode::SinglePair {
                query: query.clone(),
                target: target.clone(),
            }),
            _ => Err(MsaError::config("--query and --target must be given together")),
        };
    }
    if args.align_all {
        return Ok(RunMode::AlignAll);
    }
    Ok(RunMode::Hamming)
}

/// A requested substitution mode must be the one the variant scores with
fn check_substitution_mode(mode: Option<&str>, variant: AlignmentVariant) -> Result<()> {
    let Some(name) = mode else {
        return Ok(());
    };
    let mode = SubstitutionMode::from_str(name)?;
    if variant.direction() == Direction::Minimize {
        return Err(MsaError::config(format!(
            "--substitution-mode does not apply to '{}'",
            variant
        )));
    }
    if variant.substitution_mode() != mode {
        return Err(MsaError::config(format!(
            "variant '{}' uses {} substitution, not {} (use --variant {} for global {} scoring)",
            variant,
            variant.substitution_mode(),
            mode,
            AlignmentVariant::global(mode),
            mode
        )));
    }
    Ok(())
}

/// Explicit values > preset > variant default
fn resolve_scheme(args: &Args, variant: AlignmentVariant) -> Result<ScoringScheme> {
    let base = match &args.scoring_preset {
        Some(name) => ScoringScheme::from_preset(name)?,
        None => variant.default_scheme(),
    };

    let linear_given =
        args.match_score.is_some() || args.mismatch_score.is_some() || args.gap.is_some();
    let costs_given = args.match_cost.is_some()
        || args.mismatch_cost.is_some()
        || args.insertion_cost.is_some()
        || args.deletion_cost.is_some();

    if linear_given && costs_given {
        return Err(MsaError::config(
            "linear scores (--match-score/--mismatch-score/--gap) and edit costs \
             (--match-cost/--mismatch-cost/--insertion-cost/--deletion-cost) cannot be mixed",
        ));
    }

    if linear_given {
        let defaults = match base {
            ScoringScheme::Linear(scores) => scores,
            ScoringScheme::EditCosts(_) => {
                return Err(MsaError::config(format!(
                    "linear scores given but the scheme for '{}' is edit costs",
                    variant
                )))
            }
        };
        return Ok(ScoringScheme::linear(
            args.match_score.unwrap_or(defaults.match_score),
            args.mismatch_score.unwrap_or(defaults.mismatch_score),
            args.gap.unwrap_or(defaults.gap),
        ));
    }

    if costs_given {
        let defaults = match base {
            ScoringScheme::EditCosts(costs) => costs,
            ScoringScheme::Linear(_) => {
                return Err(MsaError::config(format!(
                    "edit costs given but the scheme for '{}' is linear scores",
                    variant
                )))
            }
        };
        return Ok(ScoringScheme::edit_costs(
            args.match_cost.unwrap_or(defaults.match_cost),
            args.mismatch_cost.unwrap_or(defaults.mismatch_cost),
            args.insertion_cost.unwrap_or(defaults.insertion_cost),
            args.deletion_cost.unwrap_or(defaults.deletion_cost),
        ));
    }

    Ok(base)
}

fn compile_regex(pattern: Option<&str>, name: &str) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|e| MsaError::config(format!("Invalid {} regex: {}", name, e)))
        })
        .transpose()
}
