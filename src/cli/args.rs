// args.rs - Command line arguments definition

use argh::FromArgs;

pub const DEFAULT_FORMAT: &str = "tsv";
pub const DEFAULT_VARIANT: &str = "global-linear";
pub const DEFAULT_GAP_CHARS: &str = "-,n";

#[derive(FromArgs, Debug)]
/// msadist - Pairwise alignment matrices and Hamming distance matrices
pub struct Args {
    /// input FASTA file (aligned or unaligned sequences)
    #[argh(option)]
    pub fasta: Option<String>,

    /// second FASTA file for cross-pairwise matrices
    #[argh(option)]
    pub fasta2: Option<String>,

    /// output matrix file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, phylip, json (default: tsv)
    #[argh(option, default = "String::from(DEFAULT_FORMAT)")]
    pub format: String,

    /// alignment variant: global-boolean, global-linear, global-edit-distance, local-standard, local-zero-origin (default: global-linear)
    #[argh(option, default = "String::from(DEFAULT_VARIANT)")]
    pub variant: String,

    /// substitution mode the variant must use: boolean, linear
    #[argh(option)]
    pub substitution_mode: Option<String>,

    /// scoring preset: textbook, dna, levenshtein (default: depends on variant)
    #[argh(option)]
    pub scoring_preset: Option<String>,

    /// match score (linear and local variants)
    #[argh(option)]
    pub match_score: Option<i32>,

    /// mismatch score (linear and local variants)
    #[argh(option)]
    pub mismatch_score: Option<i32>,

    /// gap score (linear and local variants)
    #[argh(option)]
    pub gap: Option<i32>,

    /// match cost (edit distance)
    #[argh(option)]
    pub match_cost: Option<i32>,

    /// mismatch cost (edit distance)
    #[argh(option)]
    pub mismatch_cost: Option<i32>,

    /// insertion cost (edit distance)
    #[argh(option)]
    pub insertion_cost: Option<i32>,

    /// deletion cost (edit distance)
    #[argh(option)]
    pub deletion_cost: Option<i32>,

    /// query sequence id: align a single pair
    #[argh(option)]
    pub query: Option<String>,

    /// target sequence id (looked up in --fasta2 when given)
    #[argh(option)]
    pub target: Option<String>,

    /// all-vs-all alignment score matrix instead of Hamming distances
    #[argh(switch)]
    pub align_all: bool,

    /// print the sequence length screening report and exit
    #[argh(switch)]
    pub screen: bool,

    /// screening: minimum length as a fraction of the median (default: 0.8)
    #[argh(option, default = "0.8")]
    pub min_len: f64,

    /// screening: comma-separated gap characters to strip (default: -,n)
    #[argh(option, default = "String::from(DEFAULT_GAP_CHARS)")]
    pub gap_chars: String,

    /// write a location table from this 0-based '|' header field (id is field 0)
    #[argh(option)]
    pub location_field: Option<usize>,

    /// include only sequences whose id matches regex pattern
    #[argh(option)]
    pub include: Option<String>,

    /// exclude sequences whose id matches regex pattern
    #[argh(option)]
    pub exclude: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
