// main.rs - CLI entry point

use msadist::cli::{Config, RunMode};
use msadist::core::traceback::{compute_alignment_stats, reconstruct};
use msadist::data::{location_table, screen};
use msadist::output::write_location_table;
use msadist::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
        println!("📄 Loaded configuration from: {}", config_path);
    }

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let validation = validate_args(&args)?;

    println!("🚀 msadist v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    let primary = load_sequences(args.fasta.as_deref(), &validation)?;
    let secondary = match args.fasta2.as_deref() {
        Some(path) => Some(load_sequences(Some(path), &validation)?),
        None => None,
    };

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        println!("📊 Sequences: {}", primary.len());
        if let Some(set) = &secondary {
            println!("📊 Second set: {}", set.len());
        }
        return Ok(());
    }

    if let Some(field) = validation.location_field {
        let output = required_output(&args)?;
        let rows = location_table(&primary, field);
        let path = location_output_path(output);
        write_location_table(&path, &rows, &command_line)?;
        println!("🌍 Location table ({} records) saved to: {}", rows.len(), path.display());
    }

    match &validation.mode {
        RunMode::Screen => {
            let report = screen::screen(&primary, validation.min_len, &validation.gap_chars)?;
            println!("\n🔍 === SEQUENCE LENGTH SCREENING ===");
            print!("{}", report);
        }
        RunMode::SinglePair { query, target } => {
            let target_set = secondary.as_ref().unwrap_or(&primary);
            run_single_pair(
                &primary.get(query)?.sequence,
                &target_set.get(target)?.sequence,
                &validation,
                args.output.as_deref(),
                &command_line,
            )?;
        }
        RunMode::AlignAll => {
            let output = required_output(&args)?;
            let engine = &validation.engine;
            println!(
                "\n🎯 Alignment scores: {} ({})",
                engine.variant().description(),
                engine.scheme().description()
            );
            let (row_ids, col_ids, matrix) = match &secondary {
                Some(other) => (
                    primary.ids(),
                    other.ids(),
                    cross_alignment_scores(&primary.sequences(), &other.sequences(), engine, true),
                ),
                None => (
                    primary.ids(),
                    primary.ids(),
                    pairwise_alignment_scores(&primary.sequences(), engine, true),
                ),
            };
            let labels = Labels {
                rows: &row_ids,
                cols: &col_ids,
                corner: "id",
            };
            write_matrix(output, validation.format, &labels, &matrix, &command_line)?;
            println!("💾 Score matrix saved to: {}", output.display());
        }
        RunMode::Hamming => {
            let output = required_output(&args)?;
            let builder = DistanceMatrixBuilder::new();
            println!("\n🎯 Distance calculation: Hamming");
            let (row_ids, col_ids, matrix) = match &secondary {
                Some(other) => (
                    primary.ids(),
                    other.ids(),
                    builder.cross_pairwise(&primary.sequences(), &other.sequences()),
                ),
                None => (
                    primary.ids(),
                    primary.ids(),
                    builder.self_pairwise(&primary.sequences()),
                ),
            };
            let labels = Labels {
                rows: &row_ids,
                cols: &col_ids,
                corner: "id",
            };
            write_matrix(output, validation.format, &labels, &matrix, &command_line)?;
            println!("💾 Distance matrix saved to: {}", output.display());
        }
    }

    println!(
        "\n✅ Completed in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn load_sequences(
    path: Option<&str>,
    validation: &ValidationResult,
) -> Result<SequenceSet, String> {
    let path = path.ok_or("--fasta is required")?;
    let set = SequenceSet::from_fasta(Path::new(path))?;
    let set = set.filter(
        validation.include_regex.as_ref(),
        validation.exclude_regex.as_ref(),
    );
    println!("📂 Loaded {} sequences from {}", set.len(), path);
    Ok(set)
}

fn required_output(args: &Args) -> Result<&Path, String> {
    args.output
        .as_deref()
        .map(Path::new)
        .ok_or_else(|| "--output is required".to_string())
}

/// Column/row labels for a DP matrix: the empty prefix, then one residue per index
fn residue_labels(sequence: &[u8]) -> Vec<String> {
    std::iter::once("-".to_string())
        .chain(sequence.iter().map(|&b| char::from(b).to_string()))
        .collect()
}

fn output_stem(output: &Path) -> String {
    output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "alignment".to_string())
}

/// `out.tsv` -> `out.traceback.tsv`
fn traceback_output_path(output: &Path) -> PathBuf {
    let stem = output_stem(output);
    let name = match output.extension() {
        Some(ext) => format!("{}.traceback.{}", stem, ext.to_string_lossy()),
        None => format!("{}.traceback", stem),
    };
    output.with_file_name(name)
}

/// `out.json` -> `out.locations.tsv`
fn location_output_path(output: &Path) -> PathBuf {
    output.with_file_name(format!("{}.locations.tsv", output_stem(output)))
}

fn run_single_pair(
    a: &[u8],
    b: &[u8],
    validation: &ValidationResult,
    output: Option<&str>,
    command_line: &str,
) -> Result<(), String> {
    let engine = &validation.engine;
    println!(
        "\n🎯 Aligning {} x {} residues: {} ({})",
        a.len(),
        b.len(),
        engine.variant().description(),
        engine.scheme().description()
    );

    let matrices = engine.align(a, b);
    let aligned = reconstruct(a, b, &matrices);
    let stats = compute_alignment_stats(&aligned.aligned_a, &aligned.aligned_b);

    println!("📊 H[n1][n2] = {}", matrices.final_score());
    if engine.variant().is_local() {
        println!(
            "📊 Best local score = {} at {:?} (starts at {:?})",
            aligned.score, aligned.end, aligned.start
        );
    }
    println!("\n{}\n{}\n", aligned.aligned_a, aligned.aligned_b);
    println!("🧬 Alignment statistics:");
    println!("  • Length: {}", stats.alignment_length);
    println!("  • SNPs: {}", stats.snps);
    println!(
        "  • InDels: {} events, {} bases",
        stats.indel_events, stats.indel_bases
    );
    println!("  • Identity: {:.2}%", stats.identity_percent);

    if let Some(output) = output {
        let output = Path::new(output);
        let row_labels = residue_labels(a);
        let col_labels = residue_labels(b);
        let rows: Vec<&str> = row_labels.iter().map(String::as_str).collect();
        let cols: Vec<&str> = col_labels.iter().map(String::as_str).collect();
        let labels = Labels {
            rows: &rows,
            cols: &cols,
            corner: "H",
        };
        write_matrix(output, validation.format, &labels, &matrices.scores, command_line)?;
        println!("💾 Score matrix saved to: {}", output.display());

        let tb_path = traceback_output_path(output);
        let labels = Labels {
            corner: "TB",
            ..labels
        };
        write_matrix(&tb_path, validation.format, &labels, &matrices.traceback, command_line)?;
        println!("💾 Traceback matrix saved to: {}", tb_path.display());
    }
    Ok(())
}
