//! Waveform TDA command-line interface
//!
//! - `analyze`: embed and compute persistence for every trace in a
//!   directory, writing per-file statistics and diagrams
//! - `demo`: run the pipeline on a synthetic trace and print the results

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use waveform_tda::{
    analyze, find_waveform_files, run_batch, AnalysisConfig, AnalysisResult, Analyzer,
    DescriptiveStats, EmbeddingParameters, FileOutcome, ResultWriter, SyntheticTrace,
    TextWaveformSource,
};

#[derive(Parser)]
#[command(name = "waveform-tda")]
#[command(author, version, about = "Persistent homology of delay-embedded pressure traces", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every trace in a directory
    Analyze(AnalyzeArgs),

    /// Analyze a synthetic oscillating trace
    Demo {
        /// Number of samples to generate
        #[arg(long, default_value = "300")]
        samples: usize,

        /// Sampling interval in seconds
        #[arg(long, default_value = "0.004")]
        dt: f64,

        /// Oscillation frequency in Hz
        #[arg(long, default_value = "5.0")]
        frequency: f64,

        /// Gaussian noise level
        #[arg(long, default_value = "0.05")]
        noise: f64,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Embedding dimension
        #[arg(short, long, default_value = "3")]
        dimension: usize,

        /// Embedding delay in samples
        #[arg(short = 't', long, default_value = "12")]
        delay: usize,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing waveform files
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory receiving stats/ and diagrams/
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Waveform file extension
    #[arg(long)]
    extension: Option<String>,

    /// Embedding dimension
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Embedding delay in samples
    #[arg(short = 't', long)]
    delay: Option<usize>,

    /// Maximum samples read per file
    #[arg(long, conflicts_with = "no_sparse")]
    sparse: Option<usize>,

    /// Read every sample of each file
    #[arg(long)]
    no_sparse: bool,

    /// Largest embedded point cloud passed to the homology backend
    #[arg(long)]
    max_points: Option<usize>,
}

impl AnalyzeArgs {
    fn into_config(self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(input) = self.input {
            config.input_root = input;
        }
        if let Some(output) = self.output {
            config.output_root = output;
        }
        if let Some(extension) = self.extension {
            config.extension = extension;
        }
        if self.dimension.is_some() || self.delay.is_some() {
            config.embedding = EmbeddingParameters::new(
                self.dimension.unwrap_or(config.embedding.dimension()),
                self.delay.unwrap_or(config.embedding.delay()),
            )?;
        }
        if self.no_sparse {
            config.sparse = None;
        } else if let Some(sparse) = self.sparse {
            config.sparse = Some(sparse);
        }
        if let Some(max_points) = self.max_points {
            config.max_points = max_points;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Analyze(args) => run_analyze(args.into_config()?),
        Commands::Demo {
            samples,
            dt,
            frequency,
            noise,
            seed,
            dimension,
            delay,
        } => {
            let params = EmbeddingParameters::new(dimension, delay)?;
            let sample = SyntheticTrace::new(samples)
                .dt(dt)
                .frequency(frequency)
                .noise(noise)
                .seed(seed)
                .generate();
            println!(
                "Synthetic trace: {} samples, {} Hz, noise σ = {}",
                samples, frequency, noise
            );
            let result = analyze(&sample, params).context("demo analysis failed")?;
            print_result(&result);
            Ok(())
        }
    }
}

fn run_analyze(config: AnalysisConfig) -> Result<()> {
    let files = find_waveform_files(&config.input_root, &config.extension).with_context(|| {
        format!("cannot list {}", config.input_root.display())
    })?;
    println!(
        "Found {} .{} files in {}",
        files.len(),
        config.extension,
        config.input_root.display()
    );
    if files.is_empty() {
        return Ok(());
    }

    let source = TextWaveformSource::new();
    let analyzer = Analyzer::from_config(&config);
    let writer = ResultWriter::create(&config.output_root)?;
    info!(
        "Embedding dimension {}, delay {}, sparse {:?}",
        config.embedding.dimension(),
        config.embedding.delay(),
        config.sparse
    );

    let report = run_batch(&files, &source, config.sparse, &analyzer);

    // Details of the first file as a sample
    if let Some(first) = report.files.first() {
        println!("\nSample analysis of {}", first.file.display());
        match &first.outcome {
            FileOutcome::Succeeded(result) => print_result(result),
            FileOutcome::Skipped { kind, message } => {
                println!("Sample analysis failed ({kind}): {message}")
            }
        }
    }

    let mut write_failures = 0;
    for (file, result) in report.succeeded() {
        let base = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        if let Err(e) = writer.write(&base, result) {
            log::error!("{}: {}", file.display(), e);
            write_failures += 1;
        }
    }

    println!("\n─────────────────────────────────────────────────────────────");
    println!(
        "Processed {} files: {} succeeded, {} skipped",
        report.len(),
        report.succeeded_count(),
        report.skipped_count()
    );
    for (kind, count) in report.skips_by_kind() {
        println!("  {kind}: {count}");
    }
    for (file, kind, message) in report.skipped() {
        println!("  skipped {} [{}] {}", file.display(), kind, message);
    }
    println!("Results written to {}", config.output_root.display());

    if write_failures > 0 {
        bail!("{write_failures} results could not be written");
    }
    Ok(())
}

fn print_result(result: &AnalysisResult) {
    println!("\nRaw trace:");
    print_stats_header();
    print_stats_row("time", &result.time_stats);
    print_stats_row("amplitude", &result.raw_stats);

    println!("\nEmbedded coordinates:");
    print_stats_header();
    for (label, stats) in result.embedded_stats.iter() {
        print_stats_row(label, stats);
    }

    println!("\nPersistence diagrams:");
    for dgm in &result.diagrams {
        println!(
            "  H{}: {:4} pairs ({} essential), max finite persistence {:.4}",
            dgm.degree,
            dgm.len(),
            dgm.essential_count(),
            dgm.max_persistence()
        );
    }
}

fn print_stats_header() {
    print!("  {:<10}", "");
    for label in DescriptiveStats::ROW_LABELS {
        print!(" {:>11}", label);
    }
    println!();
}

fn print_stats_row(label: &str, stats: &DescriptiveStats) {
    print!("  {:<10}", label);
    for (_, value) in stats.rows() {
        print!(" {:>11.4}", value);
    }
    println!();
}
