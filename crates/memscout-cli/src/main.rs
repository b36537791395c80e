//! memscout CLI: size a CSV/Parquet file and print the recommended load strategy.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use memscout_core::config::EstimatorConfig;
use memscout_core::error::{Error, ErrorKind};
use memscout_core::estimate::EstimationResult;
use memscout_core::probe::MemoryProbe;
use memscout_mem::{FixedMemoryProbe, SystemMemoryProbe};
use memscout_planner::{format_bytes, Estimator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "memscout")]
#[command(about = "Pre-flight memory sizing and load-strategy selection for CSV and Parquet files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct EstimateArgs {
    /// File to size (.csv or .parquet)
    file: PathBuf,

    /// CSV records to sample (overrides config)
    #[arg(long)]
    sample_rows: Option<usize>,

    /// Fraction of available memory to hold back, in [0, 1) (overrides config)
    #[arg(long)]
    safety_margin: Option<f64>,

    /// YAML/JSON estimator config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use this figure instead of probing the system (what-if runs)
    #[arg(long)]
    available_bytes: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the in-memory footprint and pick a load strategy
    Estimate {
        #[command(flatten)]
        args: EstimateArgs,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Like `estimate`, with a per-column breakdown and the policy bands
    Explain {
        #[command(flatten)]
        args: EstimateArgs,
    },

    /// Validate an estimator config file
    ValidateConfig {
        /// Path to the YAML/JSON config
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Estimate { args, json } => run_estimate(&args).and_then(|result| {
            if json {
                print_json(&result)
            } else {
                print_summary(&result);
                Ok(())
            }
        }),
        Commands::Explain { args } => run_estimate(&args).map(|result| {
            print_summary(&result);
            print_breakdown(&result);
        }),
        Commands::ValidateConfig { config } => validate_config(&config).map(|_| {
            println!("✓ Config is valid");
        }),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Defaults < config file < `MEMSCOUT_*` environment < command-line flags.
fn build_config(args: &EstimateArgs) -> Result<EstimatorConfig, Error> {
    let mut config = match &args.config {
        Some(path) => EstimatorConfig::read_yaml_file(path)?,
        None => EstimatorConfig::default(),
    };
    config.apply_env();
    apply_flags(&mut config, args);
    config.validate()?;
    tracing::debug!(?config, "resolved estimator config");
    Ok(config)
}

fn apply_flags(config: &mut EstimatorConfig, args: &EstimateArgs) {
    if let Some(rows) = args.sample_rows {
        config.sample_rows = rows;
    }
    if let Some(margin) = args.safety_margin {
        config.safety_margin = margin;
    }
}

fn run_estimate(args: &EstimateArgs) -> Result<EstimationResult, Error> {
    let config = build_config(args)?;
    let probe: Box<dyn MemoryProbe> = match args.available_bytes {
        Some(bytes) => Box::new(FixedMemoryProbe::new(bytes)),
        None => Box::new(SystemMemoryProbe::new()),
    };
    let estimator = Estimator::with_probe(config, probe)?;
    estimator.estimate(&args.file)
}

fn validate_config(path: &Path) -> Result<(), Error> {
    EstimatorConfig::from_yaml_file(path).map(|_| ())
}

fn print_json(result: &EstimationResult) -> Result<(), Error> {
    let doc =
        serde_json::to_string_pretty(result).map_err(|e| output_error(&result.path, e))?;
    println!("{doc}");
    Ok(())
}

/// Failing to render a result is an output problem, not a configuration one.
fn output_error(path: &Path, e: serde_json::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source: e.into(),
    }
}

fn print_summary(result: &EstimationResult) {
    println!(
        "File:       {} ({}, {} on disk)",
        result.path.display(),
        result.format,
        format_bytes(result.file_size_bytes)
    );
    println!(
        "Rows:       {} (measured on {})",
        result.total_rows, result.sampled_rows
    );
    println!(
        "Estimate:   {} (format overhead {:.2})",
        format_bytes(result.estimated_total_bytes),
        result.format_overhead
    );
    println!(
        "Available:  {} (usable {} at margin {:.2})",
        format_bytes(result.available_bytes),
        format_bytes(result.usable_bytes),
        result.safety_margin
    );
    println!("Ratio:      {:.4}", result.ratio);
    println!("Decision:   {}", result.decision);
    if let Some(rows) = result.suggested_chunk_rows {
        println!("Chunk rows: {}", rows);
    }
}

fn print_breakdown(result: &EstimationResult) {
    println!();
    println!("Columns:");
    let width = result
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max(6);
    for column in &result.columns {
        println!(
            "  {:<width$}  {:<8}  raw {:>12}  x{:.2}  = {}",
            column.name,
            column.logical_type.as_str(),
            format_bytes(column.raw_bytes),
            column.type_overhead,
            format_bytes(column.weighted_bytes().ceil() as u64),
            width = width
        );
    }
}

fn exit_code(e: &Error) -> i32 {
    match e.kind() {
        ErrorKind::InvalidConfiguration => 2,
        ErrorKind::FileNotFound => 3,
        ErrorKind::UnsupportedFormat => 4,
        ErrorKind::EmptySource | ErrorKind::SchemaInference | ErrorKind::MetadataRead => 5,
        ErrorKind::Io => 1,
    }
}
