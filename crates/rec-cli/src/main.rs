//! rec - Music recommendation pipeline CLI
//!
//! Usage:
//!   rec transform cleaned.csv            # Fit + transform the cleaned table
//!   rec transform-hybrid filtered.csv    # Same pipeline over the filtered subset
//!   rec recommend "Song" "Artist" \
//!       --data cleaned.csv --matrix data/processed/transformed_data.rcm
//!
//! Logging is controlled with the standard `RUST_LOG`-style filter, e.g.
//! `RUST_LOG=rec=debug`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{recommend, transform};

/// rec - content-based music recommendation tool
///
/// Builds a sparse feature matrix from cleaned song metadata and answers
/// top-K similarity queries against it.
#[derive(Parser)]
#[command(name = "rec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the encoding pipeline on a cleaned table and write the feature matrix
    Transform {
        /// Path to the cleaned CSV table
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output path for the serialized sparse matrix
        #[arg(short, long, default_value = "data/processed/transformed_data.rcm")]
        output: PathBuf,

        /// Output path for the fitted pipeline state
        #[arg(long, default_value = "data/processed/feature_pipeline.json")]
        pipeline: PathBuf,
    },

    /// Fit + transform the pre-filtered subset for the hybrid pipeline
    TransformHybrid {
        /// Path to the filtered CSV table
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output path for the serialized sparse matrix
        #[arg(
            short,
            long,
            default_value = "data/processed/transformed_hybrid_data.rcm"
        )]
        output: PathBuf,

        /// Output path for the fitted pipeline state
        #[arg(long, default_value = "data/processed/feature_pipeline_hybrid.json")]
        pipeline: PathBuf,
    },

    /// Print the top-K songs most similar to a query song
    Recommend {
        /// Song name (case-insensitive)
        #[arg(value_name = "SONG")]
        song: String,

        /// Artist name (case-insensitive)
        #[arg(value_name = "ARTIST")]
        artist: String,

        /// Path to the CSV table the matrix was built from
        #[arg(long)]
        data: PathBuf,

        /// Path to the serialized feature matrix
        #[arg(long)]
        matrix: PathBuf,

        /// Number of recommendations
        #[arg(short, default_value = "10")]
        k: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transform {
            input,
            output,
            pipeline,
        }
        | Commands::TransformHybrid {
            input,
            output,
            pipeline,
        } => transform::run(&input, &output, &pipeline),

        Commands::Recommend {
            song,
            artist,
            data,
            matrix,
            k,
        } => recommend::run(&song, &artist, &data, &matrix, k, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
