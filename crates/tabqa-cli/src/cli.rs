//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabqa: dataset labeling QA toolkit
#[derive(Parser)]
#[command(name = "tabqa")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a dataset against a schema and a rules configuration
    Validate {
        /// CSV/TSV file to validate
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// JSON schema file
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// YAML rules file
        #[arg(long, value_name = "FILE")]
        rules: PathBuf,

        /// Path to write an HTML report
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Path to write a JSON report
        #[arg(long, value_name = "FILE")]
        report_json: Option<PathBuf>,
    },

    /// Generate synthetic data conforming to a schema
    GenerateSynthetic {
        /// JSON schema file
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Number of rows to generate
        #[arg(long, default_value = "1000")]
        rows: usize,

        /// Where to write the generated CSV
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}
