//! Generate-synthetic command - produce a dataset conforming to a schema.

use std::path::PathBuf;

use colored::Colorize;
use tabqa::{generate_synthetic, write_csv, SchemaDefinition, Status};

pub fn run(
    schema: PathBuf,
    rows: usize,
    out: PathBuf,
    seed: u64,
    verbose: bool,
) -> Result<Status, Box<dyn std::error::Error>> {
    let schema_def = SchemaDefinition::load(&schema)?;

    if verbose {
        println!(
            "Generating {} rows for {} columns (seed {})",
            rows,
            schema_def.columns.len(),
            seed
        );
    }

    let table = generate_synthetic(&schema_def, rows, seed);
    write_csv(&table, &out)?;

    println!(
        "{} {}",
        "Wrote synthetic data to".green().bold(),
        out.display().to_string().white()
    );

    Ok(Status::Pass)
}
