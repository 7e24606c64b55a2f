//! tabqa CLI - dataset labeling QA toolkit.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tabqa::Status;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            data,
            schema,
            rules,
            report,
            report_json,
        } => commands::validate::run(data, schema, rules, report, report_json, cli.verbose),

        Commands::GenerateSynthetic {
            schema,
            rows,
            out,
            seed,
        } => commands::generate::run(schema, rows, out, seed, cli.verbose),
    };

    match result {
        Ok(Status::Pass) => {}
        Ok(Status::Fail) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
