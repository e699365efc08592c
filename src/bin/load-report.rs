//! Inspect a saved run report.
//!
//! `ledger-load --report out.json …` writes a JSON summary at the end of a
//! run; this tool renders a saved summary back as the console table (or as
//! pretty-printed JSON) without re-running anything.

use std::path::PathBuf;

use clap::Parser;

use ledger_load::metrics::RunSummary;

#[derive(Parser)]
#[command(name = "load-report")]
#[command(about = "Render a saved ledger-load run summary")]
struct Cli {
    /// Path to a run summary JSON file.
    path: PathBuf,

    /// Print the raw JSON instead of the summary table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let summary = RunSummary::read_json(&cli.path)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print();
    }
    Ok(())
}
