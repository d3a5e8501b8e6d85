use std::fs::File;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

use kraken_combine::combine_reports;
use kraken_combine::errors::CombineError;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Combine Kraken reports into an abundance table.",
    long_about = "Parses multiple Kraken report files and combines them into a single \
                  abundance table based on a specified taxonomic rank."
)]
struct Args {
    /// Directory containing your Kraken report files
    #[arg(short = 'd', long = "reports_dir", value_name = "DIR")]
    reports_dir: PathBuf,

    /// Path to your metadata CSV file (must have a 'SampleID' column)
    #[arg(short = 'm', long = "metadata_file", value_name = "FILE")]
    metadata_file: PathBuf,

    /// Taxonomic rank to summarize (e.g. 'G' for Genus, 'S' for Species)
    #[arg(short = 'r', long = "rank")]
    rank: String,

    /// Name of the output CSV file for the abundance table
    #[arg(short = 'o', long = "output_file", value_name = "FILE")]
    output_file: PathBuf,
}

fn spinner(color: &str, msg: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg);
    spinner
}

fn run(args: &Args) -> Result<(), CombineError> {
    // 1. Spinner for combining the per-sample reports
    let sp = spinner(
        "blue",
        format!("Combining reports at rank '{}'...", args.rank),
    );
    let results = combine_reports(&args.reports_dir, &args.metadata_file, &args.rank)?;
    if results.skipped_samples.is_empty() {
        sp.finish_with_message(format!(
            "Combined {} sample(s).",
            results.matrix.num_samples()
        ));
    } else {
        sp.finish_with_message(format!(
            "Combined {} sample(s), skipped {} without a report.",
            results.matrix.num_samples(),
            results.skipped_samples.len()
        ));
    }

    // 2. Spinner for writing the abundance table
    let sp = spinner("green", "Writing abundance table...".to_string());
    let output = File::create(&args.output_file)?;
    results.matrix.write_csv(output)?;
    sp.finish_with_message(format!("Wrote '{}'.", args.output_file.display()));

    info!(
        "Successfully created abundance table at '{}'",
        args.output_file.display()
    );
    info!(
        "Table contains {} taxa and {} samples",
        results.matrix.num_taxa(),
        results.matrix.num_samples()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}
