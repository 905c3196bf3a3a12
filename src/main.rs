// Entry point and high-level run flow.
//
// - Load the wide exposure CSV and the long lights CSV.
// - Run the merge pipeline over the loaded tables.
// - Write the merged panel and print a short summary with a preview.
mod aggregate;
mod cli;
mod error;
mod join;
mod loader;
mod logging;
mod output;
mod pipeline;
mod regions;
mod reshape;
mod types;
mod util;

use clap::Parser;
use cli::Cli;
use error::Result;
use tracing::{error, info};
use types::PipelineReport;
use util::{format_int, period_label};

const PREVIEW_ROWS: usize = 5;

fn print_summary(report: &PipelineReport) {
    println!(
        "Reshaped {} exposure values; {} lights rows aggregated to {}.",
        format_int(report.exposure_records),
        format_int(report.lights_raw),
        format_int(report.lights_aggregated)
    );
    println!(
        "Merged {} rows ({} matched, {} lights-only filled with exposure 0).",
        format_int(report.matched + report.lights_only),
        format_int(report.matched),
        format_int(report.lights_only)
    );
    if let (Some((fy, fm)), Some((ly, lm))) = (report.first_period, report.last_period) {
        println!("Periods: {} to {}", period_label(fy, fm), period_label(ly, lm));
    }
    if report.metro_periods > 0 {
        println!(
            "Info: Metro Manila districts combined for {} periods.",
            format_int(report.metro_periods)
        );
    }
    if report.exposure_only_dropped > 0 {
        println!(
            "Note: {} exposure region-months have no lights data and were left out.",
            format_int(report.exposure_only_dropped)
        );
    }
    println!();
}

fn run(cli: &Cli) -> Result<()> {
    let (exposure, exposure_load) = loader::load_exposure(&cli.exposure)?;
    let (lights, lights_load) = loader::load_lights(&cli.lights)?;
    println!(
        "Processing datasets... ({} exposure regions x {} periods, {} lights rows)",
        format_int(exposure.rows.len()),
        format_int(exposure.period_labels.len()),
        format_int(lights_load.total_rows)
    );
    let skipped = exposure_load.skipped_rows + lights_load.skipped_rows;
    if skipped > 0 {
        println!("Note: {} rows skipped for missing region or period.", format_int(skipped));
    }
    let blanks = exposure_load.blank_values + lights_load.blank_values;
    if blanks > 0 {
        println!(
            "Info: {} blank values (missing exposure left absent, missing lights counted as 0).",
            format_int(blanks)
        );
    }

    let (merged, report) = pipeline::run(&exposure, &lights)?;

    output::write_csv(&cli.output, &merged)?;
    info!(path = %cli.output.display(), rows = merged.len(), "wrote merged panel");

    print_summary(&report);
    output::preview_table_rows(&merged, PREVIEW_ROWS);
    println!("(Full table exported to {})", cli.output.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(e) = run(&cli) {
        error!(error = %e, "merge failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
