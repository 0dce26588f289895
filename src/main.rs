//! numsift - filtered, deduplicated, sorted integers from a directory tree
//!
//! Entry point for the CLI application.

use anyhow::{bail, Context, Result};
use clap::Parser;
use numsift::config::{CliArgs, RunConfig};
use numsift::generator::{DataGenerator, RandomGenerator};
use numsift::handler::{DataHandler, NumberHandler};
use numsift::progress::{print_header, print_summary, ProgressReporter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            println!("The process failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    let root = match args.dir.clone() {
        Some(dir) => dir,
        None => prompt_for_directory()?,
    };

    // Validate everything before touching the filesystem
    let config = RunConfig::from_args(args, root).context("Invalid configuration")?;

    if config.show_progress {
        print_header(
            &config.root.display().to_string(),
            &config.residue.to_string(),
            &config.result_name,
        );
    }

    let progress = if config.show_progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::hidden()
    };

    if config.skip_generate {
        info!("Skipping generation, processing {} as-is", config.root.display());
    } else {
        progress.set_status("Generating data...");
        let generator = RandomGenerator::new(config.generator.clone());
        let report = generator
            .generate(&config.root, config.file_count)
            .context("Data generation failed")?;
        info!(
            files = report.files.len(),
            numbers = report.numbers,
            "Generation finished in {:.1}s",
            report.duration.as_secs_f64()
        );
    }

    progress.set_status("Processing data...");
    let reporter = progress.clone();
    let mut handler = NumberHandler::new(config.handler.clone(), config.residue.as_fn())
        .with_progress(move |p| reporter.update(p));

    let report = match handler.handle_directory(&config.root, &config.result_name) {
        Ok(report) => report,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e).context("Data handling failed");
        }
    };

    if config.show_progress {
        progress.finish("Handling completed");
        print_summary(&report);
    }

    println!(
        "Directory {} was successfully processed!\nThe result was written to a file {} in the same directory.",
        config.root.display(),
        config.result_name
    );

    Ok(())
}

/// Ask for the directory on standard input
fn prompt_for_directory() -> Result<PathBuf> {
    println!("Enter the path to the directory for generating and processing data:");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read directory path")?;

    let dir = line.trim();
    if read == 0 || dir.is_empty() {
        bail!("The directory path is not correct.");
    }
    Ok(PathBuf::from(dir))
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("numsift=debug,warn")
    } else {
        EnvFilter::new("numsift=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(io::stderr)
        .init();

    Ok(())
}
