//! Progress reporting for generate-and-handle runs
//!
//! Provides a spinner updated once per processed file, plus a styled
//! header and summary.

use crate::handler::{HandleProgress, HandleReport};
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner showing running totals
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        if let Ok(spinner) = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            bar.set_style(spinner.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Hidden reporter for quiet mode
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Update the progress display
    pub fn update(&self, progress: &HandleProgress) {
        let msg = format!(
            "Files: {} | Lines: {} | Kept: {} | Read: {} | Rate: {:.0} lines/s",
            format_number(progress.files),
            format_number(progress.lines),
            format_number(progress.unique),
            format_size(progress.bytes, BINARY),
            progress.lines_per_second(),
        );

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Print a header at the start of the run
pub fn print_header(dir: &str, filter: &str, result: &str) {
    println!();
    println!(
        "{} {}",
        style("numsift").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Directory:").bold(), dir);
    println!("  {} {}", style("Filter:").bold(), filter);
    println!("  {} {}", style("Result:").bold(), result);
    println!();
}

/// Print a summary of the handling run
pub fn print_summary(report: &HandleReport) {
    let duration_secs = report.duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        report.lines as f64 / duration_secs
    } else {
        0.0
    };

    println!();
    println!("{}", style("Handling Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Directories:").bold(),
        format_number(report.dirs)
    );
    println!("  {} {}", style("Files:").bold(), format_number(report.files));
    println!("  {} {}", style("Lines:").bold(), format_number(report.lines));
    println!(
        "  {} {} ({} distinct)",
        style("Matched:").bold(),
        format_number(report.accepted),
        format_number(report.unique)
    );
    println!(
        "  {} {}",
        style("Read:").bold(),
        format_size(report.bytes, BINARY)
    );
    println!(
        "  {} {:.1}s ({:.0} lines/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    println!(
        "  {} {}",
        style("Result:").bold(),
        report.result_path.display()
    );
    println!();
}
