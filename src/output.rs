//! CLI output formatting for a finished run.
//!
//! ```text
//! photo.jpg
//!     s: out/s/photo.jpg (100x75)
//!     m: out/m/photo.jpg (500x375, watermarked)
//!     l: skipped (no dimension configured)
//!     xl: failed (invalid dimension "big": invalid digit found in string)
//! Wrote 2 of 4 sizes
//! ```
//!
//! [`format_run_report`] is pure and returns lines; [`print_run_report`]
//! writes them to stdout. Log lines go to stderr, so stdout carries only
//! this report (or its JSON form).

use crate::process::{RunReport, SizeStatus};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn status_line(status: &SizeStatus) -> String {
    match status {
        SizeStatus::Written {
            output,
            width,
            height,
            watermarked,
            owner_changed,
            ..
        } => {
            let mut notes = vec![format!("{width}x{height}")];
            if *watermarked {
                notes.push("watermarked".to_string());
            }
            if !owner_changed {
                notes.push("owner unchanged".to_string());
            }
            format!("{} ({})", output.display(), notes.join(", "))
        }
        SizeStatus::Skipped { reason } => format!("skipped ({reason})"),
        SizeStatus::Failed { error } => format!("failed ({error})"),
    }
}

pub fn format_run_report(report: &RunReport) -> Vec<String> {
    let mut lines = vec![report.input.display().to_string()];
    for outcome in &report.sizes {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            outcome.label,
            status_line(&outcome.status)
        ));
    }
    lines.push(format!(
        "Wrote {} of {} sizes",
        report.written(),
        report.sizes.len()
    ));
    lines
}

pub fn print_run_report(report: &RunReport) {
    for line in format_run_report(report) {
        println!("{}", line);
    }
}
