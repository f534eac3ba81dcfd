#![forbid(unsafe_code)]

//! Human-readable report formatters
//!
//! Two renderings of a run report: a summary (execution statistics, status
//! breakdown, per-checker details and a listing of failures) and a detailed view
//! with every record. Status words are colored when the stream supports it.

use crate::engine::aggregator::{filter_results, summary_by_status};
use crate::engine::report::{CheckerOutcome, RunReport};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const SEPARATOR_WIDTH: usize = 70;

/// Human-readable formatter for run reports
pub struct HumanFormatter {
    color: ColorChoice,
}

impl HumanFormatter {
    /// Creates a formatter with the given color behavior
    pub fn new(color: ColorChoice) -> Self {
        HumanFormatter { color }
    }

    /// Print the execution summary to stdout
    pub fn print_summary(&self, report: &RunReport) -> io::Result<()> {
        let mut out = StandardStream::stdout(self.color);
        self.write_summary(&mut out, report)
    }

    /// Print the summary followed by every individual record to stdout
    pub fn print_detailed(&self, report: &RunReport) -> io::Result<()> {
        let mut out = StandardStream::stdout(self.color);
        self.write_summary(&mut out, report)?;
        self.write_detailed(&mut out, report)
    }

    /// Write the execution summary to the given stream
    pub fn write_summary(&self, out: &mut impl WriteColor, report: &RunReport) -> io::Result<()> {
        let separator = "=".repeat(SEPARATOR_WIDTH);

        writeln!(out, "{}", separator)?;
        writeln!(out, "IFCHECK - EXECUTION SUMMARY")?;
        writeln!(out, "{}", separator)?;
        writeln!(out, "Checkers run: {}", report.summary.total_checkers)?;
        writeln!(
            out,
            "Checkers successful: {}",
            report.summary.successful_checkers
        )?;
        writeln!(out, "Checkers failed: {}", report.summary.failed_checkers)?;
        writeln!(out, "Total results: {}", report.summary.total_results)?;
        writeln!(out)?;

        writeln!(out, "Results by status:")?;
        for (status, count) in summary_by_status(&report.results) {
            write!(out, "  ")?;
            self.write_status_word(out, &status)?;
            writeln!(out, ": {}", count)?;
        }
        writeln!(out)?;

        writeln!(out, "Checker execution details:")?;
        for detail in &report.summary.checker_details {
            match &detail.outcome {
                CheckerOutcome::Success { result_count } => {
                    writeln!(out, "  ✓ {}: {} result(s)", detail.checker, result_count)?;
                }
                CheckerOutcome::Failed { error } => {
                    writeln!(out, "  ✗ {}: {}", detail.checker, error)?;
                }
            }
        }
        writeln!(out, "{}", separator)?;

        let failures = filter_results(&report.results, Some("fail"), None);
        if !failures.is_empty() {
            writeln!(out)?;
            writeln!(out, "FAILURES DETECTED:")?;
            writeln!(out)?;
            for failure in failures {
                writeln!(
                    out,
                    "  • {}: {}",
                    failure.record.element_type, failure.record.element_name
                )?;
                writeln!(out, "    Status: {}", failure.record.check_status)?;
                writeln!(out, "    Expected: {}", failure.record.required_value)?;
                writeln!(out, "    Actual: {}", failure.record.actual_value)?;
                if let Some(comment) = &failure.record.comment {
                    writeln!(out, "    Note: {}", comment)?;
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }

    /// Write every record, numbered, to the given stream
    pub fn write_detailed(&self, out: &mut impl WriteColor, report: &RunReport) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "DETAILED RESULTS:")?;
        writeln!(out)?;

        for (i, result) in report.results.iter().enumerate() {
            write!(out, "{}. [", i + 1)?;
            self.write_status_word(out, &result.record.check_status.as_str().to_uppercase())?;
            writeln!(
                out,
                "] {}: {}",
                result.record.element_type, result.record.element_name
            )?;
            writeln!(out, "   File: {}", result.checker_file)?;
            writeln!(out, "   Function: {}", result.checker_function)?;
            writeln!(out, "   Expected: {}", result.record.required_value)?;
            writeln!(out, "   Actual: {}", result.record.actual_value)?;
            if let Some(comment) = &result.record.comment {
                writeln!(out, "   Comment: {}", comment)?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    fn write_status_word(&self, out: &mut impl WriteColor, status: &str) -> io::Result<()> {
        if let Some(color) = status_color(status) {
            out.set_color(ColorSpec::new().set_fg(Some(color)))?;
            write!(out, "{}", status)?;
            out.reset()
        } else {
            write!(out, "{}", status)
        }
    }
}

fn status_color(status: &str) -> Option<Color> {
    match status.to_lowercase().as_str() {
        "pass" => Some(Color::Green),
        "fail" => Some(Color::Red),
        "warning" => Some(Color::Yellow),
        _ => None,
    }
}
