//! Progress report of the motif-mark binary, written to standard error.

use colored::Colorize;

use std::fmt::Write;
use std::path::Path;
use std::time::Duration;

use crate::graph::RunSummary;
use crate::layout::ColorTable;

/// Prints what a run reads, which motifs it marks and what it wrote. Silent when `quiet`.
pub struct Report {
    quiet: bool,
}

impl Report {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn inputs(&self, fasta: &Path, motifs: &Path, config: Option<&Path>, strict: bool) {
        let mut out = format!(
            "\n{} {}\n\n",
            "motif-mark".bold().cyan(),
            env!("CARGO_PKG_VERSION").dimmed()
        );
        heading(&mut out, "Inputs");
        field(&mut out, "FASTA", fasta.display());
        field(&mut out, "Motifs", motifs.display());
        if let Some(config) = config {
            field(&mut out, "Config", config.display());
        }
        if strict {
            field(&mut out, "Invalid motifs", "fail the run");
        }
        self.print(&out);
    }

    pub fn motifs(&self, colors: &ColorTable, dropped: usize) {
        self.print(&motif_table(colors, dropped));
    }

    pub fn finished(&self, summary: &RunSummary, outputs: &[&Path], elapsed: Duration) {
        self.print(&run_summary(summary, outputs, elapsed));
    }

    fn print(&self, out: &str) {
        if !self.quiet {
            eprintln!("{out}");
        }
    }
}

/// Each motif next to a swatch of the color it is drawn in.
fn motif_table(colors: &ColorTable, dropped: usize) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Motifs ({})", colors.len()));
    for (label, color) in colors.iter() {
        let _ = writeln!(
            out,
            "  {} {:<12} {}",
            "■■".truecolor(color.0, color.1, color.2),
            label,
            color.hex().dimmed()
        );
    }
    if colors.is_empty() {
        warn(&mut out, "no valid motifs, diagrams will only show exons");
    }
    if dropped > 0 {
        warn(&mut out, &format!("dropped {dropped} invalid motifs"));
    }
    out
}

fn run_summary(summary: &RunSummary, outputs: &[&Path], elapsed: Duration) -> String {
    let mut out = String::new();
    heading(&mut out, "Results");
    field(
        &mut out,
        "Sequences",
        format!("{} in {elapsed:.2?}", summary.records),
    );
    field(&mut out, "Occurrences", summary.occurrences);
    if summary.skipped > 0 {
        warn(
            &mut out,
            &format!("skipped {} malformed records", summary.skipped),
        );
    }
    for path in outputs {
        let _ = writeln!(out, "  {} {}", "✓".green().bold(), path.display());
    }
    out
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{} {}", title.bold().blue(), "─".repeat(40).dimmed());
}

fn field(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<16} {value}", key.dimmed());
}

fn warn(out: &mut String, msg: &str) {
    let _ = writeln!(out, "  {} {}", "⚠".yellow(), msg.yellow());
}
