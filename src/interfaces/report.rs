//! Human-readable and file output for tracking and benchmark results.
//!
//! All numeric inputs arrive as plain un-rounded values from the core;
//! scaling and rounding happen here and only here.

use crate::domain::benchmark::{BenchmarkSample, ComparisonResult};
use crate::domain::problem::Problem;
use crate::domain::progress::{ProgressRecord, ProgressSummary};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Scale a nanosecond magnitude at powers of 1000.
pub fn format_nanos(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.0} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

/// Scale a byte magnitude at powers of 1024.
pub fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;

    if bytes < KB {
        format!("{:.0} B", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes / KB)
    } else if bytes < GB {
        format!("{:.2} MB", bytes / MB)
    } else {
        format!("{:.2} GB", bytes / GB)
    }
}

fn format_delta(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// Print the catalog with per-problem progress.
pub fn print_catalog(problems: &[Problem], progress: &[Option<ProgressRecord>]) {
    println!("{}", "=".repeat(88));
    println!(
        "{:<4} | {:<36} | {:<8} | {:<18} | {:>6} | {}",
        "ID", "Title", "Diff", "Topic", "Tries", "Status"
    );
    println!("{}", "-".repeat(88));

    for (problem, record) in problems.iter().zip(progress) {
        let (tries, status) = match record {
            Some(r) if r.solved => (r.total_attempts, "solved"),
            Some(r) => (r.total_attempts, "in progress"),
            None => (0, "not started"),
        };
        println!(
            "{:<4} | {:<36} | {:<8} | {:<18} | {:>6} | {}",
            problem.id, problem.title, problem.difficulty, problem.topic, tries, status
        );
    }
    println!("{}", "=".repeat(88));
}

/// Print one benchmark run with its comparison against the stored best.
pub fn print_comparison(sample: &BenchmarkSample, result: &ComparisonResult) {
    println!(
        "{}  {} iters  {}  {}  {} allocs/op",
        sample.name,
        sample.iterations,
        format_nanos(sample.ns_per_op),
        format_bytes(sample.bytes_per_op),
        sample.allocs_per_op
    );
    println!(
        "vs best: time {}  mem {}  allocs {}",
        format_delta(result.time_delta_pct),
        format_delta(result.memory_delta_pct),
        format_delta(result.alloc_delta_pct)
    );
    if result.is_new_best {
        println!("new best time!");
    }
}

/// Print the benchmark history table, most recent first.
pub fn print_history(samples: &[BenchmarkSample]) {
    if samples.is_empty() {
        println!("No benchmark samples recorded.");
        return;
    }

    println!(
        "{:<20} | {:>12} | {:>12} | {:>10} | {:>10} | {}",
        "When", "Iterations", "Time/op", "Mem/op", "Allocs/op", "Name"
    );
    println!("{}", "-".repeat(88));
    for s in samples {
        println!(
            "{:<20} | {:>12} | {:>12} | {:>10} | {:>10} | {}",
            s.created_at.format("%Y-%m-%d %H:%M:%S"),
            s.iterations,
            format_nanos(s.ns_per_op),
            format_bytes(s.bytes_per_op),
            s.allocs_per_op,
            s.name
        );
    }
}

/// Print the aggregate progress summary.
pub fn print_summary(summary: &ProgressSummary) {
    println!(
        "solved {}/{}  in progress {}  total attempts {}",
        summary.solved, summary.total_problems, summary.attempted_unsolved, summary.total_attempts
    );
}

#[derive(Debug, Serialize)]
struct BenchmarkReport<'a> {
    timestamp: chrono::DateTime<Utc>,
    problem_id: i64,
    sample: &'a BenchmarkSample,
    comparison: &'a ComparisonResult,
}

/// Writes benchmark reports and exports under a configured directory.
pub struct Reporter {
    output_dir: PathBuf,
}

impl Reporter {
    pub fn new(output_dir: &str) -> Result<Self> {
        let path = PathBuf::from(output_dir);
        if !path.exists() {
            fs::create_dir_all(&path).context("Failed to create report output directory")?;
        }
        Ok(Self { output_dir: path })
    }

    /// Write one run's sample + comparison as a timestamped JSON file and
    /// return its path.
    pub fn write_json(
        &self,
        sample: &BenchmarkSample,
        comparison: &ComparisonResult,
    ) -> Result<PathBuf> {
        let report = BenchmarkReport {
            timestamp: Utc::now(),
            problem_id: sample.problem_id,
            sample,
            comparison,
        };

        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        let filename = format!("bench_report_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
        let path = self.output_dir.join(filename);
        fs::write(&path, json).context("Failed to write report file")?;

        Ok(path)
    }

    /// Export a problem's full benchmark history as CSV and return the path.
    pub fn export_history_csv(&self, samples: &[BenchmarkSample]) -> Result<PathBuf> {
        let filename = format!("bench_history_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
        let path = self.output_dir.join(filename);

        let mut writer = csv::Writer::from_path(&path).context("Failed to create CSV file")?;
        writer.write_record([
            "created_at",
            "name",
            "iterations",
            "ns_per_op",
            "bytes_per_op",
            "allocs_per_op",
        ])?;
        for s in samples {
            writer.write_record([
                s.created_at.to_rfc3339(),
                s.name.clone(),
                s.iterations.to_string(),
                s.ns_per_op.to_string(),
                s.bytes_per_op.to_string(),
                s.allocs_per_op.to_string(),
            ])?;
        }
        writer.flush()?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_nanos_breakpoints() {
        assert_eq!(format_nanos(999.0), "999 ns");
        assert_eq!(format_nanos(1_500.0), "1.50 µs");
        assert_eq!(format_nanos(2_500_000.0), "2.50 ms");
        assert_eq!(format_nanos(3_000_000_000.0), "3.00 s");
    }

    #[test]
    fn test_format_bytes_breakpoints() {
        assert_eq!(format_bytes(512.0), "512 B");
        assert_eq!(format_bytes(2048.0), "2.00 KB");
        assert_eq!(format_bytes(3.0 * 1024.0 * 1024.0), "3.00 MB");
        assert_eq!(format_bytes(1.5 * 1024.0 * 1024.0 * 1024.0), "1.50 GB");
    }

    #[test]
    fn test_format_delta_signs() {
        assert_eq!(format_delta(-20.0), "-20.00%");
        assert_eq!(format_delta(20.0), "+20.00%");
        assert_eq!(format_delta(0.0), "+0.00%");
    }
}
