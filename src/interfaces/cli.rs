use crate::application::benchmarking::BenchmarkService;
use crate::application::progress::{CompletionOutcome, ProgressTracker};
use crate::config::Config;
use crate::domain::repositories::{ProblemRepository, ProgressRepository};
use crate::infrastructure::persistence::repositories::{
    SqliteBenchmarkRepository, SqliteProblemRepository, SqliteProgressRepository,
};
use crate::infrastructure::persistence::{Database, seed};
use crate::interfaces::report::{self, Reporter};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Practice-problem progress and benchmark tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and seed the problem catalog
    Init,

    /// List the catalog with per-problem progress
    List,

    /// Track one test-run outcome for a problem
    Record {
        /// Problem id or slug
        #[arg(short, long)]
        problem: String,

        /// Reference to the submitted solution artifact
        #[arg(short, long)]
        artifact: String,

        /// Whether the full test suite passed
        #[arg(long)]
        passed: bool,

        /// Number of tests that passed
        #[arg(long)]
        tests_passed: i64,

        /// Total number of tests
        #[arg(long)]
        tests_total: i64,
    },

    /// Record a benchmark run and compare against the stored best
    Bench {
        /// Problem id or slug
        #[arg(short, long)]
        problem: String,

        /// File holding the raw benchmark output; stdin when omitted
        #[arg(short, long)]
        file: Option<String>,

        /// Also write a JSON report file
        #[arg(long)]
        report: bool,
    },

    /// Show a problem's benchmark history, most recent first
    History {
        /// Problem id or slug
        #[arg(short, long)]
        problem: String,

        /// Also export the history as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Show aggregate progress
    Stats,
}

/// Resolve a `--problem` argument: numeric ids pass through, anything else
/// is treated as a slug.
async fn resolve_problem_id(repo: &dyn ProblemRepository, arg: &str) -> Result<i64> {
    if let Ok(id) = arg.parse::<i64>() {
        return Ok(id);
    }
    let problem = repo
        .find_by_slug(arg)
        .await?
        .with_context(|| format!("no problem with slug '{}'", arg))?;
    Ok(problem.id)
}

fn read_bench_input(file: Option<&str>) -> Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read benchmark output from stdin")?;
            Ok(raw)
        }
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let db = Database::new(&config.database_url).await?;

    let problems = Arc::new(SqliteProblemRepository::new(db.pool.clone()));
    let progress = SqliteProgressRepository::new(db.pool.clone());
    let benchmarks = Arc::new(SqliteBenchmarkRepository::new(db.pool.clone()));

    match cli.command {
        Commands::Init => {
            let inserted = seed::seed_catalog(problems.as_ref()).await?;
            println!(
                "Catalog ready: {} problems ({} newly seeded).",
                problems.count().await?,
                inserted
            );
        }

        Commands::List => {
            let catalog = problems.list().await?;
            let mut records = Vec::with_capacity(catalog.len());
            for p in &catalog {
                records.push(progress.get(p.id).await?);
            }
            report::print_catalog(&catalog, &records);
        }

        Commands::Record {
            problem,
            artifact,
            passed,
            tests_passed,
            tests_total,
        } => {
            let problem_id = resolve_problem_id(problems.as_ref(), &problem).await?;
            let tracker = ProgressTracker::new(db.clone());

            let first_time = tracker
                .track_completion(CompletionOutcome {
                    problem_id,
                    artifact,
                    passed,
                    tests_passed,
                    tests_total,
                })
                .await?;

            if first_time {
                println!("Solved for the first time!");
            } else if passed {
                println!("Passed ({}/{} tests).", tests_passed, tests_total);
            } else {
                println!("Recorded failed attempt ({}/{} tests).", tests_passed, tests_total);
            }
        }

        Commands::Bench {
            problem,
            file,
            report: write_report,
        } => {
            let problem_id = resolve_problem_id(problems.as_ref(), &problem).await?;
            let raw = read_bench_input(file.as_deref())?;

            let service = BenchmarkService::new(problems.clone(), benchmarks.clone());
            let (sample, comparison) = service.record(problem_id, &raw).await?;

            report::print_comparison(&sample, &comparison);

            if write_report {
                let reporter = Reporter::new(&config.report_dir)?;
                let path = reporter.write_json(&sample, &comparison)?;
                println!("Report saved to: {}", path.display());
            }
        }

        Commands::History { problem, csv } => {
            let problem_id = resolve_problem_id(problems.as_ref(), &problem).await?;
            let service = BenchmarkService::new(problems.clone(), benchmarks.clone());
            let samples = service.history(problem_id).await?;

            report::print_history(&samples);

            if csv {
                let reporter = Reporter::new(&config.report_dir)?;
                let path = reporter.export_history_csv(&samples)?;
                println!("History exported to: {}", path.display());
            }
        }

        Commands::Stats => {
            let summary = progress.summary().await?;
            report::print_summary(&summary);
        }
    }

    Ok(())
}
