use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::model::{KmeansReport, SobelReport};
use crate::{pipeline, report, storage};

#[derive(Debug, Parser)]
#[command(
    name = "perflab",
    version,
    about = "Parse lab benchmark timing logs and report speedup/efficiency"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sobel optimization lab: compiler-flag x executable timing matrix
    Sobel {
        /// Aggregate raw timings ("run") or re-plot a saved summary ("plot-only")
        #[arg(value_enum, default_value_t = SobelMode::PlotOnly)]
        mode: SobelMode,

        /// Consolidated build/run log
        #[arg(long, default_value = "run_results.txt")]
        input: PathBuf,

        /// Summary file written by run mode and read back by plot-only mode
        #[arg(long, default_value = "execution_times.txt")]
        summary: PathBuf,

        /// Export the aggregated report as JSON
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Display terminal charts
        #[arg(long)]
        show: bool,
    },

    /// Parallel k-means lab: OpenMP thread sweep speedup/efficiency
    Kmeans {
        /// Directory containing run_seq.log and run_t<N>.log files
        #[arg(long, default_value = "runs/logs")]
        log_dir: PathBuf,

        /// Write the performance table to this file
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Export the aggregated report as JSON
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Display terminal charts
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SobelMode {
    /// Parse the raw run log, aggregate, and save the summary file
    Run,
    /// Reuse a previously saved summary file
    PlotOnly,
}

pub fn run(args: Cli) -> Result<()> {
    match args.command {
        Command::Sobel {
            mode,
            input,
            summary,
            export_json,
            show,
        } => run_sobel(mode, &input, &summary, export_json.as_deref(), show),
        Command::Kmeans {
            log_dir,
            summary,
            export_json,
            show,
        } => run_kmeans(&log_dir, summary.as_deref(), export_json.as_deref(), show),
    }
}

fn run_sobel(
    mode: SobelMode,
    input: &Path,
    summary_path: &Path,
    export_json: Option<&Path>,
    show: bool,
) -> Result<()> {
    let report = match mode {
        SobelMode::Run => {
            let report = pipeline::sobel_from_run_results(input)?;
            storage::write_summary(summary_path, &report::sobel_summary_file(&report))?;
            info!(path = %summary_path.display(), "summary saved");
            report
        }
        SobelMode::PlotOnly => pipeline::sobel_from_summary(summary_path)?,
    };

    for line in report::sobel_text(&report).lines {
        println!("{line}");
    }

    if let Some(path) = export_json {
        storage::export_json(path, &report)?;
        info!(path = %path.display(), "exported JSON");
    }
    if show {
        show_sobel(&report)?;
    }
    Ok(())
}

fn run_kmeans(
    log_dir: &Path,
    summary_path: Option<&Path>,
    export_json: Option<&Path>,
    show: bool,
) -> Result<()> {
    // per-lab convention: an empty sweep is reported, not raised
    let Some(report) = pipeline::kmeans(log_dir)? else {
        println!("No OpenMP run logs found in {}", log_dir.display());
        return Ok(());
    };

    let text = report::kmeans_text(&report);
    for line in &text.lines {
        println!("{line}");
    }

    if let Some(path) = summary_path {
        storage::write_summary(path, &text.lines)?;
        info!(path = %path.display(), "summary saved");
    }
    if let Some(path) = export_json {
        storage::export_json(path, &report)?;
        info!(path = %path.display(), "exported JSON");
    }
    if show {
        show_kmeans(&report)?;
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn show_sobel(report: &SobelReport) -> Result<()> {
    crate::tui::show_sobel(report)
}

#[cfg(not(feature = "tui"))]
fn show_sobel(_report: &SobelReport) -> Result<()> {
    tracing::warn!("built without the tui feature; --show ignored");
    Ok(())
}

#[cfg(feature = "tui")]
fn show_kmeans(report: &KmeansReport) -> Result<()> {
    crate::tui::show_kmeans(report)
}

#[cfg(not(feature = "tui"))]
fn show_kmeans(_report: &KmeansReport) -> Result<()> {
    tracing::warn!("built without the tui feature; --show ignored");
    Ok(())
}
