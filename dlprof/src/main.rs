//! # dlprof - Main Entry Point
//!
//! Reads the trace and symbol dump, prints the ranked report to stdout and
//! writes the pixel cost heatmap. Both inputs are read before any output is
//! produced, so a missing file leaves nothing behind.

use anyhow::{Context, Result};
use clap::Parser;
use dlprof::analysis::analyze_trace;
use dlprof::cli::Args;
use dlprof::domain::AnalyzerError;
use dlprof::export::{write_report, JsonReportExporter};
use dlprof::imaging::{encode, DirectoryFrameStore, Frame};
use dlprof::symbolization::SymbolTable;
use dlprof::trace::TraceScan;
use log::info;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run() -> Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;

    let symbols = SymbolTable::from_file(&args.symbols)?;
    let scan = TraceScan::from_file(&args.trace)?;
    info!(
        "Scanned {} lines: {} samples in {} batches, {} symbols",
        scan.stats.lines,
        scan.stats.samples,
        scan.batches.len(),
        symbols.len()
    );

    let frames = DirectoryFrameStore::new(&args.images);
    let analysis = analyze_trace(scan, &symbols, &frames);

    let mut out = BufWriter::new(io::stdout().lock());
    if !quiet {
        for path in frames.take_consulted() {
            writeln!(out, "{}", path.display()).context("Failed to write report")?;
        }
    }
    write_report(&mut out, &analysis.batches, &symbols).context("Failed to write report")?;

    let heatmap_path = args.heatmap_path();
    write_heatmap(&heatmap_path, &analysis.grid.to_grayscale())?;

    if let Some(ref export_path) = args.export {
        let file = File::create(export_path)
            .with_context(|| format!("Failed to create {}", export_path.display()))?;
        JsonReportExporter::new(&symbols)
            .export(BufWriter::new(file), &analysis.batches, &analysis.grid, &analysis.heatmap)
            .context("Failed to export report")?;
    }

    if !quiet {
        eprintln!(
            "\n{} lines, {} samples, {} batches, {} malformed list directives, {} labels, \
             {} frames loaded, {} frame pairs diffed -> {}",
            analysis.scan.lines,
            analysis.scan.samples,
            analysis.batches.len(),
            analysis.scan.malformed_lists,
            analysis.labels,
            analysis.heatmap.frames_loaded,
            analysis.heatmap.pairs_diffed,
            heatmap_path.display(),
        );
    }

    Ok(())
}

fn write_heatmap(path: &Path, image: &Frame) -> Result<()> {
    let heatmap_error =
        |source: io::Error| AnalyzerError::HeatmapWrite { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(heatmap_error)?;
    }
    let bytes = encode(image).context("Failed to encode heatmap")?;
    fs::write(path, bytes).map_err(heatmap_error)?;
    Ok(())
}
