//! # dlprof - Display-List Profile Analyzer
//!
//! dlprof is an offline analyzer for execution traces captured from an
//! instrumented graphics command processor. The processor re-runs every
//! command of a frame several times, logging a timestamp per run, dumps the
//! nested command-list tree it walked, and can snapshot the framebuffer after
//! each step. dlprof turns that into a ranked per-frame cost report and a
//! per-pixel cost heatmap.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │  trace.log   │     │ symbols.txt  │
//! └──────┬───────┘     └──────┬───────┘
//!        │ lines              │ lines
//!        ▼                    ▼
//! ┌──────────────┐     ┌──────────────┐
//! │    Trace     │     │ SymbolTable  │
//! │   Scanner    │     └──────┬───────┘
//! │ (overlay,    │            │
//! │  list tree,  │            │
//! │  batches)    │            │
//! └──────┬───────┘            │
//!        ▼                    ▼
//! ┌─────────────────────────────────┐     ┌──────────────┐
//! │  Symbolization (call labels)    │     │ step_<i>.bmp │
//! └──────┬──────────────────────────┘     └──────┬───────┘
//!        ▼                                       ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ Analysis: aggregate slots ─► diff frames ─► CostGrid │
//! └──────┬─────────────────────────────────┬────────────┘
//!        ▼                                 ▼
//! ┌──────────────┐                  ┌──────────────┐
//! │ Text / JSON  │                  │ pixel_cost   │
//! │   report     │                  │    .bmp      │
//! └──────────────┘                  └──────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`trace`]: line classification, nested-list reconstruction, batch segmentation
//! - [`symbolization`]: symbol table, memory overlay, synthesized call labels
//! - [`analysis`]: per-slot aggregation, frame diffing, cost grid
//! - [`imaging`]: bitmap codec and frame snapshot lookup
//! - [`export`]: ranked text report and JSON export
//! - [`cli`]: command-line arguments
//! - [`domain`]: newtypes and error types
//!
//! ## Typical Usage
//!
//! ```bash
//! dlprof trace.log symbols.txt
//! dlprof trace.log symbols.txt --images frames --export report.json
//! ```

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod export;
pub mod imaging;
pub mod symbolization;
pub mod trace;
