//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// Directory searched for `step_<i>.bmp` snapshots when `--images` is omitted
pub const DEFAULT_IMAGES_DIR: &str = "log_images";

/// Heatmap file name inside the images directory
pub const HEATMAP_FILE_NAME: &str = "pixel_cost.bmp";

#[derive(Parser, Debug)]
#[command(
    name = "dlprof",
    about = "Rank display-list command costs from a profiling trace",
    after_help = "\
EXAMPLES:
    dlprof trace.log symbols.txt                    Report + log_images/pixel_cost.bmp
    dlprof trace.log symbols.txt --images frames    Read snapshots from ./frames
    dlprof trace.log symbols.txt --export out.json  Also write the report as JSON"
)]
pub struct Args {
    /// Trace log captured from the instrumented command processor
    #[arg(value_name = "TRACE")]
    pub trace: PathBuf,

    /// Symbol dump (`0x<16hex> <name>` per line)
    #[arg(value_name = "SYMBOLS")]
    pub symbols: PathBuf,

    /// Directory holding per-step frame snapshots
    #[arg(long, value_name = "DIR", default_value = DEFAULT_IMAGES_DIR)]
    pub images: PathBuf,

    /// Heatmap output path (defaults to <DIR>/pixel_cost.bmp)
    #[arg(long, value_name = "FILE")]
    pub heatmap: Option<PathBuf>,

    /// Export the ranked report as JSON
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Suppress snapshot names and the run summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Where the heatmap is written
    #[must_use]
    pub fn heatmap_path(&self) -> PathBuf {
        self.heatmap.clone().unwrap_or_else(|| self.images.join(HEATMAP_FILE_NAME))
    }
}
