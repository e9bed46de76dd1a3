use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use terralign_core::aoi::AreaOfInterest;
use terralign_core::pipeline::{run_alignment, AlignmentJob, ALIGNMENT_INFO_NAME};

#[derive(Args)]
pub struct AlignArgs {
    /// Path to the reference image A
    #[arg(long)]
    pub image_a: PathBuf,

    /// Path to the target image B, aligned to A in the output
    #[arg(long)]
    pub image_b: PathBuf,

    /// Area of interest, e.g. "north=37.85;south=37.75;east=-122.35;west=-122.45"
    #[arg(long)]
    pub aoi: String,

    /// Output directory for the clipped and aligned rasters
    #[arg(long)]
    pub out_dir: PathBuf,
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let aoi: AreaOfInterest = args.aoi.parse()?;
    let job = AlignmentJob {
        image_a: args.image_a.clone(),
        image_b: args.image_b.clone(),
        aoi,
        out_dir: args.out_dir.clone(),
    };

    let record = run_alignment(&job)?;

    println!(
        "Shift: ({}, {}) px, error {:.6}",
        record.shift_y, record.shift_x, record.error
    );
    println!(
        "Outputs written to {} ({} alongside)",
        args.out_dir.display(),
        ALIGNMENT_INFO_NAME
    );
    Ok(())
}
