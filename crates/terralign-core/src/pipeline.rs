use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::aoi::AreaOfInterest;
use crate::error::Result;
use crate::raster::clip_to_aoi;
use crate::register::{estimate_shift, registration_band};
use crate::shift::apply_shift;
use crate::writer::{write_geotiff, WriterOptions};

pub const CLIPPED_REFERENCE_NAME: &str = "A_clipped.tif";
pub const ALIGNED_TARGET_NAME: &str = "B_clipped_aligned.tif";
pub const ALIGNMENT_INFO_NAME: &str = "alignment_info.json";

/// One alignment job: two source rasters, an AOI and an output directory.
///
/// Jobs share no state; concurrent jobs are safe as long as they write to
/// distinct output directories.
#[derive(Clone, Debug)]
pub struct AlignmentJob {
    pub image_a: PathBuf,
    pub image_b: PathBuf,
    pub aoi: AreaOfInterest,
    pub out_dir: PathBuf,
}

/// The durable record of a completed job, persisted as
/// `alignment_info.json` next to the output rasters.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AlignmentRecord {
    pub shift_x: i64,
    pub shift_y: i64,
    pub error: f64,
}

/// Run the full alignment pipeline.
///
/// Clips both images to the AOI, estimates the shift of B relative to A on
/// band 0 of the clipped arrays, applies it to the original (un-resampled)
/// clipped B, and writes both outputs plus the alignment record. Every
/// stage completes before the next begins and all failures are fatal to
/// the job; there is no internal retry.
pub fn run_alignment(job: &AlignmentJob) -> Result<AlignmentRecord> {
    std::fs::create_dir_all(&job.out_dir)?;

    info!(image = %job.image_a.display(), "clipping reference image to AOI");
    let clipped_a = clip_to_aoi(&job.image_a, &job.aoi)?;

    info!(image = %job.image_b.display(), "clipping target image to AOI");
    let clipped_b = clip_to_aoi(&job.image_b, &job.aoi)?;

    let registration = estimate_shift(
        registration_band(clipped_a.view()),
        registration_band(clipped_b.view()),
    )?;
    info!(
        dy = registration.shift.dy,
        dx = registration.shift.dx,
        error = registration.error,
        "estimated shift"
    );

    let aligned_b = apply_shift(&clipped_b, registration.shift);

    let options = WriterOptions::default();
    let path_a = job.out_dir.join(CLIPPED_REFERENCE_NAME);
    let path_b = job.out_dir.join(ALIGNED_TARGET_NAME);

    info!(path = %path_a.display(), "writing clipped reference");
    write_geotiff(clipped_a.view(), &path_a, Some(&job.image_a), &options)?;

    info!(path = %path_b.display(), "writing aligned target");
    write_geotiff(aligned_b.view(), &path_b, Some(&job.image_b), &options)?;

    let record = AlignmentRecord {
        shift_x: registration.shift.dx as i64,
        shift_y: registration.shift.dy as i64,
        error: registration.error,
    };
    let json = serde_json::to_string_pretty(&record)?;
    std::fs::write(job.out_dir.join(ALIGNMENT_INFO_NAME), json)?;

    Ok(record)
}
