use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use terralign_core::raster::read_profile;

#[derive(Args)]
pub struct InfoArgs {
    /// Input raster file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let profile = read_profile(&args.file)?;

    println!("File:         {}", args.file.display());
    println!("Dimensions:   {}x{}", profile.width, profile.height);
    println!("Bands:        {} ({:?})", profile.count, profile.band_type);
    println!("Geotransform: {:?}", profile.geotransform);
    println!("Projection:   {}", profile.projection);

    if let Some(nodata) = profile.nodata {
        println!("Nodata:       {}", nodata);
    }

    Ok(())
}
