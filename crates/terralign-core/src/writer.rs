use std::path::Path;

use gdal::raster::{Buffer, GdalDataType, GdalType};
use gdal::spatial_ref::SpatialRef;
use gdal::DriverManager;
use ndarray::{ArrayView2, ArrayView3, Axis};
use num_traits::{NumCast, Zero};
use tracing::debug;

use crate::error::Result;
use crate::raster::{read_profile, RasterProfile};

/// Writer configuration. The fallback CRS is an explicit value rather than
/// a module constant so callers and tests can substitute their own default.
#[derive(Clone, Debug)]
pub struct WriterOptions {
    /// CRS used when no reference raster is available. Any definition GDAL
    /// understands (EPSG code, WKT, proj4).
    pub fallback_projection: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            fallback_projection: "EPSG:4326".into(),
        }
    }
}

/// Write a (bands, height, width) array as a GeoTIFF.
///
/// When `reference` names an existing raster, its profile (geotransform,
/// CRS, band type, nodata) is copied with only the dimensions and band
/// count overridden to the array's shape, so the output keeps the
/// reference's geographic placement. Without a usable reference a
/// synthetic profile is built instead: the fallback CRS, a unit-square
/// geotransform and an f32 band type. That output is not geographically
/// meaningful; it only keeps the writer from failing.
pub fn write_geotiff(
    pixels: ArrayView3<'_, f32>,
    path: &Path,
    reference: Option<&Path>,
    options: &WriterOptions,
) -> Result<()> {
    let (count, height, width) = pixels.dim();

    let profile = match reference {
        Some(ref_path) if ref_path.exists() => {
            let mut profile = read_profile(ref_path)?;
            profile.width = width;
            profile.height = height;
            profile.count = count;
            profile
        }
        _ => synthetic_profile(width, height, count, options)?,
    };

    debug!(
        path = %path.display(),
        width,
        height,
        bands = count,
        band_type = ?profile.band_type,
        "writing GeoTIFF"
    );

    match profile.band_type {
        GdalDataType::UInt8 => write_typed::<u8>(pixels, path, &profile),
        GdalDataType::UInt16 => write_typed::<u16>(pixels, path, &profile),
        GdalDataType::Int16 => write_typed::<i16>(pixels, path, &profile),
        GdalDataType::UInt32 => write_typed::<u32>(pixels, path, &profile),
        GdalDataType::Int32 => write_typed::<i32>(pixels, path, &profile),
        GdalDataType::Float64 => write_typed::<f64>(pixels, path, &profile),
        _ => write_typed::<f32>(pixels, path, &profile),
    }
}

/// Single-band convenience wrapper around [`write_geotiff`].
pub fn write_geotiff_band(
    pixels: ArrayView2<'_, f32>,
    path: &Path,
    reference: Option<&Path>,
    options: &WriterOptions,
) -> Result<()> {
    write_geotiff(pixels.insert_axis(Axis(0)), path, reference, options)
}

fn synthetic_profile(
    width: usize,
    height: usize,
    count: usize,
    options: &WriterOptions,
) -> Result<RasterProfile> {
    let projection = SpatialRef::from_definition(&options.fallback_projection)?.to_wkt()?;
    Ok(RasterProfile {
        width,
        height,
        count,
        // Unit square mapped onto the pixel grid, north-up.
        geotransform: [
            0.0,
            1.0 / width as f64,
            0.0,
            1.0,
            0.0,
            -1.0 / height as f64,
        ],
        projection,
        band_type: GdalDataType::Float32,
        nodata: None,
    })
}

fn write_typed<T>(pixels: ArrayView3<'_, f32>, path: &Path, profile: &RasterProfile) -> Result<()>
where
    T: GdalType + NumCast + Zero + Copy,
{
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset =
        driver.create_with_band_type::<T, _>(path, profile.width, profile.height, profile.count)?;
    dataset.set_geo_transform(&profile.geotransform)?;
    dataset.set_projection(&profile.projection)?;

    for (index, band) in pixels.outer_iter().enumerate() {
        let data: Vec<T> = band
            .iter()
            .map(|&v| NumCast::from(v).unwrap_or_else(T::zero))
            .collect();
        let mut buffer = Buffer::new((profile.width, profile.height), data);

        // GDAL band indices are 1-based.
        let mut raster_band = dataset.rasterband(index + 1)?;
        raster_band.write((0, 0), (profile.width, profile.height), &mut buffer)?;
        if let Some(nodata) = profile.nodata {
            raster_band.set_no_data_value(Some(nodata))?;
        }
    }

    Ok(())
}
