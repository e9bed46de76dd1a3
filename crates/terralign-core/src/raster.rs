use std::path::Path;

use gdal::raster::GdalDataType;
use gdal::{Dataset, GeoTransform};
use ndarray::Array3;
use tracing::debug;

use crate::aoi::AreaOfInterest;
use crate::error::{Result, TerralignError};

/// Georeferencing metadata shared by every band of a dataset.
#[derive(Clone, Debug)]
pub struct RasterProfile {
    pub width: usize,
    pub height: usize,
    pub count: usize,
    pub geotransform: GeoTransform,
    pub projection: String,
    pub band_type: GdalDataType,
    pub nodata: Option<f64>,
}

/// Pixel-space read window derived from an AOI and a geotransform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelWindow {
    pub col_off: isize,
    pub row_off: isize,
    pub width: usize,
    pub height: usize,
}

impl PixelWindow {
    /// Map geographic bounds into pixel space through the raster's
    /// geotransform. Offsets and extents are rounded to the nearest pixel.
    ///
    /// The window is not clamped to the raster extent: a window reaching
    /// outside it surfaces the underlying GDAL read error to the caller.
    /// Rotated geotransforms are not supported; the rotation terms are
    /// ignored.
    pub fn from_bounds(gt: &GeoTransform, aoi: &AreaOfInterest) -> Result<Self> {
        let col_off = (aoi.west - gt[0]) / gt[1];
        let row_off = (aoi.north - gt[3]) / gt[5];
        let width = (aoi.east - aoi.west) / gt[1];
        let height = (aoi.south - aoi.north) / gt[5];

        if !width.is_finite() || !height.is_finite() || width.round() < 1.0 || height.round() < 1.0
        {
            return Err(TerralignError::InvalidAoi(format!(
                "AOI maps to an empty window ({width:.2}x{height:.2} px)"
            )));
        }

        Ok(Self {
            col_off: col_off.round() as isize,
            row_off: row_off.round() as isize,
            width: width.round() as usize,
            height: height.round() as usize,
        })
    }
}

/// Read the pixels of `path` covered by `aoi` as a (bands, height, width)
/// array.
///
/// Only the window derived from the AOI is read, never the full raster.
/// The dataset handle lives for the duration of this call only.
pub fn clip_to_aoi(path: &Path, aoi: &AreaOfInterest) -> Result<Array3<f32>> {
    let dataset = Dataset::open(path)?;
    let geotransform = dataset.geo_transform()?;
    let window = PixelWindow::from_bounds(&geotransform, aoi)?;
    let count = dataset.raster_count();

    debug!(
        path = %path.display(),
        col_off = window.col_off,
        row_off = window.row_off,
        width = window.width,
        height = window.height,
        bands = count,
        "windowed read"
    );

    let mut data = Vec::with_capacity(count * window.height * window.width);
    for band_index in 1..=count {
        let band = dataset.rasterband(band_index)?;
        let buffer = band.read_as::<f32>(
            (window.col_off, window.row_off),
            (window.width, window.height),
            (window.width, window.height),
            None,
        )?;
        data.extend_from_slice(buffer.data());
    }

    Ok(Array3::from_shape_vec(
        (count, window.height, window.width),
        data,
    )?)
}

/// Extract the georeferencing profile of a raster without reading pixels.
pub fn read_profile(path: &Path) -> Result<RasterProfile> {
    let dataset = Dataset::open(path)?;
    profile_from_dataset(&dataset)
}

pub(crate) fn profile_from_dataset(dataset: &Dataset) -> Result<RasterProfile> {
    let (width, height) = dataset.raster_size();
    if width == 0 || height == 0 {
        return Err(TerralignError::InvalidDimensions { width, height });
    }

    let band = dataset.rasterband(1)?;
    Ok(RasterProfile {
        width,
        height,
        count: dataset.raster_count(),
        geotransform: dataset.geo_transform()?,
        projection: dataset.projection(),
        band_type: band.band_type(),
        nodata: band.no_data_value(),
    })
}
