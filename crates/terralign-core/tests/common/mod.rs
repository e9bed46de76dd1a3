use std::path::Path;

use gdal::raster::Buffer;
use gdal::spatial_ref::SpatialRef;
use gdal::DriverManager;
use ndarray::Array3;

/// Geographic bounds as (west, south, east, north), degrees.
pub type Bounds = (f64, f64, f64, f64);

/// Deterministic high-frequency test pattern. The hash mix gives every
/// band non-trivial structure so correlation peaks are sharp.
pub fn noise_value(band: usize, row: usize, col: usize) -> u8 {
    ((row.wrapping_mul(7919) ^ col.wrapping_mul(104_729) ^ band.wrapping_mul(7_577)) % 251) as u8
}

/// Build a (bands, height, width) noise pattern, sampled at an offset so
/// shifted variants of the same scene can be generated.
pub fn noise_pattern(
    bands: usize,
    height: usize,
    width: usize,
    origin: (usize, usize),
) -> Array3<u8> {
    Array3::from_shape_fn((bands, height, width), |(b, r, c)| {
        noise_value(b, r + origin.0, c + origin.1)
    })
}

/// Write `pixels` as an EPSG:4326 GeoTIFF covering `bounds`.
pub fn write_geotiff_u8(path: &Path, pixels: &Array3<u8>, bounds: Bounds) {
    let (count, height, width) = pixels.dim();
    let (west, south, east, north) = bounds;

    let driver = DriverManager::get_driver_by_name("GTiff").expect("GTiff driver");
    let mut dataset = driver
        .create_with_band_type::<u8, _>(path, width, height, count)
        .expect("create dataset");

    let geotransform = [
        west,
        (east - west) / width as f64,
        0.0,
        north,
        0.0,
        (south - north) / height as f64,
    ];
    dataset
        .set_geo_transform(&geotransform)
        .expect("set geotransform");
    let wkt = SpatialRef::from_epsg(4326)
        .expect("EPSG:4326")
        .to_wkt()
        .expect("projection WKT");
    dataset.set_projection(&wkt).expect("set projection");

    for (i, band) in pixels.outer_iter().enumerate() {
        let mut buffer = Buffer::new((width, height), band.iter().copied().collect());
        dataset
            .rasterband(i + 1)
            .expect("raster band")
            .write((0, 0), (width, height), &mut buffer)
            .expect("write band");
    }
}

/// Read one full band (1-based index) back as u8 values.
pub fn read_band_u8(path: &Path, band_index: usize) -> (usize, usize, Vec<u8>) {
    let dataset = gdal::Dataset::open(path).expect("open dataset");
    let (width, height) = dataset.raster_size();
    let buffer = dataset
        .rasterband(band_index)
        .expect("raster band")
        .read_as::<u8>((0, 0), (width, height), (width, height), None)
        .expect("read band");
    (width, height, buffer.data().to_vec())
}
