mod common;

use approx::assert_abs_diff_eq;
use gdal::raster::GdalDataType;
use gdal::Dataset;
use ndarray::{Array2, Array3};
use terralign_core::writer::{write_geotiff, write_geotiff_band, WriterOptions};

use common::{noise_pattern, read_band_u8, write_geotiff_u8};

#[test]
fn test_reference_profile_round_trips_losslessly() {
    let dir = tempfile::tempdir().unwrap();
    let ref_path = dir.path().join("reference.tif");
    let out_path = dir.path().join("out.tif");

    let bounds = (-122.5, 37.7, -122.3, 37.9);
    let pixels = noise_pattern(1, 100, 100, (0, 0));
    write_geotiff_u8(&ref_path, &pixels, bounds);

    let band: Array2<f32> = pixels
        .index_axis(ndarray::Axis(0), 0)
        .map(|&v| f32::from(v));
    write_geotiff_band(
        band.view(),
        &out_path,
        Some(&ref_path),
        &WriterOptions::default(),
    )
    .unwrap();

    let reference = Dataset::open(&ref_path).unwrap();
    let written = Dataset::open(&out_path).unwrap();

    // Geotransform and CRS copied from the reference.
    let ref_gt = reference.geo_transform().unwrap();
    let out_gt = written.geo_transform().unwrap();
    for i in 0..6 {
        assert_abs_diff_eq!(ref_gt[i], out_gt[i], epsilon = 1e-12);
    }
    assert!(written.projection().contains("WGS 84"));

    // Band type preserved, pixel values exact for integer-typed bands.
    assert_eq!(
        written.rasterband(1).unwrap().band_type(),
        GdalDataType::UInt8
    );
    let (w, h, values) = read_band_u8(&out_path, 1);
    assert_eq!((w, h), (100, 100));
    for (value, expected) in values.iter().zip(pixels.iter()) {
        assert_eq!(value, expected);
    }
}

#[test]
fn test_dimensions_follow_the_array_not_the_reference() {
    let dir = tempfile::tempdir().unwrap();
    let ref_path = dir.path().join("reference.tif");
    let out_path = dir.path().join("out.tif");

    write_geotiff_u8(
        &ref_path,
        &noise_pattern(1, 100, 100, (0, 0)),
        (0.0, 0.0, 1.0, 1.0),
    );

    // 2 bands of 40x50 against a 1-band 100x100 reference.
    let pixels = Array3::<f32>::from_shape_fn((2, 40, 50), |(b, r, c)| (b + r + c) as f32);
    write_geotiff(
        pixels.view(),
        &out_path,
        Some(&ref_path),
        &WriterOptions::default(),
    )
    .unwrap();

    let written = Dataset::open(&out_path).unwrap();
    assert_eq!(written.raster_size(), (50, 40));
    assert_eq!(written.raster_count(), 2);
}

#[test]
fn test_missing_reference_falls_back_to_synthetic_profile() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("fallback.tif");

    let band = Array2::<f32>::from_shape_fn((10, 10), |(r, c)| (r * 10 + c) as f32);
    write_geotiff_band(
        band.view(),
        &out_path,
        Some(std::path::Path::new("/nonexistent/reference.tif")),
        &WriterOptions::default(),
    )
    .unwrap();

    let written = Dataset::open(&out_path).unwrap();

    // Unit-square transform, default WGS84, f32 band.
    let gt = written.geo_transform().unwrap();
    let expected = [0.0, 0.1, 0.0, 1.0, 0.0, -0.1];
    for i in 0..6 {
        assert_abs_diff_eq!(gt[i], expected[i], epsilon = 1e-12);
    }
    assert!(written.projection().contains("WGS 84"));
    assert_eq!(
        written.rasterband(1).unwrap().band_type(),
        GdalDataType::Float32
    );

    let buffer = written
        .rasterband(1)
        .unwrap()
        .read_as::<f32>((0, 0), (10, 10), (10, 10), None)
        .unwrap();
    for (value, expected) in buffer.data().iter().zip(band.iter()) {
        assert_abs_diff_eq!(*value, *expected);
    }
}

#[test]
fn test_fallback_crs_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("mercator.tif");

    let band = Array2::<f32>::zeros((4, 4));
    let options = WriterOptions {
        fallback_projection: "EPSG:3857".into(),
    };
    write_geotiff_band(band.view(), &out_path, None, &options).unwrap();

    let written = Dataset::open(&out_path).unwrap();
    assert!(written.projection().contains("3857"));
}

#[test]
fn test_multiband_arrays_write_one_file_band_per_array_band() {
    let dir = tempfile::tempdir().unwrap();
    let ref_path = dir.path().join("reference.tif");
    let out_path = dir.path().join("multi.tif");

    let pixels = noise_pattern(3, 20, 30, (0, 0));
    write_geotiff_u8(&ref_path, &pixels, (0.0, 0.0, 1.0, 1.0));

    let as_f32: Array3<f32> = pixels.map(|&v| f32::from(v));
    write_geotiff(
        as_f32.view(),
        &out_path,
        Some(&ref_path),
        &WriterOptions::default(),
    )
    .unwrap();

    for band_index in 1..=3 {
        let (_, _, values) = read_band_u8(&out_path, band_index);
        let expected = pixels.index_axis(ndarray::Axis(0), band_index - 1);
        for (value, expected) in values.iter().zip(expected.iter()) {
            assert_eq!(value, expected);
        }
    }
}

#[test]
fn test_unwritable_path_propagates_the_failure() {
    let band = Array2::<f32>::zeros((4, 4));
    let result = write_geotiff_band(
        band.view(),
        std::path::Path::new("/nonexistent/dir/out.tif"),
        None,
        &WriterOptions::default(),
    );
    assert!(result.is_err());
}
