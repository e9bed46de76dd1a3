use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerralignError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid AOI: {0}")]
    InvalidAoi(String),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Registration error: {0}")]
    Registration(String),
}

pub type Result<T> = std::result::Result<T, TerralignError>;
