pub mod aoi;
pub mod error;
pub mod pipeline;
pub mod raster;
pub mod register;
pub mod shift;
pub mod writer;
