mod phase_correlation;
mod resample;
mod subpixel;

use ndarray::{ArrayView2, ArrayView3, Axis};

pub use phase_correlation::{estimate_shift, Registration};
pub use resample::{bilinear_sample, resize_bilinear};

/// Band used for registration when the input is multi-band: always index 0.
/// Bands are never averaged or otherwise combined.
pub fn registration_band(pixels: ArrayView3<'_, f32>) -> ArrayView2<'_, f32> {
    pixels.index_axis_move(Axis(0), 0)
}
