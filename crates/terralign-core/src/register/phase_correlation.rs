use ndarray::{Array2, ArrayView2};
use num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};
use tracing::debug;

use crate::error::{Result, TerralignError};
use crate::shift::ShiftVector;

use super::resample::resize_bilinear;
use super::subpixel::refine_peak;

/// Result of registering a target band against a reference band.
#[derive(Clone, Copy, Debug)]
pub struct Registration {
    /// Integer pixel shift to apply to the target so its content coincides
    /// with the reference.
    pub shift: ShiftVector,
    /// Normalized registration error: 0.0 for a perfect correlation peak,
    /// approaching 1.0 as the peak flattens out. Advisory only.
    pub error: f64,
}

/// Estimate the integer pixel translation between two single-band grids
/// using FFT phase correlation.
///
/// If the shapes differ, the target is resampled onto the reference grid
/// first; the resampled band is used for correlation only and discarded.
/// Constant-valued inputs produce an unstable peak; that limitation is
/// reported only through the error value, never as a failure.
pub fn estimate_shift(
    reference: ArrayView2<'_, f32>,
    target: ArrayView2<'_, f32>,
) -> Result<Registration> {
    let (h, w) = reference.dim();
    if h == 0 || w == 0 {
        return Err(TerralignError::Registration(
            "empty registration band".into(),
        ));
    }

    let resampled;
    let target = if target.dim() != (h, w) {
        let (th, tw) = target.dim();
        debug!(
            target_width = tw,
            target_height = th,
            width = w,
            height = h,
            "resampling target band to match reference"
        );
        resampled = resize_bilinear(target, (h, w));
        resampled.view()
    } else {
        target
    };

    let mut ref_fft = windowed_spectrum(reference);
    let mut tgt_fft = windowed_spectrum(target);
    fft2d(&mut ref_fft, FftDirection::Forward);
    fft2d(&mut tgt_fft, FftDirection::Forward);

    let mut cross_power = normalized_cross_power(&ref_fft, &tgt_fft);
    fft2d(&mut cross_power, FftDirection::Inverse);
    let correlation = real_surface(&cross_power);

    let (peak_row, peak_col, peak_val) = find_peak(&correlation);

    // Unwrap the cyclic peak position into a signed offset.
    let dy = if peak_row > h / 2 {
        peak_row as f64 - h as f64
    } else {
        peak_row as f64
    };
    let dx = if peak_col > w / 2 {
        peak_col as f64 - w as f64
    } else {
        peak_col as f64
    };

    let (sub_dy, sub_dx) = refine_peak(&correlation, peak_row, peak_col);

    // Only whole-pixel shifts are ever applied downstream.
    let shift = ShiftVector {
        dy: (dy + sub_dy).round() as isize,
        dx: (dx + sub_dx).round() as isize,
    };
    let error = (1.0 - peak_val).max(0.0).sqrt();

    debug!(dy = shift.dy, dx = shift.dx, error, "correlation peak");
    Ok(Registration { shift, error })
}

/// Convert a band to complex samples with a Hann window applied to reduce
/// spectral leakage from the non-periodic borders.
fn windowed_spectrum(data: ArrayView2<'_, f32>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((h, w), |(r, c)| {
        let wy = 0.5 * (1.0 - (std::f64::consts::TAU * r as f64 / h as f64).cos());
        let wx = 0.5 * (1.0 - (std::f64::consts::TAU * c as f64 / w as f64).cos());
        Complex::new(data[[r, c]] as f64 * wy * wx, 0.0)
    })
}

/// In-place 2D FFT: row passes then column passes.
fn fft2d(work: &mut Array2<Complex<f64>>, direction: FftDirection) {
    let (h, w) = work.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft(w, direction);
    let fft_col = planner.plan_fft(h, direction);

    let mut line: Vec<Complex<f64>> = Vec::with_capacity(h.max(w));

    for r in 0..h {
        line.clear();
        line.extend((0..w).map(|c| work[[r, c]]));
        fft_row.process(&mut line);
        for c in 0..w {
            work[[r, c]] = line[c];
        }
    }

    for c in 0..w {
        line.clear();
        line.extend((0..h).map(|r| work[[r, c]]));
        fft_col.process(&mut line);
        for r in 0..h {
            work[[r, c]] = line[r];
        }
    }
}

/// Cross-power spectrum normalized to unit magnitude per bin.
fn normalized_cross_power(
    ref_fft: &Array2<Complex<f64>>,
    tgt_fft: &Array2<Complex<f64>>,
) -> Array2<Complex<f64>> {
    let (h, w) = ref_fft.dim();
    Array2::from_shape_fn((h, w), |(r, c)| {
        let cross = ref_fft[[r, c]] * tgt_fft[[r, c]].conj();
        let mag = cross.norm();
        if mag > 1e-12 {
            cross / mag
        } else {
            Complex::new(0.0, 0.0)
        }
    })
}

/// Real part of an inverse-transformed spectrum, scaled by 1/(h*w) so a
/// perfect correlation peaks at 1.0.
fn real_surface(work: &Array2<Complex<f64>>) -> Array2<f64> {
    let (h, w) = work.dim();
    let scale = 1.0 / (h * w) as f64;
    work.map(|v| v.re * scale)
}

fn find_peak(data: &Array2<f64>) -> (usize, usize, f64) {
    let mut best = (0, 0, f64::NEG_INFINITY);
    for ((r, c), &val) in data.indexed_iter() {
        if val > best.2 {
            best = (r, c, val);
        }
    }
    best
}
