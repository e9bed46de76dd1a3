use ndarray::Array2;

/// Refine a correlation peak with a separable parabola fit on its 3x3
/// neighborhood.
///
/// Returns (delta_row, delta_col) as fractional offsets from the integer
/// peak, each clamped to +/- 0.5 pixel. Peaks on the surface border are
/// left unrefined.
pub fn refine_peak(correlation: &Array2<f64>, peak_row: usize, peak_col: usize) -> (f64, f64) {
    let (h, w) = correlation.dim();
    if peak_row == 0 || peak_row >= h - 1 || peak_col == 0 || peak_col >= w - 1 {
        return (0.0, 0.0);
    }

    let delta_row = parabola_vertex(
        correlation[[peak_row - 1, peak_col]],
        correlation[[peak_row, peak_col]],
        correlation[[peak_row + 1, peak_col]],
    );
    let delta_col = parabola_vertex(
        correlation[[peak_row, peak_col - 1]],
        correlation[[peak_row, peak_col]],
        correlation[[peak_row, peak_col + 1]],
    );

    (delta_row, delta_col)
}

/// Vertex offset of the parabola through three equally spaced samples.
fn parabola_vertex(prev: f64, curr: f64, next: f64) -> f64 {
    let denom = prev - 2.0 * curr + next;
    if denom.abs() > 1e-12 {
        ((prev - next) / (2.0 * denom)).clamp(-0.5, 0.5)
    } else {
        0.0
    }
}
