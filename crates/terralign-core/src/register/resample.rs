use ndarray::{Array2, ArrayView2};

/// Sample `data` at a fractional (row, col) position with bilinear weights.
/// Out-of-bounds taps contribute zero.
pub fn bilinear_sample(data: ArrayView2<'_, f32>, y: f64, x: f64) -> f32 {
    let (h, w) = data.dim();

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let sample = |r: i64, c: i64| -> f32 {
        if r >= 0 && r < h as i64 && c >= 0 && c < w as i64 {
            data[[r as usize, c as usize]]
        } else {
            0.0
        }
    };

    let v00 = sample(y0, x0);
    let v10 = sample(y0, x1);
    let v01 = sample(y1, x0);
    let v11 = sample(y1, x1);

    v00 * (1.0 - fx) * (1.0 - fy)
        + v10 * fx * (1.0 - fy)
        + v01 * (1.0 - fx) * fy
        + v11 * fx * fy
}

/// Resize `data` onto an (out_h, out_w) grid with bilinear interpolation.
///
/// Sample positions are pixel centers, clamped to the source extent so the
/// border rows and columns are not darkened by out-of-bounds taps.
pub fn resize_bilinear(data: ArrayView2<'_, f32>, shape: (usize, usize)) -> Array2<f32> {
    let (h, w) = data.dim();
    let (out_h, out_w) = shape;
    if h == 0 || w == 0 {
        return Array2::zeros((out_h, out_w));
    }
    let sy = h as f64 / out_h as f64;
    let sx = w as f64 / out_w as f64;

    Array2::from_shape_fn((out_h, out_w), |(r, c)| {
        let y = ((r as f64 + 0.5) * sy - 0.5).clamp(0.0, (h - 1) as f64);
        let x = ((c as f64 + 0.5) * sx - 0.5).clamp(0.0, (w - 1) as f64);
        bilinear_sample(data, y, x)
    })
}
