use std::ops::Range;

use ndarray::{s, Array3};

/// Integer pixel displacement in (row, column) order.
///
/// Positive components move content toward higher indices (down/right).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShiftVector {
    pub dy: isize,
    pub dx: isize,
}

/// Per-axis overlap between a shifted copy and its frame.
///
/// For a signed shift `s` on an axis of length `dim`, the source range is
/// `max(0,-s) .. dim - max(0,s)` and the destination range is
/// `max(0,s) .. dim - max(0,-s)`. A zero shift spans the full axis;
/// `|s| >= dim` leaves no overlap at all.
fn axis_overlap(dim: usize, s: isize) -> (Range<usize>, Range<usize>) {
    if s.unsigned_abs() >= dim {
        return (0..0, 0..0);
    }
    let fwd = s.max(0) as usize;
    let back = (-s).max(0) as usize;
    (back..dim - fwd, fwd..dim - back)
}

/// Translate every band of `target` by `shift`.
///
/// Returns a new array of identical shape where the overlapping region has
/// been copied band by band and everything outside it stays at zero. There
/// is no wraparound or extrapolation, and `target` is never mutated.
pub fn apply_shift(target: &Array3<f32>, shift: ShiftVector) -> Array3<f32> {
    let (_, height, width) = target.dim();
    let mut aligned = Array3::<f32>::zeros(target.raw_dim());

    let (src_rows, dst_rows) = axis_overlap(height, shift.dy);
    let (src_cols, dst_cols) = axis_overlap(width, shift.dx);
    if src_rows.is_empty() || src_cols.is_empty() {
        return aligned;
    }

    aligned
        .slice_mut(s![.., dst_rows, dst_cols])
        .assign(&target.slice(s![.., src_rows, src_cols]));
    aligned
}
