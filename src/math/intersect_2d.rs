use super::Point2;

/// Parametric 2D line-line intersection.
///
/// Given the line through `p1`, `p2` (parameter `t`, `p1` at 0 and `p2` at 1) and the line through
/// `p3`, `p4` (parameter `u`), returns `(t, u)` at their crossing.
///
/// Returns `None` only when the determinant is exactly zero. Lines that are merely close to
/// parallel produce a far-away crossing rather than `None`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn line_line_params_2d(p1: &Point2, p2: &Point2, p3: &Point2, p4: &Point2) -> Option<(f64, f64)> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);
    let (x4, y4) = (p4.x, p4.y);

    let det = (x4 - x3) * (y1 - y2) - (x1 - x2) * (y4 - y3);
    if det == 0.0 {
        return None;
    }

    let t = ((y3 - y4) * (x1 - x3) + (x4 - x3) * (y1 - y3)) / det;
    let u = ((y1 - y2) * (x1 - x3) + (x2 - x1) * (y1 - y3)) / det;
    Some((t, u))
}

/// Linear interpolation between `a` (at 0) and `b` (at 1).
#[must_use]
pub fn lerp_2d(a: &Point2, b: &Point2, t: f64) -> Point2 {
    Point2::new(a.x * (1.0 - t) + b.x * t, a.y * (1.0 - t) + b.y * t)
}
