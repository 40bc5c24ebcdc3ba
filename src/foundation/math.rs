//! Scalar helpers shared by the geometry and raster code.

/// Squared distance between two points.
#[inline]
pub(crate) fn distance_squared(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1)
}

/// Whether `(x, y)` lies inside the triangle `(x1, y1), (x2, y2), (x3, y3)`.
///
/// Same-side sign test; points exactly on an edge count as outside on the
/// positive side, which is good enough for pointer hit-testing.
pub(crate) fn point_in_triangle(
    x: f64,
    y: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
) -> bool {
    let b1 = (x - x2) * (y1 - y2) - (x1 - x2) * (y - y2) < 0.0;
    let b2 = (x - x3) * (y2 - y3) - (x2 - x3) * (y - y3) < 0.0;
    let b3 = (x - x1) * (y3 - y1) - (x3 - x1) * (y - y1) < 0.0;
    b1 == b2 && b2 == b3
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
