//! Raster drawing: affine pixmap-into-pixmap painting and stroked lines.
//!
//! Destination pixels are inverse-mapped through the transform and the source
//! is bilinearly sampled. Out-of-range and non-finite source coordinates
//! sample transparent, so degenerate transforms stay finite instead of
//! failing.

use kurbo::{Affine, Point};
use rayon::prelude::*;

use crate::{
    foundation::core::Rgba8Premul,
    raster::composite::{self, CompositeMode, PremulRgba8},
    raster::pixmap::Pixmap,
};

impl Pixmap {
    /// Draw `src` into `self` under `transform`, compositing per `mode`.
    ///
    /// The whole destination surface is processed; this matters for
    /// [`CompositeMode::DestinationAtop`], which clears destination pixels
    /// the transformed source does not cover.
    pub fn draw_pixmap(&mut self, src: &Pixmap, transform: Affine, mode: CompositeMode) {
        let inv = transform.inverse().as_coeffs();
        let dst_w = self.width() as usize;
        if dst_w == 0 {
            return;
        }

        self.data_mut()
            .par_chunks_exact_mut(dst_w * 4)
            .enumerate()
            .for_each(|(y, row)| {
                let cy = y as f64 + 0.5;
                for x in 0..dst_w {
                    let cx = x as f64 + 0.5;
                    let sx = inv[0] * cx + inv[2] * cy + inv[4] - 0.5;
                    let sy = inv[1] * cx + inv[3] * cy + inv[5] - 0.5;
                    let sample = sample_bilinear(src, sx, sy);

                    let i = x * 4;
                    let dst = [row[i], row[i + 1], row[i + 2], row[i + 3]];
                    let out = composite::composite(mode, dst, sample);
                    row[i..i + 4].copy_from_slice(&out);
                }
            });
    }

    /// Stroke a round-capped line segment of the given width, with a one
    /// pixel anti-aliased edge.
    pub fn stroke_line(
        &mut self,
        p0: Point,
        p1: Point,
        width: f64,
        color: Rgba8Premul,
        mode: CompositeMode,
    ) {
        if width <= 0.0 || !width.is_finite() {
            return;
        }
        let radius = width / 2.0;
        let pad = radius + 1.0;

        let min_x = ((p0.x.min(p1.x) - pad).floor().max(0.0)) as u32;
        let min_y = ((p0.y.min(p1.y) - pad).floor().max(0.0)) as u32;
        let max_x = (p0.x.max(p1.x) + pad).ceil().min(f64::from(self.width()));
        let max_y = (p0.y.max(p1.y) + pad).ceil().min(f64::from(self.height()));
        if max_x <= 0.0 || max_y <= 0.0 {
            return;
        }

        let src = color.to_array();
        for y in min_y..max_y as u32 {
            for x in min_x..max_x as u32 {
                let d = distance_to_segment(
                    Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5),
                    p0,
                    p1,
                );
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let scaled = scale_premul(src, coverage);
                let out = composite::composite(mode, self.pixel(x, y).to_array(), scaled);
                self.set_pixel(
                    x,
                    y,
                    Rgba8Premul {
                        r: out[0],
                        g: out[1],
                        b: out[2],
                        a: out[3],
                    },
                );
            }
        }
    }
}

fn sample_bilinear(src: &Pixmap, x: f64, y: f64) -> PremulRgba8 {
    if !x.is_finite() || !y.is_finite() {
        return [0; 4];
    }
    let w = f64::from(src.width());
    let h = f64::from(src.height());
    if x <= -1.0 || y <= -1.0 || x >= w || y >= h {
        return [0; 4];
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = (x - x0) as f32;
    let fy = (y - y0) as f32;

    let texel = |tx: f64, ty: f64| -> [f32; 4] {
        if tx < 0.0 || ty < 0.0 {
            return [0.0; 4];
        }
        let px = src.pixel(tx as u32, ty as u32).to_array();
        [
            f32::from(px[0]),
            f32::from(px[1]),
            f32::from(px[2]),
            f32::from(px[3]),
        ]
    };

    let p00 = texel(x0, y0);
    let p10 = texel(x0 + 1.0, y0);
    let p01 = texel(x0, y0 + 1.0);
    let p11 = texel(x0 + 1.0, y0 + 1.0);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = p00[i] * (1.0 - fx) + p10[i] * fx;
        let bottom = p01[i] * (1.0 - fx) + p11[i] * fx;
        out[i] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn scale_premul(px: PremulRgba8, factor: f64) -> PremulRgba8 {
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = (f64::from(px[i]) * factor).round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/draw.rs"]
mod tests;
