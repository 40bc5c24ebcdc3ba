use rand::Rng;

use crate::foundation::error::{FractalineError, FractalineResult};

pub use kurbo::{Affine, Point, Vec2};

/// Pixel dimensions of a raster surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent pixel.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight-alpha colour.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// The pixel as `[r, g, b, a]` bytes.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One corner of a frame's parallelogram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Corner {
    /// The frame origin `(e, f)`.
    TopLeft,
    /// Origin plus the right edge vector.
    TopRight,
    /// Origin plus both edge vectors.
    BottomRight,
    /// Origin plus the down edge vector.
    BottomLeft,
}

impl Corner {
    /// All corners in hit-test order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// Transient editor selection: which frame, and optionally which corner.
///
/// Created empty, set on pointer-down, cleared on pointer-up. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Selection {
    /// Selected frame index into the [`FrameList`], if any.
    pub index: Option<usize>,
    /// Selected corner handle of that frame, if any.
    pub corner: Option<Corner>,
}

impl Selection {
    /// An empty selection.
    pub fn none() -> Self {
        Self::default()
    }
}

/// A six-scalar affine frame: linear part `[[a, c], [b, d]]` plus
/// translation `(e, f)`.
///
/// Interpreted as a unit square mapped to a parallelogram with top-left
/// corner `(e, f)`, right edge vector `(a, c)` and down edge vector `(b, d)`.
/// The frame at index 0 of a [`FrameList`] is the reference frame; every
/// other frame is a generator expressed in the same surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Right edge x component.
    pub a: f64,
    /// Down edge x component.
    pub b: f64,
    /// Right edge y component.
    pub c: f64,
    /// Down edge y component.
    pub d: f64,
    /// Translation x (top-left corner).
    pub e: f64,
    /// Translation y (top-left corner).
    pub f: f64,
}

impl Frame {
    /// Build a frame from its six scalars.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Pure translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// Uniform scale by `s` about the fixed point `(px, py)`.
    pub fn scale_about(s: f64, px: f64, py: f64) -> Self {
        Self::new(s, 0.0, 0.0, s, (1.0 - s) * px, (1.0 - s) * py)
    }

    /// Rotation by `theta` combined with uniform scale `s`, translated so the
    /// parallelogram's bounding centre lands on `(cx, cy)`.
    pub fn similarity_centred(s: f64, theta: f64, cx: f64, cy: f64) -> Self {
        let a = s * theta.cos();
        let b = s * theta.sin();
        Self::new(a, b, -b, a, cx - (a + b) / 2.0, cy - (a - b) / 2.0)
    }

    /// Top-left corner `(e, f)`.
    pub fn top_left(&self) -> Point {
        Point::new(self.e, self.f)
    }

    /// Top-right corner `(e + a, f + c)`.
    pub fn top_right(&self) -> Point {
        Point::new(self.e + self.a, self.f + self.c)
    }

    /// Bottom-right corner `(e + a + b, f + c + d)`.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.e + self.a + self.b, self.f + self.c + self.d)
    }

    /// Bottom-left corner `(e + b, f + d)`.
    pub fn bottom_left(&self) -> Point {
        Point::new(self.e + self.b, self.f + self.d)
    }

    /// The requested corner position.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.top_left(),
            Corner::TopRight => self.top_right(),
            Corner::BottomRight => self.bottom_right(),
            Corner::BottomLeft => self.bottom_left(),
        }
    }

    /// Determinant of the linear part, `a*d - b*c`.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The frame as a [`kurbo::Affine`] mapping unit-square space to surface
    /// space: `(x, y) -> (a*x + b*y + e, c*x + d*y + f)`.
    pub fn to_affine(&self) -> Affine {
        // kurbo coefficient order is [xx, yx, xy, yy, tx, ty].
        Affine::new([self.a, self.c, self.b, self.d, self.e, self.f])
    }

    /// The frame produced by applying `outer` after `self`
    /// (`outer ∘ self` as point maps).
    pub fn transformed_by(&self, outer: &Frame) -> Frame {
        Frame::new(
            outer.a * self.a + outer.b * self.c,
            outer.a * self.b + outer.b * self.d,
            outer.c * self.a + outer.d * self.c,
            outer.c * self.b + outer.d * self.d,
            outer.e + outer.a * self.e + outer.b * self.f,
            outer.f + outer.c * self.e + outer.d * self.f,
        )
    }

    /// The relative transform `self ∘ inverse(reference)`: the unique affine
    /// map sending the reference frame's parallelogram onto this frame's.
    ///
    /// A near-singular reference produces numerically extreme coefficients;
    /// the raster sampler treats non-finite coordinates as transparent.
    pub fn relative_to(&self, reference: &Frame) -> Frame {
        let t = reference;
        let inv_det = 1.0 / t.determinant();
        let a = (t.d * self.a - t.c * self.b) * inv_det;
        let b = (t.a * self.b - t.b * self.a) * inv_det;
        let c = (t.d * self.c - t.c * self.d) * inv_det;
        let d = (t.a * self.d - t.b * self.c) * inv_det;
        Frame::new(
            a,
            b,
            c,
            d,
            self.e - t.e * a - t.f * b,
            self.f - t.e * c - t.f * d,
        )
    }
}

/// Ordered list of frames; index 0 is the reference frame, indices >= 1 are
/// the fractal's generator frames. Never empty.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameList {
    frames: Vec<Frame>,
}

impl FrameList {
    /// A list containing only the reference frame.
    pub fn new(reference: Frame) -> Self {
        Self {
            frames: vec![reference],
        }
    }

    /// Build a list from explicit frames. Fails on an empty vector.
    pub fn from_frames(frames: Vec<Frame>) -> FractalineResult<Self> {
        if frames.is_empty() {
            return Err(FractalineError::validation(
                "FrameList requires at least a reference frame",
            ));
        }
        Ok(Self { frames })
    }

    /// Seed an initial scene for a surface: a centred reference square of
    /// side `min(w, h) / 3` plus three randomly placed generator frames.
    pub fn seeded(size: SurfaceSize, rng: &mut impl Rng) -> Self {
        let w = f64::from(size.width);
        let h = f64::from(size.height);
        let mut side = (w / 3.0).min(h / 3.0);

        let mut frames = vec![Frame::new(
            side,
            0.0,
            0.0,
            side,
            (w - side) / 2.0,
            (h - side) / 2.0,
        )];

        // Start the generators well below the reference size so the first
        // iterations do not explode.
        side *= 0.6;

        for _ in 0..3 {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let a = side * angle.cos();
            let b = -side * angle.sin();
            let x = if rng.gen_bool(0.5) {
                w * (1.0 + rng.r#gen::<f64>()) / 5.0
            } else {
                w * (4.0 - rng.r#gen::<f64>()) / 5.0
            };
            let y = if rng.gen_bool(0.5) {
                h * (1.0 + rng.r#gen::<f64>()) / 5.0
            } else {
                h * (4.0 - rng.r#gen::<f64>()) / 5.0
            };
            frames.push(Frame::new(a, b, -b, a, x - a - b, y + b - a));
            side *= 0.8 - rng.r#gen::<f64>() * 0.1;
        }

        Self { frames }
    }

    /// The reference frame (index 0).
    pub fn reference(&self) -> &Frame {
        &self.frames[0]
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The generator frames (indices >= 1).
    pub fn generators(&self) -> &[Frame] {
        &self.frames[1..]
    }

    /// Number of frames, reference included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for container-API symmetry.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Mutable frame at `index`, if present.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    /// Append a generator frame.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Remove the generator at `index`. The reference frame (index 0) is
    /// never removable; such calls return `None`.
    pub fn remove(&mut self, index: usize) -> Option<Frame> {
        if index == 0 || index >= self.frames.len() {
            return None;
        }
        Some(self.frames.remove(index))
    }

    /// Iterate over all frames.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Frame> + DoubleEndedIterator {
        self.frames.iter()
    }

    /// Iterate mutably over all frames.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.frames.iter_mut()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
