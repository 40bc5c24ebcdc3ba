use image::RgbaImage;
use kurbo::Point;

use crate::{
    editor::input::PointerButton,
    foundation::core::{Frame, Rgba8Premul, SurfaceSize},
    foundation::math::distance_squared,
    raster::composite::CompositeMode,
    raster::pixmap::Pixmap,
};

// Feel-tuned brush caps, kept literal.
const BRUSH_PAINT_MAX: f64 = 6.0;
const BRUSH_ERASE_MAX: f64 = 30.0;
const BRUSH_ERASE_BASE: f64 = 6.0;

/// Owner of the "clean" source raster the fractal iterates on.
///
/// Supports freehand paint/erase strokes, whole-image affine re-mapping for
/// global pan/zoom, and ingestion of an external image as a transparent-white
/// matte.
#[derive(Clone, Debug)]
pub struct SourcePainter {
    raster: Pixmap,
    drawing: bool,
    erasing: bool,
    prev: Point,
}

impl SourcePainter {
    /// Painter with a transparent source raster of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            raster: Pixmap::new(size),
            drawing: false,
            erasing: false,
            prev: Point::ZERO,
        }
    }

    /// The source raster.
    pub fn raster(&self) -> &Pixmap {
        &self.raster
    }

    /// Whether a stroke is currently active.
    pub fn is_stroking(&self) -> bool {
        self.drawing || self.erasing
    }

    /// Begin a stroke: primary button paints, secondary erases.
    pub fn begin_stroke(&mut self, button: PointerButton, pos: Point) {
        match button {
            PointerButton::Primary => {
                self.drawing = true;
                self.erasing = false;
            }
            PointerButton::Secondary => {
                self.drawing = false;
                self.erasing = true;
            }
        }
        self.prev = pos;
    }

    /// Extend the active stroke to `pos` with a round-capped segment.
    ///
    /// Brush width follows pointer speed (squared distance since the last
    /// sample): `min(6, speed^0.25)` when painting, `min(30, 6 + speed^0.25)`
    /// when erasing. Does nothing when no stroke is active.
    pub fn continue_stroke(&mut self, pos: Point) {
        if !self.is_stroking() {
            return;
        }

        let speed = distance_squared(self.prev.x, self.prev.y, pos.x, pos.y);
        let (width, mode) = if self.drawing {
            (
                BRUSH_PAINT_MAX.min(speed.powf(0.25)),
                CompositeMode::SourceOver,
            )
        } else {
            (
                BRUSH_ERASE_MAX.min(BRUSH_ERASE_BASE + speed.powf(0.25)),
                CompositeMode::DestinationOut,
            )
        };

        let white = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
        self.raster.stroke_line(self.prev, pos, width, white, mode);
        self.prev = pos;
    }

    /// End the active stroke.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
        self.erasing = false;
    }

    /// Re-project the whole source raster through `transform`.
    ///
    /// Composited destination-atop, so content only survives where the
    /// re-projected image has alpha; painted pixels move, nothing new
    /// appears. Used to keep the drawing in lockstep with global pan/zoom.
    pub fn apply_transform(&mut self, transform: &Frame) {
        let snapshot = self.raster.clone();
        self.raster.draw_pixmap(
            &snapshot,
            transform.to_affine(),
            CompositeMode::DestinationAtop,
        );
    }

    /// Replace the source raster with `image`, centred, scaled down to fit
    /// if necessary, and converted to a transparent-white matte: output
    /// alpha is `max(R, G, B) * A / 255`, output colour is white. Brightness
    /// becomes opacity; colour information is discarded.
    pub fn load_image(&mut self, image: &RgbaImage) {
        self.raster.clear();

        let surf_w = self.raster.width();
        let surf_h = self.raster.height();
        let (img_w, img_h) = image.dimensions();
        if surf_w == 0 || surf_h == 0 || img_w == 0 || img_h == 0 {
            return;
        }

        let (new_w, new_h) = if img_w > surf_w || img_h > surf_h {
            if u64::from(surf_h) * u64::from(img_w) > u64::from(img_h) * u64::from(surf_w) {
                // Wider than the surface's aspect: fit width.
                let h = u64::from(img_h) * u64::from(surf_w) / u64::from(img_w);
                (surf_w, (h as u32).max(1))
            } else {
                let w = u64::from(img_w) * u64::from(surf_h) / u64::from(img_h);
                ((w as u32).max(1), surf_h)
            }
        } else {
            (img_w, img_h)
        };
        let x_off = (surf_w - new_w) / 2;
        let y_off = (surf_h - new_h) / 2;

        let scaled;
        let source: &RgbaImage = if (new_w, new_h) == (img_w, img_h) {
            image
        } else {
            scaled = image::imageops::resize(
                image,
                new_w,
                new_h,
                image::imageops::FilterType::Triangle,
            );
            &scaled
        };

        for (x, y, px) in source.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            let alpha = (u16::from(r.max(g).max(b)) * u16::from(a) / 255) as u8;
            self.raster.set_pixel(
                x_off + x,
                y_off + y,
                Rgba8Premul {
                    r: alpha,
                    g: alpha,
                    b: alpha,
                    a: alpha,
                },
            );
        }
    }

    /// Resize the source raster, recentring its content.
    pub fn resize(&mut self, new_size: SurfaceSize) {
        self.raster.resize_recenter(new_size);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/painter.rs"]
mod tests;
