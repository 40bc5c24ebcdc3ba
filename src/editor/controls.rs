use kurbo::Point;
use rand::Rng;

use crate::{
    editor::painter::SourcePainter,
    foundation::core::{Corner, Frame, FrameList, Rgba8Premul, Selection, SurfaceSize},
    foundation::math::{distance_squared, point_in_triangle},
    raster::composite::CompositeMode,
    raster::pixmap::Pixmap,
};

/// Squared pixel radius inside which a corner handle is grabbed.
const CORNER_GRAB_DIST_SQ: f64 = 64.0;
/// Base of the exponential wheel-zoom curve, `scale = 0.996^delta`.
const ZOOM_BASE: f64 = 0.996;
/// Outline widths for the two overlay passes (backing stroke, colour stroke).
const OUTLINE_WIDTH_BACKING: f64 = 4.0;
const OUTLINE_WIDTH_COLOUR: f64 = 2.0;
/// Fraction range of the reference frame's size used for new frames.
const NEW_FRAME_SCALE_MIN: f64 = 0.45;
const NEW_FRAME_SCALE_RANGE: f64 = 0.2;

/// Hit-tests and manipulates the frame list, and renders the editing overlay.
///
/// Gesture state machine driven by the host's pointer events (see
/// [`crate::Session`] for the dispatch): pan everything, translate one frame,
/// reshape a corner, zoom about the pointer, and add/remove generator frames
/// on double-click.
#[derive(Clone, Debug)]
pub struct FrameControls {
    size: SurfaceSize,
    overlay: Pixmap,
    selection: Selection,
    dragging: bool,
    pointer_over: bool,
    prev: Point,
}

impl FrameControls {
    /// Controls with a transparent overlay of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            overlay: Pixmap::new(size),
            selection: Selection::none(),
            dragging: false,
            pointer_over: false,
            prev: Point::ZERO,
        }
    }

    /// The overlay raster showing frame outlines and handles.
    pub fn overlay(&self) -> &Pixmap {
        &self.overlay
    }

    /// The current transient selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Record that the pointer entered the editing surface.
    pub fn pointer_entered(&mut self) {
        self.pointer_over = true;
    }

    /// Record that the pointer left the editing surface.
    pub fn pointer_left(&mut self) {
        self.pointer_over = false;
    }

    /// Track the pointer position without any gesture effect. Keeps the
    /// zoom centre current while the user paints or hovers.
    pub fn track_pointer(&mut self, pos: Point) {
        self.prev = pos;
    }

    /// Hit-test `pos` against the frame list and set the selection.
    ///
    /// Corner handles are tested first across all frames: the nearest corner
    /// within the grab radius wins, later-indexed frames winning exact ties.
    /// Failing that, frame interiors are tested topmost (highest index)
    /// first.
    pub fn select(&mut self, pos: Point, frames: &FrameList) {
        self.selection = Selection::none();

        let mut best = CORNER_GRAB_DIST_SQ;
        for (index, frame) in frames.iter().enumerate().rev() {
            for corner in Corner::ALL {
                let at = frame.corner(corner);
                let d = distance_squared(pos.x, pos.y, at.x, at.y);
                if d < best {
                    best = d;
                    self.selection = Selection {
                        index: Some(index),
                        corner: Some(corner),
                    };
                }
            }
        }

        if self.selection.index.is_none() {
            for (index, frame) in frames.iter().enumerate().rev() {
                if frame_contains(frame, pos) {
                    self.selection.index = Some(index);
                    break;
                }
            }
        }

        self.dragging = true;
    }

    /// Begin a frame-edit gesture at `pos`.
    pub fn pointer_down(&mut self, pos: Point, frames: &FrameList) {
        self.select(pos, frames);
        self.prev = pos;
    }

    /// End any gesture and clear the selection.
    pub fn pointer_up(&mut self) {
        self.selection = Selection::none();
        self.dragging = false;
    }

    /// Advance the active gesture to `pos`.
    ///
    /// No selection: pan everything. Frame selected: translate it. Corner
    /// selected: reshape the parallelogram so the dragged corner follows the
    /// pointer exactly. Returns true when the accumulated fractal raster was
    /// invalidated and must be re-seeded from the source.
    pub fn pointer_move(
        &mut self,
        pos: Point,
        frames: &mut FrameList,
        painter: &mut SourcePainter,
    ) -> bool {
        let invalidated = match (self.selection.index, self.selection.corner) {
            (None, _) => {
                if self.dragging {
                    let pan = Frame::translation(pos.x - self.prev.x, pos.y - self.prev.y);
                    Self::transform_everything(&pan, frames, painter);
                }
                false
            }
            (Some(index), None) => {
                if let Some(frame) = frames.get_mut(index) {
                    frame.e += pos.x - self.prev.x;
                    frame.f += pos.y - self.prev.y;
                }
                true
            }
            (Some(index), Some(corner)) => {
                if let Some(frame) = frames.get_mut(index) {
                    reshape_corner(frame, corner, pos);
                }
                true
            }
        };
        self.prev = pos;
        invalidated
    }

    /// Zoom about the last tracked pointer position by `0.996^delta`.
    pub fn wheel(&self, delta: f64, frames: &mut FrameList, painter: &mut SourcePainter) {
        let scale = ZOOM_BASE.powf(delta);
        let zoom = Frame::scale_about(scale, self.prev.x, self.prev.y);
        Self::transform_everything(&zoom, frames, painter);
    }

    /// Delete the topmost generator frame under `pos`, or create a new one
    /// centred there when the click lands outside every generator.
    ///
    /// New frames take a random fraction in `[0.45, 0.65]` of the reference
    /// frame's size and a uniformly random rotation in `[0, π)`. The
    /// reference frame itself is never deletable.
    pub fn double_click(&mut self, pos: Point, frames: &mut FrameList, rng: &mut impl Rng) {
        for index in (1..frames.len()).rev() {
            if frame_contains(&frames.frames()[index], pos) {
                frames.remove(index);
                tracing::debug!(index, "removed generator frame");
                return;
            }
        }

        let reference = frames.reference();
        let ref_size = (reference.a * reference.a + reference.b * reference.b).sqrt();
        let scale = (NEW_FRAME_SCALE_MIN + rng.r#gen::<f64>() * NEW_FRAME_SCALE_RANGE) * ref_size;
        let theta = rng.r#gen::<f64>() * std::f64::consts::PI;
        frames.push(Frame::similarity_centred(scale, theta, pos.x, pos.y));
        tracing::debug!(count = frames.len(), "added generator frame");
    }

    /// Left-multiply every frame by `transform` and re-project the source
    /// raster through it, keeping scene and drawing in lockstep. Shared by
    /// pan and zoom.
    pub fn transform_everything(
        transform: &Frame,
        frames: &mut FrameList,
        painter: &mut SourcePainter,
    ) {
        painter.apply_transform(transform);
        for frame in frames.iter_mut() {
            *frame = frame.transformed_by(transform);
        }
    }

    /// Redraw the editing overlay for this tick.
    ///
    /// Draws nothing while the pointer is off the surface. Otherwise each
    /// frame gets a two-pass outline (thick black backing, thinner coloured
    /// stroke: yellow for the reference frame, white for generators) plus
    /// small arrows at the midpoints of its two leading edges showing
    /// orientation.
    pub fn render_overlay(&mut self, frames: &FrameList) {
        self.overlay.clear();
        if !self.pointer_over {
            return;
        }

        let black = Rgba8Premul::from_straight_rgba(0, 0, 0, 255);
        let yellow = Rgba8Premul::from_straight_rgba(255, 255, 0, 255);
        let white = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);

        for pass in 0..2 {
            for (index, frame) in frames.iter().enumerate() {
                let (width, colour) = if pass == 0 {
                    (OUTLINE_WIDTH_BACKING, black)
                } else if index == 0 {
                    (OUTLINE_WIDTH_COLOUR, yellow)
                } else {
                    (OUTLINE_WIDTH_COLOUR, white)
                };

                let corners = [
                    frame.top_left(),
                    frame.top_right(),
                    frame.bottom_right(),
                    frame.bottom_left(),
                ];
                for i in 0..4 {
                    self.overlay.stroke_line(
                        corners[i],
                        corners[(i + 1) % 4],
                        width,
                        colour,
                        CompositeMode::SourceOver,
                    );
                }

                for (vx, vy) in [(frame.a, frame.c), (frame.b, frame.d)] {
                    let mid = Point::new(frame.e + vx / 2.0, frame.f + vy / 2.0);
                    let len = (vx * vx + vy * vy).sqrt();
                    let dd = if len > 10.0 { 5.0 / len } else { 0.5 };
                    self.overlay.stroke_line(
                        Point::new(mid.x - (vx - vy) * dd, mid.y - (vy + vx) * dd),
                        mid,
                        width,
                        colour,
                        CompositeMode::SourceOver,
                    );
                    self.overlay.stroke_line(
                        Point::new(mid.x - (vx + vy) * dd, mid.y - (vy - vx) * dd),
                        mid,
                        width,
                        colour,
                        CompositeMode::SourceOver,
                    );
                }
            }
        }
    }

    /// Resize the overlay and shift every frame so content stays centred;
    /// delegates the source raster resize to the painter.
    pub fn resize(
        &mut self,
        new_size: SurfaceSize,
        frames: &mut FrameList,
        painter: &mut SourcePainter,
    ) {
        let dx = (f64::from(new_size.width) - f64::from(self.size.width)) / 2.0;
        let dy = (f64::from(new_size.height) - f64::from(self.size.height)) / 2.0;
        for frame in frames.iter_mut() {
            frame.e += dx;
            frame.f += dy;
        }
        painter.resize(new_size);
        self.overlay = Pixmap::new(new_size);
        self.size = new_size;
    }
}

/// Whether `pos` lies inside a frame's parallelogram (two-triangle test).
fn frame_contains(frame: &Frame, pos: Point) -> bool {
    let tl = frame.top_left();
    let tr = frame.top_right();
    let br = frame.bottom_right();
    let bl = frame.bottom_left();
    point_in_triangle(pos.x, pos.y, tl.x, tl.y, tr.x, tr.y, bl.x, bl.y)
        || point_in_triangle(pos.x, pos.y, br.x, br.y, tr.x, tr.y, bl.x, bl.y)
}

/// Move `corner` of `frame` to `target`, solving for the other corners so the
/// shape stays a parallelogram: the opposite corner is fixed and the two
/// remaining corners keep the diagonals' midpoints coincident.
fn reshape_corner(frame: &mut Frame, corner: Corner, target: Point) {
    let (x1, y1, x2, y2, x3, y3) = match corner {
        Corner::TopLeft => {
            let (x1, y1) = (target.x, target.y);
            let fixed = frame.bottom_right();
            let (x3, y3) = (fixed.x, fixed.y);
            let x2 = (x1 + x3 + y3 - y1) / 2.0;
            let y2 = (y1 + y3 + x1 - x3) / 2.0;
            (x1, y1, x2, y2, x3, y3)
        }
        Corner::BottomRight => {
            let (x3, y3) = (target.x, target.y);
            let fixed = frame.top_left();
            let (x1, y1) = (fixed.x, fixed.y);
            let x2 = (x1 + x3 + y3 - y1) / 2.0;
            let y2 = (y1 + y3 + x1 - x3) / 2.0;
            (x1, y1, x2, y2, x3, y3)
        }
        Corner::TopRight => {
            let (x2, y2) = (target.x, target.y);
            let fixed = frame.bottom_left();
            let (x4, y4) = (fixed.x, fixed.y);
            let x1 = (x2 + x4 - y4 + y2) / 2.0;
            let y1 = (y2 + y4 - x2 + x4) / 2.0;
            let x3 = (x2 + x4 + y4 - y2) / 2.0;
            let y3 = (y2 + y4 + x2 - x4) / 2.0;
            (x1, y1, x2, y2, x3, y3)
        }
        Corner::BottomLeft => {
            let (x4, y4) = (target.x, target.y);
            let fixed = frame.top_right();
            let (x2, y2) = (fixed.x, fixed.y);
            let x1 = (x2 + x4 - y4 + y2) / 2.0;
            let y1 = (y2 + y4 - x2 + x4) / 2.0;
            let x3 = (x2 + x4 + y4 - y2) / 2.0;
            let y3 = (y2 + y4 + x2 - x4) / 2.0;
            (x1, y1, x2, y2, x3, y3)
        }
    };

    frame.a = x2 - x1;
    frame.c = y2 - y1;
    frame.b = x3 - x2;
    frame.d = y3 - y2;
    frame.e = x1;
    frame.f = y1;
}

#[cfg(test)]
#[path = "../../tests/unit/editor/controls.rs"]
mod tests;
