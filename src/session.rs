use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::{
    editor::controls::FrameControls,
    editor::input::{HostCapabilities, PointerEvent},
    editor::painter::SourcePainter,
    foundation::core::{FrameList, SurfaceSize},
    foundation::error::{FractalineError, FractalineResult},
    raster::pixmap::Pixmap,
    render::fractal::FractalRenderer,
};

/// One editing session: the frame list, the source drawing, the fractal
/// iteration buffers and the frame-edit controller, advanced in lockstep.
///
/// The host owns a `Session`, feeds it pointer events as they arrive and
/// calls [`tick`](Session::tick) once per animation frame, then presents the
/// three rasters ([`fractal`](Session::fractal), [`source`](Session::source),
/// [`overlay`](Session::overlay)) stacked in that order.
#[derive(Clone, Debug)]
pub struct Session {
    size: SurfaceSize,
    frames: FrameList,
    painter: SourcePainter,
    renderer: FractalRenderer,
    controls: FrameControls,
    rng: Pcg32,
}

impl Session {
    /// Start a session on a surface of the given size with a randomly seeded
    /// scene.
    ///
    /// Fails with [`FractalineError::Unsupported`] when the host reports no
    /// wheel-equivalent input, since the editor has no other zoom control.
    pub fn new(
        size: SurfaceSize,
        capabilities: HostCapabilities,
        seed: u64,
    ) -> FractalineResult<Self> {
        if !capabilities.wheel_input {
            return Err(FractalineError::unsupported(
                "host surface provides no wheel input; zoom is required",
            ));
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let frames = FrameList::seeded(size, &mut rng);
        let painter = SourcePainter::new(size);
        let mut renderer = FractalRenderer::new(size);
        renderer.reset(painter.raster());

        Ok(Self {
            size,
            frames,
            painter,
            renderer,
            controls: FrameControls::new(size),
            rng,
        })
    }

    /// Surface dimensions.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// The current frame list.
    pub fn frames(&self) -> &FrameList {
        &self.frames
    }

    /// The accumulated fractal raster (bottom presentation layer).
    pub fn fractal(&self) -> &Pixmap {
        self.renderer.current()
    }

    /// The source drawing raster (middle presentation layer).
    pub fn source(&self) -> &Pixmap {
        self.painter.raster()
    }

    /// The frame-editing overlay raster (top presentation layer).
    pub fn overlay(&self) -> &Pixmap {
        self.controls.overlay()
    }

    /// Dispatch one pointer event.
    ///
    /// Events without the frame-edit modifier drive the painter; with it they
    /// drive the frame controller. A move that reshaped or translated a frame
    /// restarts the fractal from the source drawing, since the accumulated
    /// image no longer matches the frames.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                pos,
                button,
                frame_edit,
            } => {
                if frame_edit {
                    self.controls.pointer_down(pos, &self.frames);
                } else {
                    self.painter.begin_stroke(button, pos);
                }
            }
            PointerEvent::Move { pos, frame_edit } => {
                if frame_edit {
                    let invalidated =
                        self.controls
                            .pointer_move(pos, &mut self.frames, &mut self.painter);
                    if invalidated {
                        self.renderer.reset(self.painter.raster());
                    }
                } else {
                    self.painter.continue_stroke(pos);
                    self.controls.track_pointer(pos);
                }
            }
            PointerEvent::Up => {
                self.painter.end_stroke();
                self.controls.pointer_up();
            }
            PointerEvent::Enter => self.controls.pointer_entered(),
            PointerEvent::Leave => self.controls.pointer_left(),
            PointerEvent::Wheel { delta } => {
                self.controls
                    .wheel(delta, &mut self.frames, &mut self.painter);
            }
            PointerEvent::DoubleClick { pos } => {
                self.controls
                    .double_click(pos, &mut self.frames, &mut self.rng);
            }
        }
    }

    /// Advance one animation frame: iterate the fractal once and redraw the
    /// editing overlay.
    pub fn tick(&mut self) {
        self.renderer.step(&self.frames, self.painter.raster());
        self.controls.render_overlay(&self.frames);
    }

    /// Resize every raster to `new_size`, keeping the scene centred.
    pub fn resize(&mut self, new_size: SurfaceSize) {
        self.controls
            .resize(new_size, &mut self.frames, &mut self.painter);
        self.renderer.resize(new_size);
        self.size = new_size;
    }

    /// Replace the source drawing with a dropped image file.
    ///
    /// The bytes are decoded by format sniffing; anything undecodable is
    /// logged and ignored, leaving the session untouched.
    #[tracing::instrument(skip_all)]
    pub fn load_dropped_image(&mut self, bytes: &[u8]) {
        match image::load_from_memory(bytes) {
            Ok(decoded) => {
                self.painter.load_image(&decoded.to_rgba8());
                self.renderer.reset(self.painter.raster());
            }
            Err(err) => {
                tracing::debug!(error = %err, "ignoring undecodable dropped file");
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
