use kurbo::Affine;

use crate::{
    foundation::core::{FrameList, SurfaceSize},
    raster::composite::CompositeMode,
    raster::pixmap::Pixmap,
};

/// The fractal iteration engine.
///
/// Keeps two rasters: the visible fractal and a working buffer. Every
/// [`step`](FractalRenderer::step) seeds the working buffer with the source
/// drawing, paints the previous tick's whole fractal through each generator
/// frame's relative transform (painter's order, later frames on top), then
/// swaps the buffers. Iterating this converges toward the fixed-point
/// fractal; there is no termination, the host loop calls it forever.
#[derive(Clone, Debug)]
pub struct FractalRenderer {
    front: Pixmap,
    back: Pixmap,
}

impl FractalRenderer {
    /// Renderer with transparent buffers of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            front: Pixmap::new(size),
            back: Pixmap::new(size),
        }
    }

    /// The visible fractal raster for this tick.
    pub fn current(&self) -> &Pixmap {
        &self.front
    }

    /// Buffer dimensions.
    pub fn size(&self) -> SurfaceSize {
        self.front.size()
    }

    /// Discard the accumulated fractal and restart from the source drawing.
    ///
    /// Called when a frame was reshaped and the accumulated image no longer
    /// matches the frame list.
    pub fn reset(&mut self, source: &Pixmap) {
        seed_from_source(&mut self.front, source);
    }

    /// Advance the fractal by one compositing pass.
    ///
    /// With no generator frames this degenerates to copying the source
    /// drawing, so the fractal equals the source every tick.
    #[tracing::instrument(skip_all)]
    pub fn step(&mut self, frames: &FrameList, source: &Pixmap) {
        seed_from_source(&mut self.back, source);

        let reference = frames.reference();
        for frame in frames.generators() {
            let relative = frame.relative_to(reference);
            self.back
                .draw_pixmap(&self.front, relative.to_affine(), CompositeMode::SourceOver);
        }

        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Resize both buffers, recentring their content.
    pub fn resize(&mut self, new_size: SurfaceSize) {
        self.front.resize_recenter(new_size);
        self.back.resize_recenter(new_size);
    }
}

fn seed_from_source(dst: &mut Pixmap, source: &Pixmap) {
    if dst.size() == source.size() {
        dst.data_mut().copy_from_slice(source.data());
    } else {
        dst.clear();
        dst.draw_pixmap(source, Affine::IDENTITY, CompositeMode::SourceOver);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fractal.rs"]
mod tests;
