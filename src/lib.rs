//! Fractaline is an interactive iterated-function-system (IFS) fractal
//! editor core.
//!
//! A scene is a list of affine [`Frame`]s: index 0 is the reference frame,
//! the rest are generators. Every animation tick the engine re-seeds a
//! working raster with the user's source drawing and paints the previous
//! tick's fractal through each generator's transform relative to the
//! reference, converging toward the IFS attractor while the user edits.
//!
//! # Pipeline overview
//!
//! 1. **Paint**: pointer strokes build the source drawing ([`SourcePainter`])
//! 2. **Edit**: modifier-key gestures drag, reshape, pan and zoom the frames
//!    ([`FrameControls`])
//! 3. **Iterate**: `fractal[t+1] = source + Σ relative(frame) · fractal[t]`
//!    ([`FractalRenderer`])
//! 4. **Present**: the host stacks the fractal, source and overlay rasters
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-agnostic**: no windowing, no event loop; the host feeds
//!   [`PointerEvent`]s into a [`Session`] and presents its rasters.
//! - **Premultiplied RGBA8** end-to-end: every raster holds premultiplied
//!   pixels and all compositing assumes them.
//! - **Deterministic given a seed**: scene seeding and frame creation draw
//!   from one seeded generator owned by the session.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod editor;
mod foundation;
mod raster;
mod render;
mod session;

pub use editor::controls::FrameControls;
pub use editor::input::{HostCapabilities, PointerButton, PointerEvent};
pub use editor::painter::SourcePainter;
pub use foundation::core::{Corner, Frame, FrameList, Rgba8Premul, Selection, SurfaceSize};
pub use foundation::error::{FractalineError, FractalineResult};
pub use raster::composite::CompositeMode;
pub use raster::pixmap::Pixmap;
pub use render::fractal::FractalRenderer;
pub use session::Session;
