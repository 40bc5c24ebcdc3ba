use kurbo::Point;

/// Which pointer button went down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PointerButton {
    /// Primary button: paints.
    Primary,
    /// Secondary button: erases.
    Secondary,
}

/// Pointer and wheel events delivered by the host surface.
///
/// Positions are surface-local pixels. `frame_edit` reflects whether the
/// precision-edit modifier key is held: without it, events fall through to
/// freehand painting; with it, they drive the frame editor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PointerEvent {
    /// A button was pressed.
    Down {
        /// Surface-local position.
        pos: Point,
        /// Button that went down.
        button: PointerButton,
        /// Precision-edit modifier state.
        frame_edit: bool,
    },
    /// The pointer moved.
    Move {
        /// Surface-local position.
        pos: Point,
        /// Precision-edit modifier state.
        frame_edit: bool,
    },
    /// All buttons released.
    Up,
    /// The pointer entered the editing surface.
    Enter,
    /// The pointer left the editing surface.
    Leave,
    /// Scroll step. The host must normalize the delta across input sources
    /// so that zoom follows the smooth exponential `0.996^delta` curve.
    Wheel {
        /// Normalized scroll delta.
        delta: f64,
    },
    /// Double click at a surface-local position.
    DoubleClick {
        /// Surface-local position.
        pos: Point,
    },
}

/// Input capabilities the host surface reports at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HostCapabilities {
    /// Whether a wheel/scroll-equivalent signal exists. The frame editor is
    /// unusable without zoom, so setup fails when this is false.
    pub wheel_input: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self { wheel_input: true }
    }
}
