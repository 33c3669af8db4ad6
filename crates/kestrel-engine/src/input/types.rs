use winit::keyboard::KeyCode;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Mouse wheel delta.
///
/// `Line` is "scroll lines" style input; `Pixel` is high precision
/// (touchpads, precision wheels).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl WheelDelta {
    /// Collapses the delta to line units for hosts that only care about
    /// direction and rough magnitude.
    pub fn as_lines(self) -> (f32, f32) {
        match self {
            WheelDelta::Line { x, y } => (x, y),
            // Rough conversion: one line per 16 logical pixels.
            WheelDelta::Pixel { x, y } => (x / 16.0, y / 16.0),
        }
    }
}

/// Decoded events the runtime forwards to the app, at most one per
/// platform callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Resized { width: u32, height: u32 },
    MouseButton { button: MouseButton, x: f32, y: f32, pressed: bool },
    MouseMotion { dx: f64, dy: f64 },
    Wheel(WheelDelta),
    Key { code: KeyCode, pressed: bool },
}
