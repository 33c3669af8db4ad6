use anyhow::Result;

use crate::input::{KeyCode, MouseButton, WheelDelta};

/// Control directive returned by app callbacks.
///
/// `Exit` carries the process exit status that `Runtime::run` propagates
/// to the caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit(i32),
}

/// Application contract implemented by the host layer.
///
/// The runtime owns the window and the frame pacer; the app owns
/// everything else — typically a `SceneGraph` it updates and renders from
/// these hooks. Decoded window/device events are forwarded straight to
/// the notification hooks and never routed through the scene graph.
pub trait App {
    /// One-time setup, called once the window exists but before the loop
    /// starts. An error is a fatal startup failure and aborts the run.
    fn initialise(&mut self) -> Result<()> {
        Ok(())
    }

    /// Logic update. `dt` is the wall-clock seconds elapsed since the
    /// previous update.
    fn update(&mut self, dt: f64) -> AppControl;

    /// Renders the current frame.
    fn render(&mut self);

    /// Final teardown, called exactly once after the loop has exited.
    fn shutdown(&mut self) {}

    /// Window resized to `width` x `height` physical pixels.
    fn on_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Mouse button pressed or released at logical position `(x, y)`.
    fn on_mouse_button(&mut self, button: MouseButton, x: f32, y: f32, pressed: bool) {
        let _ = (button, x, y, pressed);
    }

    /// Raw pointing-device motion delta, unaccelerated where the platform
    /// provides it.
    fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        let _ = (dx, dy);
    }

    /// Mouse wheel input.
    fn on_mouse_wheel(&mut self, delta: WheelDelta) {
        let _ = delta;
    }

    /// Key pressed or released.
    fn on_key(&mut self, code: KeyCode, pressed: bool) {
        let _ = (code, pressed);
    }
}
