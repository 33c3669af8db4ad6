use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{
    DeviceEvent, DeviceId, ElementState, MouseButton as WinitMouseButton, MouseScrollDelta,
    WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::input::{InputEvent, MouseButton, WheelDelta};
use crate::time::{FramePacer, MonotonicClock};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Target render rate in frames per second.
    pub target_hz: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "kestrel".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            target_hz: 60,
        }
    }
}

/// Entry point for the runtime.
///
/// Owns the winit event loop, a single window and the frame pacer, and
/// drives the app's lifecycle hooks. The loop runs `ControlFlow::Poll` — a
/// deliberate busy-poll that keeps input-to-render latency bounded at the
/// cost of a hot render thread.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until it requests an exit or the window is closed.
    ///
    /// Returns the exit status: 0 for a window close, otherwise the code
    /// carried by the app's `AppControl::Exit`. Clock, window and app
    /// initialisation failures surface as errors before the loop starts
    /// ticking; they are never retried.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<i32>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let clock = MonotonicClock::new();
        let pacer =
            FramePacer::new(&clock, config.target_hz).context("failed to initialise frame pacer")?;

        let mut state = RuntimeState {
            config,
            app,
            clock,
            pacer,
            window: None,
            pointer_pos: (0.0, 0.0),
            initialised: false,
            exit_code: None,
            startup_error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.startup_error.take() {
            return Err(err);
        }
        Ok(state.exit_code.unwrap_or(0))
    }
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,
    clock: MonotonicClock,
    pacer: FramePacer,

    window: Option<Window>,

    /// Last cursor position in logical pixels, attached to button events.
    pointer_pos: (f32, f32),

    initialised: bool,
    exit_code: Option<i32>,
    startup_error: Option<anyhow::Error>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn request_exit(&mut self, event_loop: &ActiveEventLoop, code: i32) {
        if self.exit_code.is_none() {
            self.exit_code = Some(code);
        }
        event_loop.exit();
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, control: AppControl) {
        if let AppControl::Exit(code) = control {
            log::debug!("app requested exit with code {code}");
            self.request_exit(event_loop, code);
        }
    }

    /// Forwards one decoded event to the app's notification hooks.
    fn dispatch(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Resized { width, height } => self.app.on_resize(width, height),
            InputEvent::MouseButton { button, x, y, pressed } => {
                self.app.on_mouse_button(button, x, y, pressed)
            }
            InputEvent::MouseMotion { dx, dy } => self.app.on_mouse_motion(dx, dy),
            InputEvent::Wheel(delta) => self.app.on_mouse_wheel(delta),
            InputEvent::Key { code, pressed } => self.app.on_key(code, pressed),
        }
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(err) => {
                self.startup_error =
                    Some(anyhow::Error::new(err).context("failed to create window"));
                self.request_exit(event_loop, 1);
                return;
            }
        };
        self.window = Some(window);

        if let Err(err) = self.app.initialise() {
            self.startup_error = Some(err.context("app initialisation failed"));
            self.request_exit(event_loop, 1);
            return;
        }
        self.initialised = true;
        log::debug!("app initialised; entering paced loop");

        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_code.is_some() || !self.initialised {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        // One pacer poll per loop iteration. winit delivers pending events
        // between iterations, which keeps the source loop's shape: at most
        // one batch of messages between consecutive polls.
        let step = self.pacer.poll(&self.clock);
        if let Some(dt) = step.update {
            let control = self.app.update(dt);
            self.apply(event_loop, control);
            if self.exit_code.is_some() {
                return;
            }
        }
        if step.render {
            self.app.render();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested | WindowEvent::Destroyed) {
            self.request_exit(event_loop, 0);
            return;
        }

        let Some(window) = self.window.as_ref() else {
            return;
        };
        let decoded = translate_window_event(window, &mut self.pointer_pos, &event);

        let Some(ev) = decoded else {
            return;
        };
        self.dispatch(ev);

        // Repaint during live resizes so the window never shows stale
        // content while the paced loop is starved of iterations.
        if self.initialised && matches!(ev, InputEvent::Resized { .. }) {
            self.app.render();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.dispatch(InputEvent::MouseMotion { dx, dy });
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.initialised {
            self.app.shutdown();
            self.initialised = false;
        }
    }
}

/// Translates a winit window event into a decoded [`InputEvent`].
///
/// Returns `None` for events the app does not consume; undecodable input
/// (e.g. unidentified platform keys) is dropped here, never an error.
fn translate_window_event(
    window: &Window,
    pointer_pos: &mut (f32, f32),
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::CursorMoved { position, .. } => {
            // Tracked only so button events can carry a position; absolute
            // pointer motion is not part of the app contract.
            *pointer_pos = to_logical_f32(window, *position);
            None
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let (x, y) = *pointer_pos;
            Some(InputEvent::MouseButton {
                button: map_mouse_button(*button),
                x,
                y,
                pressed: *state == ElementState::Pressed,
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => WheelDelta::Line { x: *x, y: *y },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = to_logical_f32(window, *p);
                    WheelDelta::Pixel { x, y }
                }
            };
            Some(InputEvent::Wheel(delta))
        }

        WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
            PhysicalKey::Code(code) => Some(InputEvent::Key {
                code,
                pressed: event.state == ElementState::Pressed,
            }),
            // No stable code to forward; discard silently.
            PhysicalKey::Unidentified(_) => None,
        },

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let scale = window.scale_factor();
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_buttons_map_one_to_one() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(7)), MouseButton::Other(7));
    }
}
