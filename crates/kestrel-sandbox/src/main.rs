//! Sandbox host: a three-generation orbit scene driving the paced runtime.
//!
//! Escape exits with status 0; closing the window does the same.

use anyhow::Result;
use glam::{Affine3A, Quat, Vec3};

use kestrel_engine::core::{App, AppControl};
use kestrel_engine::input::{KeyCode, MouseButton, WheelDelta};
use kestrel_engine::logging::{LoggingConfig, init_logging};
use kestrel_engine::scene::{NodeBehaviour, SceneGraph, SceneNode, UpdateCtx};
use kestrel_engine::window::{Runtime, RuntimeConfig};

/// Spins its node around the Y axis at a fixed angular rate.
struct Spinner {
    rate: f32,
}

impl NodeBehaviour for Spinner {
    fn initialise(&mut self) -> Result<()> {
        log::info!("spinner ready ({:.2} rad/s)", self.rate);
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        let step = Affine3A::from_quat(Quat::from_rotation_y(self.rate * ctx.dt as f32));
        *ctx.local = *ctx.local * step;
    }

    fn render(&self, world: &Affine3A) {
        log::trace!("draw at {:?}", world.translation);
    }

    fn shutdown(&mut self) {
        log::info!("spinner stopped");
    }
}

struct Sandbox {
    graph: SceneGraph,
    quit: bool,
}

impl Sandbox {
    fn new() -> Self {
        let mut graph = SceneGraph::new();

        let mut sun = SceneNode::with_behaviour("sun", Box::new(Spinner { rate: 0.4 }));
        let mut planet = SceneNode::with_behaviour("planet", Box::new(Spinner { rate: 1.3 }))
            .with_local(Affine3A::from_translation(Vec3::new(4.0, 0.0, 0.0)));
        let moon =
            SceneNode::new("moon").with_local(Affine3A::from_translation(Vec3::new(1.0, 0.0, 0.0)));

        planet.add(moon);
        sun.add(planet);
        graph.add(sun);

        Self { graph, quit: false }
    }
}

impl App for Sandbox {
    fn initialise(&mut self) -> Result<()> {
        self.graph.initialise()
    }

    fn update(&mut self, dt: f64) -> AppControl {
        if self.quit {
            return AppControl::Exit(0);
        }
        self.graph.update(dt);
        AppControl::Continue
    }

    fn render(&mut self) {
        self.graph.render();
    }

    fn shutdown(&mut self) {
        self.graph.shutdown();
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        log::info!("resized to {width}x{height}");
    }

    fn on_mouse_button(&mut self, button: MouseButton, x: f32, y: f32, pressed: bool) {
        if pressed {
            log::info!("{button:?} down at ({x:.0}, {y:.0})");
        }
    }

    fn on_mouse_wheel(&mut self, delta: WheelDelta) {
        let (_, lines) = delta.as_lines();
        log::info!("wheel: {lines:+.1} lines");
    }

    fn on_key(&mut self, code: KeyCode, pressed: bool) {
        if code == KeyCode::Escape && pressed {
            self.quit = true;
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "kestrel sandbox".to_string(),
        ..RuntimeConfig::default()
    };

    let code = Runtime::run(config, Sandbox::new())?;
    std::process::exit(code);
}
