//! Input subsystem.
//!
//! Decoded, platform-agnostic event types delivered to the `App`
//! notification hooks. The runtime translates winit events into these;
//! events it cannot decode are discarded silently, never fatally.
//!
//! Key identity is winit's `KeyCode`, re-exported rather than re-mapped —
//! a 1:1 wrapper enum would add nothing.

mod types;

pub use types::{InputEvent, MouseButton, WheelDelta};
pub use winit::keyboard::KeyCode;
