//! Window + runtime loop.
//!
//! Owns the winit EventLoop and Window, and wires platform events and the
//! frame pacer to the app's lifecycle hooks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
