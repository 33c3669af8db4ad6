//! Kestrel engine crate.
//!
//! Runtime core of a small interactive application framework: a
//! fixed-update/variable-render frame pacer and a hierarchical scene
//! graph, wired to the platform through a winit event loop.

pub mod core;
pub mod input;
pub mod logging;
pub mod scene;
pub mod time;
pub mod window;
