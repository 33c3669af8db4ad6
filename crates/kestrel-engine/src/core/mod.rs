//! Core engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and
//! the host application. User code implements [`App`] and never touches
//! runtime internals.

mod app;

pub use app::{App, AppControl};
