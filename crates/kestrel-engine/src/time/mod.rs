//! Time subsystem.
//!
//! Responsibilities:
//! - abstract the monotonic clock behind `TickSource` so pacing is testable
//! - decide, per poll, whether a logic update and/or a render is due
//!
//! Intended usage: one `FramePacer` per runtime loop, polled once per loop
//! iteration.

mod clock;
mod pacer;

pub use clock::{ClockError, MonotonicClock, TickSource};
pub use pacer::{FramePacer, PacerStep};
