use std::fmt;
use std::time::Instant;

/// Monotonic tick source with a queryable resolution.
///
/// `now()` values must be non-decreasing and are expressed in ticks of
/// `1 / frequency()` seconds.
pub trait TickSource {
    /// Ticks per second of this clock.
    fn frequency(&self) -> u64;

    /// Current tick count.
    fn now(&self) -> u64;
}

/// Unrecoverable pacing configuration error.
///
/// All variants are startup failures: without a usable clock resolution no
/// delta time can ever be computed, so nothing here is retried.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ClockError {
    /// The clock reported a frequency of zero.
    ZeroFrequency,

    /// A target rate of zero frames per second was requested.
    ZeroTargetRate,

    /// The target rate is finer than the clock can resolve (the render
    /// budget rounds to zero ticks).
    TargetExceedsResolution { frequency: u64, target_hz: u32 },
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::ZeroFrequency => {
                write!(f, "monotonic clock reported a frequency of zero")
            }
            ClockError::ZeroTargetRate => {
                write!(f, "target rate of zero frames per second")
            }
            ClockError::TargetExceedsResolution { frequency, target_hz } => {
                write!(
                    f,
                    "target rate of {target_hz} Hz exceeds clock resolution ({frequency} ticks/s)"
                )
            }
        }
    }
}

impl std::error::Error for ClockError {}

/// Production clock backed by `std::time::Instant`, counting nanoseconds
/// since construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for MonotonicClock {
    fn frequency(&self) -> u64 {
        1_000_000_000
    }

    fn now(&self) -> u64 {
        // Saturates after ~584 years of process uptime.
        self.epoch.elapsed().as_nanos() as u64
    }
}
