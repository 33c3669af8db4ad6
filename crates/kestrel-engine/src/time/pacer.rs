use super::clock::{ClockError, TickSource};

/// Outcome of a single pacer poll.
///
/// `update` carries the delta time in seconds when a logic update is due.
/// When both are set, the host must run the update before the render.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PacerStep {
    pub update: Option<f64>,
    pub render: bool,
}

/// Drift-correcting frame pacer.
///
/// Decides on every poll whether a logic update and/or a render should run.
/// Renders are capped at the target rate and never fired in bursts to catch
/// up: a deadline that has fallen more than one budget behind the clock is
/// snapped forward to `now + budget`, deliberately dropping the missed
/// frames. An update is scheduled once at startup and again immediately
/// after every render, with a delta measured from the wall clock so the
/// simulation tracks real elapsed time rather than a fixed step.
#[derive(Debug, Clone)]
pub struct FramePacer {
    /// Render budget in clock ticks (`frequency / target_hz`).
    budget: u64,

    /// Seconds per clock tick.
    seconds_per_tick: f64,

    /// Absolute tick at which the next render is due.
    next_render_deadline: u64,

    /// Absolute tick of the previous logic update.
    last_update_tick: u64,

    /// Set after a render (and at startup), cleared once an update runs.
    pending_update: bool,
}

impl FramePacer {
    /// Creates a pacer targeting `target_hz` renders per second.
    ///
    /// Fails when the clock frequency is zero or the target rate cannot be
    /// expressed in whole clock ticks.
    pub fn new<C: TickSource>(clock: &C, target_hz: u32) -> Result<Self, ClockError> {
        let frequency = clock.frequency();
        if frequency == 0 {
            return Err(ClockError::ZeroFrequency);
        }
        if target_hz == 0 {
            return Err(ClockError::ZeroTargetRate);
        }

        let budget = frequency / u64::from(target_hz);
        if budget == 0 {
            return Err(ClockError::TargetExceedsResolution { frequency, target_hz });
        }

        let now = clock.now();
        Ok(Self {
            budget,
            seconds_per_tick: 1.0 / frequency as f64,
            next_render_deadline: now,
            last_update_tick: now,
            pending_update: true,
        })
    }

    /// Render budget in clock ticks.
    pub fn budget(&self) -> u64 {
        self.budget
    }

    /// Runs one iteration of the pacing state machine.
    pub fn poll<C: TickSource>(&mut self, clock: &C) -> PacerStep {
        let mut step = PacerStep::default();

        if self.pending_update {
            let now = clock.now();
            let elapsed = now.saturating_sub(self.last_update_tick);
            step.update = Some(elapsed as f64 * self.seconds_per_tick);
            self.last_update_tick = now;
            self.pending_update = false;
        }

        // Re-read the clock: the update decided above consumes real time in
        // the host before the render check would otherwise apply.
        let now = clock.now();
        if now > self.next_render_deadline {
            step.render = true;
            self.next_render_deadline += self.budget;
            // More than one budget behind: drop the missed frames. Letting
            // the error accumulate would stall event handling while a burst
            // of catch-up renders ran.
            if self.next_render_deadline < now {
                self.next_render_deadline = now + self.budget;
            }
            self.pending_update = true;
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeClock {
        frequency: u64,
        now: Cell<u64>,
    }

    impl FakeClock {
        fn new(frequency: u64) -> Self {
            Self { frequency, now: Cell::new(0) }
        }

        fn advance(&self, ticks: u64) {
            self.now.set(self.now.get() + ticks);
        }
    }

    impl TickSource for FakeClock {
        fn frequency(&self) -> u64 {
            self.frequency
        }

        fn now(&self) -> u64 {
            self.now.get()
        }
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn zero_frequency_is_a_fatal_error() {
        let clock = FakeClock::new(0);
        assert_eq!(
            FramePacer::new(&clock, 60).unwrap_err(),
            ClockError::ZeroFrequency
        );
    }

    #[test]
    fn zero_target_rate_is_a_fatal_error() {
        let clock = FakeClock::new(1_000);
        assert_eq!(
            FramePacer::new(&clock, 0).unwrap_err(),
            ClockError::ZeroTargetRate
        );
    }

    #[test]
    fn sub_tick_budget_is_a_fatal_error() {
        let clock = FakeClock::new(30);
        assert_eq!(
            FramePacer::new(&clock, 60).unwrap_err(),
            ClockError::TargetExceedsResolution { frequency: 30, target_hz: 60 }
        );
    }

    // ── update scheduling ─────────────────────────────────────────────────

    #[test]
    fn first_poll_runs_an_update_but_no_render() {
        let clock = FakeClock::new(1_000);
        let mut pacer = FramePacer::new(&clock, 100).unwrap();

        let step = pacer.poll(&clock);
        assert_eq!(step.update, Some(0.0));
        assert!(!step.render);
    }

    #[test]
    fn update_runs_once_per_render() {
        let clock = FakeClock::new(1_000);
        let mut pacer = FramePacer::new(&clock, 100).unwrap();
        pacer.poll(&clock);

        // No render yet, so no further update either.
        assert_eq!(pacer.poll(&clock).update, None);

        clock.advance(pacer.budget() + 1);
        assert!(pacer.poll(&clock).render);

        // The render re-arms exactly one update.
        assert!(pacer.poll(&clock).update.is_some());
        assert_eq!(pacer.poll(&clock).update, None);
    }

    #[test]
    fn update_delta_matches_wall_clock_interval() {
        let clock = FakeClock::new(1_000);
        let mut pacer = FramePacer::new(&clock, 100).unwrap();
        pacer.poll(&clock);

        clock.advance(pacer.budget() + 3);
        pacer.poll(&clock); // render, re-arms the update
        clock.advance(2);

        let step = pacer.poll(&clock);
        // 13 + 2 ticks at 1000 ticks/s since the last update.
        let dt = step.update.expect("update due after render");
        assert!((dt - 0.015).abs() < 1e-12);
        assert!(dt >= 0.0);
    }

    // ── render pacing ─────────────────────────────────────────────────────

    #[test]
    fn render_waits_for_the_deadline_to_pass() {
        let clock = FakeClock::new(1_000);
        let mut pacer = FramePacer::new(&clock, 100).unwrap();
        pacer.poll(&clock); // startup update

        // The first render is due as soon as the clock moves at all.
        clock.advance(1);
        assert!(pacer.poll(&clock).render);
        pacer.poll(&clock); // consume the re-armed update

        // Deadline comparison is strict: exactly on the deadline is not due.
        clock.advance(pacer.budget() - 1);
        assert!(!pacer.poll(&clock).render);

        clock.advance(1);
        assert!(pacer.poll(&clock).render);
    }

    #[test]
    fn renders_never_exceed_the_target_rate() {
        let clock = FakeClock::new(1_000_000);
        let mut pacer = FramePacer::new(&clock, 100).unwrap();
        let budget = pacer.budget();

        // Poll far more often than the target rate for 100 budgets.
        let mut renders = 0u32;
        for _ in 0..10_000 {
            clock.advance(budget / 100);
            if pacer.poll(&clock).render {
                renders += 1;
            }
        }
        assert!(renders <= 100);
        assert!(renders >= 99);
    }

    #[test]
    fn render_interval_stays_under_two_budgets() {
        let clock = FakeClock::new(1_000_000);
        let mut pacer = FramePacer::new(&clock, 100).unwrap();
        let budget = pacer.budget();

        let mut render_times = Vec::new();
        for i in 0..5_000u64 {
            // Uneven poll cadence, up to a fifth of the budget per poll.
            clock.advance(1 + (i % (budget / 5)));
            if pacer.poll(&clock).render {
                render_times.push(clock.now());
            }
        }

        assert!(render_times.len() >= 100);
        for pair in render_times.windows(2) {
            assert!(pair[1] - pair[0] <= 2 * budget);
        }
    }

    #[test]
    fn stalled_clock_drops_frames_instead_of_bursting() {
        let clock = FakeClock::new(1_000);
        let mut pacer = FramePacer::new(&clock, 100).unwrap();
        let budget = pacer.budget();
        pacer.poll(&clock);

        for _ in 0..100 {
            // Stall for five budgets between polls.
            clock.advance(5 * budget);
            let step = pacer.poll(&clock);
            assert!(step.render);

            // No backlog: the deadline snapped to now + budget, so the next
            // poll renders nothing and a whole budget must elapse first.
            assert!(!pacer.poll(&clock).render);
            clock.advance(budget);
            assert!(!pacer.poll(&clock).render);
            clock.advance(1);
            assert!(pacer.poll(&clock).render);
        }
    }
}
