//! Animation clock for the two-color fade.
//!
//! Each tick slides the panel window one entry along the animation buffer,
//! bouncing between both ends, and starts a new sweep.

use embassy_time::{Duration, Instant};

/// Period of the reference hardware timer: 16-bit overflow at 16 MHz / 8
pub const DEFAULT_FADE_STEP_PERIOD: Duration = Duration::from_micros(32_768);

/// Start of the panel window inside the animation buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOffset {
    value: usize,
    rising: bool,
}

impl Default for AnimationOffset {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationOffset {
    pub const fn new() -> Self {
        Self {
            value: 0,
            rising: true,
        }
    }

    pub const fn value(self) -> usize {
        self.value
    }

    /// Returns if the next step moves toward the end of the buffer
    pub const fn is_rising(self) -> bool {
        self.rising
    }

    /// Move one step, reversing at `0` and `max`
    pub fn advance(&mut self, max: usize) {
        if max == 0 {
            *self = Self::new();
            return;
        }

        if self.rising {
            self.value = (self.value + 1).min(max);
            if self.value >= max {
                self.rising = false;
            }
        } else {
            self.value = self.value.saturating_sub(1);
            if self.value == 0 {
                self.rising = true;
            }
        }
    }
}

/// What a clock tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The fade is not active
    Disabled,
    /// A sweep is still running; the tick was skipped
    Busy,
    /// The offset moved and a sweep was started
    Advanced(usize),
}

/// Turns a monotonic time source into animation clock ticks
///
/// For targets without a dedicated timer interrupt: call [`TickScheduler::poll`]
/// from the main loop and run the clock handler whenever it returns `true`.
/// If polling falls behind by more than two periods the backlog is skipped
/// instead of replayed.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    next_tick: Instant,
    period: Duration,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_STEP_PERIOD)
    }
}

impl TickScheduler {
    pub const fn new(period: Duration) -> Self {
        Self {
            next_tick: Instant::from_ticks(0),
            period,
        }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub const fn next_deadline(&self) -> Instant {
        self.next_tick
    }

    /// Returns if a tick is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        let max_drift = self.period * 2;
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        if now < self.next_tick {
            return false;
        }

        self.next_tick += self.period;
        true
    }
}
