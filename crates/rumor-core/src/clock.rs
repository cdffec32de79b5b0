use std::fmt;

/// Simulated seconds. Delays, durations and clock readings all use this unit.
pub type Seconds = u64;

pub const SECS_PER_MINUTE: Seconds = 60;
pub const SECS_PER_HOUR: Seconds = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: Seconds = 24 * SECS_PER_HOUR;

/// Monotonic count of elapsed game seconds.
///
/// Only the scheduler moves the clock; everything else reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    now: Seconds,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock already reading `hour:00` on the first day.
    pub fn starting_at_hour(hour: u64) -> Self {
        Self {
            now: hour.saturating_mul(SECS_PER_HOUR),
        }
    }

    pub fn now(&self) -> Seconds {
        self.now
    }

    pub fn advance(&mut self, secs: Seconds) {
        self.now = self.now.saturating_add(secs);
    }

    /// Moves the clock forward to `at`. Never moves it backwards.
    pub fn advance_to(&mut self, at: Seconds) {
        self.now = self.now.max(at);
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.now / SECS_PER_DAY + 1;
        let of_day = self.now % SECS_PER_DAY;
        write!(
            f,
            "day {}, {:02}:{:02}:{:02}",
            day,
            of_day / SECS_PER_HOUR,
            (of_day % SECS_PER_HOUR) / SECS_PER_MINUTE,
            of_day % SECS_PER_MINUTE
        )
    }
}
