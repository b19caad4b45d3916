//! # Migration Clock
//!
//! Each compiler owns one clock. Every compile advances it by a fixed step
//! before the file name is formatted, so migrations compiled in the same run
//! get strictly increasing, collision-free timestamp prefixes.

use chrono::{Local, NaiveDateTime, TimeDelta};

/// Default step between two compiles, in seconds
pub const DEFAULT_STEP_SECONDS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationClock {
    current: NaiveDateTime,
    step: TimeDelta,
}

impl MigrationClock {
    /// Create a clock starting at a fixed time
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            current: start,
            step: TimeDelta::seconds(DEFAULT_STEP_SECONDS),
        }
    }

    /// Create a clock starting at the local wall-clock time
    pub fn starting_now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Set the step in seconds
    pub fn with_step_seconds(mut self, seconds: i64) -> Self {
        self.step = TimeDelta::seconds(seconds.max(1));
        self
    }

    /// Current clock value, without advancing
    pub fn current(&self) -> NaiveDateTime {
        self.current
    }

    pub fn step(&self) -> TimeDelta {
        self.step
    }

    /// Advance by one step and return the new value
    pub fn advance(&mut self) -> NaiveDateTime {
        self.current += self.step;
        self.current
    }
}

// ============================================================================
// Tests
// ============================================================================
