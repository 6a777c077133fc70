//! Voting window and the clock it is derived from.

use chrono::{DateTime, Utc};

/// Length of every voting window: 24 hours.
pub const VOTING_PERIOD_SECS: u64 = 24 * 60 * 60;

/// Interval during which the contract accepts votes, in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingWindow {
    start_time: u64,
    end_time: u64,
}

impl VotingWindow {
    /// Window opening at `start_time` and closing one voting period later.
    pub fn starting_at(start_time: u64) -> Self {
        Self {
            start_time,
            end_time: start_time.saturating_add(VOTING_PERIOD_SECS),
        }
    }

    /// Window opening at the clock's current time.
    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::starting_at(clock.now().timestamp().max(0) as u64)
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn end_time(&self) -> u64 {
        self.end_time
    }
}

/// Wall-clock source.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
