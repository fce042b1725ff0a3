//! Host-side state the tracker reads but does not own.
//!
//! The tracker only needs two things from the game client: the player's
//! current ranged experience and a millisecond clock for the overlay grace
//! period. `SessionHost` supplies both for the REPL, either from the wall
//! clock or from timestamps of a replayed event log.

use time::OffsetDateTime;

use crate::event_models::Timestamp;

pub trait GameHost {
    /// Current ranged skill experience
    fn skill_experience(&self) -> f64;

    /// Current time in milliseconds
    fn now_ms(&self) -> i64;
}

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Turns time-of-day log timestamps into a continuous millisecond clock.
/// A timestamp earlier than the previous one is taken as a midnight rollover.
#[derive(Debug, Clone, Default)]
pub struct ReplayClock {
    previous: Option<Timestamp>,
    day_offset_ms: i64,
    now_ms: i64,
}

impl ReplayClock {
    pub fn advance(&mut self, timestamp: Timestamp) -> i64 {
        if let Some(prev) = self.previous
            && timestamp.as_millis() < prev.as_millis()
        {
            self.day_offset_ms += DAY_MS;
        }
        self.previous = Some(timestamp);
        self.now_ms = self.day_offset_ms + timestamp.as_millis();
        self.now_ms
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionHost {
    pub experience: f64,
    /// Set while events come from a log file; None means wall clock
    pub replay_clock: Option<ReplayClock>,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_replay() -> Self {
        Self {
            experience: 0.0,
            replay_clock: Some(ReplayClock::default()),
        }
    }

    pub fn set_experience(&mut self, experience: f64) {
        self.experience = experience;
    }

    pub fn advance_clock(&mut self, timestamp: Timestamp) {
        self.replay_clock
            .get_or_insert_with(ReplayClock::default)
            .advance(timestamp);
    }
}

impl GameHost for SessionHost {
    fn skill_experience(&self) -> f64 {
        self.experience
    }

    fn now_ms(&self) -> i64 {
        match &self.replay_clock {
            Some(clock) => clock.now_ms(),
            None => (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64,
        }
    }
}
