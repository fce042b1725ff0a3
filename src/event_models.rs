#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millis: u16,
}

impl Timestamp {
    /// Milliseconds since midnight
    pub fn as_millis(&self) -> i64 {
        ((self.hour as i64 * 60 + self.minute as i64) * 60 + self.second as i64) * 1000
            + self.millis as i64
    }
}

/// A projectile in flight. `identity` is the host's handle for the
/// projectile instance and is what tells two cannonballs apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub id: i32,
    pub identity: u64,
}

impl Projectile {
    pub fn is_same_instance(&self, other: &Projectile) -> bool {
        self.identity == other.identity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ObjectSpawned { object_id: i32 },
    ObjectDespawned { object_id: i32 },
    ProjectileMoved { projectile: Projectile },
    GameTick,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    Event(GameEvent),
    /// Host-side ranged experience as of this line
    ExperienceChanged(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub line_number: u64,
    pub timestamp: Timestamp,
    pub record: LogRecord,
}
