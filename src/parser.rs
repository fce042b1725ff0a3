use crate::event_models::{GameEvent, LogEntry, LogRecord, Projectile, Timestamp};
use memchr::memchr;


// [00:12:41.600] SPAWN 6
// [00:12:42.200] PROJECTILE 53 81723
// [00:12:42.800] TICK
// [00:12:42.800] XP 1302551.0
// [00:13:40.000] DESPAWN 6

pub fn parse_line(line_number: u64, line: &str) -> Option<LogEntry> {
    let (remaining, timestamp) = parse_timestamp(line.trim_end())?;
    let record = parse_record(remaining.trim_start())?;

    Some(LogEntry {
        line_number,
        timestamp,
        record,
    })
}

pub fn parse_timestamp(input: &str) -> Option<(&str, Timestamp)> {
    let b = input.as_bytes();
    if b.len() < 14 || b[0] != b'[' || b[3] != b':' || b[6] != b':' || b[9] != b'.' || b[13] != b']'
    {
        return None;
    }
    let digits = [1, 2, 4, 5, 7, 8, 10, 11, 12];
    if digits.iter().any(|&i| !b[i].is_ascii_digit()) {
        return None;
    }

    let hour = (b[1] - b'0') * 10 + (b[2] - b'0');
    let minute = (b[4] - b'0') * 10 + (b[5] - b'0');
    let second = (b[7] - b'0') * 10 + (b[8] - b'0');
    let millis = (b[10] - b'0') as u16 * 100 + (b[11] - b'0') as u16 * 10 + (b[12] - b'0') as u16;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    Some((
        &input[14..],
        Timestamp {
            hour,
            minute,
            second,
            millis,
        },
    ))
}

/// Split off the next space-delimited field
fn next_field(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match memchr(b' ', input.as_bytes()) {
        Some(pos) => Some((&input[..pos], &input[pos + 1..])),
        None => Some((input, "")),
    }
}

pub fn parse_record(input: &str) -> Option<LogRecord> {
    let (kind, rest) = next_field(input)?;

    let record = match kind {
        "SPAWN" => LogRecord::Event(GameEvent::ObjectSpawned {
            object_id: parse_single(rest)?,
        }),
        "DESPAWN" => LogRecord::Event(GameEvent::ObjectDespawned {
            object_id: parse_single(rest)?,
        }),
        "PROJECTILE" => LogRecord::Event(GameEvent::ProjectileMoved {
            projectile: parse_projectile(rest)?,
        }),
        "TICK" if rest.trim().is_empty() => LogRecord::Event(GameEvent::GameTick),
        "XP" => {
            let experience: f64 = parse_single(rest)?;
            if !experience.is_finite() {
                return None;
            }
            LogRecord::ExperienceChanged(experience)
        }
        _ => return None,
    };

    Some(record)
}

/// Exactly one field, parsed as `T`
fn parse_single<T: std::str::FromStr>(input: &str) -> Option<T> {
    let (field, rest) = next_field(input)?;
    if !rest.trim().is_empty() {
        return None;
    }
    field.parse().ok()
}

pub fn parse_projectile(input: &str) -> Option<Projectile> {
    let (id, rest) = next_field(input)?;
    let identity = parse_single(rest)?;
    Some(Projectile {
        id: id.parse().ok()?,
        identity,
    })
}
