use crate::app_state::AppState;
use crate::{CannonError, LogEntry, parse_line};
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs;
use std::io::SeekFrom;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::RwLock;
use tokio::time::{Duration, sleep};

/// Result of a bulk read. Only newline-terminated lines are consumed, so
/// `end_pos` sits just past the last `'\n'` and an unfinished trailing line
/// is left for the tail to pick up.
#[derive(Debug, Default)]
pub struct EventLog {
    pub entries: Vec<LogEntry>,
    pub end_pos: u64,
    pub lines_read: u64,
}

fn read_error(path: &Path, source: std::io::Error) -> CannonError {
    CannonError::ReadLog {
        path: path.to_path_buf(),
        source,
    }
}

/// Lines that fail UTF-8 decoding or parsing yield None and are skipped
fn parse_bytes(line_number: u64, bytes: &[u8]) -> Option<LogEntry> {
    let line = std::str::from_utf8(bytes).ok()?;
    parse_line(line_number, line)
}

pub fn read_event_log<P: AsRef<Path>>(path: P) -> Result<EventLog, CannonError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| read_error(path, e))?;
    if file.metadata().map_err(|e| read_error(path, e))?.len() == 0 {
        return Ok(EventLog::default());
    }
    let mmap = unsafe { Mmap::map(&file).map_err(|e| read_error(path, e))? };
    let bytes = mmap.as_ref();

    // (line_number, start, end) of every complete line, blank ones included
    // so numbering matches the file
    let mut start = 0;
    let lines: Vec<(u64, usize, usize)> = memchr_iter(b'\n', bytes)
        .enumerate()
        .map(|(idx, end)| {
            let line = (idx as u64 + 1, start, end);
            start = end + 1;
            line
        })
        .collect();
    let end_pos = start as u64;

    let entries: Vec<LogEntry> = lines
        .par_iter()
        .filter(|&&(_, start, end)| end > start)
        .filter_map(|&(line_number, start, end)| parse_bytes(line_number, &bytes[start..end]))
        .collect();

    tracing::debug!(
        path = %path.display(),
        lines = lines.len(),
        entries = entries.len(),
        unfinished = bytes.len() as u64 - end_pos,
        "Read event log"
    );

    Ok(EventLog {
        entries,
        end_pos,
        lines_read: lines.len() as u64,
    })
}

/// Follow the active file from `current_byte`, applying each completed line
/// to the plugin. Stops only on an I/O error.
pub async fn tail_event_log<P: AsRef<Path>>(
    path: P,
    state: Arc<RwLock<AppState>>,
) -> Result<(), CannonError> {
    let path = path.as_ref();
    let file = File::open(path).await.map_err(|e| read_error(path, e))?;
    let mut reader = BufReader::new(file);
    let (pos, poll_ms) = {
        let s = state.read().await;
        (s.current_byte.unwrap_or(0), s.config.tail_poll_ms)
    };

    reader
        .seek(SeekFrom::Start(pos))
        .await
        .map_err(|e| read_error(path, e))?;

    let mut buf: Vec<u8> = Vec::new();

    loop {
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Stopped tailing event log");
                read_error(path, e)
            })?;

        // nothing new, or the writer is mid-line
        if read == 0 || buf.last() != Some(&b'\n') {
            sleep(Duration::from_millis(poll_ms)).await;
            continue;
        }

        let mut s = state.write().await;
        s.current_byte = Some(s.current_byte.unwrap_or(0) + buf.len() as u64);
        s.current_line += 1;
        let line_number = s.current_line;
        match parse_bytes(line_number, &buf) {
            Some(entry) => s.process_entry(entry),
            None => tracing::trace!(line_number, "Skipping unparsable line"),
        }
        drop(s);
        buf.clear();
    }
}
