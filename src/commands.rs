use std::time::Instant;

use crate::CannonError;
use crate::app_state::AppState;
use crate::event_models::{GameEvent, Projectile};
use crate::host::GameHost;
use crate::overlay;
use crate::reader::{read_event_log, tail_event_log};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::RwLock;

const PANEL_WIDTH: usize = 28;

pub async fn replay_file(path: &str, state: Arc<RwLock<AppState>>) -> Result<(), CannonError> {
    let timer = Instant::now();
    let mut s = state.write().await;

    // Stop any current tailing task
    if let Some(active_tail) = s.log_tail_task.take() {
        active_tail.abort();
    }
    let active_path = s.set_active_file(path)?;
    drop(s);

    let log = read_event_log(&active_path)?;
    let count = log.entries.len();

    {
        let mut s = state.write().await;
        s.current_byte = Some(log.end_pos);
        s.current_line = log.lines_read;
        s.process_entries(log.entries);
    }

    println!("replayed {} events in {}ms", count, timer.elapsed().as_millis());

    println!("tailing file: {}", active_path.display());
    let state_clone = Arc::clone(&state);
    let handle = tokio::spawn(async move {
        if let Err(e) = tail_event_log(&active_path, state_clone).await {
            tracing::error!(error = %e, "Event log tail failed");
        }
    });
    state.write().await.log_tail_task = Some(handle);
    Ok(())
}

/// Feed a single hand-written event to the plugin
pub async fn send_event(event: GameEvent, state: Arc<RwLock<AppState>>) {
    let mut s = state.write().await;
    let s = &mut *s;
    s.plugin.dispatch(&event, &s.host);
    tracing::debug!(?event, "Dispatched event");
}

pub async fn spawn(object_id: i32, state: Arc<RwLock<AppState>>) {
    send_event(GameEvent::ObjectSpawned { object_id }, state).await;
}

pub async fn despawn(object_id: i32, state: Arc<RwLock<AppState>>) {
    send_event(GameEvent::ObjectDespawned { object_id }, state).await;
}

pub async fn projectile(id: i32, identity: u64, state: Arc<RwLock<AppState>>) {
    send_event(
        GameEvent::ProjectileMoved {
            projectile: Projectile { id, identity },
        },
        state,
    )
    .await;
}

pub async fn tick(state: Arc<RwLock<AppState>>) {
    send_event(GameEvent::GameTick, state).await;
}

pub async fn set_experience(value: f64, state: Arc<RwLock<AppState>>) {
    state.write().await.host.set_experience(value);
}

pub async fn show_overlay(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    match s.plugin.overlay(&s.host) {
        Some(lines) => println!("{}", overlay::render_panel(&lines, PANEL_WIDTH)),
        None => println!("overlay hidden"),
    }
}

pub async fn show_stats(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    if let Some(path) = &s.active_file {
        println!("Active file: {}", path.display());
    }
    println!("Ranged XP: {}", s.host.skill_experience());
    s.plugin.tracker().print_metadata(s.host.now_ms());
}

pub async fn reset(state: Arc<RwLock<AppState>>) {
    let mut s = state.write().await;
    let s = &mut *s;
    s.plugin.tracker_mut().reset(&s.host);
    println!("tracker reset");
}

pub async fn show_settings(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    println!("log_directory: {}", s.config.log_directory);
    println!("tail_poll_ms: {}", s.config.tail_poll_ms);
    println!("log_filter: {}", s.config.log_filter);
}

pub async fn shut_down(state: Arc<RwLock<AppState>>) {
    let mut s = state.write().await;
    if let Some(active_tail) = s.log_tail_task.take() {
        active_tail.abort();
    }
    let s = &mut *s;
    s.plugin.shut_down(&s.host);
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> Arc<RwLock<AppState>> {
        Arc::new(RwLock::new(AppState::default()))
    }

    #[tokio::test]
    async fn test_manual_events_drive_tracker() {
        let state = shared();
        set_experience(100.0, Arc::clone(&state)).await;
        spawn(6, Arc::clone(&state)).await;
        projectile(53, 1, Arc::clone(&state)).await;
        projectile(2018, 2, Arc::clone(&state)).await;
        set_experience(120.0, Arc::clone(&state)).await;
        tick(Arc::clone(&state)).await;

        let s = state.read().await;
        assert_eq!(s.plugin.tracker().total_damage(), 10);
        assert_eq!(s.plugin.tracker().cannonballs_used(), 2);
        assert!(s.plugin.overlay(&s.host).is_some());
    }

    #[tokio::test]
    async fn test_reset_rebaselines_to_current_xp() {
        let state = shared();
        set_experience(50.0, Arc::clone(&state)).await;
        spawn(6, Arc::clone(&state)).await;
        reset(Arc::clone(&state)).await;

        let s = state.read().await;
        assert!(!s.plugin.tracker().cannon_placed());
        assert_eq!(s.plugin.tracker().ranged_xp_baseline(), 50.0);
    }

    #[tokio::test]
    async fn test_replay_missing_file_errors() {
        let state = shared();
        let result = replay_file("/definitely/not/here.log", Arc::clone(&state)).await;
        assert!(matches!(result, Err(CannonError::InvalidPath { .. })));
        assert!(state.read().await.log_tail_task.is_none());
    }

    #[tokio::test]
    async fn test_shut_down_hides_overlay() {
        let state = shared();
        spawn(6, Arc::clone(&state)).await;
        shut_down(Arc::clone(&state)).await;

        let s = state.read().await;
        assert!(!s.plugin.is_running());
        assert!(s.plugin.overlay(&s.host).is_none());
    }
}
