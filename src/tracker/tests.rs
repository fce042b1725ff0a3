use super::*;

struct FakeHost {
    xp: f64,
    now: i64,
}

impl FakeHost {
    fn at_xp(xp: f64) -> Self {
        Self { xp, now: 0 }
    }
}

impl GameHost for FakeHost {
    fn skill_experience(&self) -> f64 {
        self.xp
    }

    fn now_ms(&self) -> i64 {
        self.now
    }
}

fn ball(identity: u64) -> Projectile {
    Projectile { id: 53, identity }
}

// on_object_spawned
#[test]
fn test_spawn_cannon_sets_baseline() {
    let host = FakeHost::at_xp(100.0);
    let mut tracker = Tracker::new(&FakeHost::at_xp(0.0));

    tracker.on_object_spawned(6, &host);

    assert!(tracker.cannon_placed());
    assert!(tracker.overlay_visible());
    assert_eq!(tracker.ranged_xp_baseline(), 100.0);
}

#[test]
fn test_spawn_ornament_cannon_recognized() {
    let host = FakeHost::at_xp(50.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(43027, &host);
    assert!(tracker.cannon_placed());
}

#[test]
fn test_spawn_unknown_object_ignored() {
    let host = FakeHost::at_xp(100.0);
    let mut tracker = Tracker::new(&FakeHost::at_xp(0.0));

    tracker.on_object_spawned(7, &host);

    assert!(!tracker.cannon_placed());
    assert!(!tracker.overlay_visible());
    assert_eq!(tracker.ranged_xp_baseline(), 0.0);
}

#[test]
fn test_repeated_spawn_rebaselines() {
    let mut host = FakeHost::at_xp(100.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);

    host.xp = 140.0;
    tracker.on_game_tick(&host);
    assert_eq!(tracker.total_damage(), 20);

    tracker.on_object_spawned(6, &host);
    assert!(tracker.cannon_placed());
    assert_eq!(tracker.ranged_xp_baseline(), 140.0);
    // damage snapshot is kept until xp moves past the new baseline
    tracker.on_game_tick(&host);
    assert_eq!(tracker.total_damage(), 20);
}

// on_projectile_moved
#[test]
fn test_projectile_window_capped_at_five() {
    let host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);

    for identity in 1..=6 {
        tracker.on_projectile_moved(ball(identity));
        assert!(tracker.tracked_count() <= MAX_TRACKED_PROJECTILES);
    }

    assert_eq!(tracker.cannonballs_used(), 6);
    let kept: Vec<u64> = tracker.tracked_projectiles().map(|p| p.identity).collect();
    assert_eq!(kept, vec![2, 3, 4, 5, 6]);
}

#[test]
fn test_duplicate_projectile_counted_once() {
    let host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);

    tracker.on_projectile_moved(ball(1));
    tracker.on_projectile_moved(ball(1));
    tracker.on_projectile_moved(Projectile {
        id: 2018,
        identity: 1,
    });

    assert_eq!(tracker.cannonballs_used(), 1);
    assert_eq!(tracker.tracked_count(), 1);
}

#[test]
fn test_evicted_projectile_counted_again() {
    let host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);

    for identity in 1..=6 {
        tracker.on_projectile_moved(ball(identity));
    }
    // identity 1 fell out of the window, so it reads as new
    tracker.on_projectile_moved(ball(1));

    assert_eq!(tracker.cannonballs_used(), 7);
    assert_eq!(tracker.tracked_count(), 5);
}

#[test]
fn test_unknown_projectile_ignored() {
    let host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);

    tracker.on_projectile_moved(Projectile {
        id: 54,
        identity: 9,
    });

    assert_eq!(tracker.cannonballs_used(), 0);
    assert_eq!(tracker.tracked_count(), 0);
}

// on_game_tick
#[test]
fn test_tick_without_cannon_is_noop() {
    let mut host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);
    host.xp = 500.0;

    tracker.on_game_tick(&host);

    assert_eq!(tracker.total_damage(), 0);
}

#[test]
fn test_tick_damage_is_snapshot_not_sum() {
    let mut host = FakeHost::at_xp(1000.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);

    host.xp = 1010.0;
    tracker.on_game_tick(&host);
    tracker.on_game_tick(&host);
    assert_eq!(tracker.total_damage(), 5);

    host.xp = 1004.0;
    tracker.on_game_tick(&host);
    assert_eq!(tracker.total_damage(), 2);
}

#[test]
fn test_tick_rounds_half_up() {
    let mut host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);

    host.xp = 3.0;
    tracker.on_game_tick(&host);
    assert_eq!(tracker.total_damage(), 2);
}

#[test]
fn test_tick_ignores_xp_loss() {
    let mut host = FakeHost::at_xp(100.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);

    host.xp = 120.0;
    tracker.on_game_tick(&host);
    host.xp = 90.0;
    tracker.on_game_tick(&host);

    assert_eq!(tracker.total_damage(), 10);
}

// should_show_overlay
#[test]
fn test_overlay_grace_window() {
    let mut host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);
    assert!(tracker.should_show_overlay(0));

    host.now = 0;
    tracker.on_object_despawned(6, &host);
    assert_eq!(tracker.hide_deadline_ms(), 60_000);

    assert!(tracker.should_show_overlay(59_999));
    assert!(!tracker.should_show_overlay(60_000));
    assert!(!tracker.should_show_overlay(60_001));
}

#[test]
fn test_overlay_hidden_before_first_spawn() {
    let host = FakeHost::at_xp(0.0);
    let tracker = Tracker::new(&host);
    assert!(!tracker.should_show_overlay(0));
}

#[test]
fn test_respawn_during_grace_keeps_overlay() {
    let mut host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);
    tracker.on_object_despawned(6, &host);

    host.now = 30_000;
    tracker.on_object_spawned(6, &host);

    assert!(tracker.should_show_overlay(500_000));
}

#[test]
fn test_unknown_despawn_keeps_cannon() {
    let host = FakeHost::at_xp(0.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);
    tracker.on_object_despawned(1, &host);
    assert!(tracker.cannon_placed());
}

// average_damage_per_cannonball
#[test]
fn test_average_zero_without_cannonballs() {
    let host = FakeHost::at_xp(0.0);
    let tracker = Tracker::new(&host);
    assert_eq!(tracker.average_damage_per_cannonball(), 0.0);
}

// reset
#[test]
fn test_reset_clears_state() {
    let mut host = FakeHost::at_xp(10.0);
    let mut tracker = Tracker::new(&host);
    tracker.on_object_spawned(6, &host);
    tracker.on_projectile_moved(ball(1));
    host.xp = 30.0;
    tracker.on_game_tick(&host);

    tracker.reset(&host);

    assert_eq!(tracker.total_damage(), 0);
    assert_eq!(tracker.cannonballs_used(), 0);
    assert_eq!(tracker.tracked_count(), 0);
    assert!(!tracker.cannon_placed());
    assert!(!tracker.should_show_overlay(0));
    assert_eq!(tracker.ranged_xp_baseline(), 30.0);
}

// handle_event
#[test]
fn test_cannon_session_scenario() {
    let mut host = FakeHost::at_xp(100.0);
    let mut tracker = Tracker::new(&host);

    tracker.handle_event(&GameEvent::ObjectSpawned { object_id: 6 }, &host);
    tracker.handle_event(&GameEvent::GameTick, &host);
    assert_eq!(tracker.total_damage(), 0);

    for identity in 1..=3 {
        tracker.handle_event(
            &GameEvent::ProjectileMoved {
                projectile: ball(identity),
            },
            &host,
        );
    }
    assert_eq!(tracker.cannonballs_used(), 3);

    host.xp = 110.0;
    tracker.handle_event(&GameEvent::GameTick, &host);
    assert_eq!(tracker.total_damage(), 5);
    assert!((tracker.average_damage_per_cannonball() - 5.0 / 3.0).abs() < 1e-9);

    tracker.handle_event(&GameEvent::ObjectDespawned { object_id: 6 }, &host);
    assert!(!tracker.cannon_placed());
    assert!(tracker.should_show_overlay(1));
}
