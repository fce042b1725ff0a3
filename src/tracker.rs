use crate::constants::{
    MAX_TRACKED_PROJECTILES, OVERLAY_DISPLAY_DURATION_MS, XP_PER_DAMAGE, is_cannon_object,
    is_cannonball,
};
use crate::event_models::{GameEvent, Projectile};
use crate::host::GameHost;
use std::collections::VecDeque;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    // Cannon state
    cannon_placed: bool,

    // Recent cannonballs - fixed-size window, most recent at back, max 5
    tracked_projectiles: VecDeque<Projectile>,

    // Damage and usage
    total_damage: u32,
    cannonballs_used: u32,

    // Ranged XP at the moment the cannon was placed
    ranged_xp_baseline: f64,

    // Overlay visibility with grace period after pickup
    overlay_visible: bool,
    hide_deadline_ms: i64,
}

impl Tracker {
    pub fn new(host: &impl GameHost) -> Self {
        Self {
            tracked_projectiles: VecDeque::with_capacity(MAX_TRACKED_PROJECTILES),
            ranged_xp_baseline: host.skill_experience(),
            ..Default::default()
        }
    }

    /// Route an incoming event to its handler
    pub fn handle_event(&mut self, event: &GameEvent, host: &impl GameHost) {
        match event {
            GameEvent::ObjectSpawned { object_id } => self.on_object_spawned(*object_id, host),
            GameEvent::ObjectDespawned { object_id } => self.on_object_despawned(*object_id, host),
            GameEvent::ProjectileMoved { projectile } => self.on_projectile_moved(*projectile),
            GameEvent::GameTick => self.on_game_tick(host),
        }
    }

    pub fn on_object_spawned(&mut self, object_id: i32, host: &impl GameHost) {
        if !is_cannon_object(object_id) {
            tracing::trace!(object_id, "Ignoring spawned object");
            return;
        }
        self.cannon_placed = true;
        self.overlay_visible = true;
        self.ranged_xp_baseline = host.skill_experience();
        tracing::debug!(object_id, baseline = self.ranged_xp_baseline, "Cannon placed");
    }

    pub fn on_object_despawned(&mut self, object_id: i32, host: &impl GameHost) {
        if !is_cannon_object(object_id) {
            tracing::trace!(object_id, "Ignoring despawned object");
            return;
        }
        self.cannon_placed = false;
        self.hide_deadline_ms = host.now_ms() + OVERLAY_DISPLAY_DURATION_MS;
        tracing::debug!(object_id, hide_at = self.hide_deadline_ms, "Cannon picked up");
    }

    pub fn on_projectile_moved(&mut self, projectile: Projectile) {
        if !is_cannonball(projectile.id) || self.is_tracked(&projectile) {
            return;
        }
        if self.tracked_projectiles.len() >= MAX_TRACKED_PROJECTILES {
            self.tracked_projectiles.pop_front();
        }
        self.tracked_projectiles.push_back(projectile);
        self.cannonballs_used += 1;
        tracing::trace!(
            identity = projectile.identity,
            used = self.cannonballs_used,
            "Cannonball fired"
        );
    }

    /// Recompute damage from the XP gained since placement. This overwrites
    /// rather than accumulates, so the total follows the XP delta exactly.
    pub fn on_game_tick(&mut self, host: &impl GameHost) {
        if !self.cannon_placed {
            return;
        }
        let xp_gained = host.skill_experience() - self.ranged_xp_baseline;
        if xp_gained > 0.0 {
            self.total_damage = (xp_gained / XP_PER_DAMAGE).round() as u32;
        }
    }

    /// Visible while the cannon is up, or until the grace deadline (exclusive)
    pub fn should_show_overlay(&self, now_ms: i64) -> bool {
        self.overlay_visible && (self.cannon_placed || now_ms < self.hide_deadline_ms)
    }

    pub fn reset(&mut self, host: &impl GameHost) {
        self.total_damage = 0;
        self.cannonballs_used = 0;
        self.cannon_placed = false;
        self.overlay_visible = false;
        self.tracked_projectiles.clear();
        self.ranged_xp_baseline = host.skill_experience();
    }

    fn is_tracked(&self, projectile: &Projectile) -> bool {
        self.tracked_projectiles
            .iter()
            .any(|p| p.is_same_instance(projectile))
    }

    // --- Accessors ---

    pub fn total_damage(&self) -> u32 {
        self.total_damage
    }

    pub fn cannonballs_used(&self) -> u32 {
        self.cannonballs_used
    }

    pub fn average_damage_per_cannonball(&self) -> f64 {
        if self.cannonballs_used > 0 {
            self.total_damage as f64 / self.cannonballs_used as f64
        } else {
            0.0
        }
    }

    pub fn cannon_placed(&self) -> bool {
        self.cannon_placed
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn ranged_xp_baseline(&self) -> f64 {
        self.ranged_xp_baseline
    }

    pub fn hide_deadline_ms(&self) -> i64 {
        self.hide_deadline_ms
    }

    /// Recently seen cannonballs, oldest first
    pub fn tracked_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.tracked_projectiles.iter()
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked_projectiles.len()
    }

    pub fn print_metadata(&self, now_ms: i64) {
        println!("=== Cannon Tracker ===");
        println!("  Cannon placed: {}", self.cannon_placed);
        println!("  Overlay visible: {}", self.should_show_overlay(now_ms));
        if !self.cannon_placed && self.overlay_visible {
            let remaining = (self.hide_deadline_ms - now_ms).max(0);
            println!("  Overlay hides in: {}ms", remaining);
        }
        println!("  XP baseline: {}", self.ranged_xp_baseline);
        println!("  Total damage: {}", self.total_damage);
        println!("  Cannonballs used: {}", self.cannonballs_used);
        println!("  Avg damage: {:.3}", self.average_damage_per_cannonball());
        println!("  Tracked projectiles ({}):", self.tracked_projectiles.len());
        for p in &self.tracked_projectiles {
            println!("    [id {}: #{}]", p.id, p.identity);
        }
    }
}
