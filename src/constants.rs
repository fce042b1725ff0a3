//! Fixed game identifiers and tuning values for cannon tracking.

use phf::{Set, phf_set};

/// Game object ids of a placed cannon.
pub static CANNON_OBJECT_IDS: Set<i32> = phf_set! {
    6i32,
    43027i32,
};

/// Projectile ids fired by the cannon.
pub static CANNONBALL_PROJECTILE_IDS: Set<i32> = phf_set! {
    53i32,
    2018i32,
};

/// Ranged experience awarded per point of cannon damage.
pub const XP_PER_DAMAGE: f64 = 2.0;

/// How long the overlay stays up after the cannon is picked up.
pub const OVERLAY_DISPLAY_DURATION_MS: i64 = 60_000;

/// Most recent distinct cannonballs kept for deduplication.
pub const MAX_TRACKED_PROJECTILES: usize = 5;

pub fn is_cannon_object(object_id: i32) -> bool {
    CANNON_OBJECT_IDS.contains(&object_id)
}

pub fn is_cannonball(projectile_id: i32) -> bool {
    CANNONBALL_PROJECTILE_IDS.contains(&projectile_id)
}
