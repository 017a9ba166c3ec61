//! Circle-circle collision tests
//!
//! Everything that touches in this game is a circle: the star, planets, the
//! ship hull, the surface avatar and resource orbs.

use glam::Vec2;

use super::state::{Inventory, ResourceKind, StarSystem, SurfaceState};
use crate::consts::*;
use crate::screen_center;

/// True if two circles with combined radius `r` overlap (touching is a miss)
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, r: f32) -> bool {
    a.distance_squared(b) < r * r
}

/// What the ship ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipCollision {
    Star,
    /// Planet index within the system
    Planet(usize),
}

/// Ship against the system's star, then its planets inner to outer.
///
/// The star wins over any planet; among planets the lowest index wins.
pub fn ship_collision(ship: Vec2, system: &StarSystem) -> Option<ShipCollision> {
    let star = screen_center();
    if circles_overlap(ship, star, STAR_RADIUS + SHIP_RADIUS) {
        return Some(ShipCollision::Star);
    }

    system
        .planets
        .iter()
        .position(|p| circles_overlap(ship, p.position(star), p.body_radius + SHIP_RADIUS))
        .map(ShipCollision::Planet)
}

/// Pick up every orb under the avatar.
///
/// Collected orbs leave the surface for good; each adds one unit to the
/// inventory. Returns what was picked up this tick.
pub fn collect_orbs(surface: &mut SurfaceState, inventory: &mut Inventory) -> Vec<ResourceKind> {
    let avatar = surface.avatar;
    let mut collected = Vec::new();
    surface.orbs.retain(|orb| {
        if circles_overlap(avatar, orb.pos, AVATAR_RADIUS + ORB_RADIUS) {
            collected.push(orb.resource);
            false
        } else {
            true
        }
    });

    for &resource in &collected {
        inventory.add(resource);
    }
    surface.collected += collected.len();
    collected
}
