//! Galaxy Explorer - a procedurally generated space exploration demo
//!
//! Core modules:
//! - `sim`: Deterministic generation, ship/avatar physics, and the mode state machine
//! - `input`: Logical keys, edge detection, and per-tick command mapping
//! - `presenter`: Scene descriptions handed to an external presentation surface
//! - `session`: Frame-limited main loop tying input, simulation, and presentation
//! - `settings`: Data-driven tunables loaded from JSON

pub mod input;
pub mod presenter;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{SessionSummary, run};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Presentation surface dimensions (pixels)
    pub const SCREEN_W: f32 = 800.0;
    pub const SCREEN_H: f32 = 600.0;

    /// Galaxy map cell size and visible grid
    pub const CELL_SIZE: f32 = 50.0;
    pub const GRID_W: i64 = 16;
    pub const GRID_H: i64 = 12;

    /// Default probability that a sector contains a star
    pub const DEFAULT_STAR_CHANCE: f64 = 0.2;

    /// Ship flight model (per tick)
    pub const SHIP_RADIUS: f32 = 10.0;
    pub const THRUST: f32 = 0.15;
    pub const ROT_SPEED: f32 = 0.08;
    /// Velocity multiplier applied every tick, thrusting or not
    pub const DRAG: f32 = 0.995;
    /// Ship spawns this far above the bottom edge
    pub const SHIP_SPAWN_MARGIN: f32 = 60.0;

    /// Star visual/collision radius inside a system
    pub const STAR_RADIUS: f32 = 30.0;

    /// Planet layout
    pub const FIRST_ORBIT: f32 = 80.0;
    pub const ORBIT_SPACING: f32 = 50.0;
    pub const INNER_PLANET_RADIUS: f32 = 12.0;
    pub const OUTER_PLANET_RADIUS: f32 = 8.0;
    pub const MAX_PLANETS: u32 = 5;
    pub const MAX_FEATURES: usize = 2;

    /// Surface exploration
    pub const SURF_SPEED: f32 = 4.0;
    pub const AVATAR_RADIUS: f32 = 10.0;
    pub const ORB_RADIUS: f32 = 8.0;
    pub const ORBS_PER_LANDING: usize = 8;
    /// Orb spawn area (inclusive integer pixel bounds)
    pub const ORB_MARGIN_X: i32 = 50;
    pub const ORB_MARGIN_TOP: i32 = 80;
    pub const ORB_MARGIN_BOTTOM: i32 = 50;

    /// Default target frame rate
    pub const TARGET_FPS: u32 = 60;
    /// Default length of the star-collision pause (milliseconds)
    pub const EXPLOSION_PAUSE_MS: u64 = 400;
}

/// Center of the presentation surface
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_W / 2.0, consts::SCREEN_H / 2.0)
}

/// Wrap a position into [0, W) x [0, H) (toroidal space)
#[inline]
pub fn wrap_to_screen(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, consts::SCREEN_W),
        wrap_axis(pos.y, consts::SCREEN_H),
    )
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Clamp a position into [0, W] x [0, H]
#[inline]
pub fn clamp_to_screen(pos: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, Vec2::new(consts::SCREEN_W, consts::SCREEN_H))
}

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use consts::*;

    #[test]
    fn test_wrap_negative_and_overflow() {
        let p = wrap_to_screen(Vec2::new(-1.0, SCREEN_H + 5.0));
        assert!((p.x - (SCREEN_W - 1.0)).abs() < 1e-3);
        assert!((p.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_in_range() {
        let p = wrap_to_screen(Vec2::new(-1e-9, -1e-9));
        assert!(p.x >= 0.0 && p.x < SCREEN_W);
        assert!(p.y >= 0.0 && p.y < SCREEN_H);
    }

    #[test]
    fn test_clamp_keeps_edges() {
        let p = clamp_to_screen(Vec2::new(-20.0, 9000.0));
        assert_eq!(p, Vec2::new(0.0, SCREEN_H));
    }

    #[test]
    fn test_polar_offset() {
        let p = polar_offset(Vec2::new(10.0, 10.0), 5.0, 0.0);
        assert!((p - Vec2::new(15.0, 10.0)).length() < 1e-5);
    }
}
