//! Per-tick kinematics for the ship and the surface avatar
//!
//! Units are pixels and radians per tick; the loop runs one tick per frame.

use glam::Vec2;

use super::state::ShipState;
use crate::consts::*;
use crate::{clamp_to_screen, wrap_to_screen};

/// Held flight controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightControls {
    /// -1 = turn left, 0 = none, +1 = turn right
    pub rotate: i8,
    pub thrust: bool,
}

/// Held surface movement for one tick, each axis in {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkControls {
    pub dx: i8,
    pub dy: i8,
}

impl ShipState {
    /// Advance one tick: rotate, thrust, drag, move, wrap.
    pub fn advance(&mut self, controls: FlightControls) {
        self.heading += f32::from(controls.rotate.signum()) * ROT_SPEED;
        if controls.thrust {
            self.vel += Vec2::new(self.heading.cos(), self.heading.sin()) * THRUST;
        }
        self.vel *= DRAG;
        self.pos = wrap_to_screen(self.pos + self.vel);
    }
}

/// Move the surface avatar one tick; the screen edge is a hard wall.
pub fn walk(avatar: Vec2, controls: WalkControls) -> Vec2 {
    let step = Vec2::new(
        f32::from(controls.dx.signum()),
        f32::from(controls.dy.signum()),
    ) * SURF_SPEED;
    clamp_to_screen(avatar + step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut ship = ShipState::default();
        ship.advance(FlightControls {
            rotate: 0,
            thrust: true,
        });
        // Heading is up (-y): velocity points up, scaled by drag
        assert!(ship.vel.x.abs() < 1e-5);
        assert!((ship.vel.y + THRUST * DRAG).abs() < 1e-5);
        assert!(ship.pos.y < 540.0);
    }

    #[test]
    fn test_drag_applies_without_input() {
        let mut ship = ShipState {
            vel: Vec2::new(2.0, 0.0),
            ..Default::default()
        };
        ship.advance(FlightControls::default());
        assert!((ship.vel.x - 2.0 * DRAG).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_steps() {
        let mut ship = ShipState::default();
        let start = ship.heading;
        ship.advance(FlightControls {
            rotate: 1,
            thrust: false,
        });
        assert!((ship.heading - (start + ROT_SPEED)).abs() < 1e-6);
        ship.advance(FlightControls {
            rotate: -1,
            thrust: false,
        });
        ship.advance(FlightControls {
            rotate: -1,
            thrust: false,
        });
        assert!((ship.heading - (start - ROT_SPEED)).abs() < 1e-6);
    }

    #[test]
    fn test_ship_wraps_across_edges() {
        let mut ship = ShipState {
            pos: Vec2::new(799.5, 0.5),
            vel: Vec2::new(2.0, -2.0),
            heading: 0.0,
        };
        ship.advance(FlightControls::default());
        assert!(ship.pos.x < 5.0);
        assert!(ship.pos.y > 595.0);
    }

    #[test]
    fn test_walk_clamps_at_walls() {
        let p = walk(Vec2::new(2.0, 598.0), WalkControls { dx: -1, dy: 1 });
        assert_eq!(p, Vec2::new(0.0, 600.0));
        let p = walk(Vec2::new(400.0, 300.0), WalkControls { dx: 1, dy: 0 });
        assert_eq!(p, Vec2::new(404.0, 300.0));
    }

    proptest! {
        #[test]
        fn ship_stays_on_screen(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            heading in -10.0f32..10.0,
            rotate in -1i8..=1,
            thrust in any::<bool>(),
        ) {
            let mut ship = ShipState { pos: Vec2::new(x, y), vel: Vec2::new(vx, vy), heading };
            for _ in 0..5 {
                ship.advance(FlightControls { rotate, thrust });
                prop_assert!(ship.pos.x >= 0.0 && ship.pos.x < SCREEN_W);
                prop_assert!(ship.pos.y >= 0.0 && ship.pos.y < SCREEN_H);
            }
        }

        #[test]
        fn avatar_stays_on_screen(
            x in 0.0f32..=800.0,
            y in 0.0f32..=600.0,
            dx in -1i8..=1,
            dy in -1i8..=1,
        ) {
            let mut p = Vec2::new(x, y);
            for _ in 0..300 {
                p = walk(p, WalkControls { dx, dy });
                prop_assert!(p.x >= 0.0 && p.x <= SCREEN_W);
                prop_assert!(p.y >= 0.0 && p.y <= SCREEN_H);
            }
        }
    }
}
