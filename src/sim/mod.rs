//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded streams only, freshly seeded per sector
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{ShipCollision, circles_overlap, collect_orbs, ship_collision};
pub use generator::{
    DeterministicStream, coordinate_stream, generate_orbs, generate_system, has_star, pick_resource,
    seed,
};
pub use physics::{FlightControls, WalkControls, walk};
pub use state::{
    Coord, Feature, Inventory, Mode, Planet, PlanetKind, ResourceKind, ResourceOrb, Session,
    ShipState, StarKind, StarSystem, SurfaceState,
};
pub use tick::{GameEvent, TickReport, tick};
