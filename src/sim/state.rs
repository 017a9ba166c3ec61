//! Session state and core simulation types
//!
//! Everything the mode state machine owns lives on [`Session`]. There are no
//! globals: the loop hands the session to `tick` and the scene builder by
//! reference.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{polar_offset, screen_center};

/// Integer galaxy sector coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Sector reached by stepping `(dx, dy)`
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Star classes, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarKind {
    RedDwarf,
    YellowDwarf,
    BlueGiant,
    NeutronStar,
    WhiteDwarf,
}

impl StarKind {
    pub const ALL: [StarKind; 5] = [
        StarKind::RedDwarf,
        StarKind::YellowDwarf,
        StarKind::BlueGiant,
        StarKind::NeutronStar,
        StarKind::WhiteDwarf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StarKind::RedDwarf => "Red Dwarf",
            StarKind::YellowDwarf => "Yellow Dwarf",
            StarKind::BlueGiant => "Blue Giant",
            StarKind::NeutronStar => "Neutron Star",
            StarKind::WhiteDwarf => "White Dwarf",
        }
    }
}

/// Planet classes, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetKind {
    Rocky,
    GasGiant,
    IceWorld,
    OceanWorld,
    Desert,
}

impl PlanetKind {
    pub const ALL: [PlanetKind; 5] = [
        PlanetKind::Rocky,
        PlanetKind::GasGiant,
        PlanetKind::IceWorld,
        PlanetKind::OceanWorld,
        PlanetKind::Desert,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlanetKind::Rocky => "Rocky",
            PlanetKind::GasGiant => "Gas Giant",
            PlanetKind::IceWorld => "Ice World",
            PlanetKind::OceanWorld => "Ocean World",
            PlanetKind::Desert => "Desert",
        }
    }

    /// Relative resource abundance, indexed like [`ResourceKind::ALL`]
    pub fn resource_weights(&self) -> [f64; 5] {
        match self {
            PlanetKind::Rocky => [0.30, 0.05, 0.05, 0.50, 0.10],
            PlanetKind::GasGiant => [0.05, 0.01, 0.70, 0.10, 0.14],
            PlanetKind::IceWorld => [0.10, 0.02, 0.80, 0.05, 0.03],
            PlanetKind::OceanWorld => [0.05, 0.01, 0.85, 0.05, 0.04],
            PlanetKind::Desert => [0.20, 0.10, 0.05, 0.50, 0.15],
        }
    }
}

/// Notable planet features (a planet has at most two, never repeated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Rings,
    Life,
    Volcanic,
    HighGravity,
    MagneticStorms,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Rings,
        Feature::Life,
        Feature::Volcanic,
        Feature::HighGravity,
        Feature::MagneticStorms,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::Rings => "Rings",
            Feature::Life => "Life",
            Feature::Volcanic => "Volcanic",
            Feature::HighGravity => "High Gravity",
            Feature::MagneticStorms => "Magnetic Storms",
        }
    }
}

/// Collectible surface resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Iron,
    Gold,
    Water,
    Silicon,
    Uranium,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Iron,
        ResourceKind::Gold,
        ResourceKind::Water,
        ResourceKind::Silicon,
        ResourceKind::Uranium,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Iron => "Iron",
            ResourceKind::Gold => "Gold",
            ResourceKind::Water => "Water",
            ResourceKind::Silicon => "Silicon",
            ResourceKind::Uranium => "Uranium",
        }
    }

    /// Position in [`ResourceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A planet inside a star system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub kind: PlanetKind,
    /// 0-2 distinct features
    pub features: Vec<Feature>,
    pub orbit_radius: f32,
    /// Fixed orbital angle (radians); planets do not move
    pub angle: f32,
    pub body_radius: f32,
}

impl Planet {
    /// Planet center given the star's position
    pub fn position(&self, star: Vec2) -> Vec2 {
        polar_offset(star, self.orbit_radius, self.angle)
    }
}

/// A generated star system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub coord: Coord,
    pub star: StarKind,
    pub planets: Vec<Planet>,
}

/// A collectible resource on a planet surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceOrb {
    pub pos: Vec2,
    pub resource: ResourceKind,
}

/// Session-wide resource counts (never reset)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u32; 5],
}

impl Inventory {
    pub fn add(&mut self, resource: ResourceKind) {
        let slot = &mut self.counts[resource.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn count(&self, resource: ResourceKind) -> u32 {
        self.counts[resource.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// (resource, count) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.iter().map(|&r| (r, self.count(r)))
    }
}

/// Ship flight state inside a system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipState {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (screen space, -π/2 points up)
    pub heading: f32,
}

impl Default for ShipState {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SCREEN_W / 2.0, SCREEN_H - SHIP_SPAWN_MARGIN),
            vel: Vec2::ZERO,
            heading: -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Planet surface exploration state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceState {
    pub avatar: Vec2,
    pub collected: usize,
    pub total: usize,
    pub orbs: Vec<ResourceOrb>,
}

impl SurfaceState {
    /// Fresh surface with the avatar in the middle of the screen
    pub fn new(orbs: Vec<ResourceOrb>) -> Self {
        Self {
            avatar: screen_center(),
            collected: 0,
            total: orbs.len(),
            orbs,
        }
    }

    pub fn all_collected(&self) -> bool {
        self.collected >= self.total
    }
}

/// Interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Galaxy sector map
    Map,
    /// Flying inside a star system
    System,
    /// Scanning a planet the ship reached
    PlanetInfo,
    /// Walking a planet surface collecting orbs
    Surface,
    /// Inventory overlay (returns to the mode it was opened from)
    Inventory,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Map => "Map",
            Mode::System => "System",
            Mode::PlanetInfo => "PlanetInfo",
            Mode::Surface => "Surface",
            Mode::Inventory => "Inventory",
        };
        f.write_str(name)
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Current galaxy sector
    pub coord: Coord,
    /// Active mode
    pub mode: Mode,
    /// Mode to restore when the inventory overlay closes
    pub previous_mode: Option<Mode>,
    /// System the player is inside (System, PlanetInfo, Surface)
    pub current_system: Option<StarSystem>,
    /// Planet index for PlanetInfo and Surface
    pub selected_planet: Option<usize>,
    pub ship: ShipState,
    /// Present only while landed
    pub surface: Option<SurfaceState>,
    pub inventory: Inventory,
    /// Probability that a sector holds a star
    pub star_chance: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Session {
    pub fn new(star_chance: f64) -> Self {
        Self {
            coord: Coord::default(),
            mode: Mode::Map,
            previous_mode: None,
            current_system: None,
            selected_planet: None,
            ship: ShipState::default(),
            surface: None,
            inventory: Inventory::default(),
            star_chance,
            time_ticks: 0,
        }
    }

    /// The system the player is inside.
    ///
    /// Panics if there is none: System, PlanetInfo and Surface are only
    /// reachable with a generated system.
    pub fn system(&self) -> &StarSystem {
        match &self.current_system {
            Some(system) => system,
            None => unreachable!("{} mode requires a current system", self.mode),
        }
    }

    /// Index and data of the selected planet.
    ///
    /// Panics if no planet is selected or the index is out of range.
    pub fn selected(&self) -> (usize, &Planet) {
        let system = self.system();
        let Some(index) = self.selected_planet else {
            unreachable!("{} mode requires a selected planet", self.mode);
        };
        match system.planets.get(index) {
            Some(planet) => (index, planet),
            None => unreachable!(
                "planet {} out of range for system {} ({} planets)",
                index,
                system.coord,
                system.planets.len()
            ),
        }
    }

    /// Landed surface state.
    ///
    /// Panics when not landed.
    pub fn surface(&self) -> &SurfaceState {
        match &self.surface {
            Some(surface) => surface,
            None => unreachable!("{} mode requires surface state", self.mode),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_STAR_CHANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_on_map() {
        let session = Session::default();
        assert_eq!(session.mode, Mode::Map);
        assert_eq!(session.coord, Coord::new(0, 0));
        assert!(session.current_system.is_none());
        assert_eq!(session.inventory.total(), 0);
    }

    #[test]
    fn test_ship_spawn_points_up() {
        let ship = ShipState::default();
        assert_eq!(ship.pos, Vec2::new(400.0, 540.0));
        assert_eq!(ship.vel, Vec2::ZERO);
        assert!((ship.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_inventory_counts_per_resource() {
        let mut inv = Inventory::default();
        inv.add(ResourceKind::Gold);
        inv.add(ResourceKind::Gold);
        inv.add(ResourceKind::Water);
        assert_eq!(inv.count(ResourceKind::Gold), 2);
        assert_eq!(inv.count(ResourceKind::Water), 1);
        assert_eq!(inv.count(ResourceKind::Iron), 0);
        assert_eq!(inv.total(), 3);
        let names: Vec<_> = inv.iter().map(|(r, _)| r.name()).collect();
        assert_eq!(names, ["Iron", "Gold", "Water", "Silicon", "Uranium"]);
    }

    #[test]
    fn test_resource_index_matches_table_order() {
        for (i, r) in ResourceKind::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn test_surface_state_counts_orbs() {
        let orbs = vec![
            ResourceOrb {
                pos: Vec2::new(100.0, 100.0),
                resource: ResourceKind::Iron,
            };
            3
        ];
        let surface = SurfaceState::new(orbs);
        assert_eq!(surface.total, 3);
        assert_eq!(surface.collected, 0);
        assert_eq!(surface.avatar, Vec2::new(400.0, 300.0));
        assert!(!surface.all_collected());
    }

    #[test]
    #[should_panic(expected = "requires a current system")]
    fn test_system_without_current_system_panics() {
        let mut session = Session::default();
        session.mode = Mode::PlanetInfo;
        let _ = session.system();
    }

    #[test]
    fn test_planet_position_on_orbit() {
        let planet = Planet {
            kind: PlanetKind::Rocky,
            features: Vec::new(),
            orbit_radius: 80.0,
            angle: std::f32::consts::FRAC_PI_2,
            body_radius: 12.0,
        };
        let pos = planet.position(Vec2::new(400.0, 300.0));
        assert!((pos - Vec2::new(400.0, 380.0)).length() < 1e-3);
    }
}
