//! Per-frame simulation tick
//!
//! The mode state machine: discrete commands are applied in arrival order,
//! then held controls drive the physics of whichever mode is active.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{ShipCollision, collect_orbs, ship_collision};
use super::generator::{generate_orbs, generate_system};
use super::physics::{FlightControls, WalkControls, walk};
use super::state::{Coord, Mode, ResourceKind, Session, ShipState, StarKind, SurfaceState};
use crate::input::{Command, TickInput};

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SectorChanged { coord: Coord },
    /// Explore pressed over an empty sector
    NoStarHere { coord: Coord },
    SystemEntered { coord: Coord, star: StarKind, planets: usize },
    SystemLeft,
    /// Ship flew into the star; the loop shows an explosion here
    ShipDestroyed { position: Vec2 },
    PlanetReached { index: usize },
    Landed { index: usize, orbs: usize },
    SurfaceLeft { collected: usize, total: usize },
    OrbCollected { resource: ResourceKind },
    AllOrbsCollected,
    InventoryOpened { from: Mode },
    InventoryClosed { to: Mode },
    QuitRequested,
}

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// Session should end now
    pub fn quit(&self) -> bool {
        self.events.contains(&GameEvent::QuitRequested)
    }

    /// Where the ship blew up this tick, if it did
    pub fn explosion(&self) -> Option<Vec2> {
        self.events.iter().find_map(|e| match e {
            GameEvent::ShipDestroyed { position } => Some(*position),
            _ => None,
        })
    }
}

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput) -> TickReport {
    let mut events = Vec::new();
    session.time_ticks += 1;

    for &command in &input.commands {
        if command == Command::Quit {
            log::info!("Quit requested in {} mode", session.mode);
            events.push(GameEvent::QuitRequested);
            return TickReport { events };
        }
        apply_command(session, command, &mut events);
    }

    match session.mode {
        Mode::System => fly(session, input.flight, &mut events),
        Mode::Surface => explore_surface(session, input.walk, &mut events),
        Mode::Map | Mode::PlanetInfo | Mode::Inventory => {}
    }

    TickReport { events }
}

fn apply_command(session: &mut Session, command: Command, events: &mut Vec<GameEvent>) {
    if command == Command::Inventory {
        if session.mode != Mode::Inventory {
            open_inventory(session, events);
        }
        return;
    }

    match (session.mode, command) {
        (Mode::Inventory, Command::Back) => close_inventory(session, events),
        (Mode::Map, Command::Move { dx, dy }) => move_sector(session, dx, dy, events),
        (Mode::Map, Command::Explore) => enter_system(session, events),
        (Mode::System, Command::Back) => leave_system(session, events),
        (Mode::PlanetInfo, Command::Back) => leave_planet_info(session),
        (Mode::PlanetInfo, Command::Land) => land(session, events),
        (Mode::Surface, Command::Back) => leave_surface(session, events),
        // Not bound in this mode
        _ => {}
    }
}

fn open_inventory(session: &mut Session, events: &mut Vec<GameEvent>) {
    let from = session.mode;
    session.previous_mode = Some(from);
    session.mode = Mode::Inventory;
    log::debug!("Inventory opened from {} mode", from);
    events.push(GameEvent::InventoryOpened { from });
}

fn close_inventory(session: &mut Session, events: &mut Vec<GameEvent>) {
    let Some(to) = session.previous_mode.take() else {
        unreachable!("inventory overlay has no mode to return to");
    };
    session.mode = to;
    log::debug!("Inventory closed, back to {} mode", to);
    events.push(GameEvent::InventoryClosed { to });
}

fn move_sector(session: &mut Session, dx: i64, dy: i64, events: &mut Vec<GameEvent>) {
    if dx == 0 && dy == 0 {
        return;
    }
    session.coord = session.coord.offset(dx, dy);
    log::trace!("Sector {}", session.coord);
    events.push(GameEvent::SectorChanged {
        coord: session.coord,
    });
}

fn enter_system(session: &mut Session, events: &mut Vec<GameEvent>) {
    let coord = session.coord;
    let Some(system) = generate_system(coord, session.star_chance) else {
        log::debug!("No star at sector {}", coord);
        events.push(GameEvent::NoStarHere { coord });
        return;
    };

    log::info!(
        "Entering {} system at {} with {} planet(s)",
        system.star.name(),
        coord,
        system.planets.len()
    );
    events.push(GameEvent::SystemEntered {
        coord,
        star: system.star,
        planets: system.planets.len(),
    });
    session.current_system = Some(system);
    session.selected_planet = None;
    session.ship = ShipState::default();
    session.mode = Mode::System;
}

fn leave_system(session: &mut Session, events: &mut Vec<GameEvent>) {
    session.current_system = None;
    session.selected_planet = None;
    session.mode = Mode::Map;
    log::info!("Back on the galaxy map at {}", session.coord);
    events.push(GameEvent::SystemLeft);
}

fn leave_planet_info(session: &mut Session) {
    session.ship = ShipState::default();
    session.selected_planet = None;
    session.mode = Mode::System;
}

fn land(session: &mut Session, events: &mut Vec<GameEvent>) {
    let (index, planet) = session.selected();
    let kind = planet.kind;
    let coord = session.system().coord;

    let orbs = generate_orbs(coord, index, kind);
    log::info!(
        "Landed on planet {} ({}) with {} mineral(s)",
        index + 1,
        kind.name(),
        orbs.len()
    );
    events.push(GameEvent::Landed {
        index,
        orbs: orbs.len(),
    });
    session.surface = Some(SurfaceState::new(orbs));
    session.mode = Mode::Surface;
}

fn leave_surface(session: &mut Session, events: &mut Vec<GameEvent>) {
    if let Some(surface) = session.surface.take() {
        events.push(GameEvent::SurfaceLeft {
            collected: surface.collected,
            total: surface.total,
        });
    }
    session.selected_planet = None;
    session.mode = Mode::System;
}

fn fly(session: &mut Session, controls: FlightControls, events: &mut Vec<GameEvent>) {
    session.ship.advance(controls);

    match ship_collision(session.ship.pos, session.system()) {
        Some(ShipCollision::Star) => {
            let position = session.ship.pos;
            log::info!("Ship destroyed by the star at {}", session.system().coord);
            events.push(GameEvent::ShipDestroyed { position });
            leave_system(session, events);
        }
        Some(ShipCollision::Planet(index)) => {
            session.selected_planet = Some(index);
            session.mode = Mode::PlanetInfo;
            log::debug!("Reached planet {}", index + 1);
            events.push(GameEvent::PlanetReached { index });
        }
        None => {}
    }
}

fn explore_surface(session: &mut Session, controls: WalkControls, events: &mut Vec<GameEvent>) {
    let Some(surface) = session.surface.as_mut() else {
        unreachable!("surface mode without surface state");
    };

    surface.avatar = walk(surface.avatar, controls);
    let was_complete = surface.all_collected();
    let picked = collect_orbs(surface, &mut session.inventory);

    for resource in picked {
        log::debug!("Collected {}", resource.name());
        events.push(GameEvent::OrbCollected { resource });
    }
    if !was_complete && surface.all_collected() {
        log::info!("All {} minerals collected", surface.total);
        events.push(GameEvent::AllOrbsCollected);
    }
}
