//! Per-mode scene descriptions
//!
//! A [`Scene`] is the renderable description of the active mode: a background
//! color, 2D primitives in screen pixels and short text labels. Presentation
//! surfaces draw it however they like.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::{Mode, Session};
use crate::sim::{Coord, has_star};
use crate::{polar_offset, screen_center};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};
    use crate::sim::state::{PlanetKind, StarKind};

    pub const MAP_BACKGROUND: Color = rgb(10, 10, 30);
    pub const GRID_LINE: Color = rgb(40, 40, 60);
    pub const MAP_STAR: Color = rgb(255, 255, 100);
    pub const SYSTEM_BACKGROUND: Color = rgb(0, 0, 20);
    pub const ORBIT: Color = rgb(60, 60, 80);
    pub const SCAN_BACKGROUND: Color = rgb(20, 20, 30);
    pub const INVENTORY_BACKGROUND: Color = rgb(20, 20, 20);
    pub const ORB: Color = rgb(200, 200, 50);
    pub const EXPLOSION: Color = rgb(255, 80, 80);
    pub const WHITE: Color = rgb(255, 255, 255);
    pub const HELP_TEXT: Color = rgb(200, 200, 200);
    pub const INFO_TEXT: Color = rgb(220, 220, 220);

    pub fn star(kind: StarKind) -> Color {
        match kind {
            StarKind::RedDwarf => rgb(180, 50, 50),
            StarKind::YellowDwarf => rgb(240, 240, 100),
            StarKind::BlueGiant => rgb(100, 150, 255),
            StarKind::NeutronStar => rgb(200, 180, 255),
            StarKind::WhiteDwarf => rgb(255, 255, 255),
        }
    }

    pub fn planet(kind: PlanetKind) -> Color {
        match kind {
            PlanetKind::Rocky => rgb(100, 100, 100),
            PlanetKind::GasGiant => rgb(255, 150, 50),
            PlanetKind::IceWorld => rgb(150, 200, 255),
            PlanetKind::OceanWorld => rgb(50, 100, 255),
            PlanetKind::Desert => rgb(210, 180, 100),
        }
    }
}

/// Line height for stacked labels
const LINE_HEIGHT: f32 = 23.0;
/// Explosion flash radius
const EXPLOSION_RADIUS: f32 = 25.0;

/// A drawable primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled circle
    Circle { center: Vec2, radius: f32, color: Color },
    /// One-pixel circle outline
    Ring { center: Vec2, radius: f32, color: Color },
    /// One-pixel rectangle outline
    RectOutline { min: Vec2, size: Vec2, color: Color },
    /// Filled polygon
    Polygon { points: Vec<Vec2>, color: Color },
}

/// A line of text anchored at its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
}

impl Label {
    fn new(text: impl Into<String>, x: f32, y: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            pos: Vec2::new(x, y),
            color,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub mode: Mode,
    pub background: Color,
    pub shapes: Vec<Shape>,
    pub labels: Vec<Label>,
}

impl Scene {
    /// Describe the active mode
    pub fn build(session: &Session) -> Self {
        match session.mode {
            Mode::Map => map_scene(session),
            Mode::System => system_scene(session),
            Mode::PlanetInfo => planet_info_scene(session),
            Mode::Surface => surface_scene(session),
            Mode::Inventory => inventory_scene(session),
        }
    }

    /// Label texts in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.text.as_str())
    }

    fn new(mode: Mode, background: Color) -> Self {
        Self {
            mode,
            background,
            shapes: Vec::new(),
            labels: Vec::new(),
        }
    }
}

/// Triangle for the ship: tip ahead of `pos`, wings swept back
pub fn ship_triangle(pos: Vec2, heading: f32) -> Vec<Vec2> {
    vec![
        polar_offset(pos, 15.0, heading),
        polar_offset(pos, 12.0, heading + 2.5),
        polar_offset(pos, 12.0, heading - 2.5),
    ]
}

/// Red flash drawn over the last frame when the ship hits a star
pub fn explosion_flash(position: Vec2) -> Shape {
    Shape::Circle {
        center: position,
        radius: EXPLOSION_RADIUS,
        color: colors::EXPLOSION,
    }
}

fn map_scene(session: &Session) -> Scene {
    let mut scene = Scene::new(Mode::Map, colors::MAP_BACKGROUND);
    let half_w = GRID_W / 2;
    let half_h = GRID_H / 2;

    for gx in 0..GRID_W {
        for gy in 0..GRID_H {
            let min = Vec2::new(gx as f32 * CELL_SIZE, gy as f32 * CELL_SIZE);
            scene.shapes.push(Shape::RectOutline {
                min,
                size: Vec2::splat(CELL_SIZE),
                color: colors::GRID_LINE,
            });

            if has_star(sector_at_cell(session.coord, gx, gy), session.star_chance) {
                scene.shapes.push(Shape::Circle {
                    center: min + Vec2::splat(CELL_SIZE / 2.0),
                    radius: 5.0,
                    color: colors::MAP_STAR,
                });
            }
        }
    }

    // Player marker in the center cell
    let c = Vec2::new(
        half_w as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        half_h as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    );
    scene.shapes.push(Shape::Polygon {
        points: vec![
            c + Vec2::new(0.0, -12.0),
            c + Vec2::new(-8.0, 8.0),
            c + Vec2::new(8.0, 8.0),
        ],
        color: colors::WHITE,
    });

    scene.labels.push(Label::new(
        format!("Map Mode | Sector: {}", session.coord),
        10.0,
        10.0,
        colors::WHITE,
    ));
    scene.labels.push(Label::new(
        "Move: Numpad 1-9  |  Explore: E  |  Inventory: I  |  Quit: X",
        10.0,
        40.0,
        colors::HELP_TEXT,
    ));
    scene
}

fn system_scene(session: &Session) -> Scene {
    let system = session.system();
    let star = screen_center();
    let mut scene = Scene::new(Mode::System, colors::SYSTEM_BACKGROUND);

    for planet in &system.planets {
        scene.shapes.push(Shape::Ring {
            center: star,
            radius: planet.orbit_radius,
            color: colors::ORBIT,
        });
    }
    scene.shapes.push(Shape::Circle {
        center: star,
        radius: STAR_RADIUS,
        color: colors::star(system.star),
    });
    for planet in &system.planets {
        scene.shapes.push(Shape::Circle {
            center: planet.position(star),
            radius: planet.body_radius,
            color: colors::planet(planet.kind),
        });
    }
    scene.shapes.push(Shape::Polygon {
        points: ship_triangle(session.ship.pos, session.ship.heading),
        color: colors::WHITE,
    });

    scene.labels.push(Label::new(
        "System Mode (↑←→ to fly, B=back, I=inv)",
        10.0,
        10.0,
        colors::HELP_TEXT,
    ));
    scene.labels.push(Label::new(
        format!("Star: {}", system.star.name()),
        10.0,
        34.0,
        colors::WHITE,
    ));
    scene
}

fn planet_info_scene(session: &Session) -> Scene {
    let (index, planet) = session.selected();
    let mut scene = Scene::new(Mode::PlanetInfo, colors::SCAN_BACKGROUND);

    scene.shapes.push(Shape::Circle {
        center: screen_center() + Vec2::new(0.0, 40.0),
        radius: (planet.body_radius * 4.0).max(40.0),
        color: colors::planet(planet.kind),
    });

    let features = if planet.features.is_empty() {
        "None".to_string()
    } else {
        planet
            .features
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    scene.labels.push(Label::new(
        format!("Planet {} Info (L=land, B=back, I=inv)", index + 1),
        10.0,
        10.0,
        colors::WHITE,
    ));
    scene.labels.push(Label::new(
        format!("Type: {}", planet.kind.name()),
        10.0,
        50.0,
        colors::INFO_TEXT,
    ));
    scene.labels.push(Label::new(
        format!("Features: {features}"),
        10.0,
        80.0,
        colors::INFO_TEXT,
    ));
    scene
}

fn surface_scene(session: &Session) -> Scene {
    let (_, planet) = session.selected();
    let surface = session.surface();
    let mut scene = Scene::new(Mode::Surface, colors::planet(planet.kind));

    for orb in &surface.orbs {
        scene.shapes.push(Shape::Circle {
            center: orb.pos,
            radius: ORB_RADIUS,
            color: colors::ORB,
        });
    }
    scene.shapes.push(Shape::Circle {
        center: surface.avatar,
        radius: AVATAR_RADIUS,
        color: colors::WHITE,
    });

    scene.labels.push(Label::new(
        format!(
            "Surface Mode | Minerals: {}/{}  B=back  I=inv",
            surface.collected, surface.total
        ),
        10.0,
        10.0,
        colors::WHITE,
    ));
    if surface.all_collected() {
        scene.labels.push(Label::new(
            "All minerals collected! Press B to exit.",
            10.0,
            40.0,
            colors::HELP_TEXT,
        ));
    }
    scene
}

fn inventory_scene(session: &Session) -> Scene {
    let mut scene = Scene::new(Mode::Inventory, colors::INVENTORY_BACKGROUND);
    scene
        .labels
        .push(Label::new("Inventory (B=back)", 10.0, 10.0, colors::WHITE));

    let mut y = 50.0;
    for (resource, count) in session.inventory.iter() {
        scene.labels.push(Label::new(
            format!("{}: {}", resource.name(), count),
            10.0,
            y,
            colors::HELP_TEXT,
        ));
        y += LINE_HEIGHT;
    }
    scene
}

/// Sector under a map grid cell, relative to the player's sector
pub fn sector_at_cell(center: Coord, gx: i64, gy: i64) -> Coord {
    center.offset(gx - GRID_W / 2, gy - GRID_H / 2)
}
