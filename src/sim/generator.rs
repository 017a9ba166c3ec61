//! Deterministic galaxy content generation
//!
//! Every function here is a pure function of its arguments. Each call seeds a
//! fresh stream from the sector hash, so asking twice for the same sector
//! always yields the same star, planets and orbs.

use glam::Vec2;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Coord, Feature, Planet, PlanetKind, ResourceKind, ResourceOrb, StarKind, StarSystem};
use crate::consts::*;

/// Seeded pseudo-random stream used for all generation
pub type DeterministicStream = Pcg32;

/// Spatial hash primes
const HASH_X: i64 = 73_856_093;
const HASH_Y: i64 = 19_349_663;

/// Sector seed: `x * 73856093 XOR y * 19349663` (wrapping 64-bit)
pub fn seed(coord: Coord) -> i64 {
    coord.x.wrapping_mul(HASH_X) ^ coord.y.wrapping_mul(HASH_Y)
}

/// Fresh stream for an arbitrary seed
pub fn seeded_stream(seed: i64) -> DeterministicStream {
    Pcg32::seed_from_u64(seed as u64)
}

/// Fresh stream for a sector
pub fn coordinate_stream(coord: Coord) -> DeterministicStream {
    seeded_stream(seed(coord))
}

/// Whether a sector contains a star
pub fn has_star(coord: Coord, chance: f64) -> bool {
    coordinate_stream(coord).random::<f64>() < chance
}

/// Generate the star system at `coord`, or `None` for an empty sector.
///
/// Draw order: star kind, planet count, then per planet (inner to outer):
/// kind, feature count, features, angle.
pub fn generate_system(coord: Coord, chance: f64) -> Option<StarSystem> {
    if !has_star(coord, chance) {
        return None;
    }

    let mut rng = coordinate_stream(coord);
    let star = StarKind::ALL[rng.random_range(0..StarKind::ALL.len())];
    let planet_count = rng.random_range(1..=MAX_PLANETS);

    let planets = (0..planet_count)
        .map(|i| {
            let kind = PlanetKind::ALL[rng.random_range(0..PlanetKind::ALL.len())];
            let feature_count = rng.random_range(0..=MAX_FEATURES);
            let features = index::sample(&mut rng, Feature::ALL.len(), feature_count)
                .into_iter()
                .map(|idx| Feature::ALL[idx])
                .collect();
            let angle = rng.random_range(0.0..std::f32::consts::TAU);

            Planet {
                kind,
                features,
                orbit_radius: FIRST_ORBIT + i as f32 * ORBIT_SPACING,
                angle,
                body_radius: if i == 0 {
                    INNER_PLANET_RADIUS
                } else {
                    OUTER_PLANET_RADIUS
                },
            }
        })
        .collect();

    Some(StarSystem {
        coord,
        star,
        planets,
    })
}

/// Weighted resource draw for a planet kind
pub fn pick_resource<R: Rng + ?Sized>(kind: PlanetKind, rng: &mut R) -> ResourceKind {
    match WeightedIndex::new(kind.resource_weights()) {
        Ok(dist) => ResourceKind::ALL[dist.sample(rng)],
        Err(err) => unreachable!("resource table for {} is invalid: {}", kind.name(), err),
    }
}

/// Surface seed for a planet: sector seed XOR planet index
pub fn orb_seed(coord: Coord, planet_index: usize) -> i64 {
    seed(coord) ^ planet_index as i64
}

/// Resource orbs for a landing. Same planet, same orbs.
pub fn generate_orbs(coord: Coord, planet_index: usize, kind: PlanetKind) -> Vec<ResourceOrb> {
    let mut rng = seeded_stream(orb_seed(coord, planet_index));
    let max_x = SCREEN_W as i32 - ORB_MARGIN_X;
    let max_y = SCREEN_H as i32 - ORB_MARGIN_BOTTOM;

    (0..ORBS_PER_LANDING)
        .map(|_| {
            let x = rng.random_range(ORB_MARGIN_X..=max_x);
            let y = rng.random_range(ORB_MARGIN_TOP..=max_y);
            let resource = pick_resource(kind, &mut rng);
            ResourceOrb {
                pos: Vec2::new(x as f32, y as f32),
                resource,
            }
        })
        .collect()
}
