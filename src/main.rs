//! Galaxy Explorer entry point
//!
//! Runs a scripted headless tour through the session loop. A windowed
//! front end plugs in by implementing `presenter::Presenter`.

use std::path::PathBuf;

use galaxy_explorer::input::Key;
use galaxy_explorer::presenter::{Script, ScriptedPresenter};
use galaxy_explorer::sim::{Coord, has_star};
use galaxy_explorer::{Settings, run};

/// How far east to search for a star before giving up
const SEARCH_RANGE: i64 = 1000;

fn main() {
    env_logger::init();
    log::info!("Galaxy Explorer (headless) starting...");

    let settings = Settings::load(std::env::args_os().nth(1).map(PathBuf::from));
    let mut presenter = ScriptedPresenter::new(tour(&settings));
    let summary = run(&mut presenter, &settings);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => log::info!("Summary:\n{json}"),
        Err(e) => log::warn!("Failed to serialize summary: {e}"),
    }
    for (resource, count) in summary.inventory.iter() {
        log::info!("{:>10}: {}", resource.name(), count);
    }
}

/// Hunt east for a star, fly in, try to land and walk, then head home.
/// Keys that do not apply to the mode reached are ignored by the sim.
fn tour(settings: &Settings) -> Script {
    let steps = (1..=SEARCH_RANGE).find(|&x| has_star(Coord::new(x, 0), settings.star_chance));
    let script = match steps {
        Some(steps) => {
            log::info!("Nearest star east is {steps} sector(s) away");
            Script::new().taps(Key::Numpad6, steps as usize)
        }
        None => {
            log::warn!("No star within {SEARCH_RANGE} sectors east");
            Script::new()
        }
    };

    script
        .tap(Key::E)
        .idle(30)
        .tap(Key::I)
        .idle(10)
        .tap(Key::B)
        .hold(&[Key::Up], 90)
        .idle(60)
        .tap(Key::L)
        .hold(&[Key::Right], 60)
        .hold(&[Key::Up, Key::Left], 60)
        .hold(&[Key::Down], 60)
        .tap(Key::I)
        .idle(10)
        .tap(Key::B)
        .tap(Key::B)
        .tap(Key::B)
        .idle(30)
        .tap(Key::X)
}
