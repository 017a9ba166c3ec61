//! Frame loop
//!
//! One iteration per frame: poll the presenter, tick the simulation, present
//! the resulting scene, then sleep out the rest of the frame budget.

use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::input::TickInput;
use crate::presenter::{Presenter, Scene};
use crate::settings::Settings;
use crate::sim::{Coord, GameEvent, Inventory, Mode, Session, tick};

/// What a finished session looked like
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Frames presented
    pub frames: u64,
    pub final_mode: Mode,
    pub coord: Coord,
    pub inventory: Inventory,
    pub systems_entered: u32,
    pub explosions: u32,
    /// Ended by quit key or window close rather than the frame cap
    pub quit_requested: bool,
}

/// Run a fresh session until quit or `settings.max_frames`
pub fn run<P: Presenter>(presenter: &mut P, settings: &Settings) -> SessionSummary {
    let mut session = Session::new(settings.star_chance);
    log::info!(
        "Starting at sector {} (star chance {})",
        session.coord,
        session.star_chance
    );
    run_session(&mut session, presenter, settings)
}

/// Drive an existing session
pub fn run_session<P: Presenter>(
    session: &mut Session,
    presenter: &mut P,
    settings: &Settings,
) -> SessionSummary {
    let frame_budget = settings.frame_duration();
    let mut frames = 0;
    let mut systems_entered = 0;
    let mut explosions = 0;
    let mut quit_requested = false;

    loop {
        if settings.max_frames.is_some_and(|max| frames >= max) {
            log::info!("Frame limit {} reached", frames);
            break;
        }
        let frame_start = Instant::now();

        let keyboard = presenter.poll_input();
        let report = tick(session, &TickInput::from(&keyboard));

        systems_entered += report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::SystemEntered { .. }))
            .count() as u32;

        if report.quit() {
            quit_requested = true;
            break;
        }

        if let Some(position) = report.explosion() {
            explosions += 1;
            presenter.present_explosion(position);
            pause(settings.explosion_pause());
            presenter.discard_pending_input();
        }

        let scene = Scene::build(session);
        if settings.log_scenes {
            match serde_json::to_string(&scene) {
                Ok(json) => log::trace!("frame {}: {}", frames, json),
                Err(e) => log::warn!("Failed to serialize scene: {e}"),
            }
        }
        presenter.present(&scene);
        frames += 1;

        if let Some(budget) = frame_budget {
            pause(budget.saturating_sub(frame_start.elapsed()));
        }
    }

    let summary = SessionSummary {
        frames,
        final_mode: session.mode,
        coord: session.coord,
        inventory: session.inventory.clone(),
        systems_entered,
        explosions,
        quit_requested,
    };
    log::info!(
        "Session over after {} frame(s) in {} mode at {}",
        summary.frames,
        summary.final_mode,
        summary.coord
    );
    summary
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::DEFAULT_STAR_CHANCE;
    use crate::input::Key;
    use crate::presenter::{Script, ScriptedPresenter};
    use crate::screen_center;
    use crate::sim::{
        Planet, PlanetKind, ShipState, StarKind, StarSystem, generate_system, ship_collision,
    };

    /// Steps east from the origin to the first star whose planets leave the
    /// spawn point clear
    fn steps_to_star() -> i64 {
        (1..10_000)
            .find(|&x| {
                generate_system(Coord::new(x, 0), DEFAULT_STAR_CHANCE)
                    .is_some_and(|s| ship_collision(ShipState::default().pos, &s).is_none())
            })
            .unwrap()
    }

    #[test]
    fn test_empty_script_quits_immediately() {
        let mut presenter = ScriptedPresenter::new(Script::new());
        let summary = run(&mut presenter, &Settings::headless());
        assert!(summary.quit_requested);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.final_mode, Mode::Map);
        assert_eq!(presenter.frames_presented(), 0);
    }

    #[test]
    fn test_frame_cap_stops_session() {
        let settings = Settings {
            max_frames: Some(10),
            ..Settings::headless()
        };
        let mut presenter = ScriptedPresenter::new(Script::new().idle(100));
        let summary = run(&mut presenter, &settings);
        assert!(!summary.quit_requested);
        assert_eq!(summary.frames, 10);
        assert_eq!(presenter.frames_presented(), 10);
        assert_eq!(presenter.remaining(), 90);
    }

    #[test]
    fn test_quit_key_ends_session() {
        let script = Script::new().tap(Key::Numpad2).tap(Key::X).idle(10);
        let mut presenter = ScriptedPresenter::new(script);
        let summary = run(&mut presenter, &Settings::headless());
        assert!(summary.quit_requested);
        assert_eq!(summary.coord, Coord::new(0, 1));
        // Numpad2 press + release, then the X frame is not presented
        assert_eq!(summary.frames, 2);
    }

    #[test]
    fn test_scripted_tour_through_modes() {
        let steps = steps_to_star();
        let script = Script::new()
            .taps(Key::Numpad6, steps as usize)
            .tap(Key::E)
            .tap(Key::I)
            .tap(Key::B)
            .tap(Key::B)
            .close();
        let mut presenter = ScriptedPresenter::new(script);
        let settings = Settings {
            log_scenes: true,
            ..Settings::headless()
        };
        let summary = run(&mut presenter, &settings);

        assert!(summary.quit_requested);
        assert_eq!(summary.coord, Coord::new(steps, 0));
        assert_eq!(summary.systems_entered, 1);
        assert_eq!(summary.final_mode, Mode::Map);
        assert_eq!(
            presenter.mode_history(),
            &[Mode::Map, Mode::System, Mode::Inventory, Mode::System, Mode::Map]
        );
    }

    #[test]
    fn test_star_collision_shows_explosion() {
        let mut session = Session::default();
        session.coord = Coord::new(4, 4);
        session.current_system = Some(StarSystem {
            coord: session.coord,
            star: StarKind::RedDwarf,
            planets: vec![Planet {
                kind: PlanetKind::IceWorld,
                features: Vec::new(),
                orbit_radius: 200.0,
                angle: 0.0,
                body_radius: 12.0,
            }],
        });
        session.mode = Mode::System;
        session.ship.pos = screen_center() + Vec2::new(0.0, 60.0);
        session.ship.vel = Vec2::new(0.0, -5.0);

        let mut presenter = ScriptedPresenter::new(Script::new().idle(20));
        let summary = run_session(&mut session, &mut presenter, &Settings::headless());

        assert_eq!(summary.explosions, 1);
        assert_eq!(presenter.explosions().len(), 1);
        assert!(presenter.explosions()[0].distance(screen_center()) < 40.0);
        assert_eq!(summary.final_mode, Mode::Map);
        assert_eq!(presenter.mode_history(), &[Mode::System, Mode::Map]);
        assert!(session.current_system.is_none());
    }
}
