//! Headless presenter driven by a key script
//!
//! Used by the native demo binary and by loop tests. Each scripted frame
//! lists the keys held during that frame; presses are derived from changes
//! between frames, the way a real keyboard reports them.

use std::collections::VecDeque;

use glam::Vec2;

use super::{Presenter, Scene, explosion_flash};
use crate::input::{EdgeDetector, Key, KeyboardSnapshot};
use crate::sim::Mode;

#[derive(Debug, Clone, Default)]
struct Frame {
    held: Vec<Key>,
    close: bool,
}

/// Builder for a sequence of keyboard frames
#[derive(Debug, Clone, Default)]
pub struct Script {
    frames: VecDeque<Frame>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press and release a key (two frames)
    pub fn tap(self, key: Key) -> Self {
        self.hold(&[key], 1).idle(1)
    }

    /// Tap a key `times` times
    pub fn taps(mut self, key: Key, times: usize) -> Self {
        for _ in 0..times {
            self = self.tap(key);
        }
        self
    }

    /// Hold `keys` for `frames` frames
    pub fn hold(mut self, keys: &[Key], frames: usize) -> Self {
        for _ in 0..frames {
            self.frames.push_back(Frame {
                held: keys.to_vec(),
                close: false,
            });
        }
        self
    }

    /// Frames with nothing held
    pub fn idle(self, frames: usize) -> Self {
        self.hold(&[], frames)
    }

    /// Window close request
    pub fn close(mut self) -> Self {
        self.frames.push_back(Frame {
            held: Vec::new(),
            close: true,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Records what the loop presented; requests close when the script runs out
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    script: VecDeque<Frame>,
    edges: EdgeDetector,
    frames_presented: u64,
    explosions: Vec<Vec2>,
    modes: Vec<Mode>,
    last_scene: Option<Scene>,
}

impl ScriptedPresenter {
    pub fn new(script: Script) -> Self {
        Self {
            script: script.frames,
            ..Default::default()
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Explosion flashes shown, in order
    pub fn explosions(&self) -> &[Vec2] {
        &self.explosions
    }

    /// Modes presented, with consecutive repeats collapsed
    pub fn mode_history(&self) -> &[Mode] {
        &self.modes
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    /// Scripted frames not yet polled
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Presenter for ScriptedPresenter {
    fn poll_input(&mut self) -> KeyboardSnapshot {
        let Some(frame) = self.script.pop_front() else {
            log::debug!("Script finished, closing");
            return KeyboardSnapshot {
                close_requested: true,
                ..Default::default()
            };
        };

        let held = frame.held.iter().copied().collect();
        let mut snapshot = self.edges.snapshot(held, &frame.held);
        snapshot.close_requested = frame.close;
        snapshot
    }

    fn present(&mut self, scene: &Scene) {
        self.frames_presented += 1;
        if self.modes.last() != Some(&scene.mode) {
            self.modes.push(scene.mode);
        }
        self.last_scene = Some(scene.clone());
    }

    fn present_explosion(&mut self, position: Vec2) {
        log::debug!("Explosion at ({:.1}, {:.1})", position.x, position.y);
        // Drawn over whatever was last on screen
        if let Some(scene) = self.last_scene.as_mut() {
            scene.shapes.push(explosion_flash(position));
        }
        self.explosions.push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Session;

    #[test]
    fn test_tap_is_press_then_release() {
        let script = Script::new().tap(Key::E);
        assert_eq!(script.len(), 2);

        let mut presenter = ScriptedPresenter::new(script);
        let first = presenter.poll_input();
        assert_eq!(first.pressed, vec![Key::E]);
        let second = presenter.poll_input();
        assert!(second.pressed.is_empty());
        assert!(second.held.is_empty());
        assert!(!second.close_requested);
    }

    #[test]
    fn test_hold_reports_single_press() {
        let mut presenter = ScriptedPresenter::new(Script::new().hold(&[Key::Up, Key::L], 3));
        assert_eq!(presenter.poll_input().pressed, vec![Key::Up, Key::L]);
        for _ in 0..2 {
            let snap = presenter.poll_input();
            assert!(snap.pressed.is_empty());
            assert!(snap.held.contains(&Key::Up));
        }
    }

    #[test]
    fn test_exhausted_script_requests_close() {
        let mut presenter = ScriptedPresenter::new(Script::new());
        assert!(presenter.poll_input().close_requested);
        let mut presenter = ScriptedPresenter::new(Script::new().close());
        assert!(presenter.poll_input().close_requested);
    }

    #[test]
    fn test_explosion_drawn_over_last_frame() {
        let mut presenter = ScriptedPresenter::new(Script::new());
        presenter.present(&Scene::build(&Session::default()));
        let shapes_before = presenter.last_scene().unwrap().shapes.len();

        let at = Vec2::new(410.0, 300.0);
        presenter.present_explosion(at);
        let scene = presenter.last_scene().unwrap();
        assert_eq!(scene.shapes.len(), shapes_before + 1);
        assert_eq!(scene.shapes.last(), Some(&explosion_flash(at)));
        assert_eq!(presenter.explosions(), &[at]);
        assert_eq!(presenter.frames_presented(), 1);
    }

    #[test]
    fn test_taps_repeat() {
        let script = Script::new().taps(Key::Numpad6, 3);
        assert_eq!(script.len(), 6);
        let mut presenter = ScriptedPresenter::new(script);
        let presses: usize = (0..6).map(|_| presenter.poll_input().pressed.len()).sum();
        assert_eq!(presses, 3);
        assert_eq!(presenter.remaining(), 0);
    }
}
