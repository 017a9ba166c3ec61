//! Presentation adapter seam
//!
//! Drawing, fonts and windowing live outside this crate. A [`Presenter`]
//! receives one [`Scene`] per frame and reports keyboard state back.

pub mod scene;
pub mod scripted;

pub use scene::{Color, Label, Scene, Shape, colors, explosion_flash, ship_triangle};
pub use scripted::{Script, ScriptedPresenter};

use glam::Vec2;

use crate::input::KeyboardSnapshot;

/// External presentation surface
pub trait Presenter {
    /// Keyboard state for the coming tick
    fn poll_input(&mut self) -> KeyboardSnapshot;

    /// Draw one frame
    fn present(&mut self, scene: &Scene);

    /// Draw the star-collision flash over the last frame. The loop holds
    /// this frame on screen for the explosion pause.
    fn present_explosion(&mut self, position: Vec2);

    /// Drop input that arrived while the loop was paused
    fn discard_pending_input(&mut self) {}
}
