//! Pointer input state
//!
//! Written by pointer events between frames, read by the next tick.
//! Last value wins; nothing is queued.

use glam::Vec2;

/// Latest pointer position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    /// Set once the first move event arrives
    pub moved: bool,
}

impl PointerState {
    #[inline]
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.moved = true;
    }

    /// Convert a client-space point into coordinates local to a rect origin
    #[inline]
    pub fn local_to(client: Vec2, origin: Vec2) -> Vec2 {
        client - origin
    }
}
