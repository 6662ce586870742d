//! Custom cursor with a trailing circle

use glam::Vec2;

use crate::consts::{CURSOR_LERP, MOBILE_BREAKPOINT};
use crate::lerp;

/// Dot follows the pointer exactly; the circle eases toward it every frame
#[derive(Debug, Clone)]
pub struct CursorFollower {
    target: Vec2,
    circle: Vec2,
    hovering: bool,
    pressed: bool,
}

impl CursorFollower {
    /// Start both dot and circle at the viewport center
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let center = Vec2::new(viewport_width / 2.0, viewport_height / 2.0);
        Self {
            target: center,
            circle: center,
            hovering: false,
            pressed: false,
        }
    }

    /// Custom cursor is only shown on wide viewports
    pub fn enabled_for(viewport_width: f64) -> bool {
        viewport_width > MOBILE_BREAKPOINT
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
    }

    /// One frame of easing
    pub fn advance(&mut self) {
        self.circle = Vec2::new(
            lerp(self.circle.x, self.target.x, CURSOR_LERP),
            lerp(self.circle.y, self.target.y, CURSOR_LERP),
        );
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Modifier classes for the cursor element and whether each is on
    pub fn classes(&self) -> [(&'static str, bool); 2] {
        [("cursor--click", self.pressed), ("cursor--hover", self.hovering)]
    }

    pub fn dot(&self) -> Vec2 {
        self.target
    }

    pub fn circle(&self) -> Vec2 {
        self.circle
    }

    pub fn dot_transform(&self) -> String {
        centered_translate(self.target)
    }

    /// CSS transform centering the circle on its position
    pub fn circle_transform(&self) -> String {
        centered_translate(self.circle)
    }
}

fn centered_translate(pos: Vec2) -> String {
    format!("translate(calc({}px - 50%), calc({}px - 50%))", pos.x, pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_centered() {
        let cursor = CursorFollower::new(1000.0, 800.0);
        assert_eq!(cursor.circle(), Vec2::new(500.0, 400.0));
        assert_eq!(cursor.dot(), Vec2::new(500.0, 400.0));
    }

    #[test]
    fn test_circle_eases_toward_pointer() {
        let mut cursor = CursorFollower::new(0.0, 0.0);
        cursor.on_pointer_move(100.0, 0.0);
        cursor.advance();
        assert!((cursor.circle().x - 15.0).abs() < 1e-5);
        cursor.advance();
        assert!((cursor.circle().x - 27.75).abs() < 1e-4);
        for _ in 0..200 {
            cursor.advance();
        }
        assert!((cursor.circle().x - 100.0).abs() < 1e-3);
        assert_eq!(cursor.dot(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_mobile_breakpoint() {
        assert!(!CursorFollower::enabled_for(768.0));
        assert!(CursorFollower::enabled_for(769.0));
    }

    #[test]
    fn test_classes_follow_pointer_state() {
        let mut cursor = CursorFollower::new(100.0, 100.0);
        assert_eq!(
            cursor.classes(),
            [("cursor--click", false), ("cursor--hover", false)]
        );
        cursor.set_pressed(true);
        cursor.set_hovering(true);
        assert_eq!(
            cursor.classes(),
            [("cursor--click", true), ("cursor--hover", true)]
        );
        cursor.set_pressed(false);
        assert_eq!(cursor.classes()[0], ("cursor--click", false));
        assert_eq!(cursor.classes()[1], ("cursor--hover", true));
    }

    #[test]
    fn test_circle_transform() {
        let cursor = CursorFollower::new(20.0, 10.0);
        assert_eq!(
            cursor.circle_transform(),
            "translate(calc(10px - 50%), calc(5px - 50%))"
        );
    }
}
