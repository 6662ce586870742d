//! Horizontally scrolling project gallery
//!
//! Content can be dragged directly, scrolled via a custom thumb, scrolled
//! with the mouse wheel (vertical deltas are remapped to horizontal), or
//! paged with the arrow keys.

use crate::consts::{GALLERY_DRAG_GAIN, GALLERY_MIN_THUMB_PCT};

/// Active drag gesture. Only one can be in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    /// Dragging the cards themselves
    Content { start_x: f64, start_scroll: f64 },
    /// Dragging the scrollbar thumb
    Track { start_x: f64, start_scroll: f64 },
}

/// Scrollbar thumb geometry, in percent of the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub width_pct: f64,
    pub position_pct: f64,
}

/// Keyboard paging direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Back,
    Forward,
}

impl PageDirection {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Back),
            "ArrowRight" => Some(Self::Forward),
            _ => None,
        }
    }
}

/// Scroll position and drag state of the gallery
#[derive(Debug, Clone)]
pub struct Gallery {
    scroll_left: f64,
    scroll_width: f64,
    client_width: f64,
    track_width: f64,
    card_stride: f64,
    drag: DragMode,
}

impl Gallery {
    pub fn new(card_stride: f64) -> Self {
        Self {
            scroll_left: 0.0,
            scroll_width: 0.0,
            client_width: 0.0,
            track_width: 0.0,
            card_stride,
            drag: DragMode::Idle,
        }
    }

    /// Update measured sizes (content width, visible width, scrollbar track width)
    pub fn set_metrics(&mut self, scroll_width: f64, client_width: f64, track_width: f64) {
        self.scroll_width = scroll_width.max(0.0);
        self.client_width = client_width.max(0.0);
        self.track_width = track_width.max(0.0);
        self.scroll_left = self.clamp_scroll(self.scroll_left);
    }

    /// Sync with a scroll position set by the host
    pub fn set_scroll_left(&mut self, scroll_left: f64) {
        self.scroll_left = self.clamp_scroll(scroll_left);
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragMode::Idle
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Scrolled fraction in `[0, 1]`
    pub fn scroll_fraction(&self) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 { 0.0 } else { self.scroll_left / max }
    }

    pub fn thumb(&self) -> Thumb {
        let width_pct = if self.scroll_width > 0.0 {
            (self.client_width / self.scroll_width * 100.0).max(GALLERY_MIN_THUMB_PCT)
        } else {
            100.0
        };
        Thumb {
            width_pct,
            position_pct: self.scroll_fraction() * (100.0 - width_pct),
        }
    }

    /// Pointer pressed on the cards. Ignored while another drag is active.
    pub fn begin_content_drag(&mut self, x: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.drag = DragMode::Content {
            start_x: x,
            start_scroll: self.scroll_left,
        };
        true
    }

    /// Pointer pressed on the thumb. Ignored while another drag is active.
    pub fn begin_track_drag(&mut self, x: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.drag = DragMode::Track {
            start_x: x,
            start_scroll: self.scroll_left,
        };
        true
    }

    /// Pointer moved; returns the new scroll offset if a drag is active
    pub fn drag_to(&mut self, x: f64) -> Option<f64> {
        let target = match self.drag {
            DragMode::Idle => return None,
            DragMode::Content {
                start_x,
                start_scroll,
            } => start_scroll - (x - start_x) * GALLERY_DRAG_GAIN,
            DragMode::Track {
                start_x,
                start_scroll,
            } => {
                let travel = self.track_width * (100.0 - self.thumb().width_pct) / 100.0;
                if travel <= 0.0 {
                    start_scroll
                } else {
                    start_scroll + (x - start_x) / travel * self.max_scroll()
                }
            }
        };
        self.scroll_left = self.clamp_scroll(target);
        Some(self.scroll_left)
    }

    pub fn end_drag(&mut self) {
        self.drag = DragMode::Idle;
    }

    /// Wheel input. Vertical-dominant deltas scroll horizontally; returns
    /// the new offset when the event was consumed.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) -> Option<f64> {
        if delta_y.abs() <= delta_x.abs() {
            return None;
        }
        self.scroll_left = self.clamp_scroll(self.scroll_left + delta_y);
        Some(self.scroll_left)
    }

    /// Page one card left or right
    pub fn page(&mut self, direction: PageDirection) -> f64 {
        let delta = match direction {
            PageDirection::Back => -self.card_stride,
            PageDirection::Forward => self.card_stride,
        };
        self.scroll_left = self.clamp_scroll(self.scroll_left + delta);
        self.scroll_left
    }

    fn clamp_scroll(&self, value: f64) -> f64 {
        value.clamp(0.0, self.max_scroll())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Gallery {
        let mut gallery = Gallery::new(400.0);
        gallery.set_metrics(4000.0, 1000.0, 500.0);
        gallery
    }

    #[test]
    fn test_thumb_geometry() {
        let mut gallery = gallery();
        assert_eq!(
            gallery.thumb(),
            Thumb {
                width_pct: 25.0,
                position_pct: 0.0
            }
        );
        gallery.set_scroll_left(1500.0);
        let thumb = gallery.thumb();
        assert!((thumb.position_pct - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_thumb_minimum_width() {
        let mut gallery = Gallery::new(400.0);
        gallery.set_metrics(50_000.0, 1000.0, 500.0);
        assert_eq!(gallery.thumb().width_pct, 10.0);
    }

    #[test]
    fn test_thumb_without_overflow() {
        let mut gallery = Gallery::new(400.0);
        gallery.set_metrics(800.0, 800.0, 500.0);
        let thumb = gallery.thumb();
        assert_eq!(thumb.width_pct, 100.0);
        assert_eq!(thumb.position_pct, 0.0);
    }

    #[test]
    fn test_content_drag_has_double_gain() {
        let mut gallery = gallery();
        gallery.set_scroll_left(1000.0);
        assert!(gallery.begin_content_drag(300.0));
        assert_eq!(gallery.drag_to(250.0), Some(1100.0));
        assert_eq!(gallery.drag_to(350.0), Some(900.0));
        gallery.end_drag();
        assert_eq!(gallery.drag_to(0.0), None);
        assert_eq!(gallery.scroll_left(), 900.0);
    }

    #[test]
    fn test_drag_clamps_to_content() {
        let mut gallery = gallery();
        gallery.begin_content_drag(0.0);
        assert_eq!(gallery.drag_to(100.0), Some(0.0));
        assert_eq!(gallery.drag_to(-5000.0), Some(3000.0));
    }

    #[test]
    fn test_drag_modes_are_exclusive() {
        let mut gallery = gallery();
        assert!(gallery.begin_track_drag(10.0));
        assert!(!gallery.begin_content_drag(10.0));
        assert!(matches!(gallery.drag_mode(), DragMode::Track { .. }));
        gallery.end_drag();
        assert!(gallery.begin_content_drag(10.0));
        assert!(!gallery.begin_track_drag(10.0));
        assert!(matches!(gallery.drag_mode(), DragMode::Content { .. }));
    }

    #[test]
    fn test_track_drag_maps_thumb_travel() {
        let mut gallery = gallery();
        // Thumb is 25% of a 500px track, so it travels 375px over 3000px of scroll
        gallery.begin_track_drag(100.0);
        let scroll = gallery.drag_to(100.0 + 187.5).unwrap();
        assert!((scroll - 1500.0).abs() < 1e-9);
        let scroll = gallery.drag_to(1000.0).unwrap();
        assert_eq!(scroll, 3000.0);
    }

    #[test]
    fn test_wheel_remaps_vertical() {
        let mut gallery = gallery();
        assert_eq!(gallery.wheel(0.0, 120.0), Some(120.0));
        assert_eq!(gallery.wheel(0.0, -500.0), Some(0.0));
        // Horizontal-dominant wheel is left to the host
        assert_eq!(gallery.wheel(80.0, 10.0), None);
    }

    #[test]
    fn test_keyboard_paging() {
        let mut gallery = gallery();
        assert_eq!(gallery.page(PageDirection::Forward), 400.0);
        assert_eq!(gallery.page(PageDirection::Forward), 800.0);
        assert_eq!(gallery.page(PageDirection::Back), 400.0);
        gallery.set_scroll_left(2900.0);
        assert_eq!(gallery.page(PageDirection::Forward), 3000.0);
        assert_eq!(PageDirection::from_key("ArrowRight"), Some(PageDirection::Forward));
        assert_eq!(PageDirection::from_key("ArrowLeft"), Some(PageDirection::Back));
        assert_eq!(PageDirection::from_key("Enter"), None);
    }

    #[test]
    fn test_metrics_shrink_clamps_scroll() {
        let mut gallery = gallery();
        gallery.set_scroll_left(3000.0);
        gallery.set_metrics(2000.0, 1000.0, 500.0);
        assert_eq!(gallery.scroll_left(), 1000.0);
    }
}
