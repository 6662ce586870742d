//! Scroll parallax and hover tilt

use crate::consts::MAX_TILT_DEG;

/// Vertical parallax offset (px) for an element scrolling at `speed`
#[inline]
pub fn parallax_offset(scroll: f64, speed: f64) -> f64 {
    -(scroll * speed)
}

/// 3D tilt toward the pointer over an element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
}

impl Tilt {
    pub const FLAT: Self = Self {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
    };

    /// Tilt for a pointer at (`x`, `y`) local to an element of the given size
    pub fn from_pointer(x: f64, y: f64, width: f64, height: f64) -> Self {
        let cx = width / 2.0;
        let cy = height / 2.0;
        if cx <= 0.0 || cy <= 0.0 {
            return Self::FLAT;
        }
        Self {
            rotate_x_deg: (y - cy) / cy * -MAX_TILT_DEG,
            rotate_y_deg: (x - cx) / cx * MAX_TILT_DEG,
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg)",
            self.rotate_x_deg, self.rotate_y_deg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax() {
        assert_eq!(parallax_offset(200.0, 0.5), -100.0);
        assert_eq!(parallax_offset(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_tilt_corners() {
        let tilt = Tilt::from_pointer(0.0, 0.0, 200.0, 100.0);
        assert_eq!(tilt.rotate_x_deg, 10.0);
        assert_eq!(tilt.rotate_y_deg, -10.0);

        let tilt = Tilt::from_pointer(200.0, 100.0, 200.0, 100.0);
        assert_eq!(tilt.rotate_x_deg, -10.0);
        assert_eq!(tilt.rotate_y_deg, 10.0);
    }

    #[test]
    fn test_tilt_center_and_degenerate() {
        assert_eq!(Tilt::from_pointer(100.0, 50.0, 200.0, 100.0).rotate_y_deg, 0.0);
        assert_eq!(Tilt::from_pointer(5.0, 5.0, 0.0, 0.0), Tilt::FLAT);
        assert_eq!(
            Tilt::FLAT.css_transform(),
            "perspective(1000px) rotateX(0deg) rotateY(0deg)"
        );
    }
}
