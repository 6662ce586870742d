//! Portfolio FX - presentation effects for a portfolio site
//!
//! Core modules:
//! - `sim`: Deterministic effect state (particles, section drawer, gallery, cursor)
//! - `renderer`: 2D drawing surface abstraction and backends
//! - `platform`: Render loop scheduling with an explicit stop handle
//! - `settings`: Feature manifest and styling, injected at start-up
//! - `app`: Application context wiring the components together

pub mod app;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::AppContext;
pub use settings::{FeatureManifest, ParticleStyle, Settings};

/// Effect tuning constants
pub mod consts {
    /// Canvas area (px²) per particle
    pub const PARTICLE_AREA_PER_PARTICLE: f32 = 20_000.0;
    /// Pointer repulsion reaches this far (px)
    pub const POINTER_RADIUS: f32 = 100.0;
    /// Scale applied to the normalized repulsion force
    pub const POINTER_FORCE: f32 = 0.5;
    /// Spring constant pulling particles back to their base position
    pub const SPRING_STRENGTH: f32 = 0.01;
    /// Per-frame velocity damping
    pub const DAMPING: f32 = 0.98;
    /// Particles closer than this get a connecting line (px)
    pub const LINK_DISTANCE: f32 = 100.0;
    /// Line alpha at zero distance
    pub const LINK_MAX_ALPHA: f32 = 0.1;

    /// Initial velocity spread per axis (uniform in ±half of this)
    pub const INITIAL_SPEED_SPREAD: f32 = 0.5;
    pub const MIN_PARTICLE_RADIUS: f32 = 0.8;
    pub const PARTICLE_RADIUS_SPREAD: f32 = 1.5;
    pub const MIN_PARTICLE_OPACITY: f32 = 0.3;
    pub const PARTICLE_OPACITY_SPREAD: f32 = 0.3;

    /// Section scroll height as a multiple of the viewport height
    pub const SECTION_HEIGHT_FACTOR: f64 = 1.2;
    /// How much a covered section fades (1.0 would fade to black)
    pub const SECTION_FADE: f64 = 0.95;
    /// Offscreen translation for sections not yet reached (vh)
    pub const OFFSCREEN_VH: f64 = 100.0;

    /// Pointer drag gain for the gallery
    pub const GALLERY_DRAG_GAIN: f64 = 2.0;
    /// Smallest scrollbar thumb width (%)
    pub const GALLERY_MIN_THUMB_PCT: f64 = 10.0;

    /// Trailing cursor circle lerp factor per frame
    pub const CURSOR_LERP: f32 = 0.15;
    /// Viewports at or below this width get the native cursor
    pub const MOBILE_BREAKPOINT: f64 = 768.0;

    /// Default parallax speed when an element does not specify one
    pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
    /// Max hover tilt (degrees)
    pub const MAX_TILT_DEG: f64 = 10.0;

    /// Visible fraction that reveals a fade/slide element
    pub const REVEAL_THRESHOLD: f64 = 0.1;
    /// Bottom strip of the viewport (px) that doesn't count for reveals
    pub const REVEAL_BOTTOM_INSET: f64 = 50.0;
    /// Visible fraction that fills a skill bar
    pub const SKILL_BAR_THRESHOLD: f64 = 0.5;
}

/// Linear interpolation
#[inline]
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}

/// Teleport a coordinate that left `[0, extent)` to the opposite edge.
/// Overshoot is discarded: leaving past the far edge lands on 0, leaving
/// below 0 lands on the largest value still inside the range.
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    if value >= extent {
        0.0
    } else if value < 0.0 {
        below(extent)
    } else {
        value
    }
}

/// Largest `f32` strictly below a positive finite `x`
#[inline]
fn below(x: f32) -> f32 {
    f32::from_bits(x.to_bits() - 1)
}
