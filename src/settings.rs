//! Effect settings and feature manifest
//!
//! Injected at start-up instead of probing the page for optional elements.
//! On the web the JSON lives in an element with id `fx-settings`.

use serde::{Deserialize, Serialize};

use crate::renderer::Rgb;

/// Which optional effects are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureManifest {
    /// Particle background on the hero canvas
    pub particles: bool,
    /// Stacked drawer transition between sections
    pub sections: bool,
    /// Drag-scrollable project gallery
    pub gallery: bool,
    /// Custom trailing cursor
    pub cursor: bool,
    /// Scroll parallax on `[data-parallax]` elements
    pub parallax: bool,
    /// Pointer tilt on hero/about visuals
    pub tilt: bool,
    /// Category filter buttons for project cards
    pub project_filter: bool,
    /// One-shot fade/slide reveals and skill bars
    pub reveal: bool,
    /// Highlight the nav link of the current section
    pub active_nav: bool,
}

impl Default for FeatureManifest {
    fn default() -> Self {
        Self {
            particles: true,
            sections: true,
            gallery: true,
            cursor: true,
            parallax: true,
            tilt: true,
            project_filter: true,
            reveal: true,
            active_nav: true,
        }
    }
}

/// Particle field appearance and determinism
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleStyle {
    /// Fill/line color (`#rrggbb`)
    pub color: String,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            color: "#8B4513".to_string(),
            seed: None,
        }
    }
}

impl ParticleStyle {
    /// Parsed color, falling back to the default brown
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(&self.color).unwrap_or_else(|| {
            log::warn!("Invalid particle color {:?}, using default", self.color);
            Rgb::new(139, 69, 19)
        })
    }
}

/// Effect settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub features: FeatureManifest,
    pub particles: ParticleStyle,

    // === Gallery ===
    /// Keyboard paging stride (card width + gap, px)
    pub gallery_card_stride: f64,

    // === Accessibility ===
    /// Reduced motion (disables parallax, tilt and particle motion)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            features: FeatureManifest::default(),
            particles: ParticleStyle::default(),
            gallery_card_stride: 382.0,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Element id holding the JSON settings
    pub const ELEMENT_ID: &'static str = "fx-settings";

    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective parallax (respects reduced_motion)
    pub fn effective_parallax(&self) -> bool {
        self.features.parallax && !self.reduced_motion
    }

    /// Effective tilt (respects reduced_motion)
    pub fn effective_tilt(&self) -> bool {
        self.features.tilt && !self.reduced_motion
    }

    /// Whether particles should be simulated (drawn static otherwise)
    pub fn effective_particle_motion(&self) -> bool {
        self.features.particles && !self.reduced_motion
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
