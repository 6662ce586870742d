//! Application context
//!
//! Built once at start-up from [`Settings`] and handed to the event and
//! frame callbacks. Components disabled in the feature manifest are `None`.

use glam::Vec2;

use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{
    CursorFollower, Gallery, ParticleField, PointerState, ProjectFilter, RevealAction,
    RevealKind, RevealTracker, SectionEngine, SectionFrame, Tilt, parallax_offset,
};

/// Section visuals for the current scroll offset
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub frames: Vec<SectionFrame>,
    pub nav_dots: Vec<bool>,
}

/// Owns every effect component and the shared scalar inputs
pub struct AppContext {
    settings: Settings,
    viewport: Vec2,
    scroll: f64,
    frames: u64,
    particles: Option<ParticleField>,
    sections: Option<SectionEngine>,
    gallery: Option<Gallery>,
    cursor: Option<CursorFollower>,
    project_filter: Option<ProjectFilter>,
    reveals: RevealTracker,
}

impl AppContext {
    pub fn new(settings: Settings, viewport: Vec2, section_ids: Vec<String>, seed: u64) -> Self {
        let features = settings.features;
        let particles = features.particles.then(|| ParticleField::with_seed(seed));
        let sections = (features.sections && !section_ids.is_empty())
            .then(|| SectionEngine::new(section_ids, viewport.y as f64));
        let gallery = features
            .gallery
            .then(|| Gallery::new(settings.gallery_card_stride));
        let cursor = (features.cursor && CursorFollower::enabled_for(viewport.x as f64))
            .then(|| CursorFollower::new(viewport.x, viewport.y));
        let project_filter = features.project_filter.then(ProjectFilter::new);

        log::info!(
            "Effects: particles={} sections={} gallery={} cursor={}",
            particles.is_some(),
            sections.is_some(),
            gallery.is_some(),
            cursor.is_some()
        );

        Self {
            settings,
            viewport,
            scroll: 0.0,
            frames: 0,
            particles,
            sections,
            gallery,
            cursor,
            project_filter,
            reveals: RevealTracker::default(),
        }
    }

    /// Register the elements that reveal on scroll (ignored if disabled)
    pub fn init_reveals(&mut self, kinds: Vec<RevealKind>) {
        if self.settings.features.reveal {
            log::debug!("Tracking {} reveal elements", kinds.len());
            self.reveals = RevealTracker::new(kinds);
        }
    }

    /// Reveal elements now in view; see [`RevealTracker::update`]
    pub fn update_reveals<F>(&mut self, measure: F) -> Vec<(usize, RevealAction)>
    where
        F: FnMut(usize) -> Option<(f64, f64)>,
    {
        self.reveals.update(self.viewport.y as f64, measure)
    }

    pub fn reveals(&self) -> &RevealTracker {
        &self.reveals
    }

    /// Allocate particles for the hero canvas
    pub fn init_particles(&mut self, canvas_width: f32, canvas_height: f32) {
        let color = self.settings.particles.rgb();
        if let Some(field) = self.particles.as_mut() {
            field.initialize(canvas_width, canvas_height, color);
            log::info!("Spawned {} particles", field.particles().len());
        }
    }

    /// Viewport and canvas changed size
    pub fn on_resize(&mut self, viewport: Vec2, canvas_width: f32, canvas_height: f32) {
        self.viewport = viewport;
        if let Some(sections) = self.sections.as_mut() {
            sections.on_resize(viewport.y as f64);
        }
        if let Some(field) = self.particles.as_mut() {
            field.on_resize(canvas_width, canvas_height);
        }
    }

    /// Pointer moved; `canvas_origin` is the canvas top-left in client space
    pub fn on_pointer_move(&mut self, client: Vec2, canvas_origin: Vec2) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.on_pointer_move(client.x, client.y);
        }
        if let Some(field) = self.particles.as_mut() {
            let local = PointerState::local_to(client, canvas_origin);
            field.on_pointer_move(local.x, local.y);
        }
    }

    pub fn on_scroll(&mut self, scroll: f64) {
        self.scroll = scroll.max(0.0);
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Advance particles (unless motion is reduced) and ease the cursor
    pub fn step(&mut self) {
        let animate = self.settings.effective_particle_motion();
        if let Some(field) = self.particles.as_mut() {
            if animate {
                field.advance();
            }
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.advance();
        }
        self.frames += 1;
    }

    /// Draw the particle field
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(field) = self.particles.as_ref() {
            field.render(surface);
        }
    }

    /// One render tick
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Section frames and nav dots for the current scroll offset
    pub fn section_view(&self) -> Option<SectionView> {
        let sections = self.sections.as_ref()?;
        Some(SectionView {
            frames: sections.frames(self.scroll),
            nav_dots: sections.nav_dots(self.scroll),
        })
    }

    /// Scroll target for a nav-dot click
    pub fn nav_target(&self, index: usize) -> Option<f64> {
        self.sections.as_ref().map(|s| s.target_offset(index))
    }

    /// Scroll target for an anchor link (`#id`)
    pub fn anchor_target(&self, href: &str) -> Option<f64> {
        self.sections.as_ref()?.offset_for_id(href)
    }

    /// Section id whose nav link is highlighted, if enabled
    pub fn active_nav_id(&self) -> Option<&str> {
        if !self.settings.features.active_nav {
            return None;
        }
        self.sections.as_ref()?.active_id(self.scroll)
    }

    /// Whether the nav link pointing at `href` is the active one
    pub fn is_active_link(&self, href: &str) -> bool {
        self.active_nav_id()
            .is_some_and(|id| href.strip_prefix('#') == Some(id))
    }

    /// Apply a filter button click; returns the updated filter
    pub fn select_filter(&mut self, filter: &str) -> Option<&ProjectFilter> {
        let project_filter = self.project_filter.as_mut()?;
        project_filter.select(filter);
        log::debug!("Project filter: {}", filter);
        Some(project_filter)
    }

    pub fn project_filter(&self) -> Option<&ProjectFilter> {
        self.project_filter.as_ref()
    }

    /// Parallax offset for an element, if parallax is enabled
    pub fn parallax(&self, speed: Option<f64>) -> Option<f64> {
        self.settings.effective_parallax().then(|| {
            parallax_offset(
                self.scroll,
                speed.unwrap_or(crate::consts::DEFAULT_PARALLAX_SPEED),
            )
        })
    }

    /// Tilt for a pointer over an element, if tilt is enabled
    pub fn tilt(&self, local: Vec2, size: Vec2) -> Option<Tilt> {
        self.settings.effective_tilt().then(|| {
            Tilt::from_pointer(local.x as f64, local.y as f64, size.x as f64, size.y as f64)
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        self.gallery.as_mut()
    }

    pub fn cursor(&self) -> Option<&CursorFollower> {
        self.cursor.as_ref()
    }

    pub fn cursor_mut(&mut self) -> Option<&mut CursorFollower> {
        self.cursor.as_mut()
    }
}
