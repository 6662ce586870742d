//! Particle field for the hero background
//!
//! Particles are repelled by the pointer, spring back to where they were
//! spawned, and wrap around the canvas edges. Nearby pairs are joined by
//! faint lines when rendered.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::pointer::PointerState;
use crate::consts::*;
use crate::renderer::{Rgb, Surface};
use crate::wrap_coord;

/// A single background particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rest position the spring pulls back to (fixed at spawn)
    pub base: Vec2,
    pub radius: f32,
    /// Draw opacity (fixed at spawn)
    pub opacity: f32,
}

impl Particle {
    /// Particle sitting still at its base position
    pub fn at_rest(pos: Vec2, radius: f32, opacity: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            base: pos,
            radius,
            opacity,
        }
    }

    fn spawn(rng: &mut Pcg32, width: f32, height: f32) -> Self {
        let pos = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
            * INITIAL_SPEED_SPREAD;
        Self {
            pos,
            vel,
            base: pos,
            radius: rng.random::<f32>() * PARTICLE_RADIUS_SPREAD + MIN_PARTICLE_RADIUS,
            opacity: rng.random::<f32>() * PARTICLE_OPACITY_SPREAD + MIN_PARTICLE_OPACITY,
        }
    }

    /// Advance one frame: pointer repulsion, spring, damping, integrate, wrap
    pub fn step(&mut self, pointer: Vec2, width: f32, height: f32) {
        let to_pointer = pointer - self.pos;
        let distance = to_pointer.length();
        if distance < POINTER_RADIUS {
            let force = (POINTER_RADIUS - distance) / POINTER_RADIUS;
            // Pointer exactly on the particle pushes along -x
            let dir = to_pointer.try_normalize().unwrap_or(Vec2::X);
            self.vel -= dir * force * POINTER_FORCE;
        }

        self.vel += (self.base - self.pos) * SPRING_STRENGTH;
        self.vel *= DAMPING;
        self.pos += self.vel;

        self.pos.x = wrap_coord(self.pos.x, width);
        self.pos.y = wrap_coord(self.pos.y, height);
    }
}

/// Number of particles for a canvas of the given size
pub fn particle_count(width: f32, height: f32) -> usize {
    let area = width.max(0.0) as f64 * height.max(0.0) as f64;
    (area / PARTICLE_AREA_PER_PARTICLE as f64).floor() as usize
}

/// Owns the particle batch, canvas size and pointer position
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    color: Rgb,
    pointer: PointerState,
    rng: Pcg32,
}

impl ParticleField {
    /// Empty field with a seeded RNG; call [`ParticleField::initialize`] to populate
    pub fn with_seed(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            color: Rgb::new(139, 69, 19),
            pointer: PointerState::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Field with a fixed particle set (no random spawning until resized)
    pub fn from_particles(particles: Vec<Particle>, width: f32, height: f32, color: Rgb) -> Self {
        Self {
            particles,
            width,
            height,
            color,
            pointer: PointerState::default(),
            rng: Pcg32::seed_from_u64(0),
        }
    }

    /// Allocate the particle batch. A zero-area canvas leaves the field empty.
    pub fn initialize(&mut self, width: f32, height: f32, color: Rgb) {
        self.color = color;
        self.respawn(width, height);
    }

    /// Drop every particle and spawn a fresh batch for the new size
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.respawn(width, height);
        log::info!(
            "Particle field resized to {}x{} ({} particles)",
            width,
            height,
            self.particles.len()
        );
    }

    fn respawn(&mut self, width: f32, height: f32) {
        self.particles.clear();
        self.width = width;
        self.height = height;
        let count = particle_count(width, height);
        if count == 0 {
            return;
        }
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(&mut self.rng, width, height);
            self.particles.push(particle);
        }
    }

    /// Pointer position in canvas-local coordinates
    #[inline]
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.move_to(x, y);
    }

    /// Advance every particle by one frame
    pub fn advance(&mut self) {
        let pointer = self.pointer.pos;
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.step(pointer, width, height);
        }
    }

    /// Clear, draw particles, then connect every close pair once
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);

        for particle in &self.particles {
            surface.fill_circle(particle.pos.round(), particle.radius, self.color, particle.opacity);
        }

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.pos.distance(b.pos);
                if distance < LINK_DISTANCE {
                    let alpha = LINK_MAX_ALPHA * (1.0 - distance / LINK_DISTANCE);
                    surface.stroke_line(a.pos, b.pos, self.color, alpha);
                }
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer.pos
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use proptest::prelude::*;

    const BROWN: Rgb = Rgb::new(139, 69, 19);

    fn far_pointer(field: &mut ParticleField) {
        field.on_pointer_move(-10_000.0, -10_000.0);
    }

    #[test]
    fn test_particle_count() {
        assert_eq!(particle_count(1920.0, 1080.0), 103);
        assert_eq!(particle_count(200.0, 100.0), 1);
        assert_eq!(particle_count(199.0, 100.0), 0);
        assert_eq!(particle_count(0.0, 1080.0), 0);
    }

    #[test]
    fn test_initialize_zero_area_is_noop() {
        let mut field = ParticleField::with_seed(1);
        field.initialize(0.0, 800.0, BROWN);
        assert!(field.particles().is_empty());
        field.advance();
        let mut surface = RecordingSurface::new();
        field.render(&mut surface);
        assert_eq!(surface.circle_count(), 0);
    }

    #[test]
    fn test_initialize_spawns_within_bounds() {
        let mut field = ParticleField::with_seed(42);
        field.initialize(800.0, 600.0, BROWN);
        assert_eq!(field.particles().len(), 24);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.pos.x));
            assert!((0.0..600.0).contains(&p.pos.y));
            assert_eq!(p.pos, p.base);
            assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
            assert!((0.8..2.3).contains(&p.radius));
            assert!((0.3..0.6).contains(&p.opacity));
        }
    }

    #[test]
    fn test_seeded_initialization_is_reproducible() {
        let mut a = ParticleField::with_seed(7);
        let mut b = ParticleField::with_seed(7);
        a.initialize(1000.0, 1000.0, BROWN);
        b.initialize(1000.0, 1000.0, BROWN);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_resize_discards_and_recounts() {
        let mut field = ParticleField::with_seed(3);
        field.initialize(1000.0, 1000.0, BROWN);
        assert_eq!(field.particles().len(), 50);
        let before = field.particles().to_vec();

        field.on_resize(1200.0, 500.0);
        assert_eq!(field.particles().len(), 30);
        assert_eq!(field.size(), (1200.0, 500.0));
        for p in field.particles() {
            assert!(!before.contains(p));
        }

        field.on_resize(100.0, 100.0);
        assert!(field.particles().is_empty());
    }

    #[test]
    fn test_wrap_across_right_edge() {
        let mut p = Particle::at_rest(Vec2::new(999.999, 50.0), 1.0, 0.5);
        p.vel = Vec2::new(1.0, 0.0);
        p.step(Vec2::new(-1000.0, -1000.0), 1000.0, 100.0);
        assert!(p.pos.x.abs() < 1e-3, "x = {}", p.pos.x);
    }

    #[test]
    fn test_fast_particle_lands_on_opposite_edge() {
        let mut p = Particle::at_rest(Vec2::new(500.0, 50.0), 1.0, 0.5);
        p.vel = Vec2::new(600.0, 0.0);
        p.step(Vec2::new(-1000.0, -1000.0), 1000.0, 100.0);
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn test_wrap_across_top_edge() {
        let mut p = Particle::at_rest(Vec2::new(50.0, 0.2), 1.0, 0.5);
        p.vel = Vec2::new(0.0, -1.0);
        p.step(Vec2::new(-1000.0, -1000.0), 100.0, 100.0);
        assert!(p.pos.y < 100.0 && p.pos.y > 99.999, "y = {}", p.pos.y);
    }

    #[test]
    fn test_pointer_repels() {
        let mut p = Particle::at_rest(Vec2::new(50.0, 50.0), 1.0, 0.5);
        // Pointer 50px to the right: force = 0.5, push = 0.25 left, then damped
        p.step(Vec2::new(100.0, 50.0), 200.0, 200.0);
        assert!((p.vel.x - (-0.25 * DAMPING)).abs() < 1e-6);
        assert_eq!(p.vel.y, 0.0);
        assert!(p.pos.x < 50.0);
    }

    #[test]
    fn test_pointer_out_of_range_ignored() {
        let mut p = Particle::at_rest(Vec2::new(50.0, 50.0), 1.0, 0.5);
        p.step(Vec2::new(150.0, 50.0), 200.0, 200.0);
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_pointer_on_particle_pushes_left() {
        let mut p = Particle::at_rest(Vec2::new(50.0, 50.0), 1.0, 0.5);
        p.step(Vec2::new(50.0, 50.0), 200.0, 200.0);
        assert!(p.vel.x < 0.0);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_spring_and_damping() {
        let mut p = Particle::at_rest(Vec2::new(50.0, 50.0), 1.0, 0.5);
        p.pos = Vec2::new(60.0, 50.0);
        p.step(Vec2::new(-1000.0, -1000.0), 200.0, 200.0);
        // v = (50 - 60) * 0.01 * 0.98
        assert!((p.vel.x + 0.098).abs() < 1e-6);
        assert!((p.pos.x - (60.0 - 0.098)).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_decays_without_forcing() {
        let mut p = Particle::at_rest(Vec2::new(100.0, 100.0), 1.0, 0.5);
        p.vel = Vec2::new(0.3, -0.2);
        let mut field = ParticleField::from_particles(vec![p], 400.0, 400.0, BROWN);
        far_pointer(&mut field);

        // The spring makes speed oscillate; the peak over each window must shrink
        let mut last_peak = f32::MAX;
        for _ in 0..5 {
            let mut peak = 0.0f32;
            for _ in 0..100 {
                field.advance();
                peak = peak.max(field.particles()[0].vel.length());
            }
            assert!(peak < last_peak, "peak speed grew: {} -> {}", last_peak, peak);
            last_peak = peak;
        }
        assert!(field.particles()[0].vel.length() < 0.05);
        assert!(field.particles()[0].pos.distance(Vec2::new(100.0, 100.0)) < 2.0);
    }

    #[test]
    fn test_particle_at_base_stays_at_rest() {
        let p = Particle::at_rest(Vec2::new(10.0, 10.0), 1.0, 0.5);
        let mut field = ParticleField::from_particles(vec![p], 400.0, 400.0, BROWN);
        far_pointer(&mut field);
        for _ in 0..10 {
            field.advance();
        }
        assert_eq!(field.particles()[0], p);
    }

    #[test]
    fn test_render_draws_one_line_per_close_pair() {
        let particles = vec![
            Particle::at_rest(Vec2::new(100.0, 100.0), 1.0, 0.4),
            Particle::at_rest(Vec2::new(130.0, 140.0), 2.0, 0.5),
            Particle::at_rest(Vec2::new(400.0, 400.0), 1.0, 0.6),
        ];
        let field = ParticleField::from_particles(particles, 500.0, 500.0, BROWN);
        let mut surface = RecordingSurface::new();
        field.render(&mut surface);

        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 500.0,
                height: 500.0
            }
        );
        assert_eq!(surface.circle_count(), 3);
        assert_eq!(surface.line_count(), 1);

        let line = surface
            .commands
            .iter()
            .find(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        if let DrawCommand::Line { from, to, alpha, .. } = line {
            assert_eq!(*from, Vec2::new(100.0, 100.0));
            assert_eq!(*to, Vec2::new(130.0, 140.0));
            // distance 50 -> 0.1 * 0.5
            assert!((alpha - 0.05).abs() < 1e-6);
        }
    }

    #[test]
    fn test_render_circles_before_lines_with_rounded_centers() {
        let particles = vec![
            Particle::at_rest(Vec2::new(10.4, 10.6), 1.5, 0.4),
            Particle::at_rest(Vec2::new(20.0, 20.0), 1.0, 0.5),
        ];
        let field = ParticleField::from_particles(particles, 100.0, 100.0, BROWN);
        let mut surface = RecordingSurface::new();
        field.render(&mut surface);

        match &surface.commands[1] {
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                assert_eq!(*center, Vec2::new(10.0, 11.0));
                assert_eq!(*radius, 1.5);
                assert_eq!(*color, BROWN);
                assert_eq!(*alpha, 0.4);
            }
            other => panic!("expected circle, got {:?}", other),
        }
        assert!(matches!(surface.commands[3], DrawCommand::Line { .. }));
    }

    #[test]
    fn test_render_skips_pairs_at_link_distance() {
        let particles = vec![
            Particle::at_rest(Vec2::new(0.0, 0.0), 1.0, 0.4),
            Particle::at_rest(Vec2::new(100.0, 0.0), 1.0, 0.4),
        ];
        let field = ParticleField::from_particles(particles, 300.0, 300.0, BROWN);
        let mut surface = RecordingSurface::new();
        field.render(&mut surface);
        assert_eq!(surface.line_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_positions_stay_on_canvas(
            seed in any::<u64>(),
            px in -200.0f32..1200.0,
            py in -200.0f32..900.0,
            ticks in 1usize..40,
        ) {
            let mut field = ParticleField::with_seed(seed);
            field.initialize(1000.0, 700.0, BROWN);
            field.on_pointer_move(px, py);
            for _ in 0..ticks {
                field.advance();
                for p in field.particles() {
                    prop_assert!(p.pos.x >= 0.0 && p.pos.x < 1000.0);
                    prop_assert!(p.pos.y >= 0.0 && p.pos.y < 700.0);
                }
            }
        }
    }
}
