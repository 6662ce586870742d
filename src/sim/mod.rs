//! Deterministic effect state
//!
//! Everything here is pure state plus update rules:
//! - Frame-stepped only (no wall-clock time)
//! - Seeded RNG only
//! - No DOM or platform dependencies

pub mod cursor;
pub mod effects;
pub mod filter;
pub mod gallery;
pub mod particles;
pub mod pointer;
pub mod reveal;
pub mod sections;

pub use cursor::CursorFollower;
pub use effects::{Tilt, parallax_offset};
pub use filter::ProjectFilter;
pub use gallery::{DragMode, Gallery, PageDirection, Thumb};
pub use particles::{Particle, ParticleField, particle_count};
pub use pointer::PointerState;
pub use reveal::{RevealAction, RevealKind, RevealTracker};
pub use sections::{SectionEngine, SectionFrame, SectionPhase};
