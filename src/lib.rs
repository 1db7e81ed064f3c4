//! # driftdeck
//!
//! A viewport-gated 2D physics decoration: textured boards drift, bounce,
//! and can be dragged around a transparent surface. Physics runs only while
//! the surface is actually visible; everything is torn down the moment it
//! is not.
//!
//! driftdeck is an orchestration layer, not an engine. Rigid bodies come
//! from [rapier2d](https://rapier.rs), rendering from wgpu through a winit
//! window; this crate decides *when* those exist and wires the three input
//! signals (visibility, resize, texture list) into them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftdeck::prelude::*;
//!
//! Simulation::new()
//!     .with_textures(["assets/decks/classic.png", "assets/decks/street.png"])
//!     .with_surface_size(1280.0, 720.0)
//!     .run()
//!     .unwrap();
//! ```
//!
//! ## Lifecycle
//!
//! The heart of the crate is [`WorldLifecycleManager`], an explicit
//! Idle/Running state machine:
//!
//! - **Idle** - no world, no clock, no renderer, nothing armed.
//! - **Running** - one world, one fixed-step clock, one renderer, one mouse
//!   constraint, all owned by the manager and dropped together.
//!
//! Activation is gated twice: the [`VisibilityGate`] must report at least
//! half the surface on-screen, and the reduced-motion preference (the
//! `REDUCE_MOTION` environment variable, or [`Simulation::with_reduced_motion`])
//! must be unset. Deactivation is synchronous and idempotent; reactivation
//! always starts from a clean slate.
//!
//! ## Device capping
//!
//! Narrow viewports (width <= 768 logical pixels) simulate at most 3
//! boards; wider ones simulate one board per texture id. Classification is
//! recomputed on every resize and a class change repopulates in place.
//!
//! ## Failure posture
//!
//! Decoration over strictness, everywhere: GPU construction failure leaves
//! the manager Idle without crashing the host; a texture that fails to
//! load renders as a placeholder while its board keeps simulating; a host
//! with no way to observe visibility gets an always-active gate.

pub mod boundary;
pub mod error;
mod gpu;
pub mod lifecycle;
pub mod mouse;
pub mod populate;
mod simulation;
pub mod spawn;
pub mod textures;
pub mod time;
pub mod viewport;
pub mod visibility;
pub mod world;

pub use error::{GpuError, SimulationError, TextureError};
pub use glam::Vec2;
pub use lifecycle::WorldLifecycleManager;
pub use populate::BoardPopulator;
pub use simulation::Simulation;
pub use textures::{TextureConfig, TextureRegistry};
pub use viewport::{DeviceClass, ViewportClassifier};
pub use visibility::{Rect, VisibilityGate};
pub use world::PhysicsWorld;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftdeck::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{GpuError, SimulationError, TextureError};
    pub use crate::lifecycle::WorldLifecycleManager;
    pub use crate::populate::BoardPopulator;
    pub use crate::simulation::Simulation;
    pub use crate::textures::{TextureConfig, TextureRegistry};
    pub use crate::viewport::{DeviceClass, ViewportClassifier};
    pub use crate::visibility::{Rect, VisibilityGate};
    pub use crate::world::PhysicsWorld;
    pub use crate::Vec2;
}
