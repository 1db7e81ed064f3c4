//! Pointer drag interaction.
//!
//! A single mouse constraint exists per Active lifetime. Pressing over a
//! board grabs it; while grabbed, each physics step drives the body a
//! stiffness fraction of the remaining cursor gap, which is what gives the
//! drag its soft, elastic feel. The constraint has no visual representation
//! and never looks at wheel events, so scrolling stays with the host.

use glam::Vec2;
use rapier2d::prelude::*;

use crate::world::PhysicsWorld;

/// Fraction of the cursor gap closed per step while dragging.
pub const MOUSE_STIFFNESS: f32 = 0.2;

#[derive(Debug)]
pub struct MouseConstraint {
    cursor: Vec2,
    grabbed: Option<RigidBodyHandle>,
}

impl MouseConstraint {
    pub fn new() -> Self {
        Self {
            cursor: Vec2::ZERO,
            grabbed: None,
        }
    }

    /// Track the pointer in container logical coordinates.
    pub fn cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Try to grab the board under the cursor.
    pub fn press(&mut self, world: &PhysicsWorld) {
        self.grabbed = world.pick_body_at(self.cursor);
    }

    /// Let go of the grabbed board, if any. It keeps its current velocity.
    pub fn release(&mut self) {
        self.grabbed = None;
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Pull the grabbed board toward the cursor. Call once per physics step.
    pub fn apply(&mut self, world: &mut PhysicsWorld, dt: f32) {
        let Some(handle) = self.grabbed else {
            return;
        };
        let Some(body) = world.body_mut(handle) else {
            // Board vanished under us (repopulation); drop the grab.
            self.grabbed = None;
            return;
        };

        let position = Vec2::new(body.translation().x, body.translation().y);
        let gap = self.cursor - position;
        let velocity = gap * MOUSE_STIFFNESS / dt.max(f32::EPSILON);
        body.set_linvel(vector![velocity.x, velocity.y], true);
    }
}

impl Default for MouseConstraint {
    fn default() -> Self {
        Self::new()
    }
}
