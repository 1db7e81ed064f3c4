//! World lifecycle: the state machine deciding when physics happens at all.
//!
//! The manager owns the physics world, the renderer, the step clock, and
//! the mouse constraint for exactly as long as the simulation is active.
//! Activation builds everything from scratch; deactivation tears everything
//! down; nothing survives the gap. The two invariants everything here
//! serves:
//!
//! - at most one world, one step clock, and one renderer exist at a time;
//! - teardown is idempotent and leaves no resize handling armed and no
//!   further ticks possible.
//!
//! State is an explicit tag (`Idle` / `Running`), not a pile of `Option`s:
//! a `Running` value carries every live resource, so dropping it *is* the
//! teardown and partial states cannot be represented.

use std::sync::Arc;

use glam::Vec2;
use rapier2d::prelude::*;
use winit::window::Window;

use crate::boundary::{self, Boundary};
use crate::error::SimulationError;
use crate::gpu::{BoardInstance, BoardRenderer};
use crate::mouse::MouseConstraint;
use crate::populate::{BoardPopulator, BOARD_CORNER_RADIUS, BOARD_HEIGHT, BOARD_WIDTH};
use crate::spawn::SpawnContext;
use crate::textures::TextureRegistry;
use crate::time::{StepClock, STEP_DT};
use crate::viewport::DeviceClass;
use crate::world::PhysicsWorld;

/// Whether the user asked for animations to be minimized.
///
/// Desktop platforms expose no portable signal, so the preference is the
/// `REDUCE_MOTION` environment variable (any value). Checked once per
/// activation attempt, never subscribed to.
pub fn reduced_motion_preferred() -> bool {
    std::env::var_os("REDUCE_MOTION").is_some()
}

enum LifecycleState {
    Idle,
    Running(Box<Active>),
}

struct Active {
    world: PhysicsWorld,
    populator: BoardPopulator,
    spawn: SpawnContext,
    boundaries: Vec<RigidBodyHandle>,
    mouse: MouseConstraint,
    clock: StepClock,
    renderer: Option<BoardRenderer>,
    steps: u64,
}

pub struct WorldLifecycleManager {
    logical_size: (f32, f32),
    state: LifecycleState,
}

impl WorldLifecycleManager {
    /// New manager in the Idle state for a container of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            logical_size: (width, height),
            state: LifecycleState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LifecycleState::Running(_))
    }

    /// Resize handling is armed exactly while Running.
    pub fn resize_armed(&self) -> bool {
        self.is_running()
    }

    pub fn logical_size(&self) -> (f32, f32) {
        self.logical_size
    }

    /// Boards currently simulated. Zero while Idle.
    pub fn board_count(&self) -> usize {
        match &self.state {
            LifecycleState::Running(active) => active.populator.len(),
            LifecycleState::Idle => 0,
        }
    }

    /// Live boundary handles, in top/left/bottom/right order. Empty while
    /// Idle.
    pub fn boundary_handles(&self) -> &[RigidBodyHandle] {
        match &self.state {
            LifecycleState::Running(active) => &active.boundaries,
            LifecycleState::Idle => &[],
        }
    }

    /// Handles of the boards currently simulated, in texture-list order.
    pub fn board_handles(&self) -> Vec<RigidBodyHandle> {
        match &self.state {
            LifecycleState::Running(active) => {
                active.populator.boards().iter().map(|b| b.handle).collect()
            }
            LifecycleState::Idle => Vec::new(),
        }
    }

    /// Physics steps taken since the last activation. Zero while Idle.
    pub fn steps_taken(&self) -> u64 {
        match &self.state {
            LifecycleState::Running(active) => active.steps,
            LifecycleState::Idle => 0,
        }
    }

    pub fn world(&self) -> Option<&PhysicsWorld> {
        match &self.state {
            LifecycleState::Running(active) => Some(&active.world),
            LifecycleState::Idle => None,
        }
    }

    /// Bring the simulation up. No-op in effect when `reduced_motion` is
    /// set: the manager stays Idle and returns `Ok(false)`.
    ///
    /// A manager that is already Running is torn down completely first, so
    /// re-entry can never leak a previous world or clock. With `window` set
    /// the renderer is constructed too; any GPU failure rolls back to Idle
    /// and is returned. `None` activates headless, which is how the test
    /// suite and benches drive the machine.
    pub fn activate(
        &mut self,
        window: Option<&Arc<Window>>,
        texture_ids: &[String],
        class: DeviceClass,
        registry: &TextureRegistry,
        reduced_motion: bool,
    ) -> Result<bool, SimulationError> {
        self.deactivate();

        if reduced_motion {
            log::debug!("activation skipped: reduced motion preference is set");
            return Ok(false);
        }

        let (width, height) = self.logical_size;
        let mut world = PhysicsWorld::new();

        let renderer = match window {
            Some(window) => Some(pollster::block_on(BoardRenderer::new(
                window.clone(),
                self.logical_size,
                registry,
                texture_ids,
            ))?),
            None => None,
        };

        let boundaries = insert_boundaries(&mut world, &boundary::build(width, height));
        let mouse = MouseConstraint::new();

        let mut spawn = SpawnContext::new(width, height);
        let mut populator = BoardPopulator::new();
        populator.sync(&mut world, texture_ids, class, &mut spawn);

        log::info!(
            "simulation started: {} boards, {}x{}",
            populator.len(),
            width,
            height
        );

        self.state = LifecycleState::Running(Box::new(Active {
            world,
            populator,
            spawn,
            boundaries,
            mouse,
            clock: StepClock::new(),
            renderer,
            steps: 0,
        }));
        Ok(true)
    }

    /// Tear everything down. Safe to call in any state, any number of
    /// times; the end state is always the same clean Idle.
    pub fn deactivate(&mut self) {
        let state = std::mem::replace(&mut self.state, LifecycleState::Idle);
        if let LifecycleState::Running(mut active) = state {
            // Clock and renderer die with `active`; emptying the world
            // first keeps body removal from ever observing a half-dropped
            // aggregate (and our worlds carry no event handlers, so no
            // removal callbacks can recurse into this teardown).
            active.world.clear();
            log::info!("simulation stopped");
        }
    }

    /// React to a container resize.
    ///
    /// While Idle this only records the dimensions for the next activation.
    /// While Running it resizes the render surface and swaps the boundary
    /// walls atomically: the old four are removed and the new four inserted
    /// within this call, so no step ever sees zero or eight walls.
    pub fn handle_resize(
        &mut self,
        width: f32,
        height: f32,
        physical: Option<winit::dpi::PhysicalSize<u32>>,
    ) {
        self.logical_size = (width, height);

        let LifecycleState::Running(active) = &mut self.state else {
            return;
        };

        if let (Some(renderer), Some(physical)) = (active.renderer.as_mut(), physical) {
            renderer.resize(physical, (width, height));
        }

        for handle in active.boundaries.drain(..) {
            active.world.remove_body(handle);
        }
        active.boundaries =
            insert_boundaries(&mut active.world, &boundary::build(width, height));
        active.spawn.set_dimensions(width, height);
    }

    /// Replace the texture list. Re-populates immediately while Running;
    /// while Idle this is a no-op and the caller's next activation supplies
    /// the current list.
    pub fn sync_textures(&mut self, texture_ids: &[String], class: DeviceClass) {
        if let LifecycleState::Running(active) = &mut self.state {
            active
                .populator
                .sync(&mut active.world, texture_ids, class, &mut active.spawn);
        }
    }

    /// Advance physics by however many fixed steps are due. No-op while
    /// Idle: a torn-down manager can never tick.
    pub fn tick(&mut self) {
        let LifecycleState::Running(active) = &mut self.state else {
            return;
        };
        for _ in 0..active.clock.advance() {
            active.mouse.apply(&mut active.world, STEP_DT);
            active.world.step(STEP_DT);
            active.steps += 1;
        }
    }

    /// Draw the current frame, if a renderer exists.
    ///
    /// Surface loss reconfigures and retries next frame; out-of-memory
    /// drops the renderer so the decoration dies quietly while physics
    /// (and the host) keep going.
    pub fn render(&mut self) {
        let LifecycleState::Running(active) = &mut self.state else {
            return;
        };
        let Some(renderer) = active.renderer.as_mut() else {
            return;
        };

        let half_extents = [BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0];
        let boards: Vec<(BoardInstance, u32)> = active
            .populator
            .boards()
            .iter()
            .filter_map(|board| {
                let center = active.world.body_position(board.handle)?;
                let rotation = active.world.body_rotation(board.handle)?;
                Some((
                    BoardInstance {
                        center: [center.x, center.y],
                        half_extents,
                        rotation,
                        corner_radius: BOARD_CORNER_RADIUS,
                    },
                    renderer.slot_for(&board.texture_id),
                ))
            })
            .collect();

        match renderer.render(&boards) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                let (w, h) = renderer.surface_size();
                let logical = self.logical_size;
                renderer.resize(winit::dpi::PhysicalSize::new(w, h), logical);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("render surface out of memory, disabling rendering");
                active.renderer = None;
            }
            Err(e) => log::debug!("dropped frame: {:?}", e),
        }
    }

    /// Forward pointer motion in container logical coordinates.
    pub fn cursor_moved(&mut self, position: Vec2) {
        if let LifecycleState::Running(active) = &mut self.state {
            active.mouse.cursor_moved(position);
        }
    }

    pub fn mouse_pressed(&mut self) {
        if let LifecycleState::Running(active) = &mut self.state {
            active.mouse.press(&active.world);
        }
    }

    pub fn mouse_released(&mut self) {
        if let LifecycleState::Running(active) = &mut self.state {
            active.mouse.release();
        }
    }
}

impl Drop for WorldLifecycleManager {
    fn drop(&mut self) {
        self.deactivate();
    }
}

fn insert_boundaries(world: &mut PhysicsWorld, walls: &[Boundary; 4]) -> Vec<RigidBodyHandle> {
    walls
        .iter()
        .map(|wall| {
            let body = RigidBodyBuilder::fixed()
                .translation(vector![wall.center.x, wall.center.y])
                .build();
            let collider =
                ColliderBuilder::cuboid(wall.half_extents.x, wall.half_extents.y).build();
            world.insert(body, collider)
        })
        .collect()
}
