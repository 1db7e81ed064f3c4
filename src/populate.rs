//! Board population: one dynamic body per effective texture id.
//!
//! The populator owns the set of boards it has added to the world and is
//! the only component allowed to add or remove them. Synchronization is
//! wholesale replacement: the previous set is explicitly removed before the
//! new one is created, with poses re-rolled each time. While the world is
//! torn down no populator exists, so population requests while Idle are
//! structurally impossible; boards appear lazily on the next activation
//! with the then-current texture list.

use rapier2d::prelude::*;

use crate::spawn::SpawnContext;
use crate::viewport::DeviceClass;
use crate::world::PhysicsWorld;

/// Board collider footprint in logical units.
pub const BOARD_WIDTH: f32 = 80.0;
pub const BOARD_HEIGHT: f32 = 285.0;
/// Corner rounding of the board silhouette.
pub const BOARD_CORNER_RADIUS: f32 = 40.0;
/// Bouncy enough to keep drifting off the walls.
pub const BOARD_RESTITUTION: f32 = 0.8;
/// Near-frictionless so boards slide rather than stack.
pub const BOARD_FRICTION: f32 = 0.005;

/// A board body living in the world, tagged with its texture identifier.
#[derive(Debug, Clone)]
pub struct Board {
    pub handle: RigidBodyHandle,
    pub texture_id: String,
}

/// Owns every board this simulation instance has put into the world.
#[derive(Debug, Default)]
pub struct BoardPopulator {
    boards: Vec<Board>,
}

impl BoardPopulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boards currently in the world, in texture-list order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Replace the populated set with one board per capped texture id.
    ///
    /// Mobile keeps the first [`MOBILE_BOARD_CAP`] entries; Desktop keeps
    /// them all. Previously added boards are removed from the world before
    /// any new body is created.
    ///
    /// [`MOBILE_BOARD_CAP`]: crate::viewport::MOBILE_BOARD_CAP
    pub fn sync(
        &mut self,
        world: &mut PhysicsWorld,
        texture_ids: &[String],
        class: DeviceClass,
        spawn: &mut SpawnContext,
    ) {
        self.clear(world);

        let effective = match class.board_cap() {
            Some(cap) => &texture_ids[..texture_ids.len().min(cap)],
            None => texture_ids,
        };

        for id in effective {
            let handle = spawn_board(world, spawn);
            self.boards.push(Board {
                handle,
                texture_id: id.clone(),
            });
        }
    }

    /// Remove every board this populator added.
    pub fn clear(&mut self, world: &mut PhysicsWorld) {
        for board in self.boards.drain(..) {
            world.remove_body(board.handle);
        }
    }
}

fn spawn_board(world: &mut PhysicsWorld, spawn: &mut SpawnContext) -> RigidBodyHandle {
    let position = spawn.board_position();
    let rotation = spawn.board_rotation();

    // Gravity is gentle enough that a resting board would hit rapier's
    // sleep threshold and freeze mid-drift; boards stay awake for life.
    let body = RigidBodyBuilder::dynamic()
        .translation(vector![position.x, position.y])
        .rotation(rotation)
        .can_sleep(false)
        .build();

    // round_cuboid inflates its core cuboid by the border radius, so the
    // half-extents shrink by one radius to keep the 80x285 footprint.
    let hx = (BOARD_WIDTH / 2.0 - BOARD_CORNER_RADIUS).max(0.0);
    let hy = (BOARD_HEIGHT / 2.0 - BOARD_CORNER_RADIUS).max(0.0);
    let collider = ColliderBuilder::round_cuboid(hx, hy, BOARD_CORNER_RADIUS)
        .restitution(BOARD_RESTITUTION)
        .friction(BOARD_FRICTION)
        .build();

    world.insert(body, collider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("deck-{i}")).collect()
    }

    #[test]
    fn test_desktop_populates_all() {
        let mut world = PhysicsWorld::new();
        let mut populator = BoardPopulator::new();
        let mut spawn = SpawnContext::with_seed(800.0, 600.0, 1);

        populator.sync(&mut world, &ids(5), DeviceClass::Desktop, &mut spawn);
        assert_eq!(populator.len(), 5);
        assert_eq!(world.body_count(), 5);
    }

    #[test]
    fn test_mobile_caps_at_three() {
        let mut world = PhysicsWorld::new();
        let mut populator = BoardPopulator::new();
        let mut spawn = SpawnContext::with_seed(800.0, 600.0, 1);

        populator.sync(&mut world, &ids(5), DeviceClass::Mobile, &mut spawn);
        assert_eq!(populator.len(), 3);
        assert_eq!(world.body_count(), 3);

        // The first three ids survive the cap, in order.
        let kept: Vec<&str> = populator
            .boards()
            .iter()
            .map(|b| b.texture_id.as_str())
            .collect();
        assert_eq!(kept, vec!["deck-0", "deck-1", "deck-2"]);
    }

    #[test]
    fn test_mobile_with_fewer_than_cap() {
        let mut world = PhysicsWorld::new();
        let mut populator = BoardPopulator::new();
        let mut spawn = SpawnContext::with_seed(800.0, 600.0, 1);

        populator.sync(&mut world, &ids(2), DeviceClass::Mobile, &mut spawn);
        assert_eq!(populator.len(), 2);
    }

    #[test]
    fn test_sync_replaces_previous_set() {
        let mut world = PhysicsWorld::new();
        let mut populator = BoardPopulator::new();
        let mut spawn = SpawnContext::with_seed(800.0, 600.0, 1);

        populator.sync(&mut world, &ids(5), DeviceClass::Desktop, &mut spawn);
        let old_handles: Vec<_> = populator.boards().iter().map(|b| b.handle).collect();

        populator.sync(&mut world, &ids(2), DeviceClass::Desktop, &mut spawn);
        assert_eq!(populator.len(), 2);
        assert_eq!(world.body_count(), 2);
        for handle in old_handles {
            assert!(world.body(handle).is_none());
        }
    }

    #[test]
    fn test_boards_spawn_in_upper_half() {
        let mut world = PhysicsWorld::new();
        let mut populator = BoardPopulator::new();
        let mut spawn = SpawnContext::with_seed(800.0, 600.0, 42);

        populator.sync(&mut world, &ids(10), DeviceClass::Desktop, &mut spawn);
        for board in populator.boards() {
            let pos = world.body_position(board.handle).unwrap();
            assert!(pos.y <= 300.0, "board spawned below the upper half: {pos:?}");
        }
    }
}
