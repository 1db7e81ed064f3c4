//! Integration tests for the simulation lifecycle.
//!
//! These drive the lifecycle manager headless (no window, so no renderer)
//! through the same activation, resize, and teardown paths the window glue
//! uses, and check the externally observable guarantees: board caps,
//! boundary geometry, teardown idempotence, and that nothing ever ticks
//! after a teardown.

use driftdeck::prelude::*;
use driftdeck::boundary;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("deck-{i}")).collect()
}

fn activate(
    manager: &mut WorldLifecycleManager,
    n: usize,
    class: DeviceClass,
    reduced_motion: bool,
) -> bool {
    manager
        .activate(None, &ids(n), class, &TextureRegistry::new(), reduced_motion)
        .expect("headless activation cannot fail")
}

// ============================================================================
// Device capping
// ============================================================================

#[test]
fn desktop_populates_one_board_per_texture() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    assert!(activate(&mut manager, 5, DeviceClass::Desktop, false));
    assert_eq!(manager.board_count(), 5);
}

#[test]
fn mobile_populates_at_most_three_boards() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    assert!(activate(&mut manager, 5, DeviceClass::Mobile, false));
    assert_eq!(manager.board_count(), 3);

    // Fewer inputs than the cap: all of them.
    activate(&mut manager, 2, DeviceClass::Mobile, false);
    assert_eq!(manager.board_count(), 2);
}

#[test]
fn classifier_caps_by_width() {
    for width in [320.0, 600.0, 768.0] {
        assert_eq!(DeviceClass::classify(width), DeviceClass::Mobile);
    }
    for width in [769.0, 1024.0, 2560.0] {
        assert_eq!(DeviceClass::classify(width), DeviceClass::Desktop);
    }
}

// ============================================================================
// Boundary geometry
// ============================================================================

#[test]
fn boundaries_match_container_800_by_600() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    activate(&mut manager, 5, DeviceClass::Desktop, false);

    let world = manager.world().unwrap();
    let centers: Vec<Vec2> = manager
        .boundary_handles()
        .iter()
        .map(|h| world.body_position(*h).unwrap())
        .collect();

    assert_eq!(centers.len(), 4);
    assert!(centers.contains(&Vec2::new(400.0, -10.0)));
    assert!(centers.contains(&Vec2::new(-10.0, 300.0)));
    assert!(centers.contains(&Vec2::new(400.0, 610.0)));
    assert!(centers.contains(&Vec2::new(810.0, 300.0)));
}

#[test]
fn resize_while_running_rebuilds_boundaries() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    activate(&mut manager, 5, DeviceClass::Desktop, false);
    let old: Vec<_> = manager.boundary_handles().to_vec();

    manager.handle_resize(1000.0, 400.0, None);

    let world = manager.world().unwrap();
    for handle in &old {
        assert!(world.body(*handle).is_none(), "old wall outlived the resize");
    }

    let centers: Vec<Vec2> = manager
        .boundary_handles()
        .iter()
        .map(|h| world.body_position(*h).unwrap())
        .collect();
    assert_eq!(centers.len(), 4);
    assert!(centers.contains(&Vec2::new(500.0, -10.0)));
    assert!(centers.contains(&Vec2::new(-10.0, 200.0)));
    assert!(centers.contains(&Vec2::new(500.0, 410.0)));
    assert!(centers.contains(&Vec2::new(1010.0, 200.0)));

    // Atomic swap: never 0, never 8. With 5 boards the world holds
    // exactly 5 + 4 bodies after the handler returns.
    assert_eq!(world.body_count(), 9);
}

#[test]
fn pure_builder_agrees_with_world_layout() {
    let walls = boundary::build(800.0, 600.0);
    assert_eq!(walls[0].center, Vec2::new(400.0, -10.0));
    assert_eq!(walls[0].half_extents, Vec2::new(400.0, 10.0));
    assert_eq!(walls[3].center, Vec2::new(810.0, 300.0));
    assert_eq!(walls[3].half_extents, Vec2::new(10.0, 300.0));
}

// ============================================================================
// Activation cycles and teardown
// ============================================================================

#[test]
fn reduced_motion_blocks_activation() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    assert!(!activate(&mut manager, 5, DeviceClass::Desktop, true));
    assert!(!manager.is_running());
    assert_eq!(manager.board_count(), 0);

    manager.tick();
    assert_eq!(manager.steps_taken(), 0);
}

#[test]
fn teardown_twice_equals_teardown_once() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    activate(&mut manager, 3, DeviceClass::Desktop, false);

    manager.deactivate();
    manager.deactivate();

    assert!(!manager.is_running());
    assert!(!manager.resize_armed());
    assert!(manager.boundary_handles().is_empty());
    assert_eq!(manager.board_count(), 0);
}

#[test]
fn no_steps_happen_between_teardown_and_reactivation() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    activate(&mut manager, 3, DeviceClass::Desktop, false);

    // Let the clock anchor, then run a while so steps accumulate.
    manager.tick();
    std::thread::sleep(std::time::Duration::from_millis(40));
    manager.tick();

    manager.deactivate();
    std::thread::sleep(std::time::Duration::from_millis(40));
    manager.tick();
    assert_eq!(manager.steps_taken(), 0);

    // Reactivation starts a fresh clock: the first tick only anchors.
    activate(&mut manager, 3, DeviceClass::Desktop, false);
    manager.tick();
    assert_eq!(manager.steps_taken(), 0);
}

#[test]
fn repeated_cycles_never_accumulate_state() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    for _ in 0..5 {
        activate(&mut manager, 4, DeviceClass::Desktop, false);
        assert_eq!(manager.board_count(), 4);
        // 4 boards + 4 walls, never more, no matter how many cycles ran.
        assert_eq!(manager.world().unwrap().body_count(), 8);
        manager.deactivate();
        assert_eq!(manager.board_count(), 0);
    }
}

#[test]
fn texture_list_change_while_running_replaces_boards() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    activate(&mut manager, 5, DeviceClass::Desktop, false);

    manager.sync_textures(&ids(2), DeviceClass::Desktop);
    assert_eq!(manager.board_count(), 2);
    assert_eq!(manager.world().unwrap().body_count(), 6);

    // Class change to Mobile re-caps the same list.
    manager.sync_textures(&ids(5), DeviceClass::Mobile);
    assert_eq!(manager.board_count(), 3);
}

#[test]
fn boards_drift_downward_while_running() {
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    activate(&mut manager, 1, DeviceClass::Desktop, false);

    let handle = manager.board_handles()[0];
    let start = manager.world().unwrap().body_position(handle).unwrap();

    // Anchor the clock, then give it real time to pay out steps.
    manager.tick();
    std::thread::sleep(std::time::Duration::from_millis(60));
    manager.tick();

    assert!(manager.steps_taken() > 0, "clock paid out no steps");
    let end = manager.world().unwrap().body_position(handle).unwrap();
    assert!(end.y > start.y, "board did not drift down: {start:?} -> {end:?}");
}

// ============================================================================
// Visibility gate
// ============================================================================

#[test]
fn gate_drives_activation_like_the_window_glue() {
    let mut gate = VisibilityGate::new();
    let mut manager = WorldLifecycleManager::new(800.0, 600.0);
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

    // Surface below the fold: inactive, manager stays Idle.
    gate.observe(Rect::new(0.0, 900.0, 800.0, 400.0), viewport);
    assert!(!gate.is_active());

    // Scrolled half in: activate.
    gate.observe(Rect::new(0.0, 400.0, 800.0, 400.0), viewport);
    assert!(gate.is_active());
    activate(&mut manager, 3, DeviceClass::Desktop, false);
    assert!(manager.is_running());

    // Scrolled back out: deactivate.
    gate.observe(Rect::new(0.0, 900.0, 800.0, 400.0), viewport);
    assert!(!gate.is_active());
    manager.deactivate();
    assert!(!manager.is_running());

    // Unmount detaches for good.
    gate.detach();
    gate.observe(Rect::new(0.0, 400.0, 800.0, 400.0), viewport);
    assert!(!gate.is_active());
}
