//! Static collision walls sized to the container.
//!
//! Four invisible walls sit just outside the container edges and keep the
//! boards inside. They are rebuilt from scratch on every resize; the
//! lifecycle manager removes the old set before inserting the new one so
//! the world never holds zero or eight walls.

use glam::Vec2;

/// Wall thickness in logical units.
pub const BOUNDARY_THICKNESS: f32 = 20.0;

/// One static wall: center position plus half-extents, y-down coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub center: Vec2,
    pub half_extents: Vec2,
}

/// Compute the four walls for a container of the given logical size.
///
/// Pure: no world access, no side effects. Each wall is centered half a
/// thickness outside its edge, so the inner faces line up exactly with the
/// container bounds:
///
/// - top: `(w/2, -10)`, size `w x 20`
/// - bottom: `(w/2, h+10)`, size `w x 20`
/// - left: `(-10, h/2)`, size `20 x h`
/// - right: `(w+10, h/2)`, size `20 x h`
pub fn build(width: f32, height: f32) -> [Boundary; 4] {
    let half = BOUNDARY_THICKNESS / 2.0;
    let horizontal = Vec2::new(width / 2.0, half);
    let vertical = Vec2::new(half, height / 2.0);

    [
        Boundary {
            center: Vec2::new(width / 2.0, -half),
            half_extents: horizontal,
        },
        Boundary {
            center: Vec2::new(-half, height / 2.0),
            half_extents: vertical,
        },
        Boundary {
            center: Vec2::new(width / 2.0, height + half),
            half_extents: horizontal,
        },
        Boundary {
            center: Vec2::new(width + half, height / 2.0),
            half_extents: vertical,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_for_800_by_600() {
        let walls = build(800.0, 600.0);

        // top
        assert_eq!(walls[0].center, Vec2::new(400.0, -10.0));
        assert_eq!(walls[0].half_extents, Vec2::new(400.0, 10.0));
        // left
        assert_eq!(walls[1].center, Vec2::new(-10.0, 300.0));
        assert_eq!(walls[1].half_extents, Vec2::new(10.0, 300.0));
        // bottom
        assert_eq!(walls[2].center, Vec2::new(400.0, 610.0));
        assert_eq!(walls[2].half_extents, Vec2::new(400.0, 10.0));
        // right
        assert_eq!(walls[3].center, Vec2::new(810.0, 300.0));
        assert_eq!(walls[3].half_extents, Vec2::new(10.0, 300.0));
    }

    #[test]
    fn test_walls_track_container_size() {
        let walls = build(1000.0, 400.0);

        assert_eq!(walls[0].center, Vec2::new(500.0, -10.0));
        assert_eq!(walls[2].center, Vec2::new(500.0, 410.0));
        assert_eq!(walls[3].center, Vec2::new(1010.0, 200.0));
        assert_eq!(walls[1].half_extents, Vec2::new(10.0, 200.0));
    }

    #[test]
    fn test_build_is_pure() {
        assert_eq!(build(640.0, 480.0), build(640.0, 480.0));
    }
}
