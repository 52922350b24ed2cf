//! Screen-space nearest-point picking.
//!
//! A linear scan over the visible cloud: project every point through
//! the camera transform, keep the one closest to the cursor if it lands
//! inside the pick radius. Deliberately not index-accelerated — above
//! [`MAX_PICK_POINTS`] picking is skipped outright so mouse-move
//! handling stays responsive on large clouds.

use glam::{Vec2, Vec3};

use crate::camera::CameraTransform;

/// Hard cutoff: clouds larger than this are never picked against.
pub const MAX_PICK_POINTS: usize = 50_000;

/// Default pick radius around the cursor, in pixels.
pub const DEFAULT_PICK_RADIUS: f32 = 20.0;

/// Index of the visible point nearest to `cursor`, if any lies strictly
/// within `threshold` pixels.
///
/// Returns `None` for an empty cloud, for a cloud above
/// [`MAX_PICK_POINTS`], and when the nearest projected point is at or
/// beyond the threshold. Ties resolve to the lowest visible index: the
/// scan only replaces the running minimum on a strictly smaller
/// distance.
#[must_use]
pub fn pick_nearest(
    positions: &[Vec3],
    transform: &CameraTransform,
    cursor: Vec2,
    threshold: f32,
) -> Option<usize> {
    if positions.is_empty() || positions.len() > MAX_PICK_POINTS {
        return None;
    }

    let mut best_index = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &point) in positions.iter().enumerate() {
        let dist = transform.project(point).distance_squared(cursor);
        if dist < best_dist {
            best_dist = dist;
            best_index = i;
        }
    }

    (best_dist < threshold * threshold).then_some(best_index)
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;

    /// Identity view-projection over a 200x200 viewport: world (x, y)
    /// land at pixel ((x+1)*100, (1-y)*100), so screen distances are
    /// exact.
    fn flat_transform() -> CameraTransform {
        CameraTransform {
            view_proj: Mat4::IDENTITY,
            viewport: Vec2::new(200.0, 200.0),
        }
    }

    #[test]
    fn picks_the_point_under_the_cursor() {
        let positions = vec![
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
        ];
        let t = flat_transform();
        let cursor = t.project(positions[1]);
        assert_eq!(
            pick_nearest(&positions, &t, cursor, DEFAULT_PICK_RADIUS),
            Some(1)
        );
    }

    #[test]
    fn cursor_beyond_threshold_picks_nothing() {
        let positions = vec![Vec3::ZERO];
        let t = flat_transform();
        // World origin sits at pixel (100, 100); 25px away with a 20px
        // radius is out of reach.
        let cursor = Vec2::new(125.0, 100.0);
        assert_eq!(pick_nearest(&positions, &t, cursor, 20.0), None);
    }

    #[test]
    fn threshold_is_strict() {
        let positions = vec![Vec3::ZERO];
        let t = flat_transform();
        let cursor = Vec2::new(120.0, 100.0);
        // Exactly at the radius: not picked.
        assert_eq!(pick_nearest(&positions, &t, cursor, 20.0), None);
        // Just inside: picked.
        assert_eq!(pick_nearest(&positions, &t, cursor, 20.001), Some(0));
    }

    #[test]
    fn ties_resolve_to_the_lowest_index() {
        // Two points projecting to the same pixel.
        let positions = vec![Vec3::ZERO, Vec3::ZERO, Vec3::new(0.9, 0.9, 0.0)];
        let t = flat_transform();
        let cursor = Vec2::new(100.0, 100.0);
        assert_eq!(pick_nearest(&positions, &t, cursor, 20.0), Some(0));
    }

    #[test]
    fn empty_cloud_picks_nothing() {
        let t = flat_transform();
        assert_eq!(
            pick_nearest(&[], &t, Vec2::new(100.0, 100.0), 20.0),
            None
        );
    }

    #[test]
    fn oversized_cloud_skips_picking_entirely() {
        let positions = vec![Vec3::ZERO; MAX_PICK_POINTS + 10_000];
        let t = flat_transform();
        // Cursor dead on every point — still refused.
        assert_eq!(
            pick_nearest(&positions, &t, Vec2::new(100.0, 100.0), 20.0),
            None
        );
    }

    #[test]
    fn boundary_cloud_size_is_still_pickable() {
        let positions = vec![Vec3::ZERO; MAX_PICK_POINTS];
        let t = flat_transform();
        assert_eq!(
            pick_nearest(&positions, &t, Vec2::new(100.0, 100.0), 20.0),
            Some(0)
        );
    }
}
