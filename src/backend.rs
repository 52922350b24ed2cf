//! Rendering boundary.
//!
//! The engine never draws; it hands payloads across [`RenderBackend`]
//! and reads the camera transform back for picking. Item removal is
//! idempotent by contract — removing an id the backend no longer knows
//! is a no-op, so replot teardown never needs a presence check.

use glam::Vec3;

use crate::camera::{Camera, CameraTransform};
use crate::cloud::PointCloud;
use crate::error::StrewError;

/// Grid side length in scene units.
pub const GRID_SIZE: f32 = 20.0;
/// Grid line spacing in scene units.
pub const GRID_SPACING: f32 = 1.0;
/// Grid plane height (the floor of the normalized cube).
pub const GRID_OFFSET: f32 = -10.0;
/// Axis item length in scene units.
pub const AXIS_LENGTH: f32 = 10.0;

/// Opaque handle to an item the backend has accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(
    /// Backend-assigned identifier value.
    pub u64,
);

/// The contract a rendering backend fulfils for the engine.
///
/// Implementations are expected to draw the grid (size [`GRID_SIZE`],
/// spacing [`GRID_SPACING`], at z = [`GRID_OFFSET`]) and axes of length
/// [`AXIS_LENGTH`]) themselves; the engine only toggles their
/// visibility.
pub trait RenderBackend {
    /// Add a point-cloud item. `px_mode` selects fixed-pixel sprites;
    /// otherwise points draw as world-space geometric primitives.
    fn add_points(&mut self, cloud: &PointCloud, px_mode: bool) -> ItemId;

    /// Add a text label at a world-space position.
    fn add_text(&mut self, position: Vec3, text: &str, color: [f32; 3])
        -> ItemId;

    /// Remove an item. Removing an absent item is a no-op.
    fn remove_item(&mut self, id: ItemId);

    /// Switch between the white and dark background themes.
    fn set_background(&mut self, white: bool);

    /// Show or hide the ground grid.
    fn set_grid_visible(&mut self, visible: bool);

    /// Show or hide the axis item.
    fn set_axes_visible(&mut self, visible: bool);

    /// Current combined view-projection transform and viewport, if the
    /// view is live. `None` degrades picking to "nothing picked".
    fn camera_transform(&self) -> Option<CameraTransform>;

    /// Replace the camera wholesale (view reset).
    fn set_camera(&mut self, camera: &Camera);

    /// Re-aim the current camera at a new center, keeping its orbit.
    fn set_camera_center(&mut self, center: Vec3);

    /// Ask for a redraw. Idempotent; backends may coalesce.
    fn request_redraw(&mut self) {}
}

/// Wrap a backend construction failure into the crate's error type.
///
/// Backend initialization happens host-side (the engine is handed a
/// live backend); hosts that fail to build one surface the diagnostic
/// through this instead of crashing — the widget's controls stay
/// usable, only the view is lost.
#[must_use]
pub fn unavailable(diagnostic: impl Into<String>) -> StrewError {
    StrewError::Backend(diagnostic.into())
}


#[cfg(test)]
pub(crate) mod testing {
    use glam::Vec2;
    use rustc_hash::FxHashMap;

    use super::{Camera, CameraTransform, ItemId, PointCloud, RenderBackend, Vec3};

    /// What a [`RecordingBackend`] remembers about a live item.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum RecordedItem {
        Points { cloud: PointCloud, px_mode: bool },
        Text { position: Vec3, text: String },
    }

    /// In-memory backend double for engine-level tests.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingBackend {
        next_id: u64,
        pub items: FxHashMap<ItemId, RecordedItem>,
        pub transform: Option<CameraTransform>,
        pub white_background: bool,
        pub grid_visible: bool,
        pub axes_visible: bool,
        pub camera: Option<Camera>,
        pub camera_center: Option<Vec3>,
        pub redraws: usize,
        pub removed_absent: usize,
    }

    impl RecordingBackend {
        /// Backend with a straight-on camera over an 800x600 viewport,
        /// so projected pixel positions are predictable.
        pub fn with_live_view() -> Self {
            let camera = Camera {
                eye: Vec3::new(0.0, 0.0, 30.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect: 800.0 / 600.0,
                fovy: 60.0,
                znear: 0.1,
                zfar: 1000.0,
            };
            Self {
                transform: Some(camera.transform(800.0, 600.0)),
                ..Self::default()
            }
        }

        /// Screen position of a world point under the recorded view.
        pub fn screen_of(&self, point: Vec3) -> Vec2 {
            self.transform
                .as_ref()
                .map_or(Vec2::ZERO, |t| t.project(point))
        }

        /// All live point-cloud items.
        pub fn point_items(&self) -> Vec<&PointCloud> {
            let mut clouds: Vec<(&ItemId, &PointCloud)> = self
                .items
                .iter()
                .filter_map(|(id, item)| match item {
                    RecordedItem::Points { cloud, .. } => Some((id, cloud)),
                    RecordedItem::Text { .. } => None,
                })
                .collect();
            clouds.sort_by_key(|(id, _)| id.0);
            clouds.into_iter().map(|(_, cloud)| cloud).collect()
        }

        /// All live text labels.
        pub fn text_items(&self) -> Vec<&str> {
            self.items
                .values()
                .filter_map(|item| match item {
                    RecordedItem::Text { text, .. } => Some(text.as_str()),
                    RecordedItem::Points { .. } => None,
                })
                .collect()
        }
    }

    impl RenderBackend for RecordingBackend {
        fn add_points(&mut self, cloud: &PointCloud, px_mode: bool) -> ItemId {
            self.next_id += 1;
            let id = ItemId(self.next_id);
            let _ = self.items.insert(
                id,
                RecordedItem::Points {
                    cloud: cloud.clone(),
                    px_mode,
                },
            );
            id
        }

        fn add_text(
            &mut self,
            position: Vec3,
            text: &str,
            _color: [f32; 3],
        ) -> ItemId {
            self.next_id += 1;
            let id = ItemId(self.next_id);
            let _ = self.items.insert(
                id,
                RecordedItem::Text {
                    position,
                    text: text.to_owned(),
                },
            );
            id
        }

        fn remove_item(&mut self, id: ItemId) {
            if self.items.remove(&id).is_none() {
                self.removed_absent += 1;
            }
        }

        fn set_background(&mut self, white: bool) {
            self.white_background = white;
        }

        fn set_grid_visible(&mut self, visible: bool) {
            self.grid_visible = visible;
        }

        fn set_axes_visible(&mut self, visible: bool) {
            self.axes_visible = visible;
        }

        fn camera_transform(&self) -> Option<CameraTransform> {
            self.transform
        }

        fn set_camera(&mut self, camera: &Camera) {
            self.camera = Some(camera.clone());
        }

        fn set_camera_center(&mut self, center: Vec3) {
            self.camera_center = Some(center);
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }
}
