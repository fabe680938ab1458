//! Camera state.

use glam::{DVec2, DVec3};

/// Perspective camera as seen by the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub focal_point: DVec3,
    pub position: DVec3,
    pub view_up: DVec3,
    /// Near and far clipping distances.
    pub clipping_range: DVec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            focal_point: DVec3::ZERO,
            position: DVec3::new(0.0, 0.0, 1.0),
            view_up: DVec3::Y,
            clipping_range: DVec2::new(0.01, 1000.01),
        }
    }
}

impl Camera {
    /// Camera at `position` looking at `focal_point`.
    pub fn looking_at(position: DVec3, focal_point: DVec3) -> Self {
        Self {
            position,
            focal_point,
            ..Self::default()
        }
    }

    /// Distance from position to focal point.
    pub fn distance(&self) -> f64 {
        self.position.distance(self.focal_point)
    }
}
