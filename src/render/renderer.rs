//! A viewport holding props, a camera and a background.

use glam::DVec3;

use super::{Camera, Prop};

/// Props drawn together under one camera.
#[derive(Clone, Debug)]
pub struct Renderer {
    pub props: Vec<Prop>,
    pub background: DVec3,
    pub active_camera: Camera,
    pub center_of_rotation: DVec3,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            props: Vec::new(),
            background: DVec3::ZERO,
            active_camera: Camera::default(),
            center_of_rotation: DVec3::ZERO,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_prop(&mut self, prop: Prop) {
        self.props.push(prop);
    }

    /// Builder-style [`add_prop`](Self::add_prop).
    pub fn with_prop(mut self, prop: Prop) -> Self {
        self.add_prop(prop);
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.active_camera = camera;
        self
    }

    pub fn with_background(mut self, background: DVec3) -> Self {
        self.background = background;
        self
    }

    /// Props that are visible.
    pub fn visible_props(&self) -> impl Iterator<Item = &Prop> {
        self.props.iter().filter(|p| p.visibility)
    }
}
