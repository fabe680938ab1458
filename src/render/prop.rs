//! Renderable props and their material and placement.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{DQuat, DVec3, DVec4};

use super::Mapper;
use crate::geom::ImageData;

static NEXT_PROP_ID: AtomicU64 = AtomicU64::new(1);

/// Surface representation of a prop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Representation {
    Points = 0,
    Wireframe = 1,
    #[default]
    Surface = 2,
}

/// Material settings of a prop.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub representation: Representation,
    /// Color used for wireframe rendering.
    pub color: DVec3,
    pub diffuse_color: DVec3,
    pub point_size: f64,
    pub opacity: f64,
    pub edge_visibility: bool,
}

impl Default for Property {
    fn default() -> Self {
        Self {
            representation: Representation::Surface,
            color: DVec3::ONE,
            diffuse_color: DVec3::ONE,
            point_size: 1.0,
            opacity: 1.0,
            edge_visibility: false,
        }
    }
}

impl Property {
    /// Color the prop is drawn with under its representation.
    pub fn display_color(&self) -> DVec3 {
        match self.representation {
            Representation::Wireframe => self.color,
            _ => self.diffuse_color,
        }
    }
}

/// 3D transform of a prop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub origin: DVec3,
    pub scale: DVec3,
    pub position: DVec3,
    /// Rotation as `[angle_degrees, axis_x, axis_y, axis_z]`.
    pub orientation_wxyz: DVec4,
}

impl Placement {
    pub const IDENTITY: Self = Self {
        origin: DVec3::ZERO,
        scale: DVec3::ONE,
        position: DVec3::ZERO,
        orientation_wxyz: DVec4::ZERO,
    };

    /// Set the orientation from a quaternion.
    pub fn with_rotation(mut self, rotation: DQuat) -> Self {
        let (axis, angle) = rotation.to_axis_angle();
        self.orientation_wxyz = if angle == 0.0 {
            DVec4::ZERO
        } else {
            DVec4::new(angle.to_degrees(), axis.x, axis.y, axis.z)
        };
        self
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Image texture applied to a prop.
#[derive(Clone, Debug, Default)]
pub struct Texture {
    /// Backing image. Identity of the `Rc` decides sharing between props.
    pub input: Option<Rc<ImageData>>,
}

impl Texture {
    pub fn new(image: Rc<ImageData>) -> Self {
        Self { input: Some(image) }
    }
}

/// One renderable element of a scene.
///
/// Capabilities the source prop may lack are optional: a prop without a
/// `property` cannot carry material settings, one without a `placement` is
/// not spatial.
#[derive(Clone, Debug)]
pub struct Prop {
    id: u64,
    pub visibility: bool,
    pub mapper: Option<Mapper>,
    pub property: Option<Property>,
    pub placement: Option<Placement>,
    pub texture: Option<Texture>,
}

impl Default for Prop {
    fn default() -> Self {
        Self::new()
    }
}

impl Prop {
    /// Visible prop with no capabilities.
    pub fn new() -> Self {
        Self {
            id: NEXT_PROP_ID.fetch_add(1, Ordering::Relaxed),
            visibility: true,
            mapper: None,
            property: None,
            placement: None,
            texture: None,
        }
    }

    /// Spatial prop with default material drawing through `mapper`.
    pub fn actor(mapper: Mapper) -> Self {
        Self {
            mapper: Some(mapper),
            property: Some(Property::default()),
            placement: Some(Placement::IDENTITY),
            ..Self::new()
        }
    }

    /// Process-unique identity of the prop.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.property = Some(property);
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visibility = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Prop::new();
        let b = Prop::new();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_display_color() {
        let mut p = Property {
            color: DVec3::new(1.0, 0.0, 0.0),
            diffuse_color: DVec3::new(0.0, 1.0, 0.0),
            ..Property::default()
        };
        assert_eq!(p.display_color(), DVec3::new(0.0, 1.0, 0.0));
        p.representation = Representation::Wireframe;
        assert_eq!(p.display_color(), DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation() {
        let p = Placement::IDENTITY.with_rotation(DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2));
        assert!((p.orientation_wxyz.x - 90.0).abs() < 1e-9);
        assert!((p.orientation_wxyz.w - 1.0).abs() < 1e-9);
        assert_eq!(Placement::IDENTITY.with_rotation(DQuat::IDENTITY).orientation_wxyz, DVec4::ZERO);
    }
}
