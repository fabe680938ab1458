//! Source-side scene: renderers, props, mappers and color transfer.
//!
//! These types stand in for the native visualization toolkit's objects. The
//! exporter reads them but never renders anything.

mod camera;
mod lookup_table;
mod mapper;
mod prop;
mod renderer;

pub use camera::Camera;
pub use lookup_table::{ColorMode, LookupTable, ScalarsToColors, VectorMode};
pub use mapper::{ArrayAccessMode, Mapper, ScalarMode};
pub use prop::{Placement, Prop, Property, Representation, Texture};
pub use renderer::Renderer;
