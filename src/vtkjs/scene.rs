//! Scene walker: turns renderers and their props into archive entries plus
//! a scene description.

use std::borrow::Cow;
use std::rc::Rc;

use glam::DVec3;

use super::attributes::{AttributeLocation, ColorArrayInfo};
use super::dataset::{write_data_set, write_image_data};
use super::schema::{
    ActorState, CameraState, DataSetReader, LookupTableState, MapperState, PropertyState, SceneComponent,
    SceneDescription, HTTP_DATA_SET_READER,
};
use super::ExportOptions;
use crate::core::ArchiveEntries;
use crate::geom::{DataObject, GeometryFilter, ImageData};
use crate::render::{ColorMode, Mapper, Placement, Prop, Renderer, ScalarMode};
use crate::util::{Error, Result};

/// Name given to color arrays baked from a mapper's lookup table.
pub const BAKED_COLOR_ARRAY: &str = "__CustomRGBColorArray__";

/// Hue range reported for lookup tables that have none.
pub const DEFAULT_HUE_RANGE: [f64; 2] = [0.5, 0.0];

/// Everything one walk produced, ready for packing.
#[derive(Debug)]
pub struct ExportedScene {
    pub entries: ArchiveEntries,
    pub scene: SceneDescription,
}

/// Attribute location a scalar mode reads colors from.
pub fn color_location(mode: ScalarMode) -> Option<AttributeLocation> {
    match mode {
        ScalarMode::UsePointData | ScalarMode::UsePointFieldData => Some(AttributeLocation::PointData),
        ScalarMode::UseCellData | ScalarMode::UseCellFieldData => Some(AttributeLocation::CellData),
        ScalarMode::Default | ScalarMode::UseFieldData => None,
    }
}

/// Result of resolving a mapper's coloring against its dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedColoring {
    pub info: ColorArrayInfo,
    pub color_by_array_name: String,
    pub color_mode: ColorMode,
}

/// Bake the mapper's color array through its lookup table.
///
/// When no array is found the mapper's own color mode is kept and the
/// color-by name is empty.
pub fn resolve_coloring(mapper: &Mapper, dataset: &DataObject) -> ResolvedColoring {
    let location = if mapper.scalar_visibility {
        color_location(mapper.scalar_mode)
    } else {
        None
    };
    let attributes = location.and_then(|loc| match loc {
        AttributeLocation::PointData => dataset.point_data(),
        AttributeLocation::CellData => dataset.cell_data(),
    });
    let source = attributes
        .zip(mapper.color_array())
        .and_then(|(attrs, array)| attrs.get(&array));

    match (source, location) {
        (Some(array), Some(location)) => {
            let colors = mapper
                .lookup_table
                .map_scalars(array, mapper.color_mode, None)
                .with_name(BAKED_COLOR_ARRAY);
            ResolvedColoring {
                info: ColorArrayInfo::new(colors, location),
                color_by_array_name: BAKED_COLOR_ARRAY.to_string(),
                color_mode: ColorMode::Default,
            }
        }
        _ => ResolvedColoring {
            info: ColorArrayInfo::none(),
            color_by_array_name: String::new(),
            color_mode: mapper.color_mode,
        },
    }
}

/// Identity-keyed numbering of texture images.
///
/// Ids are 1-based and assigned in first-seen order.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    seen: Vec<Rc<ImageData>>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive name of `image`, registering it on first sight. The flag is
    /// true when the image was new.
    pub fn register(&mut self, image: &Rc<ImageData>) -> (String, bool) {
        let (index, new) = match self.seen.iter().position(|s| Rc::ptr_eq(s, image)) {
            Some(i) => (i, false),
            None => {
                self.seen.push(Rc::clone(image));
                (self.seen.len() - 1, true)
            }
        };
        (format!("texture_{}", index + 1), new)
    }

    /// Registered images with their names, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &ImageData)> {
        self.seen
            .iter()
            .enumerate()
            .map(|(i, image)| (format!("texture_{}", i + 1), image.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Material settings of a prop, or the defaults when it has none.
pub fn property_state(prop: &Prop) -> PropertyState {
    match &prop.property {
        Some(p) => PropertyState {
            representation: p.representation as i32,
            edge_visibility: p.edge_visibility,
            diffuse_color: p.display_color(),
            point_size: p.point_size,
            opacity: p.opacity,
        },
        None => PropertyState {
            representation: 2,
            edge_visibility: false,
            diffuse_color: DVec3::ONE,
            point_size: 1.0,
            opacity: 1.0,
        },
    }
}

fn camera_state(renderer: &Renderer) -> CameraState {
    let camera = &renderer.active_camera;
    CameraState {
        focal_point: camera.focal_point,
        position: camera.position,
        view_up: camera.view_up,
        clipping_range: camera.clipping_range,
    }
}

/// Walks renderers in order, writing one dataset per exportable prop.
pub struct SceneWalker<'a> {
    options: &'a ExportOptions,
    filter: &'a dyn GeometryFilter,
}

impl<'a> SceneWalker<'a> {
    pub fn new(options: &'a ExportOptions, filter: &'a dyn GeometryFilter) -> Self {
        Self { options, filter }
    }

    /// Export every visible prop of `renderers`.
    ///
    /// Camera, background and center of rotation come from the last
    /// renderer. Texture images are written after all props.
    pub fn walk(&self, renderers: &[Renderer]) -> Result<ExportedScene> {
        let last = renderers.last().ok_or(Error::NoRenderers)?;

        let mut entries = ArchiveEntries::new();
        let mut textures = TextureRegistry::new();
        let mut scene = Vec::new();

        for (r, renderer) in renderers.iter().enumerate() {
            tracing::debug!("renderer {}: {} props", r, renderer.props.len());
            for prop in renderer.visible_props() {
                if let Some(component) = self.export_prop(prop, &mut entries, &mut textures)? {
                    scene.push(component);
                }
            }
        }

        for (name, image) in textures.iter() {
            write_image_data(&mut entries, image, &name, self.options)?;
        }

        tracing::info!(
            "exported {} components, {} textures, {} blobs",
            scene.len(),
            textures.len(),
            entries.blob_count()
        );

        Ok(ExportedScene {
            entries,
            scene: SceneDescription {
                fetch_gzip: self.options.compress_arrays,
                background: last.background,
                camera: camera_state(last),
                center_of_rotation: last.center_of_rotation,
                scene,
            },
        })
    }

    /// Export one prop. `Ok(None)` means the prop was skipped.
    pub fn export_prop(
        &self,
        prop: &Prop,
        entries: &mut ArchiveEntries,
        textures: &mut TextureRegistry,
    ) -> Result<Option<SceneComponent>> {
        let Some(mapper) = &prop.mapper else {
            return Ok(None);
        };
        let Some(input) = &mapper.input else {
            return Ok(None);
        };

        let dataset: Cow<'_, DataObject> = match input.as_ref() {
            DataObject::MultiBlock(composite) if composite.num_blocks() == 1 => Cow::Borrowed(&composite.blocks[0]),
            DataObject::MultiBlock(composite) => {
                tracing::debug!("merging {} blocks of prop {}", composite.num_blocks(), prop.id());
                Cow::Owned(DataObject::PolyData(self.filter.composite_to_poly(composite)))
            }
            other => Cow::Borrowed(other),
        };
        if dataset.num_points() == 0 {
            tracing::debug!("prop {} has no points, skipping", prop.id());
            return Ok(None);
        }

        let name = prop.id().to_string();
        let coloring = resolve_coloring(mapper, &dataset);
        if !write_data_set(entries, &dataset, &coloring.info, &name, self.filter, self.options)? {
            return Ok(None);
        }

        let texture = prop
            .texture
            .as_ref()
            .and_then(|t| t.input.as_ref())
            .map(|image| textures.register(image).0);

        let placement = prop.placement.unwrap_or(Placement::IDENTITY);
        let table = &mapper.lookup_table;
        tracing::debug!(
            "prop {}: {} exported, color by {:?}",
            name,
            dataset.class_name(),
            coloring.color_by_array_name
        );

        Ok(Some(SceneComponent {
            name: name.clone(),
            kind: HTTP_DATA_SET_READER.to_string(),
            http_data_set_reader: DataSetReader { url: name },
            actor: ActorState {
                origin: placement.origin,
                scale: placement.scale,
                position: placement.position,
            },
            actor_rotation: placement.orientation_wxyz,
            mapper: MapperState {
                color_by_array_name: coloring.color_by_array_name,
                color_mode: coloring.color_mode as i32,
                scalar_mode: mapper.scalar_mode as i32,
            },
            property: property_state(prop),
            lookup_table: LookupTableState {
                table_range: table.range(),
                hue_range: table.hue_range().unwrap_or(DEFAULT_HUE_RANGE),
            },
            texture,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataArray;
    use crate::geom::{points_from_vec3, CellArray, PolyData, SurfaceFilter};
    use crate::render::{Property, Representation, Texture};
    use glam::Vec3;

    fn colored_triangle() -> PolyData {
        let mut poly = PolyData::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y]))
            .with_polys(CellArray::from_cells([[0i64, 1, 2]]));
        poly.point_data.add_array(DataArray::scalars("temp", vec![0.0f32, 0.5, 1.0]));
        poly.cell_data.add_array(DataArray::scalars("region", vec![3i32]));
        poly
    }

    #[test]
    fn test_color_location() {
        assert_eq!(color_location(ScalarMode::UsePointData), Some(AttributeLocation::PointData));
        assert_eq!(color_location(ScalarMode::UseCellFieldData), Some(AttributeLocation::CellData));
        assert_eq!(color_location(ScalarMode::Default), None);
        assert_eq!(color_location(ScalarMode::UseFieldData), None);
    }

    #[test]
    fn test_resolve_point_coloring() {
        let dataset: DataObject = colored_triangle().into();
        let mapper = Mapper::new(colored_triangle()).color_by_point_array("temp");
        let coloring = resolve_coloring(&mapper, &dataset);

        assert_eq!(coloring.color_by_array_name, BAKED_COLOR_ARRAY);
        assert_eq!(coloring.color_mode, ColorMode::Default);
        assert_eq!(coloring.info.location, Some(AttributeLocation::PointData));
        let colors = coloring.info.color_array.unwrap();
        assert_eq!(colors.name(), Some(BAKED_COLOR_ARRAY));
        assert_eq!(colors.number_of_components(), 4);
        assert_eq!(colors.number_of_tuples(), 3);
    }

    #[test]
    fn test_resolve_missing_array() {
        let dataset: DataObject = colored_triangle().into();
        let mut mapper = Mapper::new(colored_triangle()).color_by_cell_array("nope");
        mapper.color_mode = ColorMode::MapScalars;
        let coloring = resolve_coloring(&mapper, &dataset);
        assert_eq!(coloring.info, ColorArrayInfo::none());
        assert_eq!(coloring.color_by_array_name, "");
        assert_eq!(coloring.color_mode, ColorMode::MapScalars);
    }

    #[test]
    fn test_scalar_visibility_off() {
        let dataset: DataObject = colored_triangle().into();
        let mut mapper = Mapper::new(colored_triangle()).color_by_point_array("temp");
        mapper.scalar_visibility = false;
        assert!(resolve_coloring(&mapper, &dataset).info.color_array.is_none());
    }

    #[test]
    fn test_texture_registry_identity() {
        let a = Rc::new(ImageData::with_dimensions([2, 2, 1]));
        let b = Rc::new(ImageData::with_dimensions([2, 2, 1]));
        let mut reg = TextureRegistry::new();
        assert_eq!(reg.register(&a), ("texture_1".to_string(), true));
        assert_eq!(reg.register(&b), ("texture_2".to_string(), true));
        assert_eq!(reg.register(&Rc::clone(&a)), ("texture_1".to_string(), false));
        let names: Vec<String> = reg.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["texture_1", "texture_2"]);
    }

    #[test]
    fn test_property_defaults() {
        let mut bare = Prop::new();
        bare.mapper = Some(Mapper::new(colored_triangle()));
        let state = property_state(&bare);
        assert_eq!(state.representation, 2);
        assert_eq!(state.diffuse_color, DVec3::ONE);

        let wire = Prop::new().with_property(Property {
            representation: Representation::Wireframe,
            color: DVec3::new(0.0, 1.0, 0.0),
            ..Property::default()
        });
        let state = property_state(&wire);
        assert_eq!(state.representation, 1);
        assert_eq!(state.diffuse_color, DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_prop_without_placement() {
        let image = Rc::new(ImageData::with_dimensions([1, 1, 1]));
        let mut prop = Prop::new().with_texture(Texture::new(image));
        prop.mapper = Some(Mapper::new(colored_triangle()));
        let options = ExportOptions::default();
        let walker = SceneWalker::new(&options, &SurfaceFilter);
        let mut entries = ArchiveEntries::new();
        let mut textures = TextureRegistry::new();

        let component = walker.export_prop(&prop, &mut entries, &mut textures).unwrap().unwrap();
        assert_eq!(component.actor.scale, DVec3::ONE);
        assert_eq!(component.actor.origin, DVec3::ZERO);
        assert_eq!(component.actor_rotation, glam::DVec4::ZERO);
        assert_eq!(component.texture.as_deref(), Some("texture_1"));
        assert_eq!(component.http_data_set_reader.url, component.name);
        assert_eq!(textures.len(), 1);
    }

    #[test]
    fn test_no_renderers() {
        let options = ExportOptions::default();
        let walker = SceneWalker::new(&options, &SurfaceFilter);
        assert!(matches!(walker.walk(&[]), Err(Error::NoRenderers)));
    }
}
