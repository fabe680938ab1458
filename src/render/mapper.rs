//! Binding between a prop and the dataset it draws.

use std::rc::Rc;

use super::{ColorMode, LookupTable, ScalarsToColors};
use crate::core::ArrayRef;
use crate::geom::DataObject;

/// Where a mapper looks for its color scalars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ScalarMode {
    #[default]
    Default = 0,
    UsePointData = 1,
    UseCellData = 2,
    UsePointFieldData = 3,
    UseCellFieldData = 4,
    UseFieldData = 5,
}

/// How the color array is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArrayAccessMode {
    #[default]
    ById,
    ByName,
}

/// Dataset plus coloring configuration of one prop.
#[derive(Clone, Debug)]
pub struct Mapper {
    pub input: Option<Rc<DataObject>>,
    pub scalar_visibility: bool,
    pub scalar_mode: ScalarMode,
    pub color_mode: ColorMode,
    pub array_access_mode: ArrayAccessMode,
    pub array_name: String,
    pub array_id: Option<usize>,
    pub lookup_table: Rc<dyn ScalarsToColors>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self {
            input: None,
            scalar_visibility: true,
            scalar_mode: ScalarMode::Default,
            color_mode: ColorMode::Default,
            array_access_mode: ArrayAccessMode::ById,
            array_name: String::new(),
            array_id: None,
            lookup_table: Rc::new(LookupTable::default()),
        }
    }
}

impl Mapper {
    /// Mapper drawing `input` with default coloring.
    pub fn new(input: impl Into<DataObject>) -> Self {
        Self::shared(Rc::new(input.into()))
    }

    /// Mapper drawing a dataset shared with other mappers.
    pub fn shared(input: Rc<DataObject>) -> Self {
        Self {
            input: Some(input),
            ..Self::default()
        }
    }

    pub fn with_lookup_table(mut self, table: impl ScalarsToColors + 'static) -> Self {
        self.lookup_table = Rc::new(table);
        self
    }

    /// Color by a named point array.
    pub fn color_by_point_array(mut self, name: impl Into<String>) -> Self {
        self.scalar_mode = ScalarMode::UsePointFieldData;
        self.array_access_mode = ArrayAccessMode::ByName;
        self.array_name = name.into();
        self
    }

    /// Color by a named cell array.
    pub fn color_by_cell_array(mut self, name: impl Into<String>) -> Self {
        self.scalar_mode = ScalarMode::UseCellFieldData;
        self.array_access_mode = ArrayAccessMode::ByName;
        self.array_name = name.into();
        self
    }

    /// Array selected for coloring, per the access mode.
    pub fn color_array(&self) -> Option<ArrayRef> {
        match self.array_access_mode {
            ArrayAccessMode::ByName => Some(ArrayRef::Name(self.array_name.clone())),
            ArrayAccessMode::ById => self.array_id.map(ArrayRef::Index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ImageData;

    #[test]
    fn test_color_array_selection() {
        let mapper = Mapper::new(ImageData::default());
        assert_eq!(mapper.color_array(), None);

        let by_id = Mapper {
            array_id: Some(2),
            ..Mapper::default()
        };
        assert_eq!(by_id.color_array(), Some(ArrayRef::Index(2)));

        let by_name = Mapper::default().color_by_cell_array("pressure");
        assert_eq!(by_name.scalar_mode, ScalarMode::UseCellFieldData);
        assert_eq!(by_name.color_array(), Some(ArrayRef::Name("pressure".into())));
    }
}
