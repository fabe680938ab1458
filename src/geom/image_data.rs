//! Regular image / volume dataset.

use crate::core::DataSetAttributes;

/// Axis-aligned regular grid described by origin, spacing and index extent.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub origin: [f64; 3],
    pub spacing: [f64; 3],
    /// Inclusive index bounds `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    pub extent: [i32; 6],
    pub point_data: DataSetAttributes,
    pub cell_data: DataSetAttributes,
    pub field_data: DataSetAttributes,
}

impl Default for ImageData {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            spacing: [1.0; 3],
            extent: [0, -1, 0, -1, 0, -1],
            point_data: DataSetAttributes::new(),
            cell_data: DataSetAttributes::new(),
            field_data: DataSetAttributes::new(),
        }
    }
}

impl ImageData {
    /// Image with `dims` points along each axis, starting at index 0.
    pub fn with_dimensions(dims: [usize; 3]) -> Self {
        let hi = |d: usize| d as i32 - 1;
        Self {
            extent: [0, hi(dims[0]), 0, hi(dims[1]), 0, hi(dims[2])],
            ..Self::default()
        }
    }

    /// Number of points along each axis.
    pub fn dimensions(&self) -> [usize; 3] {
        let dim = |axis: usize| (self.extent[2 * axis + 1] - self.extent[2 * axis] + 1).max(0) as usize;
        [dim(0), dim(1), dim(2)]
    }

    pub fn num_points(&self) -> usize {
        self.dimensions().iter().product()
    }

    pub fn num_cells(&self) -> usize {
        let dims = self.dimensions();
        if dims.iter().any(|&d| d == 0) {
            return 0;
        }
        dims.iter().map(|&d| d.saturating_sub(1).max(1)).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let image = ImageData::with_dimensions([4, 3, 2]);
        assert_eq!(image.extent, [0, 3, 0, 2, 0, 1]);
        assert_eq!(image.num_points(), 24);
        assert_eq!(image.num_cells(), 6);

        let flat = ImageData::with_dimensions([4, 4, 1]);
        assert_eq!(flat.num_cells(), 9);

        assert_eq!(ImageData::default().num_points(), 0);
    }
}
