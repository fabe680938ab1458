//! Scalar-to-color transfer functions.

use std::fmt;

use crate::core::{ArrayValues, DataArray};
use crate::util::{hsv_to_rgb, magnitude, DataType};

/// How a mapper treats its scalars when turning them into colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ColorMode {
    /// Unsigned char scalars are used as colors, anything else is mapped.
    #[default]
    Default = 0,
    /// Always map through the lookup table.
    MapScalars = 1,
    /// Use scalars as colors directly.
    DirectScalars = 2,
}

/// Which scalar a multi-component tuple maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VectorMode {
    Magnitude,
    Component(usize),
}

impl Default for VectorMode {
    fn default() -> Self {
        Self::Component(0)
    }
}

/// Transfer function from scalar arrays to RGBA colors.
pub trait ScalarsToColors: fmt::Debug {
    /// Map `array` to an unnamed 4-component `Uint8` RGBA array with one
    /// tuple per input tuple. `component` picks the tuple component to map;
    /// `None` leaves the choice to the implementation.
    fn map_scalars(&self, array: &DataArray, color_mode: ColorMode, component: Option<usize>) -> DataArray;

    /// Scalar range covered by the table.
    fn range(&self) -> [f64; 2];

    /// Hue range, for tables that have one.
    fn hue_range(&self) -> Option<[f64; 2]> {
        None
    }
}

/// Linear HSV-ramp lookup table.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupTable {
    pub table_range: [f64; 2],
    pub hue_range: [f64; 2],
    pub saturation_range: [f64; 2],
    pub value_range: [f64; 2],
    pub alpha_range: [f64; 2],
    pub number_of_colors: usize,
    pub nan_color: [f64; 4],
    pub vector_mode: VectorMode,
}

impl Default for LookupTable {
    fn default() -> Self {
        Self {
            table_range: [0.0, 1.0],
            hue_range: [0.0, 0.66667],
            saturation_range: [1.0, 1.0],
            value_range: [1.0, 1.0],
            alpha_range: [1.0, 1.0],
            number_of_colors: 256,
            nan_color: [0.5, 0.0, 0.0, 1.0],
            vector_mode: VectorMode::default(),
        }
    }
}

#[inline]
fn lerp(range: [f64; 2], t: f64) -> f64 {
    range[0] + t * (range[1] - range[0])
}

#[inline]
fn to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table spanning `[min, max]`.
    pub fn with_range(min: f64, max: f64) -> Self {
        Self {
            table_range: [min, max],
            ..Self::default()
        }
    }

    /// Color of table entry `index`.
    pub fn table_value(&self, index: usize) -> [f64; 4] {
        let n = self.number_of_colors.max(1);
        let t = if n > 1 {
            index.min(n - 1) as f64 / (n - 1) as f64
        } else {
            0.0
        };
        let rgb = hsv_to_rgb(
            lerp(self.hue_range, t),
            lerp(self.saturation_range, t),
            lerp(self.value_range, t),
        );
        [rgb.x, rgb.y, rgb.z, lerp(self.alpha_range, t)]
    }

    /// Color of one scalar value. Values outside the range clamp to the end
    /// entries.
    pub fn map_value(&self, value: f64) -> [u8; 4] {
        if value.is_nan() {
            return self.nan_color.map(to_byte);
        }
        let n = self.number_of_colors.max(1);
        let [lo, hi] = self.table_range;
        let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
        let index = (t * n as f64).floor().clamp(0.0, (n - 1) as f64) as usize;
        self.table_value(index).map(to_byte)
    }

    fn scalar(&self, array: &DataArray, tuple: usize, component: Option<usize>) -> f64 {
        let last = array.number_of_components() - 1;
        match component.map(VectorMode::Component).unwrap_or(self.vector_mode) {
            _ if last == 0 => array.component(tuple, 0),
            VectorMode::Component(c) => array.component(tuple, c.min(last)),
            VectorMode::Magnitude => magnitude(array.tuple(tuple)),
        }
    }
}

/// Interpret tuples as colors: 1 component is luminance, 2 luminance and
/// alpha, 3 RGB, 4 or more RGBA.
fn tuples_as_colors(array: &DataArray, to_unit: impl Fn(f64) -> f64) -> Vec<u8> {
    let n = array.number_of_components();
    let mut out = Vec::with_capacity(array.number_of_tuples() * 4);
    for t in 0..array.number_of_tuples() {
        let c = |i: usize| to_byte(to_unit(array.component(t, i)));
        let rgba = match n {
            1 => [c(0), c(0), c(0), 255],
            2 => [c(0), c(0), c(0), c(1)],
            3 => [c(0), c(1), c(2), 255],
            _ => [c(0), c(1), c(2), c(3)],
        };
        out.extend_from_slice(&rgba);
    }
    out
}

impl ScalarsToColors for LookupTable {
    fn map_scalars(&self, array: &DataArray, color_mode: ColorMode, component: Option<usize>) -> DataArray {
        let direct_bytes = array.data_type() == DataType::Uint8 && color_mode != ColorMode::MapScalars;
        let rgba = if direct_bytes {
            tuples_as_colors(array, |v| v / 255.0)
        } else if color_mode == ColorMode::DirectScalars {
            if array.data_type().is_float() {
                tuples_as_colors(array, |v| v)
            } else {
                tuples_as_colors(array, |v| v.clamp(0.0, 255.0) / 255.0)
            }
        } else {
            let mut out = Vec::with_capacity(array.number_of_tuples() * 4);
            for t in 0..array.number_of_tuples() {
                out.extend_from_slice(&self.map_value(self.scalar(array, t, component)));
            }
            out
        };
        DataArray::from_parts(None, 4, ArrayValues::Uint8(rgba))
    }

    fn range(&self) -> [f64; 2] {
        self.table_range
    }

    fn hue_range(&self) -> Option<[f64; 2]> {
        Some(self.hue_range)
    }
}
