//! Homogeneous numeric arrays.
//!
//! A [`DataArray`] is the unit of binary payload in a scene: point
//! coordinates, cell connectivity, per-point/per-cell attributes and colors
//! are all data arrays. Values are stored as typed vectors and viewed as raw
//! host-order bytes when they are written out.

use smallvec::SmallVec;

use crate::util::{magnitude, ArrayElement, DataType, Error, Result};

/// Typed storage behind a [`DataArray`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayValues {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    IdType(Vec<i64>),
}

/// Run `$body` with `$v` bound to the typed vector inside an [`ArrayValues`].
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            ArrayValues::Int8($v) => $body,
            ArrayValues::Uint8($v) => $body,
            ArrayValues::Int16($v) => $body,
            ArrayValues::Uint16($v) => $body,
            ArrayValues::Int32($v) => $body,
            ArrayValues::Uint32($v) => $body,
            ArrayValues::Float32($v) => $body,
            ArrayValues::Float64($v) => $body,
            ArrayValues::IdType($v) => $body,
        }
    };
}

/// Same as [`with_values!`] but rebuilds an [`ArrayValues`] of the same kind.
macro_rules! map_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            ArrayValues::Int8($v) => ArrayValues::Int8($body),
            ArrayValues::Uint8($v) => ArrayValues::Uint8($body),
            ArrayValues::Int16($v) => ArrayValues::Int16($body),
            ArrayValues::Uint16($v) => ArrayValues::Uint16($body),
            ArrayValues::Int32($v) => ArrayValues::Int32($body),
            ArrayValues::Uint32($v) => ArrayValues::Uint32($body),
            ArrayValues::Float32($v) => ArrayValues::Float32($body),
            ArrayValues::Float64($v) => ArrayValues::Float64($body),
            ArrayValues::IdType($v) => ArrayValues::IdType($body),
        }
    };
}

macro_rules! impl_from_vec {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$t>> for ArrayValues {
                fn from(v: Vec<$t>) -> Self {
                    ArrayValues::$variant(v)
                }
            }
        )*
    };
}

impl_from_vec! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64,
    i64 => IdType,
}

impl ArrayValues {
    /// Element kind of the storage.
    pub fn data_type(&self) -> DataType {
        fn kind<T: ArrayElement>(_: &[T]) -> DataType {
            T::DATA_TYPE
        }
        with_values!(self, v => kind(v.as_slice()))
    }

    /// Number of scalar values.
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw host-order bytes of the values.
    pub fn as_bytes(&self) -> &[u8] {
        with_values!(self, v => bytemuck::cast_slice(v.as_slice()))
    }

    /// Value at `index` widened to f64.
    #[inline]
    pub fn get_f64(&self, index: usize) -> f64 {
        with_values!(self, v => v[index].to_f64())
    }
}

/// Named, multi-component numeric array.
#[derive(Clone, Debug, PartialEq)]
pub struct DataArray {
    name: Option<String>,
    number_of_components: usize,
    component_names: Vec<Option<String>>,
    values: ArrayValues,
}

impl DataArray {
    /// Create an array with the given tuple width.
    ///
    /// Fails if `number_of_components` is zero or does not divide the
    /// number of values.
    pub fn new(
        name: impl Into<String>,
        number_of_components: usize,
        values: impl Into<ArrayValues>,
    ) -> Result<Self> {
        let mut array = Self::unnamed(number_of_components, values)?;
        array.name = Some(name.into());
        Ok(array)
    }

    /// Create an array without a name.
    pub fn unnamed(number_of_components: usize, values: impl Into<ArrayValues>) -> Result<Self> {
        let values = values.into();
        if number_of_components == 0 {
            return Err(Error::invalid("array must have at least one component"));
        }
        if values.len() % number_of_components != 0 {
            return Err(Error::invalid(format!(
                "{} values do not form whole tuples of {} components",
                values.len(),
                number_of_components
            )));
        }
        Ok(Self {
            name: None,
            number_of_components,
            component_names: vec![None; number_of_components],
            values,
        })
    }

    /// Array whose values are known to form whole tuples.
    pub(crate) fn from_parts(
        name: Option<String>,
        number_of_components: usize,
        values: ArrayValues,
    ) -> Self {
        debug_assert!(number_of_components > 0 && values.len() % number_of_components == 0);
        Self {
            name,
            number_of_components,
            component_names: vec![None; number_of_components],
            values,
        }
    }

    /// Single-component array.
    pub fn scalars(name: impl Into<String>, values: impl Into<ArrayValues>) -> Self {
        Self {
            name: Some(name.into()),
            number_of_components: 1,
            component_names: vec![None],
            values: values.into(),
        }
    }

    /// Unnamed single-component index array.
    pub fn ids(values: Vec<i64>) -> Self {
        Self {
            name: None,
            number_of_components: 1,
            component_names: vec![None],
            values: ArrayValues::IdType(values),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Builder-style [`set_name`](Self::set_name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Label a component. Out-of-range components are ignored.
    pub fn set_component_name(&mut self, component: usize, name: impl Into<String>) {
        if let Some(slot) = self.component_names.get_mut(component) {
            *slot = Some(name.into());
        }
    }

    pub fn component_name(&self, component: usize) -> Option<&str> {
        self.component_names.get(component).and_then(|n| n.as_deref())
    }

    pub fn data_type(&self) -> DataType {
        self.values.data_type()
    }

    pub fn number_of_components(&self) -> usize {
        self.number_of_components
    }

    pub fn number_of_tuples(&self) -> usize {
        self.values.len() / self.number_of_components
    }

    /// Total number of scalar values (`components * tuples`).
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &ArrayValues {
        &self.values
    }

    /// Raw host-order bytes of the values.
    pub fn as_bytes(&self) -> &[u8] {
        self.values.as_bytes()
    }

    /// One component of one tuple, widened to f64.
    #[inline]
    pub fn component(&self, tuple: usize, component: usize) -> f64 {
        self.values.get_f64(tuple * self.number_of_components + component)
    }

    /// All components of one tuple, widened to f64.
    pub fn tuple(&self, tuple: usize) -> SmallVec<[f64; 4]> {
        (0..self.number_of_components)
            .map(|c| self.component(tuple, c))
            .collect()
    }

    /// Value range of one component, or of the tuple magnitude when
    /// `component` is `None`.
    ///
    /// NaN values are skipped. Returns `None` for an empty or all-NaN array.
    pub fn range(&self, component: Option<usize>) -> Option<(f64, f64)> {
        let mut out: Option<(f64, f64)> = None;
        for t in 0..self.number_of_tuples() {
            let v = match component {
                Some(c) => self.component(t, c),
                None => magnitude(self.tuple(t)),
            };
            if v.is_nan() {
                continue;
            }
            out = Some(match out {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        out
    }

    /// New array holding the tuples at `ids`, in that order.
    pub fn gather(&self, ids: &[usize]) -> Self {
        let n = self.number_of_components;
        let values = map_values!(&self.values, v => {
            let mut out = Vec::with_capacity(ids.len() * n);
            for &id in ids {
                out.extend_from_slice(&v[id * n..(id + 1) * n]);
            }
            out
        });
        Self {
            name: self.name.clone(),
            number_of_components: n,
            component_names: self.component_names.clone(),
            values,
        }
    }

    /// Returns true when `other` can be appended to this array.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.data_type() == other.data_type()
            && self.number_of_components == other.number_of_components
    }

    /// Append the tuples of a compatible array.
    pub fn append(&mut self, other: &Self) -> Result<()> {
        if !self.is_compatible(other) {
            return Err(Error::invalid(format!(
                "cannot append {} array with {} components to {} array with {} components",
                other.data_type(),
                other.number_of_components,
                self.data_type(),
                self.number_of_components
            )));
        }
        macro_rules! extend {
            ($dst:expr, $src:expr; $($variant:ident),*) => {
                match ($dst, $src) {
                    $((ArrayValues::$variant(a), ArrayValues::$variant(b)) => a.extend_from_slice(b),)*
                    _ => unreachable!("kinds checked above"),
                }
            };
        }
        extend!(&mut self.values, &other.values; Int8, Uint8, Int16, Uint16, Int32, Uint32, Float32, Float64, IdType);
        Ok(())
    }

    /// Copy of this array with every value widened to f64.
    pub fn to_float64(&self) -> Self {
        let values = (0..self.values.len()).map(|i| self.values.get_f64(i)).collect::<Vec<_>>();
        Self {
            name: self.name.clone(),
            number_of_components: self.number_of_components,
            component_names: self.component_names.clone(),
            values: ArrayValues::Float64(values),
        }
    }
}
