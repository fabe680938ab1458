//! Named attribute arrays attached to points, cells or a whole dataset.

use super::DataArray;

/// Reference to an array inside a [`DataSetAttributes`] collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayRef {
    /// Look up by array name.
    Name(String),
    /// Look up by position.
    Index(usize),
}

impl From<&str> for ArrayRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ArrayRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for ArrayRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Ordered collection of data arrays with active-attribute designations.
///
/// Adding an array whose name is already present replaces the old one in
/// place, so names stay unique.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSetAttributes {
    arrays: Vec<DataArray>,
    scalars: Option<usize>,
    vectors: Option<usize>,
    normals: Option<usize>,
    tcoords: Option<usize>,
}

impl DataSetAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an array and return its index.
    pub fn add_array(&mut self, array: DataArray) -> usize {
        if let Some(name) = array.name() {
            if let Some(idx) = self.arrays.iter().position(|a| a.name() == Some(name)) {
                self.arrays[idx] = array;
                return idx;
            }
        }
        self.arrays.push(array);
        self.arrays.len() - 1
    }

    /// Builder-style [`add_array`](Self::add_array).
    pub fn with_array(mut self, array: DataArray) -> Self {
        self.add_array(array);
        self
    }

    /// Add an array and mark it as the active scalars.
    pub fn set_scalars(&mut self, array: DataArray) -> usize {
        let idx = self.add_array(array);
        self.scalars = Some(idx);
        idx
    }

    /// Add an array and mark it as the active vectors.
    pub fn set_vectors(&mut self, array: DataArray) -> usize {
        let idx = self.add_array(array);
        self.vectors = Some(idx);
        idx
    }

    /// Add an array and mark it as the active normals.
    pub fn set_normals(&mut self, array: DataArray) -> usize {
        let idx = self.add_array(array);
        self.normals = Some(idx);
        idx
    }

    /// Add an array and mark it as the active texture coordinates.
    pub fn set_tcoords(&mut self, array: DataArray) -> usize {
        let idx = self.add_array(array);
        self.tcoords = Some(idx);
        idx
    }

    /// Mark an existing array as the active scalars. Returns false if no
    /// array matches.
    pub fn set_active_scalars(&mut self, array: impl Into<ArrayRef>) -> bool {
        match self.position(&array.into()) {
            Some(idx) => {
                self.scalars = Some(idx);
                true
            }
            None => false,
        }
    }

    fn position(&self, array: &ArrayRef) -> Option<usize> {
        match array {
            ArrayRef::Name(name) => self.arrays.iter().position(|a| a.name() == Some(name.as_str())),
            ArrayRef::Index(idx) => (*idx < self.arrays.len()).then_some(*idx),
        }
    }

    /// Look up an array by name or index.
    pub fn get(&self, array: &ArrayRef) -> Option<&DataArray> {
        self.position(array).map(|idx| &self.arrays[idx])
    }

    pub fn get_by_name(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name() == Some(name))
    }

    pub fn array(&self, index: usize) -> Option<&DataArray> {
        self.arrays.get(index)
    }

    pub fn arrays(&self) -> &[DataArray] {
        &self.arrays
    }

    pub fn number_of_arrays(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn scalars(&self) -> Option<&DataArray> {
        self.scalars.map(|i| &self.arrays[i])
    }

    pub fn vectors(&self) -> Option<&DataArray> {
        self.vectors.map(|i| &self.arrays[i])
    }

    pub fn normals(&self) -> Option<&DataArray> {
        self.normals.map(|i| &self.arrays[i])
    }

    pub fn tcoords(&self) -> Option<&DataArray> {
        self.tcoords.map(|i| &self.arrays[i])
    }

    /// New collection holding the tuples at `ids` of every array.
    ///
    /// Active designations carry over.
    pub fn gather(&self, ids: &[usize]) -> Self {
        Self {
            arrays: self.arrays.iter().map(|a| a.gather(ids)).collect(),
            scalars: self.scalars,
            vectors: self.vectors,
            normals: self.normals,
            tcoords: self.tcoords,
        }
    }

    /// Copy keeping only the arrays that hold exactly `num_tuples` tuples.
    ///
    /// Designations pointing at a dropped array are cleared.
    pub fn with_tuple_count(&self, num_tuples: usize) -> Self {
        let mut remap = vec![None; self.arrays.len()];
        let mut arrays = Vec::with_capacity(self.arrays.len());
        for (idx, array) in self.arrays.iter().enumerate() {
            if array.number_of_tuples() == num_tuples {
                remap[idx] = Some(arrays.len());
                arrays.push(array.clone());
            } else {
                tracing::warn!(
                    "dropping array {:?}: {} tuples, expected {}",
                    array.name().unwrap_or(""),
                    array.number_of_tuples(),
                    num_tuples
                );
            }
        }
        let moved = |active: Option<usize>| active.and_then(|idx| remap[idx]);
        Self {
            scalars: moved(self.scalars),
            vectors: moved(self.vectors),
            normals: moved(self.normals),
            tcoords: moved(self.tcoords),
            arrays,
        }
    }

    /// Append several collections: only arrays present in every input with
    /// the same name, kind and width survive. Designations follow the first
    /// input.
    pub fn append_all(parts: &[&DataSetAttributes]) -> Self {
        let Some((first, rest)) = parts.split_first() else {
            return Self::default();
        };
        let mut out = Self::default();
        for array in first.arrays() {
            let Some(name) = array.name() else { continue };
            let matching: Option<Vec<&DataArray>> = rest
                .iter()
                .map(|p| p.get_by_name(name).filter(|a| a.is_compatible(array)))
                .collect();
            let Some(matching) = matching else { continue };
            let mut merged = array.clone();
            if matching.into_iter().try_for_each(|other| merged.append(other)).is_ok() {
                out.add_array(merged);
            }
        }
        let designate = |active: Option<&DataArray>| {
            active
                .and_then(|a| a.name())
                .and_then(|name| out.position(&ArrayRef::Name(name.to_string())))
        };
        let scalars = designate(first.scalars());
        let vectors = designate(first.vectors());
        let normals = designate(first.normals());
        let tcoords = designate(first.tcoords());
        out.scalars = scalars;
        out.vectors = vectors;
        out.normals = normals;
        out.tcoords = tcoords;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalars(name: &str, values: Vec<f32>) -> DataArray {
        DataArray::scalars(name, values)
    }

    #[test]
    fn test_lookup() {
        let mut pd = DataSetAttributes::new();
        pd.add_array(scalars("a", vec![1.0]));
        pd.set_scalars(scalars("b", vec![2.0]));

        assert_eq!(pd.get(&"b".into()).and_then(|a| a.name()), Some("b"));
        assert_eq!(pd.get(&0usize.into()).and_then(|a| a.name()), Some("a"));
        assert!(pd.get(&5usize.into()).is_none());
        assert!(pd.get(&"missing".into()).is_none());
        assert_eq!(pd.scalars().and_then(|a| a.name()), Some("b"));
        assert!(pd.normals().is_none());
    }

    #[test]
    fn test_replace_same_name() {
        let mut pd = DataSetAttributes::new();
        pd.add_array(scalars("a", vec![1.0]));
        let idx = pd.add_array(scalars("a", vec![3.0]));
        assert_eq!(idx, 0);
        assert_eq!(pd.number_of_arrays(), 1);
    }

    #[test]
    fn test_append_keeps_common_arrays() {
        let mut a = DataSetAttributes::new();
        a.set_scalars(scalars("t", vec![1.0, 2.0]));
        a.add_array(scalars("only_a", vec![0.0, 0.0]));
        let mut b = DataSetAttributes::new();
        b.add_array(scalars("t", vec![3.0]));

        let merged = DataSetAttributes::append_all(&[&a, &b]);
        assert_eq!(merged.number_of_arrays(), 1);
        assert_eq!(merged.scalars().map(|s| s.number_of_tuples()), Some(3));
    }

    #[test]
    fn test_tuple_count_filter_remaps_designations() {
        let mut cd = DataSetAttributes::new();
        cd.add_array(scalars("short", vec![]));
        cd.set_scalars(scalars("ok", vec![1.0, 2.0]));
        cd.set_normals(DataArray::new("n", 3, vec![0.0f32; 3]).unwrap());

        let kept = cd.with_tuple_count(2);
        assert_eq!(kept.number_of_arrays(), 1);
        assert_eq!(kept.scalars().and_then(|s| s.name()), Some("ok"));
        assert!(kept.normals().is_none());
    }
}
