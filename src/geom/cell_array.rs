//! Cell connectivity in the legacy `[n, id0 .. idn-1, n, ...]` layout.

use crate::core::DataArray;
use crate::util::{Error, Result};

/// Flat cell connectivity list.
///
/// Every cell is stored as its point count followed by its point ids. This is
/// the layout the web consumer reads back, so it is written out unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellArray {
    data: Vec<i64>,
    num_cells: usize,
}

impl CellArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence of cells.
    pub fn from_cells<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[i64]>,
    {
        let mut out = Self::new();
        for cell in cells {
            out.push_cell(cell.as_ref());
        }
        out
    }

    /// Wrap an existing legacy connectivity list, checking that it walks
    /// cleanly to its end.
    pub fn from_legacy(data: Vec<i64>) -> Result<Self> {
        let mut pos = 0usize;
        let mut num_cells = 0usize;
        while pos < data.len() {
            let n = data[pos];
            if n < 0 || pos + 1 + n as usize > data.len() {
                return Err(Error::invalid(format!(
                    "cell at offset {} claims {} points past end of connectivity ({} entries)",
                    pos,
                    n,
                    data.len()
                )));
            }
            pos += 1 + n as usize;
            num_cells += 1;
        }
        Ok(Self { data, num_cells })
    }

    pub fn push_cell(&mut self, ids: &[i64]) {
        self.data.reserve(ids.len() + 1);
        self.data.push(ids.len() as i64);
        self.data.extend_from_slice(ids);
        self.num_cells += 1;
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Length of the flat connectivity list.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// Iterate cells as slices of point ids.
    pub fn iter(&self) -> CellIter<'_> {
        CellIter {
            data: &self.data,
            pos: 0,
        }
    }

    /// Connectivity as an unnamed index array.
    pub fn to_data_array(&self) -> DataArray {
        DataArray::ids(self.data.clone())
    }
}

/// Iterator over the cells of a [`CellArray`].
pub struct CellIter<'a> {
    data: &'a [i64],
    pos: usize,
}

impl<'a> Iterator for CellIter<'a> {
    type Item = &'a [i64];

    fn next(&mut self) -> Option<Self::Item> {
        let n = *self.data.get(self.pos)? as usize;
        let start = self.pos + 1;
        self.pos = start + n;
        self.data.get(start..start + n)
    }
}

impl<'a> IntoIterator for &'a CellArray {
    type Item = &'a [i64];
    type IntoIter = CellIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let cells = CellArray::from_cells([vec![0, 1, 2], vec![2, 3]]);
        assert_eq!(cells.data(), &[3i64, 0, 1, 2, 2, 2, 3][..]);
        assert_eq!(cells.num_cells(), 2);
        let back: Vec<&[i64]> = cells.iter().collect();
        assert_eq!(back, vec![&[0i64, 1, 2][..], &[2i64, 3][..]]);
    }

    #[test]
    fn test_from_legacy() {
        let cells = CellArray::from_legacy(vec![1, 7, 2, 0, 1]).unwrap();
        assert_eq!(cells.num_cells(), 2);
        assert!(CellArray::from_legacy(vec![4, 0, 1]).is_err());
        assert!(CellArray::from_legacy(vec![-1]).is_err());
    }
}
