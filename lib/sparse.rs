//! Compressed sparse row storage for real operator matrices.

use ndarray as nd;

/// Real sparse matrix in compressed sparse row format.
///
/// Column indices within each row are strictly increasing.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    nrows: usize,
    ncols: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Assemble a matrix from unsorted `(col, value)` entries for each row.
    ///
    /// Repeated entries within a row are summed. Entries that sum to exactly
    /// zero are kept.
    pub fn from_rows(ncols: usize, rows: Vec<Vec<(usize, f64)>>) -> Self {
        let nrows = rows.len();
        let mut row_ptr: Vec<usize> = Vec::with_capacity(nrows + 1);
        let mut col_indices: Vec<usize> = Vec::new();
        let mut values: Vec<f64> = Vec::new();
        row_ptr.push(0);
        for mut row in rows.into_iter() {
            row.sort_by_key(|&(col, _)| col);
            let start = col_indices.len();
            for (col, val) in row.into_iter() {
                if col_indices.len() > start && col_indices.last() == Some(&col) {
                    if let Some(last) = values.last_mut() { *last += val; }
                } else {
                    col_indices.push(col);
                    values.push(val);
                }
            }
            row_ptr.push(col_indices.len());
        }
        Self { nrows, ncols, row_ptr, col_indices, values }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize { self.nrows }

    /// Number of columns.
    pub fn ncols(&self) -> usize { self.ncols }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize { self.values.len() }

    /// Iterate over the `(col, value)` entries of a single row.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];
        self.col_indices[start..end].iter().copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Compute `A x`.
    ///
    /// *Panics* if `x` does not have length [`Self::ncols`].
    pub fn matvec(&self, x: &nd::ArrayView1<f64>) -> nd::Array1<f64> {
        assert_eq!(x.len(), self.ncols, "CsrMatrix::matvec: dimension mismatch");
        (0..self.nrows)
            .map(|i| self.row(i).map(|(j, a)| a * x[j]).sum())
            .collect()
    }

    /// Expand into a dense array.
    pub fn to_dense(&self) -> nd::Array2<f64> {
        let mut A: nd::Array2<f64> = nd::Array2::zeros((self.nrows, self.ncols));
        for i in 0..self.nrows {
            for (j, a) in self.row(i) {
                A[[i, j]] += a;
            }
        }
        A
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use super::*;

    #[test]
    fn merges_duplicates() {
        let A = CsrMatrix::from_rows(
            3,
            vec![
                vec![(2, 1.0), (0, 2.0), (2, 0.5)],
                vec![],
                vec![(1, -1.0)],
            ],
        );
        assert_eq!(A.nnz(), 3);
        assert_eq!(A.row(0).collect::<Vec<_>>(), vec![(0, 2.0), (2, 1.5)]);
        assert_eq!(A.row(1).count(), 0);
        assert_eq!(
            A.to_dense(),
            array![[2.0, 0.0, 1.5], [0.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
        );
    }

    #[test]
    fn matvec_matches_dense() {
        let A = CsrMatrix::from_rows(
            2,
            vec![vec![(0, 1.0), (1, 2.0)], vec![(0, 3.0)], vec![(1, 4.0)]],
        );
        let x = array![1.0, -1.0];
        assert_eq!(A.matvec(&x.view()), A.to_dense().dot(&x));
        assert_eq!(A.matvec(&x.view()), array![-1.0, 3.0, -4.0]);
    }
}
