//! Compressed sparse row matrix for 2D numeric data.

use serde::{Deserialize, Serialize};

/// A sparse matrix in compressed sparse row (CSR) form.
///
/// Stores only non-zero entries: `indptr[i]..indptr[i + 1]` spans row `i`
/// inside `indices` (column positions, ascending within a row) and `values`.
///
/// # Examples
///
/// ```
/// use recomendar::primitives::CsrMatrix;
///
/// let m = CsrMatrix::from_triplets(2, 3, &[(0, 0, 1.0), (1, 2, 5.0)]).expect("in-bounds triplets");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.nnz(), 2);
/// assert_eq!(m.get(1, 2), 5.0);
/// assert_eq!(m.get(0, 1), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl CsrMatrix {
    /// Creates an empty matrix with the given shape.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            values: Vec::new(),
            rows,
            cols,
        }
    }

    /// Builds a matrix from (row, col, value) triplets.
    ///
    /// Duplicate coordinates are summed; entries that end up exactly zero are
    /// dropped from the stored pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is out of bounds.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f32)],
    ) -> Result<Self, &'static str> {
        for &(r, c, _) in triplets {
            if r >= rows || c >= cols {
                return Err("Triplet coordinate out of bounds");
            }
        }

        let mut sorted: Vec<(usize, usize, f32)> = triplets.to_vec();
        sorted.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut indptr = Vec::with_capacity(rows + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);

        let mut row = 0;
        let mut i = 0;
        while i < sorted.len() {
            let (r, c, mut v) = sorted[i];
            i += 1;
            while i < sorted.len() && sorted[i].0 == r && sorted[i].1 == c {
                v += sorted[i].2;
                i += 1;
            }
            while row < r {
                indptr.push(indices.len());
                row += 1;
            }
            if v != 0.0 {
                indices.push(c);
                values.push(v);
            }
        }
        while row < rows {
            indptr.push(indices.len());
            row += 1;
        }

        Ok(Self {
            indptr,
            indices,
            values,
            rows,
            cols,
        })
    }

    /// Builds a matrix from dense rows, dropping zero entries.
    ///
    /// # Errors
    ///
    /// Returns an error if rows have unequal lengths.
    pub fn from_dense_rows(rows: &[Vec<f32>]) -> Result<Self, &'static str> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);

        for row in rows {
            if row.len() != n_cols {
                return Err("All rows must have the same length");
            }
            for (c, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    indices.push(c);
                    values.push(v);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            indptr,
            indices,
            values,
            rows: rows.len(),
            cols: n_cols,
        })
    }

    /// Builds a matrix from dense columns, dropping zero entries.
    ///
    /// # Errors
    ///
    /// Returns an error if columns have unequal lengths or if there are no
    /// columns.
    pub fn from_dense_columns(columns: &[Vec<f32>]) -> Result<Self, &'static str> {
        let n_rows = match columns.first() {
            Some(col) => col.len(),
            None => return Err("Must provide at least one column"),
        };
        if columns.iter().any(|c| c.len() != n_rows) {
            return Err("All columns must have the same length");
        }

        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);

        for r in 0..n_rows {
            for (c, col) in columns.iter().enumerate() {
                let v = col[r];
                if v != 0.0 {
                    indices.push(c);
                    values.push(v);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            indptr,
            indices,
            values,
            rows: n_rows,
            cols: columns.len(),
        })
    }

    /// Reassembles a matrix from raw CSR parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the parts are structurally inconsistent
    /// (indptr length/monotonicity, index bounds, indices/values length).
    pub fn from_raw_parts(
        rows: usize,
        cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<f32>,
    ) -> Result<Self, &'static str> {
        if indptr.len() != rows + 1 {
            return Err("indptr length must be rows + 1");
        }
        if indptr[0] != 0 || *indptr.last().expect("indptr non-empty") != indices.len() {
            return Err("indptr must start at 0 and end at nnz");
        }
        if indptr.windows(2).any(|w| w[0] > w[1]) {
            return Err("indptr must be non-decreasing");
        }
        if indices.len() != values.len() {
            return Err("indices and values must have the same length");
        }
        if indices.iter().any(|&c| c >= cols) {
            return Err("Column index out of bounds");
        }
        for w in indptr.windows(2) {
            let row = &indices[w[0]..w[1]];
            if row.windows(2).any(|p| p[0] >= p[1]) {
                return Err("Column indices must be strictly ascending within a row");
            }
        }

        Ok(Self {
            indptr,
            indices,
            values,
            rows,
            cols,
        })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns row `i` as parallel (column indices, values) slices.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> (&[usize], &[f32]) {
        let start = self.indptr[i];
        let end = self.indptr[i + 1];
        (&self.indices[start..end], &self.values[start..end])
    }

    /// Gets element at (row, col), returning 0.0 for unstored positions.
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        let (indices, values) = self.row(row);
        match indices.binary_search(&col) {
            Ok(pos) => values[pos],
            Err(_) => 0.0,
        }
    }

    /// Returns row `i` densified.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of bounds.
    #[must_use]
    pub fn to_dense_row(&self, i: usize) -> Vec<f32> {
        let mut out = vec![0.0; self.cols];
        let (indices, values) = self.row(i);
        for (&c, &v) in indices.iter().zip(values) {
            out[c] = v;
        }
        out
    }

    /// Concatenates matrices horizontally, block order = argument order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no blocks or the row counts differ.
    pub fn hstack(blocks: &[&CsrMatrix]) -> Result<Self, &'static str> {
        let first = blocks.first().ok_or("Must provide at least one block")?;
        let rows = first.rows;
        if blocks.iter().any(|b| b.rows != rows) {
            return Err("All blocks must have the same number of rows");
        }

        let cols = blocks.iter().map(|b| b.cols).sum();
        let nnz = blocks.iter().map(|b| b.nnz()).sum();
        let mut indptr = Vec::with_capacity(rows + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        indptr.push(0);

        for r in 0..rows {
            let mut offset = 0;
            for block in blocks {
                let (idx, val) = block.row(r);
                indices.extend(idx.iter().map(|c| c + offset));
                values.extend_from_slice(val);
                offset += block.cols;
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            indptr,
            indices,
            values,
            rows,
            cols,
        })
    }

    /// Returns the raw CSR parts as (indptr, indices, values) slices.
    #[must_use]
    pub fn raw_parts(&self) -> (&[usize], &[usize], &[f32]) {
        (&self.indptr, &self.indices, &self.values)
    }
}

#[cfg(test)]
#[path = "sparse_tests.rs"]
mod tests;
