/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A dense matrix with fixed shape.
//!
//! The entries are stored in row-major order in a single vector. The
//! shape of a matrix never changes, operations like appending a row
//! return a new matrix.
//!
//! # Example
//!
//! ```
//! use rs_transport::Matrix;
//!
//! let m = Matrix::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
//! assert_eq!(m.num_rows(), 2);
//! assert_eq!(m.num_cols(), 3);
//! assert_eq!(m[(1, 0)], 4);
//! assert_eq!(m.column(2).collect::<Vec<_>>(), vec![3, 6]);
//! ```

use crate::error::{Error, Result};

use std::ops::{Index, IndexMut};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A dense matrix stored in row-major order.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "RawMatrix<T>"))]
pub struct Matrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: Copy,
{
    /// Create a matrix with all entries set to `value`.
    pub fn new(nrows: usize, ncols: usize, value: T) -> Self {
        Matrix {
            nrows,
            ncols,
            data: vec![value; nrows * ncols],
        }
    }

    /// Create a matrix whose entries are given by a function of
    /// `(row, col)`.
    pub fn from_fn<G>(nrows: usize, ncols: usize, mut f: G) -> Self
    where
        G: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Matrix { nrows, ncols, data }
    }

    /// Create a matrix from a sequence of rows.
    ///
    /// Fails if there are no rows, if the first row is empty or if
    /// the rows differ in length.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
    {
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if ncols == 0 {
            return Err(Error::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::RaggedRow {
                    row: i,
                    len: row.len(),
                    expected: ncols,
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Matrix {
            nrows: rows.len(),
            ncols,
            data,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    /// Return the shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Check that the matrix has the declared dimensions.
    pub fn check_dimensions(&self, nrows: usize, ncols: usize) -> Result<()> {
        if self.shape() != (nrows, ncols) {
            return Err(Error::DimensionMismatch {
                declared: (nrows, ncols),
                actual: self.shape(),
            });
        }
        Ok(())
    }

    /// Return the entries of row `i`.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Return an iterator over the entries of column `j`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = T> + '_ {
        self.data[j..].iter().step_by(self.ncols).cloned()
    }

    /// Return an iterator over all cells `(row, col, value)` in
    /// row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let ncols = self.ncols;
        self.data
            .iter()
            .enumerate()
            .map(move |(k, &x)| (k / ncols, k % ncols, x))
    }

    /// Apply `f` to every entry.
    pub fn map<U, G>(&self, mut f: G) -> Matrix<U>
    where
        U: Copy,
        G: FnMut(T) -> U,
    {
        Matrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Return a copy with one additional row filled with `value`.
    pub fn with_row(&self, value: T) -> Self {
        let mut data = self.data.clone();
        data.extend(std::iter::repeat(value).take(self.ncols));
        Matrix {
            nrows: self.nrows + 1,
            ncols: self.ncols,
            data,
        }
    }

    /// Return a copy with one additional column filled with `value`.
    pub fn with_column(&self, value: T) -> Self {
        self.padded(self.nrows, self.ncols + 1, value)
    }

    /// Return a copy enlarged to `nrows x ncols`.
    ///
    /// New entries are set to `value`. The new shape must not be
    /// smaller than the current one.
    pub fn padded(&self, nrows: usize, ncols: usize, value: T) -> Self {
        assert!(nrows >= self.nrows && ncols >= self.ncols, "Matrix can only grow");
        Matrix::from_fn(nrows, ncols, |i, j| {
            if i < self.nrows && j < self.ncols {
                self[(i, j)]
            } else {
                value
            }
        })
    }

    /// Return the entries as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.nrows).map(|i| self.row(i).to_vec()).collect()
    }
}

/// The unchecked serialized form of a matrix.
#[cfg(feature = "serialize")]
#[derive(Deserialize)]
struct RawMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

#[cfg(feature = "serialize")]
impl<T> std::convert::TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = Error;

    fn try_from(raw: RawMatrix<T>) -> Result<Self> {
        let expected = raw.nrows.saturating_mul(raw.ncols);
        if raw.data.len() != expected {
            return Err(Error::LengthMismatch {
                what: "data",
                len: raw.data.len(),
                expected,
            });
        }
        Ok(Matrix {
            nrows: raw.nrows,
            ncols: raw.ncols,
            data: raw.data,
        })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.nrows && j < self.ncols, "Matrix index out of bounds");
        &self.data[i * self.ncols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.nrows && j < self.ncols, "Matrix index out of bounds");
        &mut self.data[i * self.ncols + j]
    }
}
