//! Row-major rectangular grid and the copying transpose.
//!
//! `Grid` is the flat two-dimensional storage used by the copy transpose and
//! accepted by [`transpose_in_place`](crate::in_place::transpose_in_place).
//! `ndarray` matrices get the same copy through [`transpose_copy_array`].
//! It is deliberately small: construction, shape queries, row access and
//! `(row, col)` indexing.
use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::error::TransposeError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Grid<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        Self::from_shape_vec((rows, cols), data)
    }

    /// Build a grid from a jagged table, rejecting it unless every row has
    /// the length of the first one.
    pub fn from_rows<R>(rows: Vec<R>) -> Result<Self, TransposeError>
    where
        R: IntoIterator<Item = T>,
        R::IntoIter: ExactSizeIterator,
    {
        let nrows = rows.len();
        let mut cols = None;
        let mut data = Vec::new();
        for (row, values) in rows.into_iter().enumerate() {
            let values = values.into_iter();
            let len = values.len();
            let expected = *cols.get_or_insert(len);
            if len != expected {
                return Err(TransposeError::NonRectangularShape { row, len, expected });
            }
            data.extend(values);
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: cols.unwrap_or(0),
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for grid of shape ({}, {})",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row index out of bounds");
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Rows in order, each as a slice of `ncols` elements.
    pub fn rows(&self) -> Rows<'_, T> {
        Rows {
            data: &self.data,
            cols: self.cols,
            remaining: self.rows,
        }
    }

    /// Swap the elements at two coordinates.
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let a = self.offset(a.0, a.1);
        let b = self.offset(b.0, b.1);
        self.data.swap(a, b);
    }

    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows().map(<[T]>::to_vec).collect()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Grid<T>
where
    T: Clone,
{
    /// Grid of `shape` with every element set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn from_elem(shape: (usize, usize), value: T) -> Self {
        let (rows, cols) = shape;
        let len = match rows.checked_mul(cols) {
            Some(len) => len,
            None => panic!("grid shape ({}, {}) overflows usize", rows, cols),
        };
        Grid {
            data: vec![value; len],
            rows,
            cols,
        }
    }

    /// Copy of this grid with rows and columns exchanged.
    ///
    /// The result has shape `(ncols, nrows)` and `out[(j, i)] == self[(i, j)]`.
    /// `self` is left untouched.
    pub fn transposed(&self) -> Grid<T> {
        log::debug!("copy-transposing grid of shape {:?}", self.shape());
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..cols {
            for i in 0..rows {
                data.push(self.data[i * cols + j].clone());
            }
        }
        Grid {
            data,
            rows: cols,
            cols: rows,
        }
    }
}

/// Transpose `grid` into a newly allocated grid of shape `(ncols, nrows)`.
pub fn transpose_copy<T: Clone>(grid: &Grid<T>) -> Grid<T> {
    grid.transposed()
}

/// Transpose an `ndarray` matrix into a new standard-layout array of shape
/// `(ncols, nrows)`. `array` is left untouched.
pub fn transpose_copy_array<A, S>(array: &ArrayBase<S, Ix2>) -> Array2<A>
where
    A: Clone,
    S: Data<Elem = A>,
{
    log::debug!("copy-transposing array of shape {:?}", array.dim());
    array.t().as_standard_layout().into_owned()
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

/// Iterator over the rows of a [`Grid`].
pub struct Rows<'a, T> {
    data: &'a [T],
    cols: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // a grid with zero columns still has `rows` empty rows
        let (row, rest) = self.data.split_at(self.cols);
        self.data = rest;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Rows<'a, T> {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}
