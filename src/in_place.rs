//! In-place transpose of square grids.
//!
//! The swap loop is written once against [`GridStorage`], the small set of
//! operations every square representation can provide. Shape is checked for
//! every row before the first swap, so a rejected grid is never partially
//! transposed.
use ndarray::{ArrayBase, DataMut, Ix2};

use crate::error::TransposeError;
use crate::grid::Grid;

/// Mutable two-dimensional storage addressed by `(row, col)`.
pub trait GridStorage {
    fn row_count(&self) -> usize;

    /// Number of elements in `row`.
    fn row_len(&self, row: usize) -> usize;

    /// Width shared by every row, for storage that fixes it independently of
    /// the row count. Such storage must be square even when it has no rows.
    fn declared_width(&self) -> Option<usize> {
        None
    }

    /// Exchange the elements at `a` and `b`.
    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize));

    /// Swap every element left of the diagonal in `row` with its mirror in
    /// column `row`. Storage that can hold a row while touching others
    /// should override this.
    fn mirror_row(&mut self, row: usize) {
        for col in 0..row {
            self.swap_cells((row, col), (col, row));
        }
    }
}

/// Transpose a square grid in place.
///
/// Every row must hold exactly as many elements as there are rows; if any
/// does not, [`TransposeError::NonRectangularShape`] is returned and the grid
/// is unchanged. Flat storage (`Grid`, `ndarray`) must also have as many
/// columns as rows. A jagged table with no rows is left as is.
pub fn transpose_in_place<G>(grid: &mut G) -> Result<(), TransposeError>
where
    G: GridStorage + ?Sized,
{
    let height = check_square(grid)?;
    log::debug!("transposing {}x{} grid in place", height, height);
    for row in 1..height {
        grid.mirror_row(row);
    }
    Ok(())
}

fn check_square<G>(grid: &G) -> Result<usize, TransposeError>
where
    G: GridStorage + ?Sized,
{
    let height = grid.row_count();
    if let Some(width) = grid.declared_width() {
        if width != height {
            log::warn!(
                "refusing in-place transpose: grid is {}x{}, not square",
                height,
                width
            );
            return Err(TransposeError::NonRectangularShape {
                row: 0,
                len: width,
                expected: height,
            });
        }
    }
    for row in 0..height {
        let len = grid.row_len(row);
        if len != height {
            log::warn!(
                "refusing in-place transpose: row {} has {} of {} elements",
                row,
                len,
                height
            );
            return Err(TransposeError::NonRectangularShape {
                row,
                len,
                expected: height,
            });
        }
    }
    Ok(height)
}

impl<T> GridStorage for Grid<T> {
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn row_len(&self, _row: usize) -> usize {
        self.ncols()
    }

    fn declared_width(&self) -> Option<usize> {
        Some(self.ncols())
    }

    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.swap(a, b);
    }
}

impl<S> GridStorage for ArrayBase<S, Ix2>
where
    S: DataMut,
{
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn row_len(&self, _row: usize) -> usize {
        self.ncols()
    }

    fn declared_width(&self) -> Option<usize> {
        Some(self.ncols())
    }

    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.swap(a, b);
    }
}

// Jagged tables: every row is its own allocation.

fn swap_across_rows<T, R>(rows: &mut [R], a: (usize, usize), b: (usize, usize))
where
    R: AsMut<[T]>,
{
    if a.0 == b.0 {
        rows[a.0].as_mut().swap(a.1, b.1);
        return;
    }
    let (upper, lower) = if a.0 < b.0 { (a, b) } else { (b, a) };
    let (head, tail) = rows.split_at_mut(lower.0);
    std::mem::swap(
        &mut head[upper.0].as_mut()[upper.1],
        &mut tail[0].as_mut()[lower.1],
    );
}

fn mirror_jagged_row<T, R>(rows: &mut [R], row: usize)
where
    R: AsMut<[T]>,
{
    let (head, tail) = rows.split_at_mut(row);
    let line = tail[0].as_mut();
    for (col, other) in head.iter_mut().enumerate() {
        std::mem::swap(&mut line[col], &mut other.as_mut()[row]);
    }
}

impl<T> GridStorage for [Vec<T>] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_len(&self, row: usize) -> usize {
        self[row].len()
    }

    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        swap_across_rows::<T, _>(self, a, b);
    }

    fn mirror_row(&mut self, row: usize) {
        mirror_jagged_row::<T, _>(self, row);
    }
}

impl<T> GridStorage for Vec<Vec<T>> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_len(&self, row: usize) -> usize {
        self[row].len()
    }

    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        swap_across_rows::<T, _>(self, a, b);
    }

    fn mirror_row(&mut self, row: usize) {
        mirror_jagged_row::<T, _>(self, row);
    }
}

impl<T, const N: usize> GridStorage for [[T; N]] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_len(&self, _row: usize) -> usize {
        N
    }

    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        swap_across_rows::<T, _>(self, a, b);
    }

    fn mirror_row(&mut self, row: usize) {
        mirror_jagged_row::<T, _>(self, row);
    }
}

impl<T, const N: usize> GridStorage for Vec<[T; N]> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_len(&self, _row: usize) -> usize {
        N
    }

    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        swap_across_rows::<T, _>(self, a, b);
    }

    fn mirror_row(&mut self, row: usize) {
        mirror_jagged_row::<T, _>(self, row);
    }
}

impl<T, const N: usize, const M: usize> GridStorage for [[T; N]; M] {
    fn row_count(&self) -> usize {
        M
    }

    fn row_len(&self, _row: usize) -> usize {
        N
    }

    fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        swap_across_rows::<T, _>(self, a, b);
    }

    fn mirror_row(&mut self, row: usize) {
        mirror_jagged_row::<T, _>(self, row);
    }
}
