//! Streaming transpose over a sequence of row iterators.
//!
//! [`LazyTranspose`] opens one cursor per row when it is built and produces
//! one column per pull, so the table is never held in memory. Cursors are
//! owned by the transpose: they are dropped together as soon as the output
//! ends (exhaustion, a strip stop or an error) and otherwise when the
//! consumer drops the iterator, so each one is released exactly once.
use std::iter::{Fuse, FusedIterator};

use crate::config::TransposeMode;
use crate::error::TransposeError;

/// Outcome of advancing every cursor once.
enum Round<T> {
    /// Every row produced a value.
    Complete(Vec<T>),
    /// Some rows produced a value; `first_missing` is the first that did not.
    Partial {
        values: Vec<Option<T>>,
        first_missing: usize,
    },
    /// No row produced a value.
    Exhausted,
    /// The cursor for this row was never supplied.
    Absent(usize),
}

/// Iterator of column-rows produced from a table of row iterators.
///
/// Each item is either a column (one element per input row, in row order)
/// or the error that ended the transpose. After `None` or an `Err` the
/// iterator is finished and all row cursors have been released.
pub struct LazyTranspose<I> {
    cursors: Vec<Option<Fuse<I>>>,
    mode: TransposeMode,
    column: usize,
}

impl<I> LazyTranspose<I>
where
    I: Iterator,
{
    pub fn new<S, R>(rows: S, mode: TransposeMode) -> Self
    where
        S: IntoIterator<Item = R>,
        R: IntoIterator<IntoIter = I>,
    {
        Self::with_absent_rows(rows.into_iter().map(Some), mode)
    }

    /// Like [`new`](Self::new) for tables where a row may be missing
    /// altogether. A `None` row is reported as
    /// [`TransposeError::NullInput`] on the first pull, not here.
    pub fn with_absent_rows<S, R>(rows: S, mode: TransposeMode) -> Self
    where
        S: IntoIterator<Item = Option<R>>,
        R: IntoIterator<IntoIter = I>,
    {
        let cursors: Vec<Option<Fuse<I>>> = rows
            .into_iter()
            .map(|row| row.map(|r| r.into_iter().fuse()))
            .collect();
        log::trace!("opened {} row cursors ({:?})", cursors.len(), mode);
        Self {
            cursors,
            mode,
            column: 0,
        }
    }

    pub fn mode(&self) -> TransposeMode {
        self.mode
    }

    /// Number of columns yielded so far.
    pub fn columns_emitted(&self) -> usize {
        self.column
    }

    /// Number of row cursors still held.
    pub fn open_cursors(&self) -> usize {
        self.cursors.len()
    }

    fn advance(&mut self) -> Round<I::Item> {
        let mut values = Vec::with_capacity(self.cursors.len());
        let mut first_missing = None;
        for (row, cursor) in self.cursors.iter_mut().enumerate() {
            let cursor = match cursor {
                Some(cursor) => cursor,
                None => return Round::Absent(row),
            };
            let value = cursor.next();
            if value.is_none() && first_missing.is_none() {
                first_missing = Some(row);
            }
            values.push(value);
        }

        match first_missing {
            None => Round::Complete(values.into_iter().flatten().collect()),
            Some(_) if values.iter().all(Option::is_none) => Round::Exhausted,
            Some(first_missing) => Round::Partial {
                values,
                first_missing,
            },
        }
    }

    fn release(&mut self) {
        log::trace!(
            "releasing {} row cursors after {} columns",
            self.cursors.len(),
            self.column
        );
        self.cursors.clear();
    }
}

impl<I> Iterator for LazyTranspose<I>
where
    I: Iterator,
    I::Item: Default,
{
    type Item = Result<Vec<I::Item>, TransposeError>;

    fn next(&mut self) -> Option<Self::Item> {
        // empty input, or already finished
        if self.cursors.is_empty() {
            return None;
        }

        let column = self.column;
        let line = match self.advance() {
            Round::Complete(line) => line,
            Round::Exhausted => {
                self.release();
                return None;
            }
            Round::Absent(row) => {
                self.release();
                return Some(Err(TransposeError::NullInput { row }));
            }
            Round::Partial {
                values,
                first_missing,
            } => match self.mode {
                TransposeMode::StripOnMissing => {
                    log::debug!(
                        "row {} exhausted at column {}, stripping remaining columns",
                        first_missing,
                        column
                    );
                    self.release();
                    return None;
                }
                TransposeMode::DefaultOnMissing => values
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect(),
                TransposeMode::ErrorOnMissing => {
                    log::warn!(
                        "row {} exhausted at column {} while other rows continue",
                        first_missing,
                        column
                    );
                    self.release();
                    return Some(Err(TransposeError::InconsistentRowLength {
                        column,
                        row: first_missing,
                    }));
                }
            },
        };

        self.column += 1;
        Some(Ok(line))
    }
}

impl<I> FusedIterator for LazyTranspose<I>
where
    I: Iterator,
    I::Item: Default,
{
}

/// Transpose `rows` lazily: each pull yields the next column.
///
/// ```
/// use transposer::{lazy_transpose, TransposeMode};
///
/// let rows = vec![vec![1, 2, 3], vec![4, 5]];
/// let columns: Vec<Vec<i32>> = lazy_transpose(rows, TransposeMode::DefaultOnMissing)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(columns, vec![vec![1, 4], vec![2, 5], vec![3, 0]]);
/// ```
pub fn lazy_transpose<S, R>(rows: S, mode: TransposeMode) -> LazyTranspose<R::IntoIter>
where
    S: IntoIterator<Item = R>,
    R: IntoIterator,
{
    LazyTranspose::new(rows, mode)
}
