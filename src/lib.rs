//! transposer: row/column transposition over three shapes of data.
//!
//! * [`lazy_transpose`] streams columns out of a sequence of row iterators,
//!   holding one cursor per row and never buffering the table.
//! * [`indexed_transpose`] builds every column eagerly from a slice of
//!   indexable rows.
//! * [`transpose_in_place`] mirrors a square grid across its diagonal. It
//!   accepts the crate's [`Grid`], `ndarray::Array2`, and jagged tables
//!   (`Vec<Vec<T>>`, arrays of arrays) through [`GridStorage`].
//! * [`transpose_copy`] returns a new grid with the dimensions exchanged;
//!   [`transpose_copy_array`] does the same for `ndarray` matrices.
//!
//! Rows of unequal length are reconciled by a [`TransposeMode`]: strip,
//! default-fill, or fail.
pub mod config;
pub mod error;
pub mod grid;
pub mod in_place;
pub mod indexed;
pub mod lazy;

pub use config::TransposeMode;
pub use error::TransposeError;
pub use grid::{transpose_copy, transpose_copy_array, Grid, ShapeError};
pub use in_place::{transpose_in_place, GridStorage};
pub use indexed::indexed_transpose;
pub use lazy::{lazy_transpose, LazyTranspose};
