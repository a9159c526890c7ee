use crate::config::TransposeMode;
use crate::error::TransposeError;

/// Transpose an indexable table eagerly.
///
/// Output column `j` holds `table[i][j]` for every row `i`, in row order.
/// The number of columns is the length of the longest row; rows shorter
/// than that are handled by `mode`:
///
/// * `StripOnMissing` returns the columns built before the first short one.
/// * `DefaultOnMissing` fills the gaps with `T::default()`.
/// * `ErrorOnMissing` fails with [`TransposeError::InconsistentRowLength`].
///
/// An empty table transposes to an empty list.
pub fn indexed_transpose<T, R>(
    table: &[R],
    mode: TransposeMode,
) -> Result<Vec<Vec<T>>, TransposeError>
where
    R: AsRef<[T]>,
    T: Clone + Default,
{
    // past the longest row no row is alive, which ends the output normally
    let width = table
        .iter()
        .map(|row| row.as_ref().len())
        .max()
        .unwrap_or(0);
    log::debug!(
        "transposing {} indexed rows into {} columns ({:?})",
        table.len(),
        width,
        mode
    );

    let mut columns = Vec::with_capacity(width);
    for j in 0..width {
        let mut line = Vec::with_capacity(table.len());
        for (i, row) in table.iter().enumerate() {
            match row.as_ref().get(j) {
                Some(value) => line.push(value.clone()),
                None => match mode {
                    TransposeMode::StripOnMissing => {
                        log::debug!("row {} exhausted at column {}, stripping", i, j);
                        return Ok(columns);
                    }
                    TransposeMode::DefaultOnMissing => line.push(T::default()),
                    TransposeMode::ErrorOnMissing => {
                        return Err(TransposeError::InconsistentRowLength { column: j, row: i });
                    }
                },
            }
        }
        columns.push(line);
    }
    Ok(columns)
}
