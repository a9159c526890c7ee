//! Integration tests for the streaming transpose.

use std::cell::Cell;
use std::rc::Rc;

use transposer::{lazy_transpose, LazyTranspose, TransposeError, TransposeMode};

const ALL_MODES: [TransposeMode; 3] = [
    TransposeMode::StripOnMissing,
    TransposeMode::DefaultOnMissing,
    TransposeMode::ErrorOnMissing,
];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ragged() -> Vec<Vec<i32>> {
    vec![vec![1, 2, 3], vec![4, 5]]
}

/// Row cursor that counts how often it is pulled and dropped.
struct TrackedRow {
    values: std::vec::IntoIter<i32>,
    pulled: Rc<Cell<usize>>,
    released: Rc<Cell<usize>>,
}

impl Iterator for TrackedRow {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.pulled.set(self.pulled.get() + 1);
        self.values.next()
    }
}

impl Drop for TrackedRow {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

struct Tracker {
    pulled: Rc<Cell<usize>>,
    released: Rc<Cell<usize>>,
}

impl Tracker {
    fn new() -> Self {
        Self {
            pulled: Rc::new(Cell::new(0)),
            released: Rc::new(Cell::new(0)),
        }
    }

    fn rows(&self, table: Vec<Vec<i32>>) -> Vec<TrackedRow> {
        table
            .into_iter()
            .map(|values| TrackedRow {
                values: values.into_iter(),
                pulled: Rc::clone(&self.pulled),
                released: Rc::clone(&self.released),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Missing-element policies
// ---------------------------------------------------------------------------

#[test]
fn uniform_rows_transpose() {
    init_logger();
    let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
    let columns: Vec<Vec<i32>> = lazy_transpose(rows, TransposeMode::ErrorOnMissing)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
}

#[test]
fn strip_stops_at_first_incomplete_column() {
    init_logger();
    let columns: Vec<Vec<i32>> = lazy_transpose(ragged(), TransposeMode::StripOnMissing)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec![vec![1, 4], vec![2, 5]]);
}

#[test]
fn strip_when_first_row_is_shorter() {
    let rows = vec![vec![1], vec![4, 5, 6]];
    let columns: Vec<Vec<i32>> = lazy_transpose(rows, TransposeMode::StripOnMissing)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec![vec![1, 4]]);
}

#[test]
fn default_fills_missing_entries() {
    init_logger();
    let columns: Vec<Vec<i32>> = lazy_transpose(ragged(), TransposeMode::DefaultOnMissing)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec![vec![1, 4], vec![2, 5], vec![3, 0]]);
}

#[test]
fn default_fills_middle_row_with_default_string() {
    let rows = vec![
        vec!["a".to_string(), "b".to_string()],
        vec![],
        vec!["c".to_string()],
    ];
    let columns: Vec<Vec<String>> = lazy_transpose(rows, TransposeMode::DefaultOnMissing)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        columns,
        vec![
            vec!["a".to_string(), String::new(), "c".to_string()],
            vec!["b".to_string(), String::new(), String::new()],
        ]
    );
}

#[test]
fn error_is_raised_when_offending_column_is_pulled() {
    init_logger();
    let mut columns = lazy_transpose(ragged(), TransposeMode::ErrorOnMissing);
    assert_eq!(columns.next(), Some(Ok(vec![1, 4])));
    assert_eq!(columns.next(), Some(Ok(vec![2, 5])));
    assert_eq!(
        columns.next(),
        Some(Err(TransposeError::InconsistentRowLength { column: 2, row: 1 }))
    );
    assert_eq!(columns.next(), None);
    assert_eq!(columns.next(), None);
}

#[test]
fn error_keeps_already_yielded_columns() {
    let mut yielded = Vec::new();
    let mut failure = None;
    for column in lazy_transpose(ragged(), TransposeMode::ErrorOnMissing) {
        match column {
            Ok(column) => yielded.push(column),
            Err(err) => failure = Some(err),
        }
    }
    assert_eq!(yielded, vec![vec![1, 4], vec![2, 5]]);
    assert!(matches!(
        failure,
        Some(TransposeError::InconsistentRowLength { .. })
    ));
}

#[test]
fn default_mode_is_error_on_missing() {
    let columns: Result<Vec<Vec<i32>>, _> =
        lazy_transpose(ragged(), TransposeMode::default()).collect();
    assert!(columns.is_err());
}

// ---------------------------------------------------------------------------
// Degenerate input
// ---------------------------------------------------------------------------

#[test]
fn empty_input_yields_nothing_in_every_mode() {
    for mode in ALL_MODES {
        let rows: Vec<Vec<i32>> = Vec::new();
        let mut columns = lazy_transpose(rows, mode);
        assert_eq!(columns.next(), None, "mode {:?}", mode);
    }
}

#[test]
fn rows_that_are_all_empty_yield_nothing() {
    for mode in ALL_MODES {
        let rows: Vec<Vec<i32>> = vec![vec![], vec![], vec![]];
        assert_eq!(lazy_transpose(rows, mode).count(), 0, "mode {:?}", mode);
    }
}

#[test]
fn single_row_becomes_single_element_columns() {
    let columns: Vec<Vec<i32>> = lazy_transpose(vec![vec![7, 8, 9]], TransposeMode::default())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec![vec![7], vec![8], vec![9]]);
}

#[test]
fn absent_row_faults_on_first_pull() {
    init_logger();
    let rows = vec![Some(vec![1, 2]), None, Some(vec![3, 4])];
    let mut columns = LazyTranspose::with_absent_rows(rows, TransposeMode::DefaultOnMissing);
    assert_eq!(columns.open_cursors(), 3);
    assert_eq!(
        columns.next(),
        Some(Err(TransposeError::NullInput { row: 1 }))
    );
    assert_eq!(columns.open_cursors(), 0);
    assert_eq!(columns.next(), None);
}

// ---------------------------------------------------------------------------
// Laziness
// ---------------------------------------------------------------------------

#[test]
fn construction_does_not_pull_any_element() {
    let tracker = Tracker::new();
    let mut columns = lazy_transpose(
        tracker.rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]),
        TransposeMode::ErrorOnMissing,
    );
    assert_eq!(tracker.pulled.get(), 0);
    assert_eq!(columns.next(), Some(Ok(vec![1, 3, 5])));
    assert_eq!(tracker.pulled.get(), 3);
}

#[test]
fn unbounded_rows_stream_columns() {
    let rows = vec![0.., 100.., 200..];
    let columns: Vec<Vec<i32>> = lazy_transpose(rows, TransposeMode::ErrorOnMissing)
        .take(3)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        columns,
        vec![vec![0, 100, 200], vec![1, 101, 201], vec![2, 102, 202]]
    );
}

#[test]
fn strip_ends_unbounded_stream_at_shortest_row() {
    let rows = vec![(0..).take(5), (10..).take(2), (20..).take(usize::MAX)];
    let columns: Vec<Vec<i32>> = lazy_transpose(rows, TransposeMode::StripOnMissing)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec![vec![0, 10, 20], vec![1, 11, 21]]);
}

#[test]
fn columns_emitted_counts_yielded_columns() {
    let mut columns = lazy_transpose(ragged(), TransposeMode::DefaultOnMissing);
    assert_eq!(columns.mode(), TransposeMode::DefaultOnMissing);
    columns.next();
    columns.next();
    assert_eq!(columns.columns_emitted(), 2);
}

// ---------------------------------------------------------------------------
// Cursor release
// ---------------------------------------------------------------------------

#[test]
fn cursors_released_once_on_exhaustion() {
    let tracker = Tracker::new();
    let mut columns = lazy_transpose(
        tracker.rows(vec![vec![1, 2], vec![3, 4]]),
        TransposeMode::ErrorOnMissing,
    );
    let collected: Vec<_> = columns.by_ref().collect();
    assert_eq!(collected.len(), 2);
    // released as soon as the output ended, before the transpose is dropped
    assert_eq!(tracker.released.get(), 2);
    drop(columns);
    assert_eq!(tracker.released.get(), 2);
}

#[test]
fn cursors_released_once_on_strip_stop() {
    let tracker = Tracker::new();
    let mut columns = lazy_transpose(tracker.rows(ragged()), TransposeMode::StripOnMissing);
    assert_eq!(columns.by_ref().count(), 2);
    assert_eq!(tracker.released.get(), 2);
    drop(columns);
    assert_eq!(tracker.released.get(), 2);
}

#[test]
fn cursors_released_once_on_error() {
    let tracker = Tracker::new();
    let mut columns = lazy_transpose(tracker.rows(ragged()), TransposeMode::ErrorOnMissing);
    let result: Result<Vec<Vec<i32>>, _> = columns.by_ref().collect();
    assert!(result.is_err());
    assert_eq!(tracker.released.get(), 2);
    assert_eq!(columns.open_cursors(), 0);
    drop(columns);
    assert_eq!(tracker.released.get(), 2);
}

#[test]
fn cursors_released_once_on_early_abandonment() {
    let tracker = Tracker::new();
    let mut columns = lazy_transpose(
        tracker.rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]),
        TransposeMode::ErrorOnMissing,
    );
    assert_eq!(columns.next(), Some(Ok(vec![1, 4, 7])));
    assert_eq!(tracker.released.get(), 0);
    drop(columns);
    assert_eq!(tracker.released.get(), 3);
}

#[test]
fn cursors_released_when_never_pulled() {
    let tracker = Tracker::new();
    let columns = lazy_transpose(tracker.rows(ragged()), TransposeMode::DefaultOnMissing);
    drop(columns);
    assert_eq!(tracker.pulled.get(), 0);
    assert_eq!(tracker.released.get(), 2);
}
