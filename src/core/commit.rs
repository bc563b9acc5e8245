//! Generic commit protocol.
//!
//! One function turns the current form values into a stored row for any
//! record type: read every field through a `FieldSource`, validate it with
//! its `FieldKind`, hand the values to an insert function, then refresh the
//! bound view of that record type.

use crate::core::report::{ErrorSink, Failure, Operation};
use crate::core::view::ViewManager;
use crate::errors::{AppError, AppResult};
use crate::models::descriptor::{CommitTrigger, RecordDescriptor};
use crate::models::field::FieldValue;
use crate::models::record::RecordId;
use rusqlite::Connection;

/// Anything able to hand out the current value of a named input.
pub trait FieldSource {
    fn value(&self, input: &str) -> Option<FieldValue>;
}

/// Read and validate every field of `d`, in descriptor order.
pub fn read_values(d: &RecordDescriptor, source: &dyn FieldSource) -> AppResult<Vec<FieldValue>> {
    d.fields
        .iter()
        .map(|f| f.kind.realize(f.input, source.value(f.input)))
        .collect()
}

/// Commit one record type.
///
/// Before the insert, any failure leaves nothing stored or refreshed. Once
/// the row is stored, a failed refresh is an `AppError::Refresh` carrying
/// the new id.
pub fn commit<F>(
    d: &'static RecordDescriptor,
    source: &dyn FieldSource,
    insert_fn: F,
    views: &mut ViewManager,
    conn: &Connection,
) -> AppResult<RecordId>
where
    F: FnOnce(&RecordDescriptor, &[FieldValue]) -> AppResult<RecordId>,
{
    let wrap = |e: AppError| AppError::Commit {
        record_type: d.name.to_string(),
        source: Box::new(e),
    };

    let values = read_values(d, source).map_err(wrap)?;
    let id = insert_fn(d, &values).map_err(wrap)?;

    let stale = |e: AppError| AppError::Refresh {
        record_type: d.name.to_string(),
        id,
        source: Box::new(e),
    };
    let handle = views.handle(d.view).map_err(stale)?;
    views.refresh(conn, handle).map_err(stale)?;

    Ok(id)
}

/// What a trigger managed to store.
#[derive(Debug, Default)]
pub struct CommitReport {
    pub committed: Vec<(&'static str, RecordId)>,
    pub failed: usize,
    /// Stored rows whose view could not be refreshed.
    pub stale: usize,
}

impl CommitReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Commit every record type of a trigger. A failing record type is
/// reported to `sink` and does not prevent the others.
pub fn commit_trigger<F>(
    trigger: &CommitTrigger,
    records: &[&'static RecordDescriptor],
    source: &dyn FieldSource,
    mut insert_fn: F,
    views: &mut ViewManager,
    conn: &Connection,
    sink: &mut dyn ErrorSink,
) -> CommitReport
where
    F: FnMut(&RecordDescriptor, &[FieldValue]) -> AppResult<RecordId>,
{
    debug_assert_eq!(trigger.records.len(), records.len());

    let mut report = CommitReport::default();
    for &d in records {
        match commit(d, source, &mut insert_fn, views, conn) {
            Ok(id) => report.committed.push((d.name, id)),
            Err(error) => {
                let operation = match &error {
                    AppError::Refresh { id, .. } => {
                        report.committed.push((d.name, *id));
                        report.stale += 1;
                        Operation::Refresh
                    }
                    _ => {
                        report.failed += 1;
                        Operation::Commit
                    }
                };
                sink.report(Failure {
                    record_type: d.name,
                    operation,
                    error,
                });
            }
        }
    }
    report
}
