//! View binding manager.
//!
//! A `BoundView` is a read-through copy of one record table. It is never
//! updated behind the caller's back: after an insert or a delete the view
//! has to be refreshed explicitly, which `commit` and `delete_selected`
//! do for their own table.

use crate::core::report::{ErrorSink, Failure, Operation};
use crate::db::records::{delete_rows, select_rows};
use crate::errors::{AppError, AppResult};
use crate::models::descriptor::RecordDescriptor;
use crate::models::record::{RecordId, StoredRow};
use rusqlite::Connection;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(usize);

#[derive(Debug)]
pub struct BoundView {
    descriptor: &'static RecordDescriptor,
    rows: Vec<StoredRow>,
    selection: BTreeSet<RecordId>,
}

impl BoundView {
    pub fn descriptor(&self) -> &'static RecordDescriptor {
        self.descriptor
    }

    pub fn rows(&self) -> &[StoredRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn selection(&self) -> &BTreeSet<RecordId> {
        &self.selection
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut h = vec!["id"];
        h.extend(self.descriptor.columns());
        h
    }

    fn contains(&self, id: RecordId) -> bool {
        self.rows.iter().any(|r| r.id == id)
    }
}

/// Result of the fan-out delete.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Owns one bound view per record type.
#[derive(Debug, Default)]
pub struct ViewManager {
    views: Vec<BoundView>,
    by_name: HashMap<&'static str, ViewHandle>,
}

impl ViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every descriptor. Either all views exist afterwards or an
    /// error is returned and nothing is kept.
    pub fn bind_all(conn: &Connection, descriptors: &'static [RecordDescriptor]) -> AppResult<Self> {
        let mut vm = Self::new();
        for d in descriptors {
            vm.bind(conn, d)?;
        }
        Ok(vm)
    }

    /// Create a view over `d.table`, sorted by date descending, and load it.
    pub fn bind(&mut self, conn: &Connection, d: &'static RecordDescriptor) -> AppResult<ViewHandle> {
        if self.by_name.contains_key(d.view) {
            return Err(AppError::Config(format!("view '{}' already bound", d.view)));
        }

        let rows = select_rows(conn, d)?;
        let handle = ViewHandle(self.views.len());
        self.views.push(BoundView {
            descriptor: d,
            rows,
            selection: BTreeSet::new(),
        });
        self.by_name.insert(d.view, handle);
        self.by_name.insert(d.name, handle);
        Ok(handle)
    }

    /// Lookup by view identifier or record-type name.
    pub fn handle(&self, name: &str) -> AppResult<ViewHandle> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AppError::UnknownRecordType(name.to_string()))
    }

    pub fn handles(&self) -> impl Iterator<Item = ViewHandle> + '_ {
        (0..self.views.len()).map(ViewHandle)
    }

    pub fn view(&self, h: ViewHandle) -> &BoundView {
        &self.views[h.0]
    }

    /// Re-run the view query. On failure the previous rows are kept.
    pub fn refresh(&mut self, conn: &Connection, h: ViewHandle) -> AppResult<()> {
        let view = &mut self.views[h.0];
        let rows = select_rows(conn, view.descriptor)?;
        view.selection.retain(|id| rows.iter().any(|r| r.id == *id));
        view.rows = rows;
        Ok(())
    }

    /// Mark rows as selected, by primary key.
    pub fn select(&mut self, h: ViewHandle, ids: &[RecordId]) -> AppResult<()> {
        let view = &mut self.views[h.0];
        if let Some(missing) = ids.iter().find(|id| !view.contains(**id)) {
            return Err(AppError::RowNotFound {
                table: view.descriptor.table.to_string(),
                id: *missing,
            });
        }
        view.selection.extend(ids.iter().copied());
        Ok(())
    }

    pub fn clear_selection(&mut self, h: ViewHandle) {
        self.views[h.0].selection.clear();
    }

    /// Delete the selected rows, then refresh. Nothing selected is a no-op.
    pub fn delete_selected(&mut self, conn: &Connection, h: ViewHandle) -> AppResult<usize> {
        let view = &self.views[h.0];
        if view.selection.is_empty() {
            return Ok(0);
        }

        let d = view.descriptor;
        let ids: Vec<RecordId> = view.selection.iter().copied().collect();
        let deleted = delete_rows(conn, d, &ids).map_err(|e| AppError::Delete {
            table: d.table.to_string(),
            source: Box::new(e),
        })?;

        self.views[h.0].selection.clear();
        self.refresh(conn, h)?;
        Ok(deleted)
    }

    /// The single delete action: every view deletes its own selection.
    /// One view failing does not stop the others.
    pub fn delete_selected_all(&mut self, conn: &Connection, sink: &mut dyn ErrorSink) -> DeleteReport {
        let mut report = DeleteReport::default();
        let handles: Vec<ViewHandle> = self.handles().collect();

        for h in handles {
            match self.delete_selected(conn, h) {
                Ok(n) => report.deleted += n,
                Err(error) => {
                    report.failed += 1;
                    sink.report(Failure {
                        record_type: self.view(h).descriptor.name,
                        operation: Operation::Delete,
                        error,
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{RECORD_TYPES, descriptor};
    use crate::core::report::MemorySink;
    use crate::db::initialize::init_db;
    use crate::db::records::insert_record;
    use crate::models::field::FieldValue;
    use chrono::NaiveDate;

    fn setup() -> (Connection, ViewManager) {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let vm = ViewManager::bind_all(&conn, RECORD_TYPES).unwrap();
        (conn, vm)
    }

    fn add_quality(conn: &Connection, day: &str, q: i64) -> RecordId {
        let d = descriptor("sleep_quality").unwrap();
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        insert_record(conn, d, &[FieldValue::Date(date), FieldValue::Int(q)]).unwrap()
    }

    fn assert_sorted(view: &BoundView) {
        for pair in view.rows().windows(2) {
            assert!(pair[0].date >= pair[1].date, "rows out of order");
        }
    }

    #[test]
    fn one_view_per_record_type() {
        let (_c, vm) = setup();
        assert_eq!(vm.handles().count(), RECORD_TYPES.len());
        assert_eq!(vm.handle("sleep_view").unwrap(), vm.handle("sleep").unwrap());
        assert!(vm.handle("nap").is_err());
    }

    #[test]
    fn view_is_stale_until_refreshed() {
        let (conn, mut vm) = setup();
        let h = vm.handle("sleep_quality").unwrap();

        add_quality(&conn, "2025-02-01", 4);
        assert_eq!(vm.view(h).row_count(), 0);

        vm.refresh(&conn, h).unwrap();
        assert_eq!(vm.view(h).row_count(), 1);
    }

    #[test]
    fn delete_without_selection_is_a_noop() {
        let (conn, mut vm) = setup();
        let h = vm.handle("sleep_quality").unwrap();
        add_quality(&conn, "2025-02-01", 4);
        vm.refresh(&conn, h).unwrap();

        assert_eq!(vm.delete_selected(&conn, h).unwrap(), 0);
        assert_eq!(vm.view(h).row_count(), 1);
    }

    #[test]
    fn delete_removes_exactly_the_selected_rows() {
        let (conn, mut vm) = setup();
        let h = vm.handle("sleep_quality").unwrap();
        let a = add_quality(&conn, "2025-02-01", 1);
        let b = add_quality(&conn, "2025-02-03", 2);
        let c = add_quality(&conn, "2025-02-02", 3);
        vm.refresh(&conn, h).unwrap();

        vm.select(h, &[b]).unwrap();
        assert_eq!(vm.delete_selected(&conn, h).unwrap(), 1);

        let ids: Vec<RecordId> = vm.view(h).rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![c, a]);
        assert!(vm.view(h).selection().is_empty());
        assert_sorted(vm.view(h));
    }

    #[test]
    fn selecting_an_unknown_row_fails() {
        let (conn, mut vm) = setup();
        let h = vm.handle("sleep_quality").unwrap();
        add_quality(&conn, "2025-02-01", 1);
        vm.refresh(&conn, h).unwrap();

        let err = vm.select(h, &[999]).unwrap_err();
        assert!(matches!(err, AppError::RowNotFound { id: 999, .. }));
        assert!(vm.view(h).selection().is_empty());
    }

    #[test]
    fn storage_failure_leaves_view_unchanged() {
        let (conn, mut vm) = setup();
        let h = vm.handle("sleep_quality").unwrap();
        let a = add_quality(&conn, "2025-02-01", 1);
        vm.refresh(&conn, h).unwrap();
        vm.select(h, &[a]).unwrap();

        conn.execute_batch("DROP TABLE sleep_quality;").unwrap();

        let err = vm.delete_selected(&conn, h).unwrap_err();
        assert!(matches!(err, AppError::Delete { .. }));
        assert_eq!(vm.view(h).row_count(), 1);
        assert_eq!(vm.view(h).selection().len(), 1);
    }

    #[test]
    fn fan_out_delete_isolates_failures() {
        let (conn, mut vm) = setup();
        let hq = vm.handle("sleep_quality").unwrap();
        let hw = vm.handle("woke_up_like").unwrap();

        let q = add_quality(&conn, "2025-02-01", 1);
        let w = insert_record(
            &conn,
            descriptor("woke_up_like").unwrap(),
            &[
                FieldValue::Date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
                FieldValue::Int(6),
            ],
        )
        .unwrap();
        vm.refresh(&conn, hq).unwrap();
        vm.refresh(&conn, hw).unwrap();
        vm.select(hq, &[q]).unwrap();
        vm.select(hw, &[w]).unwrap();

        conn.execute_batch("DROP TABLE sleep_quality;").unwrap();

        let mut sink = MemorySink::default();
        let report = vm.delete_selected_all(&conn, &mut sink);

        assert_eq!(report.deleted, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(sink.failures.len(), 1);
        assert_eq!(sink.failures[0].record_type, "sleep_quality");
        assert_eq!(vm.view(hw).row_count(), 0);
    }
}
