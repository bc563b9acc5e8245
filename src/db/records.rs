//! Generic row access for record tables.
//!
//! All statements are built from a `RecordDescriptor`; table and column
//! names come from the static registry, never from user input.

use crate::errors::AppResult;
use crate::models::descriptor::RecordDescriptor;
use crate::models::field::FieldValue;
use crate::models::record::{RecordId, StoredRow};
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params_from_iter};

/// Insert one row. `values` follow the descriptor's field order.
pub fn insert_record(
    conn: &Connection,
    d: &RecordDescriptor,
    values: &[FieldValue],
) -> AppResult<RecordId> {
    let cols = d.columns();
    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{}", i)).collect();

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        d.table,
        cols.join(", "),
        placeholders.join(", ")
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(params_from_iter(values.iter()))?;

    Ok(conn.last_insert_rowid())
}

/// All rows of a record table, newest date first.
pub fn select_rows(conn: &Connection, d: &RecordDescriptor) -> AppResult<Vec<StoredRow>> {
    let sql = format!(
        "SELECT id, {} FROM {} ORDER BY {}",
        d.columns().join(", "),
        d.table,
        d.order_by()
    );

    let width = d.fields.len();
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], |row| map_row(row, width))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_row(row: &Row, width: usize) -> rusqlite::Result<StoredRow> {
    let id: RecordId = row.get(0)?;

    let mut cells = Vec::with_capacity(width);
    for i in 1..=width {
        let v: Value = row.get(i)?;
        cells.push(match v {
            Value::Null => String::new(),
            Value::Integer(n) => n.to_string(),
            Value::Real(f) => f.to_string(),
            Value::Text(s) => s,
            Value::Blob(b) => format!("<{} bytes>", b.len()),
        });
    }

    Ok(StoredRow {
        id,
        date: cells.first().cloned().unwrap_or_default(),
        cells,
    })
}

/// Delete rows by primary key, all or nothing.
pub fn delete_rows(conn: &Connection, d: &RecordDescriptor, ids: &[RecordId]) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut deleted = 0;
    {
        let mut stmt = tx.prepare(&format!("DELETE FROM {} WHERE id = ?1", d.table))?;
        for id in ids {
            deleted += stmt.execute([id])?;
        }
    }
    tx.commit()?;
    Ok(deleted)
}

pub fn count_rows(conn: &Connection, d: &RecordDescriptor) -> AppResult<i64> {
    let n = conn.query_row(&format!("SELECT COUNT(*) FROM {}", d.table), [], |row| {
        row.get(0)
    })?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::descriptor;
    use crate::db::initialize::init_db;
    use chrono::{NaiveDate, NaiveTime};

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        c
    }

    fn date(s: &str) -> FieldValue {
        FieldValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
    }

    #[test]
    fn insert_and_read_back_with_fixed_formats() {
        let c = conn();
        let d = descriptor("diet").unwrap();
        let values = vec![
            date("2025-04-02"),
            FieldValue::Time(NaiveTime::from_hms_opt(12, 5, 0).unwrap()),
            FieldValue::Text("pasta".into()),
            FieldValue::Int(640),
        ];

        let id = insert_record(&c, d, &values).unwrap();
        let rows = select_rows(&c, d).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].cells, vec!["2025-04-02", "12:05:00", "pasta", "640"]);
    }

    #[test]
    fn checkbox_is_stored_as_integer() {
        let c = conn();
        let d = descriptor("shower").unwrap();
        insert_record(
            &c,
            d,
            &[
                date("2025-04-02"),
                FieldValue::Time(NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
                FieldValue::Bool(true),
            ],
        )
        .unwrap();

        let stored: i64 = c
            .query_row("SELECT shower FROM shower", [], |r| r.get(0))
            .unwrap();
        assert_eq!(stored, 1);
    }

    #[test]
    fn rows_come_back_newest_date_first() {
        let c = conn();
        let d = descriptor("sleep_quality").unwrap();
        for day in ["2025-01-03", "2025-01-09", "2025-01-01"] {
            insert_record(&c, d, &[date(day), FieldValue::Int(5)]).unwrap();
        }

        let dates: Vec<String> = select_rows(&c, d).unwrap().into_iter().map(|r| r.date).collect();
        assert_eq!(dates, vec!["2025-01-09", "2025-01-03", "2025-01-01"]);
    }

    #[test]
    fn delete_only_touches_given_ids() {
        let c = conn();
        let d = descriptor("woke_up_like").unwrap();
        let a = insert_record(&c, d, &[date("2025-01-01"), FieldValue::Int(1)]).unwrap();
        let b = insert_record(&c, d, &[date("2025-01-02"), FieldValue::Int(2)]).unwrap();
        let e = insert_record(&c, d, &[date("2025-01-03"), FieldValue::Int(3)]).unwrap();

        assert_eq!(delete_rows(&c, d, &[b]).unwrap(), 1);

        let ids: Vec<RecordId> = select_rows(&c, d).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![e, a]);
        assert_eq!(count_rows(&c, d).unwrap(), 2);
    }
}
