use crate::core::registry::RECORD_TYPES;
use crate::models::descriptor::RecordDescriptor;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied once and remembered in the `log` table.
struct Migration {
    version: &'static str,
    message: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_record_tables",
        message: "Created one table per record type",
        apply: create_record_tables,
    },
    Migration {
        version: "20250412_0002_add_date_indexes",
        message: "Added date indexes on record tables",
        apply: add_date_indexes,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn create_table_sql(d: &RecordDescriptor) -> String {
    let cols: Vec<String> = d
        .fields
        .iter()
        .map(|f| format!("    {} {} NOT NULL", f.column, f.kind.sql_type()))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n{}\n);",
        d.table,
        cols.join(",\n")
    )
}

fn create_record_tables(conn: &Connection) -> Result<()> {
    for d in RECORD_TYPES {
        conn.execute_batch(&create_table_sql(d))?;
    }
    Ok(())
}

fn add_date_indexes(conn: &Connection) -> Result<()> {
    for d in RECORD_TYPES {
        conn.execute_batch(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{0}_date ON {0}(date);",
            d.table
        ))?;
    }
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Apply what is missing, in order
    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        (m.apply)(&tx)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.message],
        )?;
        tx.commit()?;

        success(format!("Migration applied: {} → {}", m.version, m.message));
        applied += 1;
    }

    // 3) Tables dropped by hand are recreated
    for d in RECORD_TYPES {
        if !table_exists(conn, d.table)? {
            conn.execute_batch(&create_table_sql(d))?;
            success(format!("Recreated missing table '{}'.", d.table));
        }
    }

    Ok(applied)
}
