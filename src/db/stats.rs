use crate::core::registry::RECORD_TYPES;
use crate::db::pool::DbPool;
use crate::db::records::count_rows;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROWS PER TABLE
    //
    println!("{}• Rows:{}", CYAN, RESET);
    let mut total = 0;
    for d in RECORD_TYPES {
        let count = count_rows(&pool.conn, d)?;
        total += count;

        let last: Option<String> = pool
            .conn
            .query_row(
                &format!("SELECT date FROM {} ORDER BY date DESC LIMIT 1", d.table),
                [],
                |row| row.get(0),
            )
            .optional()?;

        let last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));
        let color = if count > 0 { GREEN } else { GREY };
        println!(
            "    {:<20} {}{:>6}{}   last: {}",
            d.table, color, count, RESET, last
        );
    }
    println!("{}• Total rows:{} {}{}{}", CYAN, RESET, GREEN, total, RESET);

    println!();
    Ok(())
}
