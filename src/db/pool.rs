//! SQLite connection wrapper (one connection per process).

use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use rusqlite::Connection;
use std::fs;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file, creating its directory when missing.
    pub fn new(path: &str) -> AppResult<Self> {
        let path = expand_tilde(path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}
