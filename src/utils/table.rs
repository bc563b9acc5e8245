//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured on the visible text (ANSI sequences stripped,
//! wide characters counted twice). Cells longer than their column are
//! wrapped onto continuation lines.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width: width.max(UnicodeWidthStr::width(header)),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

fn ansi_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()).as_ref()
}

pub fn strip_ansi(s: &str) -> String {
    match ansi_re() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Width of `s` as shown on a terminal.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Widen columns to fit their content, but never past `max_width`.
    pub fn fit(&mut self, max_width: usize) {
        for (i, col) in self.columns.iter_mut().enumerate() {
            let widest = self
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| visible_width(c))
                .max()
                .unwrap_or(0);
            col.width = col.width.max(widest.min(max_width));
        }
    }

    pub fn render(&self, sep: &str) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        let sep = if sep.is_empty() { "-" } else { sep };
        out.push_str(&sep.repeat(total.saturating_sub(1)));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<Vec<String>> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| wrap_cell(row.get(i).map(String::as_str).unwrap_or(""), col.width))
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(1);

            for line in 0..height {
                for (i, col) in self.columns.iter().enumerate() {
                    let piece = cells[i].get(line).map(String::as_str).unwrap_or("");
                    out.push_str(&pad(piece, col.width));
                    out.push(' ');
                }
                out.push('\n');
            }
        }

        out
    }
}

fn wrap_cell(cell: &str, width: usize) -> Vec<String> {
    // colored cells are short; leave their escapes intact
    if visible_width(cell) <= width || cell.contains('\x1b') {
        return vec![cell.to_string()];
    }
    textwrap::wrap(cell, width.max(1))
        .into_iter()
        .map(|c| c.into_owned())
        .collect()
}
