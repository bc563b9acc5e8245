//! Declarative record-type configuration.
//!
//! Everything here is `'static` data built once in `core::registry`.

use super::field::FieldKind;

/// One column of a record type and the form input that feeds it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub column: &'static str,
    pub input: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(column: &'static str, input: &'static str, kind: FieldKind) -> Self {
        Self {
            column,
            input,
            kind,
        }
    }
}

/// Record type descriptor: fields, target table and bound view.
#[derive(Debug)]
pub struct RecordDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub table: &'static str,
    pub view: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordDescriptor {
    pub const DATE_COLUMN: &'static str = "date";
    pub const TIME_COLUMN: &'static str = "time";

    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.column).collect()
    }

    pub fn has_time(&self) -> bool {
        self.fields.iter().any(|f| f.column == Self::TIME_COLUMN)
    }

    /// Date first, newest on top. Ties fall back to time and id.
    pub fn order_by(&self) -> &'static str {
        if self.has_time() {
            "date DESC, time DESC, id DESC"
        } else {
            "date DESC, id DESC"
        }
    }
}

/// A user action that commits one or more record types at once.
#[derive(Debug)]
pub struct CommitTrigger {
    pub name: &'static str,
    pub about: &'static str,
    pub records: &'static [&'static str],
    /// Inputs reset to "now" when the trigger fires.
    pub stamp: &'static [&'static str],
}

/// A navigation target grouping several bound views.
#[derive(Debug)]
pub struct Page {
    pub name: &'static str,
    pub title: &'static str,
    pub records: &'static [&'static str],
}

/// Slider and spinbox inputs that always hold the same value.
#[derive(Debug, Clone, Copy)]
pub struct MirrorPair {
    pub slider: &'static str,
    pub spinbox: &'static str,
}
