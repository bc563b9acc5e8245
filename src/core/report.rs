//! Central error sink.
//!
//! Fan-out operations (a trigger committing several record types, the
//! delete action touching every view) never stop on the first failure:
//! each failure is handed to one `ErrorSink` and the next item runs.

use crate::errors::AppError;
use crate::ui::messages::error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Commit,
    Refresh,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Commit => "commit",
            Operation::Refresh => "refresh",
            Operation::Delete => "delete",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
pub struct Failure {
    pub record_type: &'static str,
    pub operation: Operation,
    pub error: AppError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} failed: {}", self.record_type, self.operation, self.error)
    }
}

pub trait ErrorSink {
    fn report(&mut self, failure: Failure);
}

/// Prints failures on stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    pub count: usize,
}

impl ErrorSink for ConsoleSink {
    fn report(&mut self, failure: Failure) {
        self.count += 1;
        error(&failure);
    }
}

/// Keeps failures in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub failures: Vec<Failure>,
}

impl ErrorSink for MemorySink {
    fn report(&mut self, failure: Failure) {
        self.failures.push(failure);
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    fn report(&mut self, failure: Failure) {
        (**self).report(failure);
    }
}
