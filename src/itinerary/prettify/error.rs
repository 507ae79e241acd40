use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, PrettifyError>;

/// Error type covering the failures that stop a prettify run.
#[derive(Debug, Error)]
pub enum PrettifyError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the lookup table cannot be read as CSV at all.
    #[error("error processing airport lookup file: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when one or more lookup rows break the fixed six-column shape.
    #[error("Airport lookup malformed:\n{}", DefectList(.0))]
    MalformedLookup(Vec<LookupDefect>),

    /// Raised when the lookup header does not name a required column.
    #[error("airport lookup header is missing the '{0}' column")]
    MissingColumn(&'static str),

    /// Raised when the user provides a path that does not exist.
    #[error("{kind} file not found: {}", .path.display())]
    MissingFile { kind: &'static str, path: PathBuf },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// A structural problem found in a single lookup row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupDefect {
    /// The row does not have exactly six cells.
    ColumnCount { row: usize, found: usize },
    /// The row has six cells but at least one of them is blank.
    EmptyCell { row: usize },
}

impl LookupDefect {
    /// 1-based row number the defect was found on.
    pub fn row(&self) -> usize {
        match self {
            LookupDefect::ColumnCount { row, .. } | LookupDefect::EmptyCell { row } => *row,
        }
    }
}

impl fmt::Display for LookupDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupDefect::ColumnCount { row, found } => {
                write!(f, "Expected 6 columns in Row {row}, but found {found}.")
            }
            LookupDefect::EmptyCell { row } => write!(f, "Empty cell found in Row {row}."),
        }
    }
}

struct DefectList<'a>(&'a [LookupDefect]);

impl fmt::Display for DefectList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, defect) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{defect}")?;
        }
        Ok(())
    }
}

/// Reasons a single date or time marker could not be reformatted.
///
/// These never abort a run; the marker is kept verbatim and the error is
/// reported as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("'{0}' is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("'{0}' is not an HH:MM time")]
    InvalidTime(String),

    #[error("'{0}' has no time part after 'T'")]
    MissingTime(String),

    #[error("'{0}' is not a Z or ±HH:MM offset")]
    InvalidOffset(String),
}
