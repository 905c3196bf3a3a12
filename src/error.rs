//! Error types for the merge run.

use thiserror::Error;

/// Everything that can abort a merge run. All variants are terminal.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A period column name is not `<year>-<month>`.
    #[error("malformed period label '{label}': expected <year>-<month>")]
    MalformedPeriodLabel { label: String },

    /// An input is missing a column the pipeline needs.
    #[error("{table} table is missing required column '{column}'")]
    MissingRequiredColumn { table: &'static str, column: String },

    /// Two unrelated raw names collapse to the same canonical key.
    #[error("{table} regions '{first}' and '{second}' both normalize to '{key}'")]
    DuplicateCanonicalKeyConflict {
        table: &'static str,
        key: String,
        first: String,
        second: String,
    },

    /// A cell that should be numeric is not.
    #[error("{table} line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        table: &'static str,
        column: String,
        line: u64,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MergeError>;
