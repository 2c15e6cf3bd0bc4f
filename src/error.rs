use thiserror::Error;

/// Simplified `Result` using [`BayesError`] as error type
pub type Result<T> = std::result::Result<T, BayesError>;

/// Errors raised while loading, discretizing, fitting or querying.
#[derive(Error, Debug)]
pub enum BayesError {
    #[error("dataset contains no records")]
    EmptyDataset,
    /// A median-threshold field held something that is not an integer.
    #[error("row {row}: field `{field}` has non-numeric value {value:?}")]
    MalformedNumber {
        field: String,
        row: usize,
        value: String,
    },
    #[error("header names column `{0}` more than once")]
    DuplicateColumn(String),
    #[error("row {row}: column `{column}` is missing")]
    MissingColumn { column: String, row: usize },
    #[error("row {row}: expected {expected} values, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("field `{0}` is not part of the field specification")]
    UnknownField(String),
    #[error("query is missing predictor fields: {}", .0.join(", "))]
    MissingQueryFields(Vec<String>),
    #[error("query has fields that are not predictors: {}", .0.join(", "))]
    UnexpectedQueryFields(Vec<String>),
    /// Invalid field specification
    #[error("invalid field specification: {0}")]
    Config(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
