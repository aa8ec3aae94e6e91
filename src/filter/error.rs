use thiserror::Error;

/// Rejections of client-supplied query parameters. Every variant is a
/// parameter error from the client's point of view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("an unknown parameter was provided: {0}")]
    UnknownParameter(String),

    #[error("provided parameter is empty: {0}")]
    EmptyValue(String),

    #[error("too many values were provided for parameter: {0}")]
    TooManyValues(String),

    #[error("invalid value for parameter {param}: {value}")]
    InvalidValue { param: String, value: String },

    #[error("cannot use operators other than equal or not equal on null: {0}")]
    NullOperator(String),

    #[error("an unknown column was provided for sorting: {0}")]
    UnknownSortColumn(String),

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("invalid offset: {0}")]
    InvalidOffset(String),

    #[error("a limit must be provided when using an offset")]
    OffsetWithoutLimit,
}
