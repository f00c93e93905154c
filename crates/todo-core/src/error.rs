use thiserror::Error;

/// Client input that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Request body must be a JSON object")]
    InvalidBody,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field '{field}' must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Task must not be empty")]
    EmptyTask,

    #[error("Task must be at most {max} characters (got {len})")]
    TaskTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
