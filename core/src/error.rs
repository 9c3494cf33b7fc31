use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    #[error("no answer entered")]
    EmptyAnswer,

    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("problem {0} has no submitted answer")]
    Unanswered(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
