use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("day '{0}' not found in the roadmap")]
    DayNotFound(String),

    #[error("task {1} not found in day '{0}'")]
    TaskNotFound(String, i64),

    #[error("day '{0}' has no '{1}' field")]
    MissingField(String, &'static str),

    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StudyError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DayNotFound(_) => "day_not_found",
            Self::TaskNotFound(_, _) => "task_not_found",
            Self::MissingField(_, _) => "missing_field",
            Self::InvalidAddress(_) => "invalid_address",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;
