use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config at {path}: {message}")]
    Config { path: String, message: String },

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type KanbanResult<T> = Result<T, KanbanError>;
