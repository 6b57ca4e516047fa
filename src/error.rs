use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoonsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("moons table not found: {0}")]
    TableNotFound(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Cache error: {message}")]
    Cache { message: String },
}

pub type Result<T> = std::result::Result<T, MoonsError>;
