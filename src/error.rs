use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// The dataset could not be read or did not contain a usable array.
    #[error("failed to load dataset: {0}")]
    Load(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn load<T: Into<String>>(msg: T) -> Self {
        AppError::Load(msg.into())
    }

    pub fn is_load(&self) -> bool {
        matches!(self, AppError::Load(_))
    }
}
