use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanesError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render surface error at index {index}: {message}")]
    Surface { index: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl LanesError {
    pub fn surface(index: usize, message: impl Into<String>) -> Self {
        Self::Surface {
            index,
            message: message.into(),
        }
    }
}
