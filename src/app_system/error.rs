use thiserror::Error;

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    InvalidVar {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("Invalid CORS origin {origin:?}")]
    InvalidOrigin { origin: String },
}

/// Errors that abort the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
