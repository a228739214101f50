use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] std::io::Error),

    #[error("Logging already initialized for this process")]
    AlreadyInitialized,
}

pub type Result<T> = std::result::Result<T, Error>;
