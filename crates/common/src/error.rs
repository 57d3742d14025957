use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Market not found: {0}")]
    MarketNotFound(String),

    #[error("Market already registered: {0}")]
    MarketExists(String),

    #[error("Price {0} outside [0, 1]")]
    InvalidPrice(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
