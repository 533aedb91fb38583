use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No game data found for {0}")]
    NoGameData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
