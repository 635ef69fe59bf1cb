use thiserror::Error;

/// Errors that can occur when configuring a race.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaceError {
    /// Construction parameters failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// A type alias for `Result<T, RaceError>`.
pub type RaceResult<T> = Result<T, RaceError>;
