//! Error types for Cinelog

use thiserror::Error;

/// Result type alias using Cinelog's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Cinelog error types
///
/// Domain validation failures have their own two-tier type in
/// [`crate::domain::error`]; this enum covers everything around them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}. Check that the catalog server is reachable.")]
    Network(#[from] reqwest::Error),

    /// Interactive input failed or was cut short
    #[error("Input error: {0}")]
    Input(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
