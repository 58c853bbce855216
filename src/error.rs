use thiserror::Error;

/// Failure of a single token fetch.
///
/// Both variants carry a rendered message rather than the underlying error
/// value: one fetch outcome is fanned out to every caller waiting on the same
/// credential identity, so the error must be `Clone`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The remote call could not be completed (connectivity, timeout).
    #[error("token endpoint unreachable: {0}")]
    Transport(String),

    /// The remote call completed but the response cannot be turned into a
    /// token record (non-success status, missing fields, non-positive ttl).
    #[error("token endpoint returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::InvalidResponse(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
