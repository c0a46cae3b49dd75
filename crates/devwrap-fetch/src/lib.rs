pub mod http;
pub mod profile;

use devwrap_core::StatsPayload;
use thiserror::Error;

pub use http::HttpStatsFetcher;
pub use profile::{ProfileError, ProfileIds};

/// Failure to obtain a payload from the stats service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("stats service returned HTTP {0}")]
    Status(u16),

    #[error("stats request failed: {0}")]
    Transport(String),

    #[error("stats response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

/// Source of a user's stats payload.
///
/// Implementations may block; callers run them off the UI thread.
pub trait StatsFetcher: Send + Sync {
    fn fetch(&self, profile: &ProfileIds) -> Result<StatsPayload, FetchError>;
}
