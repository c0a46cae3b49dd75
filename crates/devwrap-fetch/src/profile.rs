use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Please enter a valid GitHub profile URL.")]
    InvalidGithubUrl,

    #[error("GitHub profile URL has no username")]
    MissingHandle,
}

/// Identifiers extracted from the profile URLs a user typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIds {
    pub github: String,
    /// Empty when no Stack Overflow profile was given.
    pub stackoverflow_id: String,
}

impl ProfileIds {
    /// `https://github.com/<user>` and optional
    /// `https://stackoverflow.com/users/<id>/<name>`.
    pub fn from_urls(github_url: &str, stackoverflow_url: &str) -> Result<Self, ProfileError> {
        let github_url = parse_http_url(github_url).ok_or(ProfileError::InvalidGithubUrl)?;
        let github = github_url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or(ProfileError::MissingHandle)?
            .to_string();
        let stackoverflow_id = parse_http_url(stackoverflow_url)
            .and_then(|url| url.path_segments()?.nth(1).map(str::to_string))
            .unwrap_or_default();
        Ok(Self {
            github,
            stackoverflow_id,
        })
    }

    /// A bare handle, no Stack Overflow profile.
    pub fn handle(github: impl Into<String>) -> Self {
        Self {
            github: github.into(),
            stackoverflow_id: String::new(),
        }
    }
}

/// An absolute `http(s)` URL with a host. Whitespace inside is rejected
/// rather than percent-encoded.
fn parse_http_url(s: &str) -> Option<Url> {
    let s = s.trim();
    if s.chars().any(char::is_whitespace) {
        return None;
    }
    let url = Url::parse(s).ok()?;
    let web = matches!(url.scheme(), "http" | "https");
    (web && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url)
}
