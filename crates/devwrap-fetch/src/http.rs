use std::time::Duration;

use devwrap_core::StatsPayload;
use tracing::{info, warn};

use crate::{FetchError, ProfileIds, StatsFetcher};

pub const DEFAULT_ENDPOINT: &str = "https://devwrap.betaco.tech";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches stats from `GET {endpoint}/developer-stats`.
pub struct HttpStatsFetcher {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpStatsFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn stats_url(&self) -> String {
        format!("{}/developer-stats", self.endpoint)
    }
}

impl StatsFetcher for HttpStatsFetcher {
    fn fetch(&self, profile: &ProfileIds) -> Result<StatsPayload, FetchError> {
        let url = self.stats_url();
        info!(target: "devwrap::fetch", %url, github = %profile.github, "requesting developer stats");
        let result = self
            .agent
            .get(&url)
            .query("github_username", &profile.github)
            .query("stackid", &profile.stackoverflow_id)
            .call()
            .map_err(FetchError::from)
            .and_then(|mut resp| {
                let body = resp
                    .body_mut()
                    .read_to_string()
                    .map_err(FetchError::from)?;
                Ok(serde_json::from_str::<StatsPayload>(&body)?)
            });
        if let Err(e) = &result {
            warn!(target: "devwrap::fetch", error = %e, "developer stats request failed");
        }
        result
    }
}
