//! Share-link codec.
//!
//! A share link carries four fields: `github`, `contributions`, `lines` and
//! `bugs`. Encoding copies them verbatim from a payload. Decoding rebuilds a
//! whole payload from those four using fixed ratios, so the pair is lossy on
//! purpose: only contributions, lines and bugs survive a round trip exactly.

use tracing::debug;
use url::{form_urlencoded, Url};

use crate::error::DecodeError;
use crate::format::thousands;
use crate::types::{ProjectCategories, StatsPayload};

pub const PARAM_GITHUB: &str = "github";
pub const PARAM_CONTRIBUTIONS: &str = "contributions";
pub const PARAM_LINES: &str = "lines";
pub const PARAM_BUGS: &str = "bugs";

/// The subset of a payload that travels in a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareParams {
    pub github: String,
    pub contributions: u64,
    pub lines: u64,
    pub bugs: u64,
}

impl ShareParams {
    pub fn encode(payload: &StatsPayload, username: &str) -> Self {
        Self {
            github: username.to_string(),
            contributions: payload.total_contributions,
            lines: payload.total_linesize_of_code,
            bugs: payload.total_commits_with_bug,
        }
    }

    /// Query string without the leading `?`.
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(PARAM_GITHUB, &self.github)
            .append_pair(PARAM_CONTRIBUTIONS, &self.contributions.to_string())
            .append_pair(PARAM_LINES, &self.lines.to_string())
            .append_pair(PARAM_BUGS, &self.bugs.to_string())
            .finish()
    }

    pub fn to_url(&self, origin: &str) -> String {
        format!("{origin}?{}", self.to_query())
    }

    /// Parse a full share URL or a bare query string (with or without `?`).
    pub fn parse(link: &str) -> Result<Self, DecodeError> {
        let pairs = QueryPairs::from_link(link);
        let github = pairs
            .first(PARAM_GITHUB)
            .ok_or(DecodeError::MissingField(PARAM_GITHUB))?;
        if github.trim().is_empty() {
            return Err(DecodeError::EmptyHandle);
        }
        Ok(Self {
            github: github.to_string(),
            contributions: pairs.numeric(PARAM_CONTRIBUTIONS)?,
            lines: pairs.numeric(PARAM_LINES)?,
            bugs: pairs.numeric(PARAM_BUGS)?,
        })
    }

    /// Rebuild a full payload. Carried fields are exact, the rest are ratios
    /// of `contributions` (or `lines`), floored.
    pub fn reconstruct(&self) -> StatsPayload {
        let c = self.contributions;
        StatsPayload {
            project_categories: ProjectCategories {
                big: c / 10,
                medium: ratio(c, 3, 10),
                small: ratio(c, 6, 10),
            },
            total_commits: ratio(c, 3, 2),
            total_commits_with_bug: self.bugs,
            total_contributions: c,
            total_lines_of_code_read: self.lines.saturating_mul(10),
            total_linesize_of_code: self.lines,
            total_stackoverflow_contributions: c / 10,
        }
    }
}

/// `payload` + `username` → share parameters.
pub fn encode(payload: &StatsPayload, username: &str) -> ShareParams {
    ShareParams::encode(payload, username)
}

/// Share link → `(username, reconstructed payload)`.
pub fn decode(link: &str) -> Result<(String, StatsPayload), DecodeError> {
    let params = ShareParams::parse(link).inspect_err(|e| {
        debug!(target: "devwrap::share", error = %e, "share link not reconstructable");
    })?;
    let payload = params.reconstruct();
    Ok((params.github, payload))
}

// ── Outbound message ──

/// Everything the share action hands to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareMessage {
    pub fn new(payload: &StatsPayload, username: &str, origin: &str, year: u16) -> Self {
        Self {
            title: format!("My {year} Dev Wrapped"),
            text: format!(
                "Check out my developer stats for {year}! I wrote {} lines of code and made {} contributions!",
                thousands(payload.total_linesize_of_code),
                payload.total_contributions
            ),
            url: encode(payload, username).to_url(origin),
        }
    }

    /// Text placed on the clipboard when native sharing is unavailable.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.text, self.url)
    }
}

// ── Query helpers ──

/// `floor(n * num / den)` without going through floating point.
fn ratio(n: u64, num: u64, den: u64) -> u64 {
    ((n as u128 * num as u128) / den as u128).min(u64::MAX as u128) as u64
}

/// Decoded `key=value` pairs of a share link, in link order.
struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    /// Accepts an absolute URL, or a bare query string with or without `?`.
    fn from_link(link: &str) -> Self {
        let link = link.trim();
        let pairs = match Url::parse(link) {
            Ok(url) => url.query_pairs().into_owned().collect(),
            Err(_) => {
                let link = link.split('#').next().unwrap_or(link);
                let query = link.split_once('?').map_or(link, |(_, q)| q);
                form_urlencoded::parse(query.as_bytes()).into_owned().collect()
            }
        };
        Self(pairs)
    }

    /// First value for `key`; later duplicates are ignored.
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn numeric(&self, field: &'static str) -> Result<u64, DecodeError> {
        let raw = self.first(field).ok_or(DecodeError::MissingField(field))?;
        let parsed: i64 = raw.trim().parse().map_err(|_| DecodeError::NotNumeric {
            field,
            value: raw.to_string(),
        })?;
        Ok(parsed.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatsPayload {
        StatsPayload {
            project_categories: ProjectCategories {
                big: 4,
                medium: 9,
                small: 2,
            },
            total_commits: 812,
            total_commits_with_bug: 37,
            total_contributions: 433,
            total_lines_of_code_read: 1_000_000,
            total_linesize_of_code: 61_250,
            total_stackoverflow_contributions: 12,
        }
    }

    #[test]
    fn encode_carries_four_fields() {
        let params = encode(&sample(), "octocat");
        assert_eq!(
            params.to_query(),
            "github=octocat&contributions=433&lines=61250&bugs=37"
        );
        assert_eq!(
            params.to_url("https://wrapped.example"),
            "https://wrapped.example?github=octocat&contributions=433&lines=61250&bugs=37"
        );
    }

    #[test]
    fn round_trip_keeps_carried_fields() {
        for (c, l, b) in [(0, 0, 0), (1, 2, 3), (433, 61_250, 37), (10_000, 9, 999_999)] {
            let mut p = sample();
            p.total_contributions = c;
            p.total_linesize_of_code = l;
            p.total_commits_with_bug = b;
            let (user, back) = decode(&encode(&p, "a user/名").to_query()).unwrap();
            assert_eq!(user, "a user/名");
            assert_eq!(back.total_contributions, c);
            assert_eq!(back.total_linesize_of_code, l);
            assert_eq!(back.total_commits_with_bug, b);
        }
    }

    #[test]
    fn reconstruction_ratios() {
        let (_, p) = decode("?github=x&contributions=75&lines=20000&bugs=10").unwrap();
        assert_eq!(p.total_commits, 112);
        assert_eq!(p.total_lines_of_code_read, 200_000);
        assert_eq!(p.total_stackoverflow_contributions, 7);
        assert_eq!(
            p.project_categories,
            ProjectCategories {
                big: 7,
                medium: 22,
                small: 45
            }
        );
    }

    #[test]
    fn reconstruction_is_lossy() {
        let original = sample();
        let (_, back) = decode(&encode(&original, "u").to_query()).unwrap();
        assert_ne!(back, original);
        assert_ne!(back.total_commits, original.total_commits);
    }

    #[test]
    fn decode_is_deterministic() {
        let link = "https://wrapped.example/?github=dev&contributions=1234&lines=5&bugs=6";
        assert_eq!(decode(link).unwrap(), decode(link).unwrap());
    }

    #[test]
    fn accepts_full_url_with_fragment_and_extra_params() {
        let (user, p) =
            decode("https://wrapped.example/?utm=x&github=dev&contributions=3&lines=4&bugs=5#top")
                .unwrap();
        assert_eq!(user, "dev");
        assert_eq!(p.total_contributions, 3);
        assert_eq!(p.total_commits_with_bug, 5);
    }

    #[test]
    fn missing_field_is_not_reconstructable() {
        assert_eq!(
            decode("github=dev&contributions=3&lines=4"),
            Err(DecodeError::MissingField(PARAM_BUGS))
        );
        assert_eq!(
            decode(""),
            Err(DecodeError::MissingField(PARAM_GITHUB))
        );
    }

    #[test]
    fn non_numeric_field_is_not_reconstructable() {
        assert_eq!(
            decode("github=dev&contributions=lots&lines=4&bugs=1"),
            Err(DecodeError::NotNumeric {
                field: PARAM_CONTRIBUTIONS,
                value: "lots".into()
            })
        );
        assert!(decode("github=dev&contributions=&lines=4&bugs=1").is_err());
        assert!(decode("github=dev&contributions=1.5&lines=4&bugs=1").is_err());
    }

    #[test]
    fn empty_handle_is_not_reconstructable() {
        assert_eq!(
            decode("github=&contributions=1&lines=4&bugs=1"),
            Err(DecodeError::EmptyHandle)
        );
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let (_, p) = decode("github=dev&contributions=-40&lines=4&bugs=-1").unwrap();
        assert_eq!(p.total_contributions, 0);
        assert_eq!(p.total_commits_with_bug, 0);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let link = format!("github=dev&contributions={}&lines={}&bugs=0", i64::MAX, i64::MAX);
        let (_, p) = decode(&link).unwrap();
        assert_eq!(p.total_commits, (i64::MAX as u128 * 3 / 2) as u64);
        assert_eq!(p.total_lines_of_code_read, u64::MAX);
    }

    #[test]
    fn handle_is_form_encoded() {
        let params = ShareParams {
            github: "a b&c".into(),
            contributions: 1,
            lines: 2,
            bugs: 3,
        };
        assert_eq!(params.to_query(), "github=a+b%26c&contributions=1&lines=2&bugs=3");
        assert_eq!(ShareParams::parse(&params.to_query()).unwrap(), params);
    }

    #[test]
    fn percent_decoding_is_lenient() {
        let (user, _) = decode("github=a%20b+c&contributions=1&lines=1&bugs=1").unwrap();
        assert_eq!(user, "a b c");
        let (user, _) = decode("github=100%&contributions=1&lines=1&bugs=1").unwrap();
        assert_eq!(user, "100%");
        let (user, _) = decode("github=%zz&contributions=1&lines=1&bugs=1").unwrap();
        assert_eq!(user, "%zz");
    }

    #[test]
    fn first_value_wins() {
        let (user, p) =
            decode("https://wrapped.example/?github=one&github=two&contributions=4&contributions=9&lines=1&bugs=1")
                .unwrap();
        assert_eq!(user, "one");
        assert_eq!(p.total_contributions, 4);
    }

    #[test]
    fn share_message_text() {
        let msg = ShareMessage::new(&StatsPayload::fallback(), "octocat", "http://localhost:3000", 2024);
        assert_eq!(msg.title, "My 2024 Dev Wrapped");
        assert_eq!(
            msg.text,
            "Check out my developer stats for 2024! I wrote 20,000 lines of code and made 75 contributions!"
        );
        assert_eq!(
            msg.url,
            "http://localhost:3000?github=octocat&contributions=75&lines=20000&bugs=10"
        );
        assert!(msg.clipboard_text().ends_with("\n\nhttp://localhost:3000?github=octocat&contributions=75&lines=20000&bugs=10"));
    }
}
