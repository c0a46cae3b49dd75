use std::path::Path;

use devwrap_core::{ShareParams, StatsPayload};

use crate::config::Config;

/// `devwrap link --github <handle> [--contributions N] [--lines N] [--bugs N]`
pub fn execute(
    config_path: &Path,
    github: &str,
    contributions: u64,
    lines: u64,
    bugs: u64,
    origin: Option<&str>,
) -> anyhow::Result<()> {
    let github = github.trim();
    if github.is_empty() {
        anyhow::bail!("--github must not be empty");
    }
    let cfg = Config::load(config_path);
    let origin = origin.unwrap_or(&cfg.share_origin);
    println!("{}", build(github, contributions, lines, bugs, origin));
    Ok(())
}

fn build(github: &str, contributions: u64, lines: u64, bugs: u64, origin: &str) -> String {
    let payload = StatsPayload {
        total_contributions: contributions,
        total_linesize_of_code: lines,
        total_commits_with_bug: bugs,
        ..StatsPayload::default()
    };
    ShareParams::encode(&payload, github).to_url(origin)
}
