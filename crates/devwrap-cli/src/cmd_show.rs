use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use devwrap_fetch::{HttpStatsFetcher, StatsFetcher};
use devwrap_session::PresentationController;
use tracing::info;

use crate::config::Config;
use crate::plain;

#[derive(Args, Default)]
pub struct ShowArgs {
    /// GitHub profile URL; submits the form right away
    #[arg(long)]
    pub github: Option<String>,
    /// Stack Overflow profile URL
    #[arg(long)]
    pub stackoverflow: Option<String>,
    /// Share link (or bare query string) to present instead of fetching
    #[arg(long)]
    pub link: Option<String>,
    /// Print slides to stdout instead of running the TUI
    #[arg(long)]
    pub plain: bool,
    /// Seconds each slide stays on screen (overrides config)
    #[arg(long)]
    pub dwell: Option<u64>,
    /// Stats endpoint base URL (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Profile pair taken from the command line, if any.
pub type Prefill = Option<(String, String)>;

/// `devwrap show`
pub fn execute(config_path: &Path, args: ShowArgs) -> anyhow::Result<()> {
    let mut cfg = Config::load(config_path);
    if let Some(dwell) = args.dwell {
        cfg.dwell_secs = dwell;
    }
    if let Some(endpoint) = args.endpoint {
        cfg.endpoint = endpoint;
    }

    let fetcher: Arc<dyn StatsFetcher> = Arc::new(HttpStatsFetcher::with_timeout(
        cfg.endpoint.clone(),
        cfg.request_timeout(),
    ));
    let controller = PresentationController::from_share_link(
        cfg.session_options(),
        args.link.as_deref(),
        Instant::now(),
    );
    let prefill: Prefill = args
        .github
        .map(|github| (github, args.stackoverflow.unwrap_or_default()));
    info!(
        target: "devwrap::session",
        endpoint = %cfg.endpoint,
        from_link = args.link.is_some(),
        plain = args.plain,
        "show"
    );

    #[cfg(feature = "tui")]
    if !args.plain {
        let sinks = crate::tui::Sinks {
            native: Box::new(crate::share::CommandShare::new(cfg.share_command.clone())),
            clipboard: Box::new(crate::share::Osc52Clipboard),
        };
        return crate::tui::run(controller, fetcher, prefill, sinks);
    }

    plain::run(controller, fetcher.as_ref(), prefill)
}
