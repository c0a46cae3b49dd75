//! Presentation controller.
//!
//! Owns the session state and drives it: acquisition moves `Input` to the
//! first slide, the dwell timer walks the slides, and the last advance lands
//! on the summary. Time is always passed in as `now`, so callers decide
//! whether it comes from a real clock or a test.

use std::time::{Duration, Instant};

use devwrap_core::share::{self, ShareMessage};
use devwrap_core::{classify, derive_slides, Slide, StatsPayload, Tier};
use devwrap_fetch::{FetchError, ProfileError, ProfileIds};
use tracing::{debug, info, warn};

use crate::state::{Phase, SessionState};
use crate::timer::AdvanceTimer;

pub const DEFAULT_DWELL: Duration = Duration::from_secs(5);
pub const DEFAULT_SHARE_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_YEAR: u16 = 2024;

pub const FETCH_FAILED_NOTICE: &str =
    "Failed to fetch developer stats. Using fallback data for demonstration.";

/// Closing line of the summary card.
pub const CLOSING_MESSAGE: &str =
    "You've had an amazing year! May your code be merry and bright!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Dismissible banner text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Computed on entering `Summary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub tier: Tier,
    pub share: ShareMessage,
}

/// Knobs that shape a session but not its state.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub dwell: Duration,
    pub share_origin: String,
    pub year: u16,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            dwell: DEFAULT_DWELL,
            share_origin: DEFAULT_SHARE_ORIGIN.to_string(),
            year: DEFAULT_YEAR,
        }
    }
}

pub struct PresentationController {
    options: SessionOptions,
    state: SessionState,
    slides: Vec<Slide>,
    timer: AdvanceTimer,
    notice: Option<Notice>,
    summary: Option<Summary>,
    acquiring: bool,
    torn_down: bool,
}

impl PresentationController {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            state: SessionState::reset(),
            slides: Vec::new(),
            timer: AdvanceTimer::new(),
            notice: None,
            summary: None,
            acquiring: false,
            torn_down: false,
        }
    }

    /// Session for a direct visit. A reconstructable share link starts the
    /// deck immediately; anything else leaves the session in `Input`.
    pub fn from_share_link(options: SessionOptions, link: Option<&str>, now: Instant) -> Self {
        let mut controller = Self::new(options);
        if let Some(link) = link {
            controller.load_share_link(link, now);
        }
        controller
    }

    // ── Accessors ──

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.phase().slide_index().and_then(|i| self.slides.get(i))
    }

    /// `(slides shown so far, total)` while presenting.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.phase()
            .slide_index()
            .map(|i| (i, self.slides.len()))
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_acquiring(&self) -> bool {
        self.acquiring
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// When the next automatic advance is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    // ── Transitions ──

    /// Decode a share link at load time. Returns whether the deck started.
    pub fn load_share_link(&mut self, link: &str, now: Instant) -> bool {
        if self.torn_down || self.phase() != Phase::Input {
            return false;
        }
        match share::decode(link) {
            Ok((username, payload)) => {
                info!(target: "devwrap::session", %username, "starting from share link");
                self.state.set_username(username);
                self.begin(payload, now);
                true
            }
            Err(e) => {
                debug!(target: "devwrap::session", error = %e, "share link ignored, staying in input");
                false
            }
        }
    }

    /// Validate the profile form and mark an acquisition as in flight.
    /// The returned ids are what the fetcher should be called with.
    pub fn submit(
        &mut self,
        github_url: &str,
        stackoverflow_url: &str,
    ) -> Result<ProfileIds, ProfileError> {
        let ids = ProfileIds::from_urls(github_url, stackoverflow_url)?;
        if self.acquiring {
            debug!(target: "devwrap::session", "second submission while a fetch is in flight");
        }
        self.state.set_username(ids.github.clone());
        self.acquiring = true;
        Ok(ids)
    }

    /// Apply the outcome of an acquisition. Failure substitutes the fallback
    /// payload behind an error notice; both paths start the deck.
    pub fn resolve(&mut self, result: Result<StatsPayload, FetchError>, now: Instant) {
        if self.torn_down {
            return;
        }
        self.acquiring = false;
        if self.phase() == Phase::Summary {
            debug!(target: "devwrap::session", "acquisition resolved after summary, ignored");
            return;
        }
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                warn!(target: "devwrap::session", error = %e, "using fallback stats");
                self.notice = Some(Notice::error(FETCH_FAILED_NOTICE));
                StatsPayload::fallback()
            }
        };
        self.begin(payload, now);
    }

    /// Advance if the dwell timer is due. Returns the new phase on a
    /// transition.
    pub fn tick(&mut self, now: Instant) -> Option<Phase> {
        if self.torn_down {
            return None;
        }
        let index = self.phase().slide_index()?;
        if !self.timer.fire(now, index) {
            return None;
        }
        let next = self.state.advance(self.slides.len())?;
        match next {
            Phase::Presenting(i) => self.timer.arm(now, self.options.dwell, i),
            Phase::Summary => self.enter_summary(),
            Phase::Input => {}
        }
        debug!(target: "devwrap::session", ?next, "advanced");
        Some(next)
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn set_notice(&mut self, notice: Notice) {
        if !self.torn_down {
            self.notice = Some(notice);
        }
    }

    /// Drop pending timers and any late acquisition effect. No state change
    /// happens after this.
    pub fn teardown(&mut self) {
        self.timer.cancel();
        self.acquiring = false;
        self.torn_down = true;
    }

    fn begin(&mut self, payload: StatsPayload, now: Instant) {
        self.slides = derive_slides(&payload);
        self.summary = None;
        self.state.begin(payload);
        self.timer.arm(now, self.options.dwell, 0);
        info!(target: "devwrap::session", slides = self.slides.len(), "presentation started");
    }

    fn enter_summary(&mut self) {
        self.timer.cancel();
        let Some(payload) = self.state.payload() else {
            return;
        };
        let tier = classify(payload.total_contributions, payload.total_commits_with_bug);
        let share = ShareMessage::new(
            payload,
            self.state.username(),
            &self.options.share_origin,
            self.options.year,
        );
        info!(target: "devwrap::session", %tier, "summary reached");
        self.summary = Some(Summary { tier, share });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DWELL: Duration = Duration::from_secs(5);

    fn controller() -> PresentationController {
        PresentationController::new(SessionOptions::default())
    }

    fn started(t0: Instant) -> PresentationController {
        let mut c = controller();
        c.submit("https://github.com/octocat", "").unwrap();
        c.resolve(Ok(StatsPayload::fallback()), t0);
        c
    }

    #[test]
    fn starts_in_input() {
        let c = controller();
        assert_eq!(c.phase(), Phase::Input);
        assert!(c.slides().is_empty());
        assert!(c.current_slide().is_none());
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn five_advances_reach_summary() {
        let t0 = Instant::now();
        let mut c = started(t0);
        assert_eq!(c.phase(), Phase::Presenting(0));

        let mut advances = 0;
        let mut now = t0;
        while c.phase() != Phase::Summary {
            now += DWELL;
            if c.tick(now).is_some() {
                advances += 1;
            }
            assert!(advances <= 5);
        }
        assert_eq!(advances, 5);
        assert!(c.next_deadline().is_none());
        assert!(c.tick(now + DWELL * 10).is_none());
    }

    #[test]
    fn no_advance_before_dwell() {
        let t0 = Instant::now();
        let mut c = started(t0);
        assert_eq!(c.tick(t0 + Duration::from_millis(4_999)), None);
        assert_eq!(c.tick(t0 + DWELL), Some(Phase::Presenting(1)));
        assert_eq!(c.progress(), Some((1, 5)));
        assert_eq!(c.current_slide().unwrap().title, "Bugs Squashed");
    }

    #[test]
    fn one_advance_per_tick_even_when_late() {
        let t0 = Instant::now();
        let mut c = started(t0);
        assert_eq!(c.tick(t0 + DWELL * 4), Some(Phase::Presenting(1)));
        assert_eq!(c.tick(t0 + DWELL * 4), None);
    }

    #[test]
    fn no_advance_without_payload() {
        let t0 = Instant::now();
        let mut c = controller();
        for k in 1..10 {
            assert_eq!(c.tick(t0 + DWELL * k), None);
        }
        assert_eq!(c.phase(), Phase::Input);
    }

    #[test]
    fn fetch_failure_falls_back_and_presents() {
        let t0 = Instant::now();
        let mut c = controller();
        c.submit("https://github.com/octocat", "").unwrap();
        assert!(c.is_acquiring());
        c.resolve(Err(FetchError::Status(502)), t0);

        assert!(!c.is_acquiring());
        assert_eq!(c.phase(), Phase::Presenting(0));
        let p = c.state().payload().unwrap();
        assert_eq!(
            (
                p.total_commits,
                p.total_commits_with_bug,
                p.total_contributions,
                p.total_linesize_of_code
            ),
            (250, 10, 75, 20_000)
        );
        let notice = c.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, FETCH_FAILED_NOTICE);

        c.dismiss_notice();
        assert!(c.notice().is_none());
        assert_eq!(c.phase(), Phase::Presenting(0));
    }

    #[test]
    fn invalid_form_stays_in_input() {
        let mut c = controller();
        assert_eq!(
            c.submit("not a url", ""),
            Err(ProfileError::InvalidGithubUrl)
        );
        assert!(!c.is_acquiring());
        assert_eq!(c.phase(), Phase::Input);
    }

    #[test]
    fn share_link_starts_presenting() {
        let t0 = Instant::now();
        let c = PresentationController::from_share_link(
            SessionOptions::default(),
            Some("https://wrapped.example/?github=dev&contributions=300&lines=1000&bugs=4"),
            t0,
        );
        assert_eq!(c.phase(), Phase::Presenting(0));
        assert_eq!(c.state().username(), "dev");
        assert_eq!(c.state().payload().unwrap().total_commits, 450);
    }

    #[test]
    fn malformed_share_link_gives_input() {
        let t0 = Instant::now();
        let c = PresentationController::from_share_link(
            SessionOptions::default(),
            Some("?github=dev&contributions=many&lines=1000&bugs=4"),
            t0,
        );
        assert_eq!(c.phase(), Phase::Input);
        assert!(c.notice().is_none());
        assert!(c.state().payload().is_none());
    }

    #[test]
    fn summary_computes_tier_and_share_link() {
        let t0 = Instant::now();
        let mut c = PresentationController::from_share_link(
            SessionOptions::default(),
            Some("github=dev&contributions=50&lines=1234&bugs=500"),
            t0,
        );
        assert!(c.summary().is_none());
        for k in 1..=5 {
            c.tick(t0 + DWELL * k);
        }
        assert_eq!(c.phase(), Phase::Summary);
        let summary = c.summary().unwrap();
        assert_eq!(summary.tier, Tier::DeveloperPro);
        assert_eq!(
            summary.share.url,
            "http://localhost:3000?github=dev&contributions=50&lines=1234&bugs=500"
        );
        assert_eq!(summary.share.title, "My 2024 Dev Wrapped");
    }

    #[test]
    fn teardown_discards_late_effects() {
        let t0 = Instant::now();
        let mut c = controller();
        c.submit("https://github.com/octocat", "").unwrap();
        c.teardown();
        c.resolve(Ok(StatsPayload::fallback()), t0);
        assert_eq!(c.phase(), Phase::Input);
        c.set_notice(Notice::info("late"));
        assert!(c.notice().is_none());
    }

    #[test]
    fn teardown_stops_timer() {
        let t0 = Instant::now();
        let mut c = started(t0);
        c.teardown();
        assert!(c.next_deadline().is_none());
        assert_eq!(c.tick(t0 + DWELL), None);
        assert_eq!(c.phase(), Phase::Presenting(0));
    }

    #[test]
    fn second_resolution_restarts_deck() {
        let t0 = Instant::now();
        let mut c = started(t0);
        c.tick(t0 + DWELL);
        c.tick(t0 + DWELL * 2);
        assert_eq!(c.phase(), Phase::Presenting(2));

        let mut other = StatsPayload::fallback();
        other.total_contributions = 2_000;
        c.resolve(Ok(other), t0 + DWELL * 2);
        assert_eq!(c.phase(), Phase::Presenting(0));
        assert_eq!(c.slides()[3].numeric_value, 2_000);
        // The old deadline for slide 2 is gone; slide 0 now waits a full dwell.
        assert_eq!(c.tick(t0 + DWELL * 2 + Duration::from_secs(1)), None);
    }

    #[test]
    fn resolution_after_summary_is_ignored() {
        let t0 = Instant::now();
        let mut c = started(t0);
        for k in 1..=5 {
            c.tick(t0 + DWELL * k);
        }
        c.resolve(Err(FetchError::Status(500)), t0 + DWELL * 6);
        assert_eq!(c.phase(), Phase::Summary);
        assert!(c.notice().is_none());
    }

    #[test]
    fn custom_dwell() {
        let t0 = Instant::now();
        let mut c = PresentationController::new(SessionOptions {
            dwell: Duration::from_secs(1),
            ..SessionOptions::default()
        });
        c.submit("https://github.com/octocat", "").unwrap();
        c.resolve(Ok(StatsPayload::default()), t0);
        assert_eq!(c.tick(t0 + Duration::from_secs(1)), Some(Phase::Presenting(1)));
    }

    #[test]
    fn huge_dwell_does_not_panic() {
        let t0 = Instant::now();
        let options = SessionOptions {
            dwell: Duration::from_secs(i64::MAX as u64),
            ..SessionOptions::default()
        };
        let mut c = PresentationController::from_share_link(
            options,
            Some("github=dev&contributions=1&lines=1&bugs=1"),
            t0,
        );
        assert_eq!(c.phase(), Phase::Presenting(0));
        assert!(c.next_deadline().is_none());
        assert_eq!(c.tick(t0 + DWELL), None);
    }
}
