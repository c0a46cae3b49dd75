use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use devwrap_core::StatsPayload;
use devwrap_fetch::{FetchError, StatsFetcher};
use devwrap_session::{share_with_fallback, Phase, PresentationController, ShareSink};
use tracing::debug;

/// Which form field receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Github,
    StackOverflow,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Github => Field::StackOverflow,
            Field::StackOverflow => Field::Github,
        }
    }
}

/// Profile form contents.
#[derive(Debug, Default)]
pub struct InputForm {
    pub github: String,
    pub stackoverflow: String,
    pub focus: Field,
    pub error: Option<String>,
}

impl InputForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Github => &mut self.github,
            Field::StackOverflow => &mut self.stackoverflow,
        }
    }
}

/// Share targets, tried in order.
pub struct Sinks {
    pub native: Box<dyn ShareSink>,
    pub clipboard: Box<dyn ShareSink>,
}

type FetchResult = Result<StatsPayload, FetchError>;

/// Application state for the TUI.
pub struct App {
    pub controller: PresentationController,
    pub form: InputForm,
    pub should_quit: bool,
    fetcher: Arc<dyn StatsFetcher>,
    /// Receiving end of the in-flight fetch, if any.
    inbox: Option<Receiver<FetchResult>>,
    sinks: Sinks,
}

impl App {
    pub fn new(
        controller: PresentationController,
        fetcher: Arc<dyn StatsFetcher>,
        sinks: Sinks,
    ) -> Self {
        Self {
            controller,
            form: InputForm::default(),
            should_quit: false,
            fetcher,
            inbox: None,
            sinks,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.inbox.is_some()
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        match self.controller.phase() {
            Phase::Input => self.handle_form_key(key),
            Phase::Presenting(_) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                KeyCode::Char('d') => self.controller.dismiss_notice(),
                _ => {}
            },
            Phase::Summary => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                KeyCode::Char('d') => self.controller.dismiss_notice(),
                KeyCode::Char('s') => self.share(),
                _ => {}
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Tab | KeyCode::BackTab => self.form.focus = self.form.focus.next(),
            KeyCode::Backspace => {
                self.form.focused_mut().pop();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.form.focused_mut().push(c),
            _ => {}
        }
    }

    /// Validate the form and start a background fetch. Ignored while a
    /// fetch is already running.
    pub fn submit(&mut self) {
        if self.is_fetching() {
            return;
        }
        match self
            .controller
            .submit(&self.form.github, &self.form.stackoverflow)
        {
            Ok(ids) => {
                self.form.error = None;
                let (tx, rx) = mpsc::channel();
                let fetcher = Arc::clone(&self.fetcher);
                thread::spawn(move || {
                    // The receiver is gone if the app quit first.
                    let _ = tx.send(fetcher.fetch(&ids));
                });
                self.inbox = Some(rx);
            }
            Err(e) => self.form.error = Some(e.to_string()),
        }
    }

    /// Deliver a finished fetch, then let the dwell timer advance.
    pub fn on_tick(&mut self, now: Instant) {
        let polled = self.inbox.as_ref().map(|rx| rx.try_recv());
        match polled {
            Some(Ok(result)) => {
                self.inbox = None;
                self.controller.resolve(result, now);
            }
            Some(Err(TryRecvError::Disconnected)) => {
                self.inbox = None;
                self.controller.resolve(
                    Err(FetchError::Transport("fetch worker exited".into())),
                    now,
                );
            }
            Some(Err(TryRecvError::Empty)) | None => {}
        }
        if let Some(next) = self.controller.tick(now) {
            debug!(target: "devwrap::session", ?next, "tui advanced");
        }
    }

    /// Share the summary, falling back to the clipboard.
    pub fn share(&mut self) {
        let Some(summary) = self.controller.summary() else {
            return;
        };
        let message = summary.share.clone();
        let outcome = share_with_fallback(
            self.sinks.native.as_ref(),
            self.sinks.clipboard.as_ref(),
            &message,
        );
        self.controller.set_notice(outcome.notice(&message));
    }

    /// Tear the session down. A fetch still in flight is discarded.
    pub fn quit(&mut self) {
        self.controller.teardown();
        self.inbox = None;
        self.should_quit = true;
    }
}
