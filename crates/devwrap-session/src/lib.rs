pub mod controller;
pub mod share_action;
pub mod state;
pub mod timer;

pub use controller::{
    Notice, NoticeLevel, PresentationController, SessionOptions, Summary, CLOSING_MESSAGE,
    DEFAULT_DWELL,
};
pub use share_action::{share_with_fallback, ShareError, ShareOutcome, ShareSink};
pub use state::{Phase, SessionState};
pub use timer::AdvanceTimer;
