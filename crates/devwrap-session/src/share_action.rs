use devwrap_core::ShareMessage;
use thiserror::Error;
use tracing::{info, warn};

use crate::controller::Notice;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("{target} failed: {reason}")]
    Failed {
        target: &'static str,
        reason: String,
    },
}

/// Somewhere a share message can be sent.
pub trait ShareSink {
    fn name(&self) -> &'static str;
    fn deliver(&self, message: &ShareMessage) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native target took the message.
    Shared,
    /// Native sharing failed; text and link are on the clipboard.
    Copied,
    /// Both targets failed. Nothing was copied.
    Failed { reason: String },
}

impl ShareOutcome {
    /// Banner for this outcome. A failure shows the link instead of claiming
    /// a copy.
    pub fn notice(&self, message: &ShareMessage) -> Notice {
        match self {
            ShareOutcome::Shared => Notice::info("Shared!"),
            ShareOutcome::Copied => Notice::info("Share link copied to clipboard!"),
            ShareOutcome::Failed { reason } => {
                Notice::error(format!("Could not share ({reason}). Link: {}", message.url))
            }
        }
    }
}

/// Try `native`, then `clipboard`.
pub fn share_with_fallback(
    native: &dyn ShareSink,
    clipboard: &dyn ShareSink,
    message: &ShareMessage,
) -> ShareOutcome {
    let native_err = match native.deliver(message) {
        Ok(()) => {
            info!(target: "devwrap::share", target_name = native.name(), "shared");
            return ShareOutcome::Shared;
        }
        Err(e) => e,
    };
    warn!(target: "devwrap::share", error = %native_err, "native share failed, trying clipboard");
    match clipboard.deliver(message) {
        Ok(()) => ShareOutcome::Copied,
        Err(e) => {
            warn!(target: "devwrap::share", error = %e, "clipboard fallback failed");
            ShareOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
