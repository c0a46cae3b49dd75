use devwrap_core::StatsPayload;

// ── Phase ──

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Profile form; the initial phase.
    Input,
    /// Slide `n` is on screen.
    Presenting(usize),
    /// Summary card. Terminal for the session.
    Summary,
}

impl Phase {
    /// Phase reached by one automatic advance, or `None` if this phase does
    /// not advance.
    pub fn successor(self, slide_count: usize) -> Option<Phase> {
        match self {
            Phase::Presenting(i) if i + 1 < slide_count => Some(Phase::Presenting(i + 1)),
            Phase::Presenting(_) => Some(Phase::Summary),
            Phase::Input | Phase::Summary => None,
        }
    }

    pub fn slide_index(self) -> Option<usize> {
        match self {
            Phase::Presenting(i) => Some(i),
            _ => None,
        }
    }
}

// ── Session state ──

/// Everything the controller owns about the running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    phase: Phase,
    payload: Option<StatsPayload>,
    username: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::reset()
    }
}

impl SessionState {
    /// Fresh session in `Input` with no payload. Calling it again yields an
    /// identical value.
    pub fn reset() -> Self {
        Self {
            phase: Phase::Input,
            payload: None,
            username: String::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn payload(&self) -> Option<&StatsPayload> {
        self.payload.as_ref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// `Input → Presenting(0)` with the acquired payload.
    pub(crate) fn begin(&mut self, payload: StatsPayload) {
        self.payload = Some(payload);
        self.phase = Phase::Presenting(0);
    }

    /// Apply one automatic advance. Never advances without a payload.
    pub(crate) fn advance(&mut self, slide_count: usize) -> Option<Phase> {
        self.payload.as_ref()?;
        let next = self.phase.successor(slide_count)?;
        self.phase = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_idempotent() {
        assert_eq!(SessionState::reset(), SessionState::reset());
        let s = SessionState::default();
        assert_eq!(s.phase(), Phase::Input);
        assert!(s.payload().is_none());
        assert_eq!(s.username(), "");
    }

    #[test]
    fn successor_chain() {
        assert_eq!(Phase::Input.successor(5), None);
        assert_eq!(Phase::Presenting(0).successor(5), Some(Phase::Presenting(1)));
        assert_eq!(Phase::Presenting(3).successor(5), Some(Phase::Presenting(4)));
        assert_eq!(Phase::Presenting(4).successor(5), Some(Phase::Summary));
        assert_eq!(Phase::Summary.successor(5), None);
    }

    #[test]
    fn no_advance_without_payload() {
        let mut s = SessionState::reset();
        s.phase = Phase::Presenting(0);
        assert_eq!(s.advance(5), None);
        assert_eq!(s.phase(), Phase::Presenting(0));
    }

    #[test]
    fn begin_enters_first_slide() {
        let mut s = SessionState::reset();
        s.begin(StatsPayload::fallback());
        assert_eq!(s.phase(), Phase::Presenting(0));
        assert_eq!(s.advance(5), Some(Phase::Presenting(1)));
    }
}
