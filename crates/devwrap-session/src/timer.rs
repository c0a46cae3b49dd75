use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    deadline: Instant,
    index: usize,
}

/// Single-slot advancement timer.
///
/// Holds at most one pending deadline. Arming replaces whatever was pending,
/// and a deadline only fires for the slide index it was armed for.
#[derive(Debug, Clone, Default)]
pub struct AdvanceTimer {
    pending: Option<Pending>,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an advance away from slide `index` at `now + dwell`.
    /// A deadline past the clock's range never comes due, so nothing is armed.
    pub fn arm(&mut self, now: Instant, dwell: Duration, index: usize) {
        self.pending = now
            .checked_add(dwell)
            .map(|deadline| Pending { deadline, index });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Consume the pending deadline if it is due and still belongs to
    /// `current_index`. A deadline armed for another index is dropped.
    pub fn fire(&mut self, now: Instant, current_index: usize) -> bool {
        match self.pending {
            Some(p) if p.index != current_index => {
                self.pending = None;
                false
            }
            Some(p) if now >= p.deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
