//! Отложенное сохранение: серия изменений схлопывается в одну запись после паузы.

use std::time::{Duration, Instant};

pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_secs(1);

/// Debounce (not throttle): every `schedule` pushes the deadline out again.
/// Polled from the frame tick, so expiry and mutation share one thread.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay: Duration,
    pending: bool,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: false, deadline: None }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.pending = true;
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once per quiet period: when a save is pending and the
    /// deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if self.pending && now >= deadline => {
                self.cancel();
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DELAY)
    }
}
