//! Order timestamps
//!
//! Wall-clock Unix nanos, forced strictly increasing so that `created_at`
//! orders submissions even when the system clock stalls or steps back.

use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub(crate) struct MonotonicClock {
    last: i64,
}

impl MonotonicClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Next timestamp, always greater than the previous one
    pub(crate) fn now(&mut self) -> i64 {
        let wall = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
        let next = wall.max(self.last.saturating_add(1));
        self.last = next;
        next
    }

    /// Most recent timestamp handed out, zero before the first
    #[cfg(test)]
    pub(crate) fn last(&self) -> i64 {
        self.last
    }
}
