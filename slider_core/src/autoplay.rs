// Autoplay controller. Owns at most one repeating timer in the instance's queue.
// Re-arming always cancels first; the page-visibility flag gates arming.

use tracing::debug;

use crate::timer::{TimerKind, TimerQueue};
use crate::types::{TimerId, Timestamp};

/// Timer-driven advance to the next slide.
#[derive(Debug, Clone)]
pub struct Autoplay {
    enabled: bool,
    delay_ms: u64,
    handle: Option<TimerId>,
    page_visible: bool,
}

impl Autoplay {
    pub fn new(enabled: bool, delay_ms: u64) -> Self {
        Autoplay {
            enabled,
            delay_ms,
            handle: None,
            page_visible: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerId> {
        self.handle
    }

    pub fn page_visible(&self) -> bool {
        self.page_visible
    }

    /// Arm a fresh interval. No-op when disabled or while the page is hidden.
    pub fn start(&mut self, timers: &mut TimerQueue, now: Timestamp) {
        if !self.enabled || !self.page_visible {
            return;
        }
        self.stop(timers);
        let id = timers.schedule_repeating(TimerKind::Autoplay, now, self.delay_ms);
        debug!(delay_ms = self.delay_ms, "autoplay armed");
        self.handle = Some(id);
    }

    /// Cancel the interval if armed. Idempotent.
    pub fn stop(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.handle.take() {
            timers.cancel(id);
            debug!("autoplay stopped");
        }
    }

    /// Stop then start, so the next advance waits a full delay from `now`.
    pub fn reset(&mut self, timers: &mut TimerQueue, now: Timestamp) {
        self.stop(timers);
        self.start(timers, now);
    }

    /// Hidden pages cancel the interval; becoming visible arms a new one.
    pub fn set_page_visible(&mut self, visible: bool, timers: &mut TimerQueue, now: Timestamp) {
        if visible {
            self.page_visible = true;
            self.start(timers, now);
        } else {
            self.stop(timers);
            self.page_visible = false;
        }
    }

    /// True if `id` is this controller's interval.
    pub fn owns(&self, id: TimerId) -> bool {
        self.handle == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn disabled_never_arms() {
        let mut timers = TimerQueue::new();
        let mut autoplay = Autoplay::new(false, 5000);
        autoplay.start(&mut timers, ms(0));
        autoplay.reset(&mut timers, ms(0));
        assert!(!autoplay.is_armed());
        assert!(timers.is_empty());
    }

    #[test]
    fn reset_leaves_exactly_one_timer() {
        let mut timers = TimerQueue::new();
        let mut autoplay = Autoplay::new(true, 5000);
        for t in 0..10 {
            autoplay.reset(&mut timers, ms(t * 100));
        }
        assert_eq!(timers.pending(TimerKind::Autoplay), 1);
        assert_eq!(timers.next_deadline(), Some(ms(900 + 5000)));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timers = TimerQueue::new();
        let mut autoplay = Autoplay::new(true, 8000);
        autoplay.start(&mut timers, ms(0));
        autoplay.stop(&mut timers);
        autoplay.stop(&mut timers);
        assert!(!autoplay.is_armed());
        assert!(timers.is_empty());
    }

    #[test]
    fn visibility_cancels_and_rearms_fresh() {
        let mut timers = TimerQueue::new();
        let mut autoplay = Autoplay::new(true, 5000);
        autoplay.start(&mut timers, ms(0));
        let first = autoplay.handle().unwrap();

        autoplay.set_page_visible(false, &mut timers, ms(1000));
        assert!(!autoplay.is_armed());
        assert!(timers.is_empty());

        // Start while hidden is ignored.
        autoplay.start(&mut timers, ms(2000));
        assert!(!autoplay.is_armed());

        autoplay.set_page_visible(true, &mut timers, ms(3000));
        let second = autoplay.handle().unwrap();
        assert_ne!(first, second);
        assert_eq!(timers.next_deadline(), Some(ms(8000)));
    }
}
