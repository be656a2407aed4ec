// Deterministic virtual timers. The host owns the real clock and feeds it in;
// nothing here reads wall time, so every schedule is reproducible in tests.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::{TimerId, Timestamp};

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of a navigation transition.
    Unlock,
    /// Autoplay interval tick.
    Autoplay,
}

/// A pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    deadline: Timestamp,
    period_ms: Option<u64>,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    pub at: Timestamp,
}

/// Per-instance timer queue. A handful of entries at most, so a Vec is enough.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u32,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer that fires once at `now + delay_ms`.
    pub fn schedule_once(&mut self, kind: TimerKind, now: Timestamp, delay_ms: u64) -> TimerId {
        self.push(kind, now.after(delay_ms), None)
    }

    /// Schedule a timer that fires every `period_ms`, first at `now + period_ms`.
    /// A zero period is treated as 1 ms.
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        now: Timestamp,
        period_ms: u64,
    ) -> TimerId {
        let period = period_ms.max(1);
        self.push(kind, now.after(period), Some(period))
    }

    fn push(&mut self, kind: TimerKind, deadline: Timestamp, period_ms: Option<u64>) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            kind,
            deadline,
            period_ms,
        });
        trace!(id = id.as_u32(), ?kind, deadline = deadline.as_millis(), "timer scheduled");
        id
    }

    /// Cancel a timer. Returns false if it was not pending. Idempotent.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of pending timers of one kind.
    pub fn pending(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// One-shot timers are removed. A repeating timer is re-armed at the first
    /// period boundary strictly after `now`, so ticks missed while the host was
    /// not calling back coalesce into a single firing.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<Fired> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;

        let timer = self.timers[pos];
        let fired = Fired {
            id: timer.id,
            kind: timer.kind,
            at: timer.deadline,
        };

        match timer.period_ms {
            Some(period) => {
                let behind = now.as_millis() - timer.deadline.as_millis();
                let periods = behind / period + 1;
                self.timers[pos].deadline = timer.deadline.after(periods * period);
            }
            None => {
                self.timers.remove(pos);
            }
        }

        trace!(id = fired.id.as_u32(), kind = ?fired.kind, at = fired.at.as_millis(), "timer fired");
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn one_shot_fires_once() {
        let mut q = TimerQueue::new();
        let id = q.schedule_once(TimerKind::Unlock, ms(0), 500);

        assert!(q.pop_due(ms(499)).is_none());
        let fired = q.pop_due(ms(500)).expect("due at 500");
        assert_eq!(fired.id, id);
        assert_eq!(fired.at, ms(500));
        assert!(q.pop_due(ms(10_000)).is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut q = TimerQueue::new();
        q.schedule_once(TimerKind::Unlock, ms(100), 0);
        assert!(q.pop_due(ms(100)).is_some());
    }

    #[test]
    fn repeating_rearms_on_period_boundary() {
        let mut q = TimerQueue::new();
        q.schedule_repeating(TimerKind::Autoplay, ms(0), 1000);

        assert_eq!(q.pop_due(ms(1000)).map(|f| f.at), Some(ms(1000)));
        assert_eq!(q.next_deadline(), Some(ms(2000)));
        assert_eq!(q.pending(TimerKind::Autoplay), 1);
    }

    #[test]
    fn missed_ticks_coalesce() {
        let mut q = TimerQueue::new();
        q.schedule_repeating(TimerKind::Autoplay, ms(0), 1000);

        // Ten periods late: one firing, next deadline after `now`.
        assert!(q.pop_due(ms(10_500)).is_some());
        assert!(q.pop_due(ms(10_500)).is_none());
        assert_eq!(q.next_deadline(), Some(ms(11_000)));
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule_once(TimerKind::Unlock, ms(0), 700);
        q.schedule_repeating(TimerKind::Autoplay, ms(0), 300);

        assert_eq!(q.pop_due(ms(1000)).map(|f| f.kind), Some(TimerKind::Autoplay));
        assert_eq!(q.pop_due(ms(1000)).map(|f| f.kind), Some(TimerKind::Unlock));
        assert!(q.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.schedule_repeating(TimerKind::Autoplay, ms(0), 5000);
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(!q.is_pending(id));
        assert_eq!(q.next_deadline(), None);
    }
}
