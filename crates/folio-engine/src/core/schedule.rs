//! Virtual timer queue for delayed callbacks.
//!
//! The host advances the clock once per frame; every callback whose due time
//! falls inside the elapsed window fires in due order, with the clock set to
//! its due time. Re-arming from inside a callback is therefore relative to the
//! moment it was due, not to when the frame happened to land.

/// Handle for a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TimerId,
    due_ms: f64,
    payload: T,
    /// Armed with no delay from inside `advance`; waits for the next window.
    deferred: bool,
}

/// Pending delayed callbacks, each carrying a `T` that says what to do.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: f64,
    next_id: u32,
    pending: Vec<Pending<T>>,
    closed: bool,
    advancing: bool,
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            pending: Vec::with_capacity(4),
            closed: false,
            advancing: false,
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Arm a callback `delay_ms` from now. Returns `None` once closed.
    pub fn schedule(&mut self, delay_ms: f64, payload: T) -> Option<TimerId> {
        if self.closed {
            return None;
        }
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let delay_ms = delay_ms.max(0.0);
        self.pending.push(Pending {
            id,
            due_ms: self.now_ms + delay_ms,
            payload,
            deferred: self.advancing && delay_ms <= 0.0,
        });
        Some(id)
    }

    /// Cancel one callback. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel everything pending. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Cancel everything and refuse further scheduling.
    pub fn close(&mut self) -> usize {
        self.closed = true;
        self.cancel_all()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward by `dt_ms`, firing due callbacks in order.
    ///
    /// `fire` gets the scheduler back so it can re-arm or cancel. Callbacks
    /// armed during the window fire in the same call if they fall due inside
    /// it, except zero-delay ones, which wait for the next call.
    pub fn advance(&mut self, dt_ms: f64, mut fire: impl FnMut(&mut Self, T)) {
        let target = self.now_ms + dt_ms.max(0.0);
        self.advancing = true;
        while !self.closed {
            let next = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.deferred && p.due_ms <= target)
                .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms))
                .map(|(i, _)| i);
            let Some(index) = next else { break };
            let due = self.pending.remove(index);
            self.now_ms = due.due_ms;
            fire(self, due.payload);
        }
        self.advancing = false;
        for p in &mut self.pending {
            p.deferred = false;
        }
        self.now_ms = target;
    }
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
