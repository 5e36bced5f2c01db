// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives.
//!
//! UI state machines often need "do this later" behavior: ignore a pointer
//! release for a few hundred milliseconds after a popup opens, forget a
//! typeahead buffer after a pause, re-enable something after a grace period.
//! Hosts differ wildly in how they provide timers (browser `setTimeout`, a
//! winit event loop, a test harness advancing a fake clock), so this crate
//! does not own a clock. Instead:
//!
//! - Callers schedule payloads at absolute deadlines on a caller-chosen
//!   monotonic clock (typically milliseconds).
//! - The host asks for [`TimerQueue::next_deadline`] to know when to wake up.
//! - When the host observes that time has passed, it drains due entries with
//!   [`TimerQueue::pop_due`] and interprets the payloads itself.
//!
//! Timers are identified by [`TimerId`] and can be cancelled individually or
//! by predicate. Entries with equal deadlines fire in scheduling order.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Debug, PartialEq)]
//! enum Job {
//!     AllowSelect,
//!     Forget,
//! }
//!
//! let mut timers = TimerQueue::new();
//! let select = timers.schedule(1_300, Job::AllowSelect);
//! timers.schedule(1_750, Job::Forget);
//! assert_eq!(timers.next_deadline(), Some(1_300));
//!
//! // Nothing is due yet.
//! assert!(timers.pop_due(1_000).is_none());
//!
//! // Cancelling removes the entry and hands back the payload.
//! assert_eq!(timers.cancel(select), Some(Job::AllowSelect));
//!
//! let fired = timers.pop_due(2_000).unwrap();
//! assert_eq!(fired.payload, Job::Forget);
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Identifier of a scheduled timer, unique within one [`TimerQueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A timer entry removed from the queue because its deadline passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// Identifier returned by [`TimerQueue::schedule`].
    pub id: TimerId,
    /// Deadline the entry was scheduled for.
    pub deadline: u64,
    /// Caller payload.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: u64,
    payload: T,
}

/// A small deadline-ordered queue of payloads.
///
/// Entries are kept sorted so the earliest deadline is popped in constant time.
/// Scheduling and cancelling are linear in the number of pending entries,
/// which suits the handful of timers a widget typically owns.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    // Sorted by descending (deadline, id); the next entry to fire is last.
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `payload` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let at = self.entries.partition_point(|e| (e.deadline, e.id) > (deadline, id));
        self.entries.insert(
            at,
            Entry {
                id,
                deadline,
                payload,
            },
        );
        id
    }

    /// Returns `true` if the timer is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.deadline)
    }

    /// Cancels a pending timer, returning its payload.
    ///
    /// Cancelling a timer that already fired or was cancelled is a no-op.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).payload)
    }

    /// Cancels every pending timer whose payload matches `predicate`.
    ///
    /// Returns the number of cancelled timers.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(&e.payload));
        before - self.entries.len()
    }

    /// Removes every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.last().map(|e| e.deadline)
    }

    /// Removes and returns the earliest timer if its deadline is at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Expired<T>> {
        if self.entries.last()?.deadline > now {
            return None;
        }
        self.entries.pop().map(|e| Expired {
            id: e.id,
            deadline: e.deadline,
            payload: e.payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn drain(q: &mut TimerQueue<u32>, now: u64) -> Vec<u32> {
        let mut out = Vec::new();
        while let Some(e) = q.pop_due(now) {
            out.push(e.payload);
        }
        out
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(30, 3);
        q.schedule(10, 1);
        q.schedule(20, 2);
        assert_eq!(q.next_deadline(), Some(10));
        assert_eq!(drain(&mut q, 25), vec![1, 2]);
        assert_eq!(drain(&mut q, 100), vec![3]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(10, 1);
        q.schedule(10, 2);
        q.schedule(5, 0);
        q.schedule(10, 3);
        assert_eq!(drain(&mut q, 10), vec![0, 1, 2, 3]);
    }

    #[test]
    fn deadline_is_inclusive() {
        let mut q = TimerQueue::new();
        q.schedule(10, 1);
        assert!(q.pop_due(9).is_none());
        assert_eq!(q.pop_due(10).map(|e| e.deadline), Some(10));
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule(10, 1);
        let b = q.schedule(20, 2);
        assert_eq!(q.cancel(a), Some(1));
        assert_eq!(q.cancel(a), None);
        assert!(!q.contains(a));
        assert!(q.contains(b));
        assert_eq!(q.deadline(b), Some(20));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn cancel_where_filters_by_payload() {
        let mut q = TimerQueue::new();
        q.schedule(10, 1);
        q.schedule(20, 2);
        q.schedule(30, 3);
        assert_eq!(q.cancel_where(|p| p % 2 == 1), 2);
        assert_eq!(drain(&mut q, 100), vec![2]);
    }

    #[test]
    fn ids_stay_unique_after_pop() {
        let mut q = TimerQueue::new();
        let a = q.schedule(1, 1);
        let _ = q.pop_due(1);
        let b = q.schedule(1, 2);
        assert_ne!(a, b);
        assert_eq!(q.cancel(a), None);
        assert_eq!(q.cancel(b), Some(2));
    }
}
