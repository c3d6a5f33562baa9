// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI state machines frequently need "do this after N milliseconds": finish a
//! transition, drop a short-lived guard, cancel a tap after a long press. This
//! crate keeps those deadlines as plain data so the state machine never owns a
//! real timer. The host supplies the clock (milliseconds, any epoch) and asks
//! the queue which timers are due.
//!
//! Each entry is keyed by a caller-defined *kind*. A kind is pending at most
//! once: scheduling it again replaces the previous deadline, which is the
//! usual semantics for debounced or restartable UI timers.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Kind {
//!     TransitionEnd,
//!     Guard,
//! }
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule_after(Kind::TransitionEnd, 1_000, 500);
//! timers.schedule_after(Kind::Guard, 1_000, 200);
//! assert_eq!(timers.next_deadline(), Some(1_200));
//!
//! // Nothing is due yet.
//! assert_eq!(timers.pop_due(1_100), None);
//!
//! // Both are due; they come out in deadline order.
//! assert_eq!(timers.pop_due(1_600), Some(Kind::Guard));
//! assert_eq!(timers.pop_due(1_600), Some(Kind::TransitionEnd));
//! assert!(timers.is_empty());
//! ```
//!
//! ## Driving the queue
//!
//! Hosts typically call `next_deadline` after every event to arm a single
//! platform timer, then loop on `pop_due` when it fires. Popping one timer at a
//! time lets handlers schedule or cancel other timers while the loop runs.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// A pending timer: a kind plus its absolute deadline in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer<K> {
    /// Caller-defined timer kind.
    pub kind: K,
    /// Absolute deadline in host milliseconds.
    pub deadline: u64,
}

/// Deadline-ordered queue of keyed timers.
///
/// Entries are kept sorted by deadline. Entries with equal deadlines fire in
/// the order they were scheduled.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: Vec<Timer<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Schedules `kind` to fire at `deadline`.
    ///
    /// If `kind` is already pending, its previous deadline is replaced and
    /// returned.
    pub fn schedule(&mut self, kind: K, deadline: u64) -> Option<u64> {
        let previous = self.cancel(&kind);
        let at = self.entries.partition_point(|t| t.deadline <= deadline);
        self.entries.insert(at, Timer { kind, deadline });
        previous
    }

    /// Schedules `kind` to fire `delay` milliseconds after `now`.
    pub fn schedule_after(&mut self, kind: K, now: u64, delay: u64) -> Option<u64> {
        self.schedule(kind, now.saturating_add(delay))
    }

    /// Cancels `kind`, returning its deadline if it was pending.
    pub fn cancel(&mut self, kind: &K) -> Option<u64> {
        let idx = self.entries.iter().position(|t| t.kind == *kind)?;
        Some(self.entries.remove(idx).deadline)
    }

    /// Returns `true` if `kind` is pending.
    #[must_use]
    pub fn is_pending(&self, kind: &K) -> bool {
        self.entries.iter().any(|t| t.kind == *kind)
    }

    /// Deadline of `kind`, if pending.
    #[must_use]
    pub fn deadline(&self, kind: &K) -> Option<u64> {
        self.entries
            .iter()
            .find(|t| t.kind == *kind)
            .map(|t| t.deadline)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|t| t.deadline)
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<K> {
        match self.entries.first() {
            Some(t) if t.deadline <= now => Some(self.entries.remove(0).kind),
            _ => None,
        }
    }

    /// Removes and returns every timer due at `now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> Vec<K> {
        let split = self.entries.partition_point(|t| t.deadline <= now);
        self.entries.drain(..split).map(|t| t.kind).collect()
    }

    /// Drops all pending timers.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates pending timers in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &Timer<K>> {
        self.entries.iter()
    }
}
